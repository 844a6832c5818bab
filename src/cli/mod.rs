//! Command-line interface for llmcontext

use crate::aggregate;
use crate::config::{self, Policy};
use crate::progress::ProgressTracker;
use crate::scan::{Discovery, DiscoveryEngine, DiscoveryMode, DiscoveryStats, GitignoreMatcher};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

mod output;

pub use output::Output;

/// Fallback project name when the root has no final component (e.g. `/`)
const FALLBACK_PROJECT_NAME: &str = "project";

#[derive(Parser, Debug)]
#[command(
    name = "llmcontext",
    version = env!("CARGO_PKG_VERSION"),
    about = "Consolidate project source code into a single Markdown context file for LLMs",
    long_about = "Walks a project directory, applies allow/ignore rules from built-in defaults, \
                  [tool.llmcontext] in pyproject.toml and the root .gitignore, and writes every \
                  selected file into one Markdown document."
)]
pub struct Cli {
    /// Root directory of the project to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file [default: <project_name>_context.md]
    #[arg(short, long, value_name = "FILE", env = "LLMCONTEXT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// List the files that would be included, without writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Print the resolved policy as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Do not apply the root .gitignore
    #[arg(long)]
    pub no_gitignore: bool,

    /// Walk the directory tree on multiple threads
    #[arg(long)]
    pub parallel: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let root = self
            .root
            .canonicalize()
            .ok()
            .filter(|path| path.is_dir())
            .with_context(|| {
                format!("Root directory not found at '{}'", self.root.display())
            })?;

        let policy = config::resolve(&root);
        if self.show_config {
            print!("{}", policy.to_toml()?);
            return Ok(());
        }

        let project_name = project_name(&root);
        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{project_name}_context.md")));

        output.info(&format!("Starting to process project: '{project_name}'"));

        let mut progress = ProgressTracker::new(self.quiet);
        progress.start_discovery();
        let Discovery { mut files, stats } = self.discover(&root, &policy)?;
        progress.finish_discovery(files.len());

        // Never feed a previous run's artifact back into the next one
        if let Ok(existing_output) = output_path.canonicalize() {
            let before = files.len();
            files.retain(|file| file.path != existing_output);
            if files.len() < before {
                tracing::debug!("Excluded output file {} from context", existing_output.display());
            }
        }

        report_stats(&output, &stats);

        if files.is_empty() {
            output.warning("No files found to process. Check your ignore/allow configuration.");
            return Ok(());
        }

        if self.dry_run {
            for file in &files {
                println!("{}", file.relative_path);
            }
            output.info(&format!("{} files would be written", files.len()));
            return Ok(());
        }

        output.info(&format!("Processing {} files...", files.len()));
        progress.start_writing(files.len());
        let summary =
            aggregate::write_context_file(&project_name, &files, &output_path, &progress)?;
        progress.finish_writing();

        if summary.files_skipped > 0 {
            output.warning(&format!(
                "Skipped {} unreadable or non-UTF-8 files",
                summary.files_skipped
            ));
        }
        output.verbose_summary("📝", "Files written", summary.files_written);
        output.success(&format!(
            "Successfully created context file: {}",
            output_path.display()
        ));
        Ok(())
    }

    fn discover(&self, root: &Path, policy: &Policy) -> Result<Discovery> {
        let gitignore = if self.no_gitignore {
            tracing::info!("Skipping .gitignore rules");
            None
        } else {
            tracing::info!("Loading .gitignore rules");
            GitignoreMatcher::load(root).unwrap_or_else(|e| {
                tracing::warn!("{:#}", e);
                None
            })
        };

        let mode = if self.parallel {
            DiscoveryMode::Parallel
        } else {
            DiscoveryMode::Sequential
        };

        DiscoveryEngine::new(root, policy, gitignore)?
            .with_mode(mode)
            .discover()
    }
}

/// Project name: the final component of the root directory
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string())
}

fn report_stats(output: &Output, stats: &DiscoveryStats) {
    output.verbose_summary("📁", "Directories visited", stats.directories_visited);
    output.verbose_breakdown("directories pruned", stats.directories_pruned);
    output.verbose_summary("📄", "Files included", stats.files_included);
    output.verbose_breakdown("force-allowed", stats.files_force_included);
    output.verbose_breakdown("outside allowed directories", stats.files_outside_allowed_dirs);
    output.verbose_breakdown("ignored by policy", stats.files_ignored);
    output.verbose_breakdown("ignored by .gitignore", stats.files_gitignored);
    if stats.walk_errors > 0 {
        output.warning(&format!(
            "{} entries could not be read during the walk",
            stats.walk_errors
        ));
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    // Create filter that suppresses debug from ignore/globset crates appropriately
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match (quiet, verbose) {
            (true, _) => tracing_subscriber::EnvFilter::new("error"),
            (false, 0) => tracing_subscriber::EnvFilter::new("warn"),
            (false, 1) => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            (false, 2) => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"), // -vvv shows everything including globset
        }
    });

    // try_init: a second CLI run in the same process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
