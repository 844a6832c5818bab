//! Policy-driven file discovery
//!
//! The walk is built on `ignore::WalkBuilder` with all of its own filtering
//! switched off; every include/exclude decision comes from the policy filters.
//! Pruned directories are cut in `filter_entry`, so their contents are never
//! read from disk.

use super::data::{DiscoveredFile, FileList};
use super::filters::{DirectoryFilter, FileFilter, Filter, FilterDecision};
use super::gitignore::GitignoreMatcher;
use super::stats::{DiscoveryStats, StatsCollector};
use crate::config::Policy;
use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder, WalkState};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// How the directory tree is walked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Single-threaded, depth-first; each directory's files come before its
    /// subdirectories, each group in file-name order
    #[default]
    Sequential,
    /// Subtrees walked on worker threads, result sorted into sequential order
    Parallel,
}

/// Result of one discovery run
#[derive(Debug, Clone)]
pub struct Discovery {
    pub files: FileList,
    pub stats: DiscoveryStats,
}

/// Walks a root directory and applies the discovery policy
#[derive(Debug)]
pub struct DiscoveryEngine {
    root: PathBuf,
    directory_filter: Arc<DirectoryFilter>,
    file_filter: Arc<FileFilter>,
    mode: DiscoveryMode,
}

impl DiscoveryEngine {
    /// Create an engine for `root`
    ///
    /// Fails if `root` does not exist or is not a directory.
    pub fn new(root: &Path, policy: &Policy, gitignore: Option<GitignoreMatcher>) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Root directory not found at '{}'", root.display());
        }
        let root = std::path::absolute(root)
            .with_context(|| format!("Failed to resolve root directory '{}'", root.display()))?;

        Ok(Self {
            directory_filter: Arc::new(DirectoryFilter::new(policy, gitignore.clone())),
            file_filter: Arc::new(FileFilter::new(policy, gitignore)),
            root,
            mode: DiscoveryMode::default(),
        })
    }

    pub fn with_mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Walk the tree and return the included files in walk order
    pub fn discover(&self) -> Result<Discovery> {
        let start_time = Instant::now();
        let context = Arc::new(WalkContext {
            root: self.root.clone(),
            directory_filter: self.directory_filter.clone(),
            file_filter: self.file_filter.clone(),
            stats: StatsCollector::new(),
        });

        tracing::debug!(
            "Walking {} ({:?} mode)",
            self.root.display(),
            self.mode
        );

        let files = match self.mode {
            DiscoveryMode::Sequential => self.walk_sequential(&context),
            DiscoveryMode::Parallel => self.walk_parallel(&context),
        };

        let stats = context
            .stats
            .to_discovery_stats(start_time.elapsed().as_millis() as u64);
        tracing::info!(
            "Discovered {} files ({} excluded, {} directories pruned) in {}ms",
            files.len(),
            stats.files_excluded(),
            stats.directories_pruned,
            stats.duration_ms
        );

        Ok(Discovery { files, stats })
    }

    fn walk_builder(&self, context: &Arc<WalkContext>) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false) // Policy decides, not the walker
            .follow_links(false)
            .max_depth(None);

        let filter_context = context.clone();
        builder.filter_entry(move |entry| filter_context.should_descend(entry));
        builder
    }

    fn walk_sequential(&self, context: &Arc<WalkContext>) -> FileList {
        let mut builder = self.walk_builder(context);
        builder.sort_by_file_path(|a, b| {
            is_directory(a)
                .cmp(&is_directory(b))
                .then_with(|| a.file_name().cmp(&b.file_name()))
        });

        builder
            .build()
            .filter_map(|result| context.visit(result))
            .collect()
    }

    fn walk_parallel(&self, context: &Arc<WalkContext>) -> FileList {
        let files = Arc::new(Mutex::new(Vec::new()));
        let files_clone = files.clone();
        let visitor_context = context.clone();

        self.walk_builder(context).build_parallel().run(move || {
            let files = files_clone.clone();
            let context = visitor_context.clone();

            Box::new(move |result| {
                if let Some(file) = context.visit(result) {
                    files
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(file);
                }
                WalkState::Continue
            })
        });

        let mut files = match Arc::try_unwrap(files) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };

        sort_in_walk_order(&mut files);
        files
    }
}

/// Discover files under `root` with a sequential walk
pub fn discover(
    root: &Path,
    policy: &Policy,
    gitignore: Option<&GitignoreMatcher>,
) -> Result<FileList> {
    let engine = DiscoveryEngine::new(root, policy, gitignore.cloned())?;
    Ok(engine.discover()?.files)
}

/// Sort into the order a sequential walk produces
pub fn sort_in_walk_order(files: &mut [DiscoveredFile]) {
    files.sort_by(|a, b| walk_order(&a.relative_path, &b.relative_path));
}

/// Compare two relative file paths the way the sequential walk visits them
///
/// At the first differing component, a file (the last component) sorts
/// before a directory; otherwise names compare bytewise.
fn walk_order(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('/').collect();
    let right: Vec<&str> = b.split('/').collect();

    for (depth, (l, r)) in left.iter().zip(&right).enumerate() {
        if l != r {
            let l_is_dir = depth + 1 < left.len();
            let r_is_dir = depth + 1 < right.len();
            return l_is_dir.cmp(&r_is_dir).then_with(|| l.cmp(r));
        }
    }
    left.len().cmp(&right.len())
}

/// Links are not followed, so a link to a directory sorts as a file
fn is_directory(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|metadata| metadata.is_dir())
}

/// State shared by walker threads for one run
#[derive(Debug)]
struct WalkContext {
    root: PathBuf,
    directory_filter: Arc<DirectoryFilter>,
    file_filter: Arc<FileFilter>,
    stats: StatsCollector,
}

impl WalkContext {
    /// `filter_entry` hook: false prunes a directory before it is read
    fn should_descend(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }

        let Some(relative_path) = super::data::relative_posix_path(&self.root, entry.path())
        else {
            return true;
        };

        match self.directory_filter.filter(&relative_path) {
            FilterDecision::Skip(reason) => {
                tracing::debug!("Pruned directory {} ({})", relative_path, reason);
                self.stats.increment_directories_pruned();
                false
            }
            _ => true,
        }
    }

    /// Handle one walk result, returning the file if it is included
    fn visit(&self, result: Result<DirEntry, ignore::Error>) -> Option<DiscoveredFile> {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Error walking directory: {}", err);
                self.stats.increment_walk_errors();
                return None;
            }
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            self.stats.increment_directories_visited();
            return None;
        }

        // Links are not followed; a link to a file is still read as that file
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            tracing::trace!("Skipping non-file entry {}", entry.path().display());
            return None;
        }

        let file = DiscoveredFile::new(&self.root, entry.into_path())?;
        match self.file_filter.filter(&file) {
            FilterDecision::Skip(reason) => {
                tracing::trace!("Excluded {} ({})", file.relative_path, reason);
                self.stats.increment_files_skipped(reason);
                None
            }
            decision => {
                self.stats
                    .increment_files_included(decision == FilterDecision::ForceInclude);
                Some(file)
            }
        }
    }
}
