//! Root `.gitignore` support
//!
//! Only the `.gitignore` at the scan root is read. Rules are compiled with the
//! `ignore` crate's gitignore engine, which gives us full wildmatch semantics:
//! `**`, character classes, anchoring on a leading or interior `/`,
//! directory-only rules with a trailing `/`, `!` negation and last-match-wins.

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

pub const GITIGNORE_FILENAME: &str = ".gitignore";

/// Compiled rules from one `.gitignore` file
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    matcher: Gitignore,
    rule_count: usize,
    skipped_lines: usize,
}

impl GitignoreMatcher {
    /// Load `<root>/.gitignore`
    ///
    /// Returns `Ok(None)` when the file does not exist. A file that exists
    /// but cannot be read is an error the caller may downgrade to a warning.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(GITIGNORE_FILENAME);
        if !path.is_file() {
            tracing::debug!("No {} found at {}", GITIGNORE_FILENAME, root.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let matcher = Self::from_content(root, &path, &content);
        tracing::info!(
            "Loaded {} rules from {}",
            matcher.rule_count(),
            path.display()
        );
        Ok(Some(matcher))
    }

    /// Compile rules from `.gitignore` text
    ///
    /// `source` is only used for diagnostics. Lines that fail to compile are
    /// skipped with a warning and do not affect the remaining rules.
    pub fn from_content(root: &Path, source: &Path, content: &str) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        let mut rule_count = 0;
        let mut skipped_lines = 0;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match builder.add_line(Some(source.to_path_buf()), line) {
                Ok(_) => rule_count += 1,
                Err(e) => {
                    skipped_lines += 1;
                    tracing::warn!(
                        "Skipping malformed pattern on line {} of {}: {}",
                        index + 1,
                        source.display(),
                        e
                    );
                }
            }
        }

        let matcher = match builder.build() {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!("Failed to compile {}: {}", source.display(), e);
                rule_count = 0;
                Gitignore::empty()
            }
        };

        Self {
            matcher,
            rule_count,
            skipped_lines,
        }
    }

    /// Whether a POSIX path relative to the root is ignored
    ///
    /// `is_dir` lets directory-only rules (`build/`) apply.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.matcher
            .matched(Path::new(relative_path), is_dir)
            .is_ignore()
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}
