//! Name and path pattern sets used by the discovery policy
//!
//! Policy entries are literal names ("node_modules") or literal relative paths
//! ("src/generated"), and every entry always matches itself exactly. Entries
//! containing glob metacharacters ("*.egg-info", ".env.*") are additionally
//! compiled into a [`GlobSet`], so `pages/[id].tsx` matches its own path and
//! `*.swp` also matches `notes.swp`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Check if a string contains glob pattern characters
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Literal entries plus precompiled glob entries
#[derive(Debug, Clone)]
pub struct PatternSet {
    literals: HashSet<String>,
    globs: GlobSet,
    glob_count: usize,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PatternSet {
    /// A set that matches nothing
    pub fn empty() -> Self {
        Self {
            literals: HashSet::new(),
            globs: GlobSet::empty(),
            glob_count: 0,
        }
    }

    /// Build a set from policy entries
    ///
    /// An entry that is not a valid glob still matches literally.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut literals = HashSet::new();
        let mut builder = GlobSetBuilder::new();
        let mut glob_count = 0;

        for entry in entries {
            let entry = entry.as_ref();
            literals.insert(entry.to_string());
            if !is_glob_pattern(entry) {
                continue;
            }

            // `*` stays within one path segment, like gitignore
            match GlobBuilder::new(entry).literal_separator(true).build() {
                Ok(glob) => {
                    builder.add(glob);
                    glob_count += 1;
                }
                Err(e) => tracing::debug!("'{}' is matched literally only: {}", entry, e),
            }
        }

        let globs = match builder.build() {
            Ok(globs) => globs,
            Err(e) => {
                tracing::warn!("Failed to compile glob patterns, matching entries literally: {}", e);
                glob_count = 0;
                GlobSet::empty()
            }
        };

        tracing::trace!(
            "Compiled pattern set: {} literal, {} glob",
            literals.len(),
            glob_count
        );

        Self {
            literals,
            globs,
            glob_count,
        }
    }

    /// Check a single candidate (bare name or POSIX relative path)
    pub fn is_match(&self, candidate: &str) -> bool {
        self.literals.contains(candidate) || (self.glob_count > 0 && self.globs.is_match(candidate))
    }

    /// Check whether any of the candidates matches
    pub fn matches_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|candidate| self.is_match(candidate))
    }

}
