//! Filters applied during the directory walk
//!
//! Directories are checked by [`DirectoryFilter`] before descent so an ignored
//! subtree is never read. Files are checked by [`FileFilter`], which applies the
//! allow/ignore policy in a fixed priority order.

pub mod directory;
pub mod file;

pub use directory::DirectoryFilter;
pub use file::FileFilter;

use std::fmt;

/// Common trait for walk filters
pub trait Filter {
    /// Input type for the filter
    type Input: ?Sized;

    /// Decide what to do with the input
    fn filter(&self, input: &Self::Input) -> FilterDecision;

    /// Get the name of this filter for debugging/logging
    fn name(&self) -> &'static str;
}

/// Outcome of a filter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Process this file/directory
    Process,
    /// Include this file even though an ignore rule would drop it
    ForceInclude,
    /// Skip this file/directory with reason
    Skip(SkipReason),
}

impl FilterDecision {
    pub fn is_included(self) -> bool {
        !matches!(self, FilterDecision::Skip(_))
    }
}

/// Why an entry was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Directory name or relative path is in `ignored_dirs`
    IgnoredDirectory,
    /// File lies outside every `allowed_dirs` prefix
    OutsideAllowedDirs,
    /// File name or relative path is in `ignored_files`
    IgnoredFile,
    /// File extension is in `ignored_extensions`
    IgnoredExtension,
    /// Matched by the root `.gitignore`
    Gitignore,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::IgnoredDirectory => "ignored directory",
            SkipReason::OutsideAllowedDirs => "outside allowed directories",
            SkipReason::IgnoredFile => "ignored file",
            SkipReason::IgnoredExtension => "ignored extension",
            SkipReason::Gitignore => "gitignore",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
