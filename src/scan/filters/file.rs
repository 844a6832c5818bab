use super::{Filter, FilterDecision, SkipReason};
use crate::config::Policy;
use crate::scan::data::DiscoveredFile;
use crate::scan::gitignore::GitignoreMatcher;
use crate::scan::patterns::PatternSet;
use std::collections::HashSet;

/// Per-file policy filter
///
/// Checks run in a fixed priority order:
/// 1. `allowed_files` (relative path) or `allowed_extensions` force-include
///    the file and skip every later check, `.gitignore` included
/// 2. a non-empty `allowed_dirs` drops files outside all of its prefixes
/// 3. `ignored_files` (bare name or relative path) and `ignored_extensions`
/// 4. the root `.gitignore`
#[derive(Debug, Clone)]
pub struct FileFilter {
    allowed_files: PatternSet,
    allowed_extensions: HashSet<String>,
    allowed_dirs: Vec<String>,
    ignored_files: PatternSet,
    ignored_extensions: HashSet<String>,
    gitignore: Option<GitignoreMatcher>,
}

impl FileFilter {
    pub fn new(policy: &Policy, gitignore: Option<GitignoreMatcher>) -> Self {
        Self {
            allowed_files: PatternSet::new(&policy.allowed_files),
            allowed_extensions: policy.allowed_extensions.iter().cloned().collect(),
            allowed_dirs: policy.allowed_dirs.iter().cloned().collect(),
            ignored_files: PatternSet::new(&policy.ignored_files),
            ignored_extensions: policy.ignored_extensions.iter().cloned().collect(),
            gitignore,
        }
    }

    fn is_force_allowed(&self, file: &DiscoveredFile) -> bool {
        self.allowed_files.is_match(&file.relative_path)
            || (!file.extension.is_empty() && self.allowed_extensions.contains(&file.extension))
    }

    fn is_outside_allowed_dirs(&self, file: &DiscoveredFile) -> bool {
        !self.allowed_dirs.is_empty()
            && !self
                .allowed_dirs
                .iter()
                .any(|prefix| file.relative_path.starts_with(prefix.as_str()))
    }
}

impl Filter for FileFilter {
    type Input = DiscoveredFile;

    fn filter(&self, file: &DiscoveredFile) -> FilterDecision {
        if self.is_force_allowed(file) {
            tracing::trace!("Force-including {}", file.relative_path);
            return FilterDecision::ForceInclude;
        }

        if self.is_outside_allowed_dirs(file) {
            return FilterDecision::Skip(SkipReason::OutsideAllowedDirs);
        }

        if self
            .ignored_files
            .matches_any(&[file.file_name(), file.relative_path.as_str()])
        {
            return FilterDecision::Skip(SkipReason::IgnoredFile);
        }

        if !file.extension.is_empty() && self.ignored_extensions.contains(&file.extension) {
            return FilterDecision::Skip(SkipReason::IgnoredExtension);
        }

        let gitignored = self
            .gitignore
            .as_ref()
            .is_some_and(|gitignore| gitignore.is_ignored(&file.relative_path, false));
        if gitignored {
            return FilterDecision::Skip(SkipReason::Gitignore);
        }

        FilterDecision::Process
    }

    fn name(&self) -> &'static str {
        "FileFilter"
    }
}
