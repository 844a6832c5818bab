use super::{Filter, FilterDecision, SkipReason};
use crate::config::Policy;
use crate::scan::gitignore::GitignoreMatcher;
use crate::scan::patterns::PatternSet;

/// Directory pruning filter
///
/// Input is the directory's POSIX path relative to the scan root. A directory
/// is pruned when its bare name or its relative path is listed in
/// `ignored_dirs`, or when the root `.gitignore` ignores it as a directory.
/// Nothing beneath a pruned directory is ever visited, so force-allow rules
/// cannot reach into it.
#[derive(Debug, Clone)]
pub struct DirectoryFilter {
    ignored_dirs: PatternSet,
    gitignore: Option<GitignoreMatcher>,
}

impl DirectoryFilter {
    pub fn new(policy: &Policy, gitignore: Option<GitignoreMatcher>) -> Self {
        Self {
            ignored_dirs: PatternSet::new(&policy.ignored_dirs),
            gitignore,
        }
    }
}

impl Filter for DirectoryFilter {
    type Input = str;

    fn filter(&self, relative_path: &str) -> FilterDecision {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);

        if self.ignored_dirs.matches_any(&[name, relative_path]) {
            tracing::trace!("Pruning directory {}: ignored_dirs", relative_path);
            return FilterDecision::Skip(SkipReason::IgnoredDirectory);
        }

        let gitignored = self
            .gitignore
            .as_ref()
            .is_some_and(|gitignore| gitignore.is_ignored(relative_path, true));
        if gitignored {
            tracing::trace!("Pruning directory {}: gitignore", relative_path);
            return FilterDecision::Skip(SkipReason::Gitignore);
        }

        FilterDecision::Process
    }

    fn name(&self) -> &'static str {
        "DirectoryFilter"
    }
}
