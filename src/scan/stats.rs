//! Discovery statistics

use super::filters::SkipReason;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    // Directory stats
    pub directories_visited: usize,
    pub directories_pruned: usize,

    // File stats
    pub files_included: usize,
    pub files_force_included: usize,
    pub files_outside_allowed_dirs: usize,
    pub files_ignored: usize,
    pub files_gitignored: usize,

    pub walk_errors: usize,
    pub duration_ms: u64,
}

impl DiscoveryStats {
    /// Files looked at, kept or not
    pub fn files_seen(&self) -> usize {
        self.files_included + self.files_excluded()
    }

    pub fn files_excluded(&self) -> usize {
        self.files_outside_allowed_dirs + self.files_ignored + self.files_gitignored
    }
}

/// Thread-safe statistics collector shared by walker threads
#[derive(Debug, Default)]
pub struct StatsCollector {
    directories_visited: AtomicUsize,
    directories_pruned: AtomicUsize,
    files_included: AtomicUsize,
    files_force_included: AtomicUsize,
    files_outside_allowed_dirs: AtomicUsize,
    files_ignored: AtomicUsize,
    files_gitignored: AtomicUsize,
    walk_errors: AtomicUsize,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_directories_visited(&self) {
        self.directories_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_directories_pruned(&self) {
        self.directories_pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_files_included(&self, forced: bool) {
        self.files_included.fetch_add(1, Ordering::Relaxed);
        if forced {
            self.files_force_included.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_files_skipped(&self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::OutsideAllowedDirs => &self.files_outside_allowed_dirs,
            SkipReason::IgnoredFile | SkipReason::IgnoredExtension => &self.files_ignored,
            SkipReason::Gitignore => &self.files_gitignored,
            // Directories are counted by increment_directories_pruned
            SkipReason::IgnoredDirectory => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_walk_errors(&self) {
        self.walk_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Convert to final DiscoveryStats with walk duration
    pub fn to_discovery_stats(&self, duration_ms: u64) -> DiscoveryStats {
        DiscoveryStats {
            directories_visited: self.directories_visited.load(Ordering::Relaxed),
            directories_pruned: self.directories_pruned.load(Ordering::Relaxed),
            files_included: self.files_included.load(Ordering::Relaxed),
            files_force_included: self.files_force_included.load(Ordering::Relaxed),
            files_outside_allowed_dirs: self.files_outside_allowed_dirs.load(Ordering::Relaxed),
            files_ignored: self.files_ignored.load(Ordering::Relaxed),
            files_gitignored: self.files_gitignored.load(Ordering::Relaxed),
            walk_errors: self.walk_errors.load(Ordering::Relaxed),
            duration_ms,
        }
    }
}
