//! File discovery
//!
//! Walks a project root, prunes ignored directories before descent, and
//! filters the remaining files against the resolved [`Policy`](crate::config::Policy)
//! and the root `.gitignore`.

pub mod data;
pub mod discovery;
pub mod filters;
pub mod gitignore;
pub mod patterns;
pub mod stats;

pub use data::{DiscoveredFile, FileList};
pub use discovery::{Discovery, DiscoveryEngine, DiscoveryMode, discover};
pub use gitignore::GitignoreMatcher;
pub use stats::DiscoveryStats;
