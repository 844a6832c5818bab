//! # llmcontext
//!
//! Consolidates a project's source files into a single Markdown document that
//! can be handed to an LLM as context.
//!
//! A run resolves a [`Policy`] (built-in defaults merged with
//! `[tool.llmcontext]` from `pyproject.toml`), walks the project root with
//! [`DiscoveryEngine`] while honoring the root `.gitignore`, and writes each
//! selected file as a fenced block via [`aggregate::write_context`].
//!
//! ```no_run
//! use llmcontext::{Policy, ProgressTracker, aggregate, discover};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = Path::new("my-project");
//! let policy = llmcontext::config::resolve(root);
//! let files = discover(root, &policy, None)?;
//! let mut out = Vec::new();
//! aggregate::write_context("my-project", &files, &mut out, &ProgressTracker::silent())?;
//! # let _ = Policy::defaults();
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod progress;
pub mod scan;

pub use cli::{Cli, Output};
pub use config::{Policy, PolicyOverrides};
pub use progress::ProgressTracker;
pub use scan::{
    DiscoveredFile, DiscoveryEngine, DiscoveryMode, FileList, GitignoreMatcher, discover,
};
