//! Policy configuration for llmcontext
//!
//! This module resolves the inclusion/exclusion policy for a run. The policy
//! starts from the built-in defaults in [`defaults`] and is then adjusted by the
//! optional `[tool.llmcontext]` section of the project's `pyproject.toml`:
//!
//! - `allowed_*` keys **replace** the default set when present (an empty array
//!   means "no restriction")
//! - `ignored_*` keys are **unioned** with the default set

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub mod core;
pub mod defaults;

pub use self::core::{CONFIG_FILENAME, CONFIG_SECTION, load_overrides, resolve};

/// Process-wide default policy, built once from the constant lists
static DEFAULT_POLICY: LazyLock<Policy> = LazyLock::new(|| Policy {
    allowed_dirs: collect(defaults::DEFAULT_ALLOWED_DIRS),
    allowed_files: collect(defaults::DEFAULT_ALLOWED_FILES),
    allowed_extensions: collect(defaults::DEFAULT_ALLOWED_EXTENSIONS),
    ignored_dirs: collect(defaults::DEFAULT_IGNORED_DIRS),
    ignored_files: collect(defaults::DEFAULT_IGNORED_FILES),
    ignored_extensions: collect(defaults::DEFAULT_IGNORED_EXTENSIONS),
});

fn collect(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}

/// Resolved inclusion/exclusion policy for one run
///
/// A policy is a plain value: deriving a project policy from the defaults
/// produces a new `Policy` and never touches [`Policy::defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Path prefixes a file must live under (empty = no restriction)
    pub allowed_dirs: BTreeSet<String>,
    /// Relative paths that are always included
    pub allowed_files: BTreeSet<String>,
    /// Extensions (with leading dot) that are always included
    pub allowed_extensions: BTreeSet<String>,
    /// Directory names or relative paths that are pruned from the walk
    pub ignored_dirs: BTreeSet<String>,
    /// File names or relative paths that are excluded
    pub ignored_files: BTreeSet<String>,
    /// Extensions (with leading dot) that are excluded
    pub ignored_extensions: BTreeSet<String>,
}

/// User-supplied adjustments read from `[tool.llmcontext]`
///
/// `None` means the key was absent; `Some(vec![])` means it was present and
/// empty, which matters for the `allowed_*` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOverrides {
    pub allowed_dirs: Option<Vec<String>>,
    pub allowed_files: Option<Vec<String>>,
    pub allowed_extensions: Option<Vec<String>>,
    pub ignored_dirs: Option<Vec<String>>,
    pub ignored_files: Option<Vec<String>>,
    pub ignored_extensions: Option<Vec<String>>,
}

impl PolicyOverrides {
    /// True when no recognized key was set
    pub fn is_empty(&self) -> bool {
        self.allowed_dirs.is_none()
            && self.allowed_files.is_none()
            && self.allowed_extensions.is_none()
            && self.ignored_dirs.is_none()
            && self.ignored_files.is_none()
            && self.ignored_extensions.is_none()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::defaults().clone()
    }
}

impl Policy {
    /// The shared built-in default policy
    pub fn defaults() -> &'static Policy {
        &DEFAULT_POLICY
    }

    /// Derive a new policy by applying overrides on top of this one
    pub fn with_overrides(&self, overrides: &PolicyOverrides) -> Policy {
        Policy {
            allowed_dirs: replace(&self.allowed_dirs, &overrides.allowed_dirs, normalize_path),
            allowed_files: replace(&self.allowed_files, &overrides.allowed_files, normalize_path),
            allowed_extensions: replace(
                &self.allowed_extensions,
                &overrides.allowed_extensions,
                normalize_extension,
            ),
            ignored_dirs: union(&self.ignored_dirs, &overrides.ignored_dirs, normalize_path),
            ignored_files: union(&self.ignored_files, &overrides.ignored_files, normalize_path),
            ignored_extensions: union(
                &self.ignored_extensions,
                &overrides.ignored_extensions,
                normalize_extension,
            ),
        }
    }

    /// Render the policy as a `[tool.llmcontext]` TOML section
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).context("Failed to serialize policy")?;
        Ok(format!("[{CONFIG_SECTION}]\n{body}"))
    }
}

fn replace(
    base: &BTreeSet<String>,
    entries: &Option<Vec<String>>,
    normalize: fn(&str) -> Option<String>,
) -> BTreeSet<String> {
    match entries {
        Some(entries) => entries.iter().filter_map(|e| normalize(e)).collect(),
        None => base.clone(),
    }
}

fn union(
    base: &BTreeSet<String>,
    entries: &Option<Vec<String>>,
    normalize: fn(&str) -> Option<String>,
) -> BTreeSet<String> {
    let mut merged = base.clone();
    if let Some(entries) = entries {
        merged.extend(entries.iter().filter_map(|e| normalize(e)));
    }
    merged
}

/// Trim and convert to POSIX separators; blank entries are dropped
fn normalize_path(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.replace('\\', "/"))
}

/// Extensions always carry their leading dot
fn normalize_extension(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    match trimmed {
        "" | "." => None,
        ext if ext.starts_with('.') => Some(ext.to_string()),
        ext => Some(format!(".{ext}")),
    }
}

#[cfg(test)]
mod tests;
