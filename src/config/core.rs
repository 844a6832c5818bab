use super::{Policy, PolicyOverrides};
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Format, Toml};
use std::path::Path;

/// Project configuration file looked up at the scan root
pub const CONFIG_FILENAME: &str = "pyproject.toml";

/// Dotted path of the section holding llmcontext settings
pub const CONFIG_SECTION: &str = "tool.llmcontext";

/// Resolve the policy for a scan root
///
/// A missing file, a missing section and an unparsable file all fall back to
/// the defaults; only the log level differs.
pub fn resolve(root: &Path) -> Policy {
    let config_path = root.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        tracing::info!("No {} found, using default policy", CONFIG_FILENAME);
        return Policy::defaults().clone();
    }

    tracing::info!("Loading project configuration from {}", CONFIG_FILENAME);
    match load_overrides(&config_path) {
        Ok(Some(overrides)) if !overrides.is_empty() => {
            tracing::info!("Found [{}] section, applying custom policy", CONFIG_SECTION);
            tracing::debug!("Policy overrides: {:?}", overrides);
            Policy::defaults().with_overrides(&overrides)
        }
        Ok(_) => {
            tracing::info!(
                "No [{}] section found in {}, using default policy",
                CONFIG_SECTION,
                CONFIG_FILENAME
            );
            Policy::defaults().clone()
        }
        Err(e) => {
            tracing::error!("Error reading or parsing {}: {:#}", CONFIG_FILENAME, e);
            Policy::defaults().clone()
        }
    }
}

/// Read `[tool.llmcontext]` from a TOML file
///
/// Returns `Ok(None)` when the section does not exist.
pub fn load_overrides(path: &Path) -> Result<Option<PolicyOverrides>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let figment = Figment::from(Toml::string(&content));

    match figment.find_value(CONFIG_SECTION) {
        Ok(_) => {}
        Err(e) if e.missing() => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to parse {}", path.display()));
        }
    }

    let overrides: PolicyOverrides = figment
        .extract_inner(CONFIG_SECTION)
        .with_context(|| format!("Invalid [{}] section in {}", CONFIG_SECTION, path.display()))?;

    Ok(Some(overrides))
}
