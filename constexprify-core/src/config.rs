//! Configuration loading from constexprify.toml.

use crate::error::{ConstexprifyError, ConstexprifyResult};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for constexprify.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConstexprifyConfig {
    /// Function-name patterns (regex) whose suggestions are suppressed.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from constexprify.toml if it exists.
///
/// Read and parse failures surface as [`ConstexprifyError::Config`], which
/// callers may treat as recoverable (fall back to defaults).
pub fn load_config(root: &Path) -> ConstexprifyResult<Option<ConstexprifyConfig>> {
    let path = root.join("constexprify.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(&path).map_err(|e| ConstexprifyError::config(&path, e.to_string()))?;
    let cfg = toml::from_str(&content)
        .map_err(|e| ConstexprifyError::config(&path, format!("invalid constexprify.toml: {}", e)))?;
    Ok(Some(cfg))
}
