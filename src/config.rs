use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::climate::reshape::ClimateConvention;

/// Dashboard settings, read from an optional JSON file.
///
/// ```json
/// { "climate": { "convention": "prefix", "prefix": "pct_" }, "preview_rows": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How climate-fraction columns are recognised.
    pub climate: ClimateConvention,
    /// Rows shown in the data preview.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            climate: ClimateConvention::default(),
            preview_rows: 5,
        }
    }
}

impl DashboardConfig {
    /// Read the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
