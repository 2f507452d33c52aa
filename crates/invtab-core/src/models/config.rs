//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InvtabError, Result};

/// Main configuration for invtab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvtabConfig {
    /// Row extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Row extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum nesting depth searched for tables. Deeper subtrees are skipped.
    pub max_depth: usize,

    /// Exclusive upper bound for a valid quantity.
    pub max_quantity: f64,

    /// Inclusive upper bound for a valid tax percentage.
    pub max_tax_pct: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_depth: 128, // serde_json refuses to parse anything deeper
            max_quantity: 10_000.0,
            max_tax_pct: 100.0,
        }
    }
}

/// Output configuration used by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Default output format.
    pub format: OutputFormat,
}

/// Serialization format for extracted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON array of row objects.
    #[default]
    Json,
    /// CSV with one line per row.
    Csv,
}

impl InvtabConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| InvtabError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.max_depth == 0 {
            return Err(InvtabError::Config(
                "extraction.max_depth must be at least 1".to_string(),
            ));
        }
        if !(extraction.max_quantity.is_finite() && extraction.max_quantity > 0.0) {
            return Err(InvtabError::Config(
                "extraction.max_quantity must be a positive number".to_string(),
            ));
        }
        if !(extraction.max_tax_pct.is_finite() && extraction.max_tax_pct >= 0.0) {
            return Err(InvtabError::Config(
                "extraction.max_tax_pct must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
