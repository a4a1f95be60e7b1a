//! Run configuration for reweighting.
//!
//! Values come from (in increasing precedence) the built-in defaults, an
//! optional TOML file, and command-line overrides applied by the caller.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Parameters of one raking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IpfConfig {
    /// Stop once the largest weight change in a pass is below this.
    pub tolerance: f64,
    /// Upper bound on the number of passes.
    pub max_iterations: usize,
    /// Reject malformed targets before raking instead of degrading silently.
    pub strict: bool,
}

impl Default for IpfConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_iterations: 100,
            strict: false,
        }
    }
}

impl IpfConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("[config::from_toml_str] Failed to parse IPF config")
    }

    /// Read a TOML config file at `path`.
    pub fn read_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("[config::read_toml] Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("[config::read_toml] Invalid config in {}", path.display()))
    }

    /// Check that the run parameters are usable.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tolerance.is_finite() && self.tolerance > 0.0,
            "[config::validate] tolerance must be a positive number, got {}", self.tolerance);
        ensure!(self.max_iterations > 0,
            "[config::validate] max_iterations must be at least 1");
        Ok(())
    }
}
