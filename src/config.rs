//! Optional JSON configuration file
//!
//! Values here sit between the built-in defaults and command-line flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::palette::SynthesisParams;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_DETAIL_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Entries shown in the top-N rankings
    pub top_n: usize,
    /// Rows shown in the detail table
    pub detail_rows: usize,
    /// Restrict to the most recent year when no year is selected
    pub default_latest_year: bool,
    /// Colors synthesized once the base palette runs out
    pub synthesis: SynthesisParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            detail_rows: DEFAULT_DETAIL_ROWS,
            default_latest_year: true,
            synthesis: SynthesisParams::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(DashboardError::Config("top_n must be positive".to_string()));
        }
        self.synthesis.validate()
    }
}
