//! Configuration handling for the terminal front end

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "mortgage_calc=warn";

/// User configuration. Form input is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalcConfig {
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: Option<String>,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl CalcConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "mortgage-calc", "mortgage-calc")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from the platform config dir, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: CalcConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
