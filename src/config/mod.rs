//! Configuration module for the reward chart.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::ChartMode;

/// Directory name used under the per-user config directory.
pub const APP_DIR_NAME: &str = "beloningskartan";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `rewards.json` / `goals.json`
    pub data_dir: PathBuf,
    /// Directory receiving export files, the data directory when unset
    pub export_dir: Option<PathBuf>,
    /// Which chart variant to run
    pub mode: ChartMode,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("BELONINGSKARTAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&lookup));

        let export_dir = lookup("BELONINGSKARTAN_EXPORT_DIR").map(PathBuf::from);

        let mode = match lookup("BELONINGSKARTAN_MODE") {
            Some(raw) => ChartMode::from_name(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "Invalid BELONINGSKARTAN_MODE '{}', expected 'ledger' or 'progress'",
                    raw
                ))
            })?,
            None => ChartMode::default(),
        };

        let log_level = lookup("BELONINGSKARTAN_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            data_dir,
            export_dir,
            mode,
            log_level,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, mode: Option<ChartMode>, data_dir: Option<PathBuf>) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }

    pub fn export_dir(&self) -> &Path {
        self.export_dir.as_deref().unwrap_or(&self.data_dir)
    }
}

/// Resolve the per-user config directory the way XDG desktops do.
fn default_data_dir<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let base = lookup("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(".config")));

    match base {
        Some(base) => base.join(APP_DIR_NAME),
        None => PathBuf::from(".").join(APP_DIR_NAME),
    }
}
