use std::path::PathBuf;

use resonator_core::{AppConfig, AppConfigExt, ConfigError};

/// Holds the state shared by every CLI command.
pub struct CliContext {
    pub config: AppConfig,
    /// Explicit config file; the platform config directory is used when unset
    config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match &config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Context over an in-memory config that is never written to the user's
    /// config directory.
    pub fn with_config(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        }
    }

    /// Where the configuration lives, for display.
    pub fn config_location(&self) -> String {
        match &self.config_path {
            Some(path) => path.display().to_string(),
            None => AppConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "<unknown>".to_string()),
        }
    }
}
