//! Application configuration
//!
//! Re-exports the shared types from resonator-types and adds confy-backed
//! persistence plus the small edits the front ends need.

use std::path::{Path, PathBuf};

pub use resonator_types::{AppConfig, BoundAction, CombatConfig, KeyConfig};

use super::error::ConfigError;

const APP_NAME: &str = "resonator";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and editing
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn set_rotation(&mut self, rotation: &str);
    fn set_key_binding(&mut self, action: &str, key: &str) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    /// Load the user config, falling back to defaults if it cannot be read.
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }

    /// Load from an explicit file. A missing file is created with defaults.
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(|source| ConfigError::SavePath {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    /// Store a rotation script, trimmed of surrounding whitespace.
    fn set_rotation(&mut self, rotation: &str) {
        self.combat.rotation = rotation.trim().to_string();
    }

    fn set_key_binding(&mut self, action: &str, key: &str) -> Result<(), ConfigError> {
        let bound = BoundAction::from_label(action).ok_or_else(|| ConfigError::UnknownKeyAction {
            name: action.to_string(),
        })?;
        self.keys.set_key(bound, key);
        Ok(())
    }
}
