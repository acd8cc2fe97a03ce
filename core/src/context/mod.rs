mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, BoundAction, CombatConfig, KeyConfig};
pub use error::ConfigError;
