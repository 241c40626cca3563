//! Utility modules

pub mod config;
pub mod logging;

pub use config::{load_config, AppConfig, ConfigError};
pub use logging::setup_logging;
