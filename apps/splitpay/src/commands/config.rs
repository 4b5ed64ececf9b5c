//! # Config Commands

use tracing::debug;

use crate::config::AppConfig;

/// Gets the active configuration.
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}
