//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod send;

use std::path::Path;

use preplog_core::PreplogConfig;

/// Load the config file given on the command line, or fall back to the
/// default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PreplogConfig> {
    if let Some(path) = config_path {
        return Ok(PreplogConfig::from_file(Path::new(path))?);
    }
    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(PreplogConfig::from_file(&default_path)?);
    }
    Ok(PreplogConfig::default())
}
