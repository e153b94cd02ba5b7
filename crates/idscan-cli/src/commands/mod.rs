//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod serve;

use std::path::{Path, PathBuf};

use idscan_core::IdScanConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idscan")
        .join("config.json")
}

/// Load configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdScanConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(IdScanConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(IdScanConfig::from_file(&path)?)
    } else {
        Ok(IdScanConfig::default())
    }
}
