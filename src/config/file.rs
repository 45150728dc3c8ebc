//! Configuration file discovery and loading
//!
//! This module provides functionality to find and load the configuration
//! file from its standard locations.

use std::path::{Path, PathBuf};

use super::Config;

/// Configuration file wrapper with path information
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Path where the configuration was loaded from
    pub path: PathBuf,

    /// The parsed configuration
    pub config: Config,
}

/// Configuration file search path with description
#[derive(Debug, Clone)]
pub struct ConfigPath {
    /// The actual file path
    pub path: PathBuf,
    /// Human-readable description for display
    pub description: &'static str,
}

/// Standard configuration file name
const CONFIG_FILE_NAME: &str = "ssh-key-retriever.json.conf";

/// Get all configuration search paths with descriptions (in priority order)
///
/// Search order:
/// 1. `./ssh-key-retriever.json.conf` (working directory)
/// 2. `/etc/ssh-key-retriever.json.conf` (system-wide)
pub fn config_search_paths() -> Vec<ConfigPath> {
    vec![
        ConfigPath {
            path: PathBuf::from(CONFIG_FILE_NAME),
            description: "./ssh-key-retriever.json.conf",
        },
        ConfigPath {
            path: PathBuf::from("/etc").join(CONFIG_FILE_NAME),
            description: "/etc/ssh-key-retriever.json.conf",
        },
    ]
}

/// Find the configuration file in standard locations
///
/// Returns `None` if no configuration file is found. Missing configuration
/// is not fatal at this layer; the caller decides.
pub fn find_config_file() -> Option<PathBuf> {
    for cp in config_search_paths() {
        if cp.path.exists() && cp.path.is_file() {
            tracing::debug!(path = %cp.path.display(), "Found configuration file");
            return Some(cp.path);
        }
    }

    tracing::debug!("No configuration file found in standard locations");
    None
}

/// Load and validate configuration from the specified path
pub fn load_config(path: &Path) -> crate::Result<ConfigFile> {
    tracing::debug!("Loading configuration from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: Config = serde_json::from_str(&content).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to parse configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;

    Ok(ConfigFile {
        path: path.to_path_buf(),
        config,
    })
}
