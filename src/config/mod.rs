//! Configuration module for ssh-key-retriever
//!
//! This module handles loading and validating the JSON configuration file
//! that carries the directory service endpoint and its REST credentials.

mod file;

use serde::{Deserialize, Serialize};

pub use file::{config_search_paths, find_config_file, load_config, ConfigFile, ConfigPath};

/// Placeholder values shipped in the example configuration file.
///
/// A field still carrying one of these means the config was deployed
/// unmodified, which must fail loudly rather than query a bogus endpoint.
const PLACEHOLDER_VALUES: [&str; 2] = ["xxxxxxx", "xxxxxxxxxxxxx"];

/// Main configuration structure
///
/// The on-disk key names (`BaseUrl`, `RestUser`, `RestPasswd`) are fixed by
/// already-deployed config files; `RestPasswd` in particular must keep its
/// abbreviated spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the directory service, including a trailing slash
    #[serde(rename = "BaseUrl")]
    pub base_url: String,

    /// Username for HTTP Basic authentication
    #[serde(rename = "RestUser")]
    pub rest_user: String,

    /// Password for HTTP Basic authentication
    #[serde(rename = "RestPasswd")]
    pub rest_password: String,
}

impl Config {
    /// Validate that all required fields are usable
    ///
    /// Each field must be non-empty and must not equal one of the documented
    /// placeholder values. The error names the on-disk field, since that is
    /// what the operator sees in the file.
    pub fn validate(&self) -> crate::Result<()> {
        validate_field("BaseUrl", &self.base_url)?;
        validate_field("RestUser", &self.rest_user)?;
        validate_field("RestPasswd", &self.rest_password)?;
        Ok(())
    }
}

fn validate_field(name: &str, value: &str) -> crate::Result<()> {
    if value.is_empty() {
        return Err(crate::Error::Config(format!(
            "Required field '{}' is missing or empty",
            name
        )));
    }
    if PLACEHOLDER_VALUES.contains(&value) {
        return Err(crate::Error::Config(format!(
            "Field '{}' still has its placeholder value; edit the configuration file",
            name
        )));
    }
    Ok(())
}
