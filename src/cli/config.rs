//! Configuration file
//!
//! ```json
//! { "extra_fields": "ignore", "contracts_dir": "./contracts", "log_events": true }
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::contract::ExtraFields;

use super::errors::{CliError, CliResult};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./lingo.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Policy for undeclared request fields (default "ignore")
    #[serde(default)]
    pub extra_fields: ExtraFields,

    /// Directory of additional contract files
    #[serde(default)]
    pub contracts_dir: Option<PathBuf>,

    /// Whether to emit structured log lines (default true)
    #[serde(default = "default_log_events")]
    pub log_events: bool,
}

fn default_log_events() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extra_fields: ExtraFields::default(),
            contracts_dir: None,
            log_events: default_log_events(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolves the config for a command.
    ///
    /// An explicit path must exist. Without one, `./lingo.json` is used when
    /// present and defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if let Some(dir) = &self.contracts_dir {
            if dir.as_os_str().is_empty() {
                return Err(CliError::config_error("contracts_dir must not be empty"));
            }
            if dir.exists() && !dir.is_dir() {
                return Err(CliError::config_error(format!(
                    "contracts_dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
