//! Configuration management for the CLI
//!
//! Optional defaults live in `~/.config/nlh/config.json` and can be
//! overridden with `NLH_*` environment variables; explicit flags always
//! win.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Defaults applied when the matching flags are absent
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default namespace for workload queries
    pub namespace: Option<String>,
    /// Default path searched for log files inside the pod
    pub container_path: Option<String>,
    /// Default local destination root
    pub destination: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = Self::config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("NLH"))
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("nlh").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.namespace.is_none());
        assert!(config.container_path.is_none());
        assert!(config.destination.is_none());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            namespace: Some("logging".to_string()),
            container_path: Some("/var/log/app".to_string()),
            destination: Some(PathBuf::from("/srv/collected")),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.namespace.as_deref(), Some("logging"));
        assert_eq!(parsed.container_path.as_deref(), Some("/var/log/app"));
        assert_eq!(parsed.destination, Some(PathBuf::from("/srv/collected")));
    }
}
