//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Environment variables: `ORGTREE_*` prefix

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::GroupKind;

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Path to the TOML group store
    pub store_path: Option<PathBuf>,
    /// Group kind commands operate on when `--kind` is not given
    pub default_kind: GroupKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            default_kind: GroupKind::Organization,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let mut builder = Config::builder();

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                builder = builder.add_source(File::from(global));
            }
        }

        builder = builder.add_source(Environment::with_prefix("ORGTREE"));

        let config = builder.build().map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })?;

        // absent keys fall back to the compiled defaults via serde(default)
        config
            .try_deserialize()
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })
    }

    /// `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().join("orgtree.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_kind, GroupKind::Organization);
        assert!(settings.store_path.is_none());
    }
}
