//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famcount/famcount.toml`
//! 3. Environment variables: `FAMCOUNT_*` prefix
//!
//! The CLI `--file` flag is applied on top by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::DEFAULT_TOTAL_LABEL;

/// Settings load failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Environment(String),
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub total_label: Option<String>,
}

/// Unified configuration for famcount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree description to aggregate (default: built-in family)
    pub tree_file: Option<PathBuf>,
    /// Label of the first report line
    pub total_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: None,
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
        }
    }
}

/// Get the XDG config directory for famcount.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famcount").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famcount.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Load settings from defaults, the global config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Like [`Settings::load`], reading the file layer from `config_path`.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    #[instrument(level = "debug")]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
                debug!("merged config file: {}", path.display());
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay.tree_file.clone().or_else(|| self.tree_file.clone()),
            total_label: overlay
                .total_label
                .clone()
                .unwrap_or_else(|| self.total_label.clone()),
        }
    }

    /// Apply FAMCOUNT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAMCOUNT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::Environment(e.to_string()))?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("total_label") {
            settings.total_label = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        self.tree_file = self.tree_file.as_deref().map(expand_path);
    }
}
