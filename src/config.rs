//! Configuration file handling.
//!
//! The configuration file is a small JSON document naming the revenue CSV and, for sheets that
//! use different headers, the names of the team and total columns. It is optional: without one,
//! the data file must be given on the command line and the columns are `TEAMS` and `TOTAL`.

use crate::error::{ErrorType, IntoResult, Res};
use crate::model::{IdColumns, TEAMS, TOTAL};
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "team-revenue";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object holds the settings for a run: where the revenue data lives and how its
/// identifier columns are named. Command-line overrides are applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    config_file: ConfigFile,
    data_path: Option<PathBuf>,
}

impl Config {
    /// Writes a new config file at `path` pointing at `data_path` and returns the loaded result.
    ///
    /// # Errors
    /// - Returns an error if the parent directory cannot be created or the file cannot be
    ///   written.
    pub async fn create(path: impl Into<PathBuf>, data_path: &Path) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Unable to create directory {}", parent.display()))
                .pub_result(ErrorType::Config)?;
        }
        let config_file = ConfigFile {
            data_path: Some(data_path.to_path_buf()),
            ..ConfigFile::default()
        };
        config_file
            .save(&path)
            .await
            .pub_result(ErrorType::Config)?;
        Self::load(path).await
    }

    /// Loads the config file at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config_file = ConfigFile::load(&path).await.pub_result(ErrorType::Config)?;
        let data_path = config_file
            .data_path
            .as_ref()
            .map(|p| resolve(&path, p));
        debug!("Loaded config from {}", path.display());
        Ok(Self {
            config_file,
            data_path,
        })
    }

    /// Loads `explicit` if given. Otherwise loads the file at `default_path()` when it exists, and
    /// falls back to built-in defaults when it does not.
    pub async fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(path).await,
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the configured data path, e.g. with a `--data` argument.
    pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
        if data_path.is_some() {
            self.data_path = data_path;
        }
        self
    }

    /// The revenue CSV to load.
    ///
    /// # Errors
    /// Returns an error of type `ErrorType::Config` if neither the config file nor the command
    /// line named one.
    pub fn data_path(&self) -> Result<&Path> {
        self.data_path
            .as_deref()
            .context("No revenue data file was given; pass --data or set data_path in the config")
            .pub_result(ErrorType::Config)
    }

    pub fn id_columns(&self) -> IdColumns {
        IdColumns {
            team: self.config_file.team_column.clone(),
            total: self.config_file.total_column.clone(),
        }
    }
}

/// The config file location used when none is given: `<config dir>/team-revenue/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_JSON))
}

/// Relative data paths are relative to the directory holding the config file.
fn resolve(config_path: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(p),
        None => p.to_path_buf(),
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "team-revenue",
///   "config_version": 1,
///   "data_path": "revenue.csv",
///   "team_column": "TEAMS",
///   "total_column": "TOTAL"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "team-revenue"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the revenue CSV, relative to the config file or absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,

    #[serde(default = "default_team_column")]
    team_column: String,

    #[serde(default = "default_total_column")]
    total_column: String,
}

fn default_team_column() -> String {
    TEAMS.to_string()
}

fn default_total_column() -> String {
    TOTAL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_path: None,
            team_column: default_team_column(),
            total_column: default_total_column(),
        }
    }
}

impl ConfigFile {
    async fn load(path: &Path) -> Res<Self> {
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: &Path) -> Res<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }
}
