//! Configuration file handling for cam.
//!
//! Loads configuration from `$CAM_CONFIG`, falling back to
//! `~/.config/cam/config.toml`.

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::camera::{DEFAULT_DEV_ROOT, DEFAULT_SYSFS_ROOT};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CAM_CONFIG";

/// Configuration file structure for cam.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub manager: ManagerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// How the camera manager discovers devices.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Query the system's video4linux nodes through the v4l crate
    #[default]
    V4l,
    /// Walk a video4linux class directory, `sysfs_root`
    Sysfs,
}

/// Where the camera manager looks for devices.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManagerConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,
    #[serde(default = "default_dev_root")]
    pub dev_root: PathBuf,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            sysfs_root: default_sysfs_root(),
            dev_root: default_dev_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// env_logger filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(DEFAULT_SYSFS_ROOT)
}

fn default_dev_root() -> PathBuf {
    PathBuf::from(DEFAULT_DEV_ROOT)
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Config file to use: `$CAM_CONFIG` if set, the default path otherwise.
pub fn resolve_path() -> PathBuf {
    path_from_env(std::env::var_os(CONFIG_ENV))
}

/// An unset or empty override means the default path.
fn path_from_env(value: Option<OsString>) -> PathBuf {
    value
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_path)
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("cam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/cam/config.toml")
        })
}
