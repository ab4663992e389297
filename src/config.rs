//! Configuration module
//!
//! Reads `AppConfig` from a TOML file
//! (default `~/.config/csms-reservations/config.toml`). Every section and
//! field is optional; anything missing falls back to its default.
//!
//! ```toml
//! [database]
//! url = "sqlite:///var/lib/csms/reservations.db?mode=rwc"
//!
//! [database.pool]
//! max_connections = 10
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "csms-reservations";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Default config location: `~/.config/csms-reservations/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

fn default_database_url() -> String {
    let dir = dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    format!("sqlite://{}?mode=rwc", dir.join("reservations.db").display())
}

/// Connection pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub pool: PoolConfig,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            pool: PoolConfig::default(),
        }
    }
}

impl DatabaseSection {
    /// `DATABASE_URL` wins over the configured url
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive, used when `RUST_LOG` is unset
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, raw).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "pretty");
        assert_eq!(cfg.database.pool, PoolConfig::default());
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert!(cfg.database.url.ends_with("reservations.db?mode=rwc"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [database.pool]
            max_connections = 1
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.pool.max_connections, 1);
        assert_eq!(cfg.database.pool.min_connections, 1);
        assert_eq!(cfg.logging, LoggingSection::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(AppConfig::from_toml("[logging]\nlevel = 3").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("csms-reservations-missing/config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("csms-reservations-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.logging.format = "json".into();
        cfg.database.pool.max_connections = 3;
        cfg.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), cfg);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn default_path_is_under_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("csms-reservations/config.toml"));
    }
}
