// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::time::Duration;

use corona_store_db::{Connector, DEFAULT_BUSY_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, IoContext};

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "CORONA_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_path: PathBuf,

    /// How long to wait on a locked database, in milliseconds
    pub busy_timeout_ms: u64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("corona.sqlite"),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)
            .io_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit`, else from `$CORONA_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::from_file(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.busy_timeout_ms == 0 {
            return Err(CliError::config("busy_timeout_ms must be greater than 0"));
        }
        Ok(())
    }

    pub fn connector(&self) -> Connector {
        Connector::new(&self.db_path)
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corona.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let (_dir, path) = write_config(r#"db_path = "/var/lib/corona/db.sqlite""#);
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/corona/db.sqlite"));
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn connector_uses_configured_path() {
        let config = Config {
            db_path: PathBuf::from("stock.sqlite"),
            ..Config::default()
        };
        assert_eq!(config.connector().path(), Path::new("stock.sqlite"));
    }

    #[test]
    fn zero_busy_timeout_is_rejected() {
        let (_dir, path) = write_config("busy_timeout_ms = 0");
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("workers = 4");
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Toml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
