// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Store database error: {0}")]
    StoreDb(#[from] corona_store_db::Error),

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

/// Helper trait for adding context to IO errors
pub trait IoContext<T> {
    fn io_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CliError::io(f(), e))
    }
}
