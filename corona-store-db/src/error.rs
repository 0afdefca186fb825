// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Error types and the result vocabulary returned by store mutations.

use std::fmt;
use std::path::PathBuf;

use rusqlite::ffi;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for store database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the store database.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

impl Error {
    /// Extended SQLite result code of a constraint failure, if this is one.
    fn constraint_code(&self) -> Option<i32> {
        match self {
            Error::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(err.extended_code)
            }
            _ => None,
        }
    }
}

/// Outcome of a mutation, as seen by callers of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValue {
    Ok,
    AlreadyExists,
    NotExists,
    BadParams,
    Error,
}

impl ReturnValue {
    pub fn is_ok(self) -> bool {
        self == ReturnValue::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnValue::Ok => "OK",
            ReturnValue::AlreadyExists => "ALREADY_EXISTS",
            ReturnValue::NotExists => "NOT_EXISTS",
            ReturnValue::BadParams => "BAD_PARAMS",
            ReturnValue::Error => "ERROR",
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Error> for ReturnValue {
    fn from(err: &Error) -> Self {
        match err.constraint_code() {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
                ReturnValue::AlreadyExists
            }
            Some(
                ffi::SQLITE_CONSTRAINT_CHECK
                | ffi::SQLITE_CONSTRAINT_NOTNULL
                | ffi::SQLITE_CONSTRAINT_DATATYPE,
            ) => ReturnValue::BadParams,
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => ReturnValue::NotExists,
            _ => ReturnValue::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn constraint(extended_code: i32) -> Error {
        Error::Sqlite(rusqlite::Error::SqliteFailure(
            ffi::Error::new(extended_code),
            Some("constraint failed".into()),
        ))
    }

    #[rstest]
    #[case(ffi::SQLITE_CONSTRAINT_PRIMARYKEY, ReturnValue::AlreadyExists)]
    #[case(ffi::SQLITE_CONSTRAINT_UNIQUE, ReturnValue::AlreadyExists)]
    #[case(ffi::SQLITE_CONSTRAINT_CHECK, ReturnValue::BadParams)]
    #[case(ffi::SQLITE_CONSTRAINT_NOTNULL, ReturnValue::BadParams)]
    #[case(ffi::SQLITE_CONSTRAINT_DATATYPE, ReturnValue::BadParams)]
    #[case(ffi::SQLITE_CONSTRAINT_FOREIGNKEY, ReturnValue::NotExists)]
    #[case(ffi::SQLITE_CONSTRAINT_TRIGGER, ReturnValue::Error)]
    #[case(ffi::SQLITE_BUSY, ReturnValue::Error)]
    fn maps_sqlite_codes(#[case] code: i32, #[case] expected: ReturnValue) {
        assert_eq!(ReturnValue::from(&constraint(code)), expected);
    }

    #[test]
    fn open_failure_is_generic_error() {
        let err = Error::DatabaseOpen {
            path: PathBuf::from("/nonexistent/corona.sqlite"),
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(ReturnValue::from(&err), ReturnValue::Error);
    }

    #[test]
    fn non_constraint_errors_are_generic() {
        let err = Error::Sqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(ReturnValue::from(&err), ReturnValue::Error);
    }

    #[rstest]
    #[case(ReturnValue::Ok, "OK")]
    #[case(ReturnValue::AlreadyExists, "ALREADY_EXISTS")]
    #[case(ReturnValue::NotExists, "NOT_EXISTS")]
    #[case(ReturnValue::BadParams, "BAD_PARAMS")]
    #[case(ReturnValue::Error, "ERROR")]
    fn display(#[case] value: ReturnValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }
}
