// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Connection acquisition and schema management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, params};
use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::schema::{CLEAR_SQL, DROP_SQL, SCHEMA_SQL, TABLES, VIEWS, VIEWS_SQL};

/// Busy timeout applied when none is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens connections to the store database file.
///
/// Every store operation asks the connector for a fresh connection and drops
/// it before returning, so a connector is cheap to clone and holds no handle.
#[derive(Debug, Clone)]
pub struct Connector {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Connector {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// How long a connection waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-write connection, creating the database file if needed.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| Error::DatabaseOpen {
            path: self.path.clone(),
            source: e,
        })?;

        conn.busy_timeout(self.busy_timeout)?;
        // foreign_keys is per connection and off by default in SQLite
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            "#,
        )?;

        trace!("Opened connection to {}", self.path.display());
        Ok(conn)
    }
}

/// Handle to the vaccine production store.
///
/// Mutations return a [`ReturnValue`](crate::ReturnValue), lookups an
/// `Option`, and reports a plain value that is neutral when nothing matched.
#[derive(Debug, Clone)]
pub struct CoronaDb {
    connector: Connector,
}

impl CoronaDb {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    /// Store backed by the database file at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Connector::new(path))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub(crate) fn connect(&self) -> Result<Connection> {
        self.connector.connect()
    }

    /// Create all tables and reporting views.
    ///
    /// Failures (for instance tables that already exist) are logged and
    /// otherwise ignored.
    pub fn create_schema(&self) {
        if let Err(e) = self.try_create_schema() {
            error!("Failed to create schema: {e}");
        }
    }

    /// Delete every row from every table, keeping the schema.
    pub fn clear_all(&self) {
        if let Err(e) = self.run_in_transaction(CLEAR_SQL) {
            error!("Failed to clear tables: {e}");
        } else {
            debug!("Cleared all tables");
        }
    }

    /// Drop all views and tables.
    pub fn drop_schema(&self) {
        if let Err(e) = self.run_in_transaction(DROP_SQL) {
            error!("Failed to drop schema: {e}");
        } else {
            debug!("Dropped database schema");
        }
    }

    /// Check whether every table and view of the schema exists.
    pub fn has_schema(&self) -> Result<bool> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare_cached(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
        )?;

        let objects = TABLES
            .iter()
            .map(|name| ("table", *name))
            .chain(VIEWS.iter().map(|name| ("view", *name)));
        for (kind, name) in objects {
            let count: i64 = stmt.query_row(params![kind, name], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn try_create_schema(&self) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)?;
        tx.execute_batch(VIEWS_SQL)?;
        tx.commit()?;
        debug!("Created database schema");
        Ok(())
    }

    fn run_in_transaction(&self, sql: &str) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("corona.sqlite"));
        assert!(!db.has_schema().unwrap());

        db.create_schema();
        assert!(db.has_schema().unwrap());

        // A second create fails on the existing tables and leaves them alone
        db.create_schema();
        assert!(db.has_schema().unwrap());

        db.drop_schema();
        assert!(!db.has_schema().unwrap());
    }

    #[test]
    fn foreign_keys_enabled_per_connection() {
        let dir = tempfile::tempdir().unwrap();
        let connector = Connector::new(dir.path().join("corona.sqlite"));
        let conn = connector.connect().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn connect_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let connector = Connector::new(dir.path().join("missing").join("corona.sqlite"));
        match connector.connect() {
            Err(Error::DatabaseOpen { path, .. }) => assert_eq!(path, connector.path()),
            other => panic!("expected DatabaseOpen, got {other:?}"),
        }
    }

    #[test]
    fn busy_timeout_is_configurable() {
        let connector =
            Connector::new("corona.sqlite").with_busy_timeout(Duration::from_millis(250));
        assert_eq!(connector.busy_timeout, Duration::from_millis(250));
    }
}
