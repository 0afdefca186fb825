// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Point lookups by primary key.

use rusqlite::{OptionalExtension, Row};
use tracing::warn;

use crate::connection::CoronaDb;
use crate::error::Result;
use crate::types::{Employee, Employment, Lab, Production, Vaccine};

impl CoronaDb {
    /// Run a single-row lookup, treating any failure as a miss.
    fn lookup<T, F>(&self, what: &str, sql: &str, key: &[i64], map: F) -> Option<T>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let result: Result<Option<T>> = self.connect().and_then(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let row = stmt
                .query_row(rusqlite::params_from_iter(key), map)
                .optional()?;
            Ok(row)
        });

        result.unwrap_or_else(|e| {
            warn!("Lookup of {what} {key:?} failed: {e}");
            None
        })
    }

    /// Look up a lab by id. Returns `None` if it does not exist.
    pub fn get_lab(&self, lab_id: i64) -> Option<Lab> {
        self.lookup(
            "lab",
            "SELECT id, name, city, active FROM labs WHERE id = ?1",
            &[lab_id],
            Lab::from_row,
        )
    }

    /// Look up an employee by id. Returns `None` if it does not exist.
    pub fn get_employee(&self, employee_id: i64) -> Option<Employee> {
        self.lookup(
            "employee",
            "SELECT id, name, city FROM employees WHERE id = ?1",
            &[employee_id],
            Employee::from_row,
        )
    }

    /// Look up a vaccine by id. Returns `None` if it does not exist.
    pub fn get_vaccine(&self, vaccine_id: i64) -> Option<Vaccine> {
        self.lookup(
            "vaccine",
            r#"
            SELECT id, name, cost, stock, productivity, total_sales
            FROM vaccines
            WHERE id = ?1
            "#,
            &[vaccine_id],
            Vaccine::from_row,
        )
    }

    pub fn employment(&self, employee_id: i64, lab_id: i64) -> Option<Employment> {
        self.lookup(
            "employment",
            r#"
            SELECT employee_id, lab_id, salary
            FROM employees_labs
            WHERE employee_id = ?1 AND lab_id = ?2
            "#,
            &[employee_id, lab_id],
            |row| {
                Ok(Employment {
                    employee_id: row.get(0)?,
                    lab_id: row.get(1)?,
                    salary: row.get(2)?,
                })
            },
        )
    }

    pub fn production(&self, vaccine_id: i64, lab_id: i64) -> Option<Production> {
        self.lookup(
            "production",
            "SELECT vaccine_id, lab_id FROM vaccines_labs WHERE vaccine_id = ?1 AND lab_id = ?2",
            &[vaccine_id, lab_id],
            |row| {
                Ok(Production {
                    vaccine_id: row.get(0)?,
                    lab_id: row.get(1)?,
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_without_schema_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("corona.sqlite"));
        assert_eq!(db.get_lab(1), None);
        assert_eq!(db.get_employee(1), None);
        assert_eq!(db.get_vaccine(1), None);
        assert_eq!(db.employment(1, 1), None);
        assert_eq!(db.production(1, 1), None);
    }

    #[test]
    fn lab_active_flag_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("corona.sqlite"));
        db.create_schema();

        let lab = Lab::new(4, "north", "Haifa", false);
        assert!(db.add_lab(&lab).is_ok());
        assert_eq!(db.get_lab(4), Some(lab));
    }
}
