// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Read-only aggregate reports over the tables and reporting views.
//!
//! Reports never fail: when the database cannot be reached or a query
//! errors, the failure is logged and the neutral value (0, `false`, an
//! empty string or an empty list) is returned. A neutral value is therefore
//! indistinguishable from a legitimately empty result.

use rusqlite::{Connection, params};
use tracing::warn;

use crate::connection::CoronaDb;
use crate::error::Result;
use crate::types::Vaccine;

/// Maximum number of ids returned by [`CoronaDb::popular_labs`].
pub const POPULAR_LABS_LIMIT: i64 = 3;
/// Maximum number of ids returned by [`CoronaDb::most_rated_vaccines`].
pub const MOST_RATED_LIMIT: i64 = 10;
/// Maximum number of ids returned by [`CoronaDb::close_employees`].
pub const CLOSE_EMPLOYEES_LIMIT: i64 = 10;
/// Share of an employee's lab cities, in percent, another employee must
/// also work in to count as close.
pub const CLOSE_EMPLOYEES_OVERLAP: i64 = 50;

impl CoronaDb {
    fn report<T, F>(&self, what: &str, f: F) -> T
    where
        T: Default,
        F: FnOnce(&Connection) -> Result<T>,
    {
        self.connect()
            .and_then(|conn| f(&conn))
            .unwrap_or_else(|e| {
                warn!("Report {what} failed, returning neutral value: {e}");
                T::default()
            })
    }

    fn query_ids(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(sql)?;
        let ids = stmt
            .query_map(params, |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    /// Whether none of the vaccines a lab produces has low productivity.
    ///
    /// A lab producing no vaccines at all, or one that does not exist, is
    /// reported popular.
    pub fn is_lab_popular(&self, lab_id: i64) -> bool {
        self.report("is_lab_popular", |conn| {
            let unproductive: i64 = conn.query_row(
                r#"
                SELECT COUNT(*)
                FROM vaccines_labs_view vl
                WHERE vl.lab_id = ?1
                  AND vl.vaccine_productivity < ?2
                "#,
                params![lab_id, Vaccine::WORKING_PRODUCTIVITY],
                |row| row.get(0),
            )?;
            Ok(unproductive == 0)
        })
    }

    /// Total income from sales of a vaccine; 0 if it does not exist.
    pub fn income_from_vaccine(&self, vaccine_id: i64) -> i64 {
        self.report("income_from_vaccine", |conn| {
            let income: Option<i64> = conn.query_row(
                "SELECT (SELECT total_sales FROM vaccines WHERE id = ?1)",
                params![vaccine_id],
                |row| row.get(0),
            )?;
            Ok(income.unwrap_or(0))
        })
    }

    /// Units in stock across all working vaccines.
    pub fn total_working_vaccine_stock(&self) -> i64 {
        self.report("total_working_vaccine_stock", |conn| {
            let total = conn.query_row(
                "SELECT COALESCE(SUM(stock), 0) FROM vaccines WHERE productivity >= ?1",
                params![Vaccine::WORKING_PRODUCTIVITY],
                |row| row.get(0),
            )?;
            Ok(total)
        })
    }

    /// Sum of salaries paid by a lab; 0 if the lab is inactive or unknown.
    pub fn total_wages(&self, lab_id: i64) -> i64 {
        self.report("total_wages", |conn| {
            let total = conn.query_row(
                r#"
                SELECT COALESCE(SUM(el.salary), 0)
                FROM employees_labs el
                JOIN labs l ON l.id = el.lab_id
                WHERE l.active = 1
                  AND l.id = ?1
                "#,
                params![lab_id],
                |row| row.get(0),
            )?;
            Ok(total)
        })
    }

    /// The lab employing the most people who live in the lab's own city.
    ///
    /// Ties go to the smallest lab id; 0 when no lab has such an employee.
    pub fn best_lab(&self) -> i64 {
        self.report("best_lab", |conn| {
            let ids = Self::query_ids(
                conn,
                r#"
                SELECT elv.lab_id
                FROM employees_labs_view elv
                WHERE elv.employee_city = elv.lab_city
                GROUP BY elv.lab_id
                ORDER BY COUNT(elv.employee_id) DESC, elv.lab_id ASC
                LIMIT 1
                "#,
                [],
            )?;
            Ok(ids.first().copied().unwrap_or(0))
        })
    }

    /// The home city shared by the most employment rows.
    ///
    /// Ties are broken by whatever order SQLite yields groups in. Returns an
    /// empty string when nobody is employed.
    pub fn most_popular_city(&self) -> String {
        self.report("most_popular_city", |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT elv.employee_city
                FROM employees_labs_view elv
                GROUP BY elv.employee_city
                ORDER BY COUNT(*) DESC
                LIMIT 1
                "#,
            )?;
            let mut rows = stmt.query([])?;
            let city = match rows.next()? {
                Some(row) => row.get(0)?,
                None => String::new(),
            };
            Ok(city)
        })
    }

    /// Up to three popular labs, lowest id first.
    ///
    /// Unlike [`is_lab_popular`](Self::is_lab_popular), only labs producing
    /// at least one vaccine qualify.
    pub fn popular_labs(&self) -> Vec<i64> {
        self.report("popular_labs", |conn| {
            Self::query_ids(
                conn,
                r#"
                SELECT l.id
                FROM labs l
                WHERE l.id IN (SELECT vlv.lab_id FROM vaccines_labs_view vlv)
                  AND l.id NOT IN (
                      SELECT vlv.lab_id
                      FROM vaccines_labs_view vlv
                      WHERE vlv.vaccine_productivity < ?1
                  )
                ORDER BY l.id
                LIMIT ?2
                "#,
                params![Vaccine::WORKING_PRODUCTIVITY, POPULAR_LABS_LIMIT],
            )
        })
    }

    /// Up to ten vaccines ranked by `stock + productivity - cost`, ties by
    /// lowest id.
    pub fn most_rated_vaccines(&self) -> Vec<i64> {
        self.report("most_rated_vaccines", |conn| {
            Self::query_ids(
                conn,
                r#"
                SELECT v.id
                FROM vaccines v
                ORDER BY (v.stock + v.productivity - v.cost) DESC, v.id ASC
                LIMIT ?1
                "#,
                params![MOST_RATED_LIMIT],
            )
        })
    }

    /// Up to ten other employees working in at least half of the distinct
    /// cities the given employee's labs are in, lowest id first.
    ///
    /// An employee without any lab has no close employees.
    pub fn close_employees(&self, employee_id: i64) -> Vec<i64> {
        self.report("close_employees", |conn| {
            // Dividing by a zero city count yields NULL, which fails HAVING
            Self::query_ids(
                conn,
                r#"
                SELECT other.employee_id
                FROM employees_labs_view other
                WHERE other.employee_id != ?1
                  AND other.lab_city IN (
                      SELECT mine.lab_city
                      FROM employees_labs_view mine
                      WHERE mine.employee_id = ?1
                  )
                GROUP BY other.employee_id
                HAVING 100 * COUNT(DISTINCT other.lab_city) / (
                      SELECT COUNT(DISTINCT mine.lab_city)
                      FROM employees_labs_view mine
                      WHERE mine.employee_id = ?1
                  ) >= ?2
                ORDER BY other.employee_id
                LIMIT ?3
                "#,
                params![employee_id, CLOSE_EMPLOYEES_OVERLAP, CLOSE_EMPLOYEES_LIMIT],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_without_schema_are_neutral() {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("corona.sqlite"));

        assert!(!db.is_lab_popular(1));
        assert_eq!(db.income_from_vaccine(1), 0);
        assert_eq!(db.total_working_vaccine_stock(), 0);
        assert_eq!(db.total_wages(1), 0);
        assert_eq!(db.best_lab(), 0);
        assert_eq!(db.most_popular_city(), "");
        assert!(db.popular_labs().is_empty());
        assert!(db.most_rated_vaccines().is_empty());
        assert!(db.close_employees(1).is_empty());
    }
}
