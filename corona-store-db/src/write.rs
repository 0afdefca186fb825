// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Insert, delete and stock-update operations.
//!
//! Every operation runs a single statement on its own connection and reports
//! the outcome as a [`ReturnValue`]; no error escapes to the caller.

use rusqlite::{Connection, params};
use tracing::debug;

use crate::connection::CoronaDb;
use crate::error::{Result, ReturnValue};
use crate::types::{Employee, Lab, Vaccine};

/// How the number of affected rows and any failure translate to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPolicy {
    /// One row inserted; failures mapped by constraint.
    Insert,
    /// One row removed, zero rows means it was never there; any failure is
    /// a generic error.
    Remove,
    /// One row updated in place; a missing row is a generic error and
    /// failures are mapped by constraint.
    Update,
}

impl RowPolicy {
    fn outcome(self, result: Result<usize>) -> ReturnValue {
        match (self, result) {
            (_, Ok(1)) => ReturnValue::Ok,
            (RowPolicy::Remove, Ok(0)) => ReturnValue::NotExists,
            (_, Ok(_)) => ReturnValue::Error,
            (RowPolicy::Remove, Err(_)) => ReturnValue::Error,
            (_, Err(e)) => ReturnValue::from(&e),
        }
    }
}

impl CoronaDb {
    fn execute<F>(&self, what: &str, policy: RowPolicy, f: F) -> ReturnValue
    where
        F: FnOnce(&Connection) -> rusqlite::Result<usize>,
    {
        let result = self
            .connect()
            .and_then(|conn| f(&conn).map_err(Into::into));
        if let Err(e) = &result {
            debug!("{what} failed: {e}");
        }
        policy.outcome(result)
    }

    pub fn add_lab(&self, lab: &Lab) -> ReturnValue {
        self.execute("add lab", RowPolicy::Insert, |conn| {
            conn.execute(
                "INSERT INTO labs (id, name, city, active) VALUES (?1, ?2, ?3, ?4)",
                params![lab.id, lab.name, lab.city, lab.active],
            )
        })
    }

    pub fn delete_lab(&self, lab: &Lab) -> ReturnValue {
        self.execute("delete lab", RowPolicy::Remove, |conn| {
            conn.execute("DELETE FROM labs WHERE id = ?1", params![lab.id])
        })
    }

    pub fn add_employee(&self, employee: &Employee) -> ReturnValue {
        self.execute("add employee", RowPolicy::Insert, |conn| {
            conn.execute(
                "INSERT INTO employees (id, name, city) VALUES (?1, ?2, ?3)",
                params![employee.id, employee.name, employee.city],
            )
        })
    }

    pub fn delete_employee(&self, employee: &Employee) -> ReturnValue {
        self.execute("delete employee", RowPolicy::Remove, |conn| {
            conn.execute("DELETE FROM employees WHERE id = ?1", params![employee.id])
        })
    }

    pub fn add_vaccine(&self, vaccine: &Vaccine) -> ReturnValue {
        self.execute("add vaccine", RowPolicy::Insert, |conn| {
            conn.execute(
                r#"
                INSERT INTO vaccines (id, name, cost, stock, productivity, total_sales)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    vaccine.id,
                    vaccine.name,
                    vaccine.cost,
                    vaccine.stock,
                    vaccine.productivity,
                    vaccine.total_sales,
                ],
            )
        })
    }

    pub fn delete_vaccine(&self, vaccine: &Vaccine) -> ReturnValue {
        self.execute("delete vaccine", RowPolicy::Remove, |conn| {
            conn.execute("DELETE FROM vaccines WHERE id = ?1", params![vaccine.id])
        })
    }

    /// Record that an employee works at a lab for the given salary.
    pub fn employee_join_lab(&self, employee_id: i64, lab_id: i64, salary: i64) -> ReturnValue {
        self.execute("employee join lab", RowPolicy::Insert, |conn| {
            conn.execute(
                "INSERT INTO employees_labs (employee_id, lab_id, salary) VALUES (?1, ?2, ?3)",
                params![employee_id, lab_id, salary],
            )
        })
    }

    pub fn employee_left_lab(&self, lab_id: i64, employee_id: i64) -> ReturnValue {
        self.execute("employee left lab", RowPolicy::Remove, |conn| {
            conn.execute(
                "DELETE FROM employees_labs WHERE employee_id = ?1 AND lab_id = ?2",
                params![employee_id, lab_id],
            )
        })
    }

    pub fn lab_produce_vaccine(&self, vaccine_id: i64, lab_id: i64) -> ReturnValue {
        self.execute("lab produce vaccine", RowPolicy::Insert, |conn| {
            conn.execute(
                "INSERT INTO vaccines_labs (vaccine_id, lab_id) VALUES (?1, ?2)",
                params![vaccine_id, lab_id],
            )
        })
    }

    pub fn lab_stopped_producing_vaccine(&self, lab_id: i64, vaccine_id: i64) -> ReturnValue {
        self.execute("lab stopped producing vaccine", RowPolicy::Remove, |conn| {
            conn.execute(
                "DELETE FROM vaccines_labs WHERE vaccine_id = ?1 AND lab_id = ?2",
                params![vaccine_id, lab_id],
            )
        })
    }

    /// Sell `amount` units of a vaccine.
    ///
    /// Stock drops by `amount`, the price doubles, productivity rises by 15
    /// (capped at 100) and `total_sales` grows by the pre-sale price times
    /// `amount`. Selling more than is in stock trips the stock check and
    /// yields `BadParams`. An unknown vaccine yields `Error`, not `NotExists`.
    pub fn vaccine_sold(&self, vaccine_id: i64, amount: i64) -> ReturnValue {
        self.execute("vaccine sold", RowPolicy::Update, |conn| {
            // SET expressions all read the row as it was before the update
            conn.execute(
                r#"
                UPDATE vaccines
                SET stock = stock - ?1,
                    cost = cost * 2,
                    productivity = MIN(productivity + 15, 100),
                    total_sales = total_sales + cost * ?1
                WHERE id = ?2
                "#,
                params![amount, vaccine_id],
            )
        })
    }

    /// Produce `amount` new units of a vaccine.
    ///
    /// Stock grows by `amount`, the price halves (truncating) and
    /// productivity drops by 15 (floored at 0). A negative amount is
    /// rejected before the database is touched.
    pub fn vaccine_produced(&self, vaccine_id: i64, amount: i64) -> ReturnValue {
        if amount < 0 {
            return ReturnValue::BadParams;
        }
        self.execute("vaccine produced", RowPolicy::Update, |conn| {
            conn.execute(
                r#"
                UPDATE vaccines
                SET stock = stock + ?1,
                    cost = cost / 2,
                    productivity = MAX(productivity - 15, 0)
                WHERE id = ?2
                "#,
                params![amount, vaccine_id],
            )
        })
    }
}
