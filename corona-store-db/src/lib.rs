// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! SQLite data-access layer for vaccine production.
//!
//! This crate stores labs, employees and vaccines together with who works
//! where (employment, with a salary) and which lab manufactures which vaccine
//! (production). On top of plain CRUD it offers the two stock updates
//! (sale and production run) and a set of read-only reports.
//!
//! All consistency rules (unique ids, foreign keys, non-negative amounts)
//! are enforced by the database. Violations come back as a [`ReturnValue`]
//! rather than an error, and nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use corona_store_db::{CoronaDb, Lab, ReturnValue};
//!
//! let db = CoronaDb::open("corona.sqlite");
//! db.create_schema();
//!
//! assert_eq!(db.add_lab(&Lab::new(1, "central", "Tel Aviv", true)), ReturnValue::Ok);
//! if let Some(lab) = db.get_lab(1) {
//!     println!("{} is in {}", lab.name, lab.city);
//! }
//! ```

mod connection;
mod error;
mod query;
mod report;
mod schema;
mod types;
mod write;

pub use connection::{Connector, CoronaDb, DEFAULT_BUSY_TIMEOUT};
pub use error::{Error, Result, ReturnValue};
pub use report::{
    CLOSE_EMPLOYEES_LIMIT, CLOSE_EMPLOYEES_OVERLAP, MOST_RATED_LIMIT, POPULAR_LABS_LIMIT,
};
pub use types::*;
