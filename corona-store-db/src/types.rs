// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Row types for labs, employees, vaccines and their associations.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A production facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    pub id: i64,
    pub name: String,
    pub city: String,
    /// Inactive labs are left out of wage totals
    pub active: bool,
}

impl Lab {
    pub fn new(id: i64, name: impl Into<String>, city: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            active,
        }
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            city: row.get("city")?,
            active: row.get("active")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Home city, compared against lab cities by the reports
    pub city: String,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
        }
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            city: row.get("city")?,
        })
    }
}

/// A vaccine and its stock/price state.
///
/// `cost`, `stock` and `productivity` are rewritten by sales and production
/// runs; `total_sales` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    pub id: i64,
    pub name: String,
    pub cost: i64,
    pub stock: i64,
    /// Manufacturing efficiency gauge, kept within 0..=100 by the stock updates
    pub productivity: i64,
    #[serde(default)]
    pub total_sales: i64,
}

impl Vaccine {
    /// Productivity below this marks a vaccine as not working.
    pub const WORKING_PRODUCTIVITY: i64 = 20;

    pub fn new(id: i64, name: impl Into<String>, cost: i64, stock: i64, productivity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            stock,
            productivity,
            total_sales: 0,
        }
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            cost: row.get("cost")?,
            stock: row.get("stock")?,
            productivity: row.get("productivity")?,
            total_sales: row.get("total_sales")?,
        })
    }
}

/// An employee working at a lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employment {
    pub employee_id: i64,
    pub lab_id: i64,
    pub salary: i64,
}

/// A lab manufacturing a vaccine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub vaccine_id: i64,
    pub lab_id: i64,
}
