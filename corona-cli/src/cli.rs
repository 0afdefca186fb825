// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "corona", version, about = "Manage the vaccine production store")]
pub struct Cli {
    /// Config file (defaults to $CORONA_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, clear or drop the schema
    #[command(subcommand)]
    Schema(SchemaCommand),

    #[command(subcommand)]
    Lab(LabCommand),

    #[command(subcommand)]
    Employee(EmployeeCommand),

    #[command(subcommand)]
    Vaccine(VaccineCommand),

    /// An employee starts working at a lab
    #[command(allow_negative_numbers = true)]
    Join {
        employee: i64,
        lab: i64,
        salary: i64,
    },

    /// An employee stops working at a lab
    Leave { lab: i64, employee: i64 },

    /// A lab starts producing a vaccine
    Produce { vaccine: i64, lab: i64 },

    /// A lab stops producing a vaccine
    StopProducing { lab: i64, vaccine: i64 },

    /// Sell units of a vaccine
    #[command(allow_negative_numbers = true)]
    Sell { vaccine: i64, amount: i64 },

    /// Produce new units of a vaccine
    #[command(allow_negative_numbers = true)]
    Manufacture { vaccine: i64, amount: i64 },

    /// Read-only reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SchemaCommand {
    Create,
    Clear,
    Drop,
}

#[derive(Debug, Subcommand)]
pub enum LabCommand {
    #[command(allow_negative_numbers = true)]
    Add {
        id: i64,
        name: String,
        city: String,
        #[arg(long)]
        inactive: bool,
    },
    Get {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    #[command(allow_negative_numbers = true)]
    Add { id: i64, name: String, city: String },
    Get { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum VaccineCommand {
    #[command(allow_negative_numbers = true)]
    Add {
        id: i64,
        name: String,
        cost: i64,
        stock: i64,
        productivity: i64,
    },
    Get {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ReportCommand {
    /// Whether a lab's vaccines are all productive
    Popular { lab: i64 },
    /// Sales income of a vaccine
    Income { vaccine: i64 },
    /// Stock across all working vaccines
    WorkingStock,
    /// Salaries paid by an active lab
    Wages { lab: i64 },
    /// Lab with the most employees from its own city
    BestLab,
    /// Home city with the most employment rows
    PopularCity,
    /// First three popular labs
    PopularLabs,
    /// Ten best rated vaccines
    TopVaccines,
    /// Employees sharing most of an employee's lab cities
    CloseEmployees { employee: i64 },
}
