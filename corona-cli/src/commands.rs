// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Dispatch of parsed commands to the store.

use corona_store_db::{CoronaDb, Employee, Lab, ReturnValue, Vaccine};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{
    Command, EmployeeCommand, LabCommand, ReportCommand, SchemaCommand, VaccineCommand,
};
use crate::error::CliError;

/// What a command printed and whether it succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub value: Value,
    pub success: bool,
}

impl Outcome {
    fn show<T: Serialize>(value: &T) -> Result<Self, CliError> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            success: true,
        })
    }

    fn mutation(result: ReturnValue) -> Result<Self, CliError> {
        Ok(Self {
            value: serde_json::to_value(result)?,
            success: result.is_ok(),
        })
    }
}

pub fn run(db: &CoronaDb, command: Command) -> Result<Outcome, CliError> {
    debug!("Running {command:?}");
    match command {
        Command::Schema(schema) => run_schema(db, schema),
        Command::Lab(lab) => run_lab(db, lab),
        Command::Employee(employee) => run_employee(db, employee),
        Command::Vaccine(vaccine) => run_vaccine(db, vaccine),
        Command::Join {
            employee,
            lab,
            salary,
        } => Outcome::mutation(db.employee_join_lab(employee, lab, salary)),
        Command::Leave { lab, employee } => Outcome::mutation(db.employee_left_lab(lab, employee)),
        Command::Produce { vaccine, lab } => {
            Outcome::mutation(db.lab_produce_vaccine(vaccine, lab))
        }
        Command::StopProducing { lab, vaccine } => {
            Outcome::mutation(db.lab_stopped_producing_vaccine(lab, vaccine))
        }
        Command::Sell { vaccine, amount } => Outcome::mutation(db.vaccine_sold(vaccine, amount)),
        Command::Manufacture { vaccine, amount } => {
            Outcome::mutation(db.vaccine_produced(vaccine, amount))
        }
        Command::Report(report) => run_report(db, report),
    }
}

fn run_schema(db: &CoronaDb, command: SchemaCommand) -> Result<Outcome, CliError> {
    match command {
        SchemaCommand::Create => db.create_schema(),
        SchemaCommand::Clear => db.clear_all(),
        SchemaCommand::Drop => db.drop_schema(),
    }
    let present = db.has_schema()?;
    info!(
        "Schema at {} is {}",
        db.connector().path().display(),
        if present { "present" } else { "absent" }
    );
    Outcome::show(&present)
}

fn run_lab(db: &CoronaDb, command: LabCommand) -> Result<Outcome, CliError> {
    match command {
        LabCommand::Add {
            id,
            name,
            city,
            inactive,
        } => Outcome::mutation(db.add_lab(&Lab::new(id, name, city, !inactive))),
        LabCommand::Get { id } => Outcome::show(&db.get_lab(id)),
        LabCommand::Delete { id } => {
            Outcome::mutation(db.delete_lab(&Lab::new(id, "", "", true)))
        }
    }
}

fn run_employee(db: &CoronaDb, command: EmployeeCommand) -> Result<Outcome, CliError> {
    match command {
        EmployeeCommand::Add { id, name, city } => {
            Outcome::mutation(db.add_employee(&Employee::new(id, name, city)))
        }
        EmployeeCommand::Get { id } => Outcome::show(&db.get_employee(id)),
        EmployeeCommand::Delete { id } => {
            Outcome::mutation(db.delete_employee(&Employee::new(id, "", "")))
        }
    }
}

fn run_vaccine(db: &CoronaDb, command: VaccineCommand) -> Result<Outcome, CliError> {
    match command {
        VaccineCommand::Add {
            id,
            name,
            cost,
            stock,
            productivity,
        } => Outcome::mutation(db.add_vaccine(&Vaccine::new(id, name, cost, stock, productivity))),
        VaccineCommand::Get { id } => Outcome::show(&db.get_vaccine(id)),
        VaccineCommand::Delete { id } => {
            Outcome::mutation(db.delete_vaccine(&Vaccine::new(id, "", 0, 0, 0)))
        }
    }
}

fn run_report(db: &CoronaDb, command: ReportCommand) -> Result<Outcome, CliError> {
    match command {
        ReportCommand::Popular { lab } => Outcome::show(&db.is_lab_popular(lab)),
        ReportCommand::Income { vaccine } => Outcome::show(&db.income_from_vaccine(vaccine)),
        ReportCommand::WorkingStock => Outcome::show(&db.total_working_vaccine_stock()),
        ReportCommand::Wages { lab } => Outcome::show(&db.total_wages(lab)),
        ReportCommand::BestLab => Outcome::show(&db.best_lab()),
        ReportCommand::PopularCity => Outcome::show(&db.most_popular_city()),
        ReportCommand::PopularLabs => Outcome::show(&db.popular_labs()),
        ReportCommand::TopVaccines => Outcome::show(&db.most_rated_vaccines()),
        ReportCommand::CloseEmployees { employee } => {
            Outcome::show(&db.close_employees(employee))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    use crate::cli::Cli;

    fn exec(db: &CoronaDb, args: &[&str]) -> Outcome {
        let cli = Cli::try_parse_from(std::iter::once("corona").chain(args.iter().copied()))
            .unwrap();
        run(db, cli.command).unwrap()
    }

    fn store() -> (tempfile::TempDir, CoronaDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("corona.sqlite"));
        (dir, db)
    }

    #[test]
    fn schema_commands_report_presence() {
        let (_dir, db) = store();
        assert_eq!(exec(&db, &["schema", "create"]).value, json!(true));
        assert_eq!(exec(&db, &["schema", "clear"]).value, json!(true));
        assert_eq!(exec(&db, &["schema", "drop"]).value, json!(false));
    }

    #[test]
    fn vaccine_lifecycle() {
        let (_dir, db) = store();
        exec(&db, &["schema", "create"]);

        let added = exec(&db, &["vaccine", "add", "1", "pfizer", "10", "100", "50"]);
        assert_eq!(added.value, json!("OK"));
        assert!(added.success);

        assert_eq!(exec(&db, &["sell", "1", "5"]).value, json!("OK"));
        assert_eq!(
            exec(&db, &["vaccine", "get", "1"]).value,
            json!({
                "id": 1,
                "name": "pfizer",
                "cost": 20,
                "stock": 95,
                "productivity": 65,
                "total_sales": 50,
            })
        );

        let rejected = exec(&db, &["manufacture", "1", "-1"]);
        assert_eq!(rejected.value, json!("BAD_PARAMS"));
        assert!(!rejected.success);

        assert_eq!(exec(&db, &["vaccine", "delete", "1"]).value, json!("OK"));
        assert_eq!(exec(&db, &["vaccine", "get", "1"]).value, Value::Null);
        assert_eq!(
            exec(&db, &["vaccine", "delete", "1"]).value,
            json!("NOT_EXISTS")
        );
    }

    #[test]
    fn employment_reports() {
        let (_dir, db) = store();
        exec(&db, &["schema", "create"]);
        exec(&db, &["lab", "add", "1", "central", "Haifa"]);
        exec(&db, &["lab", "add", "2", "north", "Haifa", "--inactive"]);
        exec(&db, &["employee", "add", "7", "Dana", "Haifa"]);

        assert_eq!(exec(&db, &["join", "7", "1", "1200"]).value, json!("OK"));
        assert_eq!(exec(&db, &["join", "7", "2", "800"]).value, json!("OK"));
        assert_eq!(exec(&db, &["report", "wages", "1"]).value, json!(1200));
        assert_eq!(exec(&db, &["report", "wages", "2"]).value, json!(0));
        assert_eq!(exec(&db, &["report", "best-lab"]).value, json!(1));
        assert_eq!(exec(&db, &["report", "popular-city"]).value, json!("Haifa"));

        assert_eq!(exec(&db, &["leave", "1", "7"]).value, json!("OK"));
        assert_eq!(exec(&db, &["leave", "1", "7"]).value, json!("NOT_EXISTS"));
    }

    #[test]
    fn delete_on_unreachable_database_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = CoronaDb::open(dir.path().join("missing").join("corona.sqlite"));
        for entity in ["lab", "employee", "vaccine"] {
            let outcome = exec(&db, &[entity, "delete", "1"]);
            assert_eq!(outcome.value, json!("ERROR"));
            assert!(!outcome.success);
        }
    }

    #[test]
    fn delete_without_schema_is_error() {
        let (_dir, db) = store();
        for entity in ["lab", "employee", "vaccine"] {
            assert_eq!(exec(&db, &[entity, "delete", "1"]).value, json!("ERROR"));
        }
    }

    #[test]
    fn delete_missing_entity_is_not_exists() {
        let (_dir, db) = store();
        exec(&db, &["schema", "create"]);
        exec(&db, &["lab", "add", "1", "central", "Haifa"]);
        assert_eq!(exec(&db, &["lab", "delete", "1"]).value, json!("OK"));
        for entity in ["lab", "employee", "vaccine"] {
            assert_eq!(
                exec(&db, &[entity, "delete", "1"]).value,
                json!("NOT_EXISTS")
            );
        }
    }
}
