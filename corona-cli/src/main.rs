// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

use std::process::ExitCode;

use clap::Parser;
use corona_cli::cli::Cli;
use corona_cli::commands;
use corona_cli::config::Config;
use corona_cli::error::CliError;
use corona_store_db::CoronaDb;
use log::{error, info};

fn inner_main(cli: Cli, mut config: Config) -> Result<bool, CliError> {
    if let Some(db_path) = cli.db {
        config.db_path = db_path;
    }
    info!("Database path: {}", config.db_path.display());

    let db = CoronaDb::new(config.connector());
    let outcome = commands::run(&db, cli.command)?;
    println!("{}", serde_json::to_string(&outcome.value)?);
    Ok(outcome.success)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The log level comes from the config, so load it before logging starts
    let config = Config::load(cli.config.as_deref());
    let log_level = match &config {
        Ok(config) => config.log_level.clone(),
        Err(_) => Config::default().log_level,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match config.and_then(|config| inner_main(cli, config)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
