// ==========================================
// Product Import - CLI entry point
// ==========================================
// Exit code: 0 after a completed run (per-record failures included),
// 1 when the run could not start
// ==========================================

use anyhow::Context;
use clap::Parser;
use product_import::app::{get_default_db_path, render, AppState, Cli};
use product_import::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "import aborted");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::info!(version = product_import::VERSION, "{}", product_import::APP_NAME);

    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    let state = AppState::new(db_path.clone())
        .with_context(|| format!("cannot open product store at {}", db_path))?;

    let report = state
        .importer
        .import(&cli.file, cli.test)
        .with_context(|| format!("cannot import {}", cli.file.display()))?;

    let output = render(&report, cli.format).context("cannot render report")?;
    println!("{}", output);

    Ok(())
}
