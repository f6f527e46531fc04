// ==========================================
// Product Import - command line
// ==========================================
// All clap definitions live here
// ==========================================

use crate::app::state::DB_PATH_ENV;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "product-import")]
#[command(about = "Import a product catalogue CSV/Excel file into the product store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source file (.csv, .xlsx, .xls; no extension is read as CSV)
    pub file: PathBuf,

    /// Dry run: run every check, write nothing, skip database duplicate checks
    #[arg(long, short = 't', default_value = "false")]
    pub test: bool,

    /// SQLite database path
    #[arg(long, env = DB_PATH_ENV)]
    pub db: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    pub log_json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-record lines plus summary tables
    Table,
    /// ImportReport as JSON
    Json,
    /// Plain-text summary
    Text,
}
