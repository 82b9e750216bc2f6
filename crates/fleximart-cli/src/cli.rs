//! CLI argument definitions for the FlexiMart ETL runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fleximart_ingest::{DEFAULT_CUSTOMERS_FILE, DEFAULT_PRODUCTS_FILE, DEFAULT_SALES_FILE};

#[derive(Parser)]
#[command(
    name = "fleximart",
    version,
    about = "FlexiMart ETL - clean, reconcile and load retail extracts",
    long_about = "Clean the FlexiMart customer, product and sales extracts.\n\n\
                  Normalizes identifiers, phones and dates, drops invalid and\n\
                  duplicate rows, derives orders and order items, loads them into\n\
                  SQLite and writes a data quality report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform the extracts in a directory and load them.
    Run(RunArgs),

    /// Print the destination tables and their columns.
    Schema,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory containing the raw CSV extracts.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Customer extract file name inside INPUT_DIR.
    #[arg(long = "customers-file", value_name = "FILE", default_value = DEFAULT_CUSTOMERS_FILE)]
    pub customers_file: String,

    /// Product extract file name inside INPUT_DIR.
    #[arg(long = "products-file", value_name = "FILE", default_value = DEFAULT_PRODUCTS_FILE)]
    pub products_file: String,

    /// Sales extract file name inside INPUT_DIR.
    #[arg(long = "sales-file", value_name = "FILE", default_value = DEFAULT_SALES_FILE)]
    pub sales_file: String,

    /// SQLite database to (re)create (default: <INPUT_DIR>/fleximart.db).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Quality report path (default: <INPUT_DIR>/data_quality_report.txt).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Transform and report without touching the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
