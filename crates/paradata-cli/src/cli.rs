//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use paradata_ingest::SheetRef;

#[derive(Parser)]
#[command(
    name = "paradata",
    version,
    about = "Load, describe, and prepare Paralympic games event data",
    long_about = "Load tabular games data (CSV and Excel), print descriptive\n\
                  summaries, and apply light cleaning: column normalization,\n\
                  date parsing, numeric zero-fill, and an NPC code lookup join."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full preparation pipeline over a data folder.
    Run(RunArgs),

    /// Load a single file and print its description.
    Describe(DescribeArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing the source data files.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Events CSV file name inside the data folder.
    #[arg(
        long = "events-csv",
        value_name = "FILE",
        default_value = "paralympics_events_raw.csv"
    )]
    pub events_csv: String,

    /// Excel workbook file name inside the data folder.
    #[arg(
        long = "workbook",
        value_name = "FILE",
        default_value = "paralympics_all_raw.xlsx"
    )]
    pub workbook: String,

    /// NPC code lookup file name inside the data folder.
    #[arg(long = "npc-codes", value_name = "FILE", default_value = "npc_codes.csv")]
    pub npc_codes: String,

    /// Worksheet holding the medal standings table.
    #[arg(
        long = "standings-sheet",
        value_name = "NAME",
        default_value = "medal_standings"
    )]
    pub standings_sheet: String,
}

#[derive(Parser)]
pub struct DescribeArgs {
    /// CSV or Excel file to describe.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet index or name (Excel only, defaults to the first sheet).
    #[arg(long = "sheet", value_name = "INDEX|NAME")]
    pub sheet: Option<SheetRef>,
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
