//! Command-line parsing for the contract reclassifier.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the rules and I/O code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Thresholds;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "reclass", version, about = "Reclassify rural credit contracts into cost vs investment")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a contract CSV and write the reclassified copy.
    Classify(ClassifyArgs),
    /// Print the program table, investment keywords and effective thresholds.
    Rules(RulesArgs),
    /// Print the report stored in a summary JSON written by `classify --summary-json`.
    Summary(SummaryArgs),
}

/// Numeric thresholds; each falls back to an environment variable (a `.env` file is honored).
#[derive(Debug, Args, Clone)]
pub struct ThresholdArgs {
    /// Loans above this amount are read as investment.
    #[arg(long, env = "RECLASS_LOAN_SIZE_THRESHOLD", default_value_t = Thresholds::DEFAULT_LOAN_SIZE)]
    pub loan_size_threshold: f64,

    /// Predicted production above this value is read as investment.
    #[arg(long, env = "RECLASS_PRED_PROD_THRESHOLD", default_value_t = Thresholds::DEFAULT_PREDICTED_PRODUCTION)]
    pub pred_prod_threshold: f64,

    /// Reported farm area above this value is read as investment.
    #[arg(long, env = "RECLASS_FARM_AREA_THRESHOLD", default_value_t = Thresholds::DEFAULT_FARM_AREA)]
    pub farm_area_threshold: f64,
}

/// Options for a classification run.
#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    /// Contract CSV produced by the cleaning stage.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Output CSV (default: `<input stem>_reclass.csv` next to the input).
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Field delimiter for input and output.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Contract id column, used to label rows in the report when present.
    #[arg(long, default_value = "ref_bacen")]
    pub id_column: String,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Also write a machine-readable run summary.
    #[arg(long = "summary-json", value_name = "JSON")]
    pub summary_json: Option<PathBuf>,

    /// List up to N changed contracts after the summary.
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub show_changed: usize,
}

/// Options for `reclass rules`.
#[derive(Debug, Args, Clone)]
pub struct RulesArgs {
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Options for `reclass summary`.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Summary JSON written by `reclass classify --summary-json`.
    #[arg(value_name = "JSON")]
    pub path: PathBuf,
}
