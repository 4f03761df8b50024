//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect error visibility and warning classification decisions
#[derive(Parser, Debug)]
#[command(name = "accessform", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a JSON form configuration
    #[arg(short, long, global = true, env = "ACCESSFORM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether a single field's errors are visible
    Explain(ExplainArgs),
    /// Print the full decision table
    Table(TableArgs),
    /// Classify validation error kinds as blocking or warning
    Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Display strategy; unknown names behave like on-touch
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Submission status (unsubmitted, submitting, submitted)
    #[arg(long, default_value = "unsubmitted")]
    pub status: String,

    /// The field fails a blocking rule
    #[arg(long)]
    pub invalid: bool,

    /// The field has been touched
    #[arg(long)]
    pub touched: bool,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Only print rows for this strategy
    #[arg(short, long)]
    pub strategy: Option<String>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Error kinds, e.g. `required` or `warn:weak-password`
    #[arg(required = true)]
    pub kinds: Vec<String>,
}
