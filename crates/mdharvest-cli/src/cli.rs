use crate::config::OracleKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The mdharvest developers",
    version,
    about = "mdharvest CLI - Extract simulated proteins, simulation software and water models from molecular-dynamics methods text.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract protein/software/water-model records from a text file or standard input.
    Extract(ExtractArgs),
    /// Serve the extraction pipeline over HTTP.
    Serve(ServeArgs),
}

/// Configuration sources shared by every command.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the oracle used to pick relevant candidates.
    #[arg(long, value_enum, value_name = "KIND")]
    pub oracle: Option<OracleKind>,

    /// Override the number of neighbouring sentences included on each side of a candidate's context.
    #[arg(long, value_name = "INT")]
    pub context_radius: Option<usize>,

    /// Scan around every mention instead of reusing the first mention's candidates.
    #[arg(long)]
    pub per_mention: bool,

    /// Keep `water_model_type` in the output records.
    #[arg(long)]
    pub include_water_model_type: bool,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S oracle.kind=http
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the input text file; `-` or omitted reads standard input.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the JSON output; standard output if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append every mention's candidate lists to this file.
    #[arg(long, value_name = "PATH")]
    pub diagnostics: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:5034")]
    pub bind: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}
