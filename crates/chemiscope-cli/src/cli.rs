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
    version,
    about = "chemiscope CLI - Validate and normalize atomic structures, metadata and properties into a chemiscope input document.",
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
    /// Convert a JSON batch (frames, metadata, properties, centers) into a chemiscope document.
    Convert(ConvertArgs),
    /// Validate a JSON batch and report what the document would contain, without writing it.
    Check(CheckArgs),
}

/// Options shared by every command that runs a conversion.
#[derive(Args, Debug, Clone)]
pub struct ConversionOptions {
    /// Path to the input batch in JSON format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cutoff radius attached to environments derived from the frames.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Dataset name used when the metadata does not provide one.
    #[arg(long = "name", value_name = "NAME")]
    pub unknown_name: Option<String>,

    /// Per-atom annotation to exclude from the properties.
    /// Can be used multiple times; replaces the configured list.
    #[arg(long = "ignore-annotation", value_name = "NAME")]
    pub ignore_annotations: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S environments.cutoff=3.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub options: ConversionOptions,

    /// Path for the output document; must end with `.json`, or `.json.gz` for gzip output.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Indent the output document.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub options: ConversionOptions,
}
