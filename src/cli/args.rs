//! Command-line argument definitions for the hydrophone export tool
//!
//! Uses the clap derive API. Export options shared by `combine` and
//! `split` live in [`ExportOptions`]; verbosity flags are global.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for hydro-export
///
/// Merges and re-exports Ocean Sonics hydrophone recorder text files,
/// rebuilding each header in the recorder's own layout.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hydro-export",
    version,
    about = "Merge and re-export Ocean Sonics hydrophone recordings",
    long_about = "Reads Ocean Sonics recorder text files, normalizes their loosely structured \
                  headers into the recorder's canonical fields, and writes either one combined, \
                  chronologically merged file or one file per input with rebuilt headers."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Combine recordings into a single file
    Combine(CombineArgs),
    /// Re-export each recording into its own file
    Split(SplitArgs),
    /// Show the parsed header of a single recording
    Inspect(InspectArgs),
}

/// Options shared by the export commands
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ExportOptions {
    /// Input files, directories (searched for *.txt) or glob patterns
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    /// Omit the rebuilt header from the output
    #[arg(long = "no-headers")]
    pub no_headers: bool,

    /// Header override applied to every file, as field=value
    ///
    /// May be repeated. Field names are the snake_case canonical names,
    /// e.g. `client`, `job`, `start_date`, `serial_number`.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// JSON file with global and per-file header overrides
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides_file: Option<PathBuf>,

    /// Normalize start_date and timezone overrides like parsed values
    #[arg(long = "normalize-overrides")]
    pub normalize_overrides: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

/// Arguments for the combine command
#[derive(Debug, Clone, ClapArgs)]
pub struct CombineArgs {
    #[command(flatten)]
    pub export: ExportOptions,

    /// Output file path
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Keep input order instead of merging rows chronologically
    #[arg(long = "no-merge")]
    pub no_merge: bool,
}

/// Arguments for the split command
#[derive(Debug, Clone, ClapArgs)]
pub struct SplitArgs {
    #[command(flatten)]
    pub export: ExportOptions,

    /// Output directory, created if missing
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Keep original file names without the _edited suffix
    #[arg(long = "no-suffix")]
    pub no_suffix: bool,

    /// Name outputs exported_001.txt, exported_002.txt, ...
    #[arg(long = "sequential-names", conflicts_with = "no_suffix")]
    pub sequential_names: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, ClapArgs)]
pub struct InspectArgs {
    /// Recording to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the header as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Log level for the tracing filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
