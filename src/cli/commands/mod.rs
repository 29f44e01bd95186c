//! Command implementations for the hydro-export CLI
//!
//! Each command lives in its own module; this module dispatches on the
//! parsed subcommand.

pub mod export;
pub mod inspect;
pub mod shared;

use anyhow::Result;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Sets up logging once, then hands off to the subcommand handler.
pub async fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;

    let show_progress = args.show_progress();
    match args.command {
        Some(Commands::Combine(combine_args)) => {
            export::run_combine(combine_args, show_progress).await
        }
        Some(Commands::Split(split_args)) => export::run_split(split_args, show_progress).await,
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => Ok(()),
    }
}
