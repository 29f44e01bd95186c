//! Combine and split command implementations
//!
//! Both commands load layered configuration, assemble the override
//! session, expand inputs, then run the synchronous export pipeline on a
//! blocking worker while an indicatif bar tracks its progress reports.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tracing::{debug, info};

use super::shared::{build_session, expand_inputs, load_configuration, print_summary};
use crate::cli::args::{CombineArgs, SplitArgs};
use crate::config::ExportConfig;
use crate::models::ExportStats;
use crate::processor::{ExportPipeline, TerminalProgress};
use crate::session::OverrideSession;

/// Which export the pipeline should run
#[derive(Debug, Clone)]
enum ExportTarget {
    Combined(PathBuf),
    Individual(PathBuf),
}

/// Combine recordings into a single file
pub async fn run_combine(args: CombineArgs, show_progress: bool) -> Result<()> {
    info!("Starting combined export");
    debug!("Command line arguments: {:?}", args);

    let mut config = load_configuration(&args.export)?;
    if args.no_merge {
        config.merge_timestamps = false;
    }
    let session = build_session(&args.export)?;
    let files = expand_inputs(&args.export.inputs)?;

    let stats = run_pipeline(
        config,
        session,
        files,
        ExportTarget::Combined(args.output),
        show_progress,
    )
    .await?;

    if show_progress {
        print_summary("Combined export complete", &stats);
    }
    Ok(())
}

/// Re-export each recording into its own file
pub async fn run_split(args: SplitArgs, show_progress: bool) -> Result<()> {
    info!("Starting individual export");
    debug!("Command line arguments: {:?}", args);

    let mut config = load_configuration(&args.export)?;
    if args.no_suffix {
        config.add_suffix = false;
    }
    if args.sequential_names {
        config.preserve_filenames = false;
    }
    let session = build_session(&args.export)?;
    let files = expand_inputs(&args.export.inputs)?;

    let stats = run_pipeline(
        config,
        session,
        files,
        ExportTarget::Individual(args.output_dir),
        show_progress,
    )
    .await?;

    if show_progress {
        print_summary("Individual export complete", &stats);
    }
    Ok(())
}

async fn run_pipeline(
    config: ExportConfig,
    session: OverrideSession,
    files: Vec<PathBuf>,
    target: ExportTarget,
    show_progress: bool,
) -> Result<ExportStats> {
    debug!("Export configuration: {:?}", config);
    let progress = TerminalProgress::new(files.len(), show_progress);
    let pipeline = ExportPipeline::new(config);

    let (progress, result) = tokio::task::spawn_blocking(move || {
        let reporter = |current: usize, total: usize, message: &str| {
            progress.update(current, total, message);
        };
        let result = match &target {
            ExportTarget::Combined(output) => {
                pipeline.export_combined(&files, output, &session, &reporter)
            }
            ExportTarget::Individual(output_dir) => {
                pipeline.export_individual(&files, output_dir, &session, &reporter)
            }
        };
        (progress, result)
    })
    .await
    .context("Export task panicked")?;

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            progress.finish_with_error(&e.to_string());
            return Err(e.into());
        }
    };

    if stats.files_processed == 0 {
        progress.finish_with_error("no input file could be read");
        bail!(
            "None of the {} input files could be read",
            stats.files_requested
        );
    }

    progress.finish("Export complete");
    Ok(stats)
}
