//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, override session assembly and
//! input discovery used by the export commands.

use anyhow::{Context, Result, bail};
use colored::*;
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::cli::args::{Args, ExportOptions};
use crate::config::ExportConfig;
use crate::constants::INPUT_EXTENSIONS;
use crate::models::ExportStats;
use crate::session::{MetadataOverrides, OverridePolicy, OverrideSession};

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hydro_export={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(options: &ExportOptions) -> Result<ExportConfig> {
    info!("Loading configuration");

    let mut config = ExportConfig::load_layered(options.config_file.as_deref())?;

    if options.no_headers {
        config.include_headers = false;
    }
    if options.normalize_overrides {
        config.override_policy = OverridePolicy::Normalize;
    }

    Ok(config)
}

/// Build the override session from `--overrides` and `--set`
///
/// `--set` values are global and win over global entries from the file.
pub fn build_session(options: &ExportOptions) -> Result<OverrideSession> {
    let mut session = match &options.overrides_file {
        Some(path) => OverrideSession::from_json_file(path)?,
        None => OverrideSession::new(),
    };

    let assignments = options
        .set
        .iter()
        .map(|entry| MetadataOverrides::parse_assignment(entry))
        .collect::<crate::Result<MetadataOverrides>>()?;

    for (field, value) in assignments.iter() {
        session.set_global(field, value);
    }

    if !session.is_empty() {
        info!("Header overrides: {} global", session.global().len());
    }
    Ok(session)
}

/// Expand command-line inputs into a list of recording files
///
/// Plain files are kept as given. Directories are walked for recording
/// files and glob patterns are expanded; both expansions are sorted.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            files.extend(discover_recordings(path));
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else if is_glob_pattern(input) {
            let mut matches = glob(input)
                .with_context(|| format!("Invalid glob pattern: {}", input))?
                .filter_map(|entry| entry.ok())
                .filter(|p| p.is_file())
                .collect::<Vec<_>>();
            matches.sort();
            debug!("Pattern {} matched {} files", input, matches.len());
            files.extend(matches);
        } else {
            // Missing files are skipped by the pipeline with a warning
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        bail!("No recording files found in: {}", inputs.join(", "));
    }

    info!("Found {} input files", files.len());
    Ok(files)
}

/// Discover recording files below a directory
pub fn discover_recordings(dir: &Path) -> Vec<PathBuf> {
    let mut recordings: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && has_input_extension(path))
        .collect();

    recordings.sort();

    debug!(
        "Discovered {} recordings in {}",
        recordings.len(),
        dir.display()
    );
    recordings
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Print a human-readable run summary
pub fn print_summary(title: &str, stats: &ExportStats) {
    println!("\n{}", title.green().bold());
    println!("{}", "━".repeat(40));
    println!("   • Files processed: {}", stats.files_processed);
    if stats.files_skipped > 0 {
        println!(
            "   • {}",
            format!("Files skipped: {}", stats.files_skipped).yellow()
        );
    }
    println!("   • Rows written: {}", stats.rows_written);
    println!("   • Processing time: {} ms", stats.processing_time_ms);

    if !stats.outputs.is_empty() {
        println!("\n{}", "Output files:".bold());
        for output in &stats.outputs {
            println!("   • {}", output.display());
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalField;
    use std::fs;
    use tempfile::TempDir;

    fn options_with(set: &[&str]) -> ExportOptions {
        ExportOptions {
            inputs: vec!["a.txt".to_string()],
            set: set.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_discover_recordings_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("day2");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        fs::write(temp_dir.path().join("a.TXT"), "").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "").unwrap();
        fs::write(nested.join("c.txt"), "").unwrap();

        let found = discover_recordings(temp_dir.path());

        assert_eq!(
            found,
            vec![
                temp_dir.path().join("a.TXT"),
                temp_dir.path().join("b.txt"),
                nested.join("c.txt"),
            ]
        );
    }

    #[test]
    fn test_expand_inputs_keeps_argument_order() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("batch");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("2.txt"), "").unwrap();
        fs::write(dir.join("1.txt"), "").unwrap();
        let single = temp_dir.path().join("z.txt");
        fs::write(&single, "").unwrap();

        let inputs = vec![
            single.to_string_lossy().to_string(),
            dir.to_string_lossy().to_string(),
        ];
        let files = expand_inputs(&inputs).unwrap();

        assert_eq!(files, vec![single, dir.join("1.txt"), dir.join("2.txt")]);
    }

    #[test]
    fn test_expand_glob_pattern() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::write(temp_dir.path().join("c.csv"), "").unwrap();

        let pattern = temp_dir.path().join("*.txt").to_string_lossy().to_string();
        let files = expand_inputs(&[pattern]).unwrap();

        assert_eq!(
            files,
            vec![temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_empty_expansion_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.txt").to_string_lossy().to_string();
        assert!(expand_inputs(&[pattern]).is_err());
    }

    #[test]
    fn test_build_session_from_set_flags() {
        let session = build_session(&options_with(&["client=ACME", "job=Survey"])).unwrap();
        assert_eq!(session.global().get(CanonicalField::Client), Some("ACME"));
        assert_eq!(session.global().get(CanonicalField::Job), Some("Survey"));
    }

    #[test]
    fn test_build_session_rejects_unknown_field() {
        assert!(build_session(&options_with(&["colour=blue"])).is_err());
        assert!(build_session(&options_with(&["client"])).is_err());
    }

    #[test]
    fn test_set_flags_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("overrides.json");
        fs::write(&file, r#"{"all": {"client": "From file", "job": "Kept"}}"#).unwrap();

        let mut options = options_with(&["client=From flag"]);
        options.overrides_file = Some(file);
        let session = build_session(&options).unwrap();

        assert_eq!(session.global().get(CanonicalField::Client), Some("From flag"));
        assert_eq!(session.global().get(CanonicalField::Job), Some("Kept"));
    }

    #[test]
    fn test_cli_flags_layer_over_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("config.json");
        fs::write(&file, r#"{"merge_timestamps": false}"#).unwrap();

        let options = ExportOptions {
            no_headers: true,
            normalize_overrides: true,
            config_file: Some(file),
            ..Default::default()
        };
        let config = load_configuration(&options).unwrap();

        assert!(!config.include_headers);
        assert!(!config.merge_timestamps);
        assert_eq!(config.override_policy, OverridePolicy::Normalize);
    }
}
