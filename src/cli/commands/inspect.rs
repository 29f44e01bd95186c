//! Inspect command: show the parsed header of one recording

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::cli::args::InspectArgs;
use crate::header::{parse_header, validate_metadata};
use crate::models::{CanonicalField, MetadataRecord};

pub async fn run_inspect(args: InspectArgs) -> Result<()> {
    let file = args.file.clone();
    let metadata = tokio::task::spawn_blocking(move || parse_header(&file))
        .await
        .context("Header parsing task panicked")??;

    let warnings = validate_metadata(&metadata);

    if args.json {
        let report = inspect_report(&args.file, &metadata, &warnings);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_header(&args.file, &metadata, &warnings);
    }
    Ok(())
}

/// JSON view of a parsed header: every canonical field, blank when unset
fn inspect_report(file: &Path, metadata: &MetadataRecord, warnings: &[String]) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = CanonicalField::ALL
        .iter()
        .map(|field| {
            (
                field.key().to_string(),
                serde_json::Value::from(metadata.value_or_empty(*field)),
            )
        })
        .collect();

    serde_json::json!({
        "file": file.display().to_string(),
        "metadata": fields,
        "warnings": warnings,
    })
}

fn print_header(file: &Path, metadata: &MetadataRecord, warnings: &[String]) {
    println!("\n{}", file.display().to_string().bold());
    println!("{}", "━".repeat(40));
    for field in CanonicalField::ALL {
        let value = metadata.value_or_empty(field);
        if value.is_empty() {
            println!("   {:<20} {}", field.label(), "-".dimmed());
        } else {
            println!("   {:<20} {}", field.label(), value);
        }
    }

    if !warnings.is_empty() {
        println!();
        for warning in warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
    }
    println!();
}
