//! Batch command - tabulate many page-dump files and export per-company
//! tables.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use invtab_core::{Aggregator, Company, Document, InvtabConfig, Pipeline};

use crate::sink;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-company tables
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Also generate a per-document summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    company: Option<Company>,
    records: usize,
    warnings: Vec<String>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        InvtabConfig::from_file(std::path::Path::new(path))?
    } else {
        InvtabConfig::default()
    };
    let placeholder = config.sink.placeholder_file.clone();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    // Set up progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // One document fully processed before the next; the aggregator is the
    // only state shared across documents.
    let pipeline = Pipeline::new(config);
    let mut aggregator = Aggregator::new();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let result = match Document::from_json_file(&path) {
            Ok(document) => {
                let report = pipeline.process_document(&document);
                let result = ProcessResult {
                    path: path.clone(),
                    company: report.company,
                    records: report.rows.len(),
                    warnings: report.warnings,
                    error: None,
                };
                aggregator.push(&report.document, report.company, report.rows);
                result
            }
            Err(e) => {
                // Unreadable document: skip it, keep the batch going.
                warn!("Skipping {}: {}", path.display(), e);
                ProcessResult {
                    path: path.clone(),
                    company: None,
                    records: 0,
                    warnings: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Hand the per-company groups to the sink.
    let total_records = aggregator.len();
    let groups = aggregator.into_groups();

    if groups.is_empty() {
        let path = sink::write_placeholder(&args.output_dir, &placeholder)?;
        println!(
            "{} No records extracted; placeholder written to {}",
            style("!").yellow(),
            path.display()
        );
    } else {
        for path in sink::write_company_tables(&args.output_dir, &groups)? {
            println!("{} Wrote {}", style("✓").green(), path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let skipped: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}: {} records from {} companies, {} skipped",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        total_records,
        groups.len(),
        skipped.len()
    );

    if !skipped.is_empty() {
        println!();
        println!("{}", style("Skipped files:").red());
        for result in &skipped {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "company", "records", "warnings"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let status = if result.error.is_some() {
            "error"
        } else if result.company.is_none() {
            "unrecognized"
        } else {
            "ok"
        };

        let company = result
            .company
            .map(|c| c.display_name())
            .unwrap_or_default();

        let notes = match &result.error {
            Some(e) => e.clone(),
            None => result.warnings.join("; "),
        };

        wtr.write_record([
            filename,
            status,
            company,
            &result.records.to_string(),
            &notes,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
