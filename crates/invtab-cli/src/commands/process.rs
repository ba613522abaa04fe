//! Process command - tabulate a single page-dump file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::info;

use invtab_core::{Cell, Document, InvtabConfig, Pipeline};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input page-dump JSON file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output under the company's column schema
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        InvtabConfig::from_file(std::path::Path::new(path))?
    } else {
        InvtabConfig::default()
    };

    info!("Processing file: {}", args.input.display());

    let document = Document::from_json_file(&args.input)?;
    let report = Pipeline::new(config).process_document(&document);

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let content = match args.format {
        OutputFormat::Json => format_json(&report)?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&report),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, content)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn format_json(report: &invtab_core::DocumentReport) -> anyhow::Result<String> {
    let value = json!({
        "document": &report.document,
        "company": report.company.map(|c| c.slug()),
        "header": &report.header,
        "rows": &report.rows,
        "warnings": &report.warnings,
    });

    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_csv(report: &invtab_core::DocumentReport) -> anyhow::Result<String> {
    let Some(company) = report.company else {
        anyhow::bail!("no company signature matched; cannot pick a column schema");
    };

    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(company.columns())?;
    for row in &report.rows {
        let cells: Vec<String> = row.to_cells().iter().map(Cell::display).collect();
        wtr.write_record(&cells)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &invtab_core::DocumentReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", report.document));
    output.push_str(&format!(
        "Company: {}\n",
        report
            .company
            .map(|c| c.display_name())
            .unwrap_or("unrecognized")
    ));
    output.push_str(&format!("Invoice: {}\n", report.header.invoice_number));
    output.push_str(&format!("Date: {}\n", report.header.invoice_date.display()));
    output.push_str(&format!("Vendor GSTIN: {}\n", report.header.vendor_gstin));
    output.push_str(&format!("Buyer: {}\n", report.header.buyer_name));
    output.push_str(&format!("Buyer GSTIN: {}\n", report.header.buyer_gstin));
    output.push_str(&format!("Line items: {}\n", report.rows.len()));

    output
}
