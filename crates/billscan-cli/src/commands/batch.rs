//! Batch processing command for multiple receipt text files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use billscan_core::models::bill::StructuredBill;
use billscan_core::models::config::BillscanConfig;
use billscan_core::{BillParser, HeuristicBillParser};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    bill: Option<StructuredBill>,
    warnings: Vec<String>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One row of the batch summary CSV.
#[derive(Serialize)]
struct SummaryRow<'a> {
    file: String,
    status: &'a str,
    document_type: String,
    vendor_name: String,
    invoice_number: String,
    grand_total: String,
    currency: String,
    items: usize,
    warnings: usize,
    processed_at: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BillscanConfig::from_file(std::path::Path::new(path))?
    } else {
        BillscanConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = HeuristicBillParser::with_config(&config.extraction);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((bill, warnings)) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    bill: Some(bill),
                    warnings,
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        bill: None,
                        warnings: Vec::new(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    let successful: Vec<_> = results.iter().filter(|r| r.bill.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(bill), Some(output_dir)) = (&result.bill, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("bill");

            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));

            let content = match args.format {
                super::process::OutputFormat::Json => bill.to_json()?,
                super::process::OutputFormat::Csv => super::process::format_csv(bill)?,
                super::process::OutputFormat::Text => super::process::format_text(bill),
            };

            fs::write(&output_path, content)?;
            debug!(
                "wrote output to {} ({}ms)",
                output_path.display(),
                result.processing_time_ms
            );
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &PathBuf,
    parser: &HeuristicBillParser,
) -> anyhow::Result<(StructuredBill, Vec<String>)> {
    let text = fs::read_to_string(path)?;
    let result = parser.parse(&text);
    Ok((result.bill, result.warnings))
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = chrono::Local::now().to_rfc3339();

    for result in results {
        let row = match &result.bill {
            Some(bill) => SummaryRow {
                file: result.path.display().to_string(),
                status: "ok",
                document_type: bill.document_type.to_string(),
                vendor_name: bill.vendor.name.clone().unwrap_or_default(),
                invoice_number: bill.invoice.number.clone().unwrap_or_default(),
                grand_total: bill
                    .amounts
                    .grand_total
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                currency: bill.amounts.currency.clone(),
                items: bill.items.len(),
                warnings: result.warnings.len(),
                processed_at: processed_at.clone(),
            },
            None => SummaryRow {
                file: result.path.display().to_string(),
                status: "error",
                document_type: String::new(),
                vendor_name: String::new(),
                invoice_number: String::new(),
                grand_total: String::new(),
                currency: String::new(),
                items: 0,
                warnings: 0,
                processed_at: processed_at.clone(),
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
