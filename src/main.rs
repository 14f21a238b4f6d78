// ==============================================================================
// main.rs - GWAS Association Filter Entry Point
// ==============================================================================
// Description: Command-line shell around the catalog filtering pipeline
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-24
// Version: 1.0.1
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gwas_filter::models::PValueThreshold;
use gwas_filter::output::{OutputFormat, ReportWriter};
use gwas_filter::parsers::CatalogParser;
use gwas_filter::processor::AssociationProcessor;
use gwas_filter::summary::AssociationSummary;
use gwas_filter::validator::UploadValidator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw GWAS Catalog TSV export to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// Health condition to filter for; omit to list available conditions
    #[arg(short, long)]
    condition: Option<String>,

    /// Output file path; writes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (csv or json)
    #[arg(long, default_value = "csv")]
    format: String,

    /// P-value cutoff (genome-wide, no-filter, or a number such as 1e-6)
    #[arg(long, default_value = "genome-wide")]
    threshold: String,

    /// Print a per-gene summary after filtering
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gwas_filter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("GWAS Association Filter starting...");

    // Validate the upload before parsing anything
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read input file {:?}", args.input))?;

    let validated = UploadValidator::new()
        .validate_upload(&file_name, &bytes)
        .context("Upload validation failed")?;
    info!(
        "Upload accepted: {} ({} bytes)",
        validated.safe_name, validated.size
    );

    let table = CatalogParser::parse_bytes(&bytes).context("Failed to parse catalog export")?;
    info!(
        "Loaded {} rows, gene column '{}'",
        table.record_count(),
        table.gene_column()
    );

    // Parse p-value threshold
    let threshold = match args.threshold.to_lowercase().as_str() {
        "genome-wide" | "genomewide" => PValueThreshold::GenomeWide,
        "no-filter" | "nofilter" => PValueThreshold::NoFilter,
        other => match other.parse::<f64>() {
            Ok(value) => PValueThreshold::Custom(value),
            Err(_) => {
                warn!(
                    "Invalid threshold '{}', using genome-wide cutoff",
                    args.threshold
                );
                PValueThreshold::GenomeWide
            }
        },
    };

    let processor = AssociationProcessor::with_threshold(threshold);

    // No condition chosen: list what the export offers and stop
    let Some(condition) = args.condition else {
        let conditions = processor.list_conditions(&table);
        info!("{} conditions available", conditions.len());
        for condition in conditions {
            println!("{condition}");
        }
        return Ok(());
    };

    let records = processor
        .filter_by_condition(&table, &condition)
        .context("Failed to filter by condition")?;

    // Parse output format
    let format = match args.format.to_lowercase().as_str() {
        "csv" => OutputFormat::Csv,
        "json" => OutputFormat::Json,
        other => {
            warn!("Invalid format '{}', using csv", other);
            OutputFormat::Csv
        }
    };

    match &args.output {
        Some(path) => {
            ReportWriter::write_file(&records, path, format)
                .with_context(|| format!("Failed to write results to {path:?}"))?;
        }
        None => {
            let stdout = std::io::stdout().lock();
            match format {
                OutputFormat::Csv => ReportWriter::write_csv(&records, stdout)?,
                OutputFormat::Json => ReportWriter::write_json(&records, stdout)?,
            }
        }
    }

    if args.summary {
        let summary = AssociationSummary::from_records(&records, 10);
        eprintln!(
            "{} significant associations across {} genes for '{}'",
            summary.total_records, summary.distinct_genes, condition
        );
        for entry in &summary.top_genes {
            eprintln!("  {:<16} {}", entry.gene, entry.count);
        }
    }

    Ok(())
}
