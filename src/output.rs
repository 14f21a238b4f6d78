// ==============================================================================
// output.rs - Result Export
// ==============================================================================
// Description: Export filtered associations for download and web delivery
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-02-24
// Version: 1.0.1
// ==============================================================================

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::AssociationRecord;

/// Fixed column order of every exported table
pub const OUTPUT_COLUMNS: [&str; 5] = ["snp_id", "gene", "risk_allele", "p_value", "condicao"];

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values (the download-button format)
    Csv,
    /// JSON array (for web APIs and JavaScript)
    Json,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Get MIME type for web delivery
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Errors that can occur while writing an export
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON writing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes filtered association records in the fixed five-column shape
pub struct ReportWriter;

impl ReportWriter {
    /// Write records as comma-separated text with a header row
    ///
    /// The header is written unconditionally, so an empty result still
    /// produces a valid one-line file.
    pub fn write_csv<W: Write>(records: &[AssociationRecord], writer: W) -> Result<(), ReportError> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(OUTPUT_COLUMNS)?;
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Write records as a JSON array
    pub fn write_json<W: Write>(records: &[AssociationRecord], writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, records)?;
        Ok(())
    }

    /// UTF-8 CSV bytes for the in-memory download path
    pub fn to_csv_bytes(records: &[AssociationRecord]) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        Self::write_csv(records, &mut buffer)?;
        Ok(buffer)
    }

    /// Write records to a file in the requested format
    pub fn write_file(
        records: &[AssociationRecord],
        path: impl AsRef<Path>,
        format: OutputFormat,
    ) -> Result<(), ReportError> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);

        match format {
            OutputFormat::Csv => Self::write_csv(records, writer)?,
            OutputFormat::Json => Self::write_json(records, writer)?,
        }

        info!(
            "Wrote {} records to {:?} ({})",
            records.len(),
            path.as_ref(),
            format.extension()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<AssociationRecord> {
        vec![
            AssociationRecord {
                snp_id: "rs7903146".to_string(),
                gene: "TCF7L2".to_string(),
                risk_allele: "T".to_string(),
                p_value: 1e-10,
                condicao: "Diabetes".to_string(),
            },
            AssociationRecord {
                snp_id: "rs7216389".to_string(),
                gene: "ORMDL3".to_string(),
                risk_allele: "C".to_string(),
                p_value: 2e-9,
                condicao: "Diabetes".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let bytes = ReportWriter::to_csv_bytes(&sample_records()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("snp_id,gene,risk_allele,p_value,condicao"));
        assert_eq!(lines.next(), Some("rs7903146,TCF7L2,T,1e-10,Diabetes"));
        assert_eq!(lines.next(), Some("rs7216389,ORMDL3,C,2e-9,Diabetes"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let bytes = ReportWriter::to_csv_bytes(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "snp_id,gene,risk_allele,p_value,condicao");
    }

    #[test]
    fn test_json_round_trip() {
        let records = sample_records();
        let mut buffer = Vec::new();
        ReportWriter::write_json(&records, &mut buffer).unwrap();

        let parsed: Vec<AssociationRecord> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_output_format_mime_type() {
        assert_eq!(OutputFormat::Csv.mime_type(), "text/csv");
        assert_eq!(OutputFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_write_file_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados_significativos.csv");

        ReportWriter::write_file(&sample_records(), &path, OutputFormat::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("snp_id,gene,risk_allele,p_value,condicao"));
        assert!(text.contains("rs7903146"));
    }
}
