// ==============================================================================
// gwas_catalog.rs - GWAS Catalog Export Parser
// ==============================================================================
// Description: Parser for raw GWAS Catalog association TSV exports
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-24
// Version: 1.0.1
// ==============================================================================
// Format: Tab-delimited text with a header row
// Example:
//   DISEASE/TRAIT	GENE	SNPS	P-VALUE	STRONGEST SNP-RISK ALLELE
//   Diabetes	TCF7L2	rs7903146	1E-10	T
//   Diabetes	FTO	rs9939609	1E-3	A
// ==============================================================================

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Gene column aliases accepted in an export header, in priority order.
/// The first one present is used for every output row of that table.
pub const GENE_COLUMN_ALIASES: [&str; 3] = ["GENE", "REPORTED GENE(S)", "MAPPED_GENE"];

/// Exact header of the condition/trait column
pub const CONDITION_COLUMN: &str = "DISEASE/TRAIT";

/// Header of the SNP identifier column
pub const SNP_COLUMN: &str = "SNPS";

/// Header of the p-value column
pub const P_VALUE_COLUMN: &str = "P-VALUE";

/// Header of the risk allele column
pub const RISK_ALLELE_COLUMN: &str = "STRONGEST SNP-RISK ALLELE";

/// Errors that can occur while loading or filtering a catalog export
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed TSV input: {0}")]
    Malformed(#[from] csv::Error),

    #[error("missing gene column (expected one of: GENE, REPORTED GENE(S), MAPPED_GENE)")]
    MissingGeneColumn,

    #[error("missing condition column 'DISEASE/TRAIT'")]
    MissingConditionColumn,

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// A loaded catalog export, ready for condition listing and filtering
///
/// Rows with a missing condition value are already excluded; the gene
/// column alias is resolved once here and fixed for the table's lifetime.
#[derive(Debug, Clone)]
pub struct CatalogTable {
    header: StringRecord,
    rows: Vec<StringRecord>,
    gene_column: String,
    gene_idx: usize,
    condition_idx: usize,
}

impl CatalogTable {
    /// Name of the gene column alias resolved at load time
    pub fn gene_column(&self) -> &str {
        &self.gene_column
    }

    /// Number of retained rows (condition-missing rows are not counted)
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn header(&self) -> &StringRecord {
        &self.header
    }

    pub(crate) fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub(crate) fn gene_idx(&self) -> usize {
        self.gene_idx
    }

    pub(crate) fn condition_idx(&self) -> usize {
        self.condition_idx
    }
}

/// A cell is missing when the column is absent from the row or the value
/// is blank after trimming (the TSV analogue of a dropped NA)
pub(crate) fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.trim().is_empty(),
    }
}

/// Parser for raw GWAS Catalog TSV exports
pub struct CatalogParser;

impl CatalogParser {
    /// Parse a catalog export from any reader
    ///
    /// # Arguments
    /// * `reader` - Byte source for the tab-separated export
    ///
    /// # Returns
    /// * `Ok(CatalogTable)` - Parsed table with the gene column resolved
    /// * `Err(CatalogError)` - Missing required column or malformed input
    ///
    /// # Format
    /// Tab-delimited with a header row. The header must contain
    /// `DISEASE/TRAIT` and at least one of the gene column aliases
    /// (`GENE`, `REPORTED GENE(S)`, `MAPPED_GENE`, checked in that order).
    /// Rows whose condition cell is blank are excluded during the parse.
    pub fn parse_reader<R: Read>(reader: R) -> Result<CatalogTable, CatalogError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = csv_reader.headers()?.clone();

        // Resolve the gene column: first alias present wins
        let (gene_column, gene_idx) = GENE_COLUMN_ALIASES
            .iter()
            .find_map(|alias| {
                header
                    .iter()
                    .position(|h| h == *alias)
                    .map(|idx| (alias.to_string(), idx))
            })
            .ok_or(CatalogError::MissingGeneColumn)?;

        let condition_idx = header
            .iter()
            .position(|h| h == CONDITION_COLUMN)
            .ok_or(CatalogError::MissingConditionColumn)?;

        let mut rows = Vec::new();
        let mut excluded_missing_condition = 0usize;

        for result in csv_reader.records() {
            let record = result?;

            if is_missing(record.get(condition_idx)) {
                excluded_missing_condition += 1;
                continue;
            }

            rows.push(record);
        }

        debug!(
            "Parsed catalog export: {} rows retained, {} excluded (missing condition), gene column '{}'",
            rows.len(),
            excluded_missing_condition,
            gene_column
        );

        Ok(CatalogTable {
            header,
            rows,
            gene_column,
            gene_idx,
            condition_idx,
        })
    }

    /// Parse a catalog export held in memory (the upload path)
    pub fn parse_bytes(bytes: &[u8]) -> Result<CatalogTable, CatalogError> {
        Self::parse_reader(bytes)
    }

    /// Parse a catalog export from a file on disk
    pub fn parse_file(path: impl AsRef<Path>) -> Result<CatalogTable, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::parse_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with sample catalog data
    fn create_test_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_valid_export() {
        let contents = "\
DISEASE/TRAIT\tGENE\tSNPS\tP-VALUE\tSTRONGEST SNP-RISK ALLELE
Diabetes\tTCF7L2\trs7903146\t1E-10\tT
Diabetes\tFTO\trs9939609\t1E-3\tA
Asthma\tORMDL3\trs7216389\t2E-9\tT
";
        let file = create_test_file(contents);
        let table = CatalogParser::parse_file(file.path()).unwrap();

        assert_eq!(table.record_count(), 3);
        assert_eq!(table.gene_column(), "GENE");
    }

    #[test]
    fn test_gene_alias_priority_order() {
        // Both GENE and MAPPED_GENE present: GENE wins
        let contents = "\
DISEASE/TRAIT\tMAPPED_GENE\tGENE\tSNPS
Diabetes\tmapped\tpreferred\trs1
";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert_eq!(table.gene_column(), "GENE");
    }

    #[test]
    fn test_single_alias_is_used() {
        let contents = "\
DISEASE/TRAIT\tMAPPED_GENE\tSNPS
Diabetes\tTCF7L2\trs1
";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert_eq!(table.gene_column(), "MAPPED_GENE");
    }

    #[test]
    fn test_reported_genes_alias() {
        let contents = "\
DISEASE/TRAIT\tREPORTED GENE(S)\tMAPPED_GENE\tSNPS
Diabetes\treported\tmapped\trs1
";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert_eq!(table.gene_column(), "REPORTED GENE(S)");
    }

    #[test]
    fn test_missing_gene_column() {
        let contents = "\
DISEASE/TRAIT\tSNPS\tP-VALUE
Diabetes\trs1\t1E-10
";
        let result = CatalogParser::parse_bytes(contents.as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingGeneColumn)));
    }

    #[test]
    fn test_missing_condition_column() {
        // Gene column present, condition column absent: still an error
        let contents = "\
GENE\tSNPS\tP-VALUE
TCF7L2\trs1\t1E-10
";
        let result = CatalogParser::parse_bytes(contents.as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingConditionColumn)));
    }

    #[test]
    fn test_missing_condition_rows_excluded() {
        let contents = "\
DISEASE/TRAIT\tGENE\tSNPS
Diabetes\tTCF7L2\trs1
\tFTO\trs2
   \tORMDL3\trs3
Asthma\tIL33\trs4
";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert_eq!(table.record_count(), 2);
    }

    #[test]
    fn test_header_only_export() {
        let contents = "DISEASE/TRAIT\tGENE\tSNPS\tP-VALUE\tSTRONGEST SNP-RISK ALLELE\n";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut bytes = b"DISEASE/TRAIT\tGENE\tSNPS\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\t', b'x', b'\t', b'y', b'\n']);

        let result = CatalogParser::parse_bytes(&bytes);
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        // Short rows parse; missing trailing cells read back as absent
        let contents = "\
DISEASE/TRAIT\tGENE\tSNPS\tP-VALUE
Diabetes\tTCF7L2
Diabetes\tFTO\trs2\t1E-10
";
        let table = CatalogParser::parse_bytes(contents.as_bytes()).unwrap();
        assert_eq!(table.record_count(), 2);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(is_missing(Some("   ")));
        assert!(!is_missing(Some("Diabetes")));
    }
}
