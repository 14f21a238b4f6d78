// ==============================================================================
// processor.rs - Core Association Filtering Logic
// ==============================================================================
// Description: Lists conditions and filters significant associations from a
//              loaded GWAS Catalog export
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-24
// Version: 1.0.1
// ==============================================================================

use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::{AssociationRecord, PValueThreshold};
use crate::parsers::gwas_catalog::{
    is_missing, CatalogError, CatalogTable, P_VALUE_COLUMN, RISK_ALLELE_COLUMN, SNP_COLUMN,
};

/// Filters a loaded catalog table down to significant associations
pub struct AssociationProcessor {
    threshold: PValueThreshold,
}

impl Default for AssociationProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AssociationProcessor {
    /// Processor with the conventional genome-wide cutoff (5e-8)
    pub fn new() -> Self {
        Self {
            threshold: PValueThreshold::GenomeWide,
        }
    }

    pub fn with_threshold(threshold: PValueThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> PValueThreshold {
        self.threshold
    }

    /// List the distinct conditions present in the table
    ///
    /// Values are returned verbatim in first-occurrence order, so a value
    /// picked from this list matches `filter_by_condition` exactly. An
    /// all-excluded table yields an empty list, not an error.
    pub fn list_conditions(&self, table: &CatalogTable) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut conditions = Vec::new();

        for row in table.rows() {
            // Condition-missing rows were excluded at load time
            if let Some(value) = row.get(table.condition_idx()) {
                if seen.insert(value) {
                    conditions.push(value.to_string());
                }
            }
        }

        debug!("Enumerated {} distinct conditions", conditions.len());
        conditions
    }

    /// Filter the table to significant associations for one condition
    ///
    /// Matching is exact and case-sensitive against the raw condition
    /// values. Each matching row is projected onto the five output fields;
    /// rows with any projected value missing, or with a non-numeric or
    /// above-threshold p-value, are dropped. The `condicao` field of every
    /// surviving record is set to the literal `condition` argument.
    ///
    /// # Returns
    /// * `Ok(Vec<AssociationRecord>)` - Surviving rows in original order
    ///   (an empty result is valid)
    /// * `Err(CatalogError::MissingColumn)` - SNP, p-value, or risk allele
    ///   column absent from the header
    pub fn filter_by_condition(
        &self,
        table: &CatalogTable,
        condition: &str,
    ) -> Result<Vec<AssociationRecord>, CatalogError> {
        let snp_idx = resolve_column(table, SNP_COLUMN)?;
        let p_value_idx = resolve_column(table, P_VALUE_COLUMN)?;
        let risk_allele_idx = resolve_column(table, RISK_ALLELE_COLUMN)?;

        let mut records = Vec::new();
        let mut dropped_incomplete = 0usize;
        let mut dropped_bad_p_value = 0usize;
        let mut dropped_above_threshold = 0usize;

        for row in table.rows() {
            if row.get(table.condition_idx()) != Some(condition) {
                continue;
            }

            let snp_id = row.get(snp_idx);
            let gene = row.get(table.gene_idx());
            let risk_allele = row.get(risk_allele_idx);
            let p_value_raw = row.get(p_value_idx);

            if is_missing(snp_id)
                || is_missing(gene)
                || is_missing(risk_allele)
                || is_missing(p_value_raw)
            {
                dropped_incomplete += 1;
                continue;
            }

            let p_value: f64 = match p_value_raw.unwrap_or_default().trim().parse() {
                Ok(value) => value,
                Err(_) => {
                    dropped_bad_p_value += 1;
                    continue;
                }
            };

            if !self.threshold.passes(p_value) {
                dropped_above_threshold += 1;
                continue;
            }

            records.push(AssociationRecord {
                snp_id: snp_id.unwrap_or_default().to_string(),
                gene: gene.unwrap_or_default().to_string(),
                risk_allele: risk_allele.unwrap_or_default().to_string(),
                p_value,
                // Set verbatim from the request so the output is uniform
                // even if raw values varied in casing or whitespace
                condicao: condition.to_string(),
            });
        }

        info!(
            "Filtered '{}': {} significant associations ({} incomplete, {} unparseable p-value, {} above threshold)",
            condition,
            records.len(),
            dropped_incomplete,
            dropped_bad_p_value,
            dropped_above_threshold
        );

        Ok(records)
    }
}

fn resolve_column(table: &CatalogTable, name: &'static str) -> Result<usize, CatalogError> {
    table
        .header()
        .iter()
        .position(|h| h == name)
        .ok_or(CatalogError::MissingColumn(name))
}
