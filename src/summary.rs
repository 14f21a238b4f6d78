// ==============================================================================
// summary.rs - Display Statistics
// ==============================================================================
// Description: Chart-ready aggregates over filtered association records
// Author: Matt Barham
// Created: 2026-02-12
// Modified: 2026-02-17
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::AssociationRecord;

/// Significant-SNP count for one gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneCount {
    pub gene: String,
    pub count: usize,
}

/// Aggregates backing the dashboard charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationSummary {
    /// Total significant associations for the chosen condition
    pub total_records: usize,

    /// Number of distinct genes among them
    pub distinct_genes: usize,

    /// Most-associated genes, highest count first
    pub top_genes: Vec<GeneCount>,
}

impl AssociationSummary {
    /// Summarize filtered records, keeping at most `top_limit` genes
    ///
    /// Genes are ordered by descending count, ties broken alphabetically
    /// so the ranking is deterministic.
    pub fn from_records(records: &[AssociationRecord], top_limit: usize) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.gene.as_str()).or_insert(0) += 1;
        }

        let distinct_genes = counts.len();

        let mut top_genes: Vec<GeneCount> = counts
            .into_iter()
            .map(|(gene, count)| GeneCount {
                gene: gene.to_string(),
                count,
            })
            .collect();
        top_genes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.gene.cmp(&b.gene)));
        top_genes.truncate(top_limit);

        Self {
            total_records: records.len(),
            distinct_genes,
            top_genes,
        }
    }
}

/// -log10(p) series for the significance scatter plot
///
/// Retained p-values are bounded below by the significance filter, so the
/// transform is always finite here.
pub fn neg_log10_p(records: &[AssociationRecord]) -> Vec<f64> {
    records.iter().map(|r| -r.p_value.log10()).collect()
}
