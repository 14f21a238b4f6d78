// ==============================================================================
// models.rs - Association Data Models
// ==============================================================================
// Description: Data structures for filtered GWAS Catalog associations
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-17
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

/// Conventional genome-wide significance cutoff for GWAS p-values
pub const GENOME_WIDE_SIGNIFICANCE: f64 = 5e-8;

/// One statistically significant gene/SNP association
///
/// Output rows are complete by construction: a row with any of the five
/// fields missing in the source table is dropped before it gets here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// SNP identifier (e.g., "rs7903146"; may be comma-joined composites)
    pub snp_id: String,

    /// Gene symbol, taken from whichever gene column the input carried
    pub gene: String,

    /// Strongest SNP risk allele (e.g., "T")
    pub risk_allele: String,

    /// Association p-value; always <= the filter threshold
    pub p_value: f64,

    /// Health condition/trait this record was filtered for
    pub condicao: String,
}

/// P-value threshold for filtering associations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PValueThreshold {
    /// Conventional genome-wide cutoff (5e-8)
    GenomeWide,
    /// Caller-supplied cutoff
    Custom(f64),
    /// No significance filtering
    NoFilter,
}

impl PValueThreshold {
    pub fn threshold_value(&self) -> Option<f64> {
        match self {
            PValueThreshold::GenomeWide => Some(GENOME_WIDE_SIGNIFICANCE),
            PValueThreshold::Custom(value) => Some(*value),
            PValueThreshold::NoFilter => None,
        }
    }

    /// Inclusive comparison: a p-value exactly at the cutoff passes
    pub fn passes(&self, p_value: f64) -> bool {
        match self.threshold_value() {
            None => true,
            Some(threshold) => p_value <= threshold,
        }
    }
}

impl Default for PValueThreshold {
    fn default() -> Self {
        PValueThreshold::GenomeWide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_wide_threshold_passes() {
        let threshold = PValueThreshold::GenomeWide;
        assert!(threshold.passes(1e-10)); // Well below
        assert!(threshold.passes(5e-8)); // Boundary is inclusive
        assert!(!threshold.passes(5.1e-8)); // Just above
        assert!(!threshold.passes(0.001)); // Nominal significance only
    }

    #[test]
    fn test_custom_threshold_passes() {
        let threshold = PValueThreshold::Custom(0.05);
        assert!(threshold.passes(0.05));
        assert!(!threshold.passes(0.06));
    }

    #[test]
    fn test_no_filter_passes_everything() {
        let threshold = PValueThreshold::NoFilter;
        assert!(threshold.passes(0.99));
        assert!(threshold.passes(1.0));
    }
}
