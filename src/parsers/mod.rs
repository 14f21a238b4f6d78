// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for association catalog file formats
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-17
// Version: 1.0.0
// ==============================================================================

pub mod gwas_catalog;

pub use gwas_catalog::{CatalogError, CatalogParser, CatalogTable};
