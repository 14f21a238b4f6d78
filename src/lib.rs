// ==============================================================================
// lib.rs - GWAS Association Filter Library
// ==============================================================================
// Description: Library interface for GWAS Catalog association filtering
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-17
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod validator;
pub mod models;
pub mod processor;
pub mod output;
pub mod summary;
