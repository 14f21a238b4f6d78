// ==============================================================================
// validator.rs - Upload Validation
// ==============================================================================
// Description: Validates uploaded catalog exports (size, type, encoding)
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-02-17
// Version: 1.0.0
// Security: Allowlist-only file types, plain-text uploads only
// ==============================================================================

use anyhow::Result;
use tracing::{debug, info};

const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// A validated upload, safe to hand to the parser
#[derive(Debug)]
pub struct ValidatedUpload {
    pub original_name: String,
    pub safe_name: String,
    pub extension: String,
    pub size: usize,
}

pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<&'static str>,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadValidator {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            // Raw GWAS Catalog exports ship as .tsv; .txt accepted for
            // renamed downloads
            allowed_extensions: vec!["tsv", "txt"],
        }
    }

    /// Validate an uploaded file before parsing
    ///
    /// Checks, in order: non-empty payload, size cap, extension allowlist,
    /// UTF-8 encoding. Any failure aborts the upload with a descriptive
    /// error; nothing is parsed on failure.
    pub fn validate_upload(&self, file_name: &str, bytes: &[u8]) -> Result<ValidatedUpload> {
        info!("Validating upload: {}", file_name);

        if bytes.is_empty() {
            anyhow::bail!("Uploaded file is empty");
        }

        if bytes.len() > self.max_file_size {
            anyhow::bail!(
                "File too large: {} bytes (max: {} bytes)",
                bytes.len(),
                self.max_file_size
            );
        }
        debug!("Size check passed: {} bytes", bytes.len());

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !self.allowed_extensions.contains(&extension.as_str()) {
            anyhow::bail!(
                "File type '{}' not allowed (expected one of: {})",
                extension,
                self.allowed_extensions.join(", ")
            );
        }
        debug!("Extension check passed: {}", extension);

        if std::str::from_utf8(bytes).is_err() {
            anyhow::bail!("File is not valid UTF-8 text");
        }
        debug!("Encoding check passed");

        let safe_name = sanitize_filename(file_name);

        Ok(ValidatedUpload {
            original_name: file_name.to_string(),
            safe_name,
            extension,
            size: bytes.len(),
        })
    }
}

/// Strip path components and replace unsafe characters
fn sanitize_filename(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tsv_upload() {
        let validator = UploadValidator::new();
        let validated = validator
            .validate_upload("gwas_catalog.tsv", b"DISEASE/TRAIT\tGENE\n")
            .unwrap();

        assert_eq!(validated.original_name, "gwas_catalog.tsv");
        assert_eq!(validated.extension, "tsv");
        assert_eq!(validated.size, 19);
    }

    #[test]
    fn test_empty_upload_rejected() {
        let validator = UploadValidator::new();
        assert!(validator.validate_upload("export.tsv", b"").is_err());
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let validator = UploadValidator {
            max_file_size: 8,
            allowed_extensions: vec!["tsv"],
        };
        assert!(validator
            .validate_upload("export.tsv", b"way past the limit")
            .is_err());
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        let validator = UploadValidator::new();
        assert!(validator.validate_upload("export.xlsx", b"data").is_err());
        assert!(validator.validate_upload("no_extension", b"data").is_err());
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let validator = UploadValidator::new();
        assert!(validator.validate_upload("EXPORT.TSV", b"data").is_ok());
    }

    #[test]
    fn test_non_utf8_upload_rejected() {
        let validator = UploadValidator::new();
        assert!(validator
            .validate_upload("export.tsv", &[0xff, 0xfe, 0x00])
            .is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../etc/passwd.tsv"), "passwd.tsv");
        assert_eq!(sanitize_filename("meu arquivo.tsv"), "meu_arquivo.tsv");
        assert_eq!(sanitize_filename("export-2026_02.tsv"), "export-2026_02.tsv");
    }
}
