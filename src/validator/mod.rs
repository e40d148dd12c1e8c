//! # Container Validation Module
//!
//! Deep integrity validation for chromatogram containers.
//!
//! ## Validation Checklist
//!
//! 1. **Structure Check**: the archive opens, the version marker is the first
//!    entry and names a registered format, every stream of that format is
//!    present, and the scans stream is stored uncompressed
//! 2. **Decode Check**: every stream decodes completely
//! 3. **Semantic Checks**: TIC agrees with the scans, the baseline is
//!    contiguous, peak curves were stored normalized and scan proxies point
//!    at the records they summarize
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chromstore::validator::validate_container;
//! use std::path::Path;
//!
//! match validate_container(Path::new("run.chrom")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;

pub use report::{CheckCategory, CheckStatus, ValidationCheck, ValidationReport};

use crate::format::FormatRegistry;
use crate::reader::{DecodeError, ReaderConfig};

mod report;
mod semantics;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The file cannot be validated at all
    #[error("Structure error: {0}")]
    StructureError(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding the container
    #[error("Decode error: {0}")]
    DecodeError(#[from] DecodeError),
}

/// Validate the container at `path` against the default formats
pub fn validate_container(path: &Path) -> Result<ValidationReport> {
    validate_container_with_registry(path, FormatRegistry::global())
}

/// Validate the container at `path` against the formats in `registry`
pub fn validate_container_with_registry(path: &Path, registry: &FormatRegistry) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure
    let Some(mut checked) = structure::check_structure(path, registry, &mut report)? else {
        return Ok(report);
    };

    // 2. Decode, without baseline validation so the semantic pass can report on it
    let config = ReaderConfig::default();
    let chromatogram = match checked.format.decode(&mut checked.container, &config) {
        Ok(chromatogram) => chromatogram,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CheckCategory::Decoding, "All streams decode", e.to_string()));
            return Ok(report);
        }
    };
    report.add_check(ValidationCheck::ok(
        CheckCategory::Decoding,
        format!(
            "All streams decode ({} scans, {} peaks)",
            chromatogram.number_of_scans(),
            chromatogram.peaks.len()
        ),
    ));
    let overview = match checked.format.decode_overview(&mut checked.container) {
        Ok(overview) => overview,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CheckCategory::Decoding, "TIC decodes", e.to_string()));
            return Ok(report);
        }
    };

    // 3. Semantics
    semantics::check_semantics(
        path,
        registry,
        checked.format.as_ref(),
        &mut checked.container,
        &chromatogram,
        &overview,
        &mut report,
    )?;

    Ok(report)
}
