//! # Export Module
//!
//! Writes decoded chromatograms to formats other tools can read: a CSV peak
//! table and a JSON dump of the whole chromatogram.

pub mod csv;
pub mod json;

/// Errors that can occur while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer or parser error
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Proxied scans could not be resolved
    #[error("Scan resolution failed: {0}")]
    ScanResolution(#[from] crate::reader::DecodeError),

    /// A table does not have the expected shape
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}
