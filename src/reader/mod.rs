//! # Reader Module
//!
//! Settings and errors for decoding chromatogram containers. Decoding itself
//! is dispatched by the [`FormatRegistry`](crate::format::FormatRegistry) to
//! the format matching the container's version marker.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chromstore::reader::ReaderConfig;
//!
//! // Keep scans on disk and fetch them as they are needed
//! let config = ReaderConfig::default().with_scan_proxies(true);
//! let chromatogram = chromstore::read_with_config("run.chrom", &config)?;
//!
//! if let Some(scan) = chromatogram.scans.get(0)? {
//!     println!("First scan at {} ms with {} ions", scan.retention_time, scan.ion_count());
//! }
//! # Ok::<(), chromstore::reader::DecodeError>(())
//! ```

mod config;
mod error;

pub use config::ReaderConfig;
pub use error::DecodeError;
