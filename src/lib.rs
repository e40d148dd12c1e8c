//! # chromstore - Native Chromatogram Containers
//!
//! `chromstore` reads and writes the native chromatogram container: a ZIP
//! archive holding one version marker and a set of big-endian binary streams
//! (method, scans, TIC, baseline, peaks, areas, identifications, history,
//! miscellaneous info).
//!
//! ## Key Features
//!
//! - **Versioned formats**: every container version is one
//!   [`format::ChromatogramFormat`] in a [`format::FormatRegistry`]. The
//!   current `1.1.0.0` and legacy `1.0.0.9` layouts ship by default.
//!
//! - **Lazy scans**: with scan proxies enabled, only a per-scan summary is
//!   decoded up front; each full scan is decoded from the stored scans entry
//!   on request.
//!
//! - **Overview without scans**: the TIC stream alone is enough to draw the
//!   run.
//!
//! - **Safe rewrites**: the writer encodes everything before touching disk
//!   and replaces the target atomically, so a chromatogram may be written
//!   back over the file its proxies read from.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chromstore::reader::ReaderConfig;
//! use chromstore::writer::WriterConfig;
//!
//! let config = ReaderConfig::default().with_scan_proxies(true);
//! let chromatogram = chromstore::read_with_config("run.chrom", &config)?;
//! println!(
//!     "{} scans, {} peaks",
//!     chromatogram.number_of_scans(),
//!     chromatogram.peaks.len()
//! );
//!
//! let summary = chromstore::write_with_config(
//!     "run-legacy.chrom",
//!     &chromatogram,
//!     &WriterConfig::default().with_version(chromstore::format::V1009),
//! )?;
//! println!("{}", summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`codec`]: big-endian primitives and length-prefixed strings
//! - [`container`]: ZIP entry index, version marker, stream access
//! - [`model`]: the in-memory chromatogram
//! - [`format`]: per-version stream decoders/encoders and the registry
//! - [`proxy`]: lazily resolved scans
//! - [`reader`] / [`writer`]: configuration, errors, atomic writes
//! - [`export`]: CSV peak tables and JSON dumps
//! - [`validator`]: structural and semantic container checks

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod codec;
pub mod container;
pub mod export;
pub mod format;
pub mod model;
pub mod proxy;
pub mod reader;
pub mod validator;
pub mod writer;

use std::path::Path;

use format::FormatRegistry;
use model::{Chromatogram, ChromatogramOverview};
use reader::{DecodeError, ReaderConfig};
use writer::{EncodeError, WriteSummary, WriterConfig};

/// Read the container at `path` with default settings
pub fn read<P: AsRef<Path>>(path: P) -> Result<Chromatogram, DecodeError> {
    FormatRegistry::global().read(path)
}

/// Read the container at `path`
pub fn read_with_config<P: AsRef<Path>>(
    path: P,
    config: &ReaderConfig,
) -> Result<Chromatogram, DecodeError> {
    FormatRegistry::global().read_with_config(path, config)
}

/// Read only the TIC overview of the container at `path`
pub fn read_overview<P: AsRef<Path>>(path: P) -> Result<ChromatogramOverview, DecodeError> {
    FormatRegistry::global().read_overview(path)
}

/// Write `chromatogram` to `path` in the current version
pub fn write<P: AsRef<Path>>(path: P, chromatogram: &Chromatogram) -> Result<WriteSummary, EncodeError> {
    FormatRegistry::global().write(path, chromatogram)
}

/// Write `chromatogram` to `path`
pub fn write_with_config<P: AsRef<Path>>(
    path: P,
    chromatogram: &Chromatogram,
    config: &WriterConfig,
) -> Result<WriteSummary, EncodeError> {
    FormatRegistry::global().write_with_config(path, chromatogram, config)
}

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::container::{Container, EntryStorage};
    pub use crate::export::ExportError;
    pub use crate::format::{ChromatogramFormat, FormatRegistry, V1009, V1100};
    pub use crate::model::{
        BaselineModel, Chromatogram, ChromatogramOverview, IdentificationTarget, Ion, Peak,
        PeakType, Scan, ScanStore,
    };
    pub use crate::proxy::ScanProxy;
    pub use crate::reader::{DecodeError, ReaderConfig};
    pub use crate::validator::{validate_container, ValidationReport};
    pub use crate::writer::{CompressionType, ContainerWriter, EncodeError, WriteSummary, WriterConfig};
}
