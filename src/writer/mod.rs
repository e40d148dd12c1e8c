//! # Container Writer
//!
//! Encodes a [`Chromatogram`] with the format selected in [`WriterConfig`] and
//! writes the resulting streams as archive entries, version marker first.
//!
//! ## Design Principles
//!
//! 1. **Atomic Replacement**: The archive is built in a temporary file in the
//!    destination directory and persisted over the target path only once it
//!    is complete. A failed write leaves the previous file untouched, and a
//!    chromatogram whose scans are proxies into the target can be written
//!    back over it.
//!
//! 2. **Seekable Scans**: The version marker and the scans stream are always
//!    Stored so that scan proxies can address records by offset. Every other
//!    stream follows the configured [`CompressionType`].

mod config;
mod error;
mod stats;

#[cfg(test)]
mod tests;

use std::fs;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub use config::{CompressionType, WriterConfig};
pub use error::EncodeError;
pub use stats::WriteSummary;

use crate::container::EntryStorage;
use crate::format::{EncodedContainer, FormatRegistry};
use crate::model::Chromatogram;

/// Writes chromatograms as containers
#[derive(Debug, Clone)]
pub struct ContainerWriter<'a> {
    config: WriterConfig,
    registry: &'a FormatRegistry,
}

impl ContainerWriter<'static> {
    /// Writer using the global format registry
    pub fn new(config: WriterConfig) -> Self {
        Self::with_registry(config, FormatRegistry::global())
    }
}

impl<'a> ContainerWriter<'a> {
    /// Writer resolving versions in `registry`
    pub fn with_registry(config: WriterConfig, registry: &'a FormatRegistry) -> Self {
        Self { config, registry }
    }

    /// Writer configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Encode every stream of `chromatogram`
    pub fn encode(&self, chromatogram: &Chromatogram) -> Result<EncodedContainer, EncodeError> {
        self.registry.encode(chromatogram, &self.config.version)
    }

    /// Write `chromatogram` to `path`, replacing any existing file atomically
    pub fn write<P: AsRef<Path>>(&self, path: P, chromatogram: &Chromatogram) -> Result<WriteSummary, EncodeError> {
        let path = path.as_ref();
        // Encoding resolves proxies, which may point into `path` itself
        let encoded = self.encode(chromatogram)?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp_file = NamedTempFile::new_in(directory)?;
        let writer = BufWriter::new(temp_file.reopen()?);
        let writer = write_entries(writer, &encoded, self.config.compression)?;
        writer.into_inner().map_err(|e| {
            EncodeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to flush ZIP buffer: {}", e.error()),
            ))
        })?;
        temp_file
            .persist(path)
            .map_err(|e| EncodeError::Io(e.error))?;

        let summary = WriteSummary {
            version: self.config.version.clone(),
            entries: encoded.entries().len(),
            scans_written: chromatogram.number_of_scans(),
            peaks_written: chromatogram.peaks.len(),
            stream_bytes: encoded.total_bytes(),
            file_size_bytes: fs::metadata(path)?.len(),
        };
        info!("{} to {}", summary, path.display());
        Ok(summary)
    }

    /// Encode `chromatogram` into an in-memory container
    pub fn write_to_vec(&self, chromatogram: &Chromatogram) -> Result<Vec<u8>, EncodeError> {
        let encoded = self.encode(chromatogram)?;
        let cursor = write_entries(Cursor::new(Vec::new()), &encoded, self.config.compression)?;
        Ok(cursor.into_inner())
    }
}

/// Write `encoded` as ZIP entries into `sink` and return the sink
pub fn write_entries<W: Write + Seek>(
    sink: W,
    encoded: &EncodedContainer,
    compression: CompressionType,
) -> Result<W, EncodeError> {
    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let compressed = compression.options();

    let mut zip = ZipWriter::new(sink);
    for entry in encoded.entries() {
        let options = match entry.storage {
            EntryStorage::Stored => stored,
            EntryStorage::Deflated => compressed,
        };
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.bytes)?;
    }
    Ok(zip.finish()?)
}
