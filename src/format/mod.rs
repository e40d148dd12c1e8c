//! # Format Registry
//!
//! Each container version is a [`ChromatogramFormat`]: a self-contained
//! decoder/encoder pair keyed by its version tag. The [`FormatRegistry`] reads
//! the version marker of a container and dispatches to the matching format;
//! adding a version means registering one more implementation.
//!
//! ## Registered versions
//!
//! | Tag        | Type          | Notes |
//! |------------|---------------|-------|
//! | `1.1.0.0`  | [`FormatV1100`] | current; scan proxies, additional retention indices, internal standards |
//! | `1.0.0.9`  | [`FormatV1009`] | legacy; none of the above |
//!
//! ```rust,no_run
//! use chromstore::format::FormatRegistry;
//! use chromstore::reader::ReaderConfig;
//!
//! let registry = FormatRegistry::global();
//! let config = ReaderConfig::default().with_scan_proxies(true);
//! let chromatogram = registry.read_with_config("run.chrom", &config)?;
//! println!("{} scans", chromatogram.number_of_scans());
//! # Ok::<(), chromstore::reader::DecodeError>(())
//! ```

pub mod records;
pub mod streams;
mod v1009;
mod v1100;


use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use log::info;

use crate::container::{Container, EntryStorage};
use crate::model::{Chromatogram, ChromatogramOverview};
use crate::reader::{DecodeError, ReaderConfig};
use crate::writer::{ContainerWriter, EncodeError, WriteSummary, WriterConfig};
use records::Layout;

pub use v1009::FormatV1009;
pub use v1100::FormatV1100;

/// Version tag of the current format
pub const V1100: &str = "1.1.0.0";

/// Version tag of the legacy format
pub const V1009: &str = "1.0.0.9";

/// Decoder/encoder pair for one container version
pub trait ChromatogramFormat: Send + Sync {
    /// Version tag this format reads and writes
    fn version(&self) -> &str;

    /// Decode a full chromatogram
    ///
    /// The container's version marker has already been read and matched.
    fn decode(&self, container: &mut Container, config: &ReaderConfig)
        -> Result<Chromatogram, DecodeError>;

    /// Decode only the TIC overview
    fn decode_overview(&self, container: &mut Container) -> Result<ChromatogramOverview, DecodeError>;

    /// Encode every stream of `chromatogram`, version marker first
    fn encode(&self, chromatogram: &Chromatogram) -> Result<EncodedContainer, EncodeError>;

    /// Record layout, for formats built on the shared record codecs
    fn layout(&self) -> Option<Layout> {
        None
    }
}

/// One encoded archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEntry {
    /// Entry name
    pub name: String,
    /// Stream bytes
    pub bytes: Vec<u8>,
    /// Required storage; Deflated entries follow the writer's compression setting
    pub storage: EntryStorage,
}

/// Ordered entries of a container, ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedContainer {
    entries: Vec<EncodedEntry>,
}

impl EncodedContainer {
    /// Empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, name: &str, bytes: Vec<u8>, storage: EntryStorage) {
        self.entries.push(EncodedEntry {
            name: name.to_string(),
            bytes,
            storage,
        });
    }

    /// Entries in write order
    pub fn entries(&self) -> &[EncodedEntry] {
        &self.entries
    }

    /// Entry called `name`
    pub fn get(&self, name: &str) -> Option<&EncodedEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Sum of all entry sizes
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.bytes.len()).sum()
    }
}

/// Version tag → format dispatch table
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn ChromatogramFormat>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

impl FormatRegistry {
    /// Registry without any format
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the current and the legacy format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FormatV1100));
        registry.register(Arc::new(FormatV1009));
        registry
    }

    /// Process-wide registry holding the default formats
    pub fn global() -> &'static FormatRegistry {
        static GLOBAL: OnceLock<FormatRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FormatRegistry::with_defaults)
    }

    /// Register a format under its version tag, returning any format it replaces
    pub fn register(&mut self, format: Arc<dyn ChromatogramFormat>) -> Option<Arc<dyn ChromatogramFormat>> {
        self.formats.insert(format.version().to_string(), format)
    }

    /// Format registered for `version`
    pub fn get(&self, version: &str) -> Option<Arc<dyn ChromatogramFormat>> {
        self.formats.get(version).cloned()
    }

    /// True if `version` is registered
    pub fn supports(&self, version: &str) -> bool {
        self.formats.contains_key(version)
    }

    /// Registered version tags, sorted
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        versions.sort_unstable();
        versions
    }

    /// Read the version marker of `container` and return the matching format
    ///
    /// Unknown markers fail before any other stream is touched.
    pub fn resolve(&self, container: &mut Container) -> Result<Arc<dyn ChromatogramFormat>, DecodeError> {
        let version = container.read_version_marker()?;
        self.get(&version)
            .ok_or(DecodeError::UnsupportedVersion(version))
    }

    /// Decode an opened container
    pub fn decode(&self, container: &mut Container, config: &ReaderConfig) -> Result<Chromatogram, DecodeError> {
        let format = self.resolve(container)?;
        format.decode(container, config)
    }

    /// Read the container at `path` with default settings
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Chromatogram, DecodeError> {
        self.read_with_config(path, &ReaderConfig::default())
    }

    /// Read the container at `path`
    pub fn read_with_config<P: AsRef<Path>>(
        &self,
        path: P,
        config: &ReaderConfig,
    ) -> Result<Chromatogram, DecodeError> {
        let path = path.as_ref();
        let mut container = Container::open(path)?;
        let chromatogram = self.decode(&mut container, config)?;
        container.close();
        info!(
            "Read {} ({} scans, {} peaks)",
            path.display(),
            chromatogram.number_of_scans(),
            chromatogram.peaks.len()
        );
        Ok(chromatogram)
    }

    /// Decode a container held in memory
    pub fn read_bytes(&self, bytes: Vec<u8>, config: &ReaderConfig) -> Result<Chromatogram, DecodeError> {
        let mut container = Container::from_bytes(bytes)?;
        self.decode(&mut container, config)
    }

    /// Read only the TIC overview of the container at `path`
    pub fn read_overview<P: AsRef<Path>>(&self, path: P) -> Result<ChromatogramOverview, DecodeError> {
        let mut container = Container::open(path)?;
        let format = self.resolve(&mut container)?;
        format.decode_overview(&mut container)
    }

    /// Encode `chromatogram` in `version`
    pub fn encode(&self, chromatogram: &Chromatogram, version: &str) -> Result<EncodedContainer, EncodeError> {
        let format = self
            .get(version)
            .ok_or_else(|| EncodeError::UnsupportedVersion(version.to_string()))?;
        format.encode(chromatogram)
    }

    /// Write `chromatogram` to `path` in the current version
    pub fn write<P: AsRef<Path>>(&self, path: P, chromatogram: &Chromatogram) -> Result<WriteSummary, EncodeError> {
        self.write_with_config(path, chromatogram, &WriterConfig::default())
    }

    /// Write `chromatogram` to `path`
    pub fn write_with_config<P: AsRef<Path>>(
        &self,
        path: P,
        chromatogram: &Chromatogram,
        config: &WriterConfig,
    ) -> Result<WriteSummary, EncodeError> {
        ContainerWriter::with_registry(config.clone(), self).write(path, chromatogram)
    }
}
