//! # Scan Proxies
//!
//! A [`ScanProxy`] carries the summary fields of one scan plus the offset of
//! its full record inside the container's scans stream. Resolving a proxy
//! reopens the archive, seeks straight to that record and decodes it, so a
//! chromatogram can be listed and plotted without holding every ion in
//! memory.
//!
//! Resolution opens its own file handle each time and caches nothing. Proxies
//! are `Send + Sync`; many can be resolved from different threads at once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::codec::ByteReader;
use crate::container::StoredEntry;
use crate::format::records::{self, Layout, RecordContext};
use crate::model::{IonTransitionSettings, Scan};
use crate::reader::DecodeError;

/// Where the full records of a set of proxies live
#[derive(Debug)]
pub struct ProxySource {
    path: PathBuf,
    stream_name: String,
    layout: Layout,
    transitions: Arc<IonTransitionSettings>,
}

impl ProxySource {
    /// Source for proxies pointing into `stream_name` of the archive at `path`
    pub fn new(
        path: impl Into<PathBuf>,
        stream_name: impl Into<String>,
        layout: Layout,
        transitions: Arc<IonTransitionSettings>,
    ) -> Self {
        Self {
            path: path.into(),
            stream_name: stream_name.into(),
            layout,
            transitions,
        }
    }

    /// Archive file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry holding the scan records
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Record layout of the container version
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Registry resolved transitions are interned into
    pub fn transitions(&self) -> &Arc<IonTransitionSettings> {
        &self.transitions
    }
}

// The registry is decoding context and does not take part in equality
impl PartialEq for ProxySource {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.stream_name == other.stream_name
            && self.layout == other.layout
    }
}

/// Summary of a scan whose full record stays on disk until resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanProxy {
    /// Byte offset of the record inside the scans stream
    pub offset: u64,
    /// Retention time in milliseconds
    pub retention_time: i32,
    /// Number of ions in the full record
    pub number_of_ions: i32,
    /// Total signal of the full record
    pub total_signal: f32,
    /// Primary retention index
    pub retention_index: f32,
    /// Time segment id
    pub time_segment_id: i32,
    /// Cycle number
    pub cycle_number: i32,
    #[serde(skip)]
    source: Arc<ProxySource>,
}

impl ScanProxy {
    /// Proxy for the record at `offset`; summary fields start zeroed
    pub fn new(offset: u64, source: Arc<ProxySource>) -> Self {
        Self {
            offset,
            retention_time: 0,
            number_of_ions: 0,
            total_signal: 0.0,
            retention_index: 0.0,
            time_segment_id: 1,
            cycle_number: 1,
            source,
        }
    }

    /// Shared source description
    pub fn source(&self) -> &Arc<ProxySource> {
        &self.source
    }

    /// Decode the full scan this proxy points at
    ///
    /// # Errors
    /// Any failure, from a moved file to a truncated record, is reported as
    /// [`DecodeError::ProxyResolution`] wrapping the underlying error.
    pub fn resolve(&self) -> Result<Scan, DecodeError> {
        self.read_record().map_err(|source| DecodeError::ProxyResolution {
            path: self.source.path.clone(),
            offset: self.offset,
            source: Box::new(source),
        })
    }

    fn read_record(&self) -> Result<Scan, DecodeError> {
        let source = &self.source;
        let entry = StoredEntry::locate(&source.path, &source.stream_name)?;
        let mut reader = ByteReader::new(entry.open_at(self.offset)?);
        let context = RecordContext::new(source.layout, &source.transitions);
        let scan = records::read_scan(&mut reader, &context)
            .map_err(|e| DecodeError::in_stream(&source.stream_name, e))?;
        self.check_summary(&scan)?;
        Ok(scan)
    }

    /// The record at `offset` must be the scan this proxy summarizes
    fn check_summary(&self, scan: &Scan) -> Result<(), DecodeError> {
        let matches = scan.retention_time == self.retention_time
            && scan.ion_count() as i64 == i64::from(self.number_of_ions)
            && scan.time_segment_id == self.time_segment_id
            && scan.cycle_number == self.cycle_number;
        if matches {
            return Ok(());
        }
        Err(DecodeError::corrupt(
            &self.source.stream_name,
            format!(
                "record at offset {} (RT {} ms, {} ions) does not match its summary (RT {} ms, {} ions)",
                self.offset,
                scan.retention_time,
                scan.ion_count(),
                self.retention_time,
                self.number_of_ions
            ),
        ))
    }
}
