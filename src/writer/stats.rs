use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Version tag written
    pub version: String,
    /// Number of archive entries
    pub entries: usize,
    /// Number of scans written
    pub scans_written: usize,
    /// Number of peaks written
    pub peaks_written: usize,
    /// Uncompressed size of all streams
    pub stream_bytes: usize,
    /// Size of the finished container file
    pub file_size_bytes: u64,
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} container: {} scans, {} peaks, {} entries, {} bytes",
            self.version, self.scans_written, self.peaks_written, self.entries, self.file_size_bytes
        )
    }
}
