//! Entry names and storage of the container streams

/// Entry holding the version marker string; always the first entry
pub const VERSION: &str = "VERSION";

/// Acquisition method
pub const METHOD: &str = "msd/method";

/// Full scan records
pub const SCANS: &str = "msd/scans";

/// Scan summaries with offsets into [`SCANS`]
pub const SCAN_PROXIES: &str = "msd/scanproxies";

/// Total ion chromatogram overview
pub const TIC: &str = "msd/tic";

/// Baseline anchors
pub const BASELINE: &str = "msd/baseline";

/// Detected peaks
pub const PEAKS: &str = "msd/peaks";

/// Chromatogram and background integration results
pub const AREA: &str = "msd/area";

/// Chromatogram-level identification targets
pub const IDENTIFICATION: &str = "msd/identification";

/// Edit history
pub const HISTORY: &str = "msd/history";

/// Date, operator and free-text metadata
pub const MISC: &str = "msd/misc";

/// How an entry's bytes are stored in the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStorage {
    /// Uncompressed; the entry's bytes can be addressed directly in the file
    Stored,
    /// Deflate-compressed
    Deflated,
}
