use crate::format::V1100;

/// Compression of the deflatable container streams
///
/// The version marker and the scans stream are always Stored so that scan
/// proxies can seek into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// Deflate at the given level (0-9)
    Deflated(i64),
    /// No compression
    Stored,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::balanced()
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Deflated(9)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Deflated(6)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Deflated(1)
    }

    pub(crate) fn options(&self) -> zip::write::SimpleFileOptions {
        let options = zip::write::SimpleFileOptions::default();
        match self {
            CompressionType::Deflated(level) => options
                .compression_method(zip::CompressionMethod::Deflated)
                .compression_level(Some((*level).clamp(0, 9))),
            CompressionType::Stored => {
                options.compression_method(zip::CompressionMethod::Stored)
            }
        }
    }
}

/// Configuration for writing chromatogram containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Version tag of the format to write
    pub version: String,
    /// Compression of the deflatable streams
    pub compression: CompressionType,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            version: V1100.to_string(),
            compression: CompressionType::default(),
        }
    }
}

impl WriterConfig {
    /// Write the given version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Use the given compression
    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self::default().with_compression(CompressionType::max_compression())
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self::default().with_compression(CompressionType::fast())
    }
}
