use std::path::PathBuf;

use crate::codec::CodecError;

/// Errors that can occur while reading a container
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a ZIP archive
    #[error("Not a chromatogram container: {0}")]
    NotAContainer(#[source] zip::result::ZipError),

    /// A mandatory stream is absent
    #[error("Missing stream: {0}")]
    MissingStream(String),

    /// The version marker names no registered format
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    /// A stream ended before a record was complete
    #[error("Truncated stream '{stream}': {source}")]
    TruncatedStream {
        /// Entry name of the stream
        stream: String,
        /// Primitive-level failure
        #[source]
        source: CodecError,
    },

    /// A stream holds bytes that do not form valid records
    #[error("Corrupt stream '{stream}': {reason}")]
    CorruptStream {
        /// Entry name of the stream
        stream: String,
        /// What was wrong
        reason: String,
    },

    /// A scan proxy could not be turned back into a scan
    #[error("Cannot resolve scan at offset {offset} in {}: {source}", path.display())]
    ProxyResolution {
        /// Archive the proxy points into
        path: PathBuf,
        /// Offset inside the scans stream
        offset: u64,
        /// Underlying failure
        #[source]
        source: Box<DecodeError>,
    },

    /// A stream was requested before the version marker was read
    #[error("Version marker must be read before any other stream")]
    VersionNotValidated,
}

impl DecodeError {
    /// Attribute a primitive failure to `stream`
    ///
    /// Short reads become [`DecodeError::TruncatedStream`], everything else
    /// [`DecodeError::CorruptStream`].
    pub fn in_stream(stream: &str, error: CodecError) -> Self {
        if error.is_truncation() {
            DecodeError::TruncatedStream {
                stream: stream.to_string(),
                source: error,
            }
        } else {
            DecodeError::CorruptStream {
                stream: stream.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// Corruption of `stream` with a free-form reason
    pub fn corrupt(stream: &str, reason: impl Into<String>) -> Self {
        DecodeError::CorruptStream {
            stream: stream.to_string(),
            reason: reason.into(),
        }
    }
}
