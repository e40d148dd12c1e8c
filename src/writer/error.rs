use crate::codec::CodecError;
use crate::reader::DecodeError;

/// Errors that can occur while writing a container
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the ZIP library
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The chromatogram cannot be represented in the container
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// No format is registered for the requested version
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    /// A proxied scan could not be resolved for re-encoding
    #[error("Scan resolution failed: {0}")]
    ScanResolution(#[from] DecodeError),
}

impl From<CodecError> for EncodeError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Io(e) => EncodeError::Io(e),
            other => EncodeError::InvalidData(other.to_string()),
        }
    }
}
