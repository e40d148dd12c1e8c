/// Errors raised while reading or writing primitive values
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes remained than the primitive requires
    #[error("stream truncated at byte {position}: {wanted} more bytes required")]
    Truncated {
        /// Position (relative to the start of the stream) where the read began
        position: u64,
        /// Number of bytes that could not be read
        wanted: usize,
    },

    /// A length or count prefix was negative
    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    /// String payload was not valid UTF-8
    #[error("invalid UTF-8 string: {0}")]
    InvalidString(#[from] std::string::FromUtf8Error),

    /// A length or count does not fit the 4-byte prefix
    #[error("length {0} does not fit a 4-byte prefix")]
    LengthOverflow(usize),

    /// A decoded value is outside its domain (unknown enum name, bad timestamp)
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Underlying I/O failure other than end of input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// True if the error means the input ended early
    pub fn is_truncation(&self) -> bool {
        matches!(self, CodecError::Truncated { .. })
    }
}
