//! Write profiles for common use cases.
//!
//! Profiles map to the Deflate level of the compressible container streams.
//! The version marker and the scans stream are always stored.

use std::fmt;
use std::str::FromStr;

use chromstore::writer::CompressionType;

/// Write profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over compression (Deflate level 1).
    Fast,

    /// Balance between speed and compression (Deflate level 6, default).
    #[default]
    Balanced,

    /// Maximum compression, slower writes (Deflate level 9).
    MaxCompression,

    /// Every entry stored uncompressed.
    Stored,
}

impl Profile {
    /// Returns the compression for this profile.
    pub fn compression(&self) -> CompressionType {
        match self {
            Profile::Fast => CompressionType::fast(),
            Profile::Balanced => CompressionType::balanced(),
            Profile::MaxCompression => CompressionType::max_compression(),
            Profile::Stored => CompressionType::Stored,
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression", "stored"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
            Profile::Stored => write!(f, "stored"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            "stored" | "none" => Ok(Profile::Stored),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}
