//! TOML configuration file support.
//!
//! Reader and writer settings can be kept in a config file instead of being
//! passed as flags:
//!
//! ```toml
//! # chromstore.toml
//! [reader]
//! use_scan_proxies = true
//! validate_baseline = false
//!
//! [writer]
//! version = "1.1.0.0"
//! compression_level = 9
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use chromstore::reader::ReaderConfig;
use chromstore::writer::{CompressionType, WriterConfig};

use super::Profile;

/// Root configuration structure for chromstore.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings used when decoding containers.
    #[serde(default)]
    pub reader: ReaderSection,

    /// Settings used when writing containers.
    #[serde(default)]
    pub writer: WriterSection,
}

/// `[reader]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ReaderSection {
    /// Keep scans on disk as proxies.
    pub use_scan_proxies: Option<bool>,

    /// Reject unordered baseline anchors.
    pub validate_baseline: Option<bool>,
}

/// `[writer]` table.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// Version tag to write.
    pub version: Option<String>,

    /// Deflate level (0-9) of the compressible streams.
    pub compression_level: Option<i64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Reader settings from the `[reader]` table.
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default()
            .with_scan_proxies(self.reader.use_scan_proxies.unwrap_or(false))
            .with_baseline_validation(self.reader.validate_baseline.unwrap_or(false))
    }

    /// Writer settings: explicit flags first, then the `[writer]` table, then `profile`.
    pub fn writer_config(
        &self,
        version: Option<String>,
        profile: Profile,
        compression_level: Option<i64>,
    ) -> WriterConfig {
        let mut config = WriterConfig::default().with_compression(profile.compression());
        if let Some(level) = compression_level.or(self.writer.compression_level) {
            config = config.with_compression(CompressionType::Deflated(level));
        }
        if let Some(version) = version.or_else(|| self.writer.version.clone()) {
            config = config.with_version(version);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [reader]
            use_scan_proxies = true
            validate_baseline = true

            [writer]
            version = "1.0.0.9"
            compression_level = 9
        "#;

        let config = Config::from_str(toml).unwrap();
        let reader = config.reader_config();
        assert!(reader.use_scan_proxies);
        assert!(reader.validate_baseline);

        let writer = config.writer_config(None, Profile::Fast, None);
        assert_eq!(writer.version, "1.0.0.9");
        assert_eq!(writer.compression, CompressionType::Deflated(9));
    }

    #[test]
    fn test_flags_override_file() {
        let toml = r#"
            [writer]
            version = "1.0.0.9"
            compression_level = 9
        "#;

        let config = Config::from_str(toml).unwrap();
        let writer = config.writer_config(Some("1.1.0.0".to_string()), Profile::Fast, Some(2));
        assert_eq!(writer.version, "1.1.0.0");
        assert_eq!(writer.compression, CompressionType::Deflated(2));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(!config.reader_config().use_scan_proxies);
        let writer = config.writer_config(None, Profile::MaxCompression, None);
        assert_eq!(writer, WriterConfig::max_compression());
    }
}
