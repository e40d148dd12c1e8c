use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use chromstore::format::FormatRegistry;
use chromstore::writer::ContainerWriter;

use super::{Config, Profile};

/// Re-write a container, possibly in another version
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    version: Option<String>,
    profile: Profile,
    compression_level: Option<i64>,
    config: &Config,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    let output = output.unwrap_or_else(|| input.clone());

    let registry = FormatRegistry::global();
    let writer_config = config.writer_config(version, profile, compression_level);
    if !registry.supports(&writer_config.version) {
        anyhow::bail!(
            "Cannot write version '{}'. Registered versions: {}",
            writer_config.version,
            registry.versions().join(", ")
        );
    }

    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Version: {}", writer_config.version);
    info!("Profile: {}", profile);

    let chromatogram = registry
        .read_with_config(&input, &config.reader_config())
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let summary = ContainerWriter::with_registry(writer_config, registry)
        .write(&output, &chromatogram)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", summary);
    Ok(())
}
