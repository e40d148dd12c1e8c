use anyhow::{Context, Result};
use std::path::PathBuf;

use chromstore::container::Container;
use chromstore::format::FormatRegistry;

use super::Config;

/// Display information about a container
pub fn run(file: PathBuf, config: &Config) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut container = Container::open(&file).context("Failed to open container")?;
    let version = container
        .read_version_marker()
        .context("Failed to read version marker")?;

    println!("Chromatogram Container Information");
    println!("==================================");
    println!("File: {}", file.display());
    println!("Version: {}", version);
    println!();

    println!("Entries:");
    for name in container.entry_names() {
        let size = container.entry_size(&name)?;
        let storage = container.entry_storage(&name)?;
        println!("  {:<22} {:>12} bytes  {:?}", name, size, storage);
    }
    println!();

    let registry = FormatRegistry::global();
    let chromatogram = registry
        .read_with_config(&file, &config.reader_config())
        .context("Failed to decode container")?;

    println!("Run:");
    println!("  Data name: {}", chromatogram.data_name);
    println!("  Operator: {}", chromatogram.operator);
    println!("  Date: {}", chromatogram.date.to_rfc3339());
    println!("  Instrument: {}", chromatogram.method.instrument_name);
    println!();

    println!("Scans:");
    println!("  Count: {}", chromatogram.number_of_scans());
    println!(
        "  Retention time: {:.3} - {:.3} min",
        f64::from(chromatogram.start_retention_time()) / 60_000.0,
        f64::from(chromatogram.stop_retention_time()) / 60_000.0
    );
    println!("  Scan delay: {} ms", chromatogram.scan_delay());
    println!("  Scan interval: {} ms", chromatogram.scan_interval());
    if chromatogram.scans.is_proxied() {
        println!("  Held as proxies");
    }
    println!();

    println!("Peaks: {}", chromatogram.peaks.len());
    println!("Baseline segments: {}", chromatogram.baseline.len());
    println!("Chromatogram area: {:.3}", chromatogram.chromatogram_area.total());
    if let Some(target) = chromatogram.best_target() {
        println!(
            "Best identification: {} ({:.1})",
            target.library.name, target.comparison.match_factor
        );
    }
    println!("Edits: {}", chromatogram.edit_history.len());

    Ok(())
}
