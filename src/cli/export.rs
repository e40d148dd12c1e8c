use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chromstore::export::{csv, json};
use chromstore::format::FormatRegistry;
use chromstore::model::Chromatogram;

use super::Config;

fn read(file: &Path, config: &Config) -> Result<Chromatogram> {
    FormatRegistry::global()
        .read_with_config(file, &config.reader_config())
        .with_context(|| format!("Failed to read {}", file.display()))
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    })
}

/// Export the peak table as CSV
pub fn run_peaks(file: PathBuf, output: Option<PathBuf>, config: &Config) -> Result<()> {
    let chromatogram = read(&file, config)?;
    let sink = open_output(output.as_deref())?;
    csv::write_peaks(sink, &chromatogram.peaks).context("Failed to write CSV")?;
    info!("Exported {} peaks", chromatogram.peaks.len());
    Ok(())
}

/// Export the whole chromatogram as JSON
pub fn run_json(file: PathBuf, output: Option<PathBuf>, pretty: bool, config: &Config) -> Result<()> {
    let chromatogram = read(&file, config)?;
    let mut sink = open_output(output.as_deref())?;
    json::write_chromatogram(&mut sink, &chromatogram, pretty).context("Failed to write JSON")?;
    writeln!(sink)?;
    sink.flush()?;
    info!("Exported {} scans", chromatogram.number_of_scans());
    Ok(())
}
