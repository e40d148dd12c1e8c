use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use chromstore::export::json;

/// Print the TIC overview of a container
pub fn run(file: PathBuf, as_json: bool) -> Result<()> {
    let overview = chromstore::read_overview(&file)
        .with_context(|| format!("Failed to read overview of {}", file.display()))?;
    info!("{} TIC points", overview.len());

    if as_json {
        json::write_overview(std::io::stdout().lock(), &overview)?;
        println!();
        return Ok(());
    }

    println!("{:>12}  {:>14}", "RT (min)", "TIC");
    for (retention_time, signal) in &overview.points {
        println!("{:>12.4}  {:>14.1}", f64::from(*retention_time) / 60_000.0, signal);
    }
    if let Some((retention_time, signal)) = overview.max_signal() {
        println!();
        println!(
            "Maximum: {:.1} at {:.4} min",
            signal,
            f64::from(retention_time) / 60_000.0
        );
    }
    Ok(())
}
