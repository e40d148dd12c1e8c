//! # chromstore
//!
//! A command-line tool for inspecting, validating, exporting and converting
//! native chromatogram containers.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a container
//! chromstore info run.chrom
//!
//! # Check structure and semantics
//! chromstore validate run.chrom
//!
//! # Re-write in the legacy version
//! chromstore convert run.chrom run-legacy.chrom --to 1.0.0.9
//!
//! # Generate demo data
//! chromstore demo demo_gcms_run.chrom
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
