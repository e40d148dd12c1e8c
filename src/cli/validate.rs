use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate container integrity
pub fn run(file: PathBuf) -> Result<()> {
    use chromstore::validator::validate_container;

    info!("Chromatogram Container Validator");
    info!("File: {}", file.display());

    match validate_container(&file) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
