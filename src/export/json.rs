//! Whole-chromatogram JSON dump
//!
//! Proxied scans are resolved first so the output always carries full scan
//! records.

use std::io::Write;

use super::ExportError;
use crate::model::{Chromatogram, ChromatogramOverview};

/// Write `chromatogram` as JSON
pub fn write_chromatogram<W: Write>(sink: W, chromatogram: &Chromatogram, pretty: bool) -> Result<(), ExportError> {
    let resolved;
    let chromatogram = if chromatogram.scans.is_proxied() {
        resolved = Chromatogram {
            scans: chromatogram.scans.clone().into_eager()?,
            ..chromatogram.clone()
        };
        &resolved
    } else {
        chromatogram
    };

    if pretty {
        serde_json::to_writer_pretty(sink, chromatogram)?;
    } else {
        serde_json::to_writer(sink, chromatogram)?;
    }
    Ok(())
}

/// Write a TIC overview as JSON
pub fn write_overview<W: Write>(sink: W, overview: &ChromatogramOverview) -> Result<(), ExportError> {
    serde_json::to_writer(sink, overview)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_chromatogram;

    #[test]
    fn test_chromatogram_json_fields() {
        let mut buffer = Vec::new();
        write_chromatogram(&mut buffer, &sample_chromatogram(), false).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("json");

        assert_eq!(value["data_name"], "run-001");
        assert_eq!(value["scans"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["scans"][0]["retention_time"], 1000);
        assert_eq!(value["peaks"][0]["peak_type"], "BB");
        assert_eq!(value["method"]["instrument_name"], "Agilent 5977B");
    }

    #[test]
    fn test_overview_json() {
        let overview = ChromatogramOverview::new(vec![(1000, 300.0), (1500, 342.0)]);
        let mut buffer = Vec::new();
        write_overview(&mut buffer, &overview).expect("write");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), r#"{"points":[[1000,300.0],[1500,342.0]]}"#);
    }
}
