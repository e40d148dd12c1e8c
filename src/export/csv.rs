//! Peak table as CSV
//!
//! One row per peak in the nine-column peak exchange layout. Ions and the
//! intensity curve are packed into single cells as space-separated
//! `key:value` pairs. Peaks carry no relative retention time or noise
//! estimate, so `RRT (min)` is written as `0.000` and `S/N` as `-`.

use std::io::{Read, Write};

use super::ExportError;
use crate::model::{IntegrationEntry, Ion, Peak, PeakIntensityValues, Scan};

/// Column headers, in order
pub const HEADERS: [&str; 9] = [
    "Name",
    "RT (min)",
    "RRT (min)",
    "RI",
    "Area",
    "S/N",
    "CAS",
    "m/z",
    "intensities",
];

const MILLISECONDS_PER_MINUTE: f64 = 60_000.0;
const VALUE_SEPARATOR: char = ':';
const RECORD_SEPARATOR: char = ' ';
const UNKNOWN_RELATIVE_RETENTION_TIME: &str = "0.000";
const UNKNOWN_SIGNAL_TO_NOISE: &str = "-";

/// Write `peaks` as a CSV table with a header row
pub fn write_peaks<W: Write>(sink: W, peaks: &[Peak]) -> Result<(), ExportError> {
    let mut writer = ::csv::Writer::from_writer(sink);
    writer.write_record(HEADERS)?;
    for peak in peaks {
        let target = peak.best_target();
        let minutes = f64::from(peak.retention_time_at_maximum()) / MILLISECONDS_PER_MINUTE;
        writer.write_record([
            target.map(|t| t.library.name.as_str()).unwrap_or_default().to_string(),
            format!("{:.3}", minutes),
            UNKNOWN_RELATIVE_RETENTION_TIME.to_string(),
            format!("{:.3}", peak.peak_maximum.retention_index),
            format!("{:.3}", peak.integrated_area()),
            UNKNOWN_SIGNAL_TO_NOISE.to_string(),
            target.map(|t| t.library.cas_number.as_str()).unwrap_or_default().to_string(),
            format_ions(&peak.peak_maximum.ions),
            format_intensities(&peak.intensity_values),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a peak table written by [`write_peaks`]
///
/// Names, CAS numbers and S/N are not restored; RRT must parse but is
/// dropped. Every peak gets a single integration entry holding its area,
/// and its curve is normalized.
pub fn read_peaks<R: Read>(source: R) -> Result<Vec<Peak>, ExportError> {
    let mut reader = ::csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADERS.iter().copied()) {
        return Err(ExportError::InvalidTable(format!(
            "unexpected header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut peaks = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or_default();

        let minutes: f64 = parse(field(1), row, "RT (min)")?;
        let mut maximum = Scan::new((minutes * MILLISECONDS_PER_MINUTE).round() as i32);
        parse::<f64>(field(2), row, "RRT (min)")?;
        maximum.retention_index = parse(field(3), row, "RI")?;
        maximum.ions = parse_pairs::<f64, f32>(field(7), row, "m/z")?
            .into_iter()
            .map(|(mz, abundance)| Ion::new(mz, abundance))
            .collect();

        let mut intensity_values: PeakIntensityValues = parse_pairs::<i32, f32>(field(8), row, "intensities")?
            .into_iter()
            .collect();
        intensity_values.normalize();

        let mut peak = Peak::new(maximum, intensity_values);
        peak.integration_entries
            .push(IntegrationEntry::new(0.0, parse(field(4), row, "Area")?));
        peaks.push(peak);
    }
    Ok(peaks)
}

fn format_ions(ions: &[Ion]) -> String {
    join_pairs(ions.iter().map(|ion| format!("{}{}{}", ion.mz, VALUE_SEPARATOR, ion.abundance)))
}

fn format_intensities(values: &PeakIntensityValues) -> String {
    join_pairs(values.iter().map(|(rt, v)| format!("{}{}{}", rt, VALUE_SEPARATOR, v)))
}

fn join_pairs(pairs: impl Iterator<Item = String>) -> String {
    pairs.collect::<Vec<_>>().join(&RECORD_SEPARATOR.to_string())
}

fn parse<T: std::str::FromStr>(cell: &str, row: usize, column: &str) -> Result<T, ExportError> {
    cell.trim().parse().map_err(|_| {
        ExportError::InvalidTable(format!("row {}: cannot parse {} value '{}'", row + 1, column, cell))
    })
}

fn parse_pairs<K, V>(cell: &str, row: usize, column: &str) -> Result<Vec<(K, V)>, ExportError>
where
    K: std::str::FromStr,
    V: std::str::FromStr,
{
    cell.split(RECORD_SEPARATOR)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once(VALUE_SEPARATOR).ok_or_else(|| {
                ExportError::InvalidTable(format!("row {}: malformed {} pair '{}'", row + 1, column, pair))
            })?;
            Ok((parse(key, row, column)?, parse(value, row, column)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComparisonResult, IdentificationTarget, LibraryInformation};

    fn toluene_peak() -> Peak {
        let maximum = Scan::new(90_000).with_ion(91.0, 1000.0).with_ion(92.0, 600.5);
        let curve: PeakIntensityValues = [(89_000, 0.0), (90_000, 1000.0), (91_000, 250.0)]
            .into_iter()
            .collect();
        let mut peak = Peak::new(maximum, curve);
        peak.peak_maximum.retention_index = 763.25;
        peak.integration_entries.push(IntegrationEntry::new(0.0, 4321.5));

        let mut library = LibraryInformation::new("Toluene");
        library.cas_number = "108-88-3".to_string();
        let scores = ComparisonResult {
            match_factor: 92.0,
            ..Default::default()
        };
        peak.targets.push(IdentificationTarget::new("NIST", library, scores));
        peak
    }

    fn written_rows(peaks: &[Peak]) -> Vec<Vec<String>> {
        let mut buffer = Vec::new();
        write_peaks(&mut buffer, peaks).expect("write");
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(buffer.as_slice())
            .records()
            .map(|r| r.expect("record").iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_write_peak_row() {
        let rows = written_rows(&[toluene_peak()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], HEADERS.to_vec());
        assert_eq!(
            rows[1],
            vec![
                "Toluene",
                "1.500",
                "0.000",
                "763.250",
                "4321.500",
                "-",
                "108-88-3",
                "91:1000 92:600.5",
                "89000:0 90000:1000 91000:250",
            ]
        );
    }

    #[test]
    fn test_unidentified_peak_has_empty_name() {
        let mut peak = toluene_peak();
        peak.targets.clear();
        let rows = written_rows(&[peak]);
        assert_eq!(rows[1][0], "");
        assert_eq!(rows[1][6], "");
        assert_eq!(rows[1][1], "1.500");
    }

    #[test]
    fn test_read_back_written_table() {
        let original = toluene_peak();
        let mut buffer = Vec::new();
        write_peaks(&mut buffer, std::slice::from_ref(&original)).expect("write");

        let peaks = read_peaks(buffer.as_slice()).expect("read");
        assert_eq!(peaks.len(), 1);
        let peak = &peaks[0];
        assert_eq!(peak.retention_time_at_maximum(), 90_000);
        assert_eq!(peak.peak_maximum.ions, original.peak_maximum.ions);
        assert_eq!(peak.intensity_values, original.intensity_values);
        assert_eq!(peak.integrated_area(), 4321.5);
    }

    #[test]
    fn test_read_exchange_table() {
        let table = "Name,RT (min),RRT (min),RI,Area,S/N,CAS,m/z,intensities\n\
                     Benzene,2.250,0.875,655.000,1200.000,48.2,71-43-2,78:999 77:210,134000:0 135000:500\n";
        let peaks = read_peaks(table.as_bytes()).expect("read");
        assert_eq!(peaks.len(), 1);
        let peak = &peaks[0];
        assert_eq!(peak.retention_time_at_maximum(), 135_000);
        assert_eq!(peak.peak_maximum.retention_index, 655.0);
        assert_eq!(peak.integrated_area(), 1200.0);
        assert_eq!(peak.peak_maximum.ions.len(), 2);
        assert_eq!(peak.intensity_values.get(135_000), Some(1000.0));
    }

    #[test]
    fn test_read_rejects_bad_relative_retention_time() {
        let table = "Name,RT (min),RRT (min),RI,Area,S/N,CAS,m/z,intensities\n\
                     ,1.000,later,0,0,-,,,\n";
        assert!(matches!(read_peaks(table.as_bytes()), Err(ExportError::InvalidTable(_))));
    }

    #[test]
    fn test_read_rejects_seven_column_header() {
        let table = "Name,RT (min),RI,Area,CAS,m/z,intensities\n,1.000,0,0,,,\n";
        assert!(matches!(read_peaks(table.as_bytes()), Err(ExportError::InvalidTable(_))));
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let table = "Name,RT\nfoo,1.0\n";
        assert!(matches!(read_peaks(table.as_bytes()), Err(ExportError::InvalidTable(_))));
    }
}
