use std::path::Path;

use anyhow::Result;

use crate::container::{names, Container};
use crate::format::records::RecordContext;
use crate::format::{streams, ChromatogramFormat, FormatRegistry};
use crate::model::{
    BaselineModel, Chromatogram, ChromatogramOverview, IonTransitionSettings, PeakIntensityValues, ScanStore,
};
use crate::reader::ReaderConfig;

use super::{CheckCategory, ValidationCheck, ValidationReport};

const CATEGORY: CheckCategory = CheckCategory::Semantics;

/// Step 3: consistency of the decoded chromatogram
pub(crate) fn check_semantics(
    path: &Path,
    registry: &FormatRegistry,
    format: &dyn ChromatogramFormat,
    container: &mut Container,
    chromatogram: &Chromatogram,
    overview: &ChromatogramOverview,
    report: &mut ValidationReport,
) -> Result<()> {
    check_retention_order(chromatogram, report);
    check_tic(chromatogram, overview, report);
    check_baseline(&chromatogram.baseline, report);
    check_stored_peak_curves(format, container, report)?;
    if container.contains(names::SCAN_PROXIES) {
        check_scan_proxies(path, registry, container, chromatogram, report)?;
    }
    Ok(())
}

fn check_retention_order(chromatogram: &Chromatogram, report: &mut ValidationReport) {
    let retention_times = chromatogram.scans.retention_times();
    match retention_times.windows(2).position(|w| w[1] < w[0]) {
        None => report.add_check(ValidationCheck::ok(CATEGORY, "Scan retention times ascending")),
        Some(index) => report.add_check(ValidationCheck::warning(
            CATEGORY,
            "Scan retention times ascending",
            format!(
                "scan {} at {} ms follows {} ms",
                index + 1,
                retention_times[index + 1],
                retention_times[index]
            ),
        )),
    }
}

fn check_tic(chromatogram: &Chromatogram, overview: &ChromatogramOverview, report: &mut ValidationReport) {
    let expected = chromatogram.overview();
    if expected.len() != overview.len() {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "TIC matches scans",
            format!("{} TIC points for {} scans", overview.len(), expected.len()),
        ));
        return;
    }
    let mismatch = expected
        .points
        .iter()
        .zip(&overview.points)
        .position(|(scan, tic)| scan.0 != tic.0 || scan.1.to_bits() != tic.1.to_bits());
    match mismatch {
        None => report.add_check(ValidationCheck::ok(CATEGORY, "TIC matches scans")),
        Some(index) => report.add_check(ValidationCheck::failed(
            CATEGORY,
            "TIC matches scans",
            format!(
                "point {} is {:?}, scan gives {:?}",
                index, overview.points[index], expected.points[index]
            ),
        )),
    }
}

fn check_baseline(baseline: &BaselineModel, report: &mut ValidationReport) {
    if !baseline.is_contiguous() {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "Baseline contiguous",
            "segments do not share endpoints",
        ));
        return;
    }
    let reversed = baseline
        .segments()
        .iter()
        .filter(|s| s.stop_retention_time <= s.start_retention_time)
        .count();
    if reversed == 0 {
        report.add_check(ValidationCheck::ok(
            CATEGORY,
            format!("Baseline contiguous ({} segments)", baseline.len()),
        ));
    } else {
        report.add_check(ValidationCheck::warning(
            CATEGORY,
            "Baseline contiguous",
            format!("{} segments are empty or reversed", reversed),
        ));
    }
}

/// Decoding rescales every curve, so only the stored profiles show whether
/// the writer normalized them
fn check_stored_peak_curves(
    format: &dyn ChromatogramFormat,
    container: &mut Container,
    report: &mut ValidationReport,
) -> Result<()> {
    let Some(layout) = format.layout() else {
        return Ok(());
    };
    let transitions = IonTransitionSettings::new();
    let ctx = RecordContext::new(layout, &transitions);
    let curves = match streams::decode_stored_peak_curves(container, &ctx) {
        Ok(curves) => curves,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CATEGORY, "Stored peak curves normalized", e.to_string()));
            return Ok(());
        }
    };
    let unnormalized: Vec<usize> = curves
        .iter()
        .enumerate()
        .filter(|(_, curve)| !curve.is_normalized())
        .map(|(index, _)| index)
        .collect();
    if unnormalized.is_empty() {
        report.add_check(ValidationCheck::ok(
            CATEGORY,
            format!("Stored peak curves normalized ({} peaks)", curves.len()),
        ));
    } else {
        report.add_check(ValidationCheck::warning(
            CATEGORY,
            "Stored peak curves normalized",
            format!(
                "peaks {:?} are not stored with a maximum of {}; readers rescale them",
                unnormalized,
                PeakIntensityValues::NORMALIZATION_CEILING
            ),
        ));
    }
    Ok(())
}

fn check_scan_proxies(
    path: &Path,
    registry: &FormatRegistry,
    container: &mut Container,
    chromatogram: &Chromatogram,
    report: &mut ValidationReport,
) -> Result<()> {
    let scans_size = container.entry_size(names::SCANS)?;
    let config = ReaderConfig::default().with_scan_proxies(true);
    let proxied = match registry.read_with_config(path, &config) {
        Ok(proxied) => proxied,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CATEGORY, "Scan proxies decode", e.to_string()));
            return Ok(());
        }
    };
    let ScanStore::Proxied(proxies) = &proxied.scans else {
        report.add_check(ValidationCheck::warning(
            CATEGORY,
            "Scan proxies decode",
            "format decoded scans eagerly",
        ));
        return Ok(());
    };

    if proxies.len() != chromatogram.number_of_scans() {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "Scan proxies match scans",
            format!("{} proxies for {} scans", proxies.len(), chromatogram.number_of_scans()),
        ));
        return Ok(());
    }

    let out_of_range = proxies.iter().filter(|p| p.offset >= scans_size).count();
    if out_of_range > 0 {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "Scan proxy offsets within scans stream",
            format!("{} offsets at or beyond {} bytes", out_of_range, scans_size),
        ));
        return Ok(());
    }
    report.add_check(ValidationCheck::ok(CATEGORY, "Scan proxy offsets within scans stream"));

    let resolved = match proxied.scans.materialize() {
        Ok(resolved) => resolved,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CATEGORY, "Scan proxies resolve", e.to_string()));
            return Ok(());
        }
    };
    let eager = chromatogram.scans.materialize()?;
    match resolved.iter().zip(&eager).position(|(a, b)| a != b) {
        None => report.add_check(ValidationCheck::ok(CATEGORY, "Scan proxies resolve to stored scans")),
        Some(index) => report.add_check(ValidationCheck::failed(
            CATEGORY,
            "Scan proxies resolve to stored scans",
            format!("proxy {} resolves to a different scan", index),
        )),
    }
    Ok(())
}
