use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::path::PathBuf;

use chromstore::model::{
    BaselineModel, Chromatogram, ComparisonResult, EditInformation, IdentificationTarget,
    IntegratedArea, IntegrationEntry, Ion, LibraryInformation, Method, Peak, PeakIntensityValues,
    PeakType, Scan, ScanStore,
};
use chromstore::writer::ContainerWriter;

use super::{Config, Profile};

const SCAN_INTERVAL_MS: i32 = 250;
const SOLVENT_DELAY_MS: i32 = 180_000;
const BASELINE_ANCHOR_EVERY: usize = 240;

/// A synthetic analyte: name, CAS number, apex (fraction of the run), width in scans, height and spectrum
struct Compound {
    name: &'static str,
    cas: &'static str,
    apex: f64,
    width: f64,
    height: f64,
    spectrum: &'static [(f64, f64)],
}

const COMPOUNDS: [Compound; 3] = [
    Compound {
        name: "Benzene",
        cas: "71-43-2",
        apex: 0.2,
        width: 6.0,
        height: 80_000.0,
        spectrum: &[(78.0, 1.0), (77.0, 0.25), (51.0, 0.18), (52.0, 0.16)],
    },
    Compound {
        name: "Toluene",
        cas: "108-88-3",
        apex: 0.45,
        width: 8.0,
        height: 120_000.0,
        spectrum: &[(91.0, 1.0), (92.0, 0.62), (65.0, 0.09), (39.0, 0.05)],
    },
    Compound {
        name: "p-Xylene",
        cas: "106-42-3",
        apex: 0.7,
        width: 10.0,
        height: 60_000.0,
        spectrum: &[(91.0, 1.0), (106.0, 0.62), (105.0, 0.3), (77.0, 0.12)],
    },
];

/// Synthesize a GC-MS run and write it
pub fn run(
    output: PathBuf,
    version: Option<String>,
    profile: Profile,
    scans: usize,
    config: &Config,
) -> Result<()> {
    info!("Synthesizing {} scans", scans);
    let chromatogram = synthesize(scans);

    let writer_config = config.writer_config(version, profile, None);
    info!("Writing {} container: {}", writer_config.version, output.display());
    let summary = ContainerWriter::new(writer_config)
        .write(&output, &chromatogram)
        .context("Failed to write demo container")?;

    println!("{}", summary);
    Ok(())
}

fn background(index: usize) -> f64 {
    500.0 + index as f64 * 0.2
}

fn elution(compound: &Compound, index: usize, scans: usize) -> f64 {
    let apex = compound.apex * scans as f64;
    let z = (index as f64 - apex) / compound.width;
    compound.height * (-0.5 * z * z).exp()
}

fn retention_time(index: usize) -> i32 {
    SOLVENT_DELAY_MS + index as i32 * SCAN_INTERVAL_MS
}

/// Build a run of `scans` scans with three eluting compounds on a rising baseline
pub fn synthesize(scans: usize) -> Chromatogram {
    let scan_list: Vec<Scan> = (0..scans)
        .map(|index| {
            let mut scan = Scan::new(retention_time(index));
            scan.cycle_number = index as i32 + 1;
            scan.ions.push(Ion::new(40.0, background(index) as f32));
            for compound in &COMPOUNDS {
                let signal = elution(compound, index, scans);
                if signal < 1.0 {
                    continue;
                }
                for &(mz, relative) in compound.spectrum {
                    scan.ions.push(Ion::new(mz, (signal * relative) as f32));
                }
            }
            scan
        })
        .collect();

    let mut anchor_indices: Vec<usize> = (0..scans).step_by(BASELINE_ANCHOR_EVERY).collect();
    if scans > 1 && anchor_indices.last() != Some(&(scans - 1)) {
        anchor_indices.push(scans - 1);
    }
    let anchors: Vec<(i32, f32)> = anchor_indices
        .iter()
        .map(|&i| (retention_time(i), background(i) as f32))
        .collect();
    let baseline = BaselineModel::from_anchors(&anchors, false).unwrap_or_default();

    let peaks: Vec<Peak> = COMPOUNDS
        .iter()
        .filter_map(|compound| build_peak(compound, &scan_list, &baseline))
        .collect();

    let total_signal: f64 = scan_list.iter().map(|s| f64::from(s.total_signal())).sum();
    let background_signal: f64 = (0..scans).map(background).sum();

    let mut method = Method::new("chromstore demo GC-MS");
    method.ion_source = "EI".to_string();
    method.sampling_rate = 1000.0 / f64::from(SCAN_INTERVAL_MS);
    method.solvent_delay = SOLVENT_DELAY_MS;
    method.stop_mode = "Time".to_string();
    method.stop_time = scan_list.last().map(|s| s.retention_time).unwrap_or(SOLVENT_DELAY_MS);

    Chromatogram {
        method,
        scans: ScanStore::Eager(scan_list),
        baseline,
        peaks,
        chromatogram_area: IntegratedArea {
            integrator_description: "Sum".to_string(),
            entries: vec![IntegrationEntry::new(0.0, total_signal)],
        },
        background_area: IntegratedArea {
            integrator_description: "Sum".to_string(),
            entries: vec![IntegrationEntry::new(40.0, background_signal)],
        },
        targets: Vec::new(),
        edit_history: vec![EditInformation::now("Synthesized by chromstore demo")],
        date: Utc::now(),
        misc_info: "Synthetic run".to_string(),
        misc_info_separated: String::new(),
        data_name: "demo_gcms_run".to_string(),
        operator: "chromstore".to_string(),
    }
}

fn build_peak(compound: &Compound, scans: &[Scan], baseline: &BaselineModel) -> Option<Peak> {
    let apex = (compound.apex * scans.len() as f64).round() as usize;
    let half_width = (compound.width * 3.0).ceil() as usize;
    let start = apex.checked_sub(half_width)?;
    let stop = (apex + half_width).min(scans.len().checked_sub(1)?);
    if apex > stop {
        return None;
    }

    let mut intensity_values: PeakIntensityValues = (start..=stop)
        .map(|i| (scans[i].retention_time, elution(compound, i, scans.len()) as f32))
        .collect();
    intensity_values.normalize();

    let area: f64 = (start..=stop)
        .map(|i| elution(compound, i, scans.len()))
        .sum::<f64>()
        * f64::from(SCAN_INTERVAL_MS)
        / 1000.0;

    let mut library = LibraryInformation::new(compound.name);
    library.cas_number = compound.cas.to_string();
    let comparison = ComparisonResult {
        match_factor: 90.0,
        match_factor_direct: 90.0,
        reverse_match_factor: 92.0,
        reverse_match_factor_direct: 92.0,
        probability: 75.0,
        is_match: true,
    };

    let mut peak = Peak::new(scans[apex].clone(), intensity_values);
    peak.detector_description = "Synthetic".to_string();
    peak.integrator_description = "Trapezoid".to_string();
    peak.peak_type = PeakType::BB;
    peak.suggested_number_of_components = 1;
    peak.start_background_abundance = baseline.background_abundance(scans[start].retention_time);
    peak.stop_background_abundance = baseline.background_abundance(scans[stop].retention_time);
    peak.integration_entries.push(IntegrationEntry::new(0.0, area));
    peak.targets.push(IdentificationTarget::new("Demo library", library, comparison));
    Some(peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_run_is_consistent() {
        let chromatogram = synthesize(600);
        assert_eq!(chromatogram.number_of_scans(), 600);
        assert_eq!(chromatogram.peaks.len(), 3);
        assert!(chromatogram.baseline.is_contiguous());
        assert!(chromatogram.peaks.iter().all(|p| p.intensity_values.is_normalized()));
        assert_eq!(chromatogram.scan_delay(), SOLVENT_DELAY_MS);
    }

    #[test]
    fn test_synthesized_run_encodes() {
        let chromatogram = synthesize(100);
        let bytes = ContainerWriter::new(Default::default())
            .write_to_vec(&chromatogram)
            .unwrap();
        let decoded = chromstore::format::FormatRegistry::global()
            .read_bytes(bytes, &Default::default())
            .unwrap();
        assert_eq!(decoded.number_of_scans(), 100);
        assert_eq!(decoded.peaks.len(), chromatogram.peaks.len());
    }
}
