//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::DateTime;
use chromstore::format::EncodedContainer;
use chromstore::model::{
    BaselineModel, Chromatogram, ComparisonResult, EditInformation, IdentificationTarget,
    IntegratedArea, IntegrationEntry, InternalStandard, Ion, IonTransition, LibraryInformation,
    Method, Peak, PeakIntensityValues, PeakType, RetentionIndexType, Scan, ScanStore,
};
use chromstore::writer::{write_entries, CompressionType};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn target(name: &str, cas: &str, match_factor: f32) -> IdentificationTarget {
    let mut library = LibraryInformation::new(name);
    library.cas_number = cas.to_string();
    IdentificationTarget::new(
        "NIST",
        library,
        ComparisonResult {
            match_factor,
            match_factor_direct: match_factor,
            reverse_match_factor: match_factor - 3.0,
            reverse_match_factor_direct: match_factor - 3.0,
            probability: 70.0,
            is_match: true,
        },
    )
}

/// Three scans at 1.0 s, 1.5 s and 2.0 s with one toluene peak at the middle scan
pub fn gcms_run() -> Chromatogram {
    let transition = Arc::new(IonTransition {
        compound_name: "Toluene".to_string(),
        filter1_first_ion: 91.0,
        filter1_last_ion: 91.5,
        filter3_first_ion: 65.0,
        filter3_last_ion: 65.5,
        collision_energy: 10.0,
        filter1_resolution: 1.0,
        filter3_resolution: 1.0,
        transition_group: 1,
    });

    let first = Scan::new(1000).with_ion(50.0, 100.0).with_ion(51.0, 200.0);
    let mut second = Scan::new(1500)
        .with_ion(91.0, 1000.0)
        .with_ion(92.0, 620.0);
    second.retention_index = 1042.0;
    second.additional_retention_indices = Some(vec![(RetentionIndexType::StandardNonPolar, 1040.5)]);
    second.ions.push(Ion::with_transition(65.0, 90.0, transition, 50));
    second.targets.push(target("Toluene", "108-88-3", 93.0));
    let third = Scan::new(2000).with_ion(50.0, 120.0);

    let intensity_values: PeakIntensityValues =
        [(1000, 0.0), (1500, 1000.0), (2000, 0.0)].into_iter().collect();
    let mut peak = Peak::new(second.clone(), intensity_values);
    peak.detector_description = "First Derivative".to_string();
    peak.integrator_description = "Trapezoid".to_string();
    peak.peak_type = PeakType::BB;
    peak.suggested_number_of_components = 1;
    peak.start_background_abundance = 10.0;
    peak.stop_background_abundance = 12.0;
    peak.integration_entries.push(IntegrationEntry::new(0.0, 856.25));
    peak.targets.push(target("Toluene", "108-88-3", 93.0));
    peak.internal_standards.push(InternalStandard {
        name: "Toluene-d8".to_string(),
        concentration: 2.0,
        concentration_unit: "mg/kg".to_string(),
        response_factor: 1.0,
        chemical_class: "Aromatics".to_string(),
    });

    let mut method = Method::new("Agilent 5977B");
    method.ion_source = "EI".to_string();
    method.sampling_rate = 2.0;
    method.stop_time = 2000;

    Chromatogram {
        method,
        scans: ScanStore::Eager(vec![first, second, third]),
        baseline: BaselineModel::from_anchors(&[(1000, 10.0), (1500, 11.0), (2000, 12.0)], true)
            .expect("valid anchors"),
        peaks: vec![peak],
        chromatogram_area: IntegratedArea {
            integrator_description: "Sum".to_string(),
            entries: vec![IntegrationEntry::new(0.0, 2130.0)],
        },
        background_area: IntegratedArea::default(),
        targets: vec![target("Toluene", "108-88-3", 90.0)],
        edit_history: vec![EditInformation::new(
            DateTime::from_timestamp_millis(1_700_000_100_000).expect("valid date"),
            "Peaks detected",
        )],
        date: DateTime::from_timestamp_millis(1_700_000_000_000).expect("valid date"),
        misc_info: "Sample A".to_string(),
        misc_info_separated: "Sample;A".to_string(),
        data_name: "run-001".to_string(),
        operator: "lab".to_string(),
    }
}

/// [`gcms_run`] stripped of everything the legacy version does not store
pub fn legacy_gcms_run() -> Chromatogram {
    let mut chromatogram = gcms_run();
    if let ScanStore::Eager(scans) = &mut chromatogram.scans {
        for scan in scans.iter_mut() {
            scan.additional_retention_indices = None;
        }
    }
    for peak in &mut chromatogram.peaks {
        peak.peak_maximum.additional_retention_indices = None;
        peak.internal_standards.clear();
    }
    chromatogram
}

/// Archive bytes for an already encoded container
pub fn archive_bytes(encoded: &EncodedContainer) -> Vec<u8> {
    write_entries(Cursor::new(Vec::new()), encoded, CompressionType::default())
        .expect("write entries")
        .into_inner()
}

/// Length-prefixed big-endian string as stored in every stream
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut bytes = (value.len() as i32).to_be_bytes().to_vec();
    bytes.extend_from_slice(value.as_bytes());
    bytes
}

/// Write a raw archive with the given entries, all stored
pub fn write_raw_archive(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = std::fs::File::create(path).expect("create archive");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, bytes) in entries {
        zip.start_file(*name, options).expect("start entry");
        zip.write_all(bytes).expect("write entry");
    }
    zip.finish().expect("finish archive");
}
