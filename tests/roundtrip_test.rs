//! Write/read cycles through real files

mod common;

use chromstore::container::{names, Container, EntryStorage};
use chromstore::format::{FormatRegistry, V1009, V1100};
use chromstore::reader::ReaderConfig;
use chromstore::writer::{CompressionType, ContainerWriter, WriterConfig};
use tempfile::tempdir;

#[test]
fn test_write_read_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let original = common::gcms_run();

    let summary = chromstore::write(&path, &original).unwrap();
    assert_eq!(summary.version, V1100);
    assert_eq!(summary.scans_written, 3);
    assert_eq!(summary.peaks_written, 1);
    assert!(summary.file_size_bytes > 0);

    let decoded = chromstore::read(&path).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_gcms_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    chromstore::write(&path, &common::gcms_run()).unwrap();

    let decoded = chromstore::read(&path).unwrap();
    assert_eq!(decoded.number_of_scans(), 3);
    assert_eq!(decoded.start_retention_time(), 1000);
    assert_eq!(decoded.stop_retention_time(), 2000);
    assert_eq!(decoded.scan_delay(), 1000);
    assert_eq!(decoded.scan_interval(), 2000 / 3);

    let peak = &decoded.peaks[0];
    assert_eq!(peak.retention_time_at_maximum(), 1500);
    assert_eq!(peak.best_target().unwrap().library.name, "Toluene");
    assert_eq!(peak.integrated_area(), 856.25);

    let apex = decoded.scans.get(1).unwrap().unwrap();
    let transition = apex.ions[2].transition.as_ref().unwrap();
    assert_eq!(transition.transition.compound_name, "Toluene");
    assert_eq!(transition.dwell, 50);

    assert!((decoded.baseline.background_abundance(1250) - 10.5).abs() < 1e-4);
}

#[test]
fn test_overview_without_scans() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let original = common::gcms_run();
    chromstore::write(&path, &original).unwrap();

    let overview = chromstore::read_overview(&path).unwrap();
    assert_eq!(overview, original.overview());
    assert_eq!(overview.len(), 3);
    assert_eq!(overview.max_signal(), Some((1500, 1710.0)));
}

#[test]
fn test_legacy_version_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.chrom");
    let original = common::legacy_gcms_run();

    let config = WriterConfig::default().with_version(V1009);
    chromstore::write_with_config(&path, &common::gcms_run(), &config).unwrap();

    let mut container = Container::open(&path).unwrap();
    assert_eq!(container.read_version_marker().unwrap(), V1009);
    assert!(!container.contains(names::SCAN_PROXIES));

    let decoded = chromstore::read(&path).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_version_upgrade() {
    let dir = tempdir().unwrap();
    let legacy = dir.path().join("legacy.chrom");
    let current = dir.path().join("current.chrom");
    let original = common::legacy_gcms_run();

    chromstore::write_with_config(&legacy, &original, &WriterConfig::default().with_version(V1009))
        .unwrap();
    let decoded = chromstore::read(&legacy).unwrap();
    chromstore::write(&current, &decoded).unwrap();

    let mut container = Container::open(&current).unwrap();
    assert_eq!(container.read_version_marker().unwrap(), V1100);
    assert!(container.contains(names::SCAN_PROXIES));
    assert_eq!(chromstore::read(&current).unwrap(), original);
}

#[test]
fn test_entry_layout_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let config = WriterConfig::default().with_compression(CompressionType::max_compression());
    ContainerWriter::new(config)
        .write(&path, &common::gcms_run())
        .unwrap();

    let mut container = Container::open(&path).unwrap();
    let entry_names = container.entry_names();
    assert_eq!(entry_names.len(), 11);
    assert_eq!(entry_names[0], names::VERSION);
    assert_eq!(container.entry_storage(names::VERSION).unwrap(), EntryStorage::Stored);
    assert_eq!(container.entry_storage(names::SCANS).unwrap(), EntryStorage::Stored);
    assert_eq!(container.entry_storage(names::PEAKS).unwrap(), EntryStorage::Deflated);
}

#[test]
fn test_custom_registry_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let registry = FormatRegistry::with_defaults();

    registry
        .write_with_config(&path, &common::gcms_run(), &WriterConfig::default())
        .unwrap();
    let decoded = registry
        .read_with_config(&path, &ReaderConfig::default())
        .unwrap();
    assert_eq!(decoded, common::gcms_run());
}
