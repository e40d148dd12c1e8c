use super::*;
use crate::container::{names, Container};
use crate::format::tests::sample_chromatogram;
use crate::format::{V1009, V1100};
use crate::reader::ReaderConfig;

#[test]
fn test_write_summary() -> Result<(), EncodeError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("run.chrom");
    let chromatogram = sample_chromatogram();

    let summary = ContainerWriter::new(WriterConfig::default()).write(&path, &chromatogram)?;

    assert_eq!(summary.version, V1100);
    assert_eq!(summary.entries, 11);
    assert_eq!(summary.scans_written, 3);
    assert_eq!(summary.peaks_written, 1);
    assert_eq!(summary.file_size_bytes, std::fs::metadata(&path)?.len());
    assert!(summary.to_string().contains("3 scans"));
    Ok(())
}

#[test]
fn test_version_and_scans_are_stored() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = ContainerWriter::new(WriterConfig::max_compression()).write_to_vec(&sample_chromatogram())?;
    let mut container = Container::from_bytes(bytes)?;

    assert_eq!(container.entry_names()[0], names::VERSION);
    assert_eq!(container.entry_storage(names::VERSION)?, EntryStorage::Stored);
    assert_eq!(container.entry_storage(names::SCANS)?, EntryStorage::Stored);
    assert_eq!(container.entry_storage(names::PEAKS)?, EntryStorage::Deflated);
    Ok(())
}

#[test]
fn test_stored_compression_keeps_everything_uncompressed() -> Result<(), Box<dyn std::error::Error>> {
    let config = WriterConfig::default().with_compression(CompressionType::Stored);
    let bytes = ContainerWriter::new(config).write_to_vec(&sample_chromatogram())?;
    let mut container = Container::from_bytes(bytes)?;
    for name in container.entry_names() {
        assert_eq!(container.entry_storage(&name)?, EntryStorage::Stored, "{}", name);
    }
    Ok(())
}

#[test]
fn test_write_legacy_version() -> Result<(), Box<dyn std::error::Error>> {
    let config = WriterConfig::fast_write().with_version(V1009);
    let bytes = ContainerWriter::new(config).write_to_vec(&sample_chromatogram())?;
    let mut container = Container::from_bytes(bytes)?;
    assert_eq!(container.read_version_marker()?, V1009);
    assert!(!container.contains(names::SCAN_PROXIES));
    Ok(())
}

#[test]
fn test_unknown_version_leaves_target_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("run.chrom");
    std::fs::write(&path, b"previous contents")?;

    let config = WriterConfig::default().with_version("2.0.0.0");
    let result = ContainerWriter::new(config).write(&path, &sample_chromatogram());

    assert!(matches!(result, Err(EncodeError::UnsupportedVersion(_))));
    assert_eq!(std::fs::read(&path)?, b"previous contents");
    Ok(())
}

#[test]
fn test_discontinuous_baseline_is_rejected() {
    let mut chromatogram = sample_chromatogram();
    chromatogram.baseline = crate::model::BaselineModel::new();
    chromatogram
        .baseline
        .add_segment(crate::model::BaselineSegment::new(0, 100, 1.0, 2.0), true)
        .expect("segment");
    chromatogram
        .baseline
        .add_segment(crate::model::BaselineSegment::new(200, 300, 1.0, 2.0), true)
        .expect("segment");

    let result = ContainerWriter::new(WriterConfig::default()).write_to_vec(&chromatogram);
    assert!(matches!(result, Err(EncodeError::InvalidData(_))));
}

#[test]
fn test_overwrite_source_of_proxied_chromatogram() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("run.chrom");
    let original = sample_chromatogram();
    let writer = ContainerWriter::new(WriterConfig::default());
    writer.write(&path, &original)?;

    let config = ReaderConfig::default().with_scan_proxies(true);
    let mut proxied = FormatRegistry::global().read_with_config(&path, &config)?;
    assert!(proxied.scans.is_proxied());
    proxied.operator = "reviewer".to_string();
    writer.write(&path, &proxied)?;

    let reread = FormatRegistry::global().read(&path)?;
    assert_eq!(reread.operator, "reviewer");
    assert_eq!(reread.scans, original.scans);
    Ok(())
}
