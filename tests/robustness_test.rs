//! Malformed input: bad versions, truncation and damaged streams

mod common;

use chromstore::container::{names, Container};
use chromstore::format::{EncodedContainer, FormatRegistry, V1100};
use chromstore::reader::{DecodeError, ReaderConfig};
use chromstore::writer::{ContainerWriter, WriterConfig};
use tempfile::tempdir;

#[test]
fn test_unknown_version_gate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("future.chrom");
    common::write_raw_archive(&path, &[(names::VERSION, common::encode_string("2.0.0.0"))]);

    match chromstore::read(&path) {
        Err(DecodeError::UnsupportedVersion(version)) => assert_eq!(version, "2.0.0.0"),
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
    assert!(matches!(
        chromstore::read_overview(&path),
        Err(DecodeError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_missing_version_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unversioned.chrom");
    common::write_raw_archive(&path, &[(names::METHOD, vec![0, 0, 0, 0])]);

    match chromstore::read(&path) {
        Err(DecodeError::MissingStream(name)) => assert_eq!(name, names::VERSION),
        other => panic!("expected MissingStream, got {:?}", other),
    }
}

#[test]
fn test_streams_require_version_marker() {
    let bytes = ContainerWriter::new(WriterConfig::default())
        .write_to_vec(&common::gcms_run())
        .unwrap();
    let mut container = Container::from_bytes(bytes).unwrap();
    assert!(matches!(
        container.stream(names::SCANS),
        Err(DecodeError::VersionNotValidated)
    ));
    assert_eq!(container.read_version_marker().unwrap(), V1100);
    assert!(container.stream(names::SCANS).is_ok());
}

#[test]
fn test_not_a_container() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    std::fs::write(&path, b"just some text").unwrap();

    assert!(matches!(chromstore::read(&path), Err(DecodeError::NotAContainer(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = chromstore::read(dir.path().join("absent.chrom"));
    assert!(matches!(result, Err(DecodeError::Io(_))));
}

#[test]
fn test_every_truncation_is_an_error() {
    let bytes = ContainerWriter::new(WriterConfig::default())
        .write_to_vec(&common::gcms_run())
        .unwrap();
    let registry = FormatRegistry::global();

    for cut in 0..bytes.len() {
        let result = registry.read_bytes(bytes[..cut].to_vec(), &ReaderConfig::default());
        assert!(result.is_err(), "truncation at {} of {} decoded", cut, bytes.len());
    }
    assert!(registry
        .read_bytes(bytes.clone(), &ReaderConfig::default())
        .is_ok());
}

#[test]
fn test_truncated_streams_are_reported() {
    let registry = FormatRegistry::global();
    let encoded = registry.encode(&common::gcms_run(), V1100).unwrap();

    for name in [names::METHOD, names::SCANS, names::PEAKS, names::MISC] {
        let original = &encoded.get(name).unwrap().bytes;
        let mut rebuilt = EncodedContainer::new();
        for entry in encoded.entries() {
            let data = if entry.name == name {
                original[..original.len() - 1].to_vec()
            } else {
                entry.bytes.clone()
            };
            rebuilt.push(&entry.name, data, entry.storage);
        }

        let result = registry.read_bytes(common::archive_bytes(&rebuilt), &ReaderConfig::default());
        match result {
            Err(DecodeError::TruncatedStream { stream, .. }) => assert_eq!(stream, name),
            other => panic!("expected TruncatedStream for {}, got {:?}", name, other),
        }
    }
}

#[test]
fn test_damaged_scans_stream_never_panics() {
    let registry = FormatRegistry::global();
    let encoded = registry.encode(&common::gcms_run(), V1100).unwrap();
    let scans = encoded.get(names::SCANS).unwrap().bytes.clone();

    for position in 0..scans.len() {
        let mut damaged = scans.clone();
        damaged[position] ^= 0xFF;

        let mut rebuilt = EncodedContainer::new();
        for entry in encoded.entries() {
            let data = if entry.name == names::SCANS {
                damaged.clone()
            } else {
                entry.bytes.clone()
            };
            rebuilt.push(&entry.name, data, entry.storage);
        }
        // Any outcome is acceptable as long as decoding returns
        let _ = registry.read_bytes(common::archive_bytes(&rebuilt), &ReaderConfig::default());
    }
}
