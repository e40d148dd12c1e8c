//! Lazily resolved scans against their eagerly decoded counterparts

mod common;

use std::sync::Arc;
use std::thread;

use chromstore::format::V1009;
use chromstore::model::{Chromatogram, Scan, ScanStore};
use chromstore::reader::{DecodeError, ReaderConfig};
use chromstore::writer::{CompressionType, ContainerWriter, WriterConfig};
use tempfile::tempdir;

fn proxy_config() -> ReaderConfig {
    ReaderConfig::default().with_scan_proxies(true)
}

#[test]
fn test_proxies_resolve_to_eager_scans() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let original = common::gcms_run();
    chromstore::write(&path, &original).unwrap();

    let eager = chromstore::read(&path).unwrap();
    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    assert!(lazy.scans.is_proxied());
    assert_eq!(lazy.number_of_scans(), 3);

    let expected = eager.scans.materialize().unwrap();
    assert_eq!(lazy.scans.materialize().unwrap(), expected);

    // Everything outside the scans is decoded the same way
    assert_eq!(lazy.peaks, eager.peaks);
    assert_eq!(lazy.baseline, eager.baseline);
    assert_eq!(lazy.overview(), eager.overview());
}

#[test]
fn test_proxy_summaries_match_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let original = common::gcms_run();
    chromstore::write(&path, &original).unwrap();

    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    let ScanStore::Proxied(proxies) = &lazy.scans else {
        panic!("expected proxied scans");
    };
    let scans = original.scans.materialize().unwrap();

    let mut previous_offset = None;
    for (proxy, scan) in proxies.iter().zip(&scans) {
        assert_eq!(proxy.retention_time, scan.retention_time);
        assert_eq!(proxy.number_of_ions, scan.ions.len() as i32);
        assert_eq!(proxy.total_signal, scan.total_signal());
        assert_eq!(proxy.retention_index, scan.retention_index);
        assert_eq!(proxy.source().path(), path.as_path());
        if let Some(previous) = previous_offset {
            assert!(proxy.offset > previous);
        }
        previous_offset = Some(proxy.offset);
    }
}

#[test]
fn test_proxies_with_compressed_defaults() {
    // The scans entry stays stored whatever the compression setting
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let config = WriterConfig::default().with_compression(CompressionType::max_compression());
    ContainerWriter::new(config)
        .write(&path, &common::gcms_run())
        .unwrap();

    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    assert_eq!(
        lazy.scans.materialize().unwrap(),
        common::gcms_run().scans.materialize().unwrap()
    );
}

#[test]
fn test_concurrent_resolution() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    chromstore::write(&path, &common::gcms_run()).unwrap();

    let lazy = Arc::new(chromstore::read_with_config(&path, &proxy_config()).unwrap());
    let expected = common::gcms_run().scans.materialize().unwrap();

    thread::scope(|scope| {
        for worker in 0..8 {
            let lazy = Arc::clone(&lazy);
            let expected = &expected;
            scope.spawn(move || {
                for round in 0..10 {
                    let index = (worker + round) % expected.len();
                    let scan = lazy.scans.get(index).unwrap().unwrap();
                    assert_eq!(scan.as_ref(), &expected[index]);
                }
            });
        }
    });
}

#[test]
fn test_legacy_version_falls_back_to_eager() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.chrom");
    let original = common::legacy_gcms_run();
    chromstore::write_with_config(&path, &original, &WriterConfig::default().with_version(V1009))
        .unwrap();

    let decoded = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    assert!(!decoded.scans.is_proxied());
    assert_eq!(decoded, original);
}

#[test]
fn test_resolution_fails_after_source_removed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    chromstore::write(&path, &common::gcms_run()).unwrap();

    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    std::fs::remove_file(&path).unwrap();

    match lazy.scans.get(0) {
        Err(DecodeError::ProxyResolution { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected ProxyResolution, got {:?}", other),
    }
}

#[test]
fn test_overwrite_proxy_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let original = common::gcms_run();
    chromstore::write(&path, &original).unwrap();

    let mut lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    lazy.operator = "reviewer".to_string();
    chromstore::write(&path, &lazy).unwrap();

    let rewritten = chromstore::read(&path).unwrap();
    assert_eq!(rewritten.operator, "reviewer");
    assert_eq!(
        rewritten.scans.materialize().unwrap(),
        original.scans.materialize().unwrap()
    );
    assert_eq!(rewritten.peaks, original.peaks);
}

#[test]
fn test_resolution_detects_rewritten_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    let run = |times: [i32; 2]| Chromatogram {
        scans: ScanStore::Eager(
            times
                .iter()
                .map(|&rt| Scan::new(rt).with_ion(50.0, 1.0).with_ion(51.0, 2.0))
                .collect(),
        ),
        ..Default::default()
    };
    chromstore::write(&path, &run([100, 200])).unwrap();
    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();

    // Same record sizes, so the stale offsets still land on record boundaries
    chromstore::write(&path, &run([9000, 9100])).unwrap();

    match lazy.scans.get(1) {
        Err(DecodeError::ProxyResolution { source, .. }) => {
            assert!(matches!(*source, DecodeError::CorruptStream { .. }), "{:?}", source)
        }
        other => panic!("expected ProxyResolution, got {:?}", other),
    }
}

#[test]
fn test_resolution_checks_summary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.chrom");
    chromstore::write(&path, &common::gcms_run()).unwrap();

    let lazy = chromstore::read_with_config(&path, &proxy_config()).unwrap();
    let ScanStore::Proxied(proxies) = &lazy.scans else {
        panic!("expected proxied scans");
    };
    assert!(proxies[0].resolve().is_ok());

    let mut shifted = proxies[0].clone();
    shifted.offset = proxies[1].offset;
    match shifted.resolve() {
        Err(DecodeError::ProxyResolution { offset, source, .. }) => {
            assert_eq!(offset, proxies[1].offset);
            assert!(matches!(*source, DecodeError::CorruptStream { .. }));
        }
        other => panic!("expected ProxyResolution, got {:?}", other),
    }
}
