use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chromstore::model::{Chromatogram, Scan, ScanStore};
use chromstore::reader::ReaderConfig;
use chromstore::writer::{ContainerWriter, WriterConfig};
use tempfile::TempDir;

/// Synthetic run with `num_scans` scans of `ions_per_scan` ions each
fn generate_chromatogram(num_scans: usize, ions_per_scan: usize) -> Chromatogram {
    let scans = (0..num_scans)
        .map(|i| {
            let mut scan = Scan::new(60_000 + i as i32 * 250);
            for j in 0..ions_per_scan {
                scan = scan.with_ion(35.0 + j as f64, 100.0 + ((i * 7 + j) % 500) as f32);
            }
            scan
        })
        .collect();
    Chromatogram {
        scans: ScanStore::Eager(scans),
        ..Default::default()
    }
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let temp_dir = TempDir::new().unwrap();

    for num_scans in [500, 2000] {
        let path = temp_dir.path().join(format!("run_{}.chrom", num_scans));
        ContainerWriter::new(WriterConfig::default())
            .write(&path, &generate_chromatogram(num_scans, 200))
            .unwrap();
        group.throughput(Throughput::Elements(num_scans as u64));

        group.bench_with_input(BenchmarkId::new("eager", num_scans), &path, |b, path| {
            b.iter(|| chromstore::read(path).unwrap())
        });

        let proxies = ReaderConfig::default().with_scan_proxies(true);
        group.bench_with_input(BenchmarkId::new("proxied", num_scans), &path, |b, path| {
            b.iter(|| chromstore::read_with_config(path, &proxies).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("overview", num_scans), &path, |b, path| {
            b.iter(|| chromstore::read_overview(path).unwrap())
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.chrom");
    ContainerWriter::new(WriterConfig::default())
        .write(&path, &generate_chromatogram(2000, 200))
        .unwrap();
    let lazy = chromstore::read_with_config(&path, &ReaderConfig::default().with_scan_proxies(true))
        .unwrap();

    c.bench_function("resolve_single_scan", |b| {
        b.iter(|| lazy.scans.get(1000).unwrap())
    });
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let chromatogram = generate_chromatogram(2000, 200);
    group.throughput(Throughput::Elements(2000));

    for (name, config) in [
        ("balanced", WriterConfig::default()),
        ("fast", WriterConfig::fast_write()),
        ("max_compression", WriterConfig::max_compression()),
    ] {
        let writer = ContainerWriter::new(config);
        group.bench_function(name, |b| b.iter(|| writer.write_to_vec(&chromatogram).unwrap()));
    }

    group.finish();
}

criterion_group!(benches, bench_read, bench_resolve, bench_write);
criterion_main!(benches);
