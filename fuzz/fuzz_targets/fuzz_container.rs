#![no_main]

use chromstore::format::FormatRegistry;
use chromstore::reader::ReaderConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail, never panic
    let registry = FormatRegistry::global();
    if let Ok(chromatogram) = registry.read_bytes(data.to_vec(), &ReaderConfig::default()) {
        let _ = chromatogram.overview();
        let _ = chromatogram.baseline.is_contiguous();
    }
    let strict = ReaderConfig::default().with_baseline_validation(true);
    let _ = registry.read_bytes(data.to_vec(), &strict);
});
