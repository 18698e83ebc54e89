#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe, container split and full decode must never panic
    let _ = bmpgrid::probe(data);
    if let Ok(file) = bmpgrid::bmp::BmpFile::parse(data) {
        let _ = file.to_bytes();
    }

    let limits = bmpgrid::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = bmpgrid::decode_with_limits(data, &limits, enough::Unstoppable);
});
