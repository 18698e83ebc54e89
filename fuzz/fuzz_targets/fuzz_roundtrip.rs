#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpgrid::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must keep every RGB value
    let limits = Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let Ok(decoded) = decode_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };
    if decoded.is_empty() {
        return;
    }

    let reencoded = encode(&decoded).expect("non-empty image must encode");
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    for (a, b) in decoded.pixels().iter().zip(decoded2.pixels()) {
        assert!(a.same_rgb(*b), "roundtrip pixel mismatch");
    }
});
