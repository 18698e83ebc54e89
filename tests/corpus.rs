//! Test corpus: roundtrips with various patterns and sizes, limits, malformed
//! input, and the external BMP conformance set when available.

use bmpgrid::*;

fn checkerboard(w: u32, h: u32) -> PixelBuffer {
    let mut image = PixelBuffer::filled(w, h, Bgra::default()).unwrap();
    for y in 0..h {
        for x in 0..w {
            let p = if (x + y) % 2 == 0 {
                Bgra::from_rgb(200, 220, 240, 255)
            } else {
                Bgra::from_rgb(10, 40, 70, 255)
            };
            image.set(y, x, p);
        }
    }
    image
}

fn noise_pattern(w: u32, h: u32) -> PixelBuffer {
    let mut state: u32 = 0xDEAD_BEEF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Bgra::from_le_u32(state)
        })
        .collect();
    PixelBuffer::new(w, h, pixels).unwrap()
}

fn roundtrip(image: &PixelBuffer) {
    let encoded = encode(image).unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.width(), image.width());
    assert_eq!(decoded.height(), image.height());
    for (i, (a, b)) in image.pixels().iter().zip(decoded.pixels()).enumerate() {
        assert_eq!(a.rgb(), b.rgb(), "pixel {i}");
    }
}

// ── Roundtrips ───────────────────────────────────────────────────────

#[test]
fn flat_checkerboard_roundtrip() {
    roundtrip(&checkerboard(10, 8));
}

#[test]
fn noise_roundtrip() {
    roundtrip(&noise_pattern(7, 5));
}

#[test]
fn single_pixel_bmp() {
    let image = PixelBuffer::new(1, 1, vec![Bgra::from_rgb(255, 0, 128, 255)]).unwrap();
    let decoded = decode(&encode(&image).unwrap()).unwrap();
    assert_eq!(decoded.pixels()[0].rgb(), (255, 0, 128));
}

#[test]
fn wide_image() {
    roundtrip(&noise_pattern(1000, 1));
}

#[test]
fn tall_image() {
    roundtrip(&noise_pattern(1, 1000));
}

#[test]
fn odd_widths_pad_rows() {
    for w in 1..=9 {
        let image = noise_pattern(w, 3);
        let encoded = encode(&image).unwrap();
        let stride = ((w as usize * 24 + 31) / 32) * 4;
        assert_eq!(encoded.len(), 54 + stride * 3, "width {w}");
        for row in 0..3 {
            let start = 54 + row * stride;
            let pad = &encoded[start + w as usize * 3..start + stride];
            assert!(pad.iter().all(|&b| b == 0), "width {w} row {row}");
        }
        roundtrip(&image);
    }
}

#[test]
fn eight_bit_three_wide_consumes_four_byte_rows() {
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&(54u32 + 8 + 8).to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&(54u32 + 8).to_le_bytes());
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&3i32.to_le_bytes());
    data.extend_from_slice(&(-2i32).to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&8u16.to_le_bytes());
    data.extend_from_slice(&[0; 16]);
    data.extend_from_slice(&2u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
    // 4th byte of each row is padding and would be out of range if read
    data.extend_from_slice(&[1, 0, 1, 77, 0, 1, 0, 77]);

    let decoded = decode(&data).unwrap();
    let lit: Vec<u8> = decoded.pixels().iter().map(|p| p.red).collect();
    assert_eq!(lit, [255, 0, 255, 0, 255, 0]);
}

// ── Malformed input ──────────────────────────────────────────────────

#[test]
fn short_input_is_malformed_header() {
    for len in [0, 1, 2, 14, 53] {
        let mut data = vec![0u8; len];
        if len >= 2 {
            data[..2].copy_from_slice(b"BM");
        }
        let err = decode(&data).unwrap_err();
        assert!(matches!(err, BmpError::MalformedHeader(_)), "len {len}: {err}");
    }
}

#[test]
fn wrong_signature_is_malformed_header() {
    let mut data = encode(&checkerboard(2, 2)).unwrap();
    data[0] = b'P';
    data[1] = b'6';
    assert!(matches!(decode(&data), Err(BmpError::MalformedHeader(_))));
    assert!(matches!(probe(&data), Err(BmpError::MalformedHeader(_))));
}

#[test]
fn truncated_pixel_stream() {
    let data = encode(&checkerboard(4, 4)).unwrap();
    let err = decode(&data[..data.len() - 1]).unwrap_err();
    assert!(matches!(err, BmpError::TruncatedPixelData { .. }), "{err}");
}

#[test]
fn pixel_offset_past_end_is_missing_data() {
    let mut data = encode(&checkerboard(2, 2)).unwrap();
    data[10..14].copy_from_slice(&10_000u32.to_le_bytes());
    assert!(matches!(decode(&data), Err(BmpError::MissingPixelData)));
}

#[test]
fn short_info_header_is_malformed() {
    let mut data = encode(&checkerboard(2, 2)).unwrap();
    data[14..18].copy_from_slice(&12u32.to_le_bytes());
    assert!(matches!(decode(&data), Err(BmpError::MalformedHeader(_))));
    assert!(matches!(probe(&data), Err(BmpError::MalformedHeader(_))));
}

#[test]
fn oversized_info_header_fails_cleanly() {
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&62u32.to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&58u32.to_le_bytes());
    data.extend_from_slice(&u32::MAX.to_le_bytes());
    data.extend_from_slice(&1i32.to_le_bytes());
    data.extend_from_slice(&1i32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&8u16.to_le_bytes());
    data.extend_from_slice(&[0; 16]);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&[0; 8]);

    let err = decode(&data).unwrap_err();
    assert!(
        matches!(
            err,
            BmpError::MissingPaletteData | BmpError::MalformedHeader(_)
        ),
        "{err}"
    );
}

#[test]
fn empty_image_cannot_be_encoded() {
    let empty = PixelBuffer::new(0, 0, Vec::new()).unwrap();
    assert!(matches!(encode(&empty), Err(BmpError::EmptySource)));
    assert!(matches!(
        EncodeRequest::bmp().encode_bgra_bytes(&[], 0, 0, Unstoppable),
        Err(BmpError::EmptySource)
    ));
}

// ── Probe ────────────────────────────────────────────────────────────

#[test]
fn probe_reports_header_fields() {
    let data = encode(&checkerboard(6, 3)).unwrap();
    let info = probe(&data).unwrap();
    assert_eq!((info.width, info.height), (6, 3));
    assert_eq!(info.bits_per_pixel, 24);
    assert_eq!(info.palette_len, 0);
    assert_eq!(info.orientation, bmp::Orientation::TopDown);
    assert!(info.is_supported());
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let encoded = encode(&checkerboard(2, 2)).unwrap();
    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        decode_with_limits(&encoded, &limits, Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));
}

#[test]
fn limits_max_memory() {
    let encoded = encode(&checkerboard(2, 2)).unwrap();
    let limits = Limits {
        max_memory_bytes: Some(1),
        ..Default::default()
    };
    assert!(decode_with_limits(&encoded, &limits, Unstoppable).is_err());

    // four pixels: a u32 raw value and a Bgra each
    let tight = Limits {
        max_memory_bytes: Some(31),
        ..Default::default()
    };
    assert!(matches!(
        decode_with_limits(&encoded, &tight, Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));

    let roomy = Limits {
        max_memory_bytes: Some(Limits::decode_footprint(2, 2)),
        ..Default::default()
    };
    assert_eq!(Limits::decode_footprint(2, 2), 32);
    assert!(decode_with_limits(&encoded, &roomy, Unstoppable).is_ok());
}

#[test]
fn limits_through_request() {
    let encoded = encode(&checkerboard(4, 4)).unwrap();
    let limits = Limits {
        max_height: Some(3),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(result, Err(BmpError::LimitExceeded(_))));
}

// ── Cancellation ─────────────────────────────────────────────────────

struct AlwaysCancelled;

impl Stop for AlwaysCancelled {
    fn check(&self) -> Result<(), enough::StopReason> {
        Err(enough::StopReason::Cancelled)
    }
}

/// Lets `remaining` checks pass, then cancels.
struct CancelAfter {
    remaining: std::sync::atomic::AtomicUsize,
}

impl CancelAfter {
    fn new(checks: usize) -> Self {
        Self {
            remaining: std::sync::atomic::AtomicUsize::new(checks),
        }
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), enough::StopReason> {
        use std::sync::atomic::Ordering;
        let left = self.remaining.load(Ordering::Relaxed);
        if left == 0 {
            return Err(enough::StopReason::Cancelled);
        }
        self.remaining.store(left - 1, Ordering::Relaxed);
        Ok(())
    }
}

#[test]
fn cancelled_decode() {
    let encoded = encode(&checkerboard(3, 3)).unwrap();
    assert!(matches!(
        decode_with_stop(&encoded, AlwaysCancelled),
        Err(BmpError::Cancelled(enough::StopReason::Cancelled))
    ));
    assert!(matches!(
        DecodeRequest::new(&encoded).decode(AlwaysCancelled),
        Err(BmpError::Cancelled(_))
    ));
}

#[test]
fn cancelled_encode() {
    let image = checkerboard(3, 3);
    assert!(matches!(
        encode_with_stop(&image, AlwaysCancelled),
        Err(BmpError::Cancelled(enough::StopReason::Cancelled))
    ));
    assert!(matches!(
        EncodeRequest::bmp().encode(&image, AlwaysCancelled),
        Err(BmpError::Cancelled(_))
    ));
}

#[test]
fn decode_polls_stop_between_row_batches() {
    // One check before unpacking, then rows 0, 16 and 32
    let encoded = encode(&noise_pattern(2, 40)).unwrap();
    assert!(decode_with_stop(&encoded, CancelAfter::new(4)).is_ok());
    assert!(matches!(
        decode_with_stop(&encoded, CancelAfter::new(3)),
        Err(BmpError::Cancelled(_))
    ));
    assert!(matches!(
        decode_with_stop(&encoded, CancelAfter::new(1)),
        Err(BmpError::Cancelled(_))
    ));
}

#[test]
fn encode_polls_stop_between_row_batches() {
    // Rows 0 and 16
    let image = noise_pattern(2, 20);
    assert!(encode_with_stop(&image, CancelAfter::new(2)).is_ok());
    assert!(matches!(
        encode_with_stop(&image, CancelAfter::new(1)),
        Err(BmpError::Cancelled(_))
    ));
}

// ── Threads ──────────────────────────────────────────────────────────

#[test]
fn independent_decodes_run_in_parallel() {
    let files: Vec<Vec<u8>> = (1..=4).map(|n| encode(&noise_pattern(n * 3, n)).unwrap()).collect();
    std::thread::scope(|s| {
        let handles: Vec<_> = files
            .iter()
            .map(|data| s.spawn(move || decode(data)))
            .collect();
        for (n, h) in (1..=4).zip(handles) {
            let decoded = h.join().unwrap().unwrap();
            assert_eq!((decoded.width(), decoded.height()), (n * 3, n));
        }
    });
}

// ── Files ────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
#[test]
fn write_file_then_read_file() {
    let path = std::env::temp_dir().join(format!(
        "bmpgrid-{}-write-read.bmp",
        std::process::id()
    ));
    let image = noise_pattern(5, 3);
    write_file(&path, &image).unwrap();
    let on_disk = std::fs::read(&path);
    let decoded = read_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(on_disk.unwrap(), encode(&image).unwrap());
    let decoded = decoded.unwrap();
    for (a, b) in image.pixels().iter().zip(decoded.pixels()) {
        assert!(a.same_rgb(*b));
    }
}

#[cfg(feature = "std")]
#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir()
        .join("bmpgrid-no-such-dir")
        .join("missing.bmp");
    match read_file(&path) {
        Err(BmpError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io error, got {other:?}"),
    }
    let image = checkerboard(1, 1);
    assert!(matches!(write_file(&path, &image), Err(BmpError::Io(_))));
}

// ── Typed pixels ─────────────────────────────────────────────────────

#[cfg(feature = "rgb")]
#[test]
fn bgra_converts_to_and_from_rgb_crate() {
    let px = Bgra::from_rgb(10, 20, 30, 40);
    let rgba: rgb::RGBA8 = px.into();
    assert_eq!(rgba, rgb::RGBA8::new(10, 20, 30, 40));
    assert_eq!(Bgra::from(rgba), px);
    assert_eq!(
        Bgra::from(rgb::RGB8::new(1, 2, 3)),
        Bgra::from_rgb(1, 2, 3, 255)
    );
}

#[cfg(feature = "rgb")]
#[test]
fn decoded_buffer_as_rgba8() {
    let decoded = decode(&encode(&checkerboard(3, 2)).unwrap()).unwrap();
    let typed = decoded.to_rgba8();
    assert_eq!(typed.len(), 6);
    // 24-bit files decode with alpha 0
    assert_eq!(typed[0], rgb::RGBA8::new(200, 220, 240, 0));
    assert_eq!(typed[1], rgb::RGBA8::new(10, 40, 70, 0));
}

#[cfg(feature = "imgref")]
#[test]
fn decoded_buffer_as_imgvec() {
    let image = noise_pattern(4, 3);
    let img = image.to_imgvec();
    assert_eq!((img.width(), img.height()), (4, 3));
    let third_row = img.rows().nth(2).unwrap();
    assert_eq!(third_row[1], rgb::RGBA8::from(image.get(2, 1).unwrap()));
}

// ── BMP conformance corpus (codec-corpus) ────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
mod bmp_corpus {
    use bmpgrid::*;

    fn get_corpus(subdir: &str) -> Option<std::path::PathBuf> {
        let corpus = codec_corpus::Corpus::new().ok()?;
        corpus.get(&format!("bmp-conformance/{subdir}")).ok()
    }

    fn bmp_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        let mut files: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "bmp"))
            .collect();
        files.sort();
        files
    }

    /// Every supported valid file decodes and survives an RGB roundtrip.
    /// Unsupported variants (RLE, bitfields, ...) must fail cleanly.
    #[test]
    #[ignore]
    fn valid_supported_files_decode() {
        let Some(dir) = get_corpus("valid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        let files = bmp_files(&dir);
        assert!(!files.is_empty(), "no BMP files found in valid/");

        let mut failures = Vec::new();
        let mut decoded_count = 0;
        for path in &files {
            let data = std::fs::read(path).unwrap();
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            let Ok(info) = probe(&data) else {
                continue;
            };
            match decode(&data) {
                Ok(image) => {
                    decoded_count += 1;
                    if image.is_empty() {
                        continue;
                    }
                    let again = decode(&encode(&image).unwrap()).unwrap();
                    if again
                        .pixels()
                        .iter()
                        .zip(image.pixels())
                        .any(|(a, b)| !a.same_rgb(*b))
                    {
                        failures.push(format!("{name}: roundtrip mismatch"));
                    }
                }
                // 16-bit direct color is outside what we decode
                Err(e) if info.is_supported() && info.bits_per_pixel != 16 => {
                    failures.push(format!("{name}: {e}"))
                }
                Err(_) => {}
            }
        }
        assert!(
            failures.is_empty(),
            "valid/ failures:\n  {}",
            failures.join("\n  ")
        );
        eprintln!("valid/: decoded {decoded_count}/{}", files.len());
    }
}
