//! Builders for hand-made BMP files in unit tests.

use alloc::vec::Vec;

use super::header::{FILE_HEADER_LEN, HEADERS_LEN, INFO_HEADER_LEN};

/// Assemble a BITMAPINFOHEADER file with the palette right after the headers
/// and the pixel stream right after the palette.
pub(crate) fn raw_bmp(
    width: i32,
    height: i32,
    bpp: u16,
    used_colors: u32,
    palette: &[[u8; 4]],
    stream: &[u8],
) -> Vec<u8> {
    let offset = HEADERS_LEN + palette.len() * 4;
    let total = offset + stream.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(stream.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&used_colors.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    debug_assert_eq!(out.len(), FILE_HEADER_LEN + INFO_HEADER_LEN);
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(stream);
    out
}
