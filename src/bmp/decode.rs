//! Bit unpacker: packed, row-padded BMP pixel stream to a [`PixelBuffer`].
//!
//! Decoding runs in two passes. The first walks the stream in physical order
//! and writes each raw `bits_per_pixel`-wide value through the cursor given by
//! the file's [`Orientation`], so the grid ends up in logical top-left order.
//! The second resolves raw values to colors: a palette lookup for depths up to
//! 16, the little-endian `[b, g, r, a]` bytes of the value otherwise.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::header::{InfoHeader, SUPPORTED_DEPTHS};
use super::orientation::Orientation;
use super::palette::Palette;
use super::utils::{align_row, extract_bits, row_stride};
use crate::error::BmpError;
use crate::pixel::{Bgra, PixelBuffer, pixel_count};

/// Decode `stream` as described by `info`.
///
/// `palette` is required whenever `info.bits_per_pixel <= 16`; it is ignored
/// for direct-color depths.
pub fn unpack(
    info: &InfoHeader,
    palette: Option<&Palette>,
    stream: Option<&[u8]>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpError> {
    let stream = stream.ok_or(BmpError::MissingPixelData)?;
    let depth = info.bits_per_pixel;
    if !SUPPORTED_DEPTHS.contains(&depth) {
        return Err(BmpError::UnsupportedBitDepth(depth));
    }
    let palette = if info.is_palettized() {
        Some(palette.ok_or(BmpError::MissingPaletteData)?)
    } else {
        None
    };

    let width = info.columns();
    let height = info.rows();
    let too_large = || BmpError::DimensionsTooLarge { width, height };
    let count = pixel_count(width, height)?;
    let grid_bytes = count.checked_mul(core::mem::size_of::<Bgra>());
    if grid_bytes.is_none_or(|b| b > isize::MAX as usize) {
        return Err(too_large());
    }
    if count == 0 {
        return PixelBuffer::new(width, height, Vec::new());
    }
    let columns = width as usize;
    let rows = height as usize;
    let stride = row_stride(columns, depth).ok_or_else(too_large)?;
    let needed = stride.checked_mul(rows).ok_or_else(too_large)?;
    if stream.len() < needed {
        return Err(BmpError::TruncatedPixelData {
            needed,
            actual: stream.len(),
        });
    }

    let orientation = Orientation::from_dimensions(info.width, info.height);
    log::trace!(
        "bmp: unpacking {columns}x{rows} at {depth} bpp, stride {stride}, {orientation:?}"
    );

    let raw = unpack_raw(stream, depth, columns, rows, orientation, stop)?;

    let pixels: Vec<Bgra> = match palette {
        Some(palette) => raw
            .iter()
            .map(|&index| palette.lookup(index))
            .collect::<Result<_, _>>()?,
        None => raw.iter().map(|&v| Bgra::from_le_u32(v)).collect(),
    };

    PixelBuffer::new(width, height, pixels)
}

/// First pass: raw values in logical grid order.
fn unpack_raw(
    stream: &[u8],
    depth: u16,
    columns: usize,
    rows: usize,
    orientation: Orientation,
    stop: &dyn Stop,
) -> Result<Vec<u32>, BmpError> {
    let traversal = orientation.traversal(columns, rows);
    let mut raw = vec![0u32; columns * rows];
    let mut cursor = traversal.start;
    let mut bit_offset = 0u64;

    for row in 0..rows {
        if row % 16 == 0 {
            stop.check()?;
        }
        for _ in 0..columns {
            let value = extract_bits(stream, bit_offset, depth).ok_or_else(|| {
                let end = (bit_offset + u64::from(depth)).div_ceil(8);
                BmpError::TruncatedPixelData {
                    needed: usize::try_from(end).unwrap_or(usize::MAX),
                    actual: stream.len(),
                }
            })?;
            raw[cursor as usize] = value;
            cursor += traversal.column_step;
            bit_offset += u64::from(depth);
        }
        bit_offset = align_row(bit_offset);
        cursor += traversal.row_step;
    }

    Ok(raw)
}
