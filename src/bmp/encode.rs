//! Bit packer: [`PixelBuffer`] to an uncompressed 24-bit top-down BMP.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::file::BmpFile;
use super::header::{FileHeader, HEADERS_LEN, InfoHeader};
use super::utils::row_stride;
use crate::error::BmpError;
use crate::pixel::PixelBuffer;

/// The only depth the packer writes.
pub const ENCODE_DEPTH: u16 = 24;

/// Pack `pixels` into a 24-bit BMP container.
///
/// Rows are stored top-down (negative header height) and left-to-right, three
/// bytes per pixel in blue, green, red order; alpha is dropped. Each row is
/// zero-padded to a 4-byte multiple.
pub fn pack(pixels: &PixelBuffer, stop: &dyn Stop) -> Result<BmpFile<'static>, BmpError> {
    if pixels.is_empty() {
        return Err(BmpError::EmptySource);
    }
    let width = pixels.width();
    let height = pixels.height();
    let too_large = || BmpError::DimensionsTooLarge { width, height };

    let header_width = i32::try_from(width).map_err(|_| too_large())?;
    let header_height = i32::try_from(height).map_err(|_| too_large())?;
    let stride = row_stride(width as usize, ENCODE_DEPTH).ok_or_else(too_large)?;
    let data_len = stride.checked_mul(height as usize).ok_or_else(too_large)?;
    let image_data_size = u32::try_from(data_len).map_err(|_| too_large())?;

    let info_header =
        InfoHeader::for_encode(header_width, -header_height, ENCODE_DEPTH, image_data_size);
    let file_header =
        FileHeader::for_encode(HEADERS_LEN as u32, image_data_size).ok_or_else(too_large)?;

    let mut stream = vec![0u8; data_len];
    for (row_idx, (row, out)) in pixels
        .rows()
        .zip(stream.chunks_exact_mut(stride))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (px, dst) in row.iter().zip(out.chunks_exact_mut(3)) {
            dst.copy_from_slice(&[px.blue, px.green, px.red]);
        }
    }

    log::trace!("bmp: packed {width}x{height}, stride {stride}, {data_len} bytes");

    Ok(BmpFile {
        file_header,
        info_header,
        palette: None,
        pixel_data: Some(Cow::Owned(stream)),
    })
}

/// Pack and serialize `pixels` to BMP bytes.
pub fn encode_bmp(pixels: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    Ok(pack(pixels, stop)?.to_bytes())
}
