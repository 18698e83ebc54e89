//! Windows Bitmap container: headers, palette, orientation and the bit-level
//! unpacker/packer.
//!
//! Use top-level [`crate::decode`], [`crate::encode`], etc. for whole-file
//! conversion; the items here expose each stage on its own.

mod decode;
mod encode;
mod file;
mod header;
mod orientation;
mod palette;
#[cfg(test)]
pub(crate) mod testing;
mod utils;

pub use decode::unpack;
pub use encode::{ENCODE_DEPTH, encode_bmp, pack};
pub use file::BmpFile;
pub use header::{
    COMPRESSION_NONE, FILE_HEADER_LEN, FileHeader, HEADERS_LEN, INFO_HEADER_LEN, InfoHeader,
    MAX_PALETTE_DEPTH, SIGNATURE, SUPPORTED_DEPTHS, parse_headers,
};
pub use orientation::{Orientation, Traversal};
pub use palette::Palette;

use crate::error::BmpError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use enough::Stop;

/// Decode a complete BMP file.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpError> {
    let file = BmpFile::parse(data)?;
    if let Some(limits) = limits {
        limits.check_header(&file.info_header)?;
    }
    stop.check()?;
    unpack(
        &file.info_header,
        file.palette.as_ref(),
        file.pixel_data.as_deref(),
        stop,
    )
}

/// Header-only inspection.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    let (_, info) = parse_headers(data)?;
    Ok(ImageInfo {
        width: info.columns(),
        height: info.rows(),
        bits_per_pixel: info.bits_per_pixel,
        palette_len: if info.is_palettized() {
            info.used_colors
        } else {
            0
        },
        orientation: Orientation::from_dimensions(info.width, info.height),
        compression: info.compression,
    })
}
