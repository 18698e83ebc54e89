//! # bmpgrid
//!
//! Windows Bitmap (BMP) decoder and encoder built around a bit-level
//! unpacker/packer.
//!
//! Decoding turns a packed, row-padded pixel stream of any supported depth
//! into a dense top-left-origin grid of [`Bgra`] pixels: palette indices are
//! resolved, bottom-up rows and mirrored columns are put in logical order.
//! Encoding writes a grid back out as an uncompressed 24-bit top-down BMP.
//!
//! ## Supported Files
//!
//! - Uncompressed (`BI_RGB`) BITMAPINFOHEADER files and later header versions
//!   (extra header fields are skipped)
//! - 1, 2, 4, 8 and 16 bits per pixel through a palette
//! - 24 and 32 bits per pixel as direct `[b, g, r(, a)]` color
//! - Either axis inverted via the sign of the header width/height
//!
//! ## Non-Goals
//!
//! - RLE, bitfields, JPEG/PNG-in-BMP compression
//! - Color management
//! - Streaming or partial decode
//!
//! ## Usage
//!
//! ```
//! use bmpgrid::{Bgra, PixelBuffer};
//!
//! let mut image = PixelBuffer::filled(3, 2, Bgra::from_rgb(0, 0, 0, 255))?;
//! image.set(1, 2, Bgra::from_rgb(255, 128, 0, 255));
//!
//! let bytes = bmpgrid::encode(&image)?;
//! assert_eq!(&bytes[..2], b"BM");
//!
//! let decoded = bmpgrid::decode(&bytes)?;
//! assert_eq!(decoded.get(1, 2).map(Bgra::rgb), Some((255, 128, 0)));
//! # Ok::<(), bmpgrid::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, IoError};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{Bgra, PaletteEntry, PixelBuffer};

use alloc::vec::Vec;

/// Decode a complete BMP file into a pixel grid.
pub fn decode(data: &[u8]) -> Result<PixelBuffer, BmpError> {
    bmp::decode(data, None, &Unstoppable)
}

/// Decode, polling `stop` every 16 rows.
pub fn decode_with_stop(data: &[u8], stop: impl Stop) -> Result<PixelBuffer, BmpError> {
    bmp::decode(data, None, &stop)
}

/// Decode, rejecting images that exceed `limits` before allocating.
pub fn decode_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<PixelBuffer, BmpError> {
    bmp::decode(data, Some(limits), &stop)
}

/// Read the headers without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    bmp::probe(data)
}

/// Encode a pixel grid as an uncompressed 24-bit BMP. Alpha is dropped.
pub fn encode(pixels: &PixelBuffer) -> Result<Vec<u8>, BmpError> {
    bmp::encode_bmp(pixels, &Unstoppable)
}

/// Encode, polling `stop` every 16 rows.
pub fn encode_with_stop(pixels: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bmp::encode_bmp(pixels, &stop)
}

/// Read and decode a BMP file from disk.
#[cfg(feature = "std")]
pub fn read_file(path: impl AsRef<std::path::Path>) -> Result<PixelBuffer, BmpError> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Encode `pixels` and write them to disk as a 24-bit BMP.
#[cfg(feature = "std")]
pub fn write_file(path: impl AsRef<std::path::Path>, pixels: &PixelBuffer) -> Result<(), BmpError> {
    let bytes = encode(pixels)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
