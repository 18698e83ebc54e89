//! BMP file header (14 bytes) and BITMAPINFOHEADER (40 bytes).
//!
//! Both headers are little-endian with no padding between fields:
//!
//! ```text
//! offset  size  field
//!      0     2  signature "BM"
//!      2     4  file size
//!      6     2  reserved
//!      8     2  reserved
//!     10     4  pixel data offset
//!     14     4  info header size
//!     18     4  width  (i32, negative = columns right-to-left)
//!     22     4  height (i32, positive = rows bottom-up)
//!     26     2  color planes
//!     28     2  bits per pixel
//!     30     4  compression
//!     34     4  image data size
//!     38     4  x pixels per meter (i32)
//!     42     4  y pixels per meter (i32)
//!     46     4  colors used
//!     50     4  important colors
//! ```

use alloc::vec::Vec;
use core::fmt;

use super::utils::{le_i32, le_u16, le_u32};
use crate::error::BmpError;

pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
/// Combined size of both headers; also the pixel offset of files we write.
pub const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

pub const SIGNATURE: [u8; 2] = *b"BM";

/// `BI_RGB`: uncompressed pixels.
pub const COMPRESSION_NONE: u32 = 0;

/// Bit depths the decoder accepts.
pub const SUPPORTED_DEPTHS: [u16; 7] = [1, 2, 4, 8, 16, 24, 32];

/// Deepest bit depth that is palette-indexed.
pub const MAX_PALETTE_DEPTH: u16 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the pixel stream.
    pub pixel_data_offset: u32,
}

impl FileHeader {
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if data.len() < FILE_HEADER_LEN {
            return Err(short_header(data.len()));
        }
        let signature = [data[0], data[1]];
        if signature != SIGNATURE {
            return Err(BmpError::MalformedHeader(alloc::format!(
                "signature {:#04x} {:#04x} is not \"BM\"",
                signature[0],
                signature[1]
            )));
        }
        Ok(Self {
            signature,
            file_size: le_u32(data, 2),
            reserved1: le_u16(data, 6),
            reserved2: le_u16(data, 8),
            pixel_data_offset: le_u32(data, 10),
        })
    }

    /// Header for a file whose pixel stream starts at `pixel_data_offset` and
    /// runs for `image_data_size` bytes.
    pub fn for_encode(pixel_data_offset: u32, image_data_size: u32) -> Option<Self> {
        Some(Self {
            signature: SIGNATURE,
            file_size: pixel_data_offset.checked_add(image_data_size)?,
            reserved1: 0,
            reserved2: 0,
            pixel_data_offset,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.pixel_data_offset.to_le_bytes());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// May be 0 for uncompressed files; never trusted for stream length.
    pub image_data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    /// Palette entry count. A stored 0 reads back as `1 << bits_per_pixel`
    /// for palette-indexed depths.
    pub used_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    /// Parse the info header from the 40 bytes starting at `data[14]`.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if data.len() < HEADERS_LEN {
            return Err(short_header(data.len()));
        }
        let d = &data[FILE_HEADER_LEN..HEADERS_LEN];
        let header_size = le_u32(d, 0);
        // OS/2 core headers (12 bytes) and other short layouts put different
        // fields at these offsets.
        if header_size < INFO_HEADER_LEN as u32 {
            return Err(BmpError::MalformedHeader(alloc::format!(
                "info header size {header_size} is below {INFO_HEADER_LEN}"
            )));
        }
        let bits_per_pixel = le_u16(d, 14);
        let mut used_colors = le_u32(d, 32);
        if used_colors == 0 && bits_per_pixel <= MAX_PALETTE_DEPTH {
            used_colors = 1u32 << bits_per_pixel;
        }
        Ok(Self {
            header_size,
            width: le_i32(d, 4),
            height: le_i32(d, 8),
            planes: le_u16(d, 12),
            bits_per_pixel,
            compression: le_u32(d, 16),
            image_data_size: le_u32(d, 20),
            x_pixels_per_meter: le_i32(d, 24),
            y_pixels_per_meter: le_i32(d, 28),
            used_colors,
            important_colors: le_u32(d, 36),
        })
    }

    /// Canonical uncompressed 40-byte header. `height` keeps its sign, so a
    /// negative value marks top-down storage.
    pub fn for_encode(width: i32, height: i32, bits_per_pixel: u16, image_data_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_LEN as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel,
            compression: COMPRESSION_NONE,
            image_data_size,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            used_colors: 0,
            important_colors: 0,
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_data_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.used_colors.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }

    /// Decoded grid width, `|width|`.
    pub fn columns(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Decoded grid height, `|height|`.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn is_palettized(&self) -> bool {
        self.bits_per_pixel <= MAX_PALETTE_DEPTH
    }

    /// Where the palette starts: right after the info header, whatever its
    /// declared size. `None` if that offset does not fit in `usize`.
    pub fn palette_offset(&self) -> Option<usize> {
        usize::try_from(self.header_size)
            .ok()?
            .checked_add(FILE_HEADER_LEN)
    }
}

/// Parse both headers from the first 54 bytes of `data`.
pub fn parse_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), BmpError> {
    if data.len() < HEADERS_LEN {
        return Err(short_header(data.len()));
    }
    Ok((FileHeader::parse(data)?, InfoHeader::parse(data)?))
}

fn short_header(len: usize) -> BmpError {
    BmpError::MalformedHeader(alloc::format!(
        "need {HEADERS_LEN} header bytes, got {len}"
    ))
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Type: {}{}",
            char::from(self.signature[0]),
            char::from(self.signature[1])
        )?;
        writeln!(f, "File Size: {} Bytes", self.file_size)?;
        write!(f, "Start Address: {:#x}", self.pixel_data_offset)
    }
}

impl fmt::Display for InfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}", self.header_size)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Planes: {}", self.planes)?;
        writeln!(f, "Bits Per Pixel: {}", self.bits_per_pixel)?;
        writeln!(f, "Compression: {}", self.compression)?;
        writeln!(f, "Image Data Size: {}", self.image_data_size)?;
        writeln!(f, "XPixelsPerMeter: {}", self.x_pixels_per_meter)?;
        writeln!(f, "YPixelsPerMeter: {}", self.y_pixels_per_meter)?;
        writeln!(f, "Palette Entry Counts: {}", self.used_colors)?;
        write!(f, "Palette Important: {}", self.important_colors)
    }
}
