//! A BMP file split into its parts: headers, optional palette, pixel stream.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use super::header::{
    COMPRESSION_NONE, FileHeader, HEADERS_LEN, InfoHeader, SUPPORTED_DEPTHS, parse_headers,
};
use super::orientation::Orientation;
use super::palette::Palette;
use crate::error::BmpError;

/// Parsed container. Borrows the pixel stream from the input on decode and
/// owns it on encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpFile<'a> {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    /// Present for palette-indexed depths when the file carries a color table.
    pub palette: Option<Palette>,
    /// Bytes from `pixel_data_offset` to the end of the input, or `None` if
    /// the offset points past the end.
    pub pixel_data: Option<Cow<'a, [u8]>>,
}

impl<'a> BmpFile<'a> {
    /// Split `data` into headers, palette and pixel stream.
    ///
    /// Only uncompressed files at 1, 2, 4, 8, 16, 24 or 32 bits per pixel are
    /// accepted. A palette is read for depths up to 16; a palette offset past
    /// the end of the input leaves `palette` empty so the unpacker can report
    /// it as missing.
    pub fn parse(data: &'a [u8]) -> Result<Self, BmpError> {
        let (file_header, info_header) = parse_headers(data)?;

        if info_header.compression != COMPRESSION_NONE {
            return Err(BmpError::UnsupportedCompression(info_header.compression));
        }
        if !SUPPORTED_DEPTHS.contains(&info_header.bits_per_pixel) {
            return Err(BmpError::UnsupportedBitDepth(info_header.bits_per_pixel));
        }

        let palette = if info_header.is_palettized() {
            let offset = info_header.palette_offset().ok_or_else(|| {
                BmpError::MalformedHeader(alloc::format!(
                    "info header size {} runs past addressable memory",
                    info_header.header_size
                ))
            })?;
            match data.get(offset..) {
                Some(rest) if !rest.is_empty() => {
                    Some(Palette::parse(rest, info_header.used_colors)?)
                }
                _ => None,
            }
        } else {
            None
        };

        let pixel_data = data
            .get(file_header.pixel_data_offset as usize..)
            .filter(|rest| !rest.is_empty())
            .map(Cow::Borrowed);

        log::debug!(
            "bmp: {}x{} at {} bpp, {} palette entries, pixels at {:#x}",
            info_header.width,
            info_header.height,
            info_header.bits_per_pixel,
            palette.as_ref().map_or(0, Palette::len),
            file_header.pixel_data_offset
        );

        Ok(Self {
            file_header,
            info_header,
            palette,
            pixel_data,
        })
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.info_header.width, self.info_header.height)
    }

    /// Serialize headers, palette and pixel stream back to bytes.
    ///
    /// The palette is written directly after the 40-byte info header and the
    /// stream at `pixel_data_offset`, zero-filling any gap in between.
    pub fn to_bytes(&self) -> Vec<u8> {
        let stream: &[u8] = self.pixel_data.as_deref().unwrap_or(&[]);
        let offset = self.file_header.pixel_data_offset as usize;
        let mut out = Vec::with_capacity(offset.max(HEADERS_LEN) + stream.len());
        self.file_header.write_to(&mut out);
        self.info_header.write_to(&mut out);
        if let Some(palette) = &self.palette {
            palette.write_to(&mut out);
        }
        if out.len() < offset {
            out.resize(offset, 0);
        }
        out.extend_from_slice(stream);
        out
    }

    /// Detach from the input buffer.
    pub fn into_owned(self) -> BmpFile<'static> {
        BmpFile {
            file_header: self.file_header,
            info_header: self.info_header,
            palette: self.palette,
            pixel_data: self
                .pixel_data
                .map(|d| Cow::Owned(d.into_owned())),
        }
    }
}

impl fmt::Display for BmpFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.file_header)?;
        writeln!(f, "{}", self.info_header)?;
        let orientation = self.orientation();
        if orientation.rows_inverted() || orientation.columns_inverted() {
            write!(f, "{orientation}")?;
        }
        Ok(())
    }
}
