use core::mem::size_of;

use crate::bmp::InfoHeader;
use crate::error::BmpError;
use crate::pixel::Bgra;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Every limit is checked against
/// the parsed headers before any pixel memory is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes held while decoding, see [`Limits::decode_footprint`].
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Peak bytes a decode of a `width` x `height` file holds: the raw value
    /// grid of the first pass plus the [`Bgra`] grid it resolves into.
    pub fn decode_footprint(width: u32, height: u32) -> u64 {
        let per_pixel = (size_of::<u32>() + size_of::<Bgra>()) as u64;
        (u64::from(width) * u64::from(height)).saturating_mul(per_pixel)
    }

    /// Reject a file whose decoded grid would exceed any limit.
    pub(crate) fn check_header(&self, info: &InfoHeader) -> Result<(), BmpError> {
        let width = info.columns();
        let height = info.rows();
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;
        exceeds(
            "decode memory",
            Self::decode_footprint(width, height),
            self.max_memory_bytes,
        )
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BmpError> {
    match limit {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
