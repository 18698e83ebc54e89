use crate::bmp::Orientation;

/// Header summary returned by [`crate::probe`], available without decoding
/// any pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Decoded width, `|header width|`.
    pub width: u32,
    /// Decoded height, `|header height|`.
    pub height: u32,
    pub bits_per_pixel: u16,
    /// Palette entries the file declares (0 for direct color).
    pub palette_len: u32,
    pub orientation: Orientation,
    pub compression: u32,
}

impl ImageInfo {
    /// Whether [`crate::decode`] can handle this file's depth and compression.
    pub fn is_supported(&self) -> bool {
        self.compression == crate::bmp::COMPRESSION_NONE
            && crate::bmp::SUPPORTED_DEPTHS.contains(&self.bits_per_pixel)
    }
}
