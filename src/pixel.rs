use alloc::vec::Vec;

use crate::error::BmpError;

/// One 4-channel pixel in BMP's native channel order.
///
/// The same layout serves as a palette entry on disk (`[b, g, r, a]`).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgra {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

/// A palette entry is stored exactly like a decoded pixel.
pub type PaletteEntry = Bgra;

impl Bgra {
    pub const fn new(blue: u8, green: u8, red: u8, alpha: u8) -> Self {
        Self {
            blue,
            green,
            red,
            alpha,
        }
    }

    /// Build a pixel from its red, green and blue channels with the given alpha.
    pub const fn from_rgb(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(blue, green, red, alpha)
    }

    /// Interpret a direct-color value the way it sits in the file: the
    /// little-endian bytes of `v` are blue, green, red, alpha.
    pub const fn from_le_u32(v: u32) -> Self {
        let [blue, green, red, alpha] = v.to_le_bytes();
        Self::new(blue, green, red, alpha)
    }

    pub const fn to_le_u32(self) -> u32 {
        u32::from_le_bytes([self.blue, self.green, self.red, self.alpha])
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.blue, self.green, self.red, self.alpha]
    }

    /// `(red, green, blue)`, dropping alpha.
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Same color ignoring the alpha channel.
    pub const fn same_rgb(self, other: Bgra) -> bool {
        self.red == other.red && self.green == other.green && self.blue == other.blue
    }
}

#[cfg(feature = "rgb")]
impl From<Bgra> for rgb::RGBA8 {
    fn from(p: Bgra) -> Self {
        rgb::RGBA8::new(p.red, p.green, p.blue, p.alpha)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Bgra {
    fn from(p: rgb::RGBA8) -> Self {
        Bgra::from_rgb(p.r, p.g, p.b, p.a)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Bgra {
    fn from(p: rgb::RGB8) -> Self {
        Bgra::from_rgb(p.r, p.g, p.b, 255)
    }
}

/// Decoded image: a dense, row-major grid of [`Bgra`] pixels with its origin
/// at the top-left corner.
///
/// `pixels().len() == width * height` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Bgra>,
}

impl PixelBuffer {
    /// Wrap an existing pixel vector.
    ///
    /// Fails with [`BmpError::BufferTooSmall`] when `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Bgra>) -> Result<Self, BmpError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::BufferTooSmall {
                needed: expected * 4,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `width` x `height` buffer filled with `fill`.
    pub fn filled(width: u32, height: u32, fill: Bgra) -> Result<Self, BmpError> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: alloc::vec![fill; count],
        })
    }

    /// Build a buffer from packed `[b, g, r, a]` bytes.
    pub fn from_bgra_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BmpError> {
        let count = pixel_count(width, height)?;
        let needed = count
            .checked_mul(4)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        if bytes.len() < needed {
            return Err(BmpError::BufferTooSmall {
                needed,
                actual: bytes.len(),
            });
        }
        let pixels = bytes[..needed]
            .chunks_exact(4)
            .map(|c| Bgra::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Bgra] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Bgra] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Bgra> {
        self.pixels
    }

    /// Pixel at `(row, column)`, or `None` outside the grid.
    pub fn get(&self, row: u32, column: u32) -> Option<Bgra> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.pixels
            .get(row as usize * self.width as usize + column as usize)
            .copied()
    }

    /// Overwrite the pixel at `(row, column)`. Returns false outside the grid.
    pub fn set(&mut self, row: u32, column: u32, pixel: Bgra) -> bool {
        if row >= self.height || column >= self.width {
            return false;
        }
        let idx = row as usize * self.width as usize + column as usize;
        match self.pixels.get_mut(idx) {
            Some(slot) => {
                *slot = pixel;
                true
            }
            None => false,
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Bgra]> {
        // chunks_exact(0) panics; a zero-width image has no pixels to yield.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Packed `[b, g, r, a]` bytes, row-major.
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Convert to typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgba8(&self) -> Vec<rgb::RGBA8> {
        self.pixels.iter().map(|&p| p.into()).collect()
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.to_rgba8(),
            self.width as usize,
            self.height as usize,
        )
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BmpError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}
