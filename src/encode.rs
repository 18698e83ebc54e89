use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::PixelBuffer;
use enough::Stop;

/// Builder for encoding to an uncompressed 24-bit BMP.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    _private: (),
}

impl EncodeRequest {
    /// 24-bit top-down BMP; the only format the encoder writes.
    pub fn bmp() -> Self {
        Self { _private: () }
    }

    pub fn encode(self, pixels: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode_bmp(pixels, &stop)
    }

    /// Encode packed `[b, g, r, a]` bytes of a `width` x `height` image.
    pub fn encode_bgra_bytes(
        self,
        bgra: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BmpError> {
        if bgra.is_empty() {
            return Err(BmpError::EmptySource);
        }
        let pixels = PixelBuffer::from_bgra_bytes(width, height, bgra)?;
        self.encode(&pixels, stop)
    }
}
