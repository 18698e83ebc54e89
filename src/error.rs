use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and encoding.
///
/// Every variant aborts the whole operation; no partial pixel buffer is ever
/// returned alongside an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Fewer than 54 header bytes, or the file does not start with `BM`.
    #[error("malformed BMP header: {0}")]
    MalformedHeader(String),

    #[error("truncated palette: need {needed} bytes, got {actual}")]
    TruncatedPalette { needed: usize, actual: usize },

    #[error("palette required for this bit depth but none present")]
    MissingPaletteData,

    #[error("no pixel data present")]
    MissingPixelData,

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedPixelData { needed: usize, actual: usize },

    /// A decoded index does not address a palette entry.
    #[error("palette index {index} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange { index: u32, len: usize },

    #[error("cannot encode an empty pixel buffer")]
    EmptySource,

    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// Reading or writing a file failed (`std` feature only; uninhabited otherwise).
    #[error("I/O error: {0}")]
    Io(#[source] IoError),
}

/// I/O error carried by [`BmpError::Io`].
#[cfg(feature = "std")]
pub type IoError = std::io::Error;

/// I/O error carried by [`BmpError::Io`].
#[cfg(not(feature = "std"))]
pub type IoError = core::convert::Infallible;

#[cfg(feature = "std")]
impl From<std::io::Error> for BmpError {
    fn from(e: std::io::Error) -> Self {
        BmpError::Io(e)
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
