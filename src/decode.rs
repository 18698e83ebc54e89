use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use enough::Stop;

/// Builder for a decode with optional resource limits.
///
/// ```
/// use bmpgrid::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let err = DecodeRequest::new(&[0u8; 10]).with_limits(&limits).decode(Unstoppable);
/// assert!(err.is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the whole file. `stop` is polled every 16 rows.
    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
