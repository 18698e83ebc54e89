//! Color table for palette-indexed bit depths (1 through 16).

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::{Bgra, PaletteEntry};

/// Ordered palette entries, addressed by the raw pixel values of an indexed
/// image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// Read `entry_count` 4-byte `[b, g, r, a]` entries from the front of `data`.
    pub fn parse(data: &[u8], entry_count: u32) -> Result<Self, BmpError> {
        let needed = (entry_count as usize)
            .checked_mul(4)
            .ok_or(BmpError::TruncatedPalette {
                needed: usize::MAX,
                actual: data.len(),
            })?;
        let bytes = data.get(..needed).ok_or(BmpError::TruncatedPalette {
            needed,
            actual: data.len(),
        })?;
        let entries = bytes
            .chunks_exact(4)
            .map(|c| Bgra::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { entries })
    }

    /// Color for a raw pixel value. Indices past the table are an error,
    /// never clamped or wrapped.
    pub fn lookup(&self, index: u32) -> Result<PaletteEntry, BmpError> {
        self.entries
            .get(index as usize)
            .copied()
            .ok_or(BmpError::PaletteIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        for entry in &self.entries {
            out.extend_from_slice(&entry.to_bytes());
        }
    }
}
