//! Little-endian field access and bit extraction over packed BMP streams.

/// Mask selecting the low `depth` bits. 32-bit depth is special-cased since
/// `1u32 << 32` overflows.
pub(crate) const fn depth_mask(depth: u16) -> u32 {
    if depth >= 32 {
        u32::MAX
    } else {
        (1u32 << depth) - 1
    }
}

/// Bytes per packed row at `depth` bits per pixel, padded to a 4-byte multiple.
pub(crate) fn row_stride(width: usize, depth: u16) -> Option<usize> {
    width
        .checked_mul(usize::from(depth))?
        .checked_add(31)
        .map(|bits| (bits / 32) * 4)
}

/// Round a bit offset up to the next 32-bit boundary.
pub(crate) const fn align_row(bit_offset: u64) -> u64 {
    (bit_offset + 31) & !31
}

/// Extract one `depth`-bit pixel value starting at `bit_offset`.
///
/// Sub-byte depths (1, 2, 4) hold the leftmost pixel in the most significant
/// bits of each byte, which is how BMP writers lay them out. Readers that take
/// `offset & 7` as the shift from the low end get the pixels of each byte in
/// reverse order. Whole-byte depths (8, 16, 24, 32) are little-endian.
///
/// Offsets are kept in `u64` so streams past 512 MiB do not overflow a 32-bit
/// `usize`. Returns `None` if the field runs past the end of `stream`.
pub(crate) fn extract_bits(stream: &[u8], bit_offset: u64, depth: u16) -> Option<u32> {
    let byte_index = usize::try_from(bit_offset >> 3).ok()?;
    let mask = depth_mask(depth);
    if depth < 8 {
        let byte = u32::from(*stream.get(byte_index)?);
        let bit_in_byte = (bit_offset & 7) as u32;
        let shift = 8 - u32::from(depth) - bit_in_byte;
        Some((byte >> shift) & mask)
    } else {
        let width = usize::from(depth / 8);
        let field = stream.get(byte_index..byte_index.checked_add(width)?)?;
        let value = field
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        Some(value & mask)
    }
}

pub(crate) fn le_u16(data: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([data[pos], data[pos + 1]])
}

pub(crate) fn le_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

pub(crate) fn le_i32(data: &[u8], pos: usize) -> i32 {
    le_u32(data, pos) as i32
}
