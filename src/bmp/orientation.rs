//! Mapping from the physical order of the pixel stream to logical grid order.
//!
//! BMP rows are stored bottom-up unless the height is negative; a negative
//! width stores each row right-to-left. The unpacker enumerates the stream in
//! physical order and writes through a cursor that starts at
//! [`Traversal::start`], moves by [`Traversal::column_step`] after every pixel
//! and additionally by [`Traversal::row_step`] after every row.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Negative height, non-negative width.
    TopDown,
    /// Negative height, negative width.
    TopDownMirrored,
    /// Positive height, non-negative width. The BMP default.
    BottomUp,
    /// Positive height, negative width.
    BottomUpMirrored,
}

/// Cursor policy for one decode, in pixel units of the output grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traversal {
    pub start: isize,
    pub column_step: isize,
    pub row_step: isize,
}

impl Orientation {
    /// Orientation implied by the signed header dimensions. A zero height
    /// counts as top-down.
    pub const fn from_dimensions(width: i32, height: i32) -> Self {
        Self::from_flags(height > 0, width < 0)
    }

    pub const fn from_flags(rows_inverted: bool, columns_inverted: bool) -> Self {
        match (rows_inverted, columns_inverted) {
            (true, true) => Self::BottomUpMirrored,
            (true, false) => Self::BottomUp,
            (false, true) => Self::TopDownMirrored,
            (false, false) => Self::TopDown,
        }
    }

    pub const fn rows_inverted(self) -> bool {
        matches!(self, Self::BottomUp | Self::BottomUpMirrored)
    }

    pub const fn columns_inverted(self) -> bool {
        matches!(self, Self::TopDownMirrored | Self::BottomUpMirrored)
    }

    /// Cursor policy for a grid of `columns` x `rows`.
    ///
    /// Both dimensions must already fit in `isize` (the caller has allocated
    /// the grid).
    pub const fn traversal(self, columns: usize, rows: usize) -> Traversal {
        let cols = columns as isize;
        let size = (columns * rows) as isize;
        match self {
            Self::BottomUpMirrored => Traversal {
                start: size - 1,
                column_step: -1,
                row_step: 0,
            },
            Self::BottomUp => Traversal {
                start: size - cols,
                column_step: 1,
                row_step: -2 * cols,
            },
            Self::TopDownMirrored => Traversal {
                start: cols - 1,
                column_step: -1,
                row_step: 2 * cols,
            },
            Self::TopDown => Traversal {
                start: 0,
                column_step: 1,
                row_step: 0,
            },
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.rows_inverted() {
            f.write_str("Row Inverted")?;
            first = false;
        }
        if self.columns_inverted() {
            if !first {
                f.write_str("\n")?;
            }
            f.write_str("Column Inverted")?;
            first = false;
        }
        if first {
            f.write_str("Top-Down")?;
        }
        Ok(())
    }
}
