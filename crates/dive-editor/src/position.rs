//! Cursor position on screen.
//!
//! Coordinates are **0-indexed**. The escape sequence that places the
//! terminal cursor is 1-indexed; that conversion lives in `dive_term::ansi`
//! and never belongs here.

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A screen cell: (row, column), both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    /// The top-left cell.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}
