//! Cursor position/overflow tracking and the saved-cursor snapshot used by
//! DECSC/DECRC.

use crate::attrs::TextAttributes;
use crate::charset::CharsetState;

/// Cursor position plus the sticky "pending wrap" bit.
///
/// `overflow` is set when a write lands in the last column and wraparound is
/// enabled; it does not itself move the cursor past the last column (that
/// would violate the `cursor.col < width` invariant) — it just marks that the
/// *next* printed character should wrap first. See the `Overflow flag` entry
/// in the glossary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub overflow: bool,
}

impl Cursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `(row, col)`, clamped to `0..height`/`0..width`, clearing the
    /// overflow bit.
    pub fn set_position(&mut self, row: usize, col: usize, height: usize, width: usize) {
        self.row = row.min(height.saturating_sub(1));
        self.col = col.min(width.saturating_sub(1));
        self.overflow = false;
    }
}

/// Everything DECSC (`ESC 7`) captures and DECRC (`ESC 8`) restores: cursor
/// position/overflow, the current SGR attributes, and the G0..G3/GL/GR
/// character-set state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedCursor {
    pub cursor: Cursor,
    pub attrs: TextAttributes,
    pub charset: CharsetState,
    pub origin_mode: bool,
}

impl Default for SavedCursor {
    fn default() -> Self {
        Self {
            cursor: Cursor::default(),
            attrs: TextAttributes::default(),
            charset: CharsetState::default(),
            origin_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_position_clamps_to_grid() {
        let mut cursor = Cursor::new();
        cursor.set_position(100, 100, 24, 80);
        assert_eq!((cursor.row, cursor.col), (23, 79));
        assert!(!cursor.overflow);
    }

    #[test]
    fn set_position_clears_overflow() {
        let mut cursor = Cursor {
            row: 0,
            col: 79,
            overflow: true,
        };
        cursor.set_position(0, 5, 24, 80);
        assert!(!cursor.overflow);
    }
}
