//! `Row`/`Cell` grid primitives: a single grid position and the text cluster
//! it carries.

use std::fmt;

use crate::attrs::StyleId;
use crate::traits::TerseDisplay;

/// One grid position: text content, interned style, and wide-glyph bits.
///
/// The text content is a `Box<str>`: empty for a never-written or erased
/// cell, a single `char`'s worth of bytes for the common case, or a base
/// character plus combining marks merged into one short grapheme cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    text: Box<str>,
    pub style: StyleId,
    /// Occupies two columns; the next cell is a [`Self::wc_trailing`] marker.
    pub wide: bool,
    /// This cell is the empty trailing half of a wide glyph to its left.
    pub wc_trailing: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            text: Box::from(""),
            style: StyleId::default(),
            wide: false,
            wc_trailing: false,
        }
    }
}

impl Cell {
    /// A blank cell carrying `style` (used to pad erased regions so they
    /// show the right background).
    #[must_use]
    pub fn blank(style: StyleId) -> Self {
        Self {
            text: Box::from(""),
            style,
            wide: false,
            wc_trailing: false,
        }
    }

    /// A cell holding a single grapheme cluster (base char + any combining
    /// marks already merged into `grapheme`).
    #[must_use]
    pub fn new(grapheme: &str, style: StyleId, wide: bool) -> Self {
        Self {
            text: Box::from(grapheme),
            style,
            wide,
            wc_trailing: false,
        }
    }

    /// The trailing, invisible half of a wide glyph.
    #[must_use]
    pub fn wide_continuation(style: StyleId) -> Self {
        Self {
            text: Box::from(""),
            style,
            wide: false,
            wc_trailing: true,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && !self.wc_trailing
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            f.write_str(" ")
        } else {
            f.write_str(&self.text)
        }
    }
}

impl TerseDisplay for Cell {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wc_trailing {
            f.write_str("\u{2026}") // trailing half of a wide glyph
        } else if self.is_blank() {
            f.write_str("\u{00B7}")
        } else {
            f.write_str(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cell_has_no_text() {
        let cell = Cell::blank(StyleId::default());
        assert!(cell.is_blank());
        assert_eq!(cell.text(), "");
    }

    #[test]
    fn wide_continuation_is_blank_but_marked() {
        let cell = Cell::wide_continuation(StyleId::default());
        assert!(cell.wc_trailing);
        assert!(cell.is_blank());
    }

    #[test]
    fn display_renders_space_for_blank() {
        let cell = Cell::blank(StyleId::default());
        assert_eq!(format!("{cell}"), " ");
    }
}
