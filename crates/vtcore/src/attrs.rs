//! Current SGR (Select Graphic Rendition) state and the style interner that
//! turns repeated [`TextAttributes`] values into cheap, `Copy` [`StyleId`]s.

use std::collections::HashMap;

use bitflags::bitflags;

/// A color as carried by SGR/OSC sequences: the terminal's default, a
/// 256-color palette index, or a direct 24-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Inherit the default foreground/background for the role in question.
    #[default]
    Default,
    /// Index into the 256-color palette (0-15 are the ANSI/bright colors).
    Palette(u8),
    /// Direct 24-bit color (SGR 38/48;2;r;g;b).
    Rgb(u8, u8, u8),
}

bitflags! {
    /// Boolean SGR rendition flags, one bit per attribute.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct CellFlags: u16 {
        const BOLD          = 0b0000_0000_0001;
        const DIM           = 0b0000_0000_0010;
        const ITALIC        = 0b0000_0000_0100;
        const UNDERLINE     = 0b0000_0000_1000;
        const BLINK         = 0b0000_0001_0000;
        const INVERSE       = 0b0000_0010_0000;
        const INVISIBLE     = 0b0000_0100_0000;
        const STRIKETHROUGH = 0b0000_1000_0000;
        /// Cell holds the leading column of a wide (2-column) grapheme.
        const WIDE          = 0b0001_0000_0000;
        /// Cell is the trailing, empty continuation column of a wide grapheme.
        const WIDE_CONTINUATION = 0b0010_0000_0000;
    }
}

/// The current graphic rendition: colors plus boolean flags.
///
/// `wide`/`wide_continuation` live in [`CellFlags`] but are per-cell state,
/// not part of the *current* SGR the parser accumulates; [`Cell`](crate::cell::Cell)
/// strips them out before interning so that two cells with identical colors
/// and text attributes share a [`StyleId`] regardless of width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextAttributes {
    pub fg: Color,
    pub bg: Color,
    pub flags: CellFlags,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            flags: CellFlags::empty(),
        }
    }
}

impl TextAttributes {
    /// The attributes a freshly reset terminal starts with.
    #[must_use]
    pub fn reset() -> Self {
        Self::default()
    }

    /// Attributes with the per-cell width flags stripped, for interning.
    #[must_use]
    fn style_key(&self) -> Self {
        Self {
            fg: self.fg,
            bg: self.bg,
            flags: self.flags - (CellFlags::WIDE | CellFlags::WIDE_CONTINUATION),
        }
    }
}

/// Index into a [`StyleInterner`]'s table.
///
/// `Default` resolves to the interner's reset/default style, which is always
/// interned at construction time as id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleId(u32);

/// De-duplicates [`TextAttributes`] so that [`Cell`](crate::cell::Cell) can
/// carry a 4-byte [`StyleId`] instead of the full attribute struct.
///
/// Kept per-[`Screen`](crate::screen::Screen) (see `DESIGN.md`): primary and
/// alternate screens each keep their own interner, since no spec'd contract
/// requires sharing styles across them.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleInterner {
    styles: Vec<TextAttributes>,
    lookup: HashMap<TextAttributes, StyleId>,
}

impl Default for StyleInterner {
    fn default() -> Self {
        let default_style = TextAttributes::default();
        let mut lookup = HashMap::new();
        lookup.insert(default_style, StyleId(0));
        Self {
            styles: vec![default_style],
            lookup,
        }
    }
}

impl StyleInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id for the interner's default (all-reset) style.
    #[must_use]
    pub fn default_style(&self) -> StyleId {
        StyleId(0)
    }

    /// Intern `attrs`, returning an existing id if an equivalent style
    /// (ignoring the per-cell width flags) was already interned.
    pub fn intern(&mut self, attrs: TextAttributes) -> StyleId {
        let key = attrs.style_key();
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = StyleId(u32::try_from(self.styles.len()).expect("style table overflow"));
        self.styles.push(key);
        self.lookup.insert(key, id);
        id
    }

    /// Resolve a previously interned id back to its attributes.
    #[must_use]
    pub fn resolve(&self, id: StyleId) -> TextAttributes {
        self.styles[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_id_zero() {
        let interner = StyleInterner::new();
        assert_eq!(interner.default_style(), StyleId(0));
        assert_eq!(interner.resolve(StyleId(0)), TextAttributes::default());
    }

    #[test]
    fn identical_styles_share_an_id() {
        let mut interner = StyleInterner::new();
        let red = TextAttributes {
            fg: Color::Palette(1),
            ..TextAttributes::default()
        };
        let a = interner.intern(red);
        let b = interner.intern(red);
        assert_eq!(a, b);
        assert_ne!(a, interner.default_style());
    }

    #[test]
    fn width_flags_do_not_fork_the_style() {
        let mut interner = StyleInterner::new();
        let plain = TextAttributes::default();
        let mut wide = plain;
        wide.flags |= CellFlags::WIDE;
        assert_eq!(interner.intern(plain), interner.intern(wide));
    }
}
