//! ECMA-35 character-set designation (G0..G3) and the 94-entry GL
//! translation tables used when the active set is not plain ASCII.
//!
//! This backs the legacy fallback path named in §1: UTF-8 is the default,
//! but `ESC ( 0` (DEC Special Graphics, line drawing) and a couple of
//! national variants must still translate 7-bit GL bytes the way real
//! terminals do.

/// One of the four designatable character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterSet {
    /// `B` — plain ASCII, no translation.
    #[default]
    Ascii,
    /// `0` — DEC Special Graphics (line-drawing glyphs).
    DecSpecialGraphics,
    /// `A` — UK national replacement set (`#` becomes `£`).
    UkNational,
}

impl CharacterSet {
    /// Resolve the designator byte following `ESC ( / ) / * / +` to a
    /// character set. Unknown designators fall back to ASCII (no
    /// translation), matching xterm's tolerant behavior for unsupported
    /// national sets.
    #[must_use]
    pub fn from_designator(byte: u8) -> Self {
        match byte {
            b'0' => Self::DecSpecialGraphics,
            b'A' => Self::UkNational,
            _ => Self::Ascii,
        }
    }

    /// Translate a single GL byte (0x20..=0x7E) through this character set.
    /// Bytes outside that range, and sets with no translation, pass through
    /// unchanged.
    #[must_use]
    pub fn translate(self, ch: char) -> char {
        match self {
            Self::Ascii => ch,
            Self::DecSpecialGraphics => dec_special_graphics(ch),
            Self::UkNational => {
                if ch == '#' {
                    '£'
                } else {
                    ch
                }
            }
        }
    }
}

/// The VT100 DEC Special Graphics set: a handful of GL bytes (mostly the
/// lowercase letters `j`..`~`) map to line-drawing glyphs; everything else in
/// the 94-char GL range passes through unchanged.
#[rustfmt::skip]
fn dec_special_graphics(ch: char) -> char {
    match ch {
        '`' => '◆', 'a' => '▒',
        'b' => '␉', 'c' => '␌', 'd' => '␍', 'e' => '␊',
        'f' => '°', 'g' => '±', 'h' => '␤', 'i' => '␋',
        'j' => '┘', 'k' => '┐', 'l' => '┌', 'm' => '└',
        'n' => '┼', 'o' => '⎺', 'p' => '⎻', 'q' => '─',
        'r' => '⎼', 's' => '⎽', 't' => '├', 'u' => '┤',
        'v' => '┴', 'w' => '┬', 'x' => '│', 'y' => '≤',
        'z' => '≥', '{' => 'π', '|' => '≠', '}' => '£',
        '~' => '·',
        other => other,
    }
}

/// The four character-set slots plus the GL/GR shift state (`SI`/`SO`,
/// `LS2`/`LS3`), and the saved-cursor copy of the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetState {
    g: [CharacterSet; 4],
    gl: usize,
    gr: usize,
}

impl Default for CharsetState {
    fn default() -> Self {
        Self {
            g: [CharacterSet::Ascii; 4],
            gl: 0,
            gr: 1,
        }
    }
}

impl CharsetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `set` to slot `slot` (0..=3, corresponding to G0..G3).
    pub fn designate(&mut self, slot: usize, set: CharacterSet) {
        self.g[slot] = set;
    }

    /// Shift GL to point at slot `slot`. Used by `SO`/`SI`/`LS2`/`LS3`.
    pub fn shift_gl(&mut self, slot: usize) {
        self.gl = slot;
    }

    /// The character set currently active in GL (the one plain-text bytes
    /// are translated through).
    #[must_use]
    pub fn active(&self) -> CharacterSet {
        self.g[self.gl]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_special_graphics_maps_lowercase_q_to_horizontal_line() {
        let set = CharacterSet::DecSpecialGraphics;
        assert_eq!(set.translate('q'), '─');
        assert_eq!(set.translate('j'), '┘');
    }

    #[test]
    fn ascii_is_identity() {
        assert_eq!(CharacterSet::Ascii.translate('q'), 'q');
    }

    #[test]
    fn shift_in_out_changes_active_set() {
        let mut state = CharsetState::new();
        state.designate(1, CharacterSet::DecSpecialGraphics);
        assert_eq!(state.active(), CharacterSet::Ascii);
        state.shift_gl(1);
        assert_eq!(state.active(), CharacterSet::DecSpecialGraphics);
    }

    #[test]
    fn unknown_designator_falls_back_to_ascii() {
        assert_eq!(CharacterSet::from_designator(b'Z'), CharacterSet::Ascii);
    }
}
