//! Key event and key code types, trimmed from the teacher's broader
//! crossterm-style event model down to what the emitting side (§4.4) needs:
//! no keyboard-enhancement-protocol state, no base-layout/alternate-key
//! fields, since those describe what a *parser* reading host-bound bytes
//! would reconstruct, not what a caller asking us to encode a key already
//! knows.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT   = 0b0_0001;
        const CONTROL = 0b0_0010;
        const ALT     = 0b0_0100;
        const SUPER   = 0b0_1000;
        /// Distinct from `ALT`: on keyboards/platforms with a separate Meta
        /// key, `meta_sends_escape`/`alt_sends_what` apply to whichever of
        /// the two is actually held.
        const META    = 0b1_0000;
    }
}

/// Which key was pressed/released/auto-repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Delete,
    Insert,
    /// `F(1)` is F1, etc.
    F(u8),
    Char(char),
    Esc,
}

/// Whether this event is the initial press, an auto-repeat, or a release.
/// Only [`KeyEventKind::Press`] (and, per xterm convention, `Repeat`)
/// produce a byte sequence; `Release` is only meaningful under the Kitty
/// keyboard protocol, which is out of scope here (§9 non-goal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn new_with_kind(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Self {
        Self {
            code,
            modifiers,
            kind,
        }
    }
}
