//! The handful of terminal modes that change how a key/mouse event is
//! encoded. Deliberately a separate, smaller type than
//! `vtcore::modes::TerminalModes` — this crate has no dependency on
//! `vtcore` (same layering the teacher's workspace uses: `vtinput` is a
//! leaf crate), so the encoder only takes the few fields it actually reads.

/// How Alt/Meta is signaled in the encoded byte sequence. Mirrors
/// `vtcore::modes::AltSendsWhat`; kept as a separate type for the same
/// leaf-crate reason as the rest of this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltSendsWhat {
    #[default]
    Escape,
    EightBit,
    BrowserKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEncoderModes {
    /// DECCKM: cursor keys send `SS3` instead of `CSI` with no modifiers.
    pub application_cursor: bool,
    /// DECKPAM: keypad keys send `SS3` sequences instead of their literal
    /// character.
    pub application_keypad: bool,
    pub alt_sends_what: AltSendsWhat,
    /// Default true (BS sends `0x7F`); DECBKM (mode 67) inverts this to
    /// `0x08`.
    pub backspace_sends_backspace: bool,
    /// Whether a held Meta key (distinct from Alt) prefixes the byte
    /// sequence with ESC, independent of `alt_sends_what`.
    pub meta_sends_escape: bool,
    /// Home/End scroll the local view instead of sending a CSI sequence.
    pub home_keys_scroll: bool,
    /// PageUp/PageDown scroll the local view instead of sending a CSI
    /// sequence.
    pub page_keys_scroll: bool,
}

impl Default for KeyEncoderModes {
    fn default() -> Self {
        Self {
            application_cursor: false,
            application_keypad: false,
            alt_sends_what: AltSendsWhat::default(),
            backspace_sends_backspace: true,
            meta_sends_escape: true,
            home_keys_scroll: false,
            page_keys_scroll: false,
        }
    }
}

/// Result of encoding a key event, matching the non-byte-sequence outcomes
/// a caller's input pipeline distinguishes: `Default` leaves printable-text
/// insertion to the owning UI's own text channel, `Pass` means "don't
/// consume, forward to the host OS/browser", `Cancel` means "consume,
/// produce nothing, do nothing else", and `Scroll` is the
/// `home_keys_scroll`/`page_keys_scroll` local-scroll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Default,
    Pass,
    Cancel,
    ScrollUp,
    ScrollDown,
}

/// Active mouse report mode (which event kinds are even reported).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseReportMode {
    #[default]
    Disabled,
    Click,
    Drag,
    AnyMotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEncoderModes {
    pub report: MouseReportMode,
    /// xterm private mode 1006: SGR coordinate encoding instead of the
    /// legacy single-byte (X10) scheme, which can't represent coordinates
    /// past 223.
    pub sgr: bool,
}

impl Default for MouseEncoderModes {
    fn default() -> Self {
        Self {
            report: MouseReportMode::default(),
            sgr: true,
        }
    }
}
