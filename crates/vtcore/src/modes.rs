//! Runtime mode flags and static configuration (§6 "Configuration surface").
//!
//! Kept as plain `Copy` structs rather than the teacher's derive-macro
//! sequence-registration DSL: every mode here is read and written directly by
//! [`crate::terminal::Terminal`], not serialized to/from a wire format on its
//! own.

/// How a key/mouse event with the Alt/Meta modifier should be encoded.
/// See §4.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AltSendsWhat {
    /// Prefix the sequence with ESC (xterm's classic "meta sends escape").
    #[default]
    Escape,
    /// Set the high bit instead of prefixing ESC.
    EightBit,
    /// Let the owning UI handle the key as a browser/OS-level shortcut.
    BrowserKey,
}

/// All runtime-toggleable terminal modes named in §6, plus the ones the
/// scroll region / tab stops / charset machinery reads directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalModes {
    /// DECAWM. Default on.
    pub wraparound: bool,
    /// xterm private mode 45. Default off.
    pub reverse_wraparound: bool,
    /// IRM. Default off.
    pub insert_mode: bool,
    /// DECOM. Default off.
    pub origin_mode: bool,
    /// LNM. Default off (LF does not imply CR).
    pub auto_carriage_return: bool,
    /// DECTCEM. Default on.
    pub cursor_visible: bool,
    /// att610. Default off.
    pub cursor_blink: bool,
    /// xterm private mode 1010.
    pub scroll_on_output: bool,
    /// xterm private mode 1011.
    pub scroll_on_keystroke: bool,
    /// Mode 2004.
    pub bracketed_paste: bool,
    /// DECCKM.
    pub application_cursor: bool,
    /// DECKPAM.
    pub application_keypad: bool,
    /// xterm private mode 1036.
    pub meta_sends_escape: bool,
    pub alt_sends_what: AltSendsWhat,
    /// Default true (BS sends `\x7F`); DECBKM (mode 67) inverts this.
    pub backspace_sends_backspace: bool,
    /// Gates DECCOLM (mode 3); xterm private mode 40.
    pub allow_column_width_changes: bool,
    /// Whether C1 8-bit controls (0x80-0x9F) are recognized by the parser.
    pub enable_8_bit_control: bool,
    /// Policy gate for OSC 52 clipboard writes.
    pub enable_clipboard_write: bool,
    pub mouse_report: MouseReportMode,
    /// xterm private mode 1006 (SGR mouse coordinate extension, §4.5.1).
    pub sgr_mouse: bool,
    /// xterm private mode 30 (scrollbar visibility — forwarded to the
    /// renderer, not acted on by the core).
    pub scrollbar_visible: bool,
}

impl Default for TerminalModes {
    fn default() -> Self {
        Self {
            wraparound: true,
            reverse_wraparound: false,
            insert_mode: false,
            origin_mode: false,
            auto_carriage_return: false,
            cursor_visible: true,
            cursor_blink: false,
            scroll_on_output: false,
            scroll_on_keystroke: false,
            bracketed_paste: false,
            application_cursor: false,
            application_keypad: false,
            meta_sends_escape: false,
            alt_sends_what: AltSendsWhat::default(),
            backspace_sends_backspace: true,
            allow_column_width_changes: false,
            enable_8_bit_control: false,
            enable_clipboard_write: false,
            mouse_report: MouseReportMode::Disabled,
            sgr_mouse: false,
            scrollbar_visible: true,
        }
    }
}

/// Active mouse-report mode (DECSET 1000/1002/1003). See §4.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseReportMode {
    #[default]
    Disabled,
    /// DECSET 1000: report button press/release only.
    Click,
    /// DECSET 1002: also report motion while a button is held.
    Drag,
    /// DECSET 1003: report all motion, button held or not.
    AnyMotion,
}

/// Static configuration that is not expected to change at runtime (parser
/// limits, tab width, scrollback depth). Distinct from [`TerminalModes`],
/// which the parser flips constantly in response to DECSET/DECRST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Max bytes buffered for an OSC/DCS/PM/APC payload before aborting.
    /// Default 1024, per §4.1.
    pub max_string_sequence: usize,
    /// Wall-clock timeout for an in-progress OSC/DCS string, in
    /// milliseconds. Default 20_000 (20s), per §4.1/§5.
    pub osc_time_limit_ms: u64,
    /// Columns between default tab stops. Default 8.
    pub tab_width: usize,
    /// Scrollback ring capacity in rows. Default 1000, per §3/§9.
    pub scrollback_lines: usize,
    /// Treat East-Asian "ambiguous width" codepoints as 2 columns wide
    /// instead of 1. Default false (narrow), matching most Western locales.
    pub ambiguous_width_is_wide: bool,
    /// Home/End/PageUp/PageDown scroll the local view instead of sending
    /// their CSI sequence. Default false.
    pub home_keys_scroll: bool,
    pub page_keys_scroll: bool,
    /// Minimum interval between two *audible* bells, in milliseconds.
    /// Default 500, per §4.3/§5.
    pub bell_squelch_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            max_string_sequence: 1024,
            osc_time_limit_ms: 20_000,
            tab_width: 8,
            scrollback_lines: 1000,
            ambiguous_width_is_wide: false,
            home_keys_scroll: false,
            page_keys_scroll: false,
            bell_squelch_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_xterm_documented_behavior() {
        let modes = TerminalModes::default();
        assert!(modes.wraparound);
        assert!(modes.cursor_visible);
        assert!(modes.backspace_sends_backspace);
        assert!(!modes.insert_mode);
        assert!(!modes.application_cursor);
        assert_eq!(modes.mouse_report, MouseReportMode::Disabled);
    }

    #[test]
    fn config_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.max_string_sequence, 1024);
        assert_eq!(config.scrollback_lines, 1000);
        assert_eq!(config.tab_width, 8);
    }
}
