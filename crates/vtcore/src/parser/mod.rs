//! The byte-stream state machine itself: the classic DEC-ANSI parser states
//! (ground/escape/CSI/OSC/DCS/string) driven by a flat `match` on the
//! incoming byte and the current state, per §4.1 and §9's explicit call for
//! a hand-written state machine rather than a delegated tokenizer crate.
//!
//! UTF-8 decoding is layered in front of the byte-level state machine:
//! `advance` accumulates continuation bytes itself rather than handing that
//! job to the state machine, since only `Ground`/string-collecting states
//! ever see non-ASCII text.

mod csi;
mod osc;

use smallvec::SmallVec;

use crate::terminal::Terminal;

/// Parser parameters: up to 16 inline before falling back to heap growth,
/// matching the practical upper bound of any real CSI sequence.
pub type Params = SmallVec<[i64; 16]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    OscString,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    SosPmApcString,
}

/// One designator slot pending after `ESC (`/`)`/`*`/`+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCharset {
    None,
    G0,
    G1,
    G2,
    G3,
}

#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    params: Params,
    current_param: Option<i64>,
    intermediates: SmallVec<[u8; 2]>,
    private_marker: Option<u8>,
    osc_raw: Vec<u8>,
    /// UTF-8 continuation-byte accumulator for `Ground` state.
    utf8_buf: SmallVec<[u8; 4]>,
    utf8_remaining: u8,
    pending_charset: PendingCharset,
    max_string_sequence: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            params: Params::new(),
            current_param: None,
            intermediates: SmallVec::new(),
            private_marker: None,
            osc_raw: Vec::new(),
            utf8_buf: SmallVec::new(),
            utf8_remaining: 0,
            pending_charset: PendingCharset::None,
            max_string_sequence: 1024,
        }
    }

    fn reset_sequence(&mut self) {
        self.params.clear();
        self.current_param = None;
        self.intermediates.clear();
        self.private_marker = None;
        self.pending_charset = PendingCharset::None;
    }

    fn finish_param(&mut self) {
        if let Some(p) = self.current_param.take() {
            self.params.push(p);
        } else if !self.params.is_empty() || self.current_param.is_some() {
            self.params.push(0);
        }
    }

    /// Feed one raw byte through the machine, acting on `terminal` as
    /// sequences complete.
    pub fn advance(&mut self, terminal: &mut Terminal, byte: u8) {
        self.max_string_sequence = terminal.config.max_string_sequence;

        // C0 controls are recognized from every state except when we are
        // mid-UTF-8-sequence or mid-string-collection (where xterm still
        // honors CAN/SUB/ESC as aborts, handled below per-state).
        if self.utf8_remaining > 0 && byte < 0x80 {
            // A new ASCII byte arrived before continuation bytes were
            // satisfied: the multi-byte sequence was truncated. Drop it and
            // fall through to handle `byte` normally.
            self.utf8_buf.clear();
            self.utf8_remaining = 0;
        }

        match self.state {
            State::Ground => self.advance_ground(terminal, byte),
            State::Escape => self.advance_escape(terminal, byte),
            State::EscapeIntermediate => self.advance_escape_intermediate(terminal, byte),
            State::CsiEntry | State::CsiParam => self.advance_csi_param(terminal, byte),
            State::CsiIntermediate => self.advance_csi_intermediate(terminal, byte),
            State::CsiIgnore => self.advance_csi_ignore(byte),
            State::OscString => self.advance_osc_string(terminal, byte),
            State::DcsEntry | State::DcsParam => self.advance_dcs_param(byte),
            State::DcsIntermediate => self.advance_dcs_intermediate(byte),
            State::DcsPassthrough => self.advance_dcs_passthrough(byte),
            State::DcsIgnore => self.advance_dcs_ignore(byte),
            State::SosPmApcString => self.advance_string_ignore(byte),
        }
    }

    fn advance_ground(&mut self, terminal: &mut Terminal, byte: u8) {
        if self.utf8_remaining > 0 {
            if (0x80..0xC0).contains(&byte) {
                self.utf8_buf.push(byte);
                self.utf8_remaining -= 1;
                if self.utf8_remaining == 0 {
                    if let Ok(s) = std::str::from_utf8(&self.utf8_buf) {
                        if let Some(ch) = s.chars().next() {
                            self.print_char(terminal, ch);
                        }
                    }
                    self.utf8_buf.clear();
                }
                return;
            }
            self.utf8_buf.clear();
            self.utf8_remaining = 0;
        }

        match byte {
            0x1B => {
                self.reset_sequence();
                self.state = State::Escape;
            }
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.execute_c0(terminal, byte),
            0x20..=0x7E => self.print_char(terminal, byte as char),
            0xC0..=0xDF => {
                self.utf8_buf.clear();
                self.utf8_buf.push(byte);
                self.utf8_remaining = 1;
            }
            0xE0..=0xEF => {
                self.utf8_buf.clear();
                self.utf8_buf.push(byte);
                self.utf8_remaining = 2;
            }
            0xF0..=0xF4 => {
                self.utf8_buf.clear();
                self.utf8_buf.push(byte);
                self.utf8_remaining = 3;
            }
            0x7F => {} // DEL: ignored in Ground, matching xterm
            _ => {}
        }
    }

    fn print_char(&mut self, terminal: &mut Terminal, ch: char) {
        let wide = matches!(
            unicode_width::UnicodeWidthChar::width(ch),
            Some(2)
        ) || (terminal.config.ambiguous_width_is_wide
            && unicode_width::UnicodeWidthChar::width(ch) == Some(1)
            && is_ambiguous_width(ch));
        terminal.print_char(ch, wide);
    }

    fn execute_c0(&mut self, terminal: &mut Terminal, byte: u8) {
        match byte {
            0x07 => terminal.bell(),
            0x08 => {
                let mut cursor = terminal.screen().cursor();
                if cursor.col > 0 {
                    cursor.col -= 1;
                }
                let (h, w) = (terminal.screen().height(), terminal.screen().width());
                terminal.screen_mut().move_cursor(cursor.row.min(h), cursor.col.min(w));
            }
            0x09 => terminal.screen_mut().advance_tab(),
            0x0A | 0x0B | 0x0C => {
                terminal.screen_mut().line_feed();
                if terminal.modes.auto_carriage_return {
                    terminal.screen_mut().carriage_return();
                }
            }
            0x0D => terminal.screen_mut().carriage_return(),
            0x0E => terminal.shift_gl(1),
            0x0F => terminal.shift_gl(0),
            _ => {}
        }
    }

    fn advance_escape(&mut self, terminal: &mut Terminal, byte: u8) {
        match byte {
            0x1B => {} // stray ESC: stay in Escape
            b'[' => {
                self.reset_sequence();
                self.state = State::CsiEntry;
            }
            b']' => {
                self.osc_raw.clear();
                self.state = State::OscString;
            }
            b'P' => {
                self.reset_sequence();
                self.state = State::DcsEntry;
            }
            b'X' | b'^' | b'_' => self.state = State::SosPmApcString,
            b'(' => self.begin_charset_designation(PendingCharset::G0),
            b')' => self.begin_charset_designation(PendingCharset::G1),
            b'*' => self.begin_charset_designation(PendingCharset::G2),
            b'+' => self.begin_charset_designation(PendingCharset::G3),
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = State::EscapeIntermediate;
            }
            b'c' => {
                terminal.full_reset();
                self.state = State::Ground;
            }
            b'7' => {
                terminal.save_cursor();
                self.state = State::Ground;
            }
            b'8' => {
                terminal.restore_cursor();
                self.state = State::Ground;
            }
            b'D' => {
                terminal.screen_mut().line_feed();
                self.state = State::Ground;
            }
            b'M' => {
                terminal.screen_mut().reverse_line_feed();
                self.state = State::Ground;
            }
            b'E' => {
                terminal.screen_mut().carriage_return();
                terminal.screen_mut().line_feed();
                self.state = State::Ground;
            }
            b'H' => {
                let col = terminal.screen().cursor().col;
                terminal.screen_mut().set_tab_stop(col);
                self.state = State::Ground;
            }
            _ => self.state = State::Ground,
        }
    }

    fn begin_charset_designation(&mut self, slot: PendingCharset) {
        self.pending_charset = slot;
        self.state = State::EscapeIntermediate;
    }

    fn advance_escape_intermediate(&mut self, terminal: &mut Terminal, byte: u8) {
        if self.pending_charset != PendingCharset::None {
            let slot = match self.pending_charset {
                PendingCharset::G0 => 0,
                PendingCharset::G1 => 1,
                PendingCharset::G2 => 2,
                PendingCharset::G3 => 3,
                PendingCharset::None => unreachable!(),
            };
            terminal.designate_charset(slot, byte);
            self.state = State::Ground;
            return;
        }
        match byte {
            0x20..=0x2F => self.intermediates.push(byte),
            _ => self.state = State::Ground,
        }
    }

    fn advance_csi_param(&mut self, terminal: &mut Terminal, byte: u8) {
        match byte {
            b'0'..=b'9' => {
                let digit = i64::from(byte - b'0');
                self.current_param = Some(self.current_param.unwrap_or(0) * 10 + digit);
                self.state = State::CsiParam;
            }
            b';' | b':' => {
                self.finish_param();
                self.state = State::CsiParam;
            }
            b'<' | b'=' | b'>' | b'?' if self.state == State::CsiEntry => {
                self.private_marker = Some(byte);
                self.state = State::CsiParam;
            }
            0x20..=0x2F => {
                self.finish_param();
                self.intermediates.push(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.finish_param();
                csi::dispatch(terminal, self.private_marker, &self.params, &self.intermediates, byte);
                self.reset_sequence();
                self.state = State::Ground;
            }
            0x1B => {
                self.reset_sequence();
                self.state = State::Escape;
            }
            _ => self.state = State::CsiIgnore,
        }
    }

    fn advance_csi_intermediate(&mut self, terminal: &mut Terminal, byte: u8) {
        match byte {
            0x20..=0x2F => self.intermediates.push(byte),
            0x40..=0x7E => {
                csi::dispatch(terminal, self.private_marker, &self.params, &self.intermediates, byte);
                self.reset_sequence();
                self.state = State::Ground;
            }
            0x1B => {
                self.reset_sequence();
                self.state = State::Escape;
            }
            _ => self.state = State::CsiIgnore,
        }
    }

    fn advance_csi_ignore(&mut self, byte: u8) {
        if (0x40..=0x7E).contains(&byte) || byte == 0x1B {
            self.reset_sequence();
            self.state = State::Ground;
        }
    }

    fn advance_osc_string(&mut self, terminal: &mut Terminal, byte: u8) {
        match byte {
            0x07 => {
                osc::dispatch(terminal, &self.osc_raw);
                self.osc_raw.clear();
                self.state = State::Ground;
            }
            0x1B => self.state = State::Escape, // caller sees ST next (handled below)
            _ => {
                if self.osc_raw.len() < self.max_string_sequence {
                    self.osc_raw.push(byte);
                } else {
                    self.osc_raw.clear();
                    self.state = State::Ground;
                }
            }
        }
    }

    fn advance_dcs_param(&mut self, byte: u8) {
        match byte {
            b'0'..=b'9' => {
                let digit = i64::from(byte - b'0');
                self.current_param = Some(self.current_param.unwrap_or(0) * 10 + digit);
                self.state = State::DcsParam;
            }
            b';' | b':' => {
                self.finish_param();
                self.state = State::DcsParam;
            }
            b'<' | b'=' | b'>' | b'?' if self.state == State::DcsEntry => {
                self.private_marker = Some(byte);
                self.state = State::DcsParam;
            }
            0x20..=0x2F => {
                self.finish_param();
                self.intermediates.push(byte);
                self.state = State::DcsIntermediate;
            }
            0x40..=0x7E => {
                self.finish_param();
                self.state = State::DcsPassthrough;
            }
            0x1B => self.state = State::Ground,
            _ => self.state = State::DcsIgnore,
        }
    }

    fn advance_dcs_intermediate(&mut self, byte: u8) {
        match byte {
            0x20..=0x2F => self.intermediates.push(byte),
            0x40..=0x7E => self.state = State::DcsPassthrough,
            0x1B => self.state = State::Ground,
            _ => self.state = State::DcsIgnore,
        }
    }

    fn advance_dcs_passthrough(&mut self, byte: u8) {
        // DCS payloads (DECRQSS/Sixel/etc.) are collected but not acted on:
        // no spec'd operation needs DCS, so this just tracks the string
        // terminator to avoid desynchronizing on the next ESC.
        if byte == 0x1B {
            self.reset_sequence();
            self.state = State::Ground;
        }
    }

    fn advance_dcs_ignore(&mut self, byte: u8) {
        if byte == 0x1B {
            self.reset_sequence();
            self.state = State::Ground;
        }
    }

    fn advance_string_ignore(&mut self, byte: u8) {
        if byte == 0x1B {
            self.state = State::Ground;
        }
    }
}

/// Crude "wide if East-Asian Wide/Fullwidth, ambiguous otherwise"
/// classifier used only when [`crate::modes::TerminalConfig::ambiguous_width_is_wide`]
/// is set; `unicode_width` already separates narrow/wide/ambiguous but
/// folds ambiguous into width 1, so this covers the common CJK punctuation
/// block by range rather than pulling in a second width table.
fn is_ambiguous_width(ch: char) -> bool {
    matches!(ch as u32, 0x00A1..=0x00FF | 0x2010..=0x2027 | 0x2030..=0x205E)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::TerminalConfig;

    fn terminal() -> Terminal {
        Terminal::new(10, 5, TerminalConfig::default())
    }

    #[test]
    fn plain_ascii_prints() {
        let mut term = terminal();
        term.feed(b"hi");
        assert_eq!(&term.screen().row(0).unwrap().text()[..2], "hi");
    }

    #[test]
    fn two_byte_utf8_sequence_prints_one_cell() {
        let mut term = terminal();
        term.feed("é".as_bytes());
        let row = term.screen().row(0).unwrap();
        assert_eq!(row.cells()[0].text(), "é");
    }

    #[test]
    fn csi_sequence_with_private_marker_toggles_mode() {
        let mut term = terminal();
        term.feed(b"\x1b[?25l");
        assert!(!term.modes.cursor_visible);
        term.feed(b"\x1b[?25h");
        assert!(term.modes.cursor_visible);
    }

    #[test]
    fn truncated_multibyte_sequence_is_dropped_not_crashed() {
        let mut term = terminal();
        term.feed(&[0xE2, 0x82]); // incomplete 3-byte sequence
        term.feed(b"X");
        assert_eq!(&term.screen().row(0).unwrap().text()[..1], "X");
    }
}
