//! The `Terminal`: owns both screen buffers, the shared charset/cursor
//! state that DECSC/DECRC snapshots, the mode flags, and the queue of
//! responses waiting to be written back to the host. This is the type an
//! embedder actually holds; [`crate::parser::Parser`] only ever borrows it
//! for the duration of a `feed` call.

use tracing::{debug, trace};

use crate::charset::{CharacterSet, CharsetState};
use crate::error::{CoreError, Result};
use crate::modes::{TerminalConfig, TerminalModes};
use crate::parser::Parser;
use crate::response::{self, Response};
use crate::screen::Screen;

/// Which of the two screens is currently receiving output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScreen {
    Primary,
    Alternate,
}

pub struct Terminal {
    primary: Screen,
    alternate: Screen,
    active: ActiveScreen,
    pub(crate) charset: CharsetState,
    pub modes: TerminalModes,
    pub config: TerminalConfig,
    parser: Parser,
    responses: Vec<Response>,
    title: String,
    icon_name: String,
    clipboard: Option<String>,
    /// Instant of the last bell that was actually allowed through the
    /// squelch window.
    last_bell_at: Option<std::time::Instant>,
    pending_bell: bool,
}

impl Terminal {
    #[must_use]
    pub fn new(width: usize, height: usize, config: TerminalConfig) -> Self {
        Self {
            primary: Screen::new(width, height, config.scrollback_lines),
            alternate: Screen::new(width, height, 0),
            active: ActiveScreen::Primary,
            charset: CharsetState::new(),
            modes: TerminalModes::default(),
            config,
            parser: Parser::new(),
            responses: Vec::new(),
            title: String::new(),
            icon_name: String::new(),
            clipboard: None,
            last_bell_at: None,
            pending_bell: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        match self.active {
            ActiveScreen::Primary => &self.primary,
            ActiveScreen::Alternate => &self.alternate,
        }
    }

    pub(crate) fn screen_mut(&mut self) -> &mut Screen {
        match self.active {
            ActiveScreen::Primary => &mut self.primary,
            ActiveScreen::Alternate => &mut self.alternate,
        }
    }

    #[must_use]
    pub fn active_screen(&self) -> ActiveScreen {
        self.active
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub(crate) fn set_title(&mut self, title: String) {
        trace!(target: "vtcore", %title, "OSC 2 set title");
        self.title = title;
    }

    pub(crate) fn set_icon_name(&mut self, name: String) {
        self.icon_name = name;
    }

    /// Feed a chunk of host-bound... rather, *application*-bound bytes
    /// through the parser. Any responses generated (DA/DSR/etc.) are queued
    /// and retrieved with [`Self::take_responses`].
    pub fn feed(&mut self, bytes: &[u8]) {
        let mut parser = std::mem::take(&mut self.parser);
        for &byte in bytes {
            parser.advance(self, byte);
        }
        self.parser = parser;
    }

    /// Drain every response queued since the last call.
    pub fn take_responses(&mut self) -> Vec<Response> {
        std::mem::take(&mut self.responses)
    }

    pub(crate) fn queue_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    /// True once a bell has been rung and not yet observed by the embedder.
    #[must_use]
    pub fn take_pending_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }

    /// Ring the bell, subject to the squelch window in
    /// [`TerminalConfig::bell_squelch_ms`].
    pub(crate) fn bell(&mut self) {
        let now = std::time::Instant::now();
        let squelched = self.last_bell_at.is_some_and(|last| {
            now.duration_since(last) < std::time::Duration::from_millis(self.config.bell_squelch_ms)
        });
        if !squelched {
            self.pending_bell = true;
            self.last_bell_at = Some(now);
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidSize {
                rows: height,
                cols: width,
            });
        }
        self.primary.resize(width, height);
        self.alternate.resize(width, height);
        Ok(())
    }

    /// DECSET 1049/47/1047: switch to the alternate screen. Per the xterm
    /// convention this crate follows (§9), entering the alternate screen
    /// clears it and drops nothing into scrollback.
    pub(crate) fn enter_alternate_screen(&mut self) {
        if self.active == ActiveScreen::Alternate {
            return;
        }
        self.active = ActiveScreen::Alternate;
        self.alternate.erase_all(false);
    }

    pub(crate) fn leave_alternate_screen(&mut self) {
        self.active = ActiveScreen::Primary;
    }

    /// Reset the whole terminal to its freshly-constructed state (RIS,
    /// `ESC c`), preserving only the grid dimensions.
    pub fn full_reset(&mut self) {
        debug!(target: "vtcore", "RIS full reset");
        let (width, height) = (self.primary.width(), self.primary.height());
        let config = self.config;
        *self = Self::new(width, height, config);
    }

    /// Translate `ch` through the active G0-G3/GL character set, then print
    /// it at the cursor. `wide` is the caller's
    /// [`unicode_width`](https://docs.rs/unicode-width)-derived width
    /// verdict for the glyph.
    pub(crate) fn print_char(&mut self, ch: char, wide: bool) {
        let translated = self.charset.active().translate(ch);
        let mut buf = [0u8; 4];
        let grapheme = translated.encode_utf8(&mut buf);
        let wraparound = self.modes.wraparound;
        let insert = self.modes.insert_mode;
        self.screen_mut().print(grapheme, wide, wraparound, insert);
    }

    pub(crate) fn designate_charset(&mut self, slot: usize, designator: u8) {
        self.charset
            .designate(slot, CharacterSet::from_designator(designator));
    }

    pub(crate) fn shift_gl(&mut self, slot: usize) {
        self.charset.shift_gl(slot);
    }

    pub(crate) fn save_cursor(&mut self) {
        let charset = self.charset;
        let origin_mode = self.modes.origin_mode;
        self.screen_mut().save_cursor(charset, origin_mode);
    }

    pub(crate) fn restore_cursor(&mut self) {
        let (charset, origin_mode) = self.screen_mut().restore_cursor();
        self.charset = charset;
        self.modes.origin_mode = origin_mode;
    }

    /// Resolve a row coordinate that may be relative to the scroll region
    /// top (DECOM origin mode) into an absolute row.
    pub(crate) fn resolve_row(&self, row: usize) -> usize {
        if self.modes.origin_mode {
            row + self.screen().scroll_region().0
        } else {
            row
        }
    }

    pub(crate) fn primary_device_attributes(&mut self) {
        self.queue_response(response::primary_device_attributes());
    }

    pub(crate) fn secondary_device_attributes(&mut self) {
        self.queue_response(response::secondary_device_attributes());
    }

    pub(crate) fn device_status_ok(&mut self) {
        self.queue_response(response::device_status_ok());
    }

    pub(crate) fn cursor_position_report(&mut self) {
        let cursor = self.screen().cursor();
        self.queue_response(response::cursor_position_report(cursor.row, cursor.col));
    }

    pub(crate) fn mode_report(&mut self, private: bool, mode: u16) {
        let value = self.query_mode_value(private, mode);
        self.queue_response(response::mode_report(private, mode, value));
    }

    fn query_mode_value(&self, private: bool, mode: u16) -> u8 {
        if !private {
            return 0;
        }
        let set = match mode {
            1 => self.modes.application_cursor,
            6 => self.modes.origin_mode,
            7 => self.modes.wraparound,
            25 => self.modes.cursor_visible,
            1000 => matches!(
                self.modes.mouse_report,
                crate::modes::MouseReportMode::Click
            ),
            1002 => matches!(self.modes.mouse_report, crate::modes::MouseReportMode::Drag),
            1003 => matches!(
                self.modes.mouse_report,
                crate::modes::MouseReportMode::AnyMotion
            ),
            1006 => self.modes.sgr_mouse,
            2004 => self.modes.bracketed_paste,
            _ => return 0,
        };
        u8::from(set) + 1
    }

    pub(crate) fn text_area_size_report(&mut self) {
        let (w, h) = (self.screen().width(), self.screen().height());
        self.queue_response(response::text_area_size_report(h, w));
    }

    /// OSC 52: write `data` to the clipboard if policy allows it.
    pub fn set_clipboard(&mut self, data: String) -> Result<()> {
        if !self.modes.enable_clipboard_write {
            return Err(CoreError::ClipboardWriteDisabled);
        }
        self.clipboard = Some(data);
        Ok(())
    }

    #[must_use]
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal() -> Terminal {
        Terminal::new(80, 24, TerminalConfig::default())
    }

    #[test]
    fn basic_print_and_crlf() {
        let mut term = terminal();
        term.feed(b"hello\r\nworld");
        assert_eq!(term.screen().row(0).unwrap().text()[..5], *"hello");
        assert_eq!(term.screen().row(1).unwrap().text()[..5], *"world");
    }

    #[test]
    fn sgr_then_reset_round_trips_default_style() {
        let mut term = terminal();
        term.feed(b"\x1b[1;31mX\x1b[0mY");
        let default = term.screen().default_style();
        assert_eq!(term.screen().row(0).unwrap().cells()[1].style, default);
    }

    #[test]
    fn cursor_position_and_erase_below() {
        let mut term = terminal();
        term.feed(b"abcdef\x1b[1;2H\x1b[0J");
        assert_eq!(term.screen().row(0).unwrap().text()[..1], *"a");
    }

    #[test]
    fn alternate_screen_round_trip_preserves_primary_content() {
        let mut term = terminal();
        term.feed(b"primary content");
        term.feed(b"\x1b[?1049h");
        assert_eq!(term.active_screen(), ActiveScreen::Alternate);
        term.feed(b"alt content");
        term.feed(b"\x1b[?1049l");
        assert_eq!(term.active_screen(), ActiveScreen::Primary);
        assert!(term.screen().row(0).unwrap().text().starts_with("primary"));
    }

    #[test]
    fn primary_da_request_queues_response() {
        let mut term = terminal();
        term.feed(b"\x1b[c");
        let responses = term.take_responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].bytes(), b"\x1b[?62;1;22c");
    }
}
