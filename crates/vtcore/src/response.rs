//! Host-bound response sequences: everything the terminal core writes back
//! down the wire unprompted by a key/mouse event (DA, DSR, cursor position
//! reports, the various mode-query replies). See §4.1 "Dispatch" and §5.
//!
//! Kept separate from `parser::dispatch` so the exact byte layout of each
//! reply lives in one place and can be unit-tested without going through
//! the full parser.

use std::fmt::Write as _;

/// One reply the core wants written back to the host. Callers drain these
/// from [`crate::terminal::Terminal::take_responses`] after feeding bytes
/// to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response(pub Vec<u8>);

impl Response {
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Primary Device Attributes (`CSI c`) reply: claims VT220-with-extensions
/// support (params `62` = VT220, `1` = 132-column mode, `22` = ANSI color).
#[must_use]
pub fn primary_device_attributes() -> Response {
    Response(b"\x1b[?62;1;22c".to_vec())
}

/// Secondary Device Attributes (`CSI > c`) reply: terminal id, firmware
/// version, cartridge id. The values here mirror xterm's own placeholder
/// secondary DA (VT420-class id, version 0, no cartridge).
#[must_use]
pub fn secondary_device_attributes() -> Response {
    Response(b"\x1b[>41;0;0c".to_vec())
}

/// Device Status Report "terminal OK" reply (`CSI 5 n` -> `CSI 0 n`).
#[must_use]
pub fn device_status_ok() -> Response {
    Response(b"\x1b[0n".to_vec())
}

/// Cursor Position Report (`CSI 6 n` -> `CSI row;col R`), 1-based.
#[must_use]
pub fn cursor_position_report(row: usize, col: usize) -> Response {
    let mut s = String::with_capacity(12);
    let _ = write!(s, "\x1b[{};{}R", row + 1, col + 1);
    Response(s.into_bytes())
}

/// DECRPM (`CSI ? Pd ; Ps $ y`) reply to a DECRQM mode query. `value` is
/// 0 (not recognized), 1 (set), 2 (reset), 3 (permanently set), or 4
/// (permanently reset).
#[must_use]
pub fn mode_report(private: bool, mode: u16, value: u8) -> Response {
    let mut s = String::with_capacity(16);
    if private {
        let _ = write!(s, "\x1b[?{mode};{value}$y");
    } else {
        let _ = write!(s, "\x1b[{mode};{value}$y");
    }
    Response(s.into_bytes())
}

/// Window-size-in-characters reply to `CSI 18 t` (`CSI 8 ; rows ; cols t`).
#[must_use]
pub fn text_area_size_report(rows: usize, cols: usize) -> Response {
    let mut s = String::with_capacity(16);
    let _ = write!(s, "\x1b[8;{rows};{cols}t");
    Response(s.into_bytes())
}

/// OSC color query reply (e.g. answering `OSC 10 ; ? ST` with the current
/// foreground), formatted as the `rgb:rrrr/gggg/bbbb` spec xterm uses.
#[must_use]
pub fn osc_color_report(osc_code: u16, r: u8, g: u8, b: u8) -> Response {
    let mut s = String::with_capacity(32);
    let _ = write!(
        s,
        "\x1b]{osc_code};rgb:{:02x}{:02x}/{:02x}{:02x}/{:02x}{:02x}\x1b\\",
        r, r, g, g, b, b
    );
    Response(s.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_da_claims_vt220() {
        assert_eq!(primary_device_attributes().bytes(), b"\x1b[?62;1;22c");
    }

    #[test]
    fn cursor_position_report_is_one_based() {
        assert_eq!(cursor_position_report(0, 0).bytes(), b"\x1b[1;1R");
        assert_eq!(cursor_position_report(23, 79).bytes(), b"\x1b[24;80R");
    }

    #[test]
    fn mode_report_private_vs_ansi() {
        assert_eq!(mode_report(true, 25, 1).bytes(), b"\x1b[?25;1$y");
        assert_eq!(mode_report(false, 4, 2).bytes(), b"\x1b[4;2$y");
    }

    #[test]
    fn osc_color_report_doubles_each_component() {
        let r = osc_color_report(10, 0xff, 0x80, 0x00);
        assert_eq!(r.bytes(), b"\x1b]10;rgb:ffff/8080/0000\x1b\\");
    }
}
