//! Mouse event -> byte sequence encoding (§4.5). Generalizes the teacher's
//! `impl Encode for MouseEvent` (`event.rs`), which only ever produced the
//! SGR (mode 1006) form. Here the report mode decides whether an event is
//! encoded at all (xterm never reports motion-only events under `Click`
//! mode, for instance), and `sgr: false` falls back to the legacy X10
//! single-byte scheme those report modes originally shipped with.

use smallvec::SmallVec;

use crate::encode::EncodeError;
use crate::key_event::KeyModifiers;
use crate::modes::{MouseEncoderModes, MouseReportMode};
use crate::mouse_event::{MouseButton, MouseEvent, MouseEventKind};
use crate::{csi, write_into};

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseEncoder;

impl MouseEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode `event` under `modes`. Returns an empty vector when the
    /// active report mode doesn't cover this event kind (e.g. `Moved`
    /// under [`MouseReportMode::Click`]).
    #[must_use]
    pub fn encode(&self, event: &MouseEvent, modes: &MouseEncoderModes) -> SmallVec<[u8; 16]> {
        let mut buf = [0u8; 16];
        match self.encode_into(event, modes, &mut buf) {
            Ok(n) => SmallVec::from_slice(&buf[..n]),
            Err(_) => SmallVec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`EncodeError::BufferOverflow`] if `buf` is too small.
    pub fn encode_into(
        &self,
        event: &MouseEvent,
        modes: &MouseEncoderModes,
        buf: &mut [u8],
    ) -> Result<usize, EncodeError> {
        if !is_reportable(event.kind, modes.report) {
            return Ok(0);
        }

        let mods = event.modifiers;
        let mod_offset = i32::from(mods.contains(KeyModifiers::SHIFT)) * 4
            + i32::from(mods.contains(KeyModifiers::ALT)) * 8
            + i32::from(mods.contains(KeyModifiers::CONTROL)) * 16;

        let (base_button, is_release) = match event.kind {
            MouseEventKind::Down(button) => (button_code(button), false),
            MouseEventKind::Up(button) => (button_code(button), true),
            MouseEventKind::Drag(button) => (button_code(button) + 32, false),
            MouseEventKind::Moved => (3 + 32, false),
            MouseEventKind::ScrollUp => (1 << 6, false),
            MouseEventKind::ScrollDown => ((1 << 6) | 1, false),
            MouseEventKind::ScrollLeft => ((1 << 6) | 2, false),
            MouseEventKind::ScrollRight => ((1 << 6) | 3, false),
        };
        let button_code = base_button + mod_offset;

        let x = event.column + 1;
        let y = event.row + 1;

        if modes.sgr {
            let final_char = if is_release { 'm' } else { 'M' };
            write_into!(buf, "{}<{};{};{}{}", csi!(), button_code, x, y, final_char)
        } else {
            // Legacy X10: button byte (with release always reported as
            // code 3, since X10 has no separate release button id) and
            // coordinates as single bytes offset by 32, capped at 255-32.
            let legacy_button = if is_release { 3 } else { button_code };
            let cx = (x.min(223) as u8) + 32;
            let cy = (y.min(223) as u8) + 32;
            if buf.len() < 6 {
                return Err(EncodeError::BufferOverflow(6));
            }
            buf[0] = 0x1b;
            buf[1] = b'[';
            buf[2] = b'M';
            buf[3] = (legacy_button as u8) + 32;
            buf[4] = cx;
            buf[5] = cy;
            Ok(6)
        }
    }
}

fn button_code(button: MouseButton) -> i32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

fn is_reportable(kind: MouseEventKind, mode: MouseReportMode) -> bool {
    match mode {
        MouseReportMode::Disabled => false,
        MouseReportMode::Click => !matches!(kind, MouseEventKind::Moved | MouseEventKind::Drag(_)),
        MouseReportMode::Drag => !matches!(kind, MouseEventKind::Moved),
        MouseReportMode::AnyMotion => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes(report: MouseReportMode) -> MouseEncoderModes {
        MouseEncoderModes {
            report,
            sgr: true,
        }
    }

    #[test]
    fn left_click_down_encodes_sgr() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 9,
            modifiers: KeyModifiers::empty(),
        };
        let bytes = encoder.encode(&event, &modes(MouseReportMode::Click));
        assert_eq!(&bytes[..], b"\x1b[<0;5;10M");
    }

    #[test]
    fn left_click_up_uses_lowercase_m() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        let bytes = encoder.encode(&event, &modes(MouseReportMode::Click));
        assert_eq!(&bytes[..], b"\x1b[<0;1;1m");
    }

    #[test]
    fn moved_without_button_not_reported_under_click_mode() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::empty(),
        };
        assert!(encoder.encode(&event, &modes(MouseReportMode::Click)).is_empty());
        assert!(
            !encoder
                .encode(&event, &modes(MouseReportMode::AnyMotion))
                .is_empty()
        );
    }

    #[test]
    fn drag_reported_under_drag_mode_not_click_mode() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 2,
            row: 2,
            modifiers: KeyModifiers::empty(),
        };
        assert!(encoder.encode(&event, &modes(MouseReportMode::Click)).is_empty());
        assert!(!encoder.encode(&event, &modes(MouseReportMode::Drag)).is_empty());
    }

    #[test]
    fn scroll_up_sets_wheel_bit() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        let bytes = encoder.encode(&event, &modes(MouseReportMode::Click));
        assert_eq!(&bytes[..], b"\x1b[<64;1;1M");
    }

    #[test]
    fn legacy_x10_uses_single_byte_coordinates() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 9,
            modifiers: KeyModifiers::empty(),
        };
        let legacy = MouseEncoderModes {
            report: MouseReportMode::Click,
            sgr: false,
        };
        let bytes = encoder.encode(&event, &legacy);
        assert_eq!(&bytes[..], &[0x1b, b'[', b'M', 32, 37, 42]);
    }

    #[test]
    fn disabled_report_mode_encodes_nothing() {
        let encoder = MouseEncoder::new();
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        assert!(encoder.encode(&event, &modes(MouseReportMode::Disabled)).is_empty());
    }
}
