//! Key event -> byte sequence encoding (§4.4). Generalizes the teacher's
//! `impl Encode for KeyEvent` (`event.rs`): the same match arms and
//! `csi!`/`write_into!` builders, but with `application_cursor` and
//! `alt_sends_what` read from [`KeyEncoderModes`] instead of hard-coded, and
//! DECBKM-aware backspace.

use smallvec::SmallVec;

use crate::encode::{EncodeError, write_str_into};
use crate::key_event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::modes::{AltSendsWhat, KeyAction, KeyEncoderModes};
use crate::{csi, write_into};

/// Outcome of encoding a key event: either a wire byte sequence, or a
/// [`KeyAction`] the caller's input pipeline (not this crate) is
/// responsible for carrying out — local scrolling, passing the event
/// through untouched, or doing nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEncodeResult {
    Bytes(SmallVec<[u8; 16]>),
    Action(KeyAction),
}

/// Stateless encoder: every call is a pure function of the event and the
/// current modes, matching how `vtcore::terminal::Terminal` re-derives
/// modes on every keystroke rather than caching a `KeyEncoder` instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyEncoder;

impl KeyEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode `event` under `modes`, returning the bytes to write to the
    /// child process. Collapses non-byte [`KeyAction`] outcomes (local
    /// scroll, release, unmapped keys) to an empty vector; use
    /// [`Self::encode_action`] when those need to be handled.
    #[must_use]
    pub fn encode(&self, event: &KeyEvent, modes: &KeyEncoderModes) -> SmallVec<[u8; 16]> {
        match self.encode_action(event, modes) {
            KeyEncodeResult::Bytes(b) => b,
            KeyEncodeResult::Action(_) => SmallVec::new(),
        }
    }

    /// Full encode, preserving the `home_keys_scroll`/`page_keys_scroll`
    /// local-scroll outcome instead of discarding it.
    #[must_use]
    pub fn encode_action(&self, event: &KeyEvent, modes: &KeyEncoderModes) -> KeyEncodeResult {
        if event.kind == KeyEventKind::Release {
            return KeyEncodeResult::Action(KeyAction::Cancel);
        }

        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        match event.code {
            KeyCode::Home if modes.home_keys_scroll => {
                return KeyEncodeResult::Action(if shift {
                    KeyAction::ScrollDown
                } else {
                    KeyAction::ScrollUp
                });
            }
            KeyCode::End if modes.home_keys_scroll => {
                return KeyEncodeResult::Action(if shift {
                    KeyAction::ScrollUp
                } else {
                    KeyAction::ScrollDown
                });
            }
            KeyCode::PageUp if modes.page_keys_scroll => {
                return KeyEncodeResult::Action(KeyAction::ScrollUp);
            }
            KeyCode::PageDown if modes.page_keys_scroll => {
                return KeyEncodeResult::Action(KeyAction::ScrollDown);
            }
            _ => {}
        }

        let mut buf = [0u8; 16];
        match self.encode_into(event, modes, &mut buf) {
            Ok(n) => KeyEncodeResult::Bytes(SmallVec::from_slice(&buf[..n])),
            Err(_) => KeyEncodeResult::Action(KeyAction::Cancel),
        }
    }

    /// Buffer-based form for callers that want to avoid the small-vec
    /// allocation path; mirrors the teacher's `Encode` trait shape. Does
    /// not apply `home_keys_scroll`/`page_keys_scroll` — use
    /// [`Self::encode_action`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferOverflow`] if `buf` is too small.
    #[allow(clippy::too_many_lines)]
    pub fn encode_into(
        &self,
        event: &KeyEvent,
        modes: &KeyEncoderModes,
        buf: &mut [u8],
    ) -> Result<usize, EncodeError> {
        if event.kind == KeyEventKind::Release {
            return Ok(0);
        }

        let mods = event.modifiers;
        let mod_param = 1
            + i32::from(mods.contains(KeyModifiers::SHIFT))
            + i32::from(mods.contains(KeyModifiers::ALT)) * 2
            + i32::from(mods.contains(KeyModifiers::CONTROL)) * 4;

        let alt_prefix = (mods.contains(KeyModifiers::ALT)
            && matches!(modes.alt_sends_what, AltSendsWhat::Escape))
            || (mods.contains(KeyModifiers::META) && modes.meta_sends_escape);

        let mut pos = 0;

        match event.code {
            KeyCode::Char(mut c) => {
                if mods.contains(KeyModifiers::SHIFT) && c.is_ascii_lowercase() {
                    c = c.to_ascii_uppercase();
                }
                if mods.contains(KeyModifiers::CONTROL) {
                    if alt_prefix {
                        pos += push_byte(buf, pos, 0x1b)?;
                    }
                    pos += push_byte(buf, pos, control_code_for(c))?;
                    return Ok(pos);
                }
                if alt_prefix {
                    pos += push_byte(buf, pos, 0x1b)?;
                } else if mods.contains(KeyModifiers::ALT)
                    && matches!(modes.alt_sends_what, AltSendsWhat::EightBit)
                    && (c as u32) < 0x80
                {
                    pos += push_byte(buf, pos, c as u8 | 0x80)?;
                    return Ok(pos);
                }
                let mut tmp = [0u8; 4];
                let s = c.encode_utf8(&mut tmp);
                if pos + s.len() > buf.len() {
                    return Err(EncodeError::BufferOverflow(pos + s.len()));
                }
                buf[pos..pos + s.len()].copy_from_slice(s.as_bytes());
                pos += s.len();
            }

            KeyCode::Enter => {
                if mod_param > 1 {
                    pos += write_into!(&mut buf[pos..], "{}13;{}u", csi!(), mod_param)?;
                } else if alt_prefix {
                    pos += push_byte(buf, pos, 0x1b)?;
                    pos += push_byte(buf, pos, b'\r')?;
                } else {
                    pos += push_byte(buf, pos, b'\r')?;
                }
            }

            KeyCode::Backspace => {
                let byte = if modes.backspace_sends_backspace {
                    0x7f
                } else {
                    0x08
                };
                if alt_prefix {
                    pos += push_byte(buf, pos, 0x1b)?;
                }
                pos += push_byte(buf, pos, byte)?;
            }

            KeyCode::Tab => {
                if mods.contains(KeyModifiers::SHIFT) {
                    pos += write_str_into(&mut buf[pos..], csi!("Z"))?;
                } else {
                    pos += push_byte(buf, pos, b'\t')?;
                }
            }

            KeyCode::Esc => pos += push_byte(buf, pos, 0x1b)?,

            KeyCode::Up | KeyCode::Down | KeyCode::Right | KeyCode::Left | KeyCode::Home | KeyCode::End => {
                let final_byte = match event.code {
                    KeyCode::Up => b'A',
                    KeyCode::Down => b'B',
                    KeyCode::Right => b'C',
                    KeyCode::Left => b'D',
                    KeyCode::Home => b'H',
                    KeyCode::End => b'F',
                    _ => unreachable!(),
                };
                let no_mods = mod_param == 1;
                if no_mods && modes.application_cursor {
                    pos += push_byte(buf, pos, 0x1b)?;
                    pos += push_byte(buf, pos, b'O')?;
                    pos += push_byte(buf, pos, final_byte)?;
                } else if no_mods {
                    pos += push_byte(buf, pos, 0x1b)?;
                    pos += push_byte(buf, pos, b'[')?;
                    pos += push_byte(buf, pos, final_byte)?;
                } else {
                    pos += write_into!(
                        &mut buf[pos..],
                        "{}1;{}{}",
                        csi!(),
                        mod_param,
                        final_byte as char
                    )?;
                }
            }

            KeyCode::Insert => pos += push_tilde_seq(&mut buf[pos..], 2, mod_param)?,
            KeyCode::Delete => pos += push_tilde_seq(&mut buf[pos..], 3, mod_param)?,
            KeyCode::PageUp => pos += push_tilde_seq(&mut buf[pos..], 5, mod_param)?,
            KeyCode::PageDown => pos += push_tilde_seq(&mut buf[pos..], 6, mod_param)?,

            KeyCode::F(n) if (1..=4).contains(&n) => {
                let letter = match n {
                    1 => b'P',
                    2 => b'Q',
                    3 => b'R',
                    4 => b'S',
                    _ => unreachable!(),
                };
                if mod_param == 1 {
                    pos += push_byte(buf, pos, 0x1b)?;
                    pos += push_byte(buf, pos, b'O')?;
                    pos += push_byte(buf, pos, letter)?;
                } else {
                    pos += write_into!(
                        &mut buf[pos..],
                        "{}1;{}{}",
                        csi!(),
                        mod_param,
                        letter as char
                    )?;
                }
            }
            KeyCode::F(n) => {
                let code = match n {
                    5 => 15,
                    6 => 17,
                    7 => 18,
                    8 => 19,
                    9 => 20,
                    10 => 21,
                    11 => 23,
                    12 => 24,
                    13 => 25,
                    14 => 26,
                    15 => 28,
                    16 => 29,
                    17 => 31,
                    18 => 32,
                    19 => 33,
                    20 => 34,
                    _ => 0,
                };
                if code != 0 {
                    pos += push_tilde_seq(&mut buf[pos..], code, mod_param)?;
                }
            }

            KeyCode::BackTab => pos += write_str_into(&mut buf[pos..], csi!("Z"))?,
        }

        Ok(pos)
    }
}

fn push_byte(buf: &mut [u8], pos: usize, byte: u8) -> Result<usize, EncodeError> {
    if pos >= buf.len() {
        return Err(EncodeError::BufferOverflow(pos + 1));
    }
    buf[pos] = byte;
    Ok(1)
}

fn control_code_for(c: char) -> u8 {
    match c {
        '@' | ' ' => 0x00,
        'A'..='Z' => (c as u8 | 0x20) & 0x1f,
        '[' => 0x1b,
        '\\' => 0x1c,
        ']' => 0x1d,
        '^' => 0x1e,
        '_' => 0x1f,
        '?' => 0x7f,
        // xterm's numeric-row control codes: Ctrl-2 through Ctrl-8 sit on
        // the same row as Ctrl-@/[/\/]/^/_ on US keyboard layouts.
        '2' => 0x00,
        '3' => 0x1b,
        '4' => 0x1c,
        '5' => 0x1d,
        '6' => 0x1e,
        '7' => 0x1f,
        '8' => 0x7f,
        _ => c as u8 & 0x1f,
    }
}

fn push_tilde_seq(buf: &mut [u8], base: u8, mod_param: i32) -> Result<usize, EncodeError> {
    if mod_param == 1 {
        write_into!(buf, "{}{}~", csi!(), base)
    } else {
        write_into!(buf, "{}{};{}~", csi!(), base, mod_param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_char_passes_through() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty());
        let bytes = encoder.encode(&event, &KeyEncoderModes::default());
        assert_eq!(&bytes[..], b"a");
    }

    #[test]
    fn ctrl_c_produces_etx() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let bytes = encoder.encode(&event, &KeyEncoderModes::default());
        assert_eq!(&bytes[..], &[0x03]);
    }

    #[test]
    fn backspace_sends_del_by_default_and_bs_under_decbkm() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Backspace, KeyModifiers::empty());
        let mut modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], &[0x7f]);
        modes.backspace_sends_backspace = false;
        assert_eq!(&encoder.encode(&event, &modes)[..], &[0x08]);
    }

    #[test]
    fn cursor_up_in_application_mode_sends_ss3() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        let mut modes = KeyEncoderModes::default();
        modes.application_cursor = true;
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1bOA");
    }

    #[test]
    fn cursor_up_in_normal_mode_sends_csi() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1b[A");
    }

    #[test]
    fn shift_up_sends_modifier_csi_form() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1b[1;2A");
    }

    #[test]
    fn alt_char_prefixes_escape() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1bx");
    }

    #[test]
    fn delete_sends_tilde_sequence() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Delete, KeyModifiers::empty());
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1b[3~");
    }

    #[test]
    fn f5_uses_tilde_not_ss3() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::empty());
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1b[15~");
    }

    #[test]
    fn release_kind_produces_nothing() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::empty(),
            KeyEventKind::Release,
        );
        let bytes = encoder.encode(&event, &KeyEncoderModes::default());
        assert!(bytes.is_empty());
    }

    #[test]
    fn ctrl_shift_digit_sends_numeric_control_code() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(
            KeyCode::Char('3'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        let bytes = encoder.encode(&event, &KeyEncoderModes::default());
        assert_eq!(&bytes[..], &[0x1b]);
    }

    #[test]
    fn meta_sends_escape_independent_of_alt_sends_what() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::META);
        let mut modes = KeyEncoderModes::default();
        modes.alt_sends_what = crate::modes::AltSendsWhat::EightBit;
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1bx");
        modes.meta_sends_escape = false;
        assert_eq!(&encoder.encode(&event, &modes)[..], b"x");
    }

    #[test]
    fn home_scrolls_local_view_when_configured() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Home, KeyModifiers::empty());
        let mut modes = KeyEncoderModes::default();
        modes.home_keys_scroll = true;
        assert_eq!(
            encoder.encode_action(&event, &modes),
            KeyEncodeResult::Action(crate::modes::KeyAction::ScrollUp)
        );
    }

    #[test]
    fn home_sends_csi_when_scroll_not_configured() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::Home, KeyModifiers::empty());
        let modes = KeyEncoderModes::default();
        assert_eq!(&encoder.encode(&event, &modes)[..], b"\x1b[H");
    }

    #[test]
    fn page_down_scrolls_local_view_when_configured() {
        let encoder = KeyEncoder::new();
        let event = KeyEvent::new(KeyCode::PageDown, KeyModifiers::empty());
        let mut modes = KeyEncoderModes::default();
        modes.page_keys_scroll = true;
        assert_eq!(
            encoder.encode_action(&event, &modes),
            KeyEncodeResult::Action(crate::modes::KeyAction::ScrollDown)
        );
    }
}
