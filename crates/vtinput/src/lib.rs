#![warn(clippy::pedantic)]

//! Host-bound encoding of key and mouse events into the byte sequences a
//! terminal's child process expects (§4.4/§4.5): `KeyEncoder` and
//! `MouseEncoder`, parameterized by the handful of modes (application
//! cursor keys, SGR mouse, DECBKM, ...) that change the encoding.

mod c0;
mod char;
mod csi;
pub mod encode;
mod esc;
pub mod event;
mod key_event;
mod keyboard_encoder;
mod macros;
pub mod modes;
mod mouse_encoder;
mod mouse_event;
pub mod parser;
mod ss;

pub use encode::Encode;
pub use key_event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
pub use keyboard_encoder::{KeyEncodeResult, KeyEncoder};
pub use modes::{AltSendsWhat, KeyAction, KeyEncoderModes, MouseEncoderModes, MouseReportMode};
pub use mouse_encoder::MouseEncoder;
pub use mouse_event::{MouseButton, MouseEvent, MouseEventKind};
