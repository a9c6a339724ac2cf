#![warn(clippy::pedantic)]

//! A VT100/xterm-compatible terminal emulator core: a byte-stream parser, an
//! owned screen/scrollback model, and the cursor/charset/mode state needed
//! to interpret a real shell's output. See `Terminal` for the embedder-facing
//! entry point.

pub mod attrs;
pub mod cell;
pub mod charset;
pub mod cursor;
pub mod error;
pub mod modes;
mod parser;
pub mod response;
pub mod row;
pub mod screen;
pub mod scrollback;
pub mod sgr;
pub mod terminal;
mod traits;

pub use crate::error::{CoreError, Result};
pub use crate::modes::{AltSendsWhat, MouseReportMode, TerminalConfig, TerminalModes};
pub use crate::response::Response;
pub use crate::terminal::{ActiveScreen, Terminal};
pub use crate::traits::TerseDisplay;
