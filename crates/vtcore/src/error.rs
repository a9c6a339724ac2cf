//! Error types for the narrow set of fallible operations exposed by this
//! crate. The parser itself is infallible by design (§4.1: malformed
//! sequences are discarded, never surfaced as an `Err`) — these variants
//! cover the surrounding, genuinely fallible surface: clipboard policy,
//! resize bounds, and color-spec parsing delegated to `xparsecolor`.

use thiserror::Error;

/// Errors `vtcore` can report back to its embedder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An OSC 52 clipboard write was attempted while
    /// [`crate::modes::TerminalModes::enable_clipboard_write`] is off.
    #[error("clipboard write rejected by policy")]
    ClipboardWriteDisabled,

    /// `Terminal::resize` was called with a zero row or column count.
    #[error("invalid terminal size: {rows}x{cols}")]
    InvalidSize { rows: usize, cols: usize },

    /// An OSC color-spec payload could not be parsed as an X11 color.
    #[error("invalid color specification: {0}")]
    InvalidColorSpec(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            CoreError::InvalidSize { rows: 0, cols: 80 }.to_string(),
            "invalid terminal size: 0x80"
        );
        assert_eq!(
            CoreError::ClipboardWriteDisabled.to_string(),
            "clipboard write rejected by policy"
        );
    }
}
