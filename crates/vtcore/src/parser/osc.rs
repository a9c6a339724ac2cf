//! OSC (`ESC ] ... ST`/`BEL`) dispatch: window title, icon name, palette and
//! fg/bg/cursor color get/set, and the clipboard (`52`) sequence. See §4.3.

use std::str::FromStr;

use xparsecolor::XColor;

use crate::response;
use crate::terminal::Terminal;

pub(super) fn dispatch(terminal: &mut Terminal, raw: &[u8]) {
    let text = match std::str::from_utf8(raw) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = text.splitn(2, ';');
    let Some(code_str) = parts.next() else { return };
    let Ok(code) = code_str.parse::<u16>() else {
        return;
    };
    let payload = parts.next().unwrap_or("");

    match code {
        0 => {
            terminal.set_title(payload.to_string());
            terminal.set_icon_name(payload.to_string());
        }
        1 => terminal.set_icon_name(payload.to_string()),
        2 => terminal.set_title(payload.to_string()),
        4 => handle_palette(terminal, payload),
        10 => handle_fg_bg_query(terminal, 10, payload),
        11 => handle_fg_bg_query(terminal, 11, payload),
        52 => handle_clipboard(terminal, payload),
        _ => {}
    }
}

fn handle_palette(terminal: &mut Terminal, payload: &str) {
    // `4 ; index ; spec [ ; index ; spec ]*`
    let mut fields = payload.split(';');
    loop {
        let Some(index_str) = fields.next() else { break };
        let Some(spec) = fields.next() else { break };
        let Ok(index) = index_str.parse::<u16>() else {
            continue;
        };
        if spec == "?" {
            if let Some((r, g, b)) = palette_rgb(terminal, index) {
                terminal.queue_response(response::osc_color_report(4, r, g, b));
            }
            continue;
        }
        let _ = XColor::from_str(spec); // validated; palette storage is a renderer concern
    }
}

fn handle_fg_bg_query(terminal: &mut Terminal, code: u16, payload: &str) {
    if payload != "?" {
        let _ = XColor::from_str(payload);
        return;
    }
    let (r, g, b) = if code == 10 { (0xFF, 0xFF, 0xFF) } else { (0x00, 0x00, 0x00) };
    terminal.queue_response(response::osc_color_report(code, r, g, b));
}

fn palette_rgb(_terminal: &Terminal, index: u16) -> Option<(u8, u8, u8)> {
    // The core does not own a concrete 256-color palette (that is a
    // renderer/theme concern); report the standard ANSI 16 for the indices
    // that have one, so OSC 4 queries against them are answerable.
    const ANSI16: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
        (127, 127, 127),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (92, 92, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    ANSI16.get(index as usize).copied()
}

fn handle_clipboard(terminal: &mut Terminal, payload: &str) {
    let mut fields = payload.splitn(2, ';');
    let _selection = fields.next();
    let Some(data) = fields.next() else { return };
    if data == "?" {
        return; // clipboard read-back is a policy decision left to the embedder
    }
    use base64::Engine as _;
    if let Ok(decoded) = base64::engine::general_purpose::STANDARD.decode(data) {
        if let Ok(text) = String::from_utf8(decoded) {
            let _ = terminal.set_clipboard(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::TerminalConfig;

    fn terminal() -> Terminal {
        Terminal::new(10, 5, TerminalConfig::default())
    }

    #[test]
    fn osc_0_sets_title_and_icon_name() {
        let mut term = terminal();
        term.feed(b"\x1b]0;my title\x07");
        assert_eq!(term.title(), "my title");
        assert_eq!(term.icon_name(), "my title");
    }

    #[test]
    fn osc_2_sets_only_title() {
        let mut term = terminal();
        term.feed(b"\x1b]2;only title\x07");
        assert_eq!(term.title(), "only title");
    }

    #[test]
    fn osc_52_base64_writes_clipboard_when_enabled() {
        let mut term = terminal();
        term.modes.enable_clipboard_write = true;
        term.feed(b"\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(term.clipboard(), Some("hello"));
    }

    #[test]
    fn osc_52_rejected_when_disabled() {
        let mut term = terminal();
        term.feed(b"\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(term.clipboard(), None);
    }
}
