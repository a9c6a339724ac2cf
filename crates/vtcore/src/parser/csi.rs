//! `CSI ... final` dispatch: the bulk of the operations in §4.2/§4.3 land
//! here once the outer state machine has collected a final byte.

use smallvec::SmallVec;

use crate::modes::MouseReportMode;
use crate::terminal::Terminal;

use super::Params;

fn param(params: &Params, index: usize, default: i64) -> i64 {
    match params.get(index) {
        Some(&0) | None => default,
        Some(&v) => v,
    }
}

pub(super) fn dispatch(
    terminal: &mut Terminal,
    private: Option<u8>,
    params: &Params,
    intermediates: &SmallVec<[u8; 2]>,
    final_byte: u8,
) {
    // DECRQM (`CSI ? Pd $ p` is the request; xterm also accepts the reply
    // form `$ y` as a sentinel for our own tests) carries its real final
    // byte behind a `$` intermediate, so it has to be recognized before the
    // private/ANSI split below.
    if final_byte == b'p' && intermediates.last() == Some(&b'$') {
        if let Some(&mode) = params.first() {
            terminal.mode_report(private == Some(b'?'), mode as u16);
        }
        return;
    }
    match private {
        Some(b'?') => dispatch_private(terminal, params, final_byte),
        Some(_) => {} // `<`/`=`/`>` private CSIs: no spec'd operation uses them beyond DA, handled elsewhere
        None => dispatch_ansi(terminal, params, intermediates, final_byte),
    }
}

fn dispatch_ansi(
    terminal: &mut Terminal,
    params: &Params,
    intermediates: &SmallVec<[u8; 2]>,
    final_byte: u8,
) {
    let screen_size = (terminal.screen().height(), terminal.screen().width());
    match final_byte {
        b'A' => move_cursor_relative(terminal, 0, -param(params, 0, 1)),
        b'B' => move_cursor_relative(terminal, 0, param(params, 0, 1)),
        b'C' => move_cursor_relative(terminal, param(params, 0, 1), 0),
        b'D' => move_cursor_relative(terminal, -param(params, 0, 1), 0),
        b'E' => {
            move_cursor_relative(terminal, 0, param(params, 0, 1));
            terminal.screen_mut().carriage_return();
        }
        b'F' => {
            move_cursor_relative(terminal, 0, -param(params, 0, 1));
            terminal.screen_mut().carriage_return();
        }
        b'G' | b'`' => {
            let col = (param(params, 0, 1) - 1).max(0) as usize;
            let cursor = terminal.screen().cursor();
            terminal.screen_mut().move_cursor(cursor.row, col);
        }
        b'd' => {
            let row = (param(params, 0, 1) - 1).max(0) as usize;
            let cursor = terminal.screen().cursor();
            let row = terminal.resolve_row(row);
            terminal.screen_mut().move_cursor(row, cursor.col);
        }
        b'H' | b'f' => {
            let row = (param(params, 0, 1) - 1).max(0) as usize;
            let col = (param(params, 1, 1) - 1).max(0) as usize;
            let row = terminal.resolve_row(row);
            terminal.screen_mut().move_cursor(row, col);
        }
        b'J' => match param(params, 0, 0) {
            0 => terminal.screen_mut().erase_below(),
            1 => terminal.screen_mut().erase_above(),
            2 => terminal.screen_mut().erase_all(false),
            3 => terminal.screen_mut().erase_all(true),
            _ => {}
        },
        b'K' => match param(params, 0, 0) {
            0 => terminal.screen_mut().erase_line_right(),
            1 => terminal.screen_mut().erase_line_left(),
            2 => terminal.screen_mut().erase_line_all(),
            _ => {}
        },
        b'L' => terminal.screen_mut().insert_lines(param(params, 0, 1).max(1) as usize),
        b'M' => terminal.screen_mut().delete_lines(param(params, 0, 1).max(1) as usize),
        b'P' => terminal.screen_mut().delete_chars(param(params, 0, 1).max(1) as usize),
        b'@' => terminal.screen_mut().insert_chars(param(params, 0, 1).max(1) as usize),
        b'X' => terminal.screen_mut().erase_chars(param(params, 0, 1).max(1) as usize),
        b'S' => terminal.screen_mut().scroll_up(param(params, 0, 1).max(1) as usize),
        b'T' => terminal.screen_mut().scroll_down(param(params, 0, 1).max(1) as usize),
        b'g' => match param(params, 0, 0) {
            0 => {
                let col = terminal.screen().cursor().col;
                terminal.screen_mut().clear_tab_stop(col);
            }
            3 => terminal.screen_mut().clear_all_tab_stops(),
            _ => {}
        },
        b'm' => {
            let p: Vec<i64> = params.iter().copied().collect();
            let mut attrs = terminal.screen().attrs;
            crate::sgr::apply_sgr(&mut attrs, &p);
            terminal.screen_mut().attrs = attrs;
        }
        b'n' => match param(params, 0, 0) {
            5 => terminal.device_status_ok(),
            6 => terminal.cursor_position_report(),
            _ => {}
        },
        b'r' => {
            let top = (param(params, 0, 1) - 1).max(0) as usize;
            let bottom = if params.len() > 1 {
                (param(params, 1, screen_size.0 as i64) - 1).max(0) as usize
            } else {
                screen_size.0.saturating_sub(1)
            };
            terminal.screen_mut().set_scroll_region(top, bottom);
            terminal.screen_mut().move_cursor(0, 0);
        }
        b's' => terminal.save_cursor(),
        b'u' => terminal.restore_cursor(),
        b'c' if intermediates.is_empty() => terminal.primary_device_attributes(),
        b't' => {
            if param(params, 0, 0) == 18 {
                terminal.text_area_size_report();
            }
        }
        _ => {}
    }
}

fn dispatch_private(terminal: &mut Terminal, params: &Params, final_byte: u8) {
    match final_byte {
        b'h' => {
            for &mode in params.iter() {
                set_private_mode(terminal, mode as u16, true);
            }
        }
        b'l' => {
            for &mode in params.iter() {
                set_private_mode(terminal, mode as u16, false);
            }
        }
        b'c' => terminal.secondary_device_attributes(),
        _ => {}
    }
}

fn set_private_mode(terminal: &mut Terminal, mode: u16, set: bool) {
    match mode {
        1 => terminal.modes.application_cursor = set,
        3 => {
            if terminal.modes.allow_column_width_changes {
                let height = terminal.screen().height();
                let _ = terminal.resize(if set { 132 } else { 80 }, height);
            }
        }
        5 => { /* DECSCNM reverse video: cosmetic, left to the renderer */ }
        6 => {
            terminal.modes.origin_mode = set;
            terminal.screen_mut().move_cursor(0, 0);
        }
        7 => terminal.modes.wraparound = set,
        9 | 1000 => {
            terminal.modes.mouse_report = if set {
                MouseReportMode::Click
            } else {
                MouseReportMode::Disabled
            };
        }
        1002 => {
            terminal.modes.mouse_report = if set {
                MouseReportMode::Drag
            } else {
                MouseReportMode::Disabled
            };
        }
        1003 => {
            terminal.modes.mouse_report = if set {
                MouseReportMode::AnyMotion
            } else {
                MouseReportMode::Disabled
            };
        }
        1006 => terminal.modes.sgr_mouse = set,
        1010 => terminal.modes.scroll_on_output = set,
        1011 => terminal.modes.scroll_on_keystroke = set,
        1036 => terminal.modes.meta_sends_escape = set,
        1049 | 47 | 1047 => {
            if set {
                terminal.enter_alternate_screen();
            } else {
                terminal.leave_alternate_screen();
            }
        }
        2004 => terminal.modes.bracketed_paste = set,
        12 => terminal.modes.cursor_blink = set,
        25 => terminal.modes.cursor_visible = set,
        45 => terminal.modes.reverse_wraparound = set,
        67 => terminal.modes.backspace_sends_backspace = !set,
        _ => {}
    }
}

fn move_cursor_relative(terminal: &mut Terminal, dcol: i64, drow: i64) {
    let cursor = terminal.screen().cursor();
    let new_row = (cursor.row as i64 + drow).max(0) as usize;
    let new_col = (cursor.col as i64 + dcol).max(0) as usize;
    terminal.screen_mut().move_cursor(new_row, new_col);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::TerminalConfig;
    use crate::terminal::ActiveScreen;

    fn terminal() -> Terminal {
        Terminal::new(10, 5, TerminalConfig::default())
    }

    #[test]
    fn cup_moves_cursor_one_based() {
        let mut term = terminal();
        term.feed(b"\x1b[2;3H");
        let cursor = term.screen().cursor();
        assert_eq!((cursor.row, cursor.col), (1, 2));
    }

    #[test]
    fn decset_1049_enters_and_leaves_alternate() {
        let mut term = terminal();
        term.feed(b"\x1b[?1049h");
        assert_eq!(term.active_screen(), ActiveScreen::Alternate);
        term.feed(b"\x1b[?1049l");
        assert_eq!(term.active_screen(), ActiveScreen::Primary);
    }

    #[test]
    fn ed_2_clears_whole_screen() {
        let mut term = terminal();
        term.feed(b"hello\x1b[2J");
        assert!(term.screen().row(0).unwrap().is_blank_text());
    }

    trait BlankText {
        fn is_blank_text(&self) -> bool;
    }
    impl BlankText for crate::row::Row {
        fn is_blank_text(&self) -> bool {
            self.cells().iter().all(crate::cell::Cell::is_blank)
        }
    }
}
