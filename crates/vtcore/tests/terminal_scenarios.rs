//! End-to-end byte-stream scenarios driven through the public `Terminal`
//! API, one test per documented example: plain print/CRLF, wraparound, SGR
//! + reset, cursor positioning + erase, alternate screen round-trip, and
//! primary device attributes.

use vtcore::attrs::Color;
use vtcore::{Terminal, TerminalConfig};

fn terminal(width: usize, height: usize) -> Terminal {
    Terminal::new(width, height, TerminalConfig::default())
}

#[test]
fn basic_print_and_crlf() {
    let mut term = terminal(80, 24);
    term.feed(b"hello\r\nworld");

    assert_eq!(term.screen().row(0).unwrap().text().trim_end(), "hello");
    assert_eq!(term.screen().row(1).unwrap().text().trim_end(), "world");
    let cursor = term.screen().cursor();
    assert_eq!((cursor.row, cursor.col), (1, 5));
}

#[test]
fn wraparound_sets_line_overflow_and_continues_on_next_row() {
    let mut term = terminal(5, 3);
    term.feed(b"abcdefgh");

    assert_eq!(term.screen().row(0).unwrap().text(), "abcde");
    assert_eq!(term.screen().row(1).unwrap().text(), "fgh  ");
    assert_eq!(term.screen().row(2).unwrap().text(), "     ");
    assert!(term.screen().row(0).unwrap().line_overflow);

    let cursor = term.screen().cursor();
    assert_eq!((cursor.row, cursor.col), (1, 3));
}

#[test]
fn sgr_sets_palette_color_then_reset_restores_default() {
    let mut term = terminal(80, 24);
    term.feed(b"\x1b[31mred\x1b[0mplain");

    let screen = term.screen();
    let red_style = screen.row(0).unwrap().cells()[0].style;
    let red_attrs = screen.style_interner.resolve(red_style);
    assert_eq!(red_attrs.fg, Color::Palette(1));

    let plain_style = screen.row(0).unwrap().cells()[3].style;
    let plain_attrs = screen.style_interner.resolve(plain_style);
    assert_eq!(plain_attrs.fg, Color::Default);
}

#[test]
fn cursor_position_and_erase_below() {
    let mut term = terminal(10, 3);
    term.feed(b"aaaaaaaaaa\r\nbbbbbbbbbb\r\ncccccccccc\x1b[2;3H\x1b[0J");

    assert_eq!(term.screen().row(0).unwrap().text(), "aaaaaaaaaa");
    assert_eq!(term.screen().row(1).unwrap().text(), "bb        ");
    assert_eq!(term.screen().row(2).unwrap().text(), "          ");

    let cursor = term.screen().cursor();
    assert_eq!((cursor.row, cursor.col), (1, 2));
}

#[test]
fn alternate_screen_round_trip_preserves_primary_content_only() {
    let mut term = terminal(80, 24);
    term.feed(b"AAA");
    term.feed(b"\x1b[?1049h");
    term.feed(b"BBB");
    term.feed(b"\x1b[?1049l");

    assert_eq!(term.screen().row(0).unwrap().text().trim_end(), "AAA");
    assert_eq!(term.screen().scrollback.len(), 0);
}

#[test]
fn primary_da_request_sends_exactly_one_response() {
    let mut term = terminal(80, 24);
    term.feed(b"\x1b[c");

    let responses = term.take_responses();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].bytes(), b"\x1b[?62;1;22c");
}
