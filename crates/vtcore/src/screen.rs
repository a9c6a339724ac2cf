//! The grid itself: rows, cursor, tab stops, scroll region, and the style
//! interner that backs a single buffer (primary or alternate). See §3
//! "Data model" and §4.2 "Screen buffer".

use crate::attrs::{StyleId, StyleInterner, TextAttributes};
use crate::cell::Cell;
use crate::cursor::{Cursor, SavedCursor};
use crate::row::Row;
use crate::scrollback::Scrollback;

/// One buffer's worth of state: the teacher's `vtio` has nothing like this
/// (it only encodes/decodes sequences), so this module is grounded instead
/// on `other_examples/` grid implementations (alacritty, wezterm,
/// VictorLux-cterm) per the "enrich from the rest of the pack" step.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    rows: Vec<Row>,
    width: usize,
    height: usize,
    cursor: Cursor,
    saved_cursor: SavedCursor,
    /// Current SGR state, applied to every subsequently printed cell.
    pub attrs: TextAttributes,
    pub style_interner: StyleInterner,
    /// Scroll region, inclusive, 0-based. `None` means the full screen.
    scroll_top: usize,
    scroll_bottom: usize,
    /// Sorted set of tab stop columns.
    tab_stops: Vec<usize>,
    /// Only the primary screen actually retires rows here; the alternate
    /// screen's field stays permanently empty (§9 decision).
    pub scrollback: Scrollback,
}

impl Screen {
    #[must_use]
    pub fn new(width: usize, height: usize, scrollback_capacity: usize) -> Self {
        let style_interner = StyleInterner::new();
        let style = style_interner.default_style();
        Self {
            rows: vec![Row::blank(width, style); height],
            width,
            height,
            cursor: Cursor::new(),
            saved_cursor: SavedCursor::default(),
            attrs: TextAttributes::default(),
            style_interner,
            scroll_top: 0,
            scroll_bottom: height.saturating_sub(1),
            tab_stops: default_tab_stops(width, 8),
            scrollback: Scrollback::new(scrollback_capacity),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    /// Set the scroll region, clamped to the grid and normalized so
    /// `top <= bottom`. A region narrower than 2 rows is rejected (falls
    /// back to the full screen), matching xterm's tolerant DECSTBM handling.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.min(self.height.saturating_sub(1));
        let bottom = bottom.min(self.height.saturating_sub(1));
        if top >= bottom {
            self.scroll_top = 0;
            self.scroll_bottom = self.height.saturating_sub(1);
        } else {
            self.scroll_top = top;
            self.scroll_bottom = bottom;
        }
    }

    /// Intern `self.attrs` and write `grapheme` at the cursor, advancing the
    /// cursor and handling DECAWM autowrap per §4.2. `wide` marks a
    /// 2-column-wide grapheme.
    pub fn print(&mut self, grapheme: &str, wide: bool, wraparound: bool, insert_mode: bool) {
        if self.cursor.overflow {
            if wraparound {
                self.rows[self.cursor.row].line_overflow = true;
                self.move_cursor_to_line_start_next_line();
            } else {
                self.cursor.overflow = false;
                self.cursor.col = self.width.saturating_sub(1);
            }
        }
        let style = self.style_interner.intern(self.attrs);
        let needed = if wide { 2 } else { 1 };
        if self.cursor.col + needed > self.width {
            if wraparound {
                self.rows[self.cursor.row].line_overflow = true;
                self.move_cursor_to_line_start_next_line();
            } else {
                self.cursor.col = self.width.saturating_sub(needed);
            }
        }
        let row = &mut self.rows[self.cursor.row];
        let cell = Cell::new(grapheme, style, wide);
        if insert_mode {
            let mut cells = vec![cell];
            if wide {
                cells.push(Cell::wide_continuation(style));
            }
            row.insert(self.cursor.col, cells);
        } else {
            row.overwrite(self.cursor.col, [cell]);
            if wide {
                row.overwrite(self.cursor.col + 1, [Cell::wide_continuation(style)]);
            }
        }
        self.cursor.col += needed;
        if self.cursor.col >= self.width {
            self.cursor.col = self.width - 1;
            self.cursor.overflow = true;
        }
    }

    fn move_cursor_to_line_start_next_line(&mut self) {
        self.cursor.col = 0;
        self.cursor.overflow = false;
        if self.cursor.row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor.row + 1 < self.height {
            self.cursor.row += 1;
        }
    }

    /// Move the cursor, clearing overflow. Row/col are absolute (already
    /// resolved from origin-mode-relative coordinates by the caller).
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor.set_position(row, col, self.height, self.width);
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor.overflow = false;
    }

    /// LF: move down one row, scrolling within the scroll region if at its
    /// bottom. Does not touch the column (callers wanting CR+LF call both).
    pub fn line_feed(&mut self) {
        self.cursor.overflow = false;
        if self.cursor.row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor.row + 1 < self.height {
            self.cursor.row += 1;
        }
    }

    pub fn reverse_line_feed(&mut self) {
        self.cursor.overflow = false;
        if self.cursor.row == self.scroll_top {
            self.scroll_down(1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    /// Scroll the region up by `n` rows, retiring rows scrolled off the top
    /// of a *full-screen* region into scrollback (§3: partial regions never
    /// feed scrollback, matching xterm).
    pub fn scroll_up(&mut self, n: usize) {
        let style = self.style_interner.default_style();
        let full_screen = self.scroll_top == 0 && self.scroll_bottom == self.height - 1;
        for _ in 0..n {
            let retired = self.rows.remove(self.scroll_top);
            if full_screen {
                self.scrollback.push(retired);
            }
            self.rows
                .insert(self.scroll_bottom, Row::blank(self.width, style));
        }
    }

    pub fn scroll_down(&mut self, n: usize) {
        let style = self.style_interner.default_style();
        for _ in 0..n {
            self.rows.remove(self.scroll_bottom);
            self.rows
                .insert(self.scroll_top, Row::blank(self.width, style));
        }
    }

    pub fn save_cursor(&mut self, charset: crate::charset::CharsetState, origin_mode: bool) {
        self.saved_cursor = SavedCursor {
            cursor: self.cursor,
            attrs: self.attrs,
            charset,
            origin_mode,
        };
    }

    /// Returns the restored charset state and origin mode for the caller
    /// (held at the `Terminal` level, not per-screen) to apply.
    #[must_use]
    pub fn restore_cursor(&mut self) -> (crate::charset::CharsetState, bool) {
        self.cursor = self.saved_cursor.cursor;
        self.attrs = self.saved_cursor.attrs;
        (self.saved_cursor.charset, self.saved_cursor.origin_mode)
    }

    /// Erase the whole screen (ED 2/3). `to_scrollback` additionally moves
    /// every row into scrollback first, matching xterm's `CSI 3 J`.
    pub fn erase_all(&mut self, to_scrollback: bool) {
        let style = self.style_interner.intern(self.attrs);
        if to_scrollback {
            for row in self.rows.drain(..) {
                self.scrollback.push(row);
            }
            self.rows = vec![Row::blank(self.width, style); self.height];
        } else {
            for row in &mut self.rows {
                row.clear(style);
            }
        }
    }

    /// ED 0: cursor to end of screen.
    pub fn erase_below(&mut self) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].clear_range(self.cursor.col, self.width, style);
        for row in &mut self.rows[self.cursor.row + 1..] {
            row.clear(style);
        }
    }

    /// ED 1: start of screen to cursor, inclusive.
    pub fn erase_above(&mut self) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].clear_range(0, self.cursor.col + 1, style);
        for row in &mut self.rows[..self.cursor.row] {
            row.clear(style);
        }
    }

    /// EL 0: cursor to end of line.
    pub fn erase_line_right(&mut self) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].clear_range(self.cursor.col, self.width, style);
    }

    /// EL 1: start of line to cursor, inclusive.
    pub fn erase_line_left(&mut self) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].clear_range(0, self.cursor.col + 1, style);
    }

    /// EL 2: whole line.
    pub fn erase_line_all(&mut self) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].clear(style);
    }

    pub fn insert_lines(&mut self, n: usize) {
        if self.cursor.row < self.scroll_top || self.cursor.row > self.scroll_bottom {
            return;
        }
        let style = self.style_interner.default_style();
        let n = n.min(self.scroll_bottom - self.cursor.row + 1);
        for _ in 0..n {
            self.rows.remove(self.scroll_bottom);
            self.rows
                .insert(self.cursor.row, Row::blank(self.width, style));
        }
    }

    pub fn delete_lines(&mut self, n: usize) {
        if self.cursor.row < self.scroll_top || self.cursor.row > self.scroll_bottom {
            return;
        }
        let style = self.style_interner.default_style();
        let n = n.min(self.scroll_bottom - self.cursor.row + 1);
        for _ in 0..n {
            self.rows.remove(self.cursor.row);
            self.rows
                .insert(self.scroll_bottom, Row::blank(self.width, style));
        }
    }

    pub fn insert_chars(&mut self, n: usize) {
        let style = self.style_interner.intern(self.attrs);
        let blanks = vec![Cell::blank(style); n];
        self.rows[self.cursor.row].insert(self.cursor.col, blanks);
    }

    pub fn delete_chars(&mut self, n: usize) {
        let style = self.style_interner.intern(self.attrs);
        self.rows[self.cursor.row].delete(self.cursor.col, n, style);
    }

    pub fn erase_chars(&mut self, n: usize) {
        let style = self.style_interner.intern(self.attrs);
        let end = self.cursor.col.saturating_add(n);
        self.rows[self.cursor.row].clear_range(self.cursor.col, end, style);
    }

    /// Resize the grid. Rows beyond the old height are blank-padded; rows
    /// removed from the bottom when shrinking are retired into scrollback
    /// (xterm's "reflow" is not attempted, per §9's non-goal on reflow).
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        let style = self.style_interner.default_style();
        for row in &mut self.rows {
            row.resize(new_width, style);
        }
        match new_height.cmp(&self.height) {
            std::cmp::Ordering::Greater => {
                self.rows
                    .resize(new_height, Row::blank(new_width, style));
            }
            std::cmp::Ordering::Less => {
                let overflow = self.rows.split_off(new_height);
                for row in overflow {
                    self.scrollback.push(row);
                }
            }
            std::cmp::Ordering::Equal => {}
        }
        self.width = new_width;
        self.height = new_height;
        self.scroll_top = 0;
        self.scroll_bottom = new_height.saturating_sub(1);
        self.tab_stops.retain(|&c| c < new_width);
        self.cursor.set_position(self.cursor.row, self.cursor.col, new_height, new_width);
    }

    #[must_use]
    pub fn tab_stops(&self) -> &[usize] {
        &self.tab_stops
    }

    pub fn set_tab_stop(&mut self, col: usize) {
        if let Err(i) = self.tab_stops.binary_search(&col) {
            self.tab_stops.insert(i, col);
        }
    }

    pub fn clear_tab_stop(&mut self, col: usize) {
        self.tab_stops.retain(|&c| c != col);
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tab_stops.clear();
    }

    /// Advance the cursor to the next tab stop, or the right margin if
    /// there is none.
    pub fn advance_tab(&mut self) {
        let next = self
            .tab_stops
            .iter()
            .copied()
            .find(|&c| c > self.cursor.col)
            .unwrap_or(self.width.saturating_sub(1));
        self.cursor.col = next.min(self.width.saturating_sub(1));
        self.cursor.overflow = false;
    }

    /// The column of the previous tab stop before the cursor, or 0.
    #[must_use]
    pub fn previous_tab_stop(&self) -> usize {
        self.tab_stops
            .iter()
            .copied()
            .rev()
            .find(|&c| c < self.cursor.col)
            .unwrap_or(0)
    }

    /// Concatenated text of every row, joined with `\n` except where a row
    /// is marked as having wrapped into the next (no synthetic newline
    /// there). Used for tests and any "select all" style consumer.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            out.push_str(&row.text());
            if i + 1 < self.rows.len() && !row.line_overflow {
                out.push('\n');
            }
        }
        out
    }

    #[must_use]
    pub fn default_style(&self) -> StyleId {
        self.style_interner.default_style()
    }
}

fn default_tab_stops(width: usize, every: usize) -> Vec<usize> {
    if every == 0 {
        return Vec::new();
    }
    (every..width).step_by(every).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_advances_cursor_and_sets_overflow_at_margin() {
        let mut screen = Screen::new(5, 3, 100);
        for ch in "abcde".chars() {
            let mut buf = [0u8; 4];
            screen.print(ch.encode_utf8(&mut buf), false, true, false);
        }
        assert_eq!(screen.cursor().col, 4);
        assert!(screen.cursor().overflow);
        assert_eq!(screen.row(0).unwrap().text(), "abcde");
    }

    #[test]
    fn print_past_margin_wraps_to_next_line() {
        let mut screen = Screen::new(3, 3, 100);
        for ch in "abcd".chars() {
            let mut buf = [0u8; 4];
            screen.print(ch.encode_utf8(&mut buf), false, true, false);
        }
        assert_eq!(screen.cursor().row, 1);
        assert_eq!(screen.cursor().col, 1);
        assert_eq!(screen.row(0).unwrap().text(), "abc");
        assert_eq!(screen.row(1).unwrap().text(), "d  ");
    }

    #[test]
    fn line_feed_at_bottom_scrolls_and_retires_to_scrollback() {
        let mut screen = Screen::new(3, 2, 100);
        screen.move_cursor(1, 0);
        let mut buf = [0u8; 4];
        screen.print("a".encode_utf8(&mut buf), false, true, false);
        screen.move_cursor(1, 0);
        screen.line_feed();
        assert_eq!(screen.scrollback.len(), 1);
    }

    #[test]
    fn scroll_region_confines_scroll_up() {
        let mut screen = Screen::new(3, 5, 100);
        screen.set_scroll_region(1, 3);
        let mut buf = [0u8; 4];
        screen.move_cursor(0, 0);
        screen.print("X".encode_utf8(&mut buf), false, true, false);
        screen.scroll_up(1);
        assert_eq!(screen.row(0).unwrap().text(), "X  ");
        assert_eq!(screen.scrollback.len(), 0);
    }

    #[test]
    fn erase_below_clears_cursor_to_end() {
        let mut screen = Screen::new(3, 2, 100);
        for ch in "abcdef".chars() {
            let mut buf = [0u8; 4];
            screen.print(ch.encode_utf8(&mut buf), false, true, false);
        }
        screen.move_cursor(0, 1);
        screen.erase_below();
        assert_eq!(screen.row(0).unwrap().text(), "a  ");
        assert_eq!(screen.row(1).unwrap().text(), "   ");
    }

    #[test]
    fn default_tab_stops_every_eight_columns() {
        let screen = Screen::new(40, 5, 10);
        assert_eq!(screen.tab_stops(), &[8, 16, 24, 32]);
    }

    #[test]
    fn advance_tab_stops_at_next_mark() {
        let mut screen = Screen::new(40, 5, 10);
        screen.move_cursor(0, 3);
        screen.advance_tab();
        assert_eq!(screen.cursor().col, 8);
    }

    #[test]
    fn resize_shrink_retires_bottom_rows() {
        let mut screen = Screen::new(5, 4, 100);
        screen.resize(5, 2);
        assert_eq!(screen.height(), 2);
        assert_eq!(screen.scrollback.len(), 2);
    }
}
