//! SGR (`CSI ... m`) parameter interpretation: turns a slice of parsed
//! integer parameters into edits against the current [`TextAttributes`].
//!
//! Split out of the parser/dispatch module because the extended-color
//! sub-parameters (`38;2;r;g;b`, `38;5;n`, and the colon-separated `38:2::r:g:b`
//! form some emitters use) need their own small lookahead state machine,
//! independent of the outer CSI parameter scanner in `parser::csi`.

use crate::attrs::{CellFlags, Color, TextAttributes};

/// Apply one SGR parameter sequence (already split on `;`/`:`, with the
/// trailing-semicolon rule already collapsed to an implicit 0) to `attrs`.
pub fn apply_sgr(attrs: &mut TextAttributes, params: &[i64]) {
    let mut i = 0;
    if params.is_empty() {
        attrs.reset_attrs();
        return;
    }
    while i < params.len() {
        let p = params[i];
        match p {
            0 => attrs.reset_attrs(),
            1 => attrs.flags.insert(CellFlags::BOLD),
            2 => attrs.flags.insert(CellFlags::DIM),
            3 => attrs.flags.insert(CellFlags::ITALIC),
            4 => attrs.flags.insert(CellFlags::UNDERLINE),
            5 | 6 => attrs.flags.insert(CellFlags::BLINK),
            7 => attrs.flags.insert(CellFlags::INVERSE),
            8 => attrs.flags.insert(CellFlags::INVISIBLE),
            9 => attrs.flags.insert(CellFlags::STRIKETHROUGH),
            21 => attrs.flags.remove(CellFlags::BOLD),
            22 => attrs.flags.remove(CellFlags::BOLD | CellFlags::DIM),
            23 => attrs.flags.remove(CellFlags::ITALIC),
            24 => attrs.flags.remove(CellFlags::UNDERLINE),
            25 => attrs.flags.remove(CellFlags::BLINK),
            27 => attrs.flags.remove(CellFlags::INVERSE),
            28 => attrs.flags.remove(CellFlags::INVISIBLE),
            29 => attrs.flags.remove(CellFlags::STRIKETHROUGH),
            30..=37 => attrs.fg = Color::Palette((p - 30) as u8),
            38 => {
                let (color, consumed) = parse_extended_color(&params[i + 1..]);
                if let Some(color) = color {
                    attrs.fg = color;
                }
                i += consumed;
            }
            39 => attrs.fg = Color::Default,
            40..=47 => attrs.bg = Color::Palette((p - 40) as u8),
            48 => {
                let (color, consumed) = parse_extended_color(&params[i + 1..]);
                if let Some(color) = color {
                    attrs.bg = color;
                }
                i += consumed;
            }
            49 => attrs.bg = Color::Default,
            90..=97 => attrs.fg = Color::Palette((p - 90 + 8) as u8),
            100..=107 => attrs.bg = Color::Palette((p - 100 + 8) as u8),
            _ => {}
        }
        i += 1;
    }
}

/// Parse the sub-parameters following a `38`/`48` introducer: either
/// `5;n` (palette) or `2;r;g;b` (direct RGB, the leading optional
/// colorspace-id sub-param some emitters add before r/g/b is skipped if
/// present as a 4-component form per xterm's tolerant parsing).
/// Returns the color (if recognized) and how many parameters were consumed
/// from `rest` (not counting the `38`/`48` itself).
fn parse_extended_color(rest: &[i64]) -> (Option<Color>, usize) {
    match rest.first() {
        Some(5) => match rest.get(1) {
            Some(&n) if (0..=255).contains(&n) => (Some(Color::Palette(n as u8)), 2),
            _ => (None, rest.len().min(2)),
        },
        Some(2) => {
            if rest.len() >= 4 {
                let (r, g, b) = (rest[1], rest[2], rest[3]);
                if let (Some(r), Some(g), Some(b)) = (clamp_u8(r), clamp_u8(g), clamp_u8(b)) {
                    (Some(Color::Rgb(r, g, b)), 4)
                } else {
                    (None, 4)
                }
            } else {
                (None, rest.len())
            }
        }
        _ => (None, 1.min(rest.len())),
    }
}

fn clamp_u8(v: i64) -> Option<u8> {
    u8::try_from(v).ok()
}

impl TextAttributes {
    /// SGR 0: drop every flag and both colors back to terminal default.
    pub fn reset_attrs(&mut self) {
        *self = Self::reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_0_resets() {
        let mut attrs = TextAttributes {
            fg: Color::Palette(1),
            flags: CellFlags::BOLD,
            ..TextAttributes::default()
        };
        apply_sgr(&mut attrs, &[0]);
        assert_eq!(attrs, TextAttributes::default());
    }

    #[test]
    fn empty_params_means_reset() {
        let mut attrs = TextAttributes {
            fg: Color::Palette(2),
            ..TextAttributes::default()
        };
        apply_sgr(&mut attrs, &[]);
        assert_eq!(attrs.fg, Color::Default);
    }

    #[test]
    fn basic_palette_colors() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[31, 44]);
        assert_eq!(attrs.fg, Color::Palette(1));
        assert_eq!(attrs.bg, Color::Palette(4));
    }

    #[test]
    fn bright_palette_colors_offset_by_eight() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[91, 102]);
        assert_eq!(attrs.fg, Color::Palette(9));
        assert_eq!(attrs.bg, Color::Palette(10));
    }

    #[test]
    fn extended_rgb_foreground() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[38, 2, 10, 20, 30]);
        assert_eq!(attrs.fg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn extended_palette_background() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[48, 5, 200]);
        assert_eq!(attrs.bg, Color::Palette(200));
    }

    #[test]
    fn bold_then_reset_bold_and_dim_together() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[1, 2]);
        assert!(attrs.flags.contains(CellFlags::BOLD | CellFlags::DIM));
        apply_sgr(&mut attrs, &[22]);
        assert!(!attrs.flags.intersects(CellFlags::BOLD | CellFlags::DIM));
    }

    #[test]
    fn unknown_param_is_ignored() {
        let mut attrs = TextAttributes::default();
        apply_sgr(&mut attrs, &[1, 500, 4]);
        assert!(attrs.flags.contains(CellFlags::BOLD | CellFlags::UNDERLINE));
    }
}
