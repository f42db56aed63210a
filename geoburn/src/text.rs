// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bitmap-font label drawing.

use crate::font::{self, Glyph, FONT_ASCENT, FONT_HEIGHT, GLYPH_COLUMNS, SPACE_ADVANCE};
use crate::pixmap::Pixmap;

/// Total pen advance for a string, in pixels.
///
/// The sum of each character's advance width; spaces contribute
/// [`SPACE_ADVANCE`], characters without a glyph contribute nothing. No
/// canvas is involved.
pub fn text_advance(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if c == ' ' {
                SPACE_ADVANCE
            } else {
                font::glyph(c).map_or(0, |g| u32::from(g.advance))
            }
        })
        .sum()
}

/// Draw a label whose anchor maps to pixel `(x, y)`.
///
/// The anchor row is the glyph baseline; glyph boxes extend [`FONT_ASCENT`]
/// rows above it. Nothing is drawn when the anchor is already past the
/// right or bottom canvas edge, and drawing stops at the first glyph whose
/// pen position passes the right edge, so labels truncate whole-glyph
/// rather than wrap. Zero bits of a glyph bitmap leave the canvas
/// untouched.
pub(crate) fn draw_label(pixmap: &mut Pixmap, x: i64, y: i64, text: &str, burn: u8) {
    let width = i64::from(pixmap.width());
    let height = i64::from(pixmap.height());
    if x >= width || y - i64::from(FONT_ASCENT) >= height {
        return;
    }

    let mut pen = x;
    for c in text.chars() {
        if c == ' ' {
            pen += i64::from(SPACE_ADVANCE);
        } else if let Some(glyph) = font::glyph(c) {
            blit(pixmap, glyph, pen, y, burn);
            pen += i64::from(glyph.advance);
            if pen >= width {
                return;
            }
        }
    }
}

/// Blit one glyph bitmap with its box top-left at
/// `(pen - left bearing, y - ascent)`.
fn blit(pixmap: &mut Pixmap, glyph: &Glyph, pen: i64, y: i64, burn: u8) {
    let width = i64::from(pixmap.width());
    let height = i64::from(pixmap.height());

    for row in 0..FONT_HEIGHT {
        let write_y = y - i64::from(FONT_ASCENT) + i64::from(row);
        if write_y >= height {
            break;
        }
        if write_y < 0 {
            continue;
        }
        for col in 0..GLYPH_COLUMNS {
            let write_x = pen - i64::from(glyph.left) + col as i64;
            if write_x >= width {
                break;
            }
            if write_x < 0 {
                continue;
            }
            if glyph.columns[col] & (1_u8 << row) != 0 {
                pixmap.set(write_x, write_y, burn);
            }
        }
    }
}
