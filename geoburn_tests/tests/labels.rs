// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label drawing through the public API.

use geoburn::kurbo::Point;
use geoburn::{font, text_advance, Extent, Pixmap, RasterContext};

fn context(width: u16, height: u16) -> RasterContext {
    RasterContext::new(
        Extent::new(0.0, f64::from(height), f64::from(width), 0.0),
        width,
        height,
    )
    .unwrap()
}

fn burned(pixmap: &Pixmap) -> usize {
    pixmap.data().iter().filter(|&&c| c != 0).count()
}

#[test]
fn advance_is_independent_of_glyph_bitmaps() {
    let glyph_advance = u32::from(font::glyph('M').unwrap().advance);
    assert_eq!(text_advance("M"), glyph_advance);
    assert_eq!(text_advance("Mi"), 2 * glyph_advance);
    assert_eq!(
        text_advance("a b"),
        2 * glyph_advance + font::SPACE_ADVANCE
    );
    assert_eq!(text_advance("     "), 5 * font::SPACE_ADVANCE);
}

#[test]
fn label_burns_at_the_mapped_anchor() {
    let ctx = context(64, 32);
    let mut pixmap = Pixmap::new(64, 32);
    // Anchor at geographic (10, 16) -> pixel (10, 16).
    ctx.draw_label(Point::new(10.0, 16.0), "Ab 1", &mut pixmap)
        .unwrap();
    assert!(burned(&pixmap) > 0);
    // Everything stays inside the glyph band above the anchor row.
    for y in 0..32_u16 {
        let row_burned = pixmap.row(y).iter().any(|&c| c != 0);
        let in_band = (16 - font::FONT_ASCENT as u16..=16).contains(&y);
        assert!(!row_burned || in_band, "row {y}");
    }
    // Nothing left of the anchor column.
    for y in 0..32 {
        for x in 0..10 {
            assert_eq!(pixmap.cell(x, y), 0);
        }
    }
}

#[test]
fn label_truncates_at_the_right_edge_without_wrapping() {
    let ctx = context(16, 16);
    let mut pixmap = Pixmap::new(16, 16);
    ctx.draw_label(Point::new(0.0, 8.0), "WWWWWWWW", &mut pixmap)
        .unwrap();
    let long = burned(&pixmap);

    let mut reference = Pixmap::new(16, 16);
    ctx.draw_label(Point::new(0.0, 8.0), "WWW", &mut reference)
        .unwrap();
    // Everything past the glyphs that fit was dropped, so a label cut to
    // the fitting prefix burns the same cells.
    assert_eq!(long, burned(&reference));
    assert!(long > 0);
}

#[test]
fn off_canvas_anchor_draws_nothing() {
    let ctx = context(32, 32);
    let mut pixmap = Pixmap::new(32, 32);
    ctx.draw_label(Point::new(32.0, 16.0), "Hi", &mut pixmap)
        .unwrap();
    ctx.draw_label(Point::new(5.0, -20.0), "Hi", &mut pixmap)
        .unwrap();
    assert_eq!(burned(&pixmap), 0);
}

#[test]
fn unsupported_characters_are_skipped() {
    let ctx = context(64, 32);
    let mut plain = Pixmap::new(64, 32);
    let mut exotic = Pixmap::new(64, 32);
    ctx.draw_label(Point::new(4.0, 16.0), "ab", &mut plain).unwrap();
    ctx.draw_label(Point::new(4.0, 16.0), "a\u{263a}b", &mut exotic)
        .unwrap();
    assert_eq!(plain.data(), exotic.data());
}

#[test]
fn labels_do_not_erase_existing_burns() {
    let ctx = context(64, 32);
    let mut pixmap = Pixmap::new(64, 32);
    pixmap.data_mut().fill(1);
    ctx.draw_label(Point::new(10.0, 16.0), "X", &mut pixmap)
        .unwrap();
    assert_eq!(burned(&pixmap), 64 * 32);
}
