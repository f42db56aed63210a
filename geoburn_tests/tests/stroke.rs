// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroking behavior through the public API.

use geoburn::{Extent, Pixmap, RasterContext};
use geoburn_tests::{assert_pixels, wkb};

/// A context over a 10x10 canvas with one geographic unit per pixel.
fn unit_context() -> RasterContext {
    RasterContext::new(Extent::new(0.0, 10.0, 10.0, 0.0), 10, 10).unwrap()
}

#[test]
fn width_one_line_string_burns_the_step_sequence() {
    let mut ctx = unit_context();
    let mut pixmap = Pixmap::new(10, 10);
    let record = wkb::line_string(&[(0.5, 9.5), (5.5, 9.5), (5.5, 5.5)]);
    ctx.burn_wkb(&record, &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "######....",
            ".....#....",
            ".....#....",
            ".....#....",
            ".....#....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ],
    );
}

#[test]
fn diagonal_line_steps_both_axes() {
    let mut ctx = unit_context();
    let mut pixmap = Pixmap::new(10, 10);
    let record = wkb::line_string(&[(0.5, 9.5), (4.5, 5.5)]);
    ctx.burn_wkb(&record, &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "#.........",
            ".#........",
            "..#.......",
            "...#......",
            "....#.....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ],
    );
}

#[test]
fn geometry_reaching_outside_the_canvas_is_clipped() {
    let mut ctx = unit_context();
    let mut pixmap = Pixmap::new(10, 10);
    let record = wkb::line_string(&[(-5.0, 7.5), (15.0, 7.5)]);
    ctx.burn_wkb(&record, &mut pixmap).unwrap();
    assert_eq!(pixmap.data().iter().filter(|&&c| c != 0).count(), 10);
    assert!(pixmap.row(2).iter().all(|&c| c == 1));
}

#[test]
fn ring_burns_the_implicit_closing_edge() {
    let mut ctx = unit_context();
    let mut pixmap = Pixmap::new(10, 10);
    // The ring never repeats its first vertex; the left edge only exists
    // if the decoder closes the ring itself.
    let record = wkb::polygon(&[&[(1.5, 8.5), (8.5, 8.5), (8.5, 1.5), (1.5, 1.5)]]);
    ctx.burn_wkb(&record, &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "..........",
            ".########.",
            ".#......#.",
            ".#......#.",
            ".#......#.",
            ".#......#.",
            ".#......#.",
            ".#......#.",
            ".########.",
            "..........",
        ],
    );
}

#[test]
fn wide_strokes_expand_with_north_west_bias() {
    let mut ctx = unit_context();
    ctx.set_stroke_width(2);
    let mut pixmap = Pixmap::new(10, 10);
    let record = wkb::line_string(&[(3.5, 5.5), (6.5, 5.5)]);
    ctx.burn_wkb(&record, &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "..........",
            "..........",
            "..........",
            "..#####...",
            "..#####...",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ],
    );
}

#[test]
fn point_cross_spans_its_half_length_each_way() {
    let mut ctx = unit_context();
    ctx.set_half_cross(2);
    let mut pixmap = Pixmap::new(10, 10);
    ctx.burn_wkb(&wkb::point(5.5, 4.5), &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "..........",
            "..........",
            "..........",
            ".....#....",
            ".....#....",
            "...#####..",
            ".....#....",
            ".....#....",
            "..........",
            "..........",
        ],
    );
}

#[test]
fn point_cross_clips_at_the_canvas_corner() {
    let mut ctx = unit_context();
    ctx.set_half_cross(2);
    let mut pixmap = Pixmap::new(10, 10);
    ctx.burn_wkb(&wkb::point(0.5, 9.5), &mut pixmap).unwrap();
    assert_pixels(
        &pixmap,
        &[
            "###.......",
            "#.........",
            "#.........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ],
    );
}

#[test]
fn half_cross_zero_burns_a_single_pixel() {
    let mut ctx = unit_context();
    ctx.set_half_cross(0);
    let mut pixmap = Pixmap::new(10, 10);
    ctx.burn_wkb(&wkb::point(5.5, 4.5), &mut pixmap).unwrap();
    assert_eq!(pixmap.data().iter().filter(|&&c| c != 0).count(), 1);
    assert_eq!(pixmap.cell(5, 5), 1);
}

#[test]
fn zero_stroke_width_burns_no_lines_or_points() {
    let mut ctx = unit_context();
    ctx.set_stroke_width(0);
    let mut pixmap = Pixmap::new(10, 10);
    let mut buffer = wkb::line_string(&[(0.5, 9.5), (5.5, 9.5)]);
    buffer.extend_from_slice(&wkb::point(5.5, 4.5));
    ctx.burn_wkb(&buffer, &mut pixmap).unwrap();
    assert!(pixmap.data().iter().all(|&c| c == 0));
}
