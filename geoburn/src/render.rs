// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-call rasterization context.

use kurbo::Point;

use crate::error::{Error, Result};
use crate::extent::{Extent, GeoToPixel};
use crate::fill::{self, RingSet};
use crate::pixmap::Pixmap;
use crate::stroke::{self, Pen};
use crate::text;
use crate::wkb::{self, Cursor, GeometrySink, Outcome};

/// Default half-length of the cross burned for point geometries.
pub const DEFAULT_HALF_CROSS: u32 = 5;

/// The value burned into covered cells.
const BURN: u8 = 1;

/// Burns decoded geometries into caller-owned [`Pixmap`]s.
///
/// A context fixes the geographic extent, the canvas dimensions it will
/// accept, and the drawing parameters. It validates all of that up front,
/// so the burning operations only ever fail on malformed input. The
/// context can be reused across records, features, and canvases of the
/// same size; its only state between calls is scratch ring storage.
#[derive(Debug)]
pub struct RasterContext {
    extent: Extent,
    width: u16,
    height: u16,
    resolution: f64,
    stroke_width: u32,
    fill: bool,
    half_cross: u32,
    rings: RingSet,
}

impl RasterContext {
    /// Create a context for canvases of `width` x `height` pixels covering
    /// `extent`.
    ///
    /// Fails if either dimension is zero or the extent collapses to a
    /// non-positive resolution. Stroke width defaults to 1, filling to
    /// off, and the point cross half-length to [`DEFAULT_HALF_CROSS`].
    pub fn new(extent: Extent, width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas { width, height });
        }
        let resolution = extent.resolution_for(width);
        if !(resolution > 0.0) || !resolution.is_finite() {
            return Err(Error::DegenerateExtent { resolution });
        }
        Ok(Self {
            extent,
            width,
            height,
            resolution,
            stroke_width: 1,
            fill: false,
            half_cross: DEFAULT_HALF_CROSS,
            rings: RingSet::new(),
        })
    }

    /// Set the stroke width in pixels; 0 disables stroking.
    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width;
    }

    /// Set whether polygons are filled.
    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }

    /// Set the half-length of the cross burned for points; 0 burns a
    /// single pixel.
    pub fn set_half_cross(&mut self, half: u32) {
        self.half_cross = half;
    }

    /// The extent this context maps onto its canvases.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Geographic units covered by one pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// The geographic-to-pixel mapping for this context.
    pub fn mapper(&self) -> GeoToPixel {
        self.extent.mapper(self.width)
    }

    /// Decode every record in `wkb` and burn it into `pixmap`.
    ///
    /// The buffer may hold any number of concatenated records in native
    /// byte order. Strokes and point crosses burn while decoding streams;
    /// each top-level record that accumulated rings gets one even-odd fill
    /// pass as soon as it is complete, and a zero-stroke-width fill is
    /// followed by an erase of the ring outlines at width 1, which removes
    /// the partially covered boundary pixels the pixel-center fill counted
    /// as inside.
    ///
    /// An unrecognized type tag is logged and abandons the rest of the
    /// buffer (the format gives no way to find the next record); whatever
    /// was burned before it, including the fill of already-complete rings,
    /// stays on the canvas and the call still succeeds. A truncated record
    /// is an error.
    pub fn burn_wkb(&mut self, wkb: &[u8], pixmap: &mut Pixmap) -> Result<()> {
        self.check_canvas(pixmap)?;
        let mut cur = Cursor::new(wkb);
        while !cur.is_at_end() {
            self.rings.clear();
            let outcome = {
                let mut sink = Burner {
                    pixmap: &mut *pixmap,
                    mapper: self.mapper(),
                    pen: Pen {
                        width: self.stroke_width,
                        burn: BURN,
                    },
                    fill: self.fill,
                    half_cross: self.half_cross,
                    rings: &mut self.rings,
                };
                match wkb::decode_record(&mut cur, &mut sink) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        self.rings.clear();
                        return Err(e);
                    }
                }
            };
            self.flush_fill(pixmap);
            if outcome == Outcome::Abandoned {
                break;
            }
        }
        Ok(())
    }

    /// Even-odd fill of a single ring given as parallel coordinate slices.
    ///
    /// The ring closes itself; no outline is stroked or erased. Slices of
    /// unequal length are rejected before anything is burned.
    pub fn fill_vertices(&mut self, xs: &[f64], ys: &[f64], pixmap: &mut Pixmap) -> Result<()> {
        self.check_canvas(pixmap)?;
        if xs.len() != ys.len() {
            return Err(Error::VertexLengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        self.rings.clear();
        self.rings.begin_ring(xs.len())?;
        for (&x, &y) in xs.iter().zip(ys) {
            self.rings.push_vertex(Point::new(x, y));
        }
        if self.rings.vertex_count() >= 2 {
            fill::scanline_fill(pixmap, &self.extent, &self.mapper(), &self.rings, BURN);
        }
        self.rings.clear();
        Ok(())
    }

    /// Draw a text label whose anchor is the geographic point `anchor`.
    ///
    /// The anchor is resolved by the caller, typically as a centroid or a
    /// midpoint along a line, and maps to the label baseline.
    pub fn draw_label(&self, anchor: Point, label: &str, pixmap: &mut Pixmap) -> Result<()> {
        self.check_canvas(pixmap)?;
        let (x, y) = self.mapper().map(anchor);
        text::draw_label(pixmap, x, y, label, BURN);
        Ok(())
    }

    fn check_canvas(&self, pixmap: &Pixmap) -> Result<()> {
        if pixmap.width() != self.width || pixmap.height() != self.height {
            return Err(Error::CanvasMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: pixmap.width(),
                actual_height: pixmap.height(),
            });
        }
        Ok(())
    }

    /// Run the fill pass for the rings of the record just decoded, then
    /// drop them.
    fn flush_fill(&mut self, pixmap: &mut Pixmap) {
        if self.fill && self.rings.vertex_count() >= 2 {
            let mapper = self.mapper();
            fill::scanline_fill(pixmap, &self.extent, &mapper, &self.rings, BURN);
            if self.stroke_width == 0 {
                // Take back the boundary cells the center-sampled fill
                // marked solid.
                let erase = Pen { width: 1, burn: 0 };
                for ring in self.rings.rings() {
                    erase_ring(pixmap, &mapper, &erase, ring);
                }
            }
        }
        self.rings.clear();
    }
}

/// Stroke a closed ring outline with the given pen.
fn erase_ring(pixmap: &mut Pixmap, mapper: &GeoToPixel, pen: &Pen, ring: &[Point]) {
    let Some((&first, rest)) = ring.split_first() else {
        return;
    };
    let (fx, fy) = mapper.map(first);
    let (mut px, mut py) = (fx, fy);
    for &p in rest {
        let (x, y) = mapper.map(p);
        stroke::line(pixmap, pen, px, py, x, y);
        (px, py) = (x, y);
    }
    stroke::line(pixmap, pen, px, py, fx, fy);
}

/// Burns primitives as the decoder streams them.
struct Burner<'a> {
    pixmap: &'a mut Pixmap,
    mapper: GeoToPixel,
    pen: Pen,
    fill: bool,
    half_cross: u32,
    rings: &'a mut RingSet,
}

impl GeometrySink for Burner<'_> {
    fn stroke_enabled(&self) -> bool {
        self.pen.width > 0
    }

    fn fill_enabled(&self) -> bool {
        self.fill
    }

    fn point(&mut self, p: Point) {
        let (x, y) = self.mapper.map(p);
        stroke::cross(self.pixmap, &self.pen, self.half_cross, x, y);
    }

    fn segment(&mut self, a: Point, b: Point) {
        let (x1, y1) = self.mapper.map(a);
        let (x2, y2) = self.mapper.map(b);
        stroke::line(self.pixmap, &self.pen, x1, y1, x2, y2);
    }

    fn ring_start(&mut self, vertices: usize) -> Result<()> {
        self.rings.begin_ring(vertices)
    }

    fn ring_vertex(&mut self, p: Point) {
        self.rings.push_vertex(p);
    }
}
