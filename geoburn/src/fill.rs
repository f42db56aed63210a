// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring accumulation and even-odd scanline filling.

use kurbo::Point;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::extent::{Extent, GeoToPixel};
use crate::pixmap::Pixmap;

/// The rings of one geometry, buffered for a single scanline pass.
///
/// Every ring of the geometry lands in the same set, including holes and
/// the rings of every member of a multi-polygon, so the even-odd rule
/// cancels holes correctly. The set lives for one top-level geometry and is
/// cleared as soon as its fill pass ran.
#[derive(Debug)]
pub(crate) struct RingSet {
    rings: Vec<Vec<Point>>,
    vertices: usize,
    min_y: f64,
    max_y: f64,
}

impl RingSet {
    pub(crate) fn new() -> Self {
        Self {
            rings: vec![],
            vertices: 0,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Open a new ring expected to hold `capacity` vertices.
    ///
    /// The reservation goes through `try_reserve` so a hostile vertex count
    /// (already bounded by the record's byte length) or genuine memory
    /// exhaustion surfaces as [`Error::RingAllocation`] instead of an abort.
    pub(crate) fn begin_ring(&mut self, capacity: usize) -> Result<()> {
        let mut ring = Vec::new();
        ring.try_reserve(capacity)
            .and_then(|()| self.rings.try_reserve(1))
            .map_err(|_| Error::RingAllocation { vertices: capacity })?;
        self.rings.push(ring);
        Ok(())
    }

    /// Append a vertex to the currently open ring.
    pub(crate) fn push_vertex(&mut self, p: Point) {
        if let Some(ring) = self.rings.last_mut() {
            ring.push(p);
            self.vertices += 1;
            self.min_y = self.min_y.min(p.y);
            self.max_y = self.max_y.max(p.y);
        }
    }

    pub(crate) fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    /// Total vertex count across all rings.
    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices
    }

    pub(crate) fn clear(&mut self) {
        self.rings.clear();
        self.vertices = 0;
        self.min_y = f64::INFINITY;
        self.max_y = f64::NEG_INFINITY;
    }
}

/// Even-odd scanline fill of an accumulated ring set.
///
/// For every canvas row whose pixel-center y lies inside the set's y range,
/// the crossing x of each ring edge (wrap-around edge included) is collected,
/// sorted, and the spans between successive intercept pairs are burned. The
/// edge test takes one endpoint inclusive and the other exclusive so a row
/// passing exactly through a shared vertex is not counted twice. Intercepts
/// from every ring mix in one list, which is what makes holes drop out.
pub(crate) fn scanline_fill(
    pixmap: &mut Pixmap,
    extent: &Extent,
    mapper: &GeoToPixel,
    rings: &RingSet,
    burn: u8,
) {
    let resolution = mapper.resolution();
    let mut intercepts: SmallVec<[f64; 32]> = SmallVec::new();

    for ny in 0..pixmap.height() {
        // Sample the vertical center of the row.
        let row_y = extent.max_y - (f64::from(ny) + 0.5) * resolution;
        if row_y < rings.min_y || row_y > rings.max_y {
            continue;
        }

        intercepts.clear();
        for ring in rings.rings() {
            let n = ring.len();
            if n == 0 {
                continue;
            }
            let mut j = n - 1;
            for i in 0..n {
                let (yi, yj) = (ring[i].y, ring[j].y);
                if (yi < row_y && yj >= row_y) || (yj < row_y && yi >= row_y) {
                    let t = (row_y - yi) / (yj - yi);
                    intercepts.push(ring[i].x + t * (ring[j].x - ring[i].x));
                }
                j = i;
            }
        }
        intercepts.sort_unstable_by(f64::total_cmp);

        let mut i = 0;
        while i + 1 < intercepts.len() {
            let span_start = intercepts[i];
            let span_end = intercepts[i + 1];
            i += 2;
            if span_start >= extent.max_x {
                break;
            }
            if span_end > extent.min_x {
                let start = span_start.max(extent.min_x);
                let end = span_end.min(extent.max_x);
                let mut x = start;
                while x < end {
                    pixmap.set(mapper.col(x), i64::from(ny), burn);
                    x += resolution;
                }
            }
        }
    }
}
