// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streaming decoder for the binary geometry record format.
//!
//! A record is a one-byte byte-order marker (ignored; records are expected
//! in native order), a four-byte type tag, and a type-specific body. Multi
//! geometries and collections nest whole records, so decoding is one
//! recursive walk that advances a bounds-checked cursor and hands
//! primitives to a [`GeometrySink`] as they stream past; coordinates are
//! never copied out of the buffer unless a sink wants them.

use kurbo::Point;
use log::warn;

use crate::error::{Error, Result};

/// Flag bit marking the extended-dimension ("has z") variant of a tag.
const DIMENSION_FLAG: u32 = 0x8000_0000;

/// Tag value for an attribute-only record with no geometry.
const TAG_NO_GEOMETRY: u32 = 100;

/// Bytes of one coordinate pair plus any extra ordinates.
const fn coord_stride(extra_ordinates: u32) -> usize {
    (2 + extra_ordinates as usize) * 8
}

/// A bounds-checked read cursor over an untrusted byte buffer.
///
/// Every read checks the remaining length first; a short buffer surfaces
/// as [`Error::TruncatedRecord`] carrying the offending offset, and the
/// cursor never moves past the end.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn truncated<T>(&self) -> Result<T> {
        Err(Error::TruncatedRecord { offset: self.pos })
    }

    fn read_u8(&mut self) -> Result<u8> {
        let Some(&b) = self.buf.get(self.pos) else {
            return self.truncated();
        };
        self.pos += 1;
        Ok(b)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let Some(bytes) = self.buf.get(self.pos..self.pos + 4) else {
            return self.truncated();
        };
        self.pos += 4;
        Ok(u32::from_ne_bytes(bytes.try_into().unwrap()))
    }

    fn read_f64(&mut self) -> Result<f64> {
        let Some(bytes) = self.buf.get(self.pos..self.pos + 8) else {
            return self.truncated();
        };
        self.pos += 8;
        Ok(f64::from_ne_bytes(bytes.try_into().unwrap()))
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return self.truncated();
        }
        self.pos += n;
        Ok(())
    }

    /// Check that `count` coordinates of `stride` bytes each are present,
    /// without consuming them. Guards vertex-buffer reservations against
    /// hostile counts.
    fn ensure_coords(&self, count: u32, stride: usize) -> Result<()> {
        if (self.remaining() as u64) < u64::from(count) * stride as u64 {
            return self.truncated();
        }
        Ok(())
    }

    fn skip_coords(&mut self, count: u32, stride: usize) -> Result<()> {
        self.ensure_coords(count, stride)?;
        self.pos += count as usize * stride;
        Ok(())
    }
}

/// The geometry kinds a type tag can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    /// An attribute-only record; nothing follows the tag.
    NoGeometry,
}

/// A decoded type tag: the geometry kind plus how many ordinates beyond
/// x/y each coordinate carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tag {
    pub kind: GeometryType,
    pub extra_ordinates: u32,
}

impl Tag {
    /// Decode a raw tag value, honoring both the high-bit dimension flag
    /// and the 1000/2000/3000 offset encodings of extended dimensions.
    pub(crate) fn decode(raw: u32) -> Option<Self> {
        let (rest, flag_extra) = if raw & DIMENSION_FLAG != 0 {
            (raw & !DIMENSION_FLAG, 1)
        } else {
            (raw, 0)
        };
        let (base, offset_extra) = match rest {
            1000..=1999 => (rest - 1000, 1),
            2000..=2999 => (rest - 2000, 1),
            3000..=3999 => (rest - 3000, 2),
            _ => (rest, 0),
        };
        let kind = match base {
            1 => GeometryType::Point,
            2 => GeometryType::LineString,
            3 => GeometryType::Polygon,
            4 => GeometryType::MultiPoint,
            5 => GeometryType::MultiLineString,
            6 => GeometryType::MultiPolygon,
            7 => GeometryType::GeometryCollection,
            TAG_NO_GEOMETRY => GeometryType::NoGeometry,
            _ => return None,
        };
        Some(Self {
            kind,
            extra_ordinates: flag_extra + offset_extra,
        })
    }
}

/// Receiver for the primitives a record decodes into.
///
/// The two `*_enabled` methods let the decoder skip coordinate bytes it
/// knows nobody wants, so a stroke-less, fill-less pass over a large line
/// string is a pure cursor advance.
pub(crate) trait GeometrySink {
    /// Whether line and ring edges should be delivered via [`Self::segment`].
    fn stroke_enabled(&self) -> bool;
    /// Whether ring vertices should be buffered via [`Self::ring_vertex`].
    fn fill_enabled(&self) -> bool;
    /// A point geometry.
    fn point(&mut self, p: Point);
    /// One edge of a line string or ring.
    fn segment(&mut self, a: Point, b: Point);
    /// A ring of `vertices` vertices follows.
    fn ring_start(&mut self, vertices: usize) -> Result<()>;
    /// The next vertex of the ring opened by [`Self::ring_start`].
    fn ring_vertex(&mut self, p: Point);
}

/// Whether a record decoded cleanly or the buffer had to be abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Decoded,
    /// An unrecognized type tag was hit. The format is length-implicit, so
    /// there is no way to locate the following sibling; the caller must not
    /// decode anything further from this buffer.
    Abandoned,
}

/// Decode exactly one record, streaming its primitives into `sink`, and
/// leave the cursor just past it.
pub(crate) fn decode_record(cur: &mut Cursor<'_>, sink: &mut impl GeometrySink) -> Result<Outcome> {
    let _byte_order = cur.read_u8()?;
    let tag_offset = cur.pos();
    let raw = cur.read_u32()?;
    let Some(tag) = Tag::decode(raw) else {
        warn!("unrecognized geometry type tag {raw:#010x} at byte {tag_offset}, abandoning the rest of the buffer");
        return Ok(Outcome::Abandoned);
    };

    match tag.kind {
        GeometryType::Point => {
            let p = read_point(cur, tag.extra_ordinates)?;
            sink.point(p);
        }
        GeometryType::LineString => decode_line_string(cur, tag.extra_ordinates, sink)?,
        GeometryType::Polygon => {
            let rings = cur.read_u32()?;
            for _ in 0..rings {
                decode_ring(cur, tag.extra_ordinates, sink)?;
            }
        }
        GeometryType::MultiPoint
        | GeometryType::MultiLineString
        | GeometryType::MultiPolygon
        | GeometryType::GeometryCollection => {
            let members = cur.read_u32()?;
            for _ in 0..members {
                if decode_record(cur, sink)? == Outcome::Abandoned {
                    return Ok(Outcome::Abandoned);
                }
            }
        }
        GeometryType::NoGeometry => {}
    }
    Ok(Outcome::Decoded)
}

fn read_point(cur: &mut Cursor<'_>, extra_ordinates: u32) -> Result<Point> {
    let x = cur.read_f64()?;
    let y = cur.read_f64()?;
    cur.skip(extra_ordinates as usize * 8)?;
    Ok(Point::new(x, y))
}

fn decode_line_string(
    cur: &mut Cursor<'_>,
    extra_ordinates: u32,
    sink: &mut impl GeometrySink,
) -> Result<()> {
    let count = cur.read_u32()?;
    let stride = coord_stride(extra_ordinates);
    if !sink.stroke_enabled() {
        return cur.skip_coords(count, stride);
    }
    if count == 0 {
        return Ok(());
    }
    let mut prev = read_point(cur, extra_ordinates)?;
    for _ in 1..count {
        let next = read_point(cur, extra_ordinates)?;
        sink.segment(prev, next);
        prev = next;
    }
    Ok(())
}

/// Like a line string, but closed: the edge from the last vertex back to
/// the first is always delivered, whether or not the input repeats it.
fn decode_ring(
    cur: &mut Cursor<'_>,
    extra_ordinates: u32,
    sink: &mut impl GeometrySink,
) -> Result<()> {
    let count = cur.read_u32()?;
    let stride = coord_stride(extra_ordinates);
    let stroke = sink.stroke_enabled();
    let fill = sink.fill_enabled();
    if !stroke && !fill {
        return cur.skip_coords(count, stride);
    }
    if count == 0 {
        return Ok(());
    }
    if fill {
        cur.ensure_coords(count, stride)?;
        sink.ring_start(count as usize)?;
    }

    let first = read_point(cur, extra_ordinates)?;
    if fill {
        sink.ring_vertex(first);
    }
    let mut prev = first;
    for _ in 1..count {
        let next = read_point(cur, extra_ordinates)?;
        if stroke {
            sink.segment(prev, next);
        }
        if fill {
            sink.ring_vertex(next);
        }
        prev = next;
    }
    if stroke {
        sink.segment(prev, first);
    }
    Ok(())
}
