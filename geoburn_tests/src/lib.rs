// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers for writing Geoburn integration tests: hand-rolled geometry
//! record builders, canvas assertions, and a PNG dump for eyeballing a
//! failing canvas.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use geoburn::Pixmap;

pub mod wkb {
    //! Builders emitting geometry records in native byte order.

    pub const POINT: u32 = 1;
    pub const LINE_STRING: u32 = 2;
    pub const POLYGON: u32 = 3;
    pub const MULTI_POINT: u32 = 4;
    pub const MULTI_LINE_STRING: u32 = 5;
    pub const MULTI_POLYGON: u32 = 6;
    pub const GEOMETRY_COLLECTION: u32 = 7;
    pub const NO_GEOMETRY: u32 = 100;

    /// The flag bit marking a tag's has-z variant.
    pub const Z_FLAG: u32 = 0x8000_0000;

    /// Append a record header: byte-order marker plus type tag.
    pub fn header(out: &mut Vec<u8>, tag: u32) {
        out.push(1);
        out.extend_from_slice(&tag.to_ne_bytes());
    }

    /// Append a count-prefixed coordinate sequence.
    pub fn coord_seq(out: &mut Vec<u8>, pts: &[(f64, f64)]) {
        out.extend_from_slice(&(pts.len() as u32).to_ne_bytes());
        for &(x, y) in pts {
            out.extend_from_slice(&x.to_ne_bytes());
            out.extend_from_slice(&y.to_ne_bytes());
        }
    }

    /// A point record.
    pub fn point(x: f64, y: f64) -> Vec<u8> {
        let mut out = vec![];
        header(&mut out, POINT);
        out.extend_from_slice(&x.to_ne_bytes());
        out.extend_from_slice(&y.to_ne_bytes());
        out
    }

    /// A point record with a z ordinate.
    pub fn point_z(x: f64, y: f64, z: f64) -> Vec<u8> {
        let mut out = vec![];
        header(&mut out, POINT | Z_FLAG);
        for v in [x, y, z] {
            out.extend_from_slice(&v.to_ne_bytes());
        }
        out
    }

    /// A line string record.
    pub fn line_string(pts: &[(f64, f64)]) -> Vec<u8> {
        let mut out = vec![];
        header(&mut out, LINE_STRING);
        coord_seq(&mut out, pts);
        out
    }

    /// A polygon record from one or more rings; the first ring is the
    /// exterior.
    pub fn polygon(rings: &[&[(f64, f64)]]) -> Vec<u8> {
        let mut out = vec![];
        header(&mut out, POLYGON);
        out.extend_from_slice(&(rings.len() as u32).to_ne_bytes());
        for ring in rings {
            coord_seq(&mut out, ring);
        }
        out
    }

    /// A multi-geometry or collection record wrapping whole member records.
    pub fn collection(tag: u32, members: &[Vec<u8>]) -> Vec<u8> {
        let mut out = vec![];
        header(&mut out, tag);
        out.extend_from_slice(&(members.len() as u32).to_ne_bytes());
        for member in members {
            out.extend_from_slice(member);
        }
        out
    }
}

/// Render a pixmap as one ASCII row per line: `.` for 0, `#` for 1, and
/// the low hex digit for anything else.
pub fn render_ascii(pixmap: &Pixmap) -> String {
    let mut out = String::new();
    for y in 0..pixmap.height() {
        for &cell in pixmap.row(y) {
            out.push(match cell {
                0 => '.',
                1 => '#',
                other => char::from_digit(u32::from(other) % 16, 16).unwrap(),
            });
        }
        out.push('\n');
    }
    out
}

/// Assert that the canvas matches an expected ASCII picture (same format
/// as [`render_ascii`]).
///
/// On mismatch the canvas is written as a PNG if `GEOBURN_TEST_DUMP` names
/// a directory, then both pictures land in the panic message.
#[track_caller]
pub fn assert_pixels(pixmap: &Pixmap, expected: &[&str]) {
    let expected: String = expected.iter().map(|row| format!("{row}\n")).collect();
    let actual = render_ascii(pixmap);
    if actual != expected {
        let dumped = match dump_png(pixmap, "assert_pixels") {
            Ok(Some(path)) => format!("canvas dumped to {}", path.display()),
            Ok(None) => "set GEOBURN_TEST_DUMP=<dir> to dump the canvas as PNG".to_string(),
            Err(e) => format!("PNG dump failed: {e}"),
        };
        panic!("canvas mismatch ({dumped})\nexpected:\n{expected}\nactual:\n{actual}");
    }
}

/// Write the canvas as an 8-bit grayscale PNG (0 stays black, burned
/// cells map to white) into the directory named by `GEOBURN_TEST_DUMP`.
///
/// Returns `Ok(None)` when the variable is unset.
pub fn dump_png(pixmap: &Pixmap, name: &str) -> anyhow::Result<Option<PathBuf>> {
    let Some(dir) = env::var_os("GEOBURN_TEST_DUMP") else {
        return Ok(None);
    };
    let path = PathBuf::from(dir).join(format!("{name}.png"));
    let file = File::create(&path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        u32::from(pixmap.width()),
        u32::from(pixmap.height()),
    );
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    let scaled: Vec<u8> = pixmap
        .data()
        .iter()
        .map(|&c| if c == 0 { 0 } else { 255 })
        .collect();
    writer.write_image_data(&scaled)?;
    Ok(Some(path))
}
