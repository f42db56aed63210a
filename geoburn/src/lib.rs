// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geoburn rasterizes vector geometries into caller-owned byte mask grids.
//!
//! The input is the standard binary geometry encoding (points, line
//! strings, polygons, their multi variants, and nested collections) in
//! native byte order. A [`RasterContext`] maps geographic coordinates onto
//! a [`Pixmap`] through an [`Extent`] and burns strokes (integer Bresenham
//! with configurable width), even-odd scanline fills with holes, cross
//! markers for points, and bitmap-font labels. Untouched cells stay 0;
//! covered cells become 1.
//!
//! Everything around the burning itself, such as reading features from a
//! dataset, filtering, reprojection, and choosing label anchors, is
//! deliberately left to the caller.
//!
//! ```
//! use geoburn::{Extent, Pixmap, RasterContext};
//!
//! # fn wkb_for_some_feature() -> Vec<u8> {
//! #     let mut out = vec![1_u8];
//! #     out.extend_from_slice(&1_u32.to_ne_bytes());
//! #     out.extend_from_slice(&5.0_f64.to_ne_bytes());
//! #     out.extend_from_slice(&5.0_f64.to_ne_bytes());
//! #     out
//! # }
//! # fn main() -> geoburn::Result<()> {
//! let mut pixmap = Pixmap::new(256, 256);
//! let mut ctx = RasterContext::new(Extent::new(0.0, 100.0, 100.0, 0.0), 256, 256)?;
//! ctx.set_stroke_width(2);
//! ctx.burn_wkb(&wkb_for_some_feature(), &mut pixmap)?;
//! # Ok(())
//! # }
//! ```

pub use kurbo;

mod error;
mod extent;
mod fill;
pub mod font;
mod pixmap;
mod render;
mod stroke;
mod text;
mod wkb;

pub use error::{Error, Result};
pub use extent::{Extent, GeoToPixel};
pub use pixmap::Pixmap;
pub use render::{RasterContext, DEFAULT_HALF_CROSS};
pub use text::text_advance;
