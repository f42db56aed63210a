// Copyright 2026 the Geoburn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Errors that can occur while rasterizing.
///
/// Each variant names the phase that produced it: parameter validation
/// happens before any decoding, decode errors abort the current geometry,
/// and accumulator allocation failures abort the current call.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Canvas dimensions must both be nonzero.
    #[error("canvas dimensions must be nonzero, got {width}x{height}")]
    EmptyCanvas {
        /// Requested canvas width.
        width: u16,
        /// Requested canvas height.
        height: u16,
    },

    /// The extent collapses to a non-positive or non-finite pixel
    /// resolution.
    #[error("extent yields an unusable resolution of {resolution} units per pixel")]
    DegenerateExtent {
        /// The resolution the extent would produce.
        resolution: f64,
    },

    /// A canvas with different dimensions than the context was built for
    /// was passed to a burning operation.
    #[error(
        "canvas is {actual_width}x{actual_height} but the context was built \
         for {expected_width}x{expected_height}"
    )]
    CanvasMismatch {
        /// Width the context was built for.
        expected_width: u16,
        /// Height the context was built for.
        expected_height: u16,
        /// Width of the canvas passed in.
        actual_width: u16,
        /// Height of the canvas passed in.
        actual_height: u16,
    },

    /// Batch vertex input must supply one y per x.
    #[error("vertex slices differ in length: {x_len} x coordinates vs {y_len} y coordinates")]
    VertexLengthMismatch {
        /// Number of x coordinates supplied.
        x_len: usize,
        /// Number of y coordinates supplied.
        y_len: usize,
    },

    /// A geometry record implies more bytes than the buffer holds.
    #[error("geometry record truncated at byte {offset}")]
    TruncatedRecord {
        /// Buffer offset at which the read would have gone out of bounds.
        offset: usize,
    },

    /// The ring accumulator could not grow.
    #[error("out of memory while buffering {vertices} ring vertices")]
    RingAllocation {
        /// Number of vertices the failed reservation asked for.
        vertices: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
