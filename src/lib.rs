//! Barmill is the input/output layer around a barcode symbology engine.
//!
//! It takes a loosely typed options record, normalizes it, drives an external encoding engine
//! through an abstract drawing surface, and returns the finished artifact: PNG bytes, a drawn
//! canvas surface, or plain records harvested from the engine's raw mode.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: [`fixup_options`] resolves scale, padding and CMYK background colors.
//! 2. **Render**: [`render`] validates `bcid`/`text`, rewrites options for the engine and runs
//!    [`Encoder::encode`] against a [`DrawingSink`].
//! 3. **Finalize**: the sink turns its recorded primitives into an artifact
//!    ([`RasterSink`] for PNG, [`CanvasSink`] for a host [`Surface`]).
//!
//! [`extract_raw`] is the alternate path: it runs [`Encoder::encode_raw`] and keeps only the
//! dimensional fields of each dictionary the engine produced.
//!
//! The symbology algorithms themselves are not part of this crate; callers supply an
//! [`Encoder`].
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod http;
mod options;
mod raw;
mod render;

pub use encode::engine::{ArrayView, Dict, Encoder, RawValue, StackItem};
pub use foundation::core::{Affine, BezPath, FontSpec, Point, Rect, Rgb, Rotation, TextMetrics};
pub use foundation::error::{BarmillError, BarmillResult, EncodingError};
pub use http::adapter::{
    CONTENT_TYPE_PNG, CONTENT_TYPE_TEXT, HttpResponse, handle_request, handle_request_blocking,
    options_from_query,
};
pub use options::color::cmyk_hex_to_rgb;
pub use options::normalize::{DEFAULT_SCALE, Padding, Scale, fixup_options};
pub use options::record::{Options, numeric, text, truthy};
pub use raw::extract::{RawField, RawInput, RawKey, RawRecord, extract_raw};
pub use render::buffer::{PendingPng, to_buffer, to_buffer_with};
pub use render::canvas::{CanvasArg, CanvasSink, Surface, SurfaceLookup, draw_canvas, to_canvas};
pub use render::null::NullSink;
pub use render::pipeline::{
    MM_HEIGHT_SYMBOLOGY, MM_PER_INCH, RESERVED_OPTIONS, encode_into, engine_options, render,
};
pub use render::raster::RasterSink;
pub use render::sink::{Drawing, DrawingSink, Placement};
