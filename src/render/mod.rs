//! Render pipeline and drawing sinks.

/// Async and callback PNG entry points.
pub mod buffer;
/// Caller-provided surface backend and the canvas entry point.
pub mod canvas;
/// No-op backend used for raw extraction.
pub mod null;
/// Option partitioning, unit conversion, and the engine call.
pub mod pipeline;
/// PNG backend.
pub mod raster;
/// Drawing primitives and the sink contract.
pub mod sink;
mod text;
