//! Seam to the symbology encoding engine.
//!
//! The engine itself lives outside this crate; it is injected into every entry point as a
//! `&dyn Encoder`.

/// Engine trait and raw result stack model.
pub mod engine;
