use serde_json::Value;

use crate::encode::engine::Encoder;
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::options::normalize::Scale;
use crate::options::record::Options;
use crate::render::sink::{Drawing, DrawingSink};

/// Options consumed by the pipeline and sinks; never forwarded to the engine.
pub const RESERVED_OPTIONS: [&str; 14] = [
    "bcid",
    "text",
    "scale",
    "scaleX",
    "scaleY",
    "rotate",
    "padding",
    "paddingwidth",
    "paddingheight",
    "paddingtop",
    "paddingleft",
    "paddingright",
    "paddingbottom",
    "backgroundcolor",
];

/// Engine dimensions are in inches.
pub const MM_PER_INCH: f64 = 25.4;

/// Symbology whose `height` option is already in millimeters.
pub const MM_HEIGHT_SYMBOLOGY: &str = "pharmacode2";

/// Render a bar code through `sink` and return the sink's artifact.
///
/// `params` should already have been through
/// [`fixup_options`](crate::options::normalize::fixup_options) when the sink reads padding or
/// background from it. Engine failures are returned unchanged.
pub fn render<S: DrawingSink>(
    params: &Options,
    sink: &mut S,
    engine: &dyn Encoder,
) -> BarmillResult<S::Artifact> {
    encode_into(params, sink, engine)?;
    sink.finalize()
}

/// Everything [`render`] does short of finalizing the sink.
#[tracing::instrument(skip_all, fields(bcid = tracing::field::Empty))]
pub fn encode_into(
    params: &Options,
    sink: &mut dyn Drawing,
    engine: &dyn Encoder,
) -> BarmillResult<()> {
    let scale = Scale::resolve(params);

    let text = params
        .text("text")
        .ok_or_else(|| BarmillError::missing_field("text"))?;
    let bcid = params
        .text("bcid")
        .ok_or_else(|| BarmillError::missing_field("bcid"))?;
    tracing::Span::current().record("bcid", bcid.as_str());

    let opts = engine_options(params, &bcid);
    tracing::debug!(passthrough = opts.len(), sx = scale.x, sy = scale.y, "encoding");

    sink.scale(scale.x, scale.y);
    engine.encode(sink, &bcid, &text, &opts)?;
    Ok(())
}

/// Build the option record handed to the engine: everything not reserved, with
/// `includetext` forced by `alttext` and `height`/`width` converted from mm to inches.
pub fn engine_options(params: &Options, bcid: &str) -> Options {
    let mut opts: Options = params
        .iter()
        .filter(|(k, _)| !RESERVED_OPTIONS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if opts.truthy("alttext") {
        opts.set("includetext", Value::Bool(true));
    }

    if bcid != MM_HEIGHT_SYMBOLOGY
        && let Some(mm) = opts.nonzero_number("height")
    {
        let inches = mm / MM_PER_INCH;
        opts.set_number("height", if inches != 0.0 { inches } else { 0.5 });
    }
    if let Some(mm) = opts.nonzero_number("width") {
        opts.set_number("width", mm / MM_PER_INCH);
    }

    opts
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
