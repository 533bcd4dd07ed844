use serde_json::Value;

use crate::options::color::cmyk_hex_to_rgb;
use crate::options::record::Options;

/// Default pixel scale when neither `scale` nor `scaleX` is usable.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Horizontal and vertical pixel scale resolved from an option record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    /// `scaleX` falls back to `scale` (default 2); `scaleY` falls back to `scaleX`.
    pub fn resolve(opts: &Options) -> Self {
        let scale = opts.nonzero_number("scale").unwrap_or(DEFAULT_SCALE);
        let x = opts.nonzero_number("scaleX").unwrap_or(scale);
        let y = opts.nonzero_number("scaleY").unwrap_or(x);
        Self { x, y }
    }
}

/// Resolved, already-scaled padding in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    /// Read the four padding options as stored by [`fixup_options`].
    pub fn from_options(opts: &Options) -> Self {
        let side = |key| opts.number(key).unwrap_or(0.0);
        Self {
            top: side("paddingtop"),
            left: side("paddingleft"),
            right: side("paddingright"),
            bottom: side("paddingbottom"),
        }
    }
}

/// Canonicalize scale, padding, and background color in place.
///
/// Padding sides resolve as `side > dimensional > padding > 0`, multiplied by the scale of
/// their axis. Values that are present but not numeric count as absent. An 8-hex-digit
/// `backgroundcolor` is read as CMYK and replaced by its `rrggbb` equivalent; other values
/// are left alone. The call is not idempotent: padding is scaled each time.
pub fn fixup_options(opts: &mut Options) -> &mut Options {
    let scale = Scale::resolve(opts);
    opts.set_number("scaleX", scale.x);
    opts.set_number("scaleY", scale.y);

    let sides = [
        ("paddingleft", "paddingwidth", scale.x),
        ("paddingright", "paddingwidth", scale.x),
        ("paddingtop", "paddingheight", scale.y),
        ("paddingbottom", "paddingheight", scale.y),
    ];
    for (side, dimensional, s) in sides {
        let resolved = resolve_padding(opts, side, dimensional, s);
        opts.set_number(side, resolved);
    }

    if let Some(rgb) = opts.str("backgroundcolor").and_then(cmyk_hex_to_rgb) {
        opts.set("backgroundcolor", Value::String(rgb.to_hex()));
    }

    opts
}

fn resolve_padding(opts: &Options, side: &str, dimensional: &str, s: f64) -> f64 {
    opts.number(side)
        .or_else(|| opts.number(dimensional))
        .or_else(|| opts.number("padding"))
        .map_or(0.0, |p| p * s)
}

#[cfg(test)]
#[path = "../../tests/unit/options/normalize.rs"]
mod tests;
