pub use kurbo::{Affine, BezPath, Point, Rect};

/// Opaque 8-bit RGB color used by drawing primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB` (optionally `#`-prefixed, case-insensitive).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Lowercase `rrggbb`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Output orientation applied by sinks after drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Normal.
    #[default]
    N,
    /// Rotated 90 degrees clockwise.
    R,
    /// Rotated 90 degrees counter-clockwise.
    L,
    /// Inverted (180 degrees).
    I,
}

impl Rotation {
    /// Parse the single-letter option value; anything unknown reads as `N`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "R" | "r" => Self::R,
            "L" | "l" => Self::L,
            "I" | "i" => Self::I,
            _ => Self::N,
        }
    }

    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::R | Self::L)
    }

    /// Transform mapping an unrotated `w x h` image onto the rotated output.
    pub fn transform(self, w: f64, h: f64) -> Affine {
        match self {
            Self::N => Affine::IDENTITY,
            Self::R => Affine::new([0.0, 1.0, -1.0, 0.0, h, 0.0]),
            Self::L => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, w]),
            Self::I => Affine::new([-1.0, 0.0, 0.0, -1.0, w, h]),
        }
    }
}

/// Text extents reported by a sink's `measure` call, in unscaled units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextMetrics {
    /// Metrics for sinks without font data: 0.6 em advance, 0.75/0.25 em ascent/descent.
    pub fn approximate(text: &str, font_width: f64, font_height: f64) -> Self {
        let chars = text.chars().count() as f64;
        Self {
            width: chars * font_width * 0.6,
            ascent: font_height * 0.75,
            descent: font_height * 0.25,
        }
    }
}

/// Font request passed along with text primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub name: String,
    /// Horizontal size in points.
    pub width: f64,
    /// Vertical size in points.
    pub height: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
