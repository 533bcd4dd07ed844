use crate::foundation::core::{Affine, BezPath, FontSpec, Point, Rgb, Rotation, TextMetrics};
use crate::foundation::error::BarmillResult;
use crate::options::normalize::{Padding, Scale};
use crate::options::record::Options;

/// Drawing primitives issued by the encoding engine.
///
/// Coordinates are unscaled symbol units with the origin at the top-left of the symbol.
/// `polygon` and `ellipse` append to a pending path that the next `fill` paints. Primitives
/// cannot fail; sinks report problems from [`DrawingSink::finalize`].
pub trait Drawing {
    /// Set the horizontal and vertical pixel scale. Called once, before any primitive.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Measure `text` in unscaled units.
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextMetrics;

    /// Start the symbol; `width`/`height` are its unscaled extent.
    fn init(&mut self, width: f64, height: f64);

    /// Straight line of thickness `line_width` centered on the segment.
    fn line(&mut self, from: Point, to: Point, line_width: f64, color: Rgb);

    /// Append a closed polygon to the pending path.
    fn polygon(&mut self, points: &[Point]);

    /// Fill a closed hexagon immediately.
    fn hexagon(&mut self, points: &[Point; 6], color: Rgb);

    /// Append an ellipse to the pending path; `ccw` reverses winding to cut holes.
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, ccw: bool);

    /// Paint and clear the pending path.
    fn fill(&mut self, color: Rgb);

    /// Draw `text` with its baseline starting at `origin`.
    fn text(&mut self, origin: Point, text: &str, color: Rgb, font: &FontSpec);
}

/// A drawing backend that produces an artifact once drawing is complete.
pub trait DrawingSink: Drawing {
    /// Backend-specific result: encoded bytes, a surface handle, or nothing.
    type Artifact;

    /// Complete the artifact and hand it back.
    fn finalize(&mut self) -> BarmillResult<Self::Artifact>;
}

/// Maps unscaled symbol coordinates to output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub scale: Scale,
    pub padding: Padding,
    pub rotation: Rotation,
}

impl Placement {
    /// Read scale, padding, and `rotate` from normalized options.
    pub fn from_options(opts: &Options) -> Self {
        Self {
            scale: Scale::resolve(opts),
            padding: Padding::from_options(opts),
            rotation: opts.str("rotate").map(Rotation::parse).unwrap_or_default(),
        }
    }

    /// Unrotated pixel extent of a `width x height` symbol including padding.
    fn unrotated(&self, width: f64, height: f64) -> (f64, f64) {
        let p = &self.padding;
        (
            width * self.scale.x + p.left + p.right,
            height * self.scale.y + p.top + p.bottom,
        )
    }

    /// Output size in whole pixels, after rotation.
    pub fn output_size(&self, width: f64, height: f64) -> (u32, u32) {
        let (w, h) = self.unrotated(width, height);
        let (w, h) = if self.rotation.swaps_axes() {
            (h, w)
        } else {
            (w, h)
        };
        (w.max(0.0).ceil() as u32, h.max(0.0).ceil() as u32)
    }

    /// Transform from symbol units to output pixels.
    pub fn transform(&self, width: f64, height: f64) -> Affine {
        let (w, h) = self.unrotated(width, height);
        self.rotation.transform(w, h)
            * Affine::translate((self.padding.left, self.padding.top))
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }
}

/// Path accumulated by `polygon`/`ellipse` until the next `fill`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PendingPath {
    path: BezPath,
}

impl PendingPath {
    pub(crate) fn push_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.path.move_to(*first);
        for p in rest {
            self.path.line_to(*p);
        }
        self.path.close_path();
    }

    pub(crate) fn push_ellipse(&mut self, c: Point, rx: f64, ry: f64, ccw: bool) {
        // Four cubic quadrants; kappa approximates a circular arc.
        const K: f64 = 0.552_284_749_830_793_4;
        let (kx, ky) = (rx * K, ry * K);
        let dir = if ccw { -1.0 } else { 1.0 };
        let at = |x: f64, y: f64| Point::new(c.x + x, c.y + dir * y);

        self.path.move_to(at(rx, 0.0));
        self.path.curve_to(at(rx, ky), at(kx, ry), at(0.0, ry));
        self.path.curve_to(at(-kx, ry), at(-rx, ky), at(-rx, 0.0));
        self.path.curve_to(at(-rx, -ky), at(-kx, -ry), at(0.0, -ry));
        self.path.curve_to(at(kx, -ry), at(rx, -ky), at(rx, 0.0));
        self.path.close_path();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    pub(crate) fn take(&mut self) -> BezPath {
        std::mem::take(&mut self.path)
    }
}

/// Rectangle covering a segment of thickness `line_width`.
pub(crate) fn line_outline(from: Point, to: Point, line_width: f64) -> BezPath {
    let d = to - from;
    let len = d.hypot();
    let half = line_width / 2.0;
    let n = if len > 0.0 {
        kurbo::Vec2::new(-d.y / len, d.x / len) * half
    } else {
        kurbo::Vec2::new(half, 0.0)
    };
    let mut path = BezPath::new();
    path.move_to(from + n);
    path.line_to(to + n);
    path.line_to(to - n);
    path.line_to(from - n);
    path.close_path();
    path
}

pub(crate) fn hexagon_outline(points: &[Point; 6]) -> BezPath {
    let mut pending = PendingPath::default();
    pending.push_polygon(points);
    pending.take()
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
