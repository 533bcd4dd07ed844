use crate::foundation::core::{FontSpec, Point, Rgb, TextMetrics};
use crate::foundation::error::BarmillResult;
use crate::render::sink::{Drawing, DrawingSink};

/// Sink that draws nothing.
///
/// Used for raw extraction, where the engine only needs a target for the measurements it
/// performs before layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Drawing for NullSink {
    fn scale(&mut self, _sx: f64, _sy: f64) {}

    fn measure(&mut self, text: &str, font: &FontSpec) -> TextMetrics {
        TextMetrics::approximate(text, font.width, font.height)
    }

    fn init(&mut self, _width: f64, _height: f64) {}

    fn line(&mut self, _from: Point, _to: Point, _line_width: f64, _color: Rgb) {}

    fn polygon(&mut self, _points: &[Point]) {}

    fn hexagon(&mut self, _points: &[Point; 6], _color: Rgb) {}

    fn ellipse(&mut self, _center: Point, _rx: f64, _ry: f64, _ccw: bool) {}

    fn fill(&mut self, _color: Rgb) {}

    fn text(&mut self, _origin: Point, _text: &str, _color: Rgb, _font: &FontSpec) {}
}

impl DrawingSink for NullSink {
    type Artifact = ();

    fn finalize(&mut self) -> BarmillResult<()> {
        Ok(())
    }
}
