use crate::encode::engine::Encoder;
use crate::foundation::core::{Affine, BezPath, FontSpec, Point, Rgb, TextMetrics};
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::options::normalize::{Scale, fixup_options};
use crate::options::record::Options;
use crate::render::pipeline::render;
use crate::render::sink::{
    Drawing, DrawingSink, PendingPath, Placement, hexagon_outline, line_outline,
};

/// A caller-owned drawable surface, such as a window canvas or an in-memory bitmap.
///
/// Paths arrive in output pixel coordinates.
pub trait Surface {
    /// Size the surface to the rendered image.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear to `color`, or to transparent when `None`.
    fn clear(&mut self, color: Option<Rgb>);

    fn fill_path(&mut self, path: &BezPath, color: Rgb);

    /// Draw `text` with its baseline at the origin of `transform`.
    fn fill_text(&mut self, transform: Affine, text: &str, color: Rgb, font: &FontSpec);

    /// Surfaces with real font metrics should override this.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> TextMetrics {
        TextMetrics::approximate(text, font.width, font.height)
    }
}

/// Lets callers lend a surface and keep it when the render fails.
impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn clear(&mut self, color: Option<Rgb>) {
        (**self).clear(color);
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgb) {
        (**self).fill_path(path, color);
    }

    fn fill_text(&mut self, transform: Affine, text: &str, color: Rgb, font: &FontSpec) {
        (**self).fill_text(transform, text, color, font);
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> TextMetrics {
        (**self).measure_text(text, font)
    }
}

/// Resolves string references (an element id, then a selector) to surfaces.
pub trait SurfaceLookup<S> {
    fn by_id(&mut self, id: &str) -> Option<S>;

    fn query_selector(&mut self, selector: &str) -> Option<S>;
}

/// One positional argument of [`to_canvas`].
#[derive(Debug)]
pub enum CanvasArg<S> {
    Options(Options),
    Surface(S),
    /// Id or selector resolved through a [`SurfaceLookup`].
    Selector(String),
}

/// Client-side sink that draws straight onto a [`Surface`] and hands it back on finalize.
pub struct CanvasSink<S: Surface> {
    surface: Option<S>,
    placement: Placement,
    background: Option<Rgb>,
    transform: Option<Affine>,
    pending: PendingPath,
    early_draw: bool,
}

impl<S: Surface> CanvasSink<S> {
    pub fn new(surface: S, opts: &Options) -> Self {
        Self {
            surface: Some(surface),
            placement: Placement::from_options(opts),
            background: opts.str("backgroundcolor").and_then(Rgb::from_hex),
            transform: None,
            pending: PendingPath::default(),
            early_draw: false,
        }
    }

    fn paint(&mut self, path: &BezPath, color: Rgb) {
        match (self.transform, self.surface.as_mut()) {
            (Some(t), Some(surface)) => surface.fill_path(&(t * path.clone()), color),
            _ => self.early_draw = true,
        }
    }
}

impl<S: Surface> Drawing for CanvasSink<S> {
    fn scale(&mut self, sx: f64, sy: f64) {
        self.placement.scale = Scale { x: sx, y: sy };
    }

    fn measure(&mut self, text: &str, font: &FontSpec) -> TextMetrics {
        match self.surface.as_mut() {
            Some(surface) => surface.measure_text(text, font),
            None => TextMetrics::approximate(text, font.width, font.height),
        }
    }

    fn init(&mut self, width: f64, height: f64) {
        let (w, h) = self.placement.output_size(width, height);
        self.transform = Some(self.placement.transform(width, height));
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(w, h);
            surface.clear(self.background);
        }
    }

    fn line(&mut self, from: Point, to: Point, line_width: f64, color: Rgb) {
        self.paint(&line_outline(from, to, line_width), color);
    }

    fn polygon(&mut self, points: &[Point]) {
        self.pending.push_polygon(points);
    }

    fn hexagon(&mut self, points: &[Point; 6], color: Rgb) {
        self.paint(&hexagon_outline(points), color);
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, ccw: bool) {
        self.pending.push_ellipse(center, rx, ry, ccw);
    }

    fn fill(&mut self, color: Rgb) {
        if !self.pending.is_empty() {
            let path = self.pending.take();
            self.paint(&path, color);
        }
    }

    fn text(&mut self, origin: Point, text: &str, color: Rgb, font: &FontSpec) {
        match (self.transform, self.surface.as_mut()) {
            (Some(t), Some(surface)) => {
                surface.fill_text(t * Affine::translate(origin.to_vec2()), text, color, font);
            }
            _ => self.early_draw = true,
        }
    }
}

impl<S: Surface> DrawingSink for CanvasSink<S> {
    type Artifact = S;

    fn finalize(&mut self) -> BarmillResult<S> {
        if self.early_draw {
            return Err(BarmillError::validation(
                "drawing primitive issued before init",
            ));
        }
        self.surface
            .take()
            .ok_or_else(|| BarmillError::validation("canvas surface already returned"))
    }
}

/// Render onto `surface` and return it.
///
/// Pass `&mut surface` to keep the surface when rendering fails.
pub fn draw_canvas<S: Surface>(
    surface: S,
    mut opts: Options,
    engine: &dyn Encoder,
) -> BarmillResult<S> {
    fixup_options(&mut opts);
    let mut sink = CanvasSink::new(surface, &opts);
    render(&opts, &mut sink, engine)
}

/// Canvas entry point taking its two arguments in either order.
///
/// One argument must be the options record; the other must be a surface or a string that
/// `lookup` resolves to one. Anything else is [`BarmillError::InvalidSurfaceReference`].
pub fn to_canvas<S: Surface>(
    first: CanvasArg<S>,
    second: CanvasArg<S>,
    lookup: &mut dyn SurfaceLookup<S>,
    engine: &dyn Encoder,
) -> BarmillResult<S> {
    let (opts, surface) = resolve_args(first, second, lookup)?;
    draw_canvas(surface, opts, engine)
}

fn resolve_args<S>(
    first: CanvasArg<S>,
    second: CanvasArg<S>,
    lookup: &mut dyn SurfaceLookup<S>,
) -> BarmillResult<(Options, S)> {
    match (first, second) {
        (CanvasArg::Options(opts), other) | (other, CanvasArg::Options(opts)) => {
            let surface = match other {
                CanvasArg::Surface(s) => s,
                CanvasArg::Selector(sel) => lookup
                    .by_id(&sel)
                    .or_else(|| lookup.query_selector(&sel))
                    .ok_or_else(|| {
                        BarmillError::invalid_surface(format!("no surface matches '{sel}'"))
                    })?,
                CanvasArg::Options(_) => {
                    return Err(BarmillError::invalid_surface(
                        "two option records given, no surface",
                    ));
                }
            };
            Ok((opts, surface))
        }
        _ => Err(BarmillError::invalid_surface("no option record given")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
