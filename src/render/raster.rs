use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::foundation::core::{Affine, BezPath, FontSpec, Point, Rgb, TextMetrics};
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::options::normalize::Scale;
use crate::options::record::Options;
use crate::render::sink::{
    Drawing, DrawingSink, PendingPath, Placement, hexagon_outline, line_outline,
};
use crate::render::text::TextShaper;

enum RasterOp {
    Fill { path: BezPath, color: Rgb },
    Text { origin: Point, text: String, color: Rgb, size: f32 },
}

/// Server-side raster backend producing a PNG image.
///
/// Drawing calls are recorded; rasterization and PNG compression happen in
/// [`DrawingSink::finalize`].
pub struct RasterSink {
    placement: Placement,
    background: Option<Rgb>,
    extent: Option<(f64, f64)>,
    pending: PendingPath,
    ops: Vec<RasterOp>,
    shaper: Option<TextShaper>,
    warned_no_font: bool,
}

impl RasterSink {
    /// Build a sink from normalized options (padding, `rotate`, `backgroundcolor`).
    pub fn new(opts: &Options) -> Self {
        Self {
            placement: Placement::from_options(opts),
            background: opts.str("backgroundcolor").and_then(Rgb::from_hex),
            extent: None,
            pending: PendingPath::default(),
            ops: Vec::new(),
            shaper: None,
            warned_no_font: false,
        }
    }

    /// Enable text rendering with the given font file (TTF/OTF bytes).
    pub fn with_font(mut self, font_bytes: Vec<u8>) -> BarmillResult<Self> {
        self.shaper = Some(TextShaper::new(font_bytes)?);
        Ok(self)
    }

    /// Output pixel size, known once `init` has run.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.extent.map(|(w, h)| self.placement.output_size(w, h))
    }

    fn rasterize(&mut self) -> BarmillResult<(u32, u32, Vec<u8>)> {
        let (w, h) = self
            .extent
            .ok_or_else(|| BarmillError::validation("raster sink finalized before init"))?;
        let (width, height) = self.placement.output_size(w, h);
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| BarmillError::validation("image width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| BarmillError::validation("image height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(BarmillError::validation("image has zero area"));
        }

        let transform = self.placement.transform(w, h);
        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        if let Some(bg) = self.background {
            ctx.set_paint(paint(bg));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width_u16),
                f64::from(height_u16),
            ));
        }
        for op in &self.ops {
            match op {
                RasterOp::Fill { path, color } => {
                    ctx.set_transform(affine_to_cpu(transform));
                    ctx.set_paint(paint(*color));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                RasterOp::Text {
                    origin,
                    text,
                    color,
                    size,
                } => {
                    if let Some(shaper) = self.shaper.as_mut() {
                        shaper.draw(&mut ctx, transform, *origin, text, *color, *size)?;
                    }
                }
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok((width, height, unpremultiply(pixmap.data_as_u8_slice())))
    }
}

impl Drawing for RasterSink {
    fn scale(&mut self, sx: f64, sy: f64) {
        self.placement.scale = Scale { x: sx, y: sy };
    }

    fn measure(&mut self, text: &str, font: &FontSpec) -> TextMetrics {
        match self.shaper.as_mut() {
            Some(shaper) => shaper.measure(text, font.height as f32).unwrap_or_else(|err| {
                tracing::warn!(%err, "text shaping failed, using approximate metrics");
                TextMetrics::approximate(text, font.width, font.height)
            }),
            None => TextMetrics::approximate(text, font.width, font.height),
        }
    }

    fn init(&mut self, width: f64, height: f64) {
        self.extent = Some((width, height));
    }

    fn line(&mut self, from: Point, to: Point, line_width: f64, color: Rgb) {
        self.ops.push(RasterOp::Fill {
            path: line_outline(from, to, line_width),
            color,
        });
    }

    fn polygon(&mut self, points: &[Point]) {
        self.pending.push_polygon(points);
    }

    fn hexagon(&mut self, points: &[Point; 6], color: Rgb) {
        self.ops.push(RasterOp::Fill {
            path: hexagon_outline(points),
            color,
        });
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, ccw: bool) {
        self.pending.push_ellipse(center, rx, ry, ccw);
    }

    fn fill(&mut self, color: Rgb) {
        if self.pending.is_empty() {
            return;
        }
        self.ops.push(RasterOp::Fill {
            path: self.pending.take(),
            color,
        });
    }

    fn text(&mut self, origin: Point, text: &str, color: Rgb, font: &FontSpec) {
        if self.shaper.is_none() {
            if !self.warned_no_font {
                tracing::warn!("raster sink has no font; skipping text");
                self.warned_no_font = true;
            }
            return;
        }
        self.ops.push(RasterOp::Text {
            origin,
            text: text.to_owned(),
            color,
            size: font.height as f32,
        });
    }
}

impl DrawingSink for RasterSink {
    type Artifact = Vec<u8>;

    #[tracing::instrument(skip(self), fields(ops = self.ops.len()))]
    fn finalize(&mut self) -> BarmillResult<Vec<u8>> {
        let (width, height, rgba) = self.rasterize()?;
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(&rgba, width, height, image::ExtendedColorType::Rgba8)
            .with_context(|| format!("encode {width}x{height} png"))?;
        tracing::debug!(width, height, bytes = png.len(), "png encoded");
        Ok(png)
    }
}

fn paint(c: Rgb) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
        } else if a == 255 {
            out.extend_from_slice(px);
        } else {
            let a16 = u16::from(a);
            let un = |c: u8| ((u16::from(c) * 255 + a16 / 2) / a16).min(255) as u8;
            out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
        }
    }
    out
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
