use crate::foundation::core::{Affine, Point, Rgb, TextMetrics};
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::render::raster::affine_to_cpu;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct GlyphBrush([u8; 3]);

/// Shapes and draws human-readable text for the raster sink from raw font bytes.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextShaper {
    pub(crate) fn new(font_bytes: Vec<u8>) -> BarmillResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BarmillError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BarmillError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    fn layout(
        &mut self,
        text: &str,
        size: f32,
        color: Rgb,
    ) -> BarmillResult<parley::Layout<GlyphBrush>> {
        if !size.is_finite() || size <= 0.0 {
            return Err(BarmillError::validation(
                "font size must be finite and > 0",
            ));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush([
            color.r, color.g, color.b,
        ])));
        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    pub(crate) fn measure(&mut self, text: &str, size: f32) -> BarmillResult<TextMetrics> {
        let layout = self.layout(text, size, Rgb::BLACK)?;
        let (ascent, descent) = layout
            .lines()
            .next()
            .map(|line| (line.metrics().ascent, line.metrics().descent))
            .unwrap_or((0.0, 0.0));
        Ok(TextMetrics {
            width: f64::from(layout.width()),
            ascent: f64::from(ascent),
            descent: f64::from(descent),
        })
    }

    /// Draw `text` with its first baseline at `origin` (symbol units).
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        transform: Affine,
        origin: Point,
        text: &str,
        color: Rgb,
        size: f32,
    ) -> BarmillResult<()> {
        let layout = self.layout(text, size, color)?;
        let baseline = layout
            .lines()
            .next()
            .map_or(0.0, |line| f64::from(line.metrics().baseline));
        ctx.set_transform(affine_to_cpu(
            transform * Affine::translate((origin.x, origin.y - baseline)),
        ));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let GlyphBrush([r, g, b]) = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, 255));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}
