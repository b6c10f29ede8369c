use crate::{
    CardError, CardResult,
    assets::font::FontFace,
    foundation::core::{Canvas, Rgb8},
    layout::{band::OverlayBand, text_block::TextBlock},
    render::{
        surface::Surface,
        text::{TextBrushRgba8, TextLayoutEngine},
    },
};

/// Everything drawn above the background: the translucent band and the caption lines.
pub struct OverlayPass<'a> {
    pub canvas: Canvas,
    pub band: OverlayBand,
    pub band_alpha: u8,
    pub block: &'a TextBlock,
    pub text_rgb: Rgb8,
}

/// Rasterize the overlay into a fresh transparent surface (premultiplied RGBA8).
pub fn rasterize_overlay(
    pass: &OverlayPass<'_>,
    engine: &mut TextLayoutEngine,
    font: &FontFace,
) -> CardResult<Surface> {
    let width: u16 = pass
        .canvas
        .width
        .try_into()
        .map_err(|_| CardError::validation("canvas width exceeds u16"))?;
    let height: u16 = pass
        .canvas
        .height
        .try_into()
        .map_err(|_| CardError::validation("canvas height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);

    ctx.set_transform(kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, pass.band_alpha));
    ctx.fill_rect(&pass.band.rect());

    let brush = TextBrushRgba8 {
        r: pass.text_rgb.r,
        g: pass.text_rgb.g,
        b: pass.text_rgb.b,
        a: 255,
    };
    let font_data = font.font_data();

    for (top, text) in pass.block.rows() {
        let layout = engine.layout_line(text, brush);
        let left = (f64::from(pass.canvas.width) - f64::from(layout.width())) / 2.0;
        ctx.set_transform(kurbo::Affine::translate((left, top)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry the line baseline, so `top` is the line box top.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    Surface::from_premul_rgba(
        pass.canvas.width,
        pass.canvas.height,
        pixmap.data_as_u8_slice().to_vec(),
    )
}
