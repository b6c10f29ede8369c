use crate::{
    CardResult,
    assets::{
        decode::{BackgroundSource, resolve_background},
        font::FontFace,
    },
    config::{RenderConfig, WrapMode},
    foundation::core::{Aspect, Canvas},
    layout::{
        band::OverlayBand,
        text_block::TextBlock,
        wrap::{char_budget, wrap_by_chars, wrap_measured},
    },
    render::{
        composite::over_in_place,
        cpu::{OverlayPass, rasterize_overlay},
        encode::{OutputFormat, encode_rgb},
        surface::Surface,
        text::TextLayoutEngine,
    },
};

/// One card to draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// Caption text; may contain `\n`. Empty means "use the placeholder".
    pub caption: String,
    pub aspect: Aspect,
    /// Encoded background image (PNG/JPEG). Undecodable bytes fall back to the solid color.
    pub background: Option<Vec<u8>>,
}

impl RenderRequest {
    pub fn new(caption: impl Into<String>, aspect: Aspect) -> Self {
        Self {
            caption: caption.into(),
            aspect,
            background: None,
        }
    }

    pub fn with_background(mut self, bytes: Vec<u8>) -> Self {
        self.background = Some(bytes);
        self
    }

    /// Same caption and background, other aspect.
    pub fn with_aspect(&self, aspect: Aspect) -> Self {
        Self {
            aspect,
            ..self.clone()
        }
    }
}

/// A rendered card before encoding.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    pub aspect: Aspect,
    pub canvas: Canvas,
    pub surface: Surface,
    pub band: OverlayBand,
    pub block: TextBlock,
    pub background: BackgroundSource,
}

impl RenderedCard {
    pub fn to_rgb_image(&self) -> image::RgbImage {
        self.surface.to_rgb_image()
    }

    pub fn encode(&self, format: OutputFormat) -> CardResult<Vec<u8>> {
        encode_rgb(&self.to_rgb_image(), format)
    }
}

/// Draws headline cards with one validated config and one loaded font.
///
/// Holds no per-render state, so a single renderer can be shared across threads.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    config: RenderConfig,
    font: FontFace,
}

impl CardRenderer {
    /// Validate `config` and load the font at `config.font_path`.
    ///
    /// A missing font is an error here, before any card is drawn.
    pub fn new(config: RenderConfig) -> CardResult<Self> {
        config.validate()?;
        let font = FontFace::load(&config.font_path)?;
        tracing::debug!(
            family = font.family(),
            path = %config.font_path.display(),
            sha256 = %font.sha256_hex(),
            "loaded caption font"
        );
        Ok(Self { config, font })
    }

    /// Use an already loaded font; `config.font_path` is ignored.
    pub fn with_font(config: RenderConfig, font: FontFace) -> CardResult<Self> {
        config.validate()?;
        Ok(Self { config, font })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    #[tracing::instrument(skip(self, request), fields(aspect = %request.aspect))]
    pub fn render(&self, request: &RenderRequest) -> CardResult<RenderedCard> {
        let canvas = request.aspect.canvas();
        let cfg = &self.config;

        let (mut surface, background) =
            resolve_background(request.background.as_deref(), canvas, cfg.fallback_rgb);

        let band = OverlayBand::for_canvas(canvas, cfg.band_gap_ratio, cfg.band_height_ratio);
        let mut engine = TextLayoutEngine::new(&self.font, cfg.font_size_px)?;

        let caption = cfg.caption_or_placeholder(&request.caption);
        let lines = match cfg.wrap {
            WrapMode::Chars => wrap_by_chars(caption, char_budget(canvas.width)),
            WrapMode::Measured => {
                let max_width = f64::from(canvas.width) - 2.0 * f64::from(cfg.measured_margin_px);
                wrap_measured(caption, max_width.max(1.0) as f32, |s| engine.measure(s))
            }
        };
        let block = TextBlock::centered_in(band, lines, f64::from(cfg.line_height_px()));
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            lines = block.lines.len(),
            ?background,
            "laid out card"
        );

        let overlay = rasterize_overlay(
            &OverlayPass {
                canvas,
                band,
                band_alpha: cfg.band_alpha,
                block: &block,
                text_rgb: cfg.text_rgb,
            },
            &mut engine,
            &self.font,
        )?;
        over_in_place(&mut surface, &overlay)?;

        Ok(RenderedCard {
            aspect: request.aspect,
            canvas,
            surface,
            band,
            block,
            background,
        })
    }

    /// Render and encode in one step.
    pub fn render_encoded(
        &self,
        request: &RenderRequest,
        format: OutputFormat,
    ) -> CardResult<Vec<u8>> {
        self.render(request)?.encode(format)
    }

    /// Render the requested aspect and the other one, for side-by-side previews.
    ///
    /// Returns `(selected, other)`.
    pub fn render_preview_pair(
        &self,
        request: &RenderRequest,
    ) -> CardResult<(RenderedCard, RenderedCard)> {
        let other = request.with_aspect(request.aspect.other());
        let (a, b) = rayon::join(|| self.render(request), || self.render(&other));
        Ok((a?, b?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
