//! Headline cards for social posts, plus the prompt templates that go with them.
//!
//! A card is a fixed-size raster: a cover-cropped background photo (or a solid dark blue), a
//! translucent black band near the bottom, and the caption centered on that band in white.
//!
//! # Pipeline overview
//!
//! 1. **Background**: decode and cover-crop the supplied image, or fall back to a solid color.
//! 2. **Layout**: wrap the caption into lines and center the block on the [`OverlayBand`].
//! 3. **Rasterize**: draw the band and glyph runs into a transparent overlay (CPU).
//! 4. **Composite + encode**: source-over the overlay onto the background, write PNG or JPEG.
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical caption, aspect, background and font bytes give identical output.
//! - **Font is mandatory**: [`CardRenderer::new`] fails if the caption font cannot be loaded.
//!
//! The [`prompt`] module covers the second dashboard page: style presets, a template library,
//! and `{{variable}}` substitution for prompts pasted into a chat model.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod layout;
pub mod prompt;
pub mod render;
pub mod session;

pub use assets::decode::{BackgroundSource, cover_crop, decode_rgb, resolve_background};
pub use assets::font::{FontFace, FontOrigin};
pub use config::{DEFAULT_PLACEHOLDER, FONT_ENV_VAR, RenderConfig, WrapMode};
pub use foundation::core::{Aspect, Canvas, Rgb8, sha256_hex};
pub use foundation::error::{CardError, CardResult};
pub use layout::band::OverlayBand;
pub use layout::text_block::TextBlock;
pub use layout::wrap::{char_budget, wrap_by_chars, wrap_measured};
pub use prompt::builder::{PromptRequest, build_prompt, generate_prompt};
pub use prompt::styles::{StylePreset, find_style, style_prefix, style_presets};
pub use prompt::template::{Template, TemplateLibrary, extract_variables, fill_template};
pub use render::encode::{DEFAULT_JPEG_QUALITY, OutputFormat, encode_rgb};
pub use render::pipeline::{CardRenderer, RenderRequest, RenderedCard};
pub use render::surface::Surface;
pub use session::dashboard::{
    DashboardState, PromptPageState, SELECT_SENTINEL, suggested_file_name,
};
pub use session::headline::{Headline, UNTITLED, merge_latest};
