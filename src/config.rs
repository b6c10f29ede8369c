use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::foundation::{
    core::Rgb8,
    error::{CardError, CardResult},
};

/// Environment variable that replaces [`RenderConfig::font_path`].
pub const FONT_ENV_VAR: &str = "HEADLINE_CARD_FONT";

/// Caption shown when the user has not typed anything yet.
pub const DEFAULT_PLACEHOLDER: &str = "請輸入文章標題以跟風熱點...";

/// How captions are split into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Fixed character budget per line (36 on wide canvases, 24 otherwise).
    #[default]
    Chars,
    /// Greedy per-character wrap against the rendered glyph width.
    Measured,
}

/// Tunable parameters of the card renderer.
///
/// Every field has a default so a config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub font_path: PathBuf,
    pub font_size_px: f32,
    pub line_height_factor: f32,
    /// Gap between the band's lower edge and the canvas bottom, as a fraction of height.
    pub band_gap_ratio: f64,
    pub band_height_ratio: f64,
    pub band_alpha: u8,
    pub fallback_rgb: Rgb8,
    pub text_rgb: Rgb8,
    pub placeholder: String,
    pub wrap: WrapMode,
    /// Horizontal margin on each side for [`WrapMode::Measured`].
    pub measured_margin_px: f32,
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(".devcontainer/NotoSansTC-Bold.ttf"),
            font_size_px: 40.0,
            line_height_factor: 1.3,
            band_gap_ratio: 0.10,
            band_height_ratio: 0.15,
            band_alpha: 180,
            fallback_rgb: Rgb8::new(0x1e, 0x3a, 0x8a),
            text_rgb: Rgb8::new(0xff, 0xff, 0xff),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            wrap: WrapMode::Chars,
            measured_margin_px: 40.0,
            jpeg_quality: 95,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CardError::config(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::config(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply [`FONT_ENV_VAR`] if it is set and non-empty.
    pub fn apply_env(mut self) -> Self {
        if let Some(p) = std::env::var_os(FONT_ENV_VAR).filter(|v| !v.is_empty()) {
            self.font_path = PathBuf::from(p);
        }
        self
    }

    pub fn validate(&self) -> CardResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(CardError::config("font_size_px must be finite and > 0"));
        }
        if !self.line_height_factor.is_finite() || self.line_height_factor <= 0.0 {
            return Err(CardError::config("line_height_factor must be finite and > 0"));
        }
        let ratio_ok = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !ratio_ok(self.band_gap_ratio) || !ratio_ok(self.band_height_ratio) {
            return Err(CardError::config("band ratios must be within [0, 1]"));
        }
        if self.band_gap_ratio + self.band_height_ratio > 1.0 {
            return Err(CardError::config(
                "band_gap_ratio + band_height_ratio must be <= 1",
            ));
        }
        if !self.measured_margin_px.is_finite() || self.measured_margin_px < 0.0 {
            return Err(CardError::config("measured_margin_px must be finite and >= 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(CardError::config("jpeg_quality must be within 1..=100"));
        }
        Ok(())
    }

    pub fn line_height_px(&self) -> f32 {
        self.font_size_px * self.line_height_factor
    }

    /// The caption to draw: the user's text, or the placeholder when it is empty.
    pub fn caption_or_placeholder<'a>(&'a self, caption: &'a str) -> &'a str {
        if caption.is_empty() {
            &self.placeholder
        } else {
            caption
        }
    }
}
