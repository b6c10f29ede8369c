use std::{fmt, path::Path, str::FromStr};

use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::{CardError, CardResult};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encoded output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Guess the format from a file extension (`.png`, `.jpg`, `.jpeg`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    /// Replace the JPEG quality; PNG is unaffected.
    pub fn with_quality(self, quality: u8) -> Self {
        match self {
            Self::Png => Self::Png,
            Self::Jpeg { .. } => Self::Jpeg { quality },
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("png"),
            Self::Jpeg { quality } => write!(f, "jpeg(q={quality})"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            other => Err(CardError::validation(format!(
                "unknown output format '{other}' (expected png or jpeg)"
            ))),
        }
    }
}

/// Encode an RGB image into `format`.
pub fn encode_rgb(img: &RgbImage, format: OutputFormat) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    let (w, h) = img.dimensions();
    match format {
        OutputFormat::Png => image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)
            .map_err(|e| CardError::encode(format!("png: {e}")))?,
        OutputFormat::Jpeg { quality } => {
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
                .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)
                .map_err(|e| CardError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
