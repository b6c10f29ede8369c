use anyhow::Context;
use image::{RgbImage, imageops::FilterType};

use crate::{
    CardError, CardResult,
    foundation::core::{Canvas, Rgb8},
    render::surface::Surface,
};

/// Where a card's base layer came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundSource {
    /// The supplied image, cover-cropped to the canvas.
    Image,
    /// Solid fallback color (nothing supplied, or it failed to decode).
    Solid,
}

/// Decode encoded image bytes (PNG, JPEG, ...) into opaque RGB.
///
/// Any alpha channel is discarded, not blended.
pub fn decode_rgb(bytes: &[u8]) -> CardResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgb = dyn_img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(CardError::decode("image has zero width or height"));
    }
    Ok(rgb)
}

/// Scale `src` to cover `canvas` without distortion, then crop the overflow symmetrically.
///
/// A source relatively wider than the canvas is scaled to the canvas height and trimmed left and
/// right; otherwise it is scaled to the canvas width and trimmed top and bottom. The crop window
/// is mapped back into source pixels first and only that region is resampled, so the work is
/// bounded by the canvas size whatever the source aspect.
pub fn cover_crop(src: &RgbImage, canvas: Canvas) -> RgbImage {
    let (iw, ih) = src.dimensions();
    let (cw, ch) = (canvas.width, canvas.height);
    let (sx, sy, sw, sh) = source_window(iw, ih, cw, ch);

    let window = image::imageops::crop_imm(src, sx, sy, sw, sh).to_image();
    if (sw, sh) == (cw, ch) {
        return window;
    }
    image::imageops::resize(&window, cw, ch, FilterType::Lanczos3)
}

/// Crop window `(x, y, w, h)` in source pixels that covers a `cw x ch` canvas.
///
/// Offsets follow the scaled-image crop: `floor((scaled - target) / 2)` mapped back by the scale
/// factor and rounded down.
fn source_window(iw: u32, ih: u32, cw: u32, ch: u32) -> (u32, u32, u32, u32) {
    let (iwf, ihf, cwf, chf) = (f64::from(iw), f64::from(ih), f64::from(cw), f64::from(ch));
    if iwf / ihf > cwf / chf {
        let scale = chf / ihf;
        let scaled_w = (iwf * scale).floor().max(cwf);
        let left = ((scaled_w - cwf) / 2.0).floor();
        let sw = ((cwf / scale).round() as u32).clamp(1, iw);
        let sx = ((left / scale).floor() as u32).min(iw - sw);
        (sx, 0, sw, ih)
    } else {
        let scale = cwf / iwf;
        let scaled_h = (ihf * scale).floor().max(chf);
        let top = ((scaled_h - chf) / 2.0).floor();
        let sh = ((chf / scale).round() as u32).clamp(1, ih);
        let sy = ((top / scale).floor() as u32).min(ih - sh);
        (0, sy, iw, sh)
    }
}

/// Build the card's base layer.
///
/// Decode failures are logged and replaced by the solid `fallback`; they never fail the render.
#[tracing::instrument(skip(bytes), fields(bytes_len = bytes.map_or(0, <[u8]>::len)))]
pub fn resolve_background(
    bytes: Option<&[u8]>,
    canvas: Canvas,
    fallback: Rgb8,
) -> (Surface, BackgroundSource) {
    let Some(bytes) = bytes else {
        return (Surface::solid(canvas, fallback), BackgroundSource::Solid);
    };

    match decode_rgb(bytes) {
        Ok(rgb) => {
            let cropped = cover_crop(&rgb, canvas);
            (Surface::from_rgb(&cropped), BackgroundSource::Image)
        }
        Err(err) => {
            tracing::warn!(error = %err, "background image unusable, using solid fallback");
            (Surface::solid(canvas, fallback), BackgroundSource::Solid)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
