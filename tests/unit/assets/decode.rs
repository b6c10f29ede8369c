use std::io::Cursor;

use image::Rgb;

use super::*;
use crate::foundation::core::Aspect;

fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

const FALLBACK: Rgb8 = Rgb8::new(0x1e, 0x3a, 0x8a);

#[test]
fn decode_rgb_drops_alpha() {
    let rgba = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let rgb = decode_rgb(&buf).unwrap();
    assert_eq!(rgb.dimensions(), (1, 1));
    assert_eq!(rgb.get_pixel(0, 0).0, [100, 50, 200]);
}

#[test]
fn decode_rgb_rejects_garbage() {
    assert!(decode_rgb(b"definitely not an image").is_err());
}

#[test]
fn wide_source_is_cropped_left_and_right() {
    // Left third red, middle third green, right third blue; 300x100 onto a 750x1000 canvas.
    let src = RgbImage::from_fn(300, 100, |x, _| match x / 100 {
        0 => Rgb([255, 0, 0]),
        1 => Rgb([0, 255, 0]),
        _ => Rgb([0, 0, 255]),
    });
    let out = cover_crop(&src, Aspect::Portrait.canvas());
    assert_eq!(out.dimensions(), (750, 1000));
    // Scaled to 3000x1000, cropped to the central 750 columns: all green.
    assert_eq!(out.get_pixel(0, 500).0, [0, 255, 0]);
    assert_eq!(out.get_pixel(749, 500).0, [0, 255, 0]);
}

#[test]
fn tall_source_is_cropped_top_and_bottom() {
    let src = RgbImage::from_fn(100, 400, |_, y| {
        if y < 100 || y >= 300 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let out = cover_crop(&src, Aspect::Square.canvas());
    assert_eq!(out.dimensions(), (1000, 1000));
    // Scaled to 1000x4000, central band 1500..2500 lies inside the black region.
    assert_eq!(out.get_pixel(500, 0).0, [0, 0, 0]);
    assert_eq!(out.get_pixel(500, 999).0, [0, 0, 0]);
}

#[test]
fn matching_ratio_only_scales() {
    let src = RgbImage::from_pixel(10, 10, Rgb([7, 8, 9]));
    let out = cover_crop(&src, Aspect::Square.canvas());
    assert_eq!(out.dimensions(), (1000, 1000));
    assert_eq!(out.get_pixel(999, 999).0, [7, 8, 9]);
}

#[test]
fn missing_background_uses_fallback() {
    let canvas = Aspect::Square.canvas();
    let (surface, source) = resolve_background(None, canvas, FALLBACK);
    assert_eq!(source, BackgroundSource::Solid);
    assert_eq!(surface.canvas(), canvas);
    assert_eq!(surface.pixel(0, 0), Some([0x1e, 0x3a, 0x8a, 255]));
}

#[test]
fn undecodable_background_uses_fallback() {
    let canvas = Aspect::Portrait.canvas();
    let (surface, source) = resolve_background(Some(b"\x89PNG broken"), canvas, FALLBACK);
    assert_eq!(source, BackgroundSource::Solid);
    assert_eq!(surface.pixel(374, 10), Some([0x1e, 0x3a, 0x8a, 255]));
}

#[test]
fn decodable_background_is_used() {
    let canvas = Aspect::Square.canvas();
    let png = encode_png(&RgbImage::from_pixel(20, 20, Rgb([200, 10, 10])));
    let (surface, source) = resolve_background(Some(&png), canvas, FALLBACK);
    assert_eq!(source, BackgroundSource::Image);
    assert_eq!(surface.pixel(500, 500), Some([200, 10, 10, 255]));
}

#[test]
fn very_thin_source_resamples_only_the_window() {
    // Top half red, bottom half blue; the covering window is the single middle row.
    let src = RgbImage::from_fn(1, 20_000, |_, y| {
        if y < 10_000 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    let started = std::time::Instant::now();
    let out = cover_crop(&src, Aspect::Square.canvas());
    assert_eq!(out.dimensions(), (1000, 1000));
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
    assert_eq!(out.get_pixel(999, 999).0, [255, 0, 0]);
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

#[test]
fn window_stays_inside_source() {
    assert_eq!(source_window(300, 100, 750, 1000), (112, 0, 75, 100));
    assert_eq!(source_window(100, 400, 1000, 1000), (0, 150, 100, 100));
    assert_eq!(source_window(10_000, 1, 1000, 1000), (4999, 0, 1, 1));
    assert_eq!(source_window(10, 10, 1000, 1000), (0, 0, 10, 10));
}
