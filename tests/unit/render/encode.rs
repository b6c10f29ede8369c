use std::path::PathBuf;

use image::Rgb;

use super::*;

#[test]
fn format_parses_names_and_extensions() {
    assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    assert_eq!(
        "jpg".parse::<OutputFormat>().unwrap(),
        OutputFormat::Jpeg { quality: 95 }
    );
    assert!("gif".parse::<OutputFormat>().is_err());

    assert_eq!(
        OutputFormat::from_path(&PathBuf::from("out/card.jpeg")),
        Some(OutputFormat::Jpeg { quality: 95 })
    );
    assert_eq!(OutputFormat::from_path(&PathBuf::from("card")), None);
    assert_eq!(OutputFormat::Png.with_quality(10), OutputFormat::Png);
}

#[test]
fn png_is_lossless() {
    let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8 * 60, y as u8 * 80, 7]));
    let bytes = encode_rgb(&img, OutputFormat::Png).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    let back = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(back, img);
}

#[test]
fn jpeg_keeps_dimensions() {
    let img = RgbImage::from_pixel(16, 8, Rgb([30, 58, 138]));
    let bytes = encode_rgb(&img, OutputFormat::Jpeg { quality: 95 }).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let back = image::load_from_memory(&bytes).unwrap();
    assert_eq!((back.width(), back.height()), (16, 8));
}
