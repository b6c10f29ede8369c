use super::*;
use crate::{
    config::DEFAULT_PLACEHOLDER,
    foundation::core::Rgb8,
    render::composite::over,
};

fn renderer_with(config: RenderConfig) -> Option<CardRenderer> {
    match FontFace::system(&["Noto Sans CJK TC", "Noto Sans TC", "DejaVu Sans"]) {
        Ok(font) => Some(CardRenderer::with_font(config, font).unwrap()),
        Err(err) => {
            eprintln!("no system font available ({err}); skipping");
            None
        }
    }
}

fn renderer() -> Option<CardRenderer> {
    renderer_with(RenderConfig::default())
}

#[test]
fn new_fails_fast_when_font_is_missing() {
    let config = RenderConfig {
        font_path: "no/such/font.ttf".into(),
        ..RenderConfig::default()
    };
    let err = CardRenderer::new(config).unwrap_err();
    assert!(err.to_string().contains("font error"));
}

#[test]
fn canvas_dimensions_follow_aspect() {
    let Some(r) = renderer() else { return };
    let square = r.render(&RenderRequest::new("x", Aspect::Square)).unwrap();
    assert_eq!((square.surface.width(), square.surface.height()), (1000, 1000));
    let portrait = r.render(&RenderRequest::new("x", Aspect::Portrait)).unwrap();
    assert_eq!((portrait.surface.width(), portrait.surface.height()), (750, 1000));
}

#[test]
fn no_background_gives_fallback_base_and_darkened_band() {
    let Some(r) = renderer() else { return };
    let card = r.render(&RenderRequest::new("HEADLINE", Aspect::Square)).unwrap();
    assert_eq!(card.background, BackgroundSource::Solid);

    let fallback = Rgb8::new(0x1e, 0x3a, 0x8a).opaque_rgba();
    assert_eq!(card.surface.pixel(5, 5), Some(fallback));
    assert_eq!(card.surface.pixel(500, 100), Some(fallback));
    assert_eq!(card.surface.pixel(5, 990), Some(fallback));

    let banded = over(fallback, [0, 0, 0, 180]);
    let got = card.surface.pixel(5, 760).unwrap();
    for c in 0..3 {
        assert!(got[c].abs_diff(banded[c]) <= 2, "band pixel {got:?} vs {banded:?}");
    }
}

#[test]
fn short_caption_draws_one_white_line_inside_band() {
    let Some(r) = renderer() else { return };
    let card = r.render(&RenderRequest::new("HELLO WORLD", Aspect::Square)).unwrap();
    assert_eq!(card.block.lines, vec!["HELLO WORLD".to_string()]);

    let mut white_rows = Vec::new();
    for y in 0..card.canvas.height {
        for x in 0..card.canvas.width {
            let [r, g, b, _] = card.surface.pixel(x, y).unwrap();
            if r > 230 && g > 230 && b > 230 {
                white_rows.push(y);
                break;
            }
        }
    }
    assert!(!white_rows.is_empty(), "expected caption pixels");
    assert!(white_rows.iter().all(|&y| card.band.contains_row(y)));
}

#[test]
fn cjk_caption_renders_single_line() {
    let Some(r) = renderer() else { return };
    let card = r
        .render(&RenderRequest::new("熱門新聞標題測試", Aspect::Square))
        .unwrap();
    assert_eq!(card.block.lines.len(), 1);
    let png = card.encode(OutputFormat::Png).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1000, 1000));
}

#[test]
fn newline_caption_wraps_paragraphs_separately() {
    let Some(r) = renderer() else { return };
    let long = "y".repeat(30);
    let card = r
        .render(&RenderRequest::new(format!("{long}\nB"), Aspect::Portrait))
        .unwrap();
    assert_eq!(card.block.lines.len(), 3);
    assert_eq!(card.block.lines[2], "B");
}

#[test]
fn empty_caption_uses_placeholder() {
    let Some(r) = renderer() else { return };
    let card = r.render(&RenderRequest::new("", Aspect::Square)).unwrap();
    assert_eq!(card.block.lines, vec![DEFAULT_PLACEHOLDER.to_string()]);
}

#[test]
fn identical_inputs_give_identical_bytes() {
    let Some(r) = renderer() else { return };
    let req = RenderRequest::new("Same\n輸入", Aspect::Portrait);
    let a = r.render_encoded(&req, OutputFormat::Png).unwrap();
    let b = r.render_encoded(&req, OutputFormat::Png).unwrap();
    assert_eq!(a, b);
}

#[test]
fn preview_pair_covers_both_aspects() {
    let Some(r) = renderer() else { return };
    let (selected, other) = r
        .render_preview_pair(&RenderRequest::new("pair", Aspect::Portrait))
        .unwrap();
    assert_eq!(selected.aspect, Aspect::Portrait);
    assert_eq!(other.aspect, Aspect::Square);
    assert_eq!(other.canvas.width, 1000);
}

#[test]
fn measured_wrap_keeps_lines_within_margins() {
    let config = RenderConfig {
        wrap: WrapMode::Measured,
        ..RenderConfig::default()
    };
    let Some(r) = renderer_with(config) else { return };
    let caption = "The quick brown fox jumps over the lazy dog again and again";
    let card = r.render(&RenderRequest::new(caption, Aspect::Portrait)).unwrap();
    assert!(card.block.lines.len() >= 2);

    let mut engine = TextLayoutEngine::new(r.font(), r.config().font_size_px).unwrap();
    for line in &card.block.lines {
        if line.chars().count() > 1 {
            assert!(engine.measure(line) <= 750.0 - 80.0);
        }
    }
}

/// Bounding box `(x0, y0, x1, y1)` of near-white pixels, inclusive.
fn white_bbox(surface: &Surface) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let [r, g, b, _] = surface.pixel(x, y)?;
            if r > 200 && g > 200 && b > 200 {
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bbox
}

fn assert_centered_on_band(card: &RenderedCard, line_height: f64) {
    let (x0, y0, x1, y1) = white_bbox(&card.surface).expect("caption pixels");
    let mid_x = f64::from(x0 + x1) / 2.0;
    let mid_y = f64::from(y0 + y1) / 2.0;
    let canvas_mid = f64::from(card.canvas.width) / 2.0;
    assert!(
        (mid_x - canvas_mid).abs() <= 3.0,
        "ink center x {mid_x} vs canvas center {canvas_mid}"
    );
    assert!(
        (mid_y - card.band.center_y()).abs() <= line_height / 2.0,
        "ink center y {mid_y} vs band center {}",
        card.band.center_y()
    );
}

#[test]
fn caption_lines_are_centered_on_the_band() {
    let Some(r) = renderer() else { return };
    let line_height = f64::from(r.config().line_height_px());

    let one = r.render(&RenderRequest::new("HIH", Aspect::Square)).unwrap();
    assert_eq!(one.block.lines.len(), 1);
    assert_centered_on_band(&one, line_height);

    let two = r
        .render(&RenderRequest::new("HIH\nHIHIH", Aspect::Portrait))
        .unwrap();
    assert_eq!(two.block.lines.len(), 2);
    assert_centered_on_band(&two, line_height);
}

#[test]
fn band_covers_rows_start_through_end_inclusive() {
    let Some(r) = renderer() else { return };
    let card = r.render(&RenderRequest::new("x", Aspect::Square)).unwrap();
    let fallback = Rgb8::new(0x1e, 0x3a, 0x8a).opaque_rgba();
    let (start, end) = (card.band.start_y, card.band.end_y);
    assert_eq!((start, end), (750, 900));

    assert_eq!(card.surface.pixel(2, start - 1), Some(fallback));
    assert_eq!(card.surface.pixel(2, end + 1), Some(fallback));
    assert_ne!(card.surface.pixel(2, start), Some(fallback));
    assert_ne!(card.surface.pixel(2, end), Some(fallback));
}
