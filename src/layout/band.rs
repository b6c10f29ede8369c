use crate::foundation::core::Canvas;

/// Translucent strip near the bottom of the card that the caption sits on.
///
/// Rows `start_y..=end_y` are covered across the full canvas width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OverlayBand {
    pub start_y: u32,
    pub end_y: u32,
    pub width: u32,
}

impl OverlayBand {
    /// Place the band `gap_ratio` above the bottom edge, `height_ratio` tall.
    pub fn for_canvas(canvas: Canvas, gap_ratio: f64, height_ratio: f64) -> Self {
        let h = f64::from(canvas.height);
        let end_y = floor_px(h * (1.0 - gap_ratio)).min(canvas.height.saturating_sub(1));
        let start_y = floor_px(h * (1.0 - gap_ratio - height_ratio)).min(end_y);
        Self {
            start_y,
            end_y,
            width: canvas.width,
        }
    }

    pub fn center_y(self) -> f64 {
        (f64::from(self.start_y) + f64::from(self.end_y)) / 2.0
    }

    /// Covered area as a half-open rectangle in canvas pixels.
    pub fn rect(self) -> kurbo::Rect {
        kurbo::Rect::new(
            0.0,
            f64::from(self.start_y),
            f64::from(self.width),
            f64::from(self.end_y) + 1.0,
        )
    }

    pub fn contains_row(self, y: u32) -> bool {
        self.start_y <= y && y <= self.end_y
    }
}

// Ratios like 0.9 are not exact in binary; nudge before truncating so 1000 * 0.9 lands on 900.
fn floor_px(v: f64) -> u32 {
    (v + 1e-9).floor().max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/layout/band.rs"]
mod tests;
