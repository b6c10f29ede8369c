use crate::layout::band::OverlayBand;

/// Wrapped caption lines positioned on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub line_height: f64,
    /// Y coordinate of the first line's top edge. May be negative for very long captions.
    pub top: f64,
}

impl TextBlock {
    /// Center `lines` vertically on the band's midpoint.
    pub fn centered_in(band: OverlayBand, lines: Vec<String>, line_height: f64) -> Self {
        let total = lines.len() as f64 * line_height;
        Self {
            top: band.center_y() - total / 2.0,
            lines,
            line_height,
        }
    }

    pub fn total_height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    /// Top edge of line `i`.
    pub fn row_top(&self, i: usize) -> f64 {
        self.top + i as f64 * self.line_height
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (self.row_top(i), l.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
