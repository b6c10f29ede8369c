/// Canvases at least this wide get the longer per-line character budget.
pub const WIDE_CANVAS_MIN_WIDTH: u32 = 1000;

/// Per-line character budget for a canvas of the given width.
pub fn char_budget(canvas_width: u32) -> usize {
    if canvas_width < WIDE_CANVAS_MIN_WIDTH {
        24
    } else {
        36
    }
}

/// Split `caption` into display lines by character count.
///
/// Each `\n`-separated paragraph is wrapped on its own: characters accumulate until `budget`
/// is reached, then a new line starts. Lines that are blank after trimming are dropped and the
/// rest are returned trimmed. Glyph widths are not considered.
pub fn wrap_by_chars(caption: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut raw = Vec::new();

    for paragraph in caption.split('\n') {
        let mut current = String::new();
        let mut count = 0usize;
        for ch in paragraph.chars() {
            if count == budget {
                raw.push(std::mem::take(&mut current));
                count = 0;
            }
            current.push(ch);
            count += 1;
        }
        if !current.is_empty() {
            raw.push(current);
        }
    }

    finish(raw)
}

/// Split `caption` into display lines so each fits within `max_width`.
///
/// Paragraph handling matches [`wrap_by_chars`]; within a paragraph a character moves to a new
/// line when appending it would make `measure` exceed `max_width`. A single character wider than
/// the limit still gets a line of its own.
pub fn wrap_measured(
    caption: &str,
    max_width: f32,
    mut measure: impl FnMut(&str) -> f32,
) -> Vec<String> {
    let mut raw = Vec::new();

    for paragraph in caption.split('\n') {
        let mut current = String::new();
        for ch in paragraph.chars() {
            let mut candidate = current.clone();
            candidate.push(ch);
            if !current.is_empty() && measure(&candidate) > max_width {
                raw.push(std::mem::take(&mut current));
                current.push(ch);
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            raw.push(current);
        }
    }

    finish(raw)
}

fn finish(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
