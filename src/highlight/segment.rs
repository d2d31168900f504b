use std::ops::Range;

use crate::{highlight::engine::LineLayout, text::FontHandle};

/// One wrapped display line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualLine {
    /// Position among all lines of the pass, trailing empty line included.
    pub index: usize,
    /// Line content without its terminating line break.
    pub text: String,
    /// Raw byte range in the source text, line break included.
    pub range: Range<usize>,
}

/// Splits `text` into the visual lines `layouter` produces at `width`.
///
/// Layout engines do not emit a row for the empty line that follows a
/// trailing line break, so one empty [`VisualLine`] is appended when the last
/// row ends with a break. Missing fonts, empty text and unusable layout
/// results all yield no lines.
pub fn segment_lines<L: LineLayout + ?Sized>(
    layouter: &L,
    text: &str,
    font: Option<&FontHandle>,
    width: f32,
) -> Vec<VisualLine> {
    let Some(font) = font else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }

    let Some(ranges) = layouter.visual_lines(text, font, width) else {
        log::warn!("Line layout unavailable (font id: {:?}).", font.font_id);
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(ranges.len() + 1);
    for (index, range) in ranges.into_iter().enumerate() {
        let Some(raw) = text.get(range.clone()) else {
            log::warn!(
                "Line layout returned range {:?} outside of a {} byte text.",
                range,
                text.len()
            );
            return Vec::new();
        };

        lines.push(VisualLine {
            index,
            text: raw
                .trim_end_matches(|ch: char| layouter.is_line_break(ch))
                .to_string(),
            range,
        });
    }

    let trailing_break = lines
        .last()
        .map(|line| line.text.len() != line.range.len())
        .unwrap_or(false);
    if trailing_break {
        let end = lines.last().map(|line| line.range.end).unwrap_or(text.len());
        lines.push(VisualLine {
            index: lines.len(),
            text: String::new(),
            range: end..end,
        });
    }

    lines
}
