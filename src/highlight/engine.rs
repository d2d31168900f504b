use std::ops::Range;

use crate::{
    highlight::geometry::SurfaceSize,
    text::{FontHandle, LINE_TERMINATORS},
};

/// Measures the bounding size of a piece of text.
///
/// Must agree with the metrics the rendering surface uses when it draws the
/// same text.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &FontHandle, max_width: f32, max_height: f32)
    -> SurfaceSize;
}

/// Splits text into visual lines the way the rendering surface wraps it.
pub trait LineLayout {
    /// Byte ranges of each visual line at `width`, in order.
    ///
    /// `None` means no layout could be produced, for example because the
    /// font cannot be loaded.
    fn visual_lines(&self, text: &str, font: &FontHandle, width: f32)
    -> Option<Vec<Range<usize>>>;

    /// Whether `ch` terminates a line in this layout model.
    fn is_line_break(&self, ch: char) -> bool {
        LINE_TERMINATORS.contains(&ch)
    }
}
