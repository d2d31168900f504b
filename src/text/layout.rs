use std::{collections::HashSet, ops::Range};

use fxhash::FxBuildHasher;

use crate::{font_storage::FontStorage, glyph_id::GlyphId, text::FontHandle};

/// Characters that end a line by default: LF, VT, FF, CR, NEL, LS and PS.
pub const LINE_TERMINATORS: [char; 7] = [
    '\n', '\u{0B}', '\u{0C}', '\r', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Configuration knobs used by the text layout pipeline.
///
/// All parameters are honored during a single [`TextLayout::layout`] call so
/// the caller can measure or segment text inside arbitrary rectangles.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayoutConfig {
    pub max_width: Option<f32>,
    /// Lines whose bottom edge would fall below this value are dropped.
    pub max_height: Option<f32>,
    pub line_height_scale: f32,
    pub wrap_style: WrapStyle,
    pub wrap_hard_break: bool,
    pub word_separators: HashSet<char, FxBuildHasher>,
    pub linebreak_char: HashSet<char, FxBuildHasher>,
}

impl Default for TextLayoutConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            line_height_scale: 1.0,
            wrap_style: WrapStyle::WordWrap,
            wrap_hard_break: true,
            word_separators: [' ', '\t'].into_iter().collect(),
            linebreak_char: LINE_TERMINATORS.into_iter().collect(),
        }
    }
}

impl TextLayoutConfig {
    /// Returns a copy of this configuration bounded by the given box.
    pub fn with_max_size(&self, max_width: Option<f32>, max_height: Option<f32>) -> Self {
        Self {
            max_width,
            max_height,
            ..self.clone()
        }
    }

    /// Whether `ch` terminates a line under this configuration.
    pub fn is_line_break(&self, ch: char) -> bool {
        self.linebreak_char.contains(&ch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Wrapping rules that define where line breaks may occur.
pub enum WrapStyle {
    NoWrap,
    WordWrap,
    CharWrap,
}

/// Vertical metrics shared by every line of a single-font layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineBox {
    pub ascent: f32,
    /// Negative below the baseline, as reported by `fontdue`.
    pub descent: f32,
    pub line_gap: f32,
}

impl LineBox {
    /// Height of one line after applying the configured scale.
    pub fn height(&self, line_height_scale: f32) -> f32 {
        ((self.ascent - self.descent + self.line_gap) * line_height_scale).max(0.0)
    }
}

impl From<fontdue::LineMetrics> for LineBox {
    fn from(metrics: fontdue::LineMetrics) -> Self {
        Self {
            ascent: metrics.ascent,
            descent: metrics.descent,
            line_gap: metrics.line_gap,
        }
    }
}

/// Final layout output produced by [`TextLayout::layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub config: TextLayoutConfig,
    pub font: FontHandle,
    pub line_box: LineBox,
    pub total_height: f32,
    pub total_width: f32,
    pub lines: Vec<TextLayoutLine>,
}

/// A single visual row of the final layout.
///
/// `range` is the byte range of the source text consumed by this row,
/// including hanging separators and the terminating line break. Ranges of
/// consecutive rows are contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayoutLine {
    pub range: Range<usize>,
    pub line_height: f32,
    /// Pen position after the last non-whitespace glyph.
    pub line_width: f32,
    pub top: f32,
    pub bottom: f32,
    pub glyphs: Vec<GlyphPosition>,
}

/// **Y-axis goes down**
///
/// `x`/`y` is the top-left corner of the glyph bitmap in layout coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPosition {
    pub glyph_id: GlyphId,
    pub x: f32,
    pub y: f32,
}

/// Horizontal metrics of one source character, ready for line breaking.
///
/// Fragments are produced from a real font by [`GlyphFragment::collect`], but
/// the line breaker only looks at these numbers, so callers may also build
/// them by hand.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphFragment {
    pub ch: char,
    /// Byte range of `ch` in the source text.
    pub range: Range<usize>,
    pub glyph_idx: u16,
    pub advance: f32,
    /// Kerning against the preceding character. Ignored at the start of a line.
    pub kern: f32,
    /// Offset from the pen position on the baseline to the bitmap top-left.
    pub bearing: [f32; 2],
}

impl GlyphFragment {
    /// Converts every character of `text` into a fragment using `font`.
    pub fn collect(text: &str, font: &fontdue::Font, font_size: f32) -> Vec<GlyphFragment> {
        let mut fragments = Vec::with_capacity(text.len());
        let mut prev_glyph: Option<u16> = None;

        for (offset, ch) in text.char_indices() {
            let glyph_idx = font.lookup_glyph_index(ch);
            let metrics = font.metrics_indexed(glyph_idx, font_size);
            let kern = prev_glyph
                .and_then(|prev| font.horizontal_kern_indexed(prev, glyph_idx, font_size))
                .unwrap_or(0.0);

            fragments.push(GlyphFragment {
                ch,
                range: offset..offset + ch.len_utf8(),
                glyph_idx,
                advance: metrics.advance_width,
                kern,
                bearing: [
                    metrics.xmin as f32,
                    -(metrics.ymin as f32 + metrics.height as f32),
                ],
            });
            prev_glyph = Some(glyph_idx);
        }

        fragments
    }
}

impl TextLayout {
    /// Lays out `text` with a single font.
    ///
    /// The work is split in two stages: characters are turned into glyph
    /// fragments using the font, then [`Self::from_fragments`] packs the
    /// fragments into lines. A face that cannot be loaded yields an empty
    /// layout.
    pub fn layout(
        text: &str,
        font: &FontHandle,
        config: &TextLayoutConfig,
        font_storage: &mut FontStorage,
    ) -> TextLayout {
        let Some(face) = font_storage.font(font.font_id) else {
            log::warn!("Layout requested for unknown font (id: {:?}).", font.font_id);
            return Self::from_fragments(&[], LineBox::default(), *font, config);
        };
        let Some(line_metrics) = face.horizontal_line_metrics(font.font_size) else {
            log::warn!(
                "Font (id: {:?}) has no horizontal line metrics.",
                font.font_id
            );
            return Self::from_fragments(&[], LineBox::default(), *font, config);
        };

        let fragments = GlyphFragment::collect(text, &face, font.font_size);
        Self::from_fragments(&fragments, line_metrics.into(), *font, config)
    }

    /// Computes the `[width, height]` that [`Self::layout`] would occupy.
    pub fn measure(
        text: &str,
        font: &FontHandle,
        config: &TextLayoutConfig,
        font_storage: &mut FontStorage,
    ) -> [f32; 2] {
        Self::layout(text, font, config, font_storage).size()
    }

    /// Bounding size of the layout as `[width, height]`.
    ///
    /// Text without any line still occupies one empty line box, the same way
    /// a caret on an empty line does.
    pub fn size(&self) -> [f32; 2] {
        if self.lines.is_empty() {
            return [0.0, self.line_box.height(self.config.line_height_scale)];
        }
        [self.total_width, self.total_height]
    }

    /// Packs pre-measured fragments into lines.
    ///
    /// Rules:
    /// - a line break character ends the current line and belongs to it;
    ///   `"\r\n"` counts as one break;
    /// - separators hang at the end of a line and never force a wrap;
    /// - a word that does not fit starts a new line, and a word wider than
    ///   the limit is split per character when `wrap_hard_break` is set;
    /// - no empty line is added after a trailing line break.
    pub fn from_fragments(
        fragments: &[GlyphFragment],
        line_box: LineBox,
        font: FontHandle,
        config: &TextLayoutConfig,
    ) -> TextLayout {
        let limit = if matches!(config.wrap_style, WrapStyle::NoWrap) {
            None
        } else {
            config.max_width
        };
        let start = fragments.first().map(|f| f.range.start).unwrap_or(0);
        let mut breaker = layout_utl::LineBreaker::new(start, limit, config.wrap_hard_break);
        let mut word_start: Option<usize> = None;

        for (i, fragment) in fragments.iter().enumerate() {
            let is_break = config.is_line_break(fragment.ch);
            let is_separator = config.word_separators.contains(&fragment.ch);

            if (is_break || is_separator)
                && let Some(s) = word_start.take()
            {
                breaker.push_word(&fragments[s..i]);
            }

            if is_break {
                let crlf = fragment.ch == '\r'
                    && fragments.get(i + 1).is_some_and(|next| next.ch == '\n');
                if crlf {
                    breaker.consume(fragment);
                } else {
                    breaker.push_line_break(fragment);
                }
                continue;
            }

            if is_separator {
                breaker.push_separator(fragment);
                continue;
            }

            if matches!(config.wrap_style, WrapStyle::CharWrap) {
                breaker.push_word(std::slice::from_ref(fragment));
                continue;
            }

            word_start.get_or_insert(i);
        }

        if let Some(s) = word_start.take() {
            breaker.push_word(&fragments[s..]);
        }

        let line_height = line_box.height(config.line_height_scale);
        let mut cursor_y = 0.0;
        let mut max_line_width: f32 = 0.0;
        let mut lines = Vec::new();

        for line in breaker.finish() {
            let top = cursor_y;
            let bottom = top + line_height;
            // The first line is kept even when it alone exceeds the limit.
            if let Some(max_height) = config.max_height
                && bottom > max_height
                && !lines.is_empty()
            {
                break;
            }

            // Glyph offsets are stored relative to the baseline; shifting by
            // the baseline moves them into layout coordinates.
            let baseline = top + line_box.ascent;
            let glyphs = line
                .glyphs
                .iter()
                .map(|glyph| GlyphPosition {
                    glyph_id: font.glyph_id(glyph.glyph_idx),
                    x: glyph.x,
                    y: baseline + glyph.y_offset,
                })
                .collect();

            max_line_width = max_line_width.max(line.visible_width);
            lines.push(TextLayoutLine {
                range: line.start..line.end,
                line_height,
                line_width: line.visible_width,
                top,
                bottom,
                glyphs,
            });
            cursor_y = bottom;
        }

        TextLayout {
            config: config.clone(),
            font,
            line_box,
            total_height: cursor_y,
            total_width: max_line_width,
            lines,
        }
    }
}

mod layout_utl {
    use super::GlyphFragment;

    /// Glyph placed on a line that has not been positioned vertically yet.
    pub struct PlacedGlyph {
        pub glyph_idx: u16,
        pub x: f32,
        pub y_offset: f32,
    }

    /// Line under construction.
    pub struct LineBuilder {
        pub start: usize,
        pub end: usize,
        /// Pen position after the last placed character, separators included.
        pub pen_x: f32,
        pub visible_width: f32,
        placed_any: bool,
        pub glyphs: Vec<PlacedGlyph>,
    }

    impl LineBuilder {
        pub fn new(start: usize) -> Self {
            Self {
                start,
                end: start,
                pen_x: 0.0,
                visible_width: 0.0,
                placed_any: false,
                glyphs: Vec::new(),
            }
        }

        /// Whether the line has consumed any source text.
        pub fn is_empty(&self) -> bool {
            self.start == self.end
        }

        pub fn has_placed(&self) -> bool {
            self.placed_any
        }

        fn kern_for(&self, fragment: &GlyphFragment) -> f32 {
            if self.placed_any { fragment.kern } else { 0.0 }
        }

        /// Pen position if `word` were appended to this line.
        pub fn projected_width(&self, word: &[GlyphFragment]) -> f32 {
            let mut pen = self.pen_x;
            for (i, fragment) in word.iter().enumerate() {
                let kern = if i == 0 { self.kern_for(fragment) } else { fragment.kern };
                pen += kern + fragment.advance;
            }
            pen
        }

        pub fn place(&mut self, fragment: &GlyphFragment) {
            let origin_x = self.pen_x + self.kern_for(fragment);
            self.pen_x = origin_x + fragment.advance;
            self.placed_any = true;
            self.end = fragment.range.end;

            if !fragment.ch.is_whitespace() {
                self.visible_width = self.pen_x;
                self.glyphs.push(PlacedGlyph {
                    glyph_idx: fragment.glyph_idx,
                    x: origin_x + fragment.bearing[0],
                    y_offset: fragment.bearing[1],
                });
            }
        }

        /// Extends the line over `fragment` without drawing it.
        pub fn consume(&mut self, fragment: &GlyphFragment) {
            self.end = fragment.range.end;
        }
    }

    /// Accumulates fragments into finished lines.
    pub struct LineBreaker {
        limit: Option<f32>,
        hard_break: bool,
        current: LineBuilder,
        lines: Vec<LineBuilder>,
    }

    impl LineBreaker {
        pub fn new(start: usize, limit: Option<f32>, hard_break: bool) -> Self {
            Self {
                limit,
                hard_break,
                current: LineBuilder::new(start),
                lines: Vec::new(),
            }
        }

        pub fn push_word(&mut self, word: &[GlyphFragment]) {
            let Some(first) = word.first() else {
                return;
            };

            let Some(limit) = self.limit else {
                word.iter().for_each(|fragment| self.current.place(fragment));
                return;
            };

            if self.current.has_placed() && self.current.projected_width(word) > limit {
                self.break_line(first.range.start);
            }

            if self.hard_break && self.current.projected_width(word) > limit {
                // Split into the longest runs that fit. A single glyph wider
                // than the limit still gets a line of its own.
                for fragment in word {
                    if self.current.has_placed()
                        && self.current.projected_width(std::slice::from_ref(fragment)) > limit
                    {
                        self.break_line(fragment.range.start);
                    }
                    self.current.place(fragment);
                }
                return;
            }

            word.iter().for_each(|fragment| self.current.place(fragment));
        }

        pub fn push_separator(&mut self, fragment: &GlyphFragment) {
            self.current.place(fragment);
        }

        pub fn push_line_break(&mut self, fragment: &GlyphFragment) {
            self.current.consume(fragment);
            self.break_line(fragment.range.end);
        }

        pub fn consume(&mut self, fragment: &GlyphFragment) {
            self.current.consume(fragment);
        }

        fn break_line(&mut self, next_start: usize) {
            let line = std::mem::replace(&mut self.current, LineBuilder::new(next_start));
            self.lines.push(line);
        }

        pub fn finish(mut self) -> Vec<LineBuilder> {
            if !self.current.is_empty() {
                self.lines.push(self.current);
            }
            self.lines
        }
    }
}
