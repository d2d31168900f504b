#![allow(dead_code)]

use std::ops::Range;

use line_highlight::{
    FontHandle, fontdb,
    highlight::{LineLayout, SurfaceSize, TextMeasure},
    text::{GlyphFragment, LineBox, TextLayout, TextLayoutConfig},
};

pub const ADVANCE: f32 = 10.0;
/// 8 + 2.5 + 0: a line height with a fractional part exercises the rounding.
pub const LINE_HEIGHT: f32 = 10.5;

/// Fixed-advance engine running the crate's line breaker without a font file.
pub struct MonoEngine {
    pub config: TextLayoutConfig,
}

impl MonoEngine {
    pub fn new() -> Self {
        Self {
            config: TextLayoutConfig::default(),
        }
    }

    pub fn layout(&self, text: &str, font: &FontHandle, config: &TextLayoutConfig) -> TextLayout {
        let fragments: Vec<GlyphFragment> = text
            .char_indices()
            .map(|(offset, ch)| GlyphFragment {
                ch,
                range: offset..offset + ch.len_utf8(),
                glyph_idx: ch as u16,
                advance: ADVANCE,
                kern: 0.0,
                bearing: [0.0, -8.0],
            })
            .collect();
        let line_box = LineBox {
            ascent: 8.0,
            descent: -2.5,
            line_gap: 0.0,
        };
        TextLayout::from_fragments(&fragments, line_box, *font, config)
    }
}

impl TextMeasure for MonoEngine {
    fn measure(
        &self,
        text: &str,
        font: &FontHandle,
        max_width: f32,
        max_height: f32,
    ) -> SurfaceSize {
        let config = self.config.with_max_size(Some(max_width), Some(max_height));
        let [width, height] = self.layout(text, font, &config).size();
        SurfaceSize::new(width, height)
    }
}

impl LineLayout for MonoEngine {
    fn visual_lines(&self, text: &str, font: &FontHandle, width: f32) -> Option<Vec<Range<usize>>> {
        let config = self.config.with_max_size(Some(width), None);
        let layout = self.layout(text, font, &config);
        Some(layout.lines.into_iter().map(|line| line.range).collect())
    }

    fn is_line_break(&self, ch: char) -> bool {
        self.config.is_line_break(ch)
    }
}

/// An engine whose layout service is down.
pub struct BrokenEngine;

impl TextMeasure for BrokenEngine {
    fn measure(&self, _: &str, _: &FontHandle, _: f32, _: f32) -> SurfaceSize {
        SurfaceSize::new(0.0, 0.0)
    }
}

impl LineLayout for BrokenEngine {
    fn visual_lines(&self, _: &str, _: &FontHandle, _: f32) -> Option<Vec<Range<usize>>> {
        None
    }
}

pub fn font() -> FontHandle {
    FontHandle::new(fontdb::ID::dummy(), 16.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub [f32; 4]);

pub const YELLOW: Rgba = Rgba([1.0, 1.0, 0.0, 1.0]);
pub const PINK: Rgba = Rgba([1.0, 0.4, 0.7, 1.0]);
