use crate::font_storage::FontStorage;

pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Key identifying one rasterized glyph: face, glyph index and pixel size.
///
/// The size is quantized so that `GlyphId` can be hashed and used as a cache
/// key. The same glyph is not guaranteed to receive the same `GlyphId` across
/// program runs because `fontdb::ID` values are session-local.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphId {
    font_id: fontdb::ID,
    glyph_index: u16,
    font_size: u32, // font size * SUB_PIXEL_QUANTIZE as u32
}

impl GlyphId {
    pub fn new(font_id: fontdb::ID, glyph_index: u16, font_size: f32) -> Self {
        Self {
            font_id,
            glyph_index,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
        }
    }

    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SUB_PIXEL_QUANTIZE
    }

    /// Rasterizes the glyph into a row-major coverage bitmap.
    ///
    /// Returns `None` when the face cannot be loaded or the glyph has no
    /// visible pixels (spaces, control characters).
    pub fn rasterize(&self, font_storage: &mut FontStorage) -> Option<(fontdue::Metrics, Vec<u8>)> {
        let font = font_storage.font(self.font_id)?;
        let (metrics, coverage) = font.rasterize_indexed(self.glyph_index, self.font_size());

        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        Some((metrics, coverage))
    }
}
