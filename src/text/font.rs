use crate::glyph_id::GlyphId;

/// A face from the font storage paired with the pixel size it is drawn at.
///
/// A text surface holds at most one of these. Every line is laid out,
/// measured and rasterized with the same handle, which is what makes the
/// per-line heights uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontHandle {
    /// The ID of the face in the font storage.
    pub font_id: fontdb::ID,
    /// The size of the font in pixels.
    pub font_size: f32,
}

impl FontHandle {
    pub fn new(font_id: fontdb::ID, font_size: f32) -> Self {
        Self { font_id, font_size }
    }

    /// Builds the cache key for one glyph of this face at this size.
    pub fn glyph_id(&self, glyph_index: u16) -> GlyphId {
        GlyphId::new(self.font_id, glyph_index, self.font_size)
    }
}
