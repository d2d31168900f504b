use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::font_storage::FontStorage;
use crate::glyph_id::GlyphId;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Sizing of the CPU glyph cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuCacheConfig {
    /// Maximum number of glyphs kept before the cache is flushed.
    pub capacity: NonZeroUsize,
}

impl Default for CpuCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Coverage bitmap of one glyph, row-major, one byte per pixel.
pub struct GlyphCacheItem {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Rasterized glyphs keyed by [`GlyphId`].
///
/// Glyphs without pixels are remembered as `None` so they are not
/// rasterized again. When the capacity is reached the whole cache is dropped;
/// a single text surface only touches a small working set.
pub struct GlyphCache {
    capacity: usize,
    items: HashMap<GlyphId, Option<GlyphCacheItem>, fxhash::FxBuildHasher>,
}

impl GlyphCache {
    pub fn new(config: &CpuCacheConfig) -> Self {
        let capacity = config.capacity.get();
        Self {
            capacity,
            items: HashMap::with_capacity_and_hasher(capacity, fxhash::FxBuildHasher::default()),
        }
    }

    /// Returns the glyph bitmap, rasterizing it on first use.
    pub fn get(
        &mut self,
        glyph_id: &GlyphId,
        font_storage: &mut FontStorage,
    ) -> Option<&GlyphCacheItem> {
        if !self.items.contains_key(glyph_id) {
            if self.items.len() >= self.capacity {
                log::debug!("Glyph cache full ({} entries), flushing.", self.items.len());
                self.items.clear();
            }

            let item = glyph_id
                .rasterize(font_storage)
                .map(|(metrics, data)| GlyphCacheItem {
                    width: metrics.width,
                    height: metrics.height,
                    data,
                });
            self.items.insert(*glyph_id, item);
        }

        self.items.get(glyph_id).and_then(|item| item.as_ref())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
