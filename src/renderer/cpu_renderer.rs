mod glyph_cache;

use crate::font_storage::FontStorage;
use crate::highlight::{OverlayShape, SurfaceRect};
use crate::text::{GlyphPosition, TextLayout};

pub use glyph_cache::{CpuCacheConfig, GlyphCache, GlyphCacheItem};

/// CPU compositor for highlighted text surfaces.
///
/// Nothing is blended here: every covered pixel is reported through a
/// callback with an 8-bit coverage value, and the caller mixes it into its
/// own image. `offset` maps surface coordinates to image pixels, which lets
/// backgrounds that start left of the text container (negative x) land
/// inside the image.
pub struct CpuRenderer {
    cache: GlyphCache,
}

impl CpuRenderer {
    pub fn new(config: &CpuCacheConfig) -> Self {
        Self {
            cache: GlyphCache::new(config),
        }
    }

    /// Reports the coverage of each shape, back to front.
    pub fn render_shapes<'a, C: 'a>(
        shapes: impl IntoIterator<Item = &'a OverlayShape<C>>,
        offset: [f32; 2],
        image_size: [usize; 2],
        f: &mut dyn FnMut([usize; 2], u8, &C),
    ) {
        let [width, height] = image_size;
        if width == 0 || height == 0 {
            return;
        }

        for shape in shapes {
            let rect = &shape.rect;
            let x_from = (rect.min_x() + offset[0]).floor().max(0.0) as usize;
            let y_from = (rect.min_y() + offset[1]).floor().max(0.0) as usize;
            let x_to = ((rect.max_x() + offset[0]).ceil().max(0.0) as usize).min(width);
            let y_to = ((rect.max_y() + offset[1]).ceil().max(0.0) as usize).min(height);

            for iy in y_from..y_to {
                let py = iy as f32 + 0.5 - offset[1];
                for ix in x_from..x_to {
                    let px = ix as f32 + 0.5 - offset[0];
                    let coverage = rounded_rect_coverage(rect, shape.corner_radius, px, py);
                    let alpha = (coverage * 255.0).round() as u8;
                    if alpha > 0 {
                        f([ix, iy], alpha, &shape.fill);
                    }
                }
            }
        }
    }

    /// Reports the glyph coverage of `layout`.
    pub fn render_text(
        &mut self,
        layout: &TextLayout,
        offset: [f32; 2],
        image_size: [usize; 2],
        font_storage: &mut FontStorage,
        f: &mut dyn FnMut([usize; 2], u8),
    ) {
        if image_size[0] == 0 || image_size[1] == 0 {
            return;
        }

        for line in &layout.lines {
            for glyph in &line.glyphs {
                self.render_glyph(glyph, offset, image_size, font_storage, f);
            }
        }
    }

    fn render_glyph(
        &mut self,
        glyph_pos: &GlyphPosition,
        offset: [f32; 2],
        image_size: [usize; 2],
        font_storage: &mut FontStorage,
        f: &mut dyn FnMut([usize; 2], u8),
    ) {
        let Some(cached) = self.cache.get(&glyph_pos.glyph_id, font_storage) else {
            return;
        };

        let origin_x = glyph_pos.x + offset[0];
        let origin_y = glyph_pos.y + offset[1];

        for row in 0..cached.height {
            let y = origin_y + row as f32;
            if y < 0.0 {
                continue;
            }
            let iy = y.floor() as usize;
            if iy >= image_size[1] {
                continue;
            }

            for col in 0..cached.width {
                let src_alpha = cached.data[row * cached.width + col];
                if src_alpha == 0 {
                    continue;
                }

                let x = origin_x + col as f32;
                if x < 0.0 {
                    continue;
                }
                let ix = x.floor() as usize;
                if ix >= image_size[0] {
                    continue;
                }

                f([ix, iy], src_alpha);
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Returns a reference to the underlying glyph cache.
    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }
}

/// Fraction of the pixel centered on `(px, py)` covered by a rounded
/// rectangle, from a signed distance with a one pixel ramp.
pub fn rounded_rect_coverage(rect: &SurfaceRect, corner_radius: f32, px: f32, py: f32) -> f32 {
    let half_w = rect.size.width / 2.0;
    let half_h = rect.size.height / 2.0;
    if half_w <= 0.0 || half_h <= 0.0 {
        return 0.0;
    }

    let radius = corner_radius.clamp(0.0, half_w.min(half_h));
    let qx = (px - (rect.origin.x + half_w)).abs() - (half_w - radius);
    let qy = (py - (rect.origin.y + half_h)).abs() - (half_h - radius);

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    let distance = outside + inside - radius;

    (0.5 - distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{SurfacePoint, SurfaceSize};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> SurfaceRect {
        SurfaceRect::new(SurfacePoint::new(x, y), SurfaceSize::new(w, h))
    }

    #[test]
    fn coverage_inside_outside_and_at_corners() {
        let square = rect(0.0, 0.0, 20.0, 20.0);

        assert_eq!(rounded_rect_coverage(&square, 5.0, 10.5, 10.5), 1.0);
        assert_eq!(rounded_rect_coverage(&square, 5.0, 19.5, 10.5), 1.0);
        assert_eq!(rounded_rect_coverage(&square, 5.0, 20.5, 10.5), 0.0);
        // The corner pixel is cut away by the radius.
        assert_eq!(rounded_rect_coverage(&square, 5.0, 0.5, 0.5), 0.0);
        assert_eq!(rounded_rect_coverage(&square, 0.0, 0.5, 0.5), 1.0);
    }

    #[test]
    fn empty_rect_covers_nothing() {
        assert_eq!(rounded_rect_coverage(&rect(0.0, 0.0, 0.0, 18.0), 5.0, 0.0, 9.0), 0.0);
    }

    #[test]
    fn shapes_are_shifted_by_the_offset() {
        let shape = OverlayShape {
            rect: rect(-5.0, -3.0, 10.0, 6.0),
            fill: 7u8,
            corner_radius: 0.0,
        };
        let mut pixels = Vec::new();

        CpuRenderer::render_shapes([&shape], [5.0, 3.0], [32, 32], &mut |pos, alpha, fill| {
            pixels.push((pos, alpha, *fill));
        });

        assert_eq!(pixels.len(), 60);
        assert!(pixels.iter().all(|(_, alpha, fill)| *alpha == 255 && *fill == 7));
        assert!(pixels.iter().all(|([x, y], _, _)| *x < 10 && *y < 6));
    }

    #[test]
    fn shapes_are_clipped_to_the_image() {
        let shape = OverlayShape {
            rect: rect(-5.0, -3.0, 10.0, 6.0),
            fill: (),
            corner_radius: 0.0,
        };
        let mut count = 0;

        CpuRenderer::render_shapes([&shape], [0.0, 0.0], [4, 2], &mut |_, _, _| count += 1);

        assert_eq!(count, 8);
    }
}
