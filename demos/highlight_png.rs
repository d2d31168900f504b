use std::sync::Arc;

use image::{ImageBuffer, Rgba};
use line_highlight::{
    FontSystem,
    fontdb::{self, Family, Query},
    highlight::{HighlightStyle, Marker, OverlayShape, SurfacePoint, SurfaceRect, SurfaceSize, TextSurface},
    renderer::{CpuCacheConfig, CpuRenderer, LayerTree},
};

const WIDTH: f32 = 420.0;
const MARGIN: f32 = 24.0;
const MARKER_SIZE: f32 = 14.0;

const BACKGROUND: [f32; 4] = [0.12, 0.12, 0.14, 1.0];
const HIGHLIGHT: [f32; 4] = [1.0, 0.85, 0.25, 1.0];
const TEXT: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
const MARKER: [f32; 4] = [0.95, 0.3, 0.45, 1.0];

fn blend(pixel: &mut Rgba<u8>, alpha: u8, color: &[f32; 4]) {
    let a = alpha as f32 / 255.0 * color[3];
    for (channel, value) in pixel.0.iter_mut().take(3).zip(color) {
        let dst = *channel as f32 / 255.0;
        *channel = ((value * a + dst * (1.0 - a)) * 255.0).round() as u8;
    }
}

#[allow(clippy::unwrap_used)]
fn main() {
    let font_system = Arc::new(FontSystem::new());
    font_system.load_system_fonts();
    assert!(!font_system.is_empty(), "system fonts are required for this demo");

    let query = Query {
        families: &[Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let font = font_system
        .query_handle(&query, 24.0)
        .or_else(|| font_system.any_handle(24.0))
        .expect("no usable fonts registered");

    let mut surface = TextSurface::new(
        font_system.clone(),
        LayerTree::new(),
        HighlightStyle::new(HIGHLIGHT),
    );
    surface.set_font(Some(font));
    surface.layout_did_change(WIDTH);

    let text = "Highlighted lines wrap with the text.\nEvery paragraph gets its own rounded background.\n";
    let marker = surface.text_did_change(text);
    println!("lines={} marker={marker:?}", surface.visual_lines().len());

    // Layout
    let layout = font_system.layout_surface_text(surface.text(), &font, WIDTH);
    let image_width = (WIDTH + 2.0 * MARGIN).ceil() as u32;
    let image_height = (layout.total_height.max(font.font_size) + 3.0 * MARGIN).ceil() as u32;

    // Render
    font_system.cpu_init(&CpuCacheConfig::default());
    let mut image = ImageBuffer::from_pixel(
        image_width,
        image_height,
        Rgba(BACKGROUND.map(|c| (c * 255.0) as u8)),
    );
    let image_size = [image_width as usize, image_height as usize];
    let offset = [MARGIN, MARGIN];

    font_system.cpu_render(
        surface.sink(),
        &layout,
        TEXT,
        offset,
        image_size,
        &mut |[x, y], alpha, color| blend(image.get_pixel_mut(x as u32, y as u32), alpha, color),
    );

    if let Marker::Visible(corner) = marker {
        let badge = OverlayShape {
            rect: SurfaceRect::new(
                SurfacePoint::new(corner.x + 8.0, corner.y),
                SurfaceSize::new(MARKER_SIZE, MARKER_SIZE),
            ),
            fill: MARKER,
            corner_radius: MARKER_SIZE / 2.0,
        };
        CpuRenderer::render_shapes([&badge], offset, image_size, &mut |[x, y], alpha, color| {
            blend(image.get_pixel_mut(x as u32, y as u32), alpha, color)
        });
    }

    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    image
        .save("debug/highlight.png")
        .expect("failed to save debug image");

    println!("Saved debug image to debug/highlight.png");
}
