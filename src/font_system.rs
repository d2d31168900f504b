use std::{ops::Range, path::PathBuf, sync::Arc};

use parking_lot::Mutex;

use crate::{
    font_storage::FontStorage,
    highlight::{LineLayout, SurfaceSize, TextMeasure},
    renderer::{CpuCacheConfig, CpuRenderer, LayerTree},
    text::{FontHandle, TextLayout, TextLayoutConfig},
};

/// High-level entry point for fonts, layout and rendering.
///
/// This struct coordinates `FontStorage`, `TextLayout` and the CPU renderer,
/// and is the engine a [`TextSurface`](crate::highlight::TextSurface) measures
/// and wraps its text with. Because segmentation, measurement and rendering
/// all go through the same layout code, highlights line up with the glyphs.
///
/// Use `Mutex` to allow shared mutable access, which is common in UI frameworks.
/// Share one instance between surfaces through an `Arc`.
///
/// The fields are public to allow direct access to the underlying storage and renderers when necessary
/// (e.g. for performance reasons or zero-allocation access).
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
    /// Wrapping rules used when acting as a [`LineLayout`] or [`TextMeasure`].
    /// The width and height limits are replaced on each call.
    pub layout_config: Mutex<TextLayoutConfig>,

    /// The CPU renderer instance (optional).
    pub cpu_renderer: Mutex<Option<Box<CpuRenderer>>>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a new font system with default wrapping rules and no renderer.
    pub fn new() -> Self {
        Self::with_layout_config(TextLayoutConfig::default())
    }

    /// Creates a new font system that wraps text with `config`.
    pub fn with_layout_config(config: TextLayoutConfig) -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
            layout_config: Mutex::new(config),
            cpu_renderer: Mutex::new(None),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Removes a face by ID.
    pub fn remove_face(&self, id: fontdb::ID) {
        self.font_storage.lock().remove_face(id);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_storage.lock().len()
    }
}

/// font querying
impl FontSystem {
    /// Queries for a face and pairs it with a pixel size.
    pub fn query_handle(&self, query: &fontdb::Query, font_size: f32) -> Option<FontHandle> {
        self.font_storage.lock().query_handle(query, font_size)
    }

    /// Returns a handle to any face that can be loaded.
    pub fn any_handle(&self, font_size: f32) -> Option<FontHandle> {
        self.font_storage.lock().any_handle(font_size)
    }

    /// Retrieves a loaded font by ID.
    pub fn font(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        self.font_storage.lock().font(id)
    }

    /// Returns face info for an ID.
    ///
    /// # Performance
    /// This method clones the face info to avoid holding a lock on the storage.
    /// If you need reference access, lock `font_storage` directly.
    pub fn face(&self, id: fontdb::ID) -> Option<fontdb::FaceInfo> {
        self.font_storage.lock().face(id).cloned()
    }
}

/// text layout
impl FontSystem {
    /// Replaces the wrapping rules used by the surfaces sharing this system.
    pub fn set_layout_config(&self, config: TextLayoutConfig) {
        *self.layout_config.lock() = config;
    }

    /// Performs text layout using the fonts in this system.
    pub fn layout_text(
        &self,
        text: &str,
        font: &FontHandle,
        config: &TextLayoutConfig,
    ) -> TextLayout {
        let mut font_storage = self.font_storage.lock();
        TextLayout::layout(text, font, config, &mut font_storage)
    }

    /// Lays out `text` at `max_width` with the configured wrapping rules.
    pub fn layout_surface_text(&self, text: &str, font: &FontHandle, max_width: f32) -> TextLayout {
        let config = self.layout_config.lock().with_max_size(Some(max_width), None);
        self.layout_text(text, font, &config)
    }

    /// Returns the `[width, height]` the text would occupy.
    pub fn measure_text(&self, text: &str, font: &FontHandle, config: &TextLayoutConfig) -> [f32; 2] {
        let mut font_storage = self.font_storage.lock();
        TextLayout::measure(text, font, config, &mut font_storage)
    }
}

impl TextMeasure for FontSystem {
    fn measure(
        &self,
        text: &str,
        font: &FontHandle,
        max_width: f32,
        max_height: f32,
    ) -> SurfaceSize {
        let config = self
            .layout_config
            .lock()
            .with_max_size(Some(max_width), Some(max_height));
        let [width, height] = self.measure_text(text, font, &config);
        SurfaceSize::new(width, height)
    }
}

impl LineLayout for FontSystem {
    fn visual_lines(&self, text: &str, font: &FontHandle, width: f32) -> Option<Vec<Range<usize>>> {
        let config = self.layout_config.lock().with_max_size(Some(width), None);
        let mut font_storage = self.font_storage.lock();
        font_storage.font(font.font_id)?;

        let layout = TextLayout::layout(text, font, &config, &mut font_storage);
        Some(layout.lines.into_iter().map(|line| line.range).collect())
    }

    fn is_line_break(&self, ch: char) -> bool {
        self.layout_config.lock().is_line_break(ch)
    }
}

/// cpu renderer
impl FontSystem {
    /// Initializes the CPU renderer with the given cache configuration.
    ///
    /// This will replace any existing CPU renderer.
    pub fn cpu_init(&self, config: &CpuCacheConfig) {
        // ensures first drop previous resource to avoid unnecessary memory usage.
        *self.cpu_renderer.lock() = None;

        *self.cpu_renderer.lock() = Some(Box::new(CpuRenderer::new(config)));
    }

    /// Clears the CPU renderer's cache.
    pub fn cpu_cache_clear(&self) {
        if let Some(renderer) = &mut *self.cpu_renderer.lock() {
            renderer.clear_cache();
        } else {
            log::warn!("Cache clear called before cpu renderer initialized.");
        }
    }

    /// Renders the glyphs of `layout`.
    ///
    /// The callback `f` is called for each covered pixel.
    pub fn cpu_render_text(
        &self,
        layout: &TextLayout,
        offset: [f32; 2],
        image_size: [usize; 2],
        f: &mut dyn FnMut([usize; 2], u8),
    ) {
        if let Some(renderer) = &mut *self.cpu_renderer.lock() {
            renderer.render_text(layout, offset, image_size, &mut self.font_storage.lock(), f);
        } else {
            log::warn!("Render called before cpu renderer initialized.");
        }
    }

    /// Renders a whole surface: the layers of `layers` back to front, then
    /// the glyphs of `layout` on top in `text_color`.
    pub fn cpu_render<C: Copy>(
        &self,
        layers: &LayerTree<C>,
        layout: &TextLayout,
        text_color: C,
        offset: [f32; 2],
        image_size: [usize; 2],
        f: &mut dyn FnMut([usize; 2], u8, &C),
    ) {
        CpuRenderer::render_shapes(layers.shapes(), offset, image_size, f);
        self.cpu_render_text(layout, offset, image_size, &mut |pos, alpha| {
            f(pos, alpha, &text_color)
        });
    }
}
