//! # line-highlight
//!
//! Rounded per-line backgrounds for wrapped, editable text.
//!
//! ## Overview
//!
//! Given a block of text, a font and a container width, `line-highlight`
//! splits the text into the lines it is displayed as, measures each of them
//! and draws a padded, rounded rectangle behind every line. Each pass also
//! returns the top-right corner of every line so the caller can anchor a
//! badge or marker next to the last one.
//!
//! The [`TextSurface`](highlight::TextSurface) drives a pass. It talks to two
//! collaborators: a text engine implementing
//! [`LineLayout`](highlight::LineLayout) and
//! [`TextMeasure`](highlight::TextMeasure) (the [`FontSystem`] does both), and
//! a [`RenderSink`](highlight::RenderSink) receiving the shapes (the
//! [`LayerTree`](renderer::LayerTree) is an in-memory one).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use line_highlight::{
//!     FontSystem,
//!     highlight::{HighlightStyle, Marker, TextSurface},
//!     renderer::LayerTree,
//! };
//!
//! // 1. Create a FontSystem and pick a font
//! let font_system = Arc::new(FontSystem::new());
//! font_system.load_system_fonts();
//! let font = font_system.any_handle(17.0);
//!
//! // 2. Create a surface drawing yellow backgrounds into a layer tree
//! let style = HighlightStyle::new([1.0, 0.9, 0.2, 1.0]);
//! let mut surface = TextSurface::new(font_system, LayerTree::new(), style);
//! surface.set_font(font);
//! surface.layout_did_change(320.0);
//!
//! // 3. Feed edits and place the marker
//! match surface.text_did_change("Hello\nworld") {
//!     Marker::Visible(corner) => println!("marker at {corner:?}"),
//!     Marker::Hidden => println!("marker hidden"),
//! }
//! ```
//!
//! ## Features
//!
//! *   **Consistent wrapping**: segmentation, measurement and rendering share one layout engine.
//! *   **Full rebuild**: every pass replaces all shapes, so no stale background survives an edit.
//! *   **Pluggable collaborators**: any engine or render tree implementing the traits can be used.
//! *   **Thread Safety**: the font system uses internal locking and can be shared between surfaces.

pub mod font_storage;
pub mod font_system;
pub mod glyph_id;
pub mod highlight;
pub mod renderer;
pub mod text;

// common re-exports
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use glyph_id::GlyphId;
pub use text::FontHandle;

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
