//! Rounded per-line backgrounds for wrapped text.
//!
//! A pass runs in two steps. [`segment_lines`] asks a [`LineLayout`] for the
//! visual lines of the text, then [`TextSurface::update_highlights`] measures
//! each line with a [`TextMeasure`], derives its padded background and
//! top-right corner, and swaps the shapes in the surface's [`RenderSink`].

/// Collaborator traits for measuring and wrapping text.
pub mod engine;
/// Insets, styles and per-line geometry.
pub mod geometry;
/// Overlay shapes and the sink they are drawn into.
pub mod overlay;
/// Splitting text into visual lines.
pub mod segment;
/// The text surface that owns a highlight overlay.
pub mod surface;

pub use engine::{LineLayout, TextMeasure};
pub use geometry::{
    HighlightStyle, LineInsets, LineMetrics, MEASURE_HEIGHT, SurfacePoint, SurfaceRect,
    SurfaceSize, SurfaceSpace, round_half_even,
};
pub use overlay::{OverlaySet, OverlayShape, RenderSink, ShapeId};
pub use segment::{VisualLine, segment_lines};
pub use surface::{Marker, TextSurface};
