use std::sync::Arc;

use crate::{
    highlight::{
        engine::{LineLayout, TextMeasure},
        geometry::{HighlightStyle, LineMetrics, MEASURE_HEIGHT, SurfacePoint},
        overlay::{OverlaySet, OverlayShape, RenderSink},
        segment::{VisualLine, segment_lines},
    },
    text::FontHandle,
};

/// Where the caller should put its marker after a highlight pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Marker {
    /// Show the marker with its origin at the top-right corner of the last line.
    Visible(SurfacePoint),
    /// There is nothing to anchor to.
    Hidden,
}

impl Marker {
    pub fn from_corners(corners: &[SurfacePoint]) -> Self {
        match corners.last() {
            Some(corner) => Marker::Visible(*corner),
            None => Marker::Hidden,
        }
    }

    pub fn position(&self) -> Option<SurfacePoint> {
        match self {
            Marker::Visible(point) => Some(*point),
            Marker::Hidden => None,
        }
    }
}

/// An editable text block with one rounded background per visual line.
///
/// The surface owns its render sink and the set of shapes it has attached to
/// it. Every pass detaches the previous shapes before inserting new ones, all
/// within one `&mut self` call, so the sink never holds two generations of
/// backgrounds at once.
pub struct TextSurface<E, S: RenderSink> {
    engine: Arc<E>,
    sink: S,
    text: String,
    font: Option<FontHandle>,
    width: f32,
    style: HighlightStyle<S::Color>,
    overlay: OverlaySet,
}

impl<E, S> TextSurface<E, S>
where
    E: TextMeasure + LineLayout,
    S: RenderSink,
{
    /// Creates an empty surface with no font and zero width.
    pub fn new(engine: Arc<E>, sink: S, style: HighlightStyle<S::Color>) -> Self {
        Self {
            engine,
            sink,
            text: String::new(),
            font: None,
            width: 0.0,
            style,
            overlay: OverlaySet::new(),
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink for drawing unrelated content.
    ///
    /// Shapes listed in [`Self::overlay`] must be left attached.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> Option<&FontHandle> {
        self.font.as_ref()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &HighlightStyle<S::Color> {
        &self.style
    }

    /// Shapes attached by the last pass, one per visual line.
    pub fn overlay(&self) -> &OverlaySet {
        &self.overlay
    }

    /// Replaces the style. Takes effect on the next pass.
    pub fn set_style(&mut self, style: HighlightStyle<S::Color>) {
        self.style = style;
    }

    /// Current text split the way it is displayed.
    pub fn visual_lines(&self) -> Vec<VisualLine> {
        segment_lines(&*self.engine, &self.text, self.font.as_ref(), self.width)
    }

    /// Geometry of every visual line, without touching the sink.
    pub fn line_metrics(&self) -> Vec<LineMetrics> {
        let Some(font) = self.font.as_ref() else {
            return Vec::new();
        };

        self.visual_lines()
            .iter()
            .map(|line| {
                // Trimming only feeds the measurement; the index is untouched.
                let trimmed = line
                    .text
                    .trim_matches(|ch: char| ch.is_whitespace() || self.engine.is_line_break(ch));
                let measured = self
                    .engine
                    .measure(trimmed, font, self.width, MEASURE_HEIGHT);
                LineMetrics::compute(line.index, measured, &self.style.insets)
            })
            .collect()
    }

    /// Redraws the line backgrounds in `color`.
    ///
    /// Returns the top-right corner of every visual line, in order. The last
    /// one is where a marker belongs; an empty result means it should be
    /// hidden. Without a font the previous backgrounds are removed and
    /// nothing is drawn.
    pub fn update_highlights(&mut self, color: S::Color) -> Vec<SurfacePoint> {
        self.overlay.clear(&mut self.sink);

        if self.font.is_none() {
            log::debug!("Skipping highlight pass: no font set.");
            return Vec::new();
        }

        let metrics = self.line_metrics();
        let mut corners = Vec::with_capacity(metrics.len());
        for line in &metrics {
            self.overlay.insert(
                &mut self.sink,
                OverlayShape {
                    rect: line.background,
                    fill: color,
                    corner_radius: self.style.corner_radius,
                },
            );
            corners.push(line.corner);
        }

        log::debug!("Highlighted {} visual lines.", corners.len());
        corners
    }

    /// Handles a text edit.
    pub fn text_did_change(&mut self, text: impl Into<String>) -> Marker {
        self.text = text.into();
        self.refresh()
    }

    /// Handles a change of the container width.
    pub fn layout_did_change(&mut self, width: f32) -> Marker {
        self.width = width;
        self.refresh()
    }

    /// Switches the font. `None` puts the surface back into the "not ready"
    /// state and removes every background.
    pub fn set_font(&mut self, font: Option<FontHandle>) -> Marker {
        self.font = font;
        self.refresh()
    }

    fn refresh(&mut self) -> Marker {
        let corners = self.update_highlights(self.style.fill);
        Marker::from_corners(&corners)
    }
}
