use euclid::{Point2D, Rect, Size2D};

/// Coordinate space of a text surface: origin at the top-left of the text
/// container, y axis pointing down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSpace;

pub type SurfacePoint = Point2D<f32, SurfaceSpace>;
pub type SurfaceSize = Size2D<f32, SurfaceSpace>;
pub type SurfaceRect = Rect<f32, SurfaceSpace>;

/// Height budget used when measuring a single line. Large enough that one
/// line is never clipped.
pub const MEASURE_HEIGHT: f32 = 1000.0;

/// Extra padding drawn around each line's measured box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for LineInsets {
    fn default() -> Self {
        Self::new(3.0, 5.0, 5.0, 5.0)
    }
}

impl LineInsets {
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Appearance of the line backgrounds of one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle<C> {
    pub insets: LineInsets,
    pub corner_radius: f32,
    /// Color used when the surface refreshes itself after an event.
    pub fill: C,
}

impl<C> HighlightStyle<C> {
    pub const DEFAULT_CORNER_RADIUS: f32 = 5.0;

    /// Default insets and corner radius with the given fill.
    pub fn new(fill: C) -> Self {
        Self {
            insets: LineInsets::default(),
            corner_radius: Self::DEFAULT_CORNER_RADIUS,
            fill,
        }
    }
}

impl<C: Default> Default for HighlightStyle<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

/// Rounds to the nearest integer, resolving `.5` towards the even neighbour.
pub fn round_half_even(value: f32) -> f32 {
    value.round_ties_even()
}

/// Geometry derived for one visual line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub index: usize,
    /// Size of the trimmed line text.
    pub measured: SurfaceSize,
    /// Padded background with rounded y, width and height.
    pub background: SurfaceRect,
    /// Top-right corner of the line.
    pub corner: SurfacePoint,
}

impl LineMetrics {
    /// Derives the background and corner of line `index`.
    ///
    /// Lines are assumed to share one height: the top of line `i` is
    /// `measured.height * i`, not the sum of the heights above it.
    pub fn compute(index: usize, measured: SurfaceSize, insets: &LineInsets) -> Self {
        let line_top = measured.height * index as f32;

        let background = SurfaceRect::new(
            SurfacePoint::new(-insets.left, round_half_even(line_top - insets.top)),
            SurfaceSize::new(
                round_half_even(measured.width + insets.left + insets.right),
                round_half_even(measured.height + insets.top + insets.bottom),
            ),
        );

        Self {
            index,
            measured,
            background,
            corner: SurfacePoint::new(measured.width, line_top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_half_even(18.5), 18.0);
        assert_eq!(round_half_even(19.5), 20.0);
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(7.4), 7.0);
        assert_eq!(round_half_even(7.6), 8.0);
    }

    #[test]
    fn background_pads_and_rounds_the_measured_box() {
        let metrics = LineMetrics::compute(0, SurfaceSize::new(30.0, 10.5), &LineInsets::default());

        assert_eq!(metrics.corner, SurfacePoint::new(30.0, 0.0));
        assert_eq!(metrics.background.origin, SurfacePoint::new(-5.0, -3.0));
        // 10.5 + 3 + 5 = 18.5
        assert_eq!(metrics.background.size, SurfaceSize::new(40.0, 18.0));
    }

    #[test]
    fn line_top_is_height_times_index() {
        let insets = LineInsets::default();
        let first = LineMetrics::compute(1, SurfaceSize::new(20.5, 10.5), &insets);
        let third = LineMetrics::compute(3, SurfaceSize::new(12.0, 10.5), &insets);

        assert_eq!(first.corner.y, 10.5);
        // 10.5 - 3 = 7.5
        assert_eq!(first.background.origin.y, 8.0);
        // 20.5 + 10 = 30.5
        assert_eq!(first.background.size.width, 30.0);

        assert_eq!(third.corner.y, 31.5);
        // 31.5 - 3 = 28.5
        assert_eq!(third.background.origin.y, 28.0);
    }

    #[test]
    fn empty_line_keeps_inset_width() {
        let metrics = LineMetrics::compute(2, SurfaceSize::new(0.0, 12.0), &LineInsets::default());

        assert_eq!(metrics.corner, SurfacePoint::new(0.0, 24.0));
        assert_eq!(metrics.background.size.width, 10.0);
        assert_eq!(metrics.background.origin.x, -5.0);
    }

    #[test]
    fn style_defaults() {
        let style: HighlightStyle<[f32; 4]> = HighlightStyle::default();

        assert_eq!(style.corner_radius, 5.0);
        assert_eq!(style.insets, LineInsets::new(3.0, 5.0, 5.0, 5.0));
    }
}
