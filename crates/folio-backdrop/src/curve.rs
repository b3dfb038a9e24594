#![forbid(unsafe_code)]

//! Wave layers and their smoothed cubic paths.
//!
//! Curves live in a normalized `0..=100` square that the host stretches over
//! the viewport, so their geometry never depends on the window size.
//!
//! Smoothing turns a run of control points into cubic Bézier segments with
//! the Catmull-Rom tangent rule: for a segment `A → B` with neighbours
//! `Prev` and `Next`,
//!
//! ```text
//! c1 = A + (B - Prev) / 6
//! c2 = B - (Next - A) / 6
//! ```
//!
//! A missing neighbour at either end is replaced by the nearest endpoint.

use std::f64::consts::TAU;
use std::fmt;

use folio_core::Point;

use crate::config::CurveConfig;

/// Width and height of the curve coordinate space.
pub const CURVE_SPACE: f64 = 100.0;

/// `segments + 1` points tracing one sine period across the curve space.
///
/// `x = 100 i / segments`, `y = base_y + amplitude * sin(2π i / segments)`.
#[must_use]
pub fn wave_points(segments: usize, base_y: f64, amplitude: f64) -> Vec<Point> {
    if segments == 0 {
        return vec![Point::new(0.0, base_y)];
    }
    let n = segments as f64;
    (0..=segments)
        .map(|i| {
            let t = i as f64 / n;
            Point::new(t * CURVE_SPACE, base_y + (t * TAU).sin() * amplitude)
        })
        .collect()
}

/// One cubic Bézier segment; its start is the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// A smoothed open path.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothPath {
    pub start: Point,
    pub segments: Vec<CubicSegment>,
}

impl SmoothPath {
    /// Smooth `points` into `points.len() - 1` cubic segments.
    ///
    /// Returns `None` for an empty slice. A single point yields a path with
    /// no segments.
    #[must_use]
    pub fn through(points: &[Point]) -> Option<Self> {
        let start = *points.first()?;
        let last = points.len() - 1;
        let segments = (0..last)
            .map(|i| {
                let a = points[i];
                let b = points[i + 1];
                let prev = if i == 0 { a } else { points[i - 1] };
                let next = points.get(i + 2).copied().unwrap_or(b);
                CubicSegment {
                    c1: Point::new(a.x + (b.x - prev.x) / 6.0, a.y + (b.y - prev.y) / 6.0),
                    c2: Point::new(b.x - (next.x - a.x) / 6.0, b.y - (next.y - a.y) / 6.0),
                    end: b,
                }
            })
            .collect();
        Some(Self { start, segments })
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |s| s.end)
    }
}

/// SVG path data: `M x y C c1x c1y, c2x c2y, x y ...`.
impl fmt::Display for SmoothPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M {} {}", self.start.x, self.start.y)?;
        for s in &self.segments {
            write!(
                f,
                " C {} {}, {} {}, {} {}",
                s.c1.x, s.c1.y, s.c2.x, s.c2.y, s.end.x, s.end.y
            )?;
        }
        Ok(())
    }
}

/// One depth layer: resting control points plus stroke styling.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLayer {
    pub index: usize,
    pub stroke_width: f64,
    pub opacity: f64,
    pub base: Vec<Point>,
}

impl CurveLayer {
    /// Layer `index` as shaped by `config`. Deeper layers sit lower, swing
    /// wider, and are thinner and fainter.
    #[must_use]
    pub fn new(index: usize, config: &CurveConfig) -> Self {
        let depth = index as f64;
        let stroke_width = config
            .stroke_widths
            .get(index)
            .or(config.stroke_widths.last())
            .copied()
            .unwrap_or(0.1);
        Self {
            index,
            stroke_width,
            opacity: (config.opacity - config.opacity_step * depth).max(config.opacity_floor),
            base: wave_points(
                config.segments,
                config.base_y + config.base_y_step * depth,
                config.amplitude + config.amplitude_step * depth,
            ),
        }
    }

    /// All layers, front to back.
    #[must_use]
    pub fn stack(config: &CurveConfig) -> Vec<Self> {
        (0..config.layers).map(|i| Self::new(i, config)).collect()
    }

    /// Path through the resting control points.
    #[must_use]
    pub fn resting_path(&self) -> Option<SmoothPath> {
        SmoothPath::through(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn wave_has_segments_plus_one_points() {
        let pts = wave_points(12, 50.0, 8.0);
        assert_eq!(pts.len(), 13);
        assert_eq!(pts[0], Point::new(0.0, 50.0));
        assert!((pts[12].x - 100.0).abs() < 1e-9);
        assert!((pts[3].y - 58.0).abs() < 1e-9);
        assert!((pts[9].y - 42.0).abs() < 1e-9);
    }

    #[test]
    fn two_points_make_one_segment() {
        let path = SmoothPath::through(&[Point::new(0.0, 0.0), Point::new(6.0, 12.0)]).unwrap();
        assert_eq!(path.segments.len(), 1);
        let seg = path.segments[0];
        assert_eq!(seg.c1, Point::new(1.0, 2.0));
        assert_eq!(seg.c2, Point::new(5.0, 10.0));
        assert_eq!(path.to_string(), "M 0 0 C 1 2, 5 10, 6 12");
    }

    #[test]
    fn interior_tangent_uses_neighbours() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(6.0, 6.0),
            Point::new(12.0, 0.0),
        ];
        let path = SmoothPath::through(&pts).unwrap();
        // c2 of the first segment: B - (Next - A) / 6 = (6,6) - (12,0)/6
        assert_eq!(path.segments[0].c2, Point::new(4.0, 6.0));
        // c1 of the second segment: A + (B - Prev) / 6 = (6,6) + (12,0)/6
        assert_eq!(path.segments[1].c1, Point::new(8.0, 6.0));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(SmoothPath::through(&[]).is_none());
        let single = SmoothPath::through(&[Point::new(3.0, 4.0)]).unwrap();
        assert!(single.segments.is_empty());
        assert_eq!(single.to_string(), "M 3 4");
    }

    #[test]
    fn default_layers_match_depth_styling() {
        let layers = CurveLayer::stack(&CurveConfig::default());
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].stroke_width, 0.18);
        assert_eq!(layers[2].stroke_width, 0.08);
        assert!((layers[0].opacity - 0.06).abs() < 1e-12);
        assert!((layers[2].opacity - 0.03).abs() < 1e-12);
        assert_eq!(layers[1].base[0].y, 56.0);
    }

    #[test]
    fn resting_path_starts_at_layer_baseline() {
        let layers = CurveLayer::stack(&CurveConfig::default());
        let path = layers[1].resting_path().unwrap();
        assert_eq!(path.segments.len(), 12);
        assert!(path.to_string().starts_with("M 0 56 C "));
    }

    #[test]
    fn opacity_never_drops_below_floor() {
        let config = CurveConfig {
            layers: 6,
            ..CurveConfig::default()
        };
        let layers = CurveLayer::stack(&config);
        assert!((layers[5].opacity - 0.02).abs() < 1e-12);
        assert_eq!(layers[5].stroke_width, 0.08);
    }

    proptest! {
        #[test]
        fn n_points_give_n_minus_one_segments(
            ys in prop::collection::vec(-100.0f64..200.0, 1..40),
        ) {
            let pts: Vec<Point> = ys.iter().enumerate().map(|(i, y)| Point::new(i as f64, *y)).collect();
            let path = SmoothPath::through(&pts).unwrap();
            prop_assert_eq!(path.segments.len(), pts.len() - 1);
            prop_assert_eq!(path.start, pts[0]);
            prop_assert_eq!(path.end(), *pts.last().unwrap());
        }
    }
}
