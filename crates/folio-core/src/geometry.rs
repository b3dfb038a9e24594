#![forbid(unsafe_code)]

//! Viewport and point types in CSS pixels.

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible page area in CSS pixels plus the device pixel ratio.
///
/// Non-finite or non-positive inputs are clamped so downstream math never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
}

impl Viewport {
    /// Create a viewport. Width and height are clamped to at least 1px, the
    /// ratio to a positive finite value (1.0 when unusable).
    #[must_use]
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let clamp_len = |v: f64| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: clamp_len(width),
            height: clamp_len(height),
            device_pixel_ratio: ratio,
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// `point` mapped to `[0, 1]` on each axis (unclamped outside the page).
    #[must_use]
    pub fn normalize(&self, point: Point) -> Point {
        Point::new(point.x / self.width, point.y / self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_inputs_are_clamped() {
        let vp = Viewport::new(0.0, f64::NAN, -2.0);
        assert_eq!(vp.width(), 1.0);
        assert_eq!(vp.height(), 1.0);
        assert_eq!(vp.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn normalize_center_is_half() {
        let vp = Viewport::new(1000.0, 600.0, 2.0);
        assert_eq!(vp.normalize(vp.center()), Point::new(0.5, 0.5));
    }
}
