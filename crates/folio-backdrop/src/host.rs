#![forbid(unsafe_code)]

//! What the backdrop needs from its host page.
//!
//! The browser bindings implement these over a 2D canvas, an SVG element,
//! and `requestAnimationFrame`; tests implement them with recorders.

use std::fmt;
use std::rc::Rc;

use folio_core::{Point, Viewport};

use crate::config::BackingConfig;
use crate::curve::SmoothPath;
use crate::particle::Glow;

/// Canvas backing-store size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

impl BackingSize {
    /// `max(min, floor(css · dpr))` on each axis.
    #[must_use]
    pub fn for_viewport(viewport: Viewport, config: &BackingConfig) -> Self {
        let dpr = viewport.device_pixel_ratio();
        let scale = |css: f64, min: u32| -> u32 {
            let px = (css * dpr).floor();
            if px >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                (px as u32).max(min)
            }
        };
        Self {
            width: scale(viewport.width(), config.min_width),
            height: scale(viewport.height(), config.min_height),
        }
    }
}

/// Raster target for the particle field, addressed in CSS pixels once the
/// transform is set.
pub trait Surface {
    /// Resize the backing store and the displayed size.
    fn resize(&self, backing: BackingSize, css_width: f64, css_height: f64);

    /// Uniform scale from CSS pixels to backing pixels.
    fn set_scale(&self, scale: f64);

    /// Erase the visible area.
    fn clear(&self, css_width: f64, css_height: f64);

    fn draw_glow(&self, glow: &Glow);
}

/// Vector target for the curve layers and the container transform.
pub trait CurveSink {
    /// Create or restyle layer `index`.
    fn configure_layer(&self, index: usize, stroke_width: f64, opacity: f64);

    fn set_path(&self, index: usize, path: &SmoothPath);

    /// Translate the whole backdrop container, in CSS pixels.
    fn set_container_offset(&self, offset: Point);
}

/// Opaque id of a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Callback receiving the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// One-shot display-synchronized callbacks.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Unknown or already-fired handles are
    /// ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Everything a mounted backdrop draws to or schedules on.
#[derive(Clone)]
pub struct BackdropHost {
    pub surface: Rc<dyn Surface>,
    pub curves: Rc<dyn CurveSink>,
    pub scheduler: Rc<dyn FrameScheduler>,
}

impl fmt::Debug for BackdropHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackdropHost").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backing_scales_by_ratio() {
        let size = BackingSize::for_viewport(
            Viewport::new(1280.5, 720.0, 2.0),
            &BackingConfig::default(),
        );
        assert_eq!(size, BackingSize { width: 2561, height: 1440 });
    }

    #[test]
    fn backing_has_floor() {
        let size = BackingSize::for_viewport(
            Viewport::new(120.0, 90.0, 1.5),
            &BackingConfig::default(),
        );
        assert_eq!(size, BackingSize { width: 300, height: 200 });
    }
}
