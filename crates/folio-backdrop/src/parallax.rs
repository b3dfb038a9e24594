#![forbid(unsafe_code)]

//! Pointer parallax: the particle push and the eased container offset.

use folio_core::{Point, Spring, Viewport};
use web_time::Duration;

use crate::config::ParallaxConfig;

/// Pointer offset from the viewport center, scaled to
/// `[-pointer_x / 2, pointer_x / 2] × [-pointer_y / 2, pointer_y / 2]`.
#[must_use]
pub fn pointer_offset(pointer: Point, viewport: Viewport, config: &ParallaxConfig) -> Point {
    let n = viewport.normalize(pointer);
    Point::new((n.x - 0.5) * config.pointer_x, (n.y - 0.5) * config.pointer_y)
}

/// Per-frame velocity added to every particle for a given pointer offset.
#[must_use]
pub fn particle_push(offset: Point, config: &ParallaxConfig) -> Point {
    Point::new(offset.x * config.velocity_x, offset.y * config.velocity_y)
}

/// Where the container should sit for a pointer position.
#[must_use]
pub fn container_target(pointer: Point, viewport: Viewport, config: &ParallaxConfig) -> Point {
    let c = viewport.center();
    Point::new(
        (pointer.x - c.x) * config.container_x,
        (pointer.y - c.y) * config.container_y,
    )
}

/// Container translation easing toward the pointer target on two
/// critically damped springs.
#[derive(Debug, Clone)]
pub struct ContainerEase {
    x: Spring,
    y: Spring,
}

impl ContainerEase {
    #[must_use]
    pub fn new(stiffness: f64) -> Self {
        Self {
            x: Spring::critically_damped(0.0, stiffness),
            y: Spring::critically_damped(0.0, stiffness),
        }
    }

    pub fn set_target(&mut self, target: Point) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.x.advance(dt);
        self.y.advance(dt);
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.x.position(), self.y.position())
    }

    #[must_use]
    pub fn target(&self) -> Point {
        Point::new(self.x.target(), self.y.target())
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}
