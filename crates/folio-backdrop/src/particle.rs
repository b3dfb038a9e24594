#![forbid(unsafe_code)]

//! Drifting glow particles.
//!
//! Particles fall slowly with a little sideways drift, nudged by the pointer
//! parallax. When one leaves the viewport it re-enters past the opposite
//! edge, so the field never empties.
//!
//! # Wrapping
//!
//! After each move, at most one vertical and one horizontal wrap applies:
//!
//! | Exit | Condition | Re-entry |
//! |------|-----------|----------|
//! | bottom | `y - r > h` | `y = -margin`, `x` re-drawn |
//! | top | `y + r < -margin` | `y = h + r` |
//! | right | `x - r > w` | `x = -margin` |
//! | left | `x + r < -margin` | `x = w + r` |
//!
//! Re-entry points never satisfy the opposite exit condition, so a particle
//! cannot bounce between edges on consecutive frames.

use folio_core::{Point, Viewport};
use rand::Rng;
use rand::rngs::SmallRng;
use tracing::trace;

use crate::config::{GlowConfig, ParticleConfig};

/// Particle count for a viewport `width` CSS pixels wide.
///
/// The tier with the largest `min_width <= width` wins; with no match the
/// fallback count applies.
#[must_use]
pub fn particle_count(width: f64, config: &ParticleConfig) -> usize {
    config
        .tiers
        .iter()
        .filter(|tier| width >= tier.min_width)
        .max_by(|a, b| a.min_width.total_cmp(&b.min_width))
        .map_or(config.fallback_count, |tier| tier.count)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// One glowing dot, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
}

impl Particle {
    /// Fresh particle anywhere inside `viewport`.
    pub fn spawn<R: Rng + ?Sized>(viewport: Viewport, config: &ParticleConfig, rng: &mut R) -> Self {
        Self {
            x: sample(rng, 0.0, viewport.width()),
            y: sample(rng, 0.0, viewport.height()),
            radius: sample(rng, config.radius_min, config.radius_max),
            vx: sample(rng, -config.drift_x, config.drift_x),
            vy: sample(rng, config.fall_min, config.fall_max),
            alpha: sample(rng, config.alpha_min, config.alpha_max),
        }
    }

    /// Move by one frame of velocity plus the parallax push.
    pub fn advance(&mut self, push: Point) {
        self.x += self.vx + push.x;
        self.y += self.vy + push.y;
    }

    /// Re-enter past the opposite edge if fully outside. Returns whether a
    /// wrap happened.
    pub fn wrap<R: Rng + ?Sized>(&mut self, viewport: Viewport, margin: f64, rng: &mut R) -> bool {
        let (w, h, r) = (viewport.width(), viewport.height(), self.radius);
        let mut wrapped = false;

        if self.y - r > h {
            self.y = -margin;
            self.x = sample(rng, 0.0, w);
            wrapped = true;
        } else if self.y + r < -margin {
            self.y = h + r;
            wrapped = true;
        }

        if self.x - r > w {
            self.x = -margin;
            wrapped = true;
        } else if self.x + r < -margin {
            self.x = w + r;
            wrapped = true;
        }

        wrapped
    }
}

/// One color stop of a glow gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStop {
    pub offset: f64,
    pub color: [u8; 3],
    pub alpha: f64,
}

impl GlowStop {
    /// CSS `rgba(...)` string.
    #[must_use]
    pub fn css(&self) -> String {
        let [r, g, b] = self.color;
        format!("rgba({r},{g},{b},{})", self.alpha)
    }
}

/// Draw command for one particle: a disc filled with a radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Glow {
    /// Gradient origin (the particle position).
    pub origin: Point,
    pub gradient_radius: f64,
    /// Disc center, shifted by the parallax.
    pub center: Point,
    pub radius: f64,
    pub alpha: f64,
    pub stops: [GlowStop; 3],
}

impl Glow {
    /// Glow for `particle` under `parallax` on a `device_pixel_ratio` screen.
    #[must_use]
    pub fn for_particle(
        particle: &Particle,
        parallax: Point,
        shift: Point,
        device_pixel_ratio: f64,
        style: &GlowConfig,
    ) -> Self {
        let stop = |offset, alpha| GlowStop {
            offset,
            color: style.color,
            alpha,
        };
        Self {
            origin: Point::new(particle.x, particle.y),
            gradient_radius: (particle.radius * style.radius_scale).max(style.min_radius),
            center: Point::new(
                particle.x + parallax.x * shift.x,
                particle.y + parallax.y * shift.y,
            ),
            radius: particle.radius * device_pixel_ratio,
            alpha: particle.alpha,
            stops: [
                stop(0.0, style.inner_alpha),
                stop(style.mid_stop, style.mid_alpha),
                stop(1.0, 0.0),
            ],
        }
    }
}

/// The live particle set and its random source.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    /// Empty field; call [`regenerate`](Self::regenerate) to populate.
    #[must_use]
    pub fn new(config: ParticleConfig, rng: SmallRng) -> Self {
        Self {
            config,
            particles: Vec::new(),
            rng,
        }
    }

    /// Replace every particle with a fresh set sized for `viewport`.
    pub fn regenerate(&mut self, viewport: Viewport) {
        let count = particle_count(viewport.width(), &self.config);
        let Self {
            config,
            particles,
            rng,
        } = self;
        particles.clear();
        particles.extend((0..count).map(|_| Particle::spawn(viewport, config, rng)));
        trace!(count, width = viewport.width(), "particles regenerated");
    }

    /// Advance every particle one frame and wrap the ones that left.
    pub fn step(&mut self, viewport: Viewport, push: Point) {
        let margin = self.config.wrap_margin;
        for particle in &mut self.particles {
            particle.advance(push);
            particle.wrap(viewport, margin, &mut self.rng);
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(ParticleConfig::default(), SmallRng::seed_from_u64(seed))
    }

    fn dot(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            radius: 1.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 0.5,
        }
    }

    #[test]
    fn count_tiers() {
        let config = ParticleConfig::default();
        assert_eq!(particle_count(1500.0, &config), 80);
        assert_eq!(particle_count(1400.0, &config), 80);
        assert_eq!(particle_count(1000.0, &config), 45);
        assert_eq!(particle_count(900.0, &config), 45);
        assert_eq!(particle_count(500.0, &config), 20);
    }

    #[test]
    fn regenerate_sizes_to_viewport() {
        let mut f = field(1);
        f.regenerate(Viewport::new(1000.0, 700.0, 1.0));
        assert_eq!(f.len(), 45);
        f.regenerate(Viewport::new(400.0, 700.0, 1.0));
        assert_eq!(f.len(), 20);
    }

    #[test]
    fn spawn_respects_ranges() {
        let vp = Viewport::new(1600.0, 900.0, 2.0);
        let mut f = field(42);
        f.regenerate(vp);
        for p in f.particles() {
            assert!((0.0..1600.0).contains(&p.x));
            assert!((0.0..900.0).contains(&p.y));
            assert!((0.3..2.1).contains(&p.radius));
            assert!((-0.1..0.1).contains(&p.vx));
            assert!((0.05..0.45).contains(&p.vy));
            assert!((0.15..0.75).contains(&p.alpha));
        }
    }

    #[test]
    fn overflowing_spawn_span_uses_low_end() {
        let config = ParticleConfig {
            drift_x: f64::MAX,
            ..ParticleConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(2);
        let p = Particle::spawn(Viewport::new(800.0, 600.0, 1.0), &config, &mut rng);
        assert_eq!(p.vx, -f64::MAX);
    }

    #[test]
    fn right_exit_reenters_left() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = dot(801.5, 300.0);
        assert!(p.wrap(vp, 10.0, &mut rng));
        assert_eq!(p.x, -10.0);
        assert!(!p.wrap(vp, 10.0, &mut rng));
    }

    #[test]
    fn bottom_exit_reenters_top_with_new_x() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = dot(400.0, 601.5);
        p.wrap(vp, 10.0, &mut rng);
        assert_eq!(p.y, -10.0);
        assert!((0.0..800.0).contains(&p.x));
    }

    #[test]
    fn left_and_top_exits_are_stable() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = dot(-11.5, -11.5);
        p.wrap(vp, 10.0, &mut rng);
        assert_eq!((p.x, p.y), (801.0, 601.0));
        assert!(!p.wrap(vp, 10.0, &mut rng));
    }

    #[test]
    fn step_applies_push() {
        let mut f = field(5);
        f.particles_mut().push(Particle {
            vx: 0.05,
            vy: 0.2,
            ..dot(100.0, 100.0)
        });
        f.step(Viewport::new(800.0, 600.0, 1.0), Point::new(0.001, 0.002));
        let p = f.particles()[0];
        assert!((p.x - 100.051).abs() < 1e-9);
        assert!((p.y - 100.202).abs() < 1e-9);
    }

    #[test]
    fn glow_geometry() {
        let p = Particle {
            radius: 0.25,
            ..dot(10.0, 20.0)
        };
        let glow = Glow::for_particle(
            &p,
            Point::new(6.0, 3.0),
            Point::new(0.02, 0.01),
            2.0,
            &GlowConfig::default(),
        );
        assert_eq!(glow.origin, Point::new(10.0, 20.0));
        assert_eq!(glow.gradient_radius, 2.0);
        assert!((glow.center.x - 10.12).abs() < 1e-9);
        assert!((glow.center.y - 20.03).abs() < 1e-9);
        assert_eq!(glow.radius, 0.5);
        assert_eq!(glow.stops[0].css(), "rgba(99,102,241,0.28)");
        assert_eq!(glow.stops[1].css(), "rgba(99,102,241,0.06)");
        assert_eq!(glow.stops[2].css(), "rgba(99,102,241,0)");
    }

    proptest! {
        #[test]
        fn particles_stay_near_viewport(seed in any::<u64>(), frames in 1usize..400) {
            let vp = Viewport::new(640.0, 480.0, 1.0);
            let mut f = field(seed);
            f.regenerate(vp);
            for _ in 0..frames {
                f.step(vp, Point::new(-0.0015, 0.001));
            }
            for p in f.particles() {
                prop_assert!(p.x >= -10.0 - p.radius - 0.2 && p.x <= 640.0 + p.radius + 0.2);
                prop_assert!(p.y >= -10.0 - p.radius && p.y <= 480.0 + p.radius + 0.5);
            }
        }
    }
}
