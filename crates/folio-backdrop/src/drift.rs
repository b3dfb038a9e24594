#![forbid(unsafe_code)]

//! Endless vertical drift of curve control points.
//!
//! Each control point swings between its resting height and a random offset
//! with a sine in/out ease, reversing every `period` seconds forever. Points
//! start one `stagger` apart so the wave ripples rather than moving as a
//! block.

use folio_core::Point;
use folio_core::easing::{sine_in_out, yoyo};
use rand::Rng;

use crate::config::DriftConfig;

/// Oscillator for one control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDrift {
    /// Signed peak offset in curve units.
    pub offset: f64,
    pub period_secs: f64,
    pub delay_secs: f64,
}

impl PointDrift {
    /// Vertical displacement after `elapsed_secs`.
    #[must_use]
    pub fn displacement(&self, elapsed_secs: f64) -> f64 {
        let t = elapsed_secs - self.delay_secs;
        if t <= 0.0 {
            return 0.0;
        }
        self.offset * sine_in_out(yoyo(t, self.period_secs))
    }
}

/// Oscillators for every control point of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDrift {
    points: Vec<PointDrift>,
}

impl LayerDrift {
    /// Draw random offsets for `count` points of layer `layer`.
    ///
    /// Offsets are uniform in `±(offset + offset_step · layer)`; the period is
    /// `period_secs + period_step_secs · layer`.
    pub fn random<R: Rng + ?Sized>(
        layer: usize,
        count: usize,
        config: &DriftConfig,
        rng: &mut R,
    ) -> Self {
        let depth = layer as f64;
        let reach = config.offset + config.offset_step * depth;
        let period_secs = config.period_secs + config.period_step_secs * depth;
        let points = (0..count)
            .map(|i| PointDrift {
                offset: if reach > 0.0 && (2.0 * reach).is_finite() {
                    rng.random_range(-reach..=reach)
                } else {
                    0.0
                },
                period_secs,
                delay_secs: config.stagger_secs * i as f64,
            })
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[PointDrift] {
        &self.points
    }

    /// `base` displaced vertically at `elapsed_secs`. Points without an
    /// oscillator stay put.
    #[must_use]
    pub fn apply(&self, base: &[Point], elapsed_secs: f64) -> Vec<Point> {
        base.iter()
            .enumerate()
            .map(|(i, p)| {
                let dy = self
                    .points
                    .get(i)
                    .map_or(0.0, |d| d.displacement(elapsed_secs));
                Point::new(p.x, p.y + dy)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn displacement_follows_yoyo() {
        let drift = PointDrift {
            offset: 4.0,
            period_secs: 6.0,
            delay_secs: 0.0,
        };
        assert_eq!(drift.displacement(0.0), 0.0);
        assert!((drift.displacement(3.0) - 2.0).abs() < 1e-9);
        assert!((drift.displacement(6.0) - 4.0).abs() < 1e-9);
        assert!(drift.displacement(12.0).abs() < 1e-9);
    }

    #[test]
    fn staggered_points_wait_their_turn() {
        let config = DriftConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let drift = LayerDrift::random(0, 13, &config, &mut rng);
        assert!((drift.points()[12].delay_secs - 0.96).abs() < 1e-9);
        assert_eq!(drift.points()[12].displacement(0.5), 0.0);
    }

    #[test]
    fn deeper_layers_drift_slower_and_further() {
        let config = DriftConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let back = LayerDrift::random(2, 13, &config, &mut rng);
        assert!(back.points().iter().all(|p| p.period_secs == 10.0));
        assert!(back.points().iter().all(|p| p.offset.abs() <= 10.0));
    }

    #[test]
    fn overflowing_reach_stays_still() {
        let config = DriftConfig {
            offset: f64::MAX,
            ..DriftConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let drift = LayerDrift::random(1, 4, &config, &mut rng);
        assert!(drift.points().iter().all(|p| p.offset == 0.0));
    }

    #[test]
    fn apply_keeps_x() {
        let drift = LayerDrift {
            points: vec![PointDrift {
                offset: 1.0,
                period_secs: 1.0,
                delay_secs: 0.0,
            }],
        };
        let base = [Point::new(5.0, 50.0), Point::new(10.0, 50.0)];
        let moved = drift.apply(&base, 1.0);
        assert_eq!(moved[0], Point::new(5.0, 51.0));
        assert_eq!(moved[1], base[1]);
    }

    proptest! {
        #[test]
        fn displacement_bounded_by_offset(seed in any::<u64>(), t in 0.0f64..500.0) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let drift = LayerDrift::random(1, 13, &DriftConfig::default(), &mut rng);
            for p in drift.points() {
                prop_assert!(p.displacement(t).abs() <= 8.0 + 1e-9);
            }
        }
    }
}
