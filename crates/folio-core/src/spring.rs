#![forbid(unsafe_code)]

//! Damped spring used for pointer-follow easing.
//!
//! Models `F = -k (x - target) - c v` and integrates it with semi-implicit
//! Euler. [`Spring::critically_damped`] picks `c = 2√k`, the fastest
//! convergence without overshoot, which is what the backdrop container uses
//! to chase the pointer offset.
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is non-negative.
//! 2. A spring at rest stays put until [`Spring::set_target`] moves the
//!    target beyond the rest threshold.
//! 3. Large time steps are subdivided into steps of at most 4ms.

use web_time::Duration;

const MAX_STEP_SECS: f64 = 0.004;
const DEFAULT_REST_THRESHOLD: f64 = 0.001;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Lower bound on stiffness; a zero spring would never converge.
pub const MIN_STIFFNESS: f64 = 0.1;

/// One-dimensional damped harmonic oscillator.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring resting at `position` with explicit stiffness and damping.
    #[must_use]
    pub fn new(position: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            stiffness: stiffness.max(MIN_STIFFNESS),
            damping: damping.max(0.0),
            rest_threshold: DEFAULT_REST_THRESHOLD,
            at_rest: true,
        }
    }

    /// Spring resting at `position` with damping `2√stiffness`.
    #[must_use]
    pub fn critically_damped(position: f64, stiffness: f64) -> Self {
        let k = stiffness.max(MIN_STIFFNESS);
        Self::new(position, k, 2.0 * k.sqrt())
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Move the target. Wakes the spring unless the change is negligible.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump to `position` and stop.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD
        {
            self.snap_to(self.target);
        }
    }
}
