#![forbid(unsafe_code)]

//! Easing curves over normalized time.
//!
//! Every function maps `t` in `[0, 1]` to `[0, 1]`, with `f(0) = 0` and
//! `f(1) = 1`. Inputs outside the range are clamped first.

use std::f64::consts::PI;

/// Easing function signature.
pub type EasingFn = fn(f64) -> f64;

#[inline]
fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Identity.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    clamp01(t)
}

/// Sinusoidal ease-in-out: slow at both ends.
#[inline]
#[must_use]
pub fn sine_in_out(t: f64) -> f64 {
    -((PI * clamp01(t)).cos() - 1.0) / 2.0
}

/// Position within a repeating forward/backward cycle.
///
/// `elapsed` and `period` share a unit. Even cycles run 0 → 1, odd cycles
/// run 1 → 0, so the output is continuous across cycle boundaries. A
/// non-positive period yields 0.
#[must_use]
pub fn yoyo(elapsed: f64, period: f64) -> f64 {
    if period.is_nan() || period <= 0.0 || !elapsed.is_finite() || elapsed <= 0.0 {
        return 0.0;
    }
    let cycles = elapsed / period;
    let frac = cycles.fract();
    if (cycles.trunc() as u64) % 2 == 0 {
        frac
    } else {
        1.0 - frac
    }
}
