#![forbid(unsafe_code)]

//! Every tunable of the backdrop as data.
//!
//! [`BackdropConfig::default()`] reproduces the stock look: three curve
//! layers, tiered particle counts, indigo glow. Hosts can override any
//! subset from JSON or TOML at startup.
//!
//! ```toml
//! seed = 7
//!
//! [particles]
//! fallback_count = 12
//!
//! [[particles.tiers]]
//! min_width = 1200.0
//! count = 60
//! ```
//!
//! ```rust,ignore
//! let config = BackdropConfig::from_toml_str(text)?.validated()?;
//! ```

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a [`BackdropConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "config")]
    #[error("invalid backdrop TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("invalid backdrop JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// One message per rejected field.
    #[error("backdrop config rejected: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Upper bound on `curves.layers`.
pub const MAX_LAYERS: usize = 16;
/// Upper bound on `curves.segments`.
pub const MAX_SEGMENTS: usize = 256;
/// Upper bound on any particle count.
pub const MAX_PARTICLES: usize = 2_000;

/// Top-level backdrop configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BackdropConfig {
    pub curves: CurveConfig,
    pub drift: DriftConfig,
    pub particles: ParticleConfig,
    pub parallax: ParallaxConfig,
    pub glow: GlowConfig,
    pub backing: BackingConfig,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Shape of the wave layers in the 0-100 curve space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CurveConfig {
    pub layers: usize,
    /// Segments per wave; each layer has `segments + 1` control points.
    pub segments: usize,
    pub base_y: f64,
    pub base_y_step: f64,
    pub amplitude: f64,
    pub amplitude_step: f64,
    /// Stroke width per layer; the last entry repeats for extra layers.
    pub stroke_widths: Vec<f64>,
    pub opacity: f64,
    pub opacity_step: f64,
    pub opacity_floor: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            segments: 12,
            base_y: 50.0,
            base_y_step: 6.0,
            amplitude: 8.0,
            amplitude_step: 6.0,
            stroke_widths: vec![0.18, 0.12, 0.08],
            opacity: 0.06,
            opacity_step: 0.015,
            opacity_floor: 0.02,
        }
    }
}

/// Vertical drift of curve control points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DriftConfig {
    /// Maximum offset of layer 0, in curve units.
    pub offset: f64,
    pub offset_step: f64,
    /// Half-cycle duration of layer 0, in seconds.
    pub period_secs: f64,
    pub period_step_secs: f64,
    /// Start delay added per control point index.
    pub stagger_secs: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            offset: 6.0,
            offset_step: 2.0,
            period_secs: 6.0,
            period_step_secs: 2.0,
            stagger_secs: 0.08,
        }
    }
}

/// Particle count for viewports at least `min_width` CSS pixels wide.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ParticleTier {
    pub min_width: f64,
    pub count: usize,
}

/// Particle spawn ranges and wrapping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ParticleConfig {
    pub tiers: Vec<ParticleTier>,
    /// Count when no tier matches.
    pub fallback_count: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Horizontal speed lies in `[-drift_x, drift_x]`.
    pub drift_x: f64,
    pub fall_min: f64,
    pub fall_max: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    /// Distance past an edge at which particles re-enter.
    pub wrap_margin: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                ParticleTier {
                    min_width: 1400.0,
                    count: 80,
                },
                ParticleTier {
                    min_width: 900.0,
                    count: 45,
                },
            ],
            fallback_count: 20,
            radius_min: 0.3,
            radius_max: 2.1,
            drift_x: 0.1,
            fall_min: 0.05,
            fall_max: 0.45,
            alpha_min: 0.15,
            alpha_max: 0.75,
            wrap_margin: 10.0,
        }
    }
}

/// Pointer-driven offsets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ParallaxConfig {
    /// Pointer offset span across the viewport.
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Per-frame velocity contribution of the pointer offset.
    pub velocity_x: f64,
    pub velocity_y: f64,
    /// Draw-position shift of each glow.
    pub glow_x: f64,
    pub glow_y: f64,
    /// Container translation per pixel of pointer distance from center.
    pub container_x: f64,
    pub container_y: f64,
    pub container_stiffness: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            pointer_x: 12.0,
            pointer_y: 6.0,
            velocity_x: 0.000_25,
            velocity_y: 0.000_35,
            glow_x: 0.02,
            glow_y: 0.01,
            container_x: 0.006,
            container_y: 0.003,
            container_stiffness: 60.0,
        }
    }
}

/// Radial glow drawn for each particle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GlowConfig {
    pub color: [u8; 3],
    pub inner_alpha: f64,
    pub mid_alpha: f64,
    pub mid_stop: f64,
    /// Gradient radius as a multiple of the particle radius.
    pub radius_scale: f64,
    pub min_radius: f64,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            color: [99, 102, 241],
            inner_alpha: 0.28,
            mid_alpha: 0.06,
            mid_stop: 0.6,
            radius_scale: 6.0,
            min_radius: 2.0,
        }
    }
}

/// Lower bounds for the canvas backing store, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BackingConfig {
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for BackingConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 200,
        }
    }
}

impl BackdropConfig {
    /// Same configuration with a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from a TOML string. Missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse from a JSON string. Missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty JSON.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter is within range.
    ///
    /// Returns one message per problem; empty means valid. A config that
    /// validates clean never makes [`BackdropScene::new`] panic or allocate
    /// beyond the caps.
    ///
    /// [`BackdropScene::new`]: crate::BackdropScene::new
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let c = &self.curves;
        let d = &self.drift;
        let p = &self.particles;
        let x = &self.parallax;
        let g = &self.glow;

        for (name, value) in [
            ("curves.base_y", c.base_y),
            ("curves.base_y_step", c.base_y_step),
            ("curves.amplitude", c.amplitude),
            ("curves.amplitude_step", c.amplitude_step),
            ("curves.opacity_step", c.opacity_step),
            ("drift.offset", d.offset),
            ("drift.offset_step", d.offset_step),
            ("drift.period_secs", d.period_secs),
            ("drift.period_step_secs", d.period_step_secs),
            ("drift.stagger_secs", d.stagger_secs),
            ("particles.drift_x", p.drift_x),
            ("particles.wrap_margin", p.wrap_margin),
            ("parallax.pointer_x", x.pointer_x),
            ("parallax.pointer_y", x.pointer_y),
            ("parallax.velocity_x", x.velocity_x),
            ("parallax.velocity_y", x.velocity_y),
            ("parallax.glow_x", x.glow_x),
            ("parallax.glow_y", x.glow_y),
            ("parallax.container_x", x.container_x),
            ("parallax.container_y", x.container_y),
            ("parallax.container_stiffness", x.container_stiffness),
            ("glow.inner_alpha", g.inner_alpha),
            ("glow.mid_alpha", g.mid_alpha),
            ("glow.radius_scale", g.radius_scale),
            ("glow.min_radius", g.min_radius),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }

        if !(1..=MAX_LAYERS).contains(&c.layers) {
            errors.push(format!(
                "curves.layers must be in [1, {MAX_LAYERS}], got {}",
                c.layers
            ));
        }
        if !(1..=MAX_SEGMENTS).contains(&c.segments) {
            errors.push(format!(
                "curves.segments must be in [1, {MAX_SEGMENTS}], got {}",
                c.segments
            ));
        }
        if c.stroke_widths.is_empty() {
            errors.push("curves.stroke_widths must not be empty".into());
        }
        if c.stroke_widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            errors.push(format!(
                "curves.stroke_widths must all be > 0, got {:?}",
                c.stroke_widths
            ));
        }
        for (name, value) in [("curves.opacity", c.opacity), ("curves.opacity_floor", c.opacity_floor)] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }

        if d.offset < 0.0 || d.offset_step < 0.0 {
            errors.push("drift.offset and drift.offset_step must be >= 0".into());
        }
        // Deepest layer draws from [-reach, reach]; the span must stay finite.
        let deepest = c.layers.saturating_sub(1) as f64;
        let reach = d.offset + d.offset_step * deepest;
        if !(2.0 * reach).is_finite() {
            errors.push(format!("drift offset span overflows at layer {deepest}: ±{reach}"));
        }
        if d.period_secs <= 0.0 {
            errors.push(format!("drift.period_secs must be > 0, got {}", d.period_secs));
        }
        if d.period_step_secs < 0.0 || d.stagger_secs < 0.0 {
            errors.push("drift.period_step_secs and drift.stagger_secs must be >= 0".into());
        }
        if !(d.period_secs + d.period_step_secs * deepest).is_finite() {
            errors.push("drift period of the deepest layer overflows".into());
        }

        for (name, lo, hi) in [
            ("particles.radius", p.radius_min, p.radius_max),
            ("particles.fall", p.fall_min, p.fall_max),
            ("particles.alpha", p.alpha_min, p.alpha_max),
        ] {
            if !(lo.is_finite() && hi.is_finite()) || lo > hi {
                errors.push(format!("{name}_min must be <= {name}_max, got {lo} > {hi}"));
            } else if !(hi - lo).is_finite() {
                errors.push(format!("{name} span overflows: [{lo}, {hi}]"));
            }
        }
        if p.radius_min < 0.0 {
            errors.push(format!("particles.radius_min must be >= 0, got {}", p.radius_min));
        }
        if p.alpha_min < 0.0 || p.alpha_max > 1.0 {
            errors.push("particles.alpha range must lie in [0, 1]".into());
        }
        if p.drift_x < 0.0 {
            errors.push(format!("particles.drift_x must be >= 0, got {}", p.drift_x));
        } else if !(2.0 * p.drift_x).is_finite() {
            errors.push(format!("particles.drift_x span overflows: ±{}", p.drift_x));
        }
        if p.wrap_margin < 0.0 {
            errors.push(format!("particles.wrap_margin must be >= 0, got {}", p.wrap_margin));
        }
        if p.fallback_count > MAX_PARTICLES {
            errors.push(format!(
                "particles.fallback_count must be <= {MAX_PARTICLES}, got {}",
                p.fallback_count
            ));
        }
        for (i, tier) in p.tiers.iter().enumerate() {
            if !tier.min_width.is_finite() {
                errors.push(format!("particles.tiers[{i}].min_width must be finite"));
            }
            if tier.count > MAX_PARTICLES {
                errors.push(format!(
                    "particles.tiers[{i}].count must be <= {MAX_PARTICLES}, got {}",
                    tier.count
                ));
            }
        }

        if x.container_stiffness <= 0.0 {
            errors.push(format!(
                "parallax.container_stiffness must be > 0, got {}",
                x.container_stiffness
            ));
        }

        if !(0.0..=1.0).contains(&g.mid_stop) {
            errors.push(format!("glow.mid_stop must be in [0, 1], got {}", g.mid_stop));
        }
        if g.min_radius <= 0.0 || g.radius_scale <= 0.0 {
            errors.push("glow.min_radius and glow.radius_scale must be > 0".into());
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}
