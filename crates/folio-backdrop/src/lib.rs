#![forbid(unsafe_code)]

//! Animated parallax backdrop for the Folio portfolio.
//!
//! Three wave curves drift slowly in a normalized `0..=100` space while a
//! field of soft glowing particles falls across the viewport. Moving the
//! pointer nudges the particles and eases the whole container a few pixels
//! toward it.
//!
//! # Structure
//!
//! | Module | Role |
//! |--------|------|
//! | [`curve`] | wave control points and cubic smoothing to SVG path data |
//! | [`drift`] | per-point sine yoyo oscillators |
//! | [`particle`] | spawn, move, wrap, and glow draw commands |
//! | [`parallax`] | pointer offsets and the eased container |
//! | [`scene`] | all of the above advanced one frame at a time |
//! | [`backdrop`] | mount, start/stop loop, resize, pointer |
//! | [`host`] | traits the page implements |
//! | [`config`] | every tunable, loadable from JSON or TOML |
//!
//! # Example
//!
//! ```ignore
//! let backdrop = Backdrop::mount(BackdropConfig::default(), viewport, host, reduced_motion);
//! backdrop.start();
//! backdrop.pointer_moved(Point::new(320.0, 200.0));
//! ```

pub mod backdrop;
pub mod config;
pub mod curve;
pub mod drift;
pub mod host;
pub mod parallax;
pub mod particle;
pub mod scene;

pub use backdrop::Backdrop;
pub use config::{
    BackdropConfig, BackingConfig, ConfigError, CurveConfig, DriftConfig, GlowConfig,
    MAX_LAYERS, MAX_PARTICLES, MAX_SEGMENTS, ParallaxConfig, ParticleConfig, ParticleTier,
};
pub use curve::{CurveLayer, CubicSegment, SmoothPath, wave_points};
pub use host::{BackdropHost, BackingSize, CurveSink, FrameCallback, FrameHandle, FrameScheduler, Surface};
pub use particle::{Glow, GlowStop, Particle, ParticleField, particle_count};
pub use scene::BackdropScene;
