#![forbid(unsafe_code)]

//! Backdrop state and per-frame drawing, independent of scheduling.
//!
//! [`BackdropScene`] owns the curve layers with their drift oscillators, the
//! particle field, the pointer, and the container easing. Each call to
//! [`BackdropScene::frame`] advances everything by one display frame and
//! issues draw calls to the host [`Surface`] and [`CurveSink`].

use folio_core::{Point, Viewport};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;
use web_time::Duration;

use crate::config::BackdropConfig;
use crate::curve::{CurveLayer, SmoothPath};
use crate::drift::LayerDrift;
use crate::host::{BackingSize, CurveSink, Surface};
use crate::parallax::{self, ContainerEase};
use crate::particle::{Glow, Particle, ParticleField};

/// Longest step fed to the container easing; longer gaps (a hidden tab)
/// are clamped so the container does not jump.
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

/// Converts frame timestamps into elapsed time and frame deltas.
#[derive(Debug, Clone, Copy, Default)]
struct FrameClock {
    origin: Option<f64>,
    last: Option<f64>,
}

impl FrameClock {
    /// Returns `(elapsed_secs, dt)` for a timestamp in milliseconds.
    fn tick(&mut self, timestamp_ms: f64) -> (f64, Duration) {
        let origin = *self.origin.get_or_insert(timestamp_ms);
        let gap_ms = self
            .last
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last = Some(timestamp_ms);
        let dt = Duration::from_secs_f64((gap_ms / 1000.0).min(MAX_FRAME_GAP.as_secs_f64()));
        (((timestamp_ms - origin) / 1000.0).max(0.0), dt)
    }

    /// Forget the previous frame so the next delta starts at zero. The
    /// drift phase keeps its origin.
    fn pause(&mut self) {
        self.last = None;
    }
}

/// Animated backdrop state.
#[derive(Debug, Clone)]
pub struct BackdropScene {
    config: BackdropConfig,
    viewport: Viewport,
    pointer: Option<Point>,
    layers: Vec<CurveLayer>,
    drifts: Vec<LayerDrift>,
    field: ParticleField,
    container: ContainerEase,
    clock: FrameClock,
    frames: u64,
}

impl BackdropScene {
    /// Build layers, drift offsets, and a particle field sized for
    /// `viewport`. Seeds from `config.seed` when set.
    #[must_use]
    pub fn new(config: BackdropConfig, viewport: Viewport) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let layers = CurveLayer::stack(&config.curves);
        let drifts = layers
            .iter()
            .map(|layer| LayerDrift::random(layer.index, layer.base.len(), &config.drift, &mut rng))
            .collect();
        let mut field = ParticleField::new(config.particles.clone(), SmallRng::from_rng(&mut rng));
        field.regenerate(viewport);
        let container = ContainerEase::new(config.parallax.container_stiffness);

        Self {
            config,
            viewport,
            pointer: None,
            layers,
            drifts,
            field,
            container,
            clock: FrameClock::default(),
            frames: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last pointer position, or the viewport center before any movement.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer.unwrap_or_else(|| self.viewport.center())
    }

    #[must_use]
    pub fn layers(&self) -> &[CurveLayer] {
        &self.layers
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    #[must_use]
    pub fn container_offset(&self) -> Point {
        self.container.offset()
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Size the surface, style the layers, and draw the resting curves.
    pub fn mount(&self, surface: &dyn Surface, curves: &dyn CurveSink) {
        self.size_surface(surface);
        for layer in &self.layers {
            curves.configure_layer(layer.index, layer.stroke_width, layer.opacity);
        }
        self.draw_curves(curves, 0.0);
        curves.set_container_offset(self.container.offset());
    }

    /// Adopt a new viewport: resize the surface and regenerate particles.
    pub fn resize(&mut self, viewport: Viewport, surface: &dyn Surface) {
        self.viewport = viewport;
        self.size_surface(surface);
        self.field.regenerate(viewport);
        self.container.set_target(parallax::container_target(
            self.pointer(),
            viewport,
            &self.config.parallax,
        ));
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            particles = self.field.len(),
            "backdrop resized"
        );
    }

    /// Record the pointer and retarget the container easing.
    pub fn pointer_moved(&mut self, pointer: Point) {
        self.pointer = Some(pointer);
        self.container.set_target(parallax::container_target(
            pointer,
            self.viewport,
            &self.config.parallax,
        ));
    }

    /// Draw every layer displaced by its drift at `elapsed_secs`.
    pub fn draw_curves(&self, curves: &dyn CurveSink, elapsed_secs: f64) {
        for (layer, drift) in self.layers.iter().zip(&self.drifts) {
            let points = drift.apply(&layer.base, elapsed_secs);
            if let Some(path) = SmoothPath::through(&points) {
                curves.set_path(layer.index, &path);
            }
        }
    }

    /// Advance one display frame stamped `timestamp_ms` and draw it.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &dyn Surface, curves: &dyn CurveSink) {
        let (elapsed_secs, dt) = self.clock.tick(timestamp_ms);
        self.draw_curves(curves, elapsed_secs);

        let cfg = &self.config.parallax;
        let offset = parallax::pointer_offset(self.pointer(), self.viewport, cfg);
        let push = parallax::particle_push(offset, cfg);
        let shift = Point::new(cfg.glow_x, cfg.glow_y);

        surface.clear(self.viewport.width(), self.viewport.height());
        self.field.step(self.viewport, push);
        let dpr = self.viewport.device_pixel_ratio();
        for particle in self.field.particles() {
            surface.draw_glow(&Glow::for_particle(
                particle,
                offset,
                shift,
                dpr,
                &self.config.glow,
            ));
        }

        if !self.container.is_settled() {
            self.container.advance(dt);
            curves.set_container_offset(self.container.offset());
        }
        self.frames += 1;
    }

    /// Mark a pause in the frame sequence (the loop stopped).
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    fn size_surface(&self, surface: &dyn Surface) {
        let vp = self.viewport;
        surface.resize(
            BackingSize::for_viewport(vp, &self.config.backing),
            vp.width(),
            vp.height(),
        );
        surface.set_scale(vp.device_pixel_ratio());
    }
}
