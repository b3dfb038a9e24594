#![forbid(unsafe_code)]

//! The mounted backdrop and its frame loop.
//!
//! # Lifecycle
//!
//! 1. [`Backdrop::mount`] sizes the surface, styles the curve layers, and
//!    draws the resting curves once.
//! 2. [`Backdrop::start`] schedules the first frame. Each frame draws, then
//!    schedules the next while the loop is running.
//! 3. [`Backdrop::stop`] (or dropping the `Backdrop`) cancels the pending
//!    frame. Nothing is drawn or scheduled afterwards.
//!
//! With reduced motion requested, `start` refuses and the resting curves
//! from step 1 are all that is ever drawn.
//!
//! Frame callbacks hold only a `Weak` reference to the loop state, so a
//! callback that fires after the `Backdrop` is gone does nothing.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{Point, Viewport};
use tracing::{debug, info, trace_span};

use crate::config::BackdropConfig;
use crate::host::{BackdropHost, FrameHandle};
use crate::scene::BackdropScene;

struct LoopState {
    scene: RefCell<BackdropScene>,
    host: BackdropHost,
    running: Cell<bool>,
    pending: Cell<Option<FrameHandle>>,
}

/// A mounted, optionally animating backdrop.
pub struct Backdrop {
    state: Rc<LoopState>,
    reduced_motion: bool,
}

impl fmt::Debug for Backdrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backdrop")
            .field("running", &self.state.running.get())
            .field("pending", &self.state.pending.get())
            .field("reduced_motion", &self.reduced_motion)
            .finish_non_exhaustive()
    }
}

impl Backdrop {
    /// Build the scene for `viewport` and draw its resting state.
    #[must_use]
    pub fn mount(
        config: BackdropConfig,
        viewport: Viewport,
        host: BackdropHost,
        reduced_motion: bool,
    ) -> Self {
        let scene = BackdropScene::new(config, viewport);
        scene.mount(&*host.surface, &*host.curves);
        info!(
            width = viewport.width(),
            height = viewport.height(),
            particles = scene.particles().len(),
            reduced_motion,
            "backdrop mounted"
        );
        Self {
            state: Rc::new(LoopState {
                scene: RefCell::new(scene),
                host,
                running: Cell::new(false),
                pending: Cell::new(None),
            }),
            reduced_motion,
        }
    }

    /// Start animating. Returns whether the loop is running afterwards;
    /// always `false` under reduced motion. Idempotent.
    pub fn start(&self) -> bool {
        if self.reduced_motion {
            debug!("backdrop start skipped: reduced motion");
            return false;
        }
        if self.state.running.replace(true) {
            return true;
        }
        Self::schedule(&self.state);
        info!("backdrop animation started");
        true
    }

    /// Stop animating and cancel the pending frame. Idempotent.
    pub fn stop(&self) {
        let was_running = self.state.running.replace(false);
        if let Some(handle) = self.state.pending.take() {
            self.state.host.scheduler.cancel_frame(handle);
        }
        if was_running {
            self.state.scene.borrow_mut().pause();
            info!("backdrop animation stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    #[must_use]
    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Adopt a new viewport.
    pub fn resize(&self, viewport: Viewport) {
        self.state
            .scene
            .borrow_mut()
            .resize(viewport, &*self.state.host.surface);
    }

    pub fn pointer_moved(&self, pointer: Point) {
        self.state.scene.borrow_mut().pointer_moved(pointer);
    }

    /// Read-only access to the scene.
    pub fn with_scene<R>(&self, f: impl FnOnce(&BackdropScene) -> R) -> R {
        f(&self.state.scene.borrow())
    }

    fn schedule(state: &Rc<LoopState>) {
        let weak: Weak<LoopState> = Rc::downgrade(state);
        let handle = state
            .host
            .scheduler
            .request_frame(Box::new(move |timestamp_ms| {
                if let Some(state) = weak.upgrade() {
                    Self::tick(&state, timestamp_ms);
                }
            }));
        state.pending.set(Some(handle));
    }

    fn tick(state: &Rc<LoopState>, timestamp_ms: f64) {
        state.pending.set(None);
        if !state.running.get() {
            return;
        }
        {
            let _span = trace_span!("backdrop.frame", timestamp_ms).entered();
            state.scene.borrow_mut().frame(
                timestamp_ms,
                &*state.host.surface,
                &*state.host.curves,
            );
        }
        if state.running.get() {
            Self::schedule(state);
        }
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.stop();
    }
}
