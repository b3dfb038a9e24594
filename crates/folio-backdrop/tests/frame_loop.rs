//! Frame loop lifecycle against a hand-cranked scheduler.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_backdrop::{
    Backdrop, BackdropConfig, BackdropHost, BackingSize, CurveSink, FrameCallback, FrameHandle,
    FrameScheduler, Glow, SmoothPath, Surface,
};
use folio_core::{Point, Viewport};
use tracing_test::traced_test;

/// Scheduler that runs callbacks only when the test says so.
#[derive(Default)]
struct ManualScheduler {
    next: Cell<u64>,
    pending: RefCell<BTreeMap<u64, FrameCallback>>,
    cancelled: Cell<u32>,
}

impl ManualScheduler {
    /// Fire every callback pending right now with `timestamp_ms`.
    fn run_frame(&self, timestamp_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let fired = due.len();
        for (_, callback) in due {
            callback(timestamp_ms);
        }
        fired
    }

    fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next.get() + 1;
        self.next.set(id);
        self.pending.borrow_mut().insert(id, callback);
        FrameHandle(id)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.pending.borrow_mut().remove(&handle.0).is_some() {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}

#[derive(Default)]
struct RecordingSurface {
    backing: Cell<Option<BackingSize>>,
    scale: Cell<f64>,
    clears: Cell<u32>,
    glows: RefCell<Vec<Glow>>,
}

impl Surface for RecordingSurface {
    fn resize(&self, backing: BackingSize, _css_width: f64, _css_height: f64) {
        self.backing.set(Some(backing));
    }

    fn set_scale(&self, scale: f64) {
        self.scale.set(scale);
    }

    fn clear(&self, _css_width: f64, _css_height: f64) {
        self.clears.set(self.clears.get() + 1);
    }

    fn draw_glow(&self, glow: &Glow) {
        self.glows.borrow_mut().push(glow.clone());
    }
}

#[derive(Default)]
struct RecordingCurves {
    layers: RefCell<BTreeMap<usize, (f64, f64)>>,
    paths: RefCell<BTreeMap<usize, String>>,
    path_writes: Cell<u32>,
    offset: Cell<Option<Point>>,
}

impl CurveSink for RecordingCurves {
    fn configure_layer(&self, index: usize, stroke_width: f64, opacity: f64) {
        self.layers.borrow_mut().insert(index, (stroke_width, opacity));
    }

    fn set_path(&self, index: usize, path: &SmoothPath) {
        self.path_writes.set(self.path_writes.get() + 1);
        self.paths.borrow_mut().insert(index, path.to_string());
    }

    fn set_container_offset(&self, offset: Point) {
        self.offset.set(Some(offset));
    }
}

struct Rig {
    scheduler: Rc<ManualScheduler>,
    surface: Rc<RecordingSurface>,
    curves: Rc<RecordingCurves>,
}

impl Rig {
    fn new() -> Self {
        Self {
            scheduler: Rc::new(ManualScheduler::default()),
            surface: Rc::new(RecordingSurface::default()),
            curves: Rc::new(RecordingCurves::default()),
        }
    }

    fn host(&self) -> BackdropHost {
        BackdropHost {
            surface: self.surface.clone(),
            curves: self.curves.clone(),
            scheduler: self.scheduler.clone(),
        }
    }

    fn mount(&self, width: f64, reduced_motion: bool) -> Backdrop {
        Backdrop::mount(
            BackdropConfig::default().with_seed(2024),
            Viewport::new(width, 800.0, 2.0),
            self.host(),
            reduced_motion,
        )
    }
}

#[test]
fn mount_draws_resting_curves_once() {
    let rig = Rig::new();
    let backdrop = rig.mount(1200.0, false);
    assert!(!backdrop.is_running());
    assert_eq!(rig.curves.layers.borrow().len(), 3);
    assert_eq!(rig.curves.path_writes.get(), 3);
    assert!(rig.curves.paths.borrow()[&0].starts_with("M 0 50 C "));
    assert_eq!(
        rig.surface.backing.get(),
        Some(BackingSize {
            width: 2400,
            height: 1600
        })
    );
    assert_eq!(rig.surface.scale.get(), 2.0);
    assert_eq!(rig.scheduler.pending(), 0);
}

#[test]
fn each_frame_draws_and_reschedules() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    assert!(backdrop.start());
    assert_eq!(rig.scheduler.pending(), 1);

    for i in 0..3 {
        assert_eq!(rig.scheduler.run_frame(f64::from(i) * 16.0), 1);
    }
    assert_eq!(rig.surface.clears.get(), 3);
    assert_eq!(rig.surface.glows.borrow().len(), 3 * 45);
    assert_eq!(rig.scheduler.pending(), 1);
    assert_eq!(backdrop.with_scene(|s| s.frames()), 3);
}

#[test]
fn start_is_idempotent() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    assert!(backdrop.start());
    assert!(backdrop.start());
    assert_eq!(rig.scheduler.pending(), 1);
}

#[test]
fn stop_cancels_and_draws_nothing_more() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    backdrop.start();
    rig.scheduler.run_frame(0.0);
    let glows = rig.surface.glows.borrow().len();
    let paths = rig.curves.path_writes.get();

    backdrop.stop();
    assert!(!backdrop.is_running());
    assert_eq!(rig.scheduler.cancelled.get(), 1);
    for t in 1..10 {
        assert_eq!(rig.scheduler.run_frame(f64::from(t) * 16.0), 0);
    }
    assert_eq!(rig.surface.glows.borrow().len(), glows);
    assert_eq!(rig.curves.path_writes.get(), paths);
}

#[test]
fn restart_after_stop_resumes() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    backdrop.start();
    rig.scheduler.run_frame(0.0);
    backdrop.stop();
    assert!(backdrop.start());
    rig.scheduler.run_frame(5000.0);
    assert_eq!(backdrop.with_scene(|s| s.frames()), 2);
}

#[test]
fn dropping_the_backdrop_stops_the_loop() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    backdrop.start();
    drop(backdrop);
    assert_eq!(rig.scheduler.pending(), 0);
    assert_eq!(rig.scheduler.run_frame(16.0), 0);
    assert_eq!(rig.surface.clears.get(), 0);
}

#[traced_test]
#[test]
fn reduced_motion_never_starts() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, true);
    assert!(!backdrop.start());
    assert!(!backdrop.is_running());
    assert_eq!(rig.scheduler.pending(), 0);
    assert_eq!(rig.curves.path_writes.get(), 3);
    assert!(logs_contain("reduced motion"));
}

#[test]
fn resize_regenerates_particles_for_new_tier() {
    let rig = Rig::new();
    let backdrop = rig.mount(1600.0, false);
    assert_eq!(backdrop.with_scene(|s| s.particles().len()), 80);
    backdrop.resize(Viewport::new(600.0, 400.0, 1.0));
    assert_eq!(backdrop.with_scene(|s| s.particles().len()), 20);
    assert_eq!(
        rig.surface.backing.get(),
        Some(BackingSize {
            width: 600,
            height: 400
        })
    );
    assert_eq!(rig.surface.scale.get(), 1.0);
}

#[test]
fn pointer_moves_the_container() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    backdrop.start();
    backdrop.pointer_moved(Point::new(1000.0, 800.0));
    for i in 0..120 {
        rig.scheduler.run_frame(f64::from(i) * 16.0);
    }
    let offset = rig.curves.offset.get().unwrap();
    assert!((offset.x - 3.0).abs() < 1e-3, "{offset:?}");
    assert!((offset.y - 1.2).abs() < 1e-3, "{offset:?}");
}

#[test]
fn curves_move_over_time() {
    let rig = Rig::new();
    let backdrop = rig.mount(1000.0, false);
    let resting = rig.curves.paths.borrow()[&2].clone();
    backdrop.start();
    rig.scheduler.run_frame(0.0);
    rig.scheduler.run_frame(3000.0);
    assert_ne!(rig.curves.paths.borrow()[&2], resting);
}
