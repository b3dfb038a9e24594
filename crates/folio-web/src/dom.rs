//! Host trait implementations over the browser DOM.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use folio_backdrop::{BackingSize, CurveSink, FrameCallback, FrameHandle, FrameScheduler, Glow, SmoothPath, Surface};
use folio_core::{ListenerGuard, Point, Viewport};
use folio_theme::{
    AppearanceSource, MemoryStore, PreferenceStore, StoreError, StyleTarget, ThemeEnvironment,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
    MediaQueryList, Storage, Window,
};
use web_time::Duration;

use crate::css;

pub(crate) fn js_reason(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

/// Attach `handler` to `event` on `target`; the guard detaches it.
pub(crate) fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> ListenerGuard {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        warn!(event, reason = %js_reason(&err), "addEventListener failed");
        return ListenerGuard::noop(event);
    }
    let target = target.clone();
    ListenerGuard::new(event, move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    })
}

pub(crate) fn media_query(window: &Window, query: &str) -> Option<MediaQueryList> {
    window.match_media(query).ok().flatten()
}

/// Whether `query` currently matches; `false` when media queries are
/// unavailable.
pub(crate) fn media_matches(window: &Window, query: &str) -> bool {
    media_query(window, query).is_some_and(|mql| mql.matches())
}

pub(crate) fn viewport(window: &Window) -> Viewport {
    let len = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(
        len(window.inner_width()),
        len(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

pub(crate) fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        if let Err(err) = style.set_property(property, value) {
            debug!(property, reason = %js_reason(&err), "style rejected");
        }
    }
}

/// Host environment for the theme controller, or `None` without a document.
pub(crate) fn theme_environment(window: &Window) -> Option<ThemeEnvironment> {
    let document = window.document()?;
    let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
    Some(ThemeEnvironment {
        store: Rc::new(LocalStorageStore::new(window)),
        appearance: Rc::new(MatchMediaAppearance {
            window: window.clone(),
        }),
        style: Rc::new(DocumentStyle {
            window: window.clone(),
            document,
            root,
        }),
    })
}

/// `localStorage`, falling back to memory when storage is blocked.
pub(crate) struct LocalStorageStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStorageStore {
    fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn!(reason = %js_reason(&err), "localStorage unavailable, using memory");
                None
            }
        };
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(|err| StoreError {
                key: key.to_owned(),
                reason: js_reason(&err),
            }),
            None => self.fallback.set(key, value),
        }
    }
}

pub(crate) struct MatchMediaAppearance {
    window: Window,
}

impl AppearanceSource for MatchMediaAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        media_query(&self.window, css::DARK_SCHEME_QUERY).map(|mql| mql.matches())
    }

    fn watch_prefers_dark(&self, on_change: Box<dyn Fn(bool)>) -> ListenerGuard {
        let Some(mql) = media_query(&self.window, css::DARK_SCHEME_QUERY) else {
            return ListenerGuard::noop("prefers-color-scheme");
        };
        let source = mql.clone();
        listen(&mql, "change", move |_| on_change(source.matches()))
    }
}

/// Publishes the theme onto `<html>`.
pub(crate) struct DocumentStyle {
    window: Window,
    document: Document,
    root: HtmlElement,
}

impl StyleTarget for DocumentStyle {
    fn set_dark_marker(&self, dark: bool) {
        let _ = self.root.class_list().toggle_with_force(css::DARK_CLASS, dark);
    }

    fn set_variable(&self, name: &str, value: &str) {
        let _ = self.root.style().set_property(name, value);
    }

    fn transition_hint(&self, duration: Duration) {
        let Some(head) = self.document.head() else {
            return;
        };
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(&css::transition_rule(duration)));
        if head.append_child(&style).is_err() {
            return;
        }
        let remove = Closure::once_into_js(move || style.remove());
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        if self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), millis)
            .is_err()
        {
            debug!("transition timer rejected");
        }
    }
}

/// Particle layer on a 2D canvas. Draws nothing without a 2D context.
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            warn!("canvas has no 2d context; particles disabled");
        }
        Self { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn resize(&self, backing: BackingSize, css_width: f64, css_height: f64) {
        self.canvas.set_width(backing.width);
        self.canvas.set_height(backing.height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &css::px(css_width));
        let _ = style.set_property("height", &css::px(css_height));
    }

    fn set_scale(&self, scale: f64) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
        }
    }

    fn clear(&self, css_width: f64, css_height: f64) {
        if let Some(ctx) = &self.ctx {
            ctx.clear_rect(0.0, 0.0, css_width, css_height);
        }
    }

    fn draw_glow(&self, glow: &Glow) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        let o = glow.origin;
        let Ok(gradient) = ctx.create_radial_gradient(o.x, o.y, 0.0, o.x, o.y, glow.gradient_radius) else {
            return;
        };
        for stop in &glow.stops {
            let _ = gradient.add_color_stop(stop.offset as f32, &stop.css());
        }
        ctx.begin_path();
        ctx.set_global_alpha(glow.alpha);
        ctx.set_fill_style_canvas_gradient(&gradient);
        if ctx.arc(glow.center.x, glow.center.y, glow.radius, 0.0, TAU).is_ok() {
            ctx.fill();
        }
    }
}

/// Curve layers as `<path>` children of an SVG stretched over the page.
pub(crate) struct SvgCurves {
    document: Document,
    svg: Element,
    container: HtmlElement,
    paths: RefCell<Vec<Element>>,
}

impl SvgCurves {
    pub(crate) fn new(document: Document, svg: Element, container: HtmlElement) -> Self {
        let _ = svg.set_attribute("viewBox", "0 0 100 100");
        let _ = svg.set_attribute("preserveAspectRatio", "none");
        let _ = svg.set_attribute("aria-hidden", "true");
        Self {
            document,
            svg,
            container,
            paths: RefCell::new(Vec::new()),
        }
    }

    fn path(&self, index: usize) -> Option<Element> {
        let mut paths = self.paths.borrow_mut();
        while paths.len() <= index {
            let path = self.document.create_element_ns(Some(css::SVG_NS), "path").ok()?;
            let _ = path.set_attribute("fill", "none");
            let _ = path.set_attribute("stroke", "currentColor");
            let _ = path.set_attribute("vector-effect", "non-scaling-stroke");
            self.svg.append_child(&path).ok()?;
            paths.push(path);
        }
        paths.get(index).cloned()
    }
}

impl CurveSink for SvgCurves {
    fn configure_layer(&self, index: usize, stroke_width: f64, opacity: f64) {
        if let Some(path) = self.path(index) {
            let _ = path.set_attribute("stroke-width", &stroke_width.to_string());
            let _ = path.set_attribute("stroke-opacity", &opacity.to_string());
        }
    }

    fn set_path(&self, index: usize, path: &SmoothPath) {
        if let Some(el) = self.paths.borrow().get(index) {
            let _ = el.set_attribute("d", &path.to_string());
        }
    }

    fn set_container_offset(&self, offset: Point) {
        let _ = self
            .container
            .style()
            .set_property("transform", &css::translate(offset));
    }
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` with owned closures.
///
/// A closure is released on cancel, or on the next request after it has
/// fired; never while it is running.
pub(crate) struct RafScheduler {
    window: Window,
    live: RefCell<HashMap<i32, RafClosure>>,
    fired: Rc<RefCell<Vec<i32>>>,
}

impl RafScheduler {
    pub(crate) fn new(window: Window) -> Self {
        Self {
            window,
            live: RefCell::new(HashMap::new()),
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn release_fired(&self) {
        let fired: Vec<i32> = self.fired.borrow_mut().drain(..).collect();
        let mut live = self.live.borrow_mut();
        for id in fired {
            live.remove(&id);
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.release_fired();
        let id = Rc::new(Cell::new(0));
        let own_id = Rc::clone(&id);
        let fired = Rc::clone(&self.fired);
        let mut callback = Some(callback);
        let closure = RafClosure::new(move |timestamp_ms: f64| {
            if let Some(callback) = callback.take() {
                callback(timestamp_ms);
            }
            fired.borrow_mut().push(own_id.get());
        });
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(raf_id) => {
                id.set(raf_id);
                self.live.borrow_mut().insert(raf_id, closure);
                FrameHandle(u64::from(raf_id.unsigned_abs()))
            }
            Err(err) => {
                warn!(reason = %js_reason(&err), "requestAnimationFrame failed");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let Ok(raf_id) = i32::try_from(handle.0) else {
            return;
        };
        if self.live.borrow_mut().remove(&raf_id).is_some() {
            let _ = self.window.cancel_animation_frame(raf_id);
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        for raf_id in self.live.get_mut().keys() {
            let _ = self.window.cancel_animation_frame(*raf_id);
        }
    }
}
