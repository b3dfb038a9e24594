//! `wasm-bindgen` exports: [`ThemeHandle`] and [`BackdropHandle`].

use std::fmt::Display;
use std::rc::Rc;

use folio_backdrop::{Backdrop, BackdropConfig, BackdropHost};
use folio_core::{ListenerGuard, Point, Viewport};
use folio_theme::{ColorMode, ThemeConfig, ThemeController, ThemeVariant};
use js_sys::{JSON, Object, Reflect};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, SvgElement};

use crate::css;
use crate::dom::{self, CanvasSurface, RafScheduler, SvgCurves};
use crate::view;

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into()) {
                if let Ok(error) = Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<js_sys::Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

/// Appearance controller for the page.
///
/// Construction reads the persisted choices, applies the palette to
/// `<html>`, and starts following the platform dark preference. Without a
/// document every method is a no-op.
#[wasm_bindgen]
pub struct ThemeHandle {
    controller: ThemeController,
}

#[wasm_bindgen]
impl ThemeHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        install_panic_hook();
        let controller = match web_sys::window().and_then(|w| dom::theme_environment(&w)) {
            Some(env) => ThemeController::new(env, ThemeConfig::default()),
            None => {
                warn!("no document; theme controller detached");
                ThemeController::detached()
            }
        };
        controller.initialize();
        Self { controller }
    }

    #[wasm_bindgen(js_name = currentMode)]
    pub fn current_mode(&self) -> String {
        self.controller.current_mode().to_string()
    }

    #[wasm_bindgen(js_name = currentVariant)]
    pub fn current_variant(&self) -> String {
        self.controller.current_variant().to_string()
    }

    #[wasm_bindgen(js_name = isDarkMode)]
    pub fn is_dark_mode(&self) -> bool {
        self.controller.is_dark_mode()
    }

    /// `"light"` or `"dark"`.
    #[wasm_bindgen(js_name = setColorMode)]
    pub fn set_color_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: ColorMode = mode.parse().map_err(js_error)?;
        self.controller.set_color_mode(mode).map_err(js_error)
    }

    /// `"modern"`, `"elegant"`, `"nature"`, or `"tech"`.
    #[wasm_bindgen(js_name = setVariant)]
    pub fn set_variant(&self, variant: &str) -> Result<(), JsValue> {
        let variant: ThemeVariant = variant.parse().map_err(js_error)?;
        self.controller.set_variant(variant).map_err(js_error)
    }

    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&self) -> Result<(), JsValue> {
        self.controller.toggle_dark_mode().map_err(js_error)
    }

    /// `{ mode, variant, isDark, colors: { "--color-primary": "#...", ... } }`
    pub fn palette(&self) -> Result<JsValue, JsValue> {
        let json = view::palette_json(self.controller.state()).map_err(js_error)?;
        JSON::parse(&json)
    }

    /// Switcher view model: toggle label plus one swatch per variant.
    pub fn switcher(&self) -> Result<JsValue, JsValue> {
        let json = view::switcher_json(self.controller.state()).map_err(js_error)?;
        JSON::parse(&json)
    }

    /// Stop following the platform preference.
    pub fn teardown(&self) {
        self.controller.teardown();
    }
}

impl Default for ThemeHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Animated backdrop bound to a container, a canvas, and an SVG element.
///
/// Mounting draws the resting curves. Call `start()` to animate; it
/// returns `false` when the platform asks for reduced motion.
#[wasm_bindgen]
pub struct BackdropHandle {
    backdrop: Option<Rc<Backdrop>>,
    listeners: Vec<ListenerGuard>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// `config_json` overrides any subset of the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        svg: SvgElement,
        config_json: Option<String>,
    ) -> Result<BackdropHandle, JsValue> {
        install_panic_hook();
        let config = match config_json.as_deref() {
            Some(json) => BackdropConfig::from_json_str(json)
                .and_then(BackdropConfig::validated)
                .map_err(js_error)?,
            None => BackdropConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let reduced_motion = dom::media_matches(&window, css::REDUCED_MOTION_QUERY);
        let styles = css::backdrop_styles(reduced_motion);
        dom::set_styles(&container, styles.container);
        dom::set_styles(&canvas, styles.canvas);

        let host = BackdropHost {
            surface: Rc::new(CanvasSurface::new(canvas)),
            curves: Rc::new(SvgCurves::new(document, svg.into(), container)),
            scheduler: Rc::new(RafScheduler::new(window.clone())),
        };
        let backdrop = Rc::new(Backdrop::mount(
            config,
            dom::viewport(&window),
            host,
            reduced_motion,
        ));

        let on_resize = {
            let weak = Rc::downgrade(&backdrop);
            let window = window.clone();
            move |_: web_sys::Event| {
                if let Some(backdrop) = weak.upgrade() {
                    backdrop.resize(dom::viewport(&window));
                }
            }
        };
        let on_pointer = {
            let weak = Rc::downgrade(&backdrop);
            move |event: web_sys::Event| {
                let (Some(backdrop), Some(event)) =
                    (weak.upgrade(), event.dyn_ref::<MouseEvent>())
                else {
                    return;
                };
                backdrop.pointer_moved(Point::new(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                ));
            }
        };
        let listeners = vec![
            dom::listen(&window, "resize", on_resize),
            dom::listen(&window, "mousemove", on_pointer),
        ];

        Ok(Self {
            backdrop: Some(backdrop),
            listeners,
        })
    }

    /// Start animating. `false` under reduced motion or after teardown.
    pub fn start(&self) -> bool {
        self.backdrop.as_ref().is_some_and(|b| b.start())
    }

    pub fn stop(&self) {
        if let Some(backdrop) = &self.backdrop {
            backdrop.stop();
        }
    }

    /// Stop, detach listeners, and release the canvas and SVG.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        if let Some(backdrop) = self.backdrop.take() {
            backdrop.stop();
        }
    }

    /// Apply an explicit viewport (CSS pixels).
    pub fn resize(&self, width: f64, height: f64, device_pixel_ratio: f64) {
        if let Some(backdrop) = &self.backdrop {
            backdrop.resize(Viewport::new(width, height, device_pixel_ratio));
        }
    }

    #[wasm_bindgen(js_name = pointerMoved)]
    pub fn pointer_moved(&self, x: f64, y: f64) {
        if let Some(backdrop) = &self.backdrop {
            backdrop.pointer_moved(Point::new(x, y));
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.backdrop.as_ref().is_some_and(|b| b.is_running())
    }

    /// `{ running, reducedMotion, particles, frames }`
    pub fn stats(&self) -> JsValue {
        let obj = Object::new();
        let Some(backdrop) = &self.backdrop else {
            set_js(&obj, "running", JsValue::from(false));
            return obj.into();
        };
        set_js(&obj, "running", JsValue::from(backdrop.is_running()));
        set_js(&obj, "reducedMotion", JsValue::from(backdrop.is_reduced_motion()));
        backdrop.with_scene(|scene| {
            set_js(&obj, "particles", JsValue::from(scene.particles().len() as u32));
            set_js(&obj, "frames", JsValue::from(scene.frames() as f64));
        });
        obj.into()
    }
}
