#![forbid(unsafe_code)]

//! The theme controller: single source of truth for appearance.
//!
//! # Design
//!
//! [`ThemeController`] is a cheap handle (`Rc`) around an
//! [`Observable<ThemeState>`] plus the host [`ThemeEnvironment`]. Hosts build
//! one at startup and hand clones to every consumer.
//!
//! Mutations go through [`ThemeController::set_color_mode`],
//! [`ThemeController::set_variant`], and [`ThemeController::toggle_dark_mode`].
//! Each one republishes the palette to the [`StyleTarget`] and persists the
//! explicit choice. The platform appearance listener installed by
//! [`ThemeController::initialize`] only moves the mode while no explicit mode
//! is persisted, and never writes to the store.
//!
//! # Failure Modes
//!
//! - **No browser context**: [`ThemeController::detached`] has no
//!   environment; every operation is a no-op and reads return defaults.
//! - **Store write rejected**: the in-memory state and the published palette
//!   have already changed; the error is returned as [`ThemeError::Store`].
//! - **Corrupt persisted value**: treated as absent and logged at `warn`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{ListenerGuard, Observable, Subscription};
use tracing::{debug, info, warn};
use web_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::host::{StoreError, ThemeEnvironment};
use crate::palette::{ColorMode, Palette, ThemeVariant, palette};

/// Errors surfaced by theme mutations.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The preference could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Storage keys and timings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeConfig {
    /// Store key holding the explicit color mode.
    pub mode_key: String,
    /// Store key holding the explicit variant.
    pub variant_key: String,
    /// How long the transition hint stays active, in milliseconds.
    pub transition_ms: u64,
}

impl ThemeConfig {
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode_key: "folio-theme-mode".to_owned(),
            variant_key: "folio-theme-variant".to_owned(),
            transition_ms: 300,
        }
    }
}

/// Current appearance selection. Every combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThemeState {
    pub mode: ColorMode,
    pub variant: ThemeVariant,
}

impl ThemeState {
    #[must_use]
    pub const fn new(mode: ColorMode, variant: ThemeVariant) -> Self {
        Self { mode, variant }
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    #[must_use]
    pub const fn palette(&self) -> Palette {
        palette(self.mode, self.variant)
    }
}

struct ControllerInner {
    env: Option<ThemeEnvironment>,
    config: ThemeConfig,
    state: Observable<ThemeState>,
    system_watch: RefCell<Option<ListenerGuard>>,
}

/// Shared handle to the application's appearance state.
#[derive(Clone)]
pub struct ThemeController {
    inner: Rc<ControllerInner>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("attached", &self.inner.env.is_some())
            .field("state", &self.inner.state.get())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl ThemeController {
    /// Controller bound to a browser-capable host. Nothing is read or
    /// published until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(env: ThemeEnvironment, config: ThemeConfig) -> Self {
        Self::build(Some(env), config)
    }

    /// Controller for contexts without a document or store (server
    /// rendering, headless evaluation). Every operation is a no-op.
    #[must_use]
    pub fn detached() -> Self {
        Self::build(None, ThemeConfig::default())
    }

    fn build(env: Option<ThemeEnvironment>, config: ThemeConfig) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                env,
                config,
                state: Observable::new(ThemeState::default()),
                system_watch: RefCell::new(None),
            }),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.env.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// Load persisted preferences, fall back to the platform preference,
    /// start following platform changes, and publish the palette.
    ///
    /// Writes nothing to the store. Calling it again replaces the previous
    /// platform listener.
    pub fn initialize(&self) {
        let Some(env) = self.inner.env.as_ref() else {
            debug!("theme initialize skipped: no browser context");
            return;
        };

        let persisted_mode = self.persisted_mode();
        let mode = persisted_mode.unwrap_or_else(|| {
            ColorMode::from_prefers_dark(env.appearance.prefers_dark().unwrap_or(false))
        });
        let variant = self.persisted_variant().unwrap_or_default();
        let state = ThemeState::new(mode, variant);
        self.apply(state);
        self.inner.state.set(state);

        let weak = Rc::downgrade(&self.inner);
        let guard = env
            .appearance
            .watch_prefers_dark(Box::new(move |prefers_dark| {
                Self::on_platform_change(&weak, prefers_dark);
            }));
        if let Some(mut previous) = self.inner.system_watch.replace(Some(guard)) {
            previous.dispose();
        }

        info!(
            mode = %mode,
            variant = %variant,
            persisted = persisted_mode.is_some(),
            "theme initialized"
        );
    }

    fn on_platform_change(weak: &Weak<ControllerInner>, prefers_dark: bool) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let controller = Self { inner };
        if controller.persisted_mode().is_some() {
            debug!(prefers_dark, "platform appearance change ignored: explicit mode persisted");
            return;
        }
        let mode = ColorMode::from_prefers_dark(prefers_dark);
        controller.transition_hint();
        if controller.replace_state(|s| s.mode = mode) {
            info!(mode = %mode, "color mode follows platform preference");
        }
    }

    /// Set and persist the color mode.
    pub fn set_color_mode(&self, mode: ColorMode) -> Result<(), ThemeError> {
        let Some(env) = self.inner.env.as_ref() else {
            return Ok(());
        };
        self.transition_hint();
        if self.replace_state(|s| s.mode = mode) {
            info!(mode = %mode, "color mode changed");
        }
        env.store.set(&self.inner.config.mode_key, mode.as_str())?;
        Ok(())
    }

    /// Set and persist the accent variant.
    pub fn set_variant(&self, variant: ThemeVariant) -> Result<(), ThemeError> {
        let Some(env) = self.inner.env.as_ref() else {
            return Ok(());
        };
        self.transition_hint();
        if self.replace_state(|s| s.variant = variant) {
            info!(variant = %variant, "theme variant changed");
        }
        env.store
            .set(&self.inner.config.variant_key, variant.as_str())?;
        Ok(())
    }

    /// Switch to the opposite color mode.
    pub fn toggle_dark_mode(&self) -> Result<(), ThemeError> {
        self.set_color_mode(self.current_mode().opposite())
    }

    #[must_use]
    pub fn current_mode(&self) -> ColorMode {
        self.inner.state.with(|s| s.mode)
    }

    #[must_use]
    pub fn current_variant(&self) -> ThemeVariant {
        self.inner.state.with(|s| s.variant)
    }

    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.current_mode().is_dark()
    }

    #[must_use]
    pub fn state(&self) -> ThemeState {
        self.inner.state.get()
    }

    /// Palette for the current state. Pure.
    #[must_use]
    pub fn current_palette(&self) -> Palette {
        self.state().palette()
    }

    /// Observe state changes. Keep the guard alive to keep the callback.
    pub fn subscribe(&self, callback: impl Fn(&ThemeState) + 'static) -> Subscription {
        self.inner.state.subscribe(callback)
    }

    /// Stop following the platform preference.
    pub fn teardown(&self) {
        let guard = self.inner.system_watch.borrow_mut().take();
        if let Some(mut guard) = guard {
            guard.dispose();
        }
    }

    /// Whether a platform appearance listener is currently installed.
    #[must_use]
    pub fn is_watching_platform(&self) -> bool {
        self.inner
            .system_watch
            .borrow()
            .as_ref()
            .is_some_and(ListenerGuard::is_active)
    }

    fn replace_state(&self, edit: impl FnOnce(&mut ThemeState)) -> bool {
        let current = self.inner.state.get();
        let mut next = current;
        edit(&mut next);
        if next == current {
            return false;
        }
        // Publish before notifying so subscribers observe the new palette.
        self.apply(next);
        self.inner.state.set(next)
    }

    fn apply(&self, state: ThemeState) {
        let Some(env) = self.inner.env.as_ref() else {
            return;
        };
        env.style.set_dark_marker(state.is_dark());
        for (key, color) in state.palette().entries() {
            env.style.set_variable(key.css_var(), &color.to_string());
        }
    }

    fn transition_hint(&self) {
        if let Some(env) = self.inner.env.as_ref() {
            env.style.transition_hint(self.inner.config.transition());
        }
    }

    fn persisted_mode(&self) -> Option<ColorMode> {
        let env = self.inner.env.as_ref()?;
        let raw = env.store.get(&self.inner.config.mode_key)?;
        raw.parse()
            .map_err(|err| warn!(%err, "ignoring persisted color mode"))
            .ok()
    }

    fn persisted_variant(&self) -> Option<ThemeVariant> {
        let env = self.inner.env.as_ref()?;
        let raw = env.store.get(&self.inner.config.variant_key)?;
        raw.parse()
            .map_err(|err| warn!(%err, "ignoring persisted theme variant"))
            .ok()
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::detached()
    }
}
