#![forbid(unsafe_code)]

//! Drop-to-dispose guard for host event listeners.
//!
//! Host bindings (media queries, DOM events, timers) hand back a
//! [`ListenerGuard`] wrapping the code that unregisters them. Dropping the
//! guard, or calling [`ListenerGuard::dispose`], runs that code exactly once,
//! so repeated mount/unmount cycles never leak callbacks.

use std::fmt;

/// Owns the teardown action for one registered listener.
#[must_use = "dropping a ListenerGuard removes the listener immediately"]
pub struct ListenerGuard {
    dispose: Option<Box<dyn FnOnce()>>,
    label: &'static str,
}

impl ListenerGuard {
    /// Wrap `dispose`, which must unregister the listener.
    pub fn new(label: &'static str, dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
            label,
        }
    }

    /// A guard with nothing to undo, for hosts that could not register.
    pub fn noop(label: &'static str) -> Self {
        Self {
            dispose: None,
            label,
        }
    }

    /// Name given at registration, used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the teardown action has not run yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    /// Unregister now. Later calls and the eventual drop do nothing.
    pub fn dispose(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            tracing::debug!(listener = self.label, "listener disposed");
            dispose();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}
