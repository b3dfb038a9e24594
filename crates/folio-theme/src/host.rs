#![forbid(unsafe_code)]

//! Host capabilities the theme controller consumes.
//!
//! The browser bindings in `folio-web` implement these over local storage,
//! `matchMedia`, and the document root. Tests implement them in memory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use folio_core::ListenerGuard;
use web_time::Duration;

/// A durable store rejected a write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("preference store rejected `{key}`: {reason}")]
pub struct StoreError {
    pub key: String,
    pub reason: String,
}

/// Durable key-value store for user preferences.
pub trait PreferenceStore {
    /// Stored value for `key`. Unreadable entries read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Platform appearance preference.
pub trait AppearanceSource {
    /// Whether the platform asks for a dark appearance, or `None` when it
    /// cannot tell.
    fn prefers_dark(&self) -> Option<bool>;

    /// Call `on_change` with the new preference whenever it changes. The
    /// listener lives until the returned guard is dropped.
    fn watch_prefers_dark(&self, on_change: Box<dyn Fn(bool)>) -> ListenerGuard;
}

/// Where the resolved palette is published.
pub trait StyleTarget {
    /// Toggle the dark-mode marker on the document root.
    fn set_dark_marker(&self, dark: bool);

    /// Set one CSS custom property on the document root.
    fn set_variable(&self, name: &str, value: &str);

    /// Briefly enable color transitions so the next change animates. Purely
    /// cosmetic; implementations must not block or fail.
    fn transition_hint(&self, duration: Duration);
}

/// Everything a browser-capable host provides to the controller.
#[derive(Clone)]
pub struct ThemeEnvironment {
    pub store: Rc<dyn PreferenceStore>,
    pub appearance: Rc<dyn AppearanceSource>,
    pub style: Rc<dyn StyleTarget>,
}

impl fmt::Debug for ThemeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEnvironment").finish_non_exhaustive()
    }
}

/// Session-only [`PreferenceStore`] backed by a map.
///
/// Used when the durable store is unusable (private browsing, sandboxed
/// frames) so explicit choices still hold for the lifetime of the page.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key` (builder pattern).
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new().with_entry("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b"), None);
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn store_error_display_names_key() {
        let err = StoreError {
            key: "folio-theme-mode".into(),
            reason: "QuotaExceededError".into(),
        };
        assert_eq!(
            err.to_string(),
            "preference store rejected `folio-theme-mode`: QuotaExceededError"
        );
    }
}
