//! In-memory host fakes for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_core::ListenerGuard;
use web_time::Duration;

use crate::host::{AppearanceSource, StyleTarget};

type Watchers = Rc<RefCell<Vec<(u64, Rc<dyn Fn(bool)>)>>>;

/// Appearance source whose preference is driven by the test.
pub(crate) struct FakeAppearance {
    prefers_dark: Cell<Option<bool>>,
    watchers: Watchers,
    next_id: Cell<u64>,
}

impl FakeAppearance {
    pub(crate) fn new(prefers_dark: Option<bool>) -> Self {
        Self {
            prefers_dark: Cell::new(prefers_dark),
            watchers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(1),
        }
    }

    /// Change the preference and notify live watchers.
    pub(crate) fn emit(&self, prefers_dark: bool) {
        self.prefers_dark.set(Some(prefers_dark));
        let callbacks: Vec<Rc<dyn Fn(bool)>> = self
            .watchers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(prefers_dark);
        }
    }

    pub(crate) fn live_watchers(&self) -> usize {
        self.watchers.borrow().len()
    }
}

impl AppearanceSource for FakeAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark.get()
    }

    fn watch_prefers_dark(&self, on_change: Box<dyn Fn(bool)>) -> ListenerGuard {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.watchers.borrow_mut().push((id, Rc::from(on_change)));
        let watchers = Rc::downgrade(&self.watchers);
        ListenerGuard::new("prefers-color-scheme", move || {
            if let Some(watchers) = watchers.upgrade() {
                watchers.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

/// Style target that remembers what was published.
#[derive(Default)]
pub(crate) struct RecordingStyle {
    dark: Cell<Option<bool>>,
    variables: RefCell<BTreeMap<String, String>>,
    hints: RefCell<Vec<Duration>>,
}

impl RecordingStyle {
    pub(crate) fn dark_marker(&self) -> Option<bool> {
        self.dark.get()
    }

    pub(crate) fn variable(&self, name: &str) -> Option<String> {
        self.variables.borrow().get(name).cloned()
    }

    pub(crate) fn variable_count(&self) -> usize {
        self.variables.borrow().len()
    }

    pub(crate) fn hints(&self) -> Vec<Duration> {
        self.hints.borrow().clone()
    }
}

impl StyleTarget for RecordingStyle {
    fn set_dark_marker(&self, dark: bool) {
        self.dark.set(Some(dark));
    }

    fn set_variable(&self, name: &str, value: &str) {
        self.variables
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn transition_hint(&self, duration: Duration) {
        self.hints.borrow_mut().push(duration);
    }
}
