#![forbid(unsafe_code)]

//! JSON shapes handed to page scripts.

use std::collections::BTreeMap;

use folio_theme::{ThemeState, ThemeSwitcher};
use serde::Serialize;

/// Current appearance with the palette keyed by CSS variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteView {
    pub mode: &'static str,
    pub variant: &'static str,
    pub is_dark: bool,
    pub colors: BTreeMap<&'static str, String>,
}

impl PaletteView {
    #[must_use]
    pub fn for_state(state: ThemeState) -> Self {
        Self {
            mode: state.mode.as_str(),
            variant: state.variant.as_str(),
            is_dark: state.is_dark(),
            colors: state
                .palette()
                .entries()
                .map(|(key, color)| (key.css_var(), color.to_string()))
                .collect(),
        }
    }
}

pub fn palette_json(state: ThemeState) -> serde_json::Result<String> {
    serde_json::to_string(&PaletteView::for_state(state))
}

pub fn switcher_json(state: ThemeState) -> serde_json::Result<String> {
    serde_json::to_string(&ThemeSwitcher::for_state(state))
}
