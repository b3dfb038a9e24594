#![forbid(unsafe_code)]

//! View model for the floating theme switcher.
//!
//! The switcher shows one mode toggle and a swatch per variant. Each swatch
//! previews its variant as a left-to-right gradient from the variant's
//! primary color to its accent color.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::controller::ThemeState;
use crate::palette::{Rgb, ThemeVariant};

/// One selectable variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VariantSwatch {
    pub variant: ThemeVariant,
    pub gradient: [Rgb; 2],
    pub label: String,
    pub active: bool,
}

impl VariantSwatch {
    #[must_use]
    pub fn new(variant: ThemeVariant, active: bool) -> Self {
        let accents = variant.accents();
        Self {
            variant,
            gradient: [accents.primary, accents.accent],
            label: format!("Switch to {variant} theme"),
            active,
        }
    }

    /// CSS `background` value for the preview bar.
    #[must_use]
    pub fn css_gradient(&self) -> String {
        format!(
            "linear-gradient(to right, {}, {})",
            self.gradient[0], self.gradient[1]
        )
    }

    /// Button class list reflecting the active state.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        if self.active {
            "variant-button variant-button-active"
        } else {
            "variant-button variant-button-inactive"
        }
    }
}

/// Everything the switcher needs to render for one [`ThemeState`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ThemeSwitcher {
    pub is_dark: bool,
    pub mode_toggle_label: String,
    pub swatches: Vec<VariantSwatch>,
}

impl ThemeSwitcher {
    #[must_use]
    pub fn for_state(state: ThemeState) -> Self {
        let target = state.mode.opposite();
        Self {
            is_dark: state.is_dark(),
            mode_toggle_label: format!("Switch to {target} mode"),
            swatches: ThemeVariant::ALL
                .into_iter()
                .map(|variant| VariantSwatch::new(variant, variant == state.variant))
                .collect(),
        }
    }

    #[must_use]
    pub fn active_swatch(&self) -> Option<&VariantSwatch> {
        self.swatches.iter().find(|s| s.active)
    }
}
