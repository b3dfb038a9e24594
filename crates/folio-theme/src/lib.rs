#![forbid(unsafe_code)]

//! Appearance controller for the Folio portfolio.
//!
//! # This crate provides
//! - [`ColorMode`], [`ThemeVariant`], and the pure [`palette`] derivation.
//! - [`ThemeController`], the single source of truth for appearance, which
//!   persists explicit choices, follows the platform dark preference, and
//!   publishes the palette as CSS custom properties.
//! - Host traits ([`PreferenceStore`], [`AppearanceSource`],
//!   [`StyleTarget`]) implemented by the browser bindings.
//! - [`ThemeSwitcher`], the view model for the floating switcher.
//!
//! # Example
//!
//! ```ignore
//! let theme = ThemeController::new(env, ThemeConfig::default());
//! theme.initialize();
//! theme.toggle_dark_mode()?;
//! assert!(theme.is_dark_mode());
//! ```

pub mod controller;
pub mod host;
pub mod palette;
pub mod switcher;

#[cfg(test)]
mod testing;

pub use controller::{ThemeConfig, ThemeController, ThemeError, ThemeState};
pub use host::{AppearanceSource, MemoryStore, PreferenceStore, StoreError, StyleTarget, ThemeEnvironment};
pub use palette::{
    Accents, ColorMode, Neutrals, Palette, PaletteKey, ParseThemeError, Rgb, ThemeVariant, palette,
};
pub use switcher::{ThemeSwitcher, VariantSwatch};
