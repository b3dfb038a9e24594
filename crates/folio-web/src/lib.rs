#![forbid(unsafe_code)]

//! Browser bindings for Folio.
//!
//! Exposes two handles to page scripts via `wasm-bindgen`:
//!
//! - `ThemeHandle`: color mode and variant, persisted in `localStorage`,
//!   following `prefers-color-scheme` until the visitor chooses explicitly.
//! - `BackdropHandle`: the animated curves and particles, driven by
//!   `requestAnimationFrame`, idle under `prefers-reduced-motion`.
//!
//! ```js
//! import init, { ThemeHandle, BackdropHandle } from "./pkg/folio_web.js";
//! await init();
//! const theme = new ThemeHandle();
//! const backdrop = new BackdropHandle(container, canvas, svg);
//! backdrop.start();
//! ```
//!
//! The [`css`] and [`view`] helpers are target-independent.

pub mod css;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{BackdropHandle, ThemeHandle};
