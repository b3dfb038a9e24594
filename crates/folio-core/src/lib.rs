#![forbid(unsafe_code)]

//! Shared primitives for the Folio appearance layer.
//!
//! # Role in Folio
//! `folio-core` holds the small vocabulary that both the theme controller and
//! the animated backdrop build on, without pulling in any browser bindings:
//!
//! - [`Observable`] and [`Subscription`] for explicit change notification.
//! - [`ListenerGuard`] for deterministic disposal of host event listeners.
//! - [`Viewport`] and [`Point`] geometry.
//! - [`easing`] curves and a critically damped [`Spring`].
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) because the hosting
//! page runs on one event loop.

pub mod easing;
pub mod geometry;
pub mod listener;
pub mod observable;
pub mod spring;

pub use geometry::{Point, Viewport};
pub use listener::ListenerGuard;
pub use observable::{Observable, Subscription};
pub use spring::Spring;
