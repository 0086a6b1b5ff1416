//! Rendering module
//!
//! `scene` turns a [`crate::sim::GameState`] into a flat draw list without
//! touching any platform API; `canvas` paints that list onto a Canvas 2D
//! context in the browser.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{Label, Scene, Sprite, build, colors, css_color};
