//! Rendering module
//!
//! The scene is built as a backend-agnostic display list; the 2D canvas
//! backend executes it in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasBackend;
pub use scene::{Color, DrawCommand, build_frame, colors};
