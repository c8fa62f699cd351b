//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single fixed-size window, and drives a
//! [`crate::core::App`] from it.

mod config;
mod handle;
mod runtime;

pub use config::{WindowConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
pub use handle::{handle_kind, native_handle};
pub use runtime::Runtime;
