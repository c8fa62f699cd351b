//! Contract between the platform run-loop and the application.
//!
//! The runtime owns the event loop and the window; the application owns every
//! device resource and is driven through [`App`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
