use std::sync::Arc;

use anyhow::Result;
use winit::window::Window;

use super::ctx::FrameCtx;

/// Control directive returned by frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`crate::window::Runtime`].
pub trait App {
    /// Called once, after the window exists and before the first frame.
    ///
    /// Returning an error aborts the run-loop; the error is handed back from
    /// `Runtime::run`.
    fn on_window_ready(&mut self, window: Arc<Window>) -> Result<()>;

    /// Called once per loop iteration while the window is open.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called exactly once when the window closes or the loop exits, while the
    /// window is still alive.
    fn on_close(&mut self) {}
}
