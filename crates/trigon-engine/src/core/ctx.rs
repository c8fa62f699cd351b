use winit::window::{Window, WindowId};

/// Per-window handles passed along with each frame.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Tells the windowing system a frame is about to be presented.
    pub fn pre_present_notify(&self) {
        self.window.pre_present_notify();
    }
}

/// Per-frame context passed to [`super::App::on_frame`].
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    /// Number of frame callbacks issued before this one.
    pub frame_index: u64,
}
