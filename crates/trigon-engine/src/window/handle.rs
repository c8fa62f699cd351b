use anyhow::{Context, Result};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

/// Returns the platform handle the swap-chain presents into.
pub fn native_handle(window: &Window) -> Result<RawWindowHandle> {
    let handle = window
        .window_handle()
        .context("window has no native handle")?;
    Ok(handle.as_raw())
}

/// Short platform name of a native handle, for diagnostics.
pub fn handle_kind(handle: &RawWindowHandle) -> &'static str {
    match handle {
        RawWindowHandle::Win32(_) => "win32",
        RawWindowHandle::WinRt(_) => "winrt",
        RawWindowHandle::AppKit(_) => "appkit",
        RawWindowHandle::UiKit(_) => "uikit",
        RawWindowHandle::Xlib(_) => "xlib",
        RawWindowHandle::Xcb(_) => "xcb",
        RawWindowHandle::Wayland(_) => "wayland",
        RawWindowHandle::AndroidNdk(_) => "android",
        RawWindowHandle::Web(_) => "web",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{WebWindowHandle, XlibWindowHandle};

    #[test]
    fn kinds_name_the_platform() {
        assert_eq!(handle_kind(&RawWindowHandle::Web(WebWindowHandle::new(1))), "web");
        assert_eq!(handle_kind(&RawWindowHandle::Xlib(XlibWindowHandle::new(7))), "xlib");
    }
}
