use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowAttributes};

/// Client-area width in physical pixels.
pub const WINDOW_WIDTH: u32 = 1280;
/// Client-area height in physical pixels.
pub const WINDOW_HEIGHT: u32 = 720;

/// Window configuration.
///
/// Only the title is configurable: the client area is fixed and the window
/// cannot be resized, so the back buffer never has to be rebuilt.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Trigon".to_string(),
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    pub(crate) fn attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size())
            .with_resizable(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn default_window_is_1280x720() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.size(), PhysicalSize::new(1280, 720));
        assert_eq!(cfg.title, "Trigon");
    }

    #[test]
    fn attributes_are_fixed_size_and_titled() {
        let attrs = WindowConfig::new("triangle").attributes();
        assert_eq!(attrs.title, "triangle");
        assert!(!attrs.resizable);
        assert_eq!(
            attrs.inner_size,
            Some(Size::Physical(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT)))
        );
    }
}
