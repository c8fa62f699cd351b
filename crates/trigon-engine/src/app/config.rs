use std::path::PathBuf;

use crate::device::GpuInit;
use crate::paint::Color;
use crate::window::WindowConfig;

/// Startup configuration for [`super::RenderApp`].
#[derive(Debug, Clone)]
pub struct RenderAppConfig {
    pub window: WindowConfig,
    pub vertex_shader: PathBuf,
    pub pixel_shader: PathBuf,
    /// Clear color; can still be changed on the app until the first frame.
    pub background: Color,
    pub gpu: GpuInit,
}

impl Default for RenderAppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            vertex_shader: PathBuf::from("shaders/vertex.wgsl"),
            pixel_shader: PathBuf::from("shaders/pixel.wgsl"),
            background: Color::BACKGROUND,
            gpu: GpuInit::default(),
        }
    }
}

impl RenderAppConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn shaders(mut self, vertex: impl Into<PathBuf>, pixel: impl Into<PathBuf>) -> Self {
        self.vertex_shader = vertex.into();
        self.pixel_shader = pixel.into();
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn gpu(mut self, init: GpuInit) -> Self {
        self.gpu = init;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RenderAppConfig::default();
        assert_eq!(cfg.background, Color::rgba(0.0, 0.5, 0.35, 0.0));
        assert_eq!(cfg.vertex_shader, PathBuf::from("shaders/vertex.wgsl"));
        assert_eq!(cfg.pixel_shader, PathBuf::from("shaders/pixel.wgsl"));
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn builder_overrides() {
        let cfg = RenderAppConfig::default()
            .title("demo")
            .shaders("a.wgsl", "b.wgsl")
            .background(Color::RED);
        assert_eq!(cfg.window.title, "demo");
        assert_eq!(cfg.vertex_shader, PathBuf::from("a.wgsl"));
        assert_eq!(cfg.pixel_shader, PathBuf::from("b.wgsl"));
        assert_eq!(cfg.background, Color::RED);
    }
}
