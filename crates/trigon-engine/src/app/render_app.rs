use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::core::{App, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::frame::{FrameError, FrameLoop, FrameState};
use crate::paint::Color;
use crate::shader::ShaderPair;
use crate::window::{Runtime, WindowConfig};

use super::config::RenderAppConfig;
use super::resources::{DeviceResources, FrameOutcome};

/// Window + device + one triangle.
///
/// Shaders are compiled in [`RenderApp::new`], before any window exists. Device
/// resources are created when the window opens and released, in a fixed order,
/// when it closes.
///
/// The background color can be changed with
/// [`RenderApp::set_background_color`] until rendering begins. [`RenderApp::run`]
/// takes the app by value, so nothing outside the loop can reach it afterwards.
pub struct RenderApp {
    window_config: WindowConfig,
    gpu_init: GpuInit,
    shaders: ShaderPair,
    frame_loop: FrameLoop,

    resources: Option<DeviceResources>,
    fatal: Option<anyhow::Error>,
}

impl RenderApp {
    /// Compiles both shaders. Any shader error is returned here and no window
    /// is opened.
    pub fn new(config: RenderAppConfig) -> Result<Self> {
        let RenderAppConfig {
            window,
            vertex_shader,
            pixel_shader,
            background,
            gpu,
        } = config;

        let shaders = ShaderPair::load(&vertex_shader, &pixel_shader)
            .context("failed to compile shaders")?;

        let mut frame_loop = FrameLoop::default();
        frame_loop
            .set_clear_color(background)
            .context("invalid background color")?;

        Ok(Self {
            window_config: window,
            gpu_init: gpu,
            shaders,
            frame_loop,
            resources: None,
            fatal: None,
        })
    }

    pub fn background_color(&self) -> Color {
        self.frame_loop.clear_color()
    }

    /// Changes the clear color. Rejected once the first frame has begun, and
    /// for non-finite channels.
    pub fn set_background_color(&mut self, color: Color) -> Result<(), FrameError> {
        self.frame_loop.set_clear_color(color)
    }

    pub fn frame_state(&self) -> FrameState {
        self.frame_loop.state()
    }

    /// Opens the window and renders until it is closed.
    ///
    /// Returns an error when startup fails or the device fails mid-run; all
    /// resources are released either way.
    pub fn run(mut self) -> Result<()> {
        Runtime::run(self.window_config.clone(), &mut self)?;

        if let Some(err) = self.fatal.take() {
            return Err(err);
        }

        log::info!(
            "exiting after {} frames",
            self.frame_loop.frames_rendered()
        );
        Ok(())
    }
}

impl App for RenderApp {
    fn on_window_ready(&mut self, window: Arc<Window>) -> Result<()> {
        let resources = DeviceResources::create(window, self.gpu_init.clone(), &self.shaders)?;
        self.resources = Some(resources);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(resources) = self.resources.as_mut() else {
            log::error!("frame requested before device resources exist");
            return AppControl::Exit;
        };

        let clear = match self.frame_loop.begin() {
            Ok(clear) => clear,
            Err(e) => {
                log::error!("cannot begin frame: {e}");
                return AppControl::Exit;
            }
        };

        let outcome = resources.render(ctx, clear);

        let presented = matches!(outcome, FrameOutcome::Presented);
        if let Err(e) = self.frame_loop.end(presented) {
            log::error!("cannot end frame: {e}");
            return AppControl::Exit;
        }

        match outcome {
            FrameOutcome::Fatal(err) => {
                log::error!("{err:#}");
                self.fatal = Some(err);
                AppControl::Exit
            }
            FrameOutcome::Presented | FrameOutcome::Skipped => AppControl::Continue,
        }
    }

    fn on_close(&mut self) {
        self.frame_loop.close();

        let Some(resources) = self.resources.take() else {
            return;
        };

        let report = resources.teardown();
        if report.is_clean() {
            log::info!("released {} resources", report.released().len());
        } else {
            log::warn!(
                "released {} resources, {} failed",
                report.released().len(),
                report.failures().len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "@vertex fn main(@location(0) p: vec3<f32>, @location(1) c: vec4<f32>) \
                          -> @builtin(position) vec4<f32> { return vec4<f32>(p, c.a); }";
    const PIXEL: &str = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";

    fn write_shaders(tag: &str, vertex: &str, pixel: &str) -> RenderAppConfig {
        let dir = std::env::temp_dir();
        let vs = dir.join(format!("trigon-app-{}-{tag}-vs.wgsl", std::process::id()));
        let ps = dir.join(format!("trigon-app-{}-{tag}-ps.wgsl", std::process::id()));
        std::fs::write(&vs, vertex).unwrap();
        std::fs::write(&ps, pixel).unwrap();
        RenderAppConfig::default().shaders(vs, ps)
    }

    #[test]
    fn background_defaults_and_is_configurable_before_run() {
        let mut app = RenderApp::new(write_shaders("bg", VERTEX, PIXEL)).unwrap();
        assert_eq!(app.background_color(), Color::rgba(0.0, 0.5, 0.35, 0.0));
        assert_eq!(app.frame_state(), FrameState::Idle);

        app.set_background_color(Color::BLUE).unwrap();
        assert_eq!(app.background_color(), Color::BLUE);
    }

    #[test]
    fn broken_shader_fails_before_any_window() {
        let cfg = write_shaders("broken", "@vertex fn main( {", PIXEL);
        let err = RenderApp::new(cfg).err().expect("syntax error is fatal");
        let chain = format!("{err:#}");
        assert!(chain.contains("failed to compile shaders"));
        assert!(chain.contains("-broken-vs.wgsl"));
    }

    #[test]
    fn unlinked_shader_pair_fails_before_any_window() {
        let vertex = "struct Out { @builtin(position) pos: vec4<f32>, @location(0) c: vec4<f32> }
                      @vertex fn main(@location(0) p: vec3<f32>, @location(1) c: vec4<f32>) -> Out \
                      { var o: Out; o.pos = vec4<f32>(p, 1.0); o.c = c; return o; }";
        let pixel = "@fragment fn main(@location(3) uv: vec2<f32>) -> @location(0) vec2<f32> { return uv; }";
        let err = RenderApp::new(write_shaders("unlinked", vertex, pixel))
            .err()
            .expect("mismatched stages are fatal");
        let chain = format!("{err:#}");
        assert!(chain.contains("failed to compile shaders"));
        assert!(chain.contains("do not link"));
        assert!(chain.contains("@location(3)"));
    }

    #[test]
    fn non_finite_background_is_rejected() {
        let cfg = write_shaders("nan", VERTEX, PIXEL).background(Color::rgba(f32::NAN, 0.0, 0.0, 1.0));
        let err = RenderApp::new(cfg).err().expect("NaN background is rejected");
        assert!(format!("{err:#}").contains("invalid background color"));
    }

    #[test]
    fn missing_shader_file_is_reported() {
        let cfg = RenderAppConfig::default().shaders("/nonexistent/vs.wgsl", "/nonexistent/ps.wgsl");
        let err = RenderApp::new(cfg).err().expect("missing file is fatal");
        assert!(format!("{err:#}").contains("/nonexistent/vs.wgsl"));
    }

    #[test]
    fn close_without_window_is_harmless() {
        let mut app = RenderApp::new(write_shaders("close", VERTEX, PIXEL)).unwrap();
        app.on_close();
        app.on_close();
        assert_eq!(app.frame_state(), FrameState::Closed);
    }
}
