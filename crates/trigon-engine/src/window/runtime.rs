use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};

use super::config::WindowConfig;
use super::handle::{handle_kind, native_handle};

/// Entry point for the blocking run-loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window is closed.
    ///
    /// Returns the first fatal error raised during startup (window creation or
    /// `App::on_window_ready`), otherwise `Ok(())` once the loop has exited.
    pub fn run<A: App>(config: WindowConfig, app: &mut A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

struct RuntimeState<'a, A: App> {
    config: WindowConfig,
    app: &'a mut A,

    window: Option<Arc<Window>>,
    frame_index: u64,
    closed: bool,
    error: Option<anyhow::Error>,
}

impl<'a, A: App> RuntimeState<'a, A> {
    fn new(config: WindowConfig, app: &'a mut A) -> Self {
        Self {
            config,
            app,
            window: None,
            frame_index: 0,
            closed: false,
            error: None,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(self.config.attributes())
            .context("failed to create window")?;
        let window = Arc::new(window);

        let handle = native_handle(&window)?;
        let refresh_hz = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .map(|mhz| mhz as f32 / 1000.0);
        log::info!(
            "window {:?} opened: {}x{} ({} handle, monitor refresh {})",
            self.config.title,
            window.inner_size().width,
            window.inner_size().height,
            handle_kind(&handle),
            refresh_hz.map_or_else(|| "unknown".to_string(), |hz| format!("{hz:.1} Hz")),
        );

        self.window = Some(window.clone());
        self.app
            .on_window_ready(window)
            .context("failed to initialize render resources")
    }

    /// Runs the application's teardown once, then releases the window.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if !self.closed {
            self.closed = true;
            self.app.on_close();
        }
        self.window = None;
        event_loop.exit();
    }

    fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<A: App> ApplicationHandler for RuntimeState<'_, A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.closed {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            log::error!("startup failed: {e:#}");
            self.error = Some(e);
            self.close(event_loop);
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.closed {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; Fifo presentation paces the loop.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("window closed");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                // Resizing is disabled; the platform still reports the initial size.
                log::debug!("ignoring resize to {}x{}", size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: &window,
                    },
                    frame_index: self.frame_index,
                };

                let control = self.app.on_frame(&mut ctx);
                self.frame_index = self.frame_index.wrapping_add(1);

                if control == AppControl::Exit {
                    self.close(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.closed {
            self.closed = true;
            self.app.on_close();
        }
        self.window = None;
    }
}
