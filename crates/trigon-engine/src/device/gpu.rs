use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::window::Window;

use crate::render::{RenderTarget, Viewport};

use super::{surface, GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns the wgpu core objects and the surface configuration.
///
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swap-chain) once, at the window size
/// - acquires back buffers and presents them
pub struct Gpu {
    /// Surface bound to the window; holds a strong reference to it.
    surface: wgpu::Surface<'static>,

    /// Immediate submission queue.
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    adapter: wgpu::Adapter,
    instance: wgpu::Instance,

    config: wgpu::SurfaceConfiguration,
    viewport: Viewport,
}

/// Owned pieces of a [`Gpu`], handed to the ordered teardown.
pub(crate) struct GpuParts {
    pub surface: wgpu::Surface<'static>,
    pub queue: wgpu::Queue,
    pub device: wgpu::Device,
    pub adapter: wgpu::Adapter,
    pub instance: wgpu::Instance,
}

impl Gpu {
    /// Creates the device and swap-chain for `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers on the
    /// loop thread block on it.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        let viewport = Viewport::full(size.width, size.height);
        anyhow::ensure!(
            viewport.is_valid(),
            "window has no drawable area ({}x{})",
            size.width,
            size.height
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: init.instance_flags(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!(
            "adapter: {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, &init.preferred_formats)
            .context("no supported surface formats")?;
        let present_mode = surface::choose_present_mode(&caps, init.present_mode);
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        log::info!(
            "swap-chain configured: {}x{} {:?}, {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            queue,
            device,
            adapter,
            instance,
            viewport,
            config,
        })
    }

    /// Back-buffer format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Viewport covering the whole back buffer.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Acquires the next back buffer, wraps it in `target`'s view and opens an
    /// encoder.
    pub fn begin_frame(&self, target: &RenderTarget) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = target.view(&surface_texture.texture);

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the back buffer.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Converts an acquire error into an action, reconfiguring the surface
    /// when it was lost or went stale.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(&err);
        if action == SurfaceErrorAction::Reconfigured {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }

    pub(crate) fn into_parts(self) -> GpuParts {
        GpuParts {
            surface: self.surface,
            queue: self.queue,
            device: self.device,
            adapter: self.adapter,
            instance: self.instance,
        }
    }
}
