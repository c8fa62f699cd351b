use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::core::FrameCtx;
use crate::device::{Gpu, GpuInit, GpuParts, SurfaceErrorAction};
use crate::lifecycle::{release_all, take, ResourceKind, TeardownReport};
use crate::paint::Color;
use crate::render::{RenderTarget, TriangleParts, TrianglePass};
use crate::shader::ShaderPair;

/// Result of one frame.
pub(crate) enum FrameOutcome {
    Presented,
    /// Back buffer unavailable this iteration; try again next frame.
    Skipped,
    Fatal(anyhow::Error),
}

/// Everything created against the window and device, created together before
/// the first frame and released together by [`DeviceResources::teardown`].
pub(crate) struct DeviceResources {
    window: Arc<Window>,
    gpu: Gpu,
    target: RenderTarget,
    triangle: TrianglePass,
}

impl DeviceResources {
    /// Builds device, swap-chain, render target, pipeline and vertex buffer.
    ///
    /// On failure, whatever was already built is dropped before returning.
    pub fn create(window: Arc<Window>, init: GpuInit, shaders: &ShaderPair) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window.clone(), init))
            .context("failed to create device and swap-chain")?;

        let target = RenderTarget::new(gpu.surface_format());

        let triangle = TrianglePass::new(gpu.device(), &target, shaders)
            .context("failed to create triangle pipeline")?;

        Ok(Self {
            window,
            gpu,
            target,
            triangle,
        })
    }

    pub fn render(&mut self, ctx: &FrameCtx<'_>, clear: Color) -> FrameOutcome {
        let mut frame = match self.gpu.begin_frame(&self.target) {
            Ok(frame) => frame,
            Err(err) => {
                let msg = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        FrameOutcome::Fatal(anyhow::anyhow!("back buffer acquire failed: {msg}"))
                    }
                    action => {
                        log::warn!("back buffer acquire failed ({msg}); {action:?}");
                        FrameOutcome::Skipped
                    }
                };
            }
        };

        self.triangle
            .record(&mut frame.encoder, &frame.view, clear, self.gpu.viewport());

        ctx.window.pre_present_notify();
        self.gpu.present(frame);

        FrameOutcome::Presented
    }

    /// Releases every resource once, in [`ResourceKind::RELEASE_ORDER`].
    ///
    /// The window is only dereferenced here; the run-loop drops its own handle,
    /// closing the window, after `on_close` returns.
    pub fn teardown(self) -> TeardownReport {
        let Self {
            window,
            gpu,
            target,
            triangle,
        } = self;

        let TriangleParts {
            pipeline,
            pipeline_layout,
            vertex_shader,
            pixel_shader,
            vertex_buffer,
        } = triangle.into_parts();

        let GpuParts {
            surface,
            queue,
            device,
            adapter,
            instance,
        } = gpu.into_parts();

        let mut input_layout = Some((pipeline, pipeline_layout));
        let mut vertex_buffer = Some(vertex_buffer);
        let mut vertex_shader = Some(vertex_shader);
        let mut pixel_shader = Some(pixel_shader);
        let mut target = Some(target);
        let mut surface = Some(surface);
        let mut queue = Some(queue);
        let mut device = Some(device);
        let mut window = Some(window);

        let report = release_all(|kind| {
            match kind {
                ResourceKind::InputLayout => drop(take(&mut input_layout, kind)?),
                ResourceKind::VertexBuffer => take(&mut vertex_buffer, kind)?.destroy(),
                ResourceKind::VertexShader => drop(take(&mut vertex_shader, kind)?),
                ResourceKind::PixelShader => drop(take(&mut pixel_shader, kind)?),
                ResourceKind::RenderTargetView => drop(take(&mut target, kind)?),
                ResourceKind::SwapChain => drop(take(&mut surface, kind)?),
                ResourceKind::Context => drop(take(&mut queue, kind)?),
                ResourceKind::Device => {
                    let device = take(&mut device, kind)?;
                    // Let in-flight work finish; destroy regardless.
                    let idle = device.poll(wgpu::PollType::wait_indefinitely());
                    device.destroy();
                    idle.context("device did not go idle before release")?;
                }
                ResourceKind::Window => drop(take(&mut window, kind)?),
            }
            Ok(())
        });

        drop(adapter);
        drop(instance);

        report
    }
}
