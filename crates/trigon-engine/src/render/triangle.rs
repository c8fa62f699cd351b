use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::shader::ShaderPair;

use super::layout::InputLayout;
use super::target::RenderTarget;
use super::vertex::{TRIANGLE, TRIANGLE_VERTEX_COUNT};
use super::viewport::Viewport;

/// GPU objects for the single triangle draw.
///
/// Shaders, input layout and topology are baked into one immutable pipeline at
/// creation; the vertex buffer is uploaded once and never written again.
pub struct TrianglePass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    vertex_shader: wgpu::ShaderModule,
    pixel_shader: wgpu::ShaderModule,
    vertex_buffer: wgpu::Buffer,
}

/// Owned pieces of a [`TrianglePass`], handed to the ordered teardown.
pub(crate) struct TriangleParts {
    pub pipeline: wgpu::RenderPipeline,
    pub pipeline_layout: wgpu::PipelineLayout,
    pub vertex_shader: wgpu::ShaderModule,
    pub pixel_shader: wgpu::ShaderModule,
    pub vertex_buffer: wgpu::Buffer,
}

impl TrianglePass {
    pub fn new(device: &wgpu::Device, target: &RenderTarget, shaders: &ShaderPair) -> Result<Self> {
        let input_layout = InputLayout::for_triangle(shaders.vertex.input_signature())
            .with_context(|| {
                format!(
                    "input layout does not match vertex shader {}",
                    shaders.vertex.origin()
                )
            })?;

        // Module and pipeline validation errors are returned instead of reaching
        // the uncaptured-error handler.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_shader = shaders.vertex.create_module(device);
        let pixel_shader = shaders.pixel.create_module(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some(crate::shader::ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[input_layout.buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &pixel_shader,
                entry_point: Some(crate::shader::ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!(
                "device rejected pipeline for {} + {}: {err}",
                shaders.vertex.origin(),
                shaders.pixel.origin()
            );
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "triangle pipeline ready ({} input elements, {}-byte stride, {} vertices)",
            input_layout.elements().len(),
            input_layout.stride(),
            TRIANGLE.len(),
        );

        Ok(Self {
            pipeline,
            pipeline_layout,
            vertex_shader,
            pixel_shader,
            vertex_buffer,
        })
    }

    /// Records the frame: clear `view`, bind pipeline and vertex buffer, draw
    /// three vertices.
    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear: Color,
        viewport: &Viewport,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trigon triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        viewport.apply(&mut rpass);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..TRIANGLE_VERTEX_COUNT, 0..1);
    }

    pub(crate) fn into_parts(self) -> TriangleParts {
        TriangleParts {
            pipeline: self.pipeline,
            pipeline_layout: self.pipeline_layout,
            vertex_shader: self.vertex_shader,
            pixel_shader: self.pixel_shader,
            vertex_buffer: self.vertex_buffer,
        }
    }
}
