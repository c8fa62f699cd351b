/// Render-target view description over the swap-chain back buffer.
///
/// Created once. wgpu hands out a fresh surface texture per acquire, so the
/// view itself is bound to each back buffer through [`RenderTarget::view`];
/// format, dimension and mip range never change because the window is fixed.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    format: wgpu::TextureFormat,
}

impl RenderTarget {
    pub fn new(format: wgpu::TextureFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn descriptor(&self) -> wgpu::TextureViewDescriptor<'static> {
        wgpu::TextureViewDescriptor {
            label: Some("trigon back buffer rtv"),
            format: Some(self.format),
            dimension: Some(wgpu::TextureViewDimension::D2),
            mip_level_count: Some(1),
            array_layer_count: Some(1),
            ..Default::default()
        }
    }

    /// Creates the view over the back buffer acquired for this frame.
    pub fn view(&self, back_buffer: &wgpu::Texture) -> wgpu::TextureView {
        back_buffer.create_view(&self.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_targets_single_2d_level() {
        let target = RenderTarget::new(wgpu::TextureFormat::Rgba8Unorm);
        let desc = target.descriptor();
        assert_eq!(desc.format, Some(wgpu::TextureFormat::Rgba8Unorm));
        assert_eq!(desc.dimension, Some(wgpu::TextureViewDimension::D2));
        assert_eq!(desc.base_mip_level, 0);
        assert_eq!(desc.mip_level_count, Some(1));
    }
}
