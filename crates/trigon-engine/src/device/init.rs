/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Back-buffer formats in order of preference.
    ///
    /// Defaults to 8-bit-per-channel RGBA, then its BGRA twin which is what most
    /// compositors hand out. Falls back to the first supported format.
    pub preferred_formats: Vec<wgpu::TextureFormat>,

    /// Present mode. `Fifo` waits for one vertical blank per present.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference; unsupported values fall back to the
    /// first mode the surface reports.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames the presentation engine may queue. `1` keeps a single back buffer
    /// in flight.
    pub desired_maximum_frame_latency: u32,

    /// Enables backend debug layers and validation.
    pub debug: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            preferred_formats: vec![
                wgpu::TextureFormat::Rgba8Unorm,
                wgpu::TextureFormat::Bgra8Unorm,
            ],
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
            debug: true,
        }
    }
}

impl GpuInit {
    pub(crate) fn instance_flags(&self) -> wgpu::InstanceFlags {
        if self.debug {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::empty()
        }
    }
}
