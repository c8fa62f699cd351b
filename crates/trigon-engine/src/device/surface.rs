use super::SurfaceErrorAction;

/// Picks the first preferred format the surface supports, else its first format.
pub fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    preferred: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    preferred
        .iter()
        .copied()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

pub fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// `Fifo` is guaranteed by every backend, so it is the fallback.
pub fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

pub fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, SurfaceCapabilities, TextureFormat};

    fn caps(formats: &[TextureFormat]) -> SurfaceCapabilities {
        SurfaceCapabilities {
            formats: formats.to_vec(),
            present_modes: vec![PresentMode::Fifo, PresentMode::Mailbox],
            alpha_modes: vec![CompositeAlphaMode::Opaque],
            ..Default::default()
        }
    }

    const PREFERRED: [TextureFormat; 2] = [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];

    #[test]
    fn rgba8_wins_when_supported() {
        let c = caps(&[TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm]);
        assert_eq!(choose_surface_format(&c, &PREFERRED), Some(TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn bgra8_is_second_choice() {
        let c = caps(&[TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm]);
        assert_eq!(choose_surface_format(&c, &PREFERRED), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_supported() {
        let c = caps(&[TextureFormat::Rgb10a2Unorm]);
        assert_eq!(choose_surface_format(&c, &PREFERRED), Some(TextureFormat::Rgb10a2Unorm));
        assert_eq!(choose_surface_format(&caps(&[]), &PREFERRED), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let c = caps(&[TextureFormat::Rgba8Unorm]);
        assert_eq!(
            choose_alpha_mode(&c, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&c, None), CompositeAlphaMode::Opaque);
    }

    #[test]
    fn present_mode_falls_back_to_fifo() {
        let c = caps(&[TextureFormat::Rgba8Unorm]);
        assert_eq!(choose_present_mode(&c, PresentMode::Mailbox), PresentMode::Mailbox);
        assert_eq!(choose_present_mode(&c, PresentMode::Immediate), PresentMode::Fifo);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError;
        assert_eq!(classify_surface_error(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
