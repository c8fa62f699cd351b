/// Linear RGBA color with straight (non-premultiplied) alpha.
///
/// Channels are written to the back buffer as-is: the surface format is a
/// plain `Unorm` target, so no sRGB conversion happens on store.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Default clear color of the demo window (teal-green, zero alpha).
    pub const BACKGROUND: Color = Color::rgba(0.0, 0.5, 0.35, 0.0);

    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Converts to the `f64` clear value used by `wgpu::LoadOp::Clear`.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BACKGROUND
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_background() {
        let c = Color::default();
        assert_eq!(c.to_array(), [0.0, 0.5, 0.35, 0.0]);
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let c = Color::rgba(0.25, 0.5, 0.75, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn from_array_keeps_channel_order() {
        assert_eq!(Color::from([1.0, 0.0, 0.0, 1.0]), Color::RED);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!Color::rgba(f32::NAN, 0.0, 0.0, 1.0).is_finite());
        assert!(Color::BACKGROUND.is_finite());
    }
}
