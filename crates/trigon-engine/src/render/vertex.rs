use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// One triangle corner: NDC position followed by RGBA color, tightly packed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Byte distance between consecutive vertices (7 × `f32`).
pub const VERTEX_STRIDE: u64 = 28;

/// Vertices issued by the single non-indexed draw.
pub const TRIANGLE_VERTEX_COUNT: u32 = 3;

const _: () = assert!(std::mem::size_of::<Vertex>() as u64 == VERTEX_STRIDE);

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], color: Color) -> Self {
        Self {
            position,
            color: color.to_array(),
        }
    }
}

/// The demo triangle: red apex, green bottom-right, blue bottom-left.
pub const TRIANGLE: [Vertex; TRIANGLE_VERTEX_COUNT as usize] = [
    Vertex::new([0.0, 0.5, 0.0], Color::RED),
    Vertex::new([0.5, -0.5, 0.0], Color::GREEN),
    Vertex::new([-0.5, -0.5, 0.0], Color::BLUE),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn vertex_is_seven_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 7 * std::mem::size_of::<f32>());
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, color), 12);
    }

    #[test]
    fn triangle_upload_is_three_strides() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(TRIANGLE.len(), 3);
        assert_eq!(bytes.len() as u64, 3 * VERTEX_STRIDE);
    }

    #[test]
    fn triangle_bytes_are_interleaved() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(floats.len(), 21);
        // second vertex: position then color
        assert_eq!(&floats[7..14], &[0.5, -0.5, 0.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn draw_count_is_independent_of_vertex_data() {
        assert_eq!(TRIANGLE_VERTEX_COUNT, 3);
        assert_eq!(TRIANGLE_VERTEX_COUNT as usize, TRIANGLE.len());
    }
}
