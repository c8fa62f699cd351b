use std::fmt;

use crate::shader::InputSignature;

use super::vertex::VERTEX_STRIDE;

/// Describes one vertex attribute: which bytes of a [`super::Vertex`] feed
/// which shader input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputElement {
    /// Semantic name, used in diagnostics.
    pub semantic: &'static str,
    pub format: wgpu::VertexFormat,
    /// Byte offset inside the vertex.
    pub offset: u64,
    /// `@location` the element binds to in the vertex shader.
    pub shader_location: u32,
    pub step_mode: wgpu::VertexStepMode,
}

/// Position (3 × f32 at byte 0) and color (4 × f32 at byte 12), both per-vertex.
pub const INPUT_ELEMENTS: [InputElement; 2] = [
    InputElement {
        semantic: "POSITION",
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
        step_mode: wgpu::VertexStepMode::Vertex,
    },
    InputElement {
        semantic: "COLOR",
        format: wgpu::VertexFormat::Float32x4,
        offset: 12,
        shader_location: 1,
        step_mode: wgpu::VertexStepMode::Vertex,
    },
];

/// Input layout checked against a vertex shader's input signature.
#[derive(Debug, Clone)]
pub struct InputLayout {
    elements: Vec<InputElement>,
    attributes: Vec<wgpu::VertexAttribute>,
    stride: u64,
    step_mode: wgpu::VertexStepMode,
}

impl InputLayout {
    /// Builds the layout for `elements` in a buffer of `stride` bytes.
    ///
    /// Every element must fit inside the stride, share one step mode, and
    /// match a signature input of the same location and format; every
    /// signature input must be fed by an element.
    pub fn new(
        elements: &[InputElement],
        stride: u64,
        signature: &InputSignature,
    ) -> Result<Self, LayoutError> {
        let Some(first) = elements.first() else {
            return Err(LayoutError::Empty);
        };
        let step_mode = first.step_mode;

        for el in elements {
            if el.step_mode != step_mode {
                return Err(LayoutError::MixedStepModes { semantic: el.semantic });
            }
            if el.offset + el.format.size() > stride {
                return Err(LayoutError::OutOfStride {
                    semantic: el.semantic,
                    offset: el.offset,
                    stride,
                });
            }

            let Some(input) = signature.get(el.shader_location) else {
                return Err(LayoutError::NotInSignature {
                    semantic: el.semantic,
                    location: el.shader_location,
                });
            };
            if input.format != Some(el.format) {
                return Err(LayoutError::FormatMismatch {
                    semantic: el.semantic,
                    location: el.shader_location,
                    layout: el.format,
                    shader: input.format,
                });
            }
        }

        if let Some(unfed) = signature
            .iter()
            .find(|input| !elements.iter().any(|el| el.shader_location == input.location))
        {
            return Err(LayoutError::Unbound {
                location: unfed.location,
            });
        }

        let attributes = elements
            .iter()
            .map(|el| wgpu::VertexAttribute {
                format: el.format,
                offset: el.offset,
                shader_location: el.shader_location,
            })
            .collect();

        Ok(Self {
            elements: elements.to_vec(),
            attributes,
            stride,
            step_mode,
        })
    }

    /// The triangle layout ([`INPUT_ELEMENTS`], 28-byte stride).
    pub fn for_triangle(signature: &InputSignature) -> Result<Self, LayoutError> {
        Self::new(&INPUT_ELEMENTS, VERTEX_STRIDE, signature)
    }

    pub fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

/// Input layout does not fit the vertex data or the vertex shader.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    Empty,
    MixedStepModes {
        semantic: &'static str,
    },
    OutOfStride {
        semantic: &'static str,
        offset: u64,
        stride: u64,
    },
    NotInSignature {
        semantic: &'static str,
        location: u32,
    },
    FormatMismatch {
        semantic: &'static str,
        location: u32,
        layout: wgpu::VertexFormat,
        shader: Option<wgpu::VertexFormat>,
    },
    Unbound {
        location: u32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("input layout has no elements"),
            Self::MixedStepModes { semantic } => {
                write!(f, "{semantic} steps differently from the other elements of its buffer")
            }
            Self::OutOfStride { semantic, offset, stride } => {
                write!(f, "{semantic} at offset {offset} does not fit a {stride}-byte vertex")
            }
            Self::NotInSignature { semantic, location } => {
                write!(f, "{semantic} binds @location({location}), which the vertex shader does not read")
            }
            Self::FormatMismatch { semantic, location, layout, shader } => match shader {
                Some(shader) => write!(
                    f,
                    "{semantic} is {layout:?} but the vertex shader reads @location({location}) as {shader:?}"
                ),
                None => write!(
                    f,
                    "{semantic} is {layout:?} but @location({location}) has a type no vertex format can feed"
                ),
            },
            Self::Unbound { location } => {
                write!(f, "vertex shader reads @location({location}) but no input element provides it")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{VertexFormat, VertexStepMode};

    fn signature(args: &str) -> InputSignature {
        let src = format!(
            "@vertex fn main({args}) -> @builtin(position) vec4<f32> {{ return vec4<f32>(0.0); }}"
        );
        let module = naga::front::wgsl::parse_str(&src).expect("test shader parses");
        InputSignature::from_entry_point(&module, &module.entry_points[0])
    }

    fn triangle_signature() -> InputSignature {
        signature("@location(0) position: vec3<f32>, @location(1) color: vec4<f32>")
    }

    #[test]
    fn triangle_layout_has_position_and_color() {
        let layout = InputLayout::for_triangle(&triangle_signature()).unwrap();
        let els = layout.elements();
        assert_eq!(els.len(), 2);

        assert_eq!(els[0].semantic, "POSITION");
        assert_eq!(els[0].format, VertexFormat::Float32x3);
        assert_eq!(els[0].offset, 0);

        assert_eq!(els[1].semantic, "COLOR");
        assert_eq!(els[1].format, VertexFormat::Float32x4);
        assert_eq!(els[1].offset, 12);

        assert!(els.iter().all(|e| e.step_mode == VertexStepMode::Vertex));
    }

    #[test]
    fn buffer_layout_uses_28_byte_stride() {
        let layout = InputLayout::for_triangle(&triangle_signature()).unwrap();
        let buffer = layout.buffer_layout();
        assert_eq!(buffer.array_stride, 28);
        assert_eq!(buffer.step_mode, VertexStepMode::Vertex);
        assert_eq!(buffer.attributes.len(), 2);
        assert_eq!(buffer.attributes[1].offset, 12);
        assert_eq!(buffer.attributes[1].shader_location, 1);
    }

    #[test]
    fn format_mismatch_is_rejected() {
        let sig = signature("@location(0) position: vec2<f32>, @location(1) color: vec4<f32>");
        let err = InputLayout::for_triangle(&sig).unwrap_err();
        assert_eq!(
            err,
            LayoutError::FormatMismatch {
                semantic: "POSITION",
                location: 0,
                layout: VertexFormat::Float32x3,
                shader: Some(VertexFormat::Float32x2),
            }
        );
    }

    #[test]
    fn unread_element_is_rejected() {
        let sig = signature("@location(0) position: vec3<f32>");
        let err = InputLayout::for_triangle(&sig).unwrap_err();
        assert_eq!(err, LayoutError::NotInSignature { semantic: "COLOR", location: 1 });
    }

    #[test]
    fn unfed_shader_input_is_rejected() {
        let sig = signature(
            "@location(0) position: vec3<f32>, @location(1) color: vec4<f32>, @location(2) uv: vec2<f32>",
        );
        let err = InputLayout::for_triangle(&sig).unwrap_err();
        assert_eq!(err, LayoutError::Unbound { location: 2 });
    }

    #[test]
    fn element_past_stride_is_rejected() {
        let err = InputLayout::new(&INPUT_ELEMENTS, 24, &triangle_signature()).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfStride { semantic: "COLOR", .. }));
    }

    #[test]
    fn mixed_step_modes_are_rejected() {
        let mut elements = INPUT_ELEMENTS;
        elements[1].step_mode = VertexStepMode::Instance;
        let err = InputLayout::new(&elements, VERTEX_STRIDE, &triangle_signature()).unwrap_err();
        assert_eq!(err, LayoutError::MixedStepModes { semantic: "COLOR" });
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert_eq!(
            InputLayout::new(&[], VERTEX_STRIDE, &InputSignature::default()).unwrap_err(),
            LayoutError::Empty
        );
    }
}
