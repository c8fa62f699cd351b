use std::fmt;

use naga::{Binding, Handle, Interpolation, Module, Sampling, Scalar, Type, TypeInner, VectorSize};

/// One `@location` input of a vertex entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureInput {
    /// Argument or struct member name, when the source names it.
    pub name: Option<String>,
    pub location: u32,
    /// `None` when the declared type cannot be fed from a vertex buffer.
    pub format: Option<wgpu::VertexFormat>,
}

/// Input signature of a vertex entry point, ordered by location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSignature {
    inputs: Vec<SignatureInput>,
}

impl InputSignature {
    /// Collects the `@location` inputs of `entry`, descending into struct
    /// arguments. Built-ins such as `@builtin(vertex_index)` are skipped.
    pub fn from_entry_point(module: &Module, entry: &naga::EntryPoint) -> Self {
        let inputs = StageInterface::inputs(module, entry)
            .slots
            .into_iter()
            .map(|slot| SignatureInput {
                format: vertex_format(&slot.ty),
                name: slot.name,
                location: slot.location,
            })
            .collect();
        Self { inputs }
    }

    pub fn get(&self, location: u32) -> Option<&SignatureInput> {
        self.inputs.iter().find(|i| i.location == location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureInput> {
        self.inputs.iter()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// One `@location` value crossing a stage boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceSlot {
    pub name: Option<String>,
    pub location: u32,
    pub ty: TypeInner,
    pub interpolation: Option<Interpolation>,
    pub sampling: Option<Sampling>,
}

impl InterfaceSlot {
    /// Same location, type and interpolation as `other`.
    pub fn links_with(&self, other: &InterfaceSlot) -> bool {
        self.location == other.location
            && self.ty == other.ty
            && self.interpolation == other.interpolation
            && self.sampling == other.sampling
    }

    pub fn type_name(&self) -> TypeName<'_> {
        TypeName(&self.ty)
    }
}

/// `@location` inputs or outputs of an entry point, ordered by location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageInterface {
    slots: Vec<InterfaceSlot>,
}

impl StageInterface {
    /// Arguments of `entry`, struct members flattened, built-ins skipped.
    pub fn inputs(module: &Module, entry: &naga::EntryPoint) -> Self {
        let mut slots = Vec::new();
        for arg in &entry.function.arguments {
            collect(module, arg.ty, arg.binding.as_ref(), arg.name.as_deref(), &mut slots);
        }
        Self::sorted(slots)
    }

    /// Result of `entry`, struct members flattened, built-ins skipped.
    pub fn outputs(module: &Module, entry: &naga::EntryPoint) -> Self {
        let mut slots = Vec::new();
        if let Some(result) = &entry.function.result {
            collect(module, result.ty, result.binding.as_ref(), None, &mut slots);
        }
        Self::sorted(slots)
    }

    fn sorted(mut slots: Vec<InterfaceSlot>) -> Self {
        slots.sort_by_key(|s| s.location);
        Self { slots }
    }

    pub fn get(&self, location: u32) -> Option<&InterfaceSlot> {
        self.slots.iter().find(|s| s.location == location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn collect(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    name: Option<&str>,
    out: &mut Vec<InterfaceSlot>,
) {
    match binding {
        Some(Binding::Location {
            location,
            interpolation,
            sampling,
            ..
        }) => out.push(InterfaceSlot {
            name: name.map(str::to_owned),
            location: *location,
            ty: module.types[ty].inner.clone(),
            interpolation: *interpolation,
            sampling: *sampling,
        }),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect(module, member.ty, member.binding.as_ref(), member.name.as_deref(), out);
                }
            }
        }
    }
}

/// WGSL spelling of a scalar or vector interface type.
pub struct TypeName<'a>(&'a TypeInner);

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            TypeInner::Scalar(scalar) => f.write_str(scalar_name(scalar)),
            TypeInner::Vector { size, scalar } => {
                write!(f, "vec{}<{}>", size as u8, scalar_name(scalar))
            }
            ref other => write!(f, "{other:?}"),
        }
    }
}

fn scalar_name(scalar: Scalar) -> &'static str {
    if scalar == Scalar::F32 {
        "f32"
    } else if scalar == Scalar::U32 {
        "u32"
    } else if scalar == Scalar::I32 {
        "i32"
    } else if scalar == Scalar::F16 {
        "f16"
    } else {
        "?"
    }
}

fn vertex_format(inner: &TypeInner) -> Option<wgpu::VertexFormat> {
    use wgpu::VertexFormat as F;

    let (scalar, components) = match *inner {
        TypeInner::Scalar(scalar) => (scalar, 1),
        TypeInner::Vector { size, scalar } => {
            let n = match size {
                VectorSize::Bi => 2,
                VectorSize::Tri => 3,
                VectorSize::Quad => 4,
            };
            (scalar, n)
        }
        _ => return None,
    };

    let formats = if scalar == Scalar::F32 {
        [F::Float32, F::Float32x2, F::Float32x3, F::Float32x4]
    } else if scalar == Scalar::U32 {
        [F::Uint32, F::Uint32x2, F::Uint32x3, F::Uint32x4]
    } else if scalar == Scalar::I32 {
        [F::Sint32, F::Sint32x2, F::Sint32x3, F::Sint32x4]
    } else {
        return None;
    };
    Some(formats[components - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::VertexFormat;

    fn signature(src: &str) -> InputSignature {
        let module = naga::front::wgsl::parse_str(src).expect("test shader parses");
        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == "main")
            .expect("test shader has main");
        InputSignature::from_entry_point(&module, entry)
    }

    #[test]
    fn argument_locations_are_collected() {
        let sig = signature(
            "@vertex fn main(@location(1) color: vec4<f32>, @location(0) position: vec3<f32>) \
             -> @builtin(position) vec4<f32> { return vec4<f32>(position, color.a); }",
        );
        assert_eq!(sig.len(), 2);
        let first = sig.iter().next().unwrap();
        assert_eq!(first.location, 0);
        assert_eq!(first.name.as_deref(), Some("position"));
        assert_eq!(first.format, Some(VertexFormat::Float32x3));
        assert_eq!(sig.get(1).unwrap().format, Some(VertexFormat::Float32x4));
    }

    #[test]
    fn struct_members_and_builtins() {
        let sig = signature(
            "struct In { @location(0) p: vec2<f32>, @builtin(vertex_index) i: u32, @location(3) id: u32 }
             @vertex fn main(v: In) -> @builtin(position) vec4<f32> { return vec4<f32>(v.p, 0.0, 1.0); }",
        );
        assert_eq!(sig.len(), 2);
        assert_eq!(sig.get(0).unwrap().format, Some(VertexFormat::Float32x2));
        assert_eq!(sig.get(3).unwrap().format, Some(VertexFormat::Uint32));
    }

    fn interface(src: &str, stage: naga::ShaderStage) -> (StageInterface, StageInterface) {
        let module = naga::front::wgsl::parse_str(src).expect("test shader parses");
        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == "main" && ep.stage == stage)
            .expect("test shader has main");
        (StageInterface::inputs(&module, entry), StageInterface::outputs(&module, entry))
    }

    #[test]
    fn vertex_outputs_skip_position() {
        let (_, outputs) = interface(
            "struct Out { @builtin(position) pos: vec4<f32>, @location(0) color: vec4<f32> }
             @vertex fn main() -> Out { var o: Out; return o; }",
            naga::ShaderStage::Vertex,
        );
        assert_eq!(outputs.len(), 1);
        let color = outputs.get(0).unwrap();
        assert_eq!(color.name.as_deref(), Some("color"));
        assert_eq!(color.type_name().to_string(), "vec4<f32>");
    }

    #[test]
    fn fragment_inputs_and_output() {
        let (inputs, outputs) = interface(
            "@fragment fn main(@location(2) uv: vec2<f32>) -> @location(0) vec4<f32> \
             { return vec4<f32>(uv, 0.0, 1.0); }",
            naga::ShaderStage::Fragment,
        );
        assert_eq!(inputs.get(2).unwrap().type_name().to_string(), "vec2<f32>");
        assert!(inputs.get(2).unwrap().links_with(inputs.get(2).unwrap()));
        assert_eq!(outputs.get(0).unwrap().type_name().to_string(), "vec4<f32>");
    }

    #[test]
    fn no_inputs_is_empty() {
        let sig = signature(
            "@vertex fn main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> \
             { return vec4<f32>(f32(i), 0.0, 0.0, 1.0); }",
        );
        assert!(sig.is_empty());
    }
}
