use std::fmt;
use std::path::Path;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{InputSignature, ShaderError, StageInterface};

/// Entry point every shader file must define.
pub const ENTRY_POINT: &str = "main";

/// Location of the single color target.
pub const COLOR_TARGET_LOCATION: u32 = 0;

/// Pixel output type every color target format accepts: four float channels.
const COLOR_OUTPUT: naga::TypeInner = naga::TypeInner::Vector {
    size: naga::VectorSize::Quad,
    scalar: naga::Scalar::F32,
};

/// Fixed shader model: WGSL restricted to the capability baseline every
/// backend accepts.
const SHADER_CAPABILITIES: Capabilities = Capabilities::empty();

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    /// Fragment stage.
    Pixel,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Pixel => naga::ShaderStage::Fragment,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Vertex => "trigon vertex shader",
            Self::Pixel => "trigon pixel shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Pixel => f.write_str("pixel"),
        }
    }
}

/// WGSL source that parsed, validated and exposes a `main` entry point for its
/// stage.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    stage: ShaderStage,
    origin: String,
    source: String,
    signature: InputSignature,
    inputs: StageInterface,
    outputs: StageInterface,
}

impl CompiledShader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// File path or caller-supplied name the source came from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Vertex inputs of the entry point. Empty for pixel shaders.
    pub fn input_signature(&self) -> &InputSignature {
        &self.signature
    }

    /// `@location` arguments of the entry point.
    pub fn inputs(&self) -> &StageInterface {
        &self.inputs
    }

    /// `@location` results of the entry point.
    pub fn outputs(&self) -> &StageInterface {
        &self.outputs
    }

    /// Creates the device-side module from the already validated source.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.stage.label()),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// Reads and compiles a shader file.
pub fn compile_file(path: impl AsRef<Path>, stage: ShaderStage) -> Result<CompiledShader, ShaderError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    compile_source(path.display().to_string(), source, stage)
}

/// Compiles WGSL `source` for `stage`; `origin` names it in diagnostics.
pub fn compile_source(
    origin: impl Into<String>,
    source: String,
    stage: ShaderStage,
) -> Result<CompiledShader, ShaderError> {
    let origin = origin.into();

    let module = naga::front::wgsl::parse_str(&source).map_err(|e| ShaderError::Parse {
        origin: origin.clone(),
        diagnostic: e.emit_to_string(&source),
    })?;

    // Full validation flags: the debug-mode equivalent of the shader compiler.
    let mut validator = Validator::new(ValidationFlags::all(), SHADER_CAPABILITIES);
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            origin: origin.clone(),
            diagnostic: e.emit_to_string(&source),
        })?;

    let Some(entry) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == ENTRY_POINT && ep.stage == stage.naga())
    else {
        return Err(ShaderError::MissingEntryPoint {
            origin,
            stage,
            entry: ENTRY_POINT,
        });
    };

    let signature = match stage {
        ShaderStage::Vertex => InputSignature::from_entry_point(&module, entry),
        ShaderStage::Pixel => InputSignature::default(),
    };

    let inputs = StageInterface::inputs(&module, entry);
    let outputs = StageInterface::outputs(&module, entry);

    log::info!(
        "compiled {stage} shader {origin} ({} inputs, {} outputs)",
        inputs.len(),
        outputs.len()
    );

    Ok(CompiledShader {
        stage,
        origin,
        source,
        signature,
        inputs,
        outputs,
    })
}

/// The vertex + pixel shader pair the pipeline is built from.
#[derive(Debug, Clone)]
pub struct ShaderPair {
    pub vertex: CompiledShader,
    pub pixel: CompiledShader,
}

impl ShaderPair {
    /// Compiles both files and links them; the first failure is returned.
    pub fn load(vertex_path: impl AsRef<Path>, pixel_path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        Self::link(
            compile_file(vertex_path, ShaderStage::Vertex)?,
            compile_file(pixel_path, ShaderStage::Pixel)?,
        )
    }

    /// Pairs two compiled shaders. Every pixel input must be a vertex output
    /// with the same location, type and interpolation, and the pixel stage
    /// must write [`COLOR_TARGET_LOCATION`] as `vec4<f32>`.
    pub fn link(vertex: CompiledShader, pixel: CompiledShader) -> Result<Self, ShaderError> {
        for input in pixel.inputs().iter() {
            let detail = match vertex.outputs().get(input.location) {
                None => format!(
                    "pixel input @location({}) {} is not written by the vertex stage",
                    input.location,
                    input.type_name()
                ),
                Some(output) if !output.links_with(input) => format!(
                    "pixel input @location({}) is {} but the vertex stage writes {}",
                    input.location,
                    input.type_name(),
                    output.type_name()
                ),
                Some(_) => continue,
            };
            return Err(ShaderError::Link {
                vertex: vertex.origin.clone(),
                pixel: pixel.origin.clone(),
                detail,
            });
        }

        let color = pixel.outputs().get(COLOR_TARGET_LOCATION);
        let detail = match color {
            None => Some(format!("no output at @location({COLOR_TARGET_LOCATION})")),
            Some(slot) if slot.ty != COLOR_OUTPUT => Some(format!(
                "@location({COLOR_TARGET_LOCATION}) is {}, expected vec4<f32>",
                slot.type_name()
            )),
            Some(_) => None,
        };
        if let Some(detail) = detail {
            return Err(ShaderError::ColorOutput {
                origin: pixel.origin.clone(),
                detail,
            });
        }

        Ok(Self { vertex, pixel })
    }
}
