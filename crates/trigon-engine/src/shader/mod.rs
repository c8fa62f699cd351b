//! Shader loading and front-end compilation.
//!
//! Sources are WGSL files read at startup. Each file is parsed and validated
//! with `naga` before any device exists, so syntax errors, validation errors
//! and missing entry points are reported with the compiler diagnostic and no
//! window is opened. The pair is then linked: every pixel input must be
//! written by the vertex stage with the same type, and the pixel stage must
//! write a four-channel float color at location 0.

mod compile;
mod error;
mod signature;

pub use compile::{
    compile_file, compile_source, CompiledShader, ShaderPair, ShaderStage, COLOR_TARGET_LOCATION,
    ENTRY_POINT,
};
pub use error::ShaderError;
pub use signature::{InputSignature, InterfaceSlot, SignatureInput, StageInterface, TypeName};
