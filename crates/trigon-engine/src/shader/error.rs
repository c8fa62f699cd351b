use std::fmt;
use std::path::PathBuf;

use super::ShaderStage;

/// Fatal shader loading/compilation error.
///
/// `diagnostic` carries the compiler's rendered report (source excerpt with
/// the offending span), ready to print as-is.
#[derive(Debug)]
pub enum ShaderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        origin: String,
        diagnostic: String,
    },
    Validation {
        origin: String,
        diagnostic: String,
    },
    MissingEntryPoint {
        origin: String,
        stage: ShaderStage,
        entry: &'static str,
    },
    /// Vertex outputs and pixel inputs disagree.
    Link {
        vertex: String,
        pixel: String,
        detail: String,
    },
    /// Pixel output cannot be written to the color target.
    ColorOutput {
        origin: String,
        detail: String,
    },
}

impl ShaderError {
    /// Compiler diagnostic text, if the failure came from the compiler.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Parse { diagnostic, .. } | Self::Validation { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
            Self::Parse { origin, diagnostic } => {
                write!(f, "shader {origin} failed to compile:\n{diagnostic}")
            }
            Self::Validation { origin, diagnostic } => {
                write!(f, "shader {origin} failed validation:\n{diagnostic}")
            }
            Self::MissingEntryPoint { origin, stage, entry } => {
                write!(f, "shader {origin} has no {stage} entry point named `{entry}`")
            }
            Self::Link { vertex, pixel, detail } => {
                write!(f, "shaders {vertex} and {pixel} do not link: {detail}")
            }
            Self::ColorOutput { origin, detail } => {
                write!(f, "shader {origin} cannot write the color target: {detail}")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
