use std::path::PathBuf;

use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::{RenderApp, RenderAppConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RenderAppConfig::default()
        .title("Trigon Demo")
        .shaders(shader_path("vertex.wgsl"), shader_path("pixel.wgsl"));

    let result = RenderApp::new(config).and_then(RenderApp::run);
    if let Err(e) = &result {
        log::error!("{e:#}");
    }
    result
}

/// Shader files ship next to this crate's manifest.
fn shader_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders").join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigon_engine::render::InputLayout;
    use trigon_engine::shader::ShaderPair;

    #[test]
    fn shipped_shaders_compile_and_fit_the_triangle_layout() {
        let pair = ShaderPair::load(shader_path("vertex.wgsl"), shader_path("pixel.wgsl")).unwrap();
        let layout = InputLayout::for_triangle(pair.vertex.input_signature()).unwrap();
        assert_eq!(layout.elements().len(), 2);
        assert_eq!(layout.stride(), 28);
    }
}
