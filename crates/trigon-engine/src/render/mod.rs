//! Triangle rendering: vertex data, input layout, back-buffer target and the
//! single render pass issued every frame.
//!
//! Convention: vertex positions are already in NDC (x right, y up, z 0);
//! there is no transform stage.

mod layout;
mod target;
mod triangle;
mod vertex;
mod viewport;

pub use layout::{InputElement, InputLayout, LayoutError, INPUT_ELEMENTS};
pub use target::RenderTarget;
pub use triangle::TrianglePass;
pub(crate) use triangle::TriangleParts;
pub use vertex::{Vertex, TRIANGLE, TRIANGLE_VERTEX_COUNT, VERTEX_STRIDE};
pub use viewport::Viewport;
