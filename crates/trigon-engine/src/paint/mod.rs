//! Color types shared by the frame loop and the renderer.

mod color;

pub use color::Color;
