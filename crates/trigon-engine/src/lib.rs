//! Trigon engine crate.
//!
//! Opens one fixed-size window, sets up a wgpu device and swap-chain, compiles
//! a vertex/pixel shader pair and draws a single triangle every frame.
//!
//! Setup order: window → device + swap-chain → render target + viewport →
//! shaders + input layout → vertex buffer → frame loop. Teardown runs the
//! other way round (see [`lifecycle`]).

pub mod app;
pub mod core;
pub mod device;
pub mod frame;
pub mod lifecycle;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod window;

pub use app::{RenderApp, RenderAppConfig};
