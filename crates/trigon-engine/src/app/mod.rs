//! The triangle application: owns every device resource and drives the frame
//! loop from the window runtime.

mod config;
mod render_app;
mod resources;

pub use config::RenderAppConfig;
pub use render_app::RenderApp;
