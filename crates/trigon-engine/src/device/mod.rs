//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swap-chain) for the fixed-size window
//! - acquiring back buffers and presenting them

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub(crate) use gpu::GpuParts;
pub use init::GpuInit;
pub use surface::{choose_alpha_mode, choose_present_mode, choose_surface_format, classify_surface_error};
