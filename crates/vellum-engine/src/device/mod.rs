//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu instance, adapter, device and queue
//! - creating and configuring the surface (swapchain)
//! - acquiring frames and mapping surface errors to recovery actions

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
