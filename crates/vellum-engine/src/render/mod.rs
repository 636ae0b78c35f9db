//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and creates
//! them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in surface pixels (top-left origin, +Y down).
//! - The vertex shader maps to clip space with the view's projection.

mod batch;
mod common;
mod ctx;
mod mesh;
mod ramp;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
