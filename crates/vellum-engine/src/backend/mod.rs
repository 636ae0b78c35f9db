//! Rendering backends.
//!
//! A [`RenderBackend`] is the seam between the lifecycle engine and a
//! graphics API. The engine owns exactly one backend and at most one
//! backend context at a time:
//! - `create_context` runs on surface creation
//! - `configure` runs when the surface size actually changes
//! - `draw_frame` runs once per rendered frame
//! - `destroy_context` runs on teardown
//!
//! [`WgpuBackend`] drives a real surface; [`HeadlessBackend`] records
//! frames without a GPU.

mod headless;
mod wgpu_backend;

pub use headless::{FrameRecord, HeadlessBackend, HeadlessContext};
pub use wgpu_backend::{WgpuBackend, WgpuContext};

use crate::coords::ViewState;
use crate::paint::Color;
use crate::scene::DrawList;
use crate::time::FrameTick;

/// Everything a backend needs to produce one frame.
pub struct FrameInput<'a> {
    pub tick: FrameTick,
    pub clear: Color,
    pub draw_list: &'a mut DrawList,
    pub view: &'a ViewState,
}

/// Outcome of a frame the backend did not fail on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Drawn and presented.
    Presented,
    /// Dropped after a recoverable surface error; the next frame may succeed.
    Skipped,
}

pub trait RenderBackend {
    /// GPU context state owned by the graphics context manager.
    type Context;

    fn create_context(&mut self, view: &ViewState) -> anyhow::Result<Self::Context>;

    /// Applies a new surface size. Only called with a size that differs
    /// from the last one configured.
    fn configure(&mut self, ctx: &mut Self::Context, view: &ViewState);

    fn draw_frame(
        &mut self,
        ctx: &mut Self::Context,
        frame: FrameInput<'_>,
    ) -> anyhow::Result<FrameStatus>;

    fn destroy_context(&mut self, ctx: Self::Context) {
        drop(ctx);
    }
}
