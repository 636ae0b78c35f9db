//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - expose [`Canvas`], the per-frame drawing state a [`Scene`] draws through

mod canvas;
mod cmd;
mod key;
mod list;

pub use canvas::{Canvas, DrawMode};
pub use cmd::{DrawCmd, MeshCmd};
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};

use crate::time::FrameTick;

/// Per-frame content source driven by the frame scheduler.
///
/// `draw` runs once per rendered frame with a fresh [`Canvas`]; anything
/// recorded is drawn after the surface is cleared to the canvas clear color.
pub trait Scene {
    fn draw(&mut self, canvas: &mut Canvas<'_>, tick: &FrameTick) -> anyhow::Result<()>;
}

impl<F> Scene for F
where
    F: FnMut(&mut Canvas<'_>, &FrameTick) -> anyhow::Result<()>,
{
    fn draw(&mut self, canvas: &mut Canvas<'_>, tick: &FrameTick) -> anyhow::Result<()> {
        self(canvas, tick)
    }
}

/// Scene that only clears.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScene;

impl Scene for EmptyScene {
    fn draw(&mut self, _canvas: &mut Canvas<'_>, _tick: &FrameTick) -> anyhow::Result<()> {
        Ok(())
    }
}
