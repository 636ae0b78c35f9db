use anyhow::{bail, Result};

use crate::coords::{SurfaceSize, ViewState};
use crate::paint::Color;
use crate::scene::DrawCmd;

use super::{FrameInput, FrameStatus, RenderBackend};

/// Backend without a GPU.
///
/// Records what each frame would have drawn. Used by tests and by hosts
/// that want to exercise the lifecycle without a display.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    fail_create: bool,
    skip_every: Option<u64>,
    contexts_created: u32,
    contexts_destroyed: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `create_context` fail, as a device without a usable
    /// adapter would.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// Reports every `n`th frame (by tick index) as skipped.
    pub fn skipping_every(n: u64) -> Self {
        Self {
            skip_every: (n > 0).then_some(n),
            ..Self::default()
        }
    }

    #[inline]
    pub fn contexts_created(&self) -> u32 {
        self.contexts_created
    }

    #[inline]
    pub fn contexts_destroyed(&self) -> u32 {
        self.contexts_destroyed
    }
}

/// Summary of one recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub index: u64,
    pub clear: Color,
    pub fills: usize,
    pub strokes: usize,
    pub triangles: usize,
    pub view: ViewState,
}

/// Headless stand-in for a GPU context.
#[derive(Debug, Clone)]
pub struct HeadlessContext {
    pub size: SurfaceSize,
    /// Surface reconfigurations since creation.
    pub configures: u32,
    /// Frames presented.
    pub frames: u64,
    pub last_frame: Option<FrameRecord>,
}

impl RenderBackend for HeadlessBackend {
    type Context = HeadlessContext;

    fn create_context(&mut self, view: &ViewState) -> Result<HeadlessContext> {
        if self.fail_create {
            bail!("headless backend configured to fail context creation");
        }
        self.contexts_created += 1;
        Ok(HeadlessContext {
            size: view.size,
            configures: 0,
            frames: 0,
            last_frame: None,
        })
    }

    fn configure(&mut self, ctx: &mut HeadlessContext, view: &ViewState) {
        ctx.size = view.size;
        ctx.configures += 1;
    }

    fn draw_frame(
        &mut self,
        ctx: &mut HeadlessContext,
        frame: FrameInput<'_>,
    ) -> Result<FrameStatus> {
        if !frame.view.is_finite() {
            let size = frame.view.size;
            bail!("non-finite view state for {}x{}", size.width(), size.height());
        }
        if frame.view.size != ctx.size {
            bail!(
                "frame view {}x{} does not match configured surface {}x{}",
                frame.view.size.width(),
                frame.view.size.height(),
                ctx.size.width(),
                ctx.size.height()
            );
        }
        if self.skip_every.is_some_and(|n| (frame.tick.index + 1) % n == 0) {
            return Ok(FrameStatus::Skipped);
        }

        let mut record = FrameRecord {
            index: frame.tick.index,
            clear: frame.clear,
            fills: 0,
            strokes: 0,
            triangles: 0,
            view: *frame.view,
        };
        for item in frame.draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Fill(cmd) => {
                    record.fills += 1;
                    record.triangles += cmd.mesh.triangle_count();
                }
                DrawCmd::Stroke(cmd) => {
                    record.strokes += 1;
                    record.triangles += cmd.mesh.triangle_count();
                }
            }
        }

        ctx.frames += 1;
        ctx.last_frame = Some(record);
        Ok(FrameStatus::Presented)
    }

    fn destroy_context(&mut self, ctx: HeadlessContext) {
        self.contexts_destroyed += 1;
        log::debug!("headless context destroyed after {} frames", ctx.frames);
    }
}
