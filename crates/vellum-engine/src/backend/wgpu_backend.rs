use anyhow::{anyhow, Context as _, Result};

use crate::coords::ViewState;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::render::{MeshRenderer, RenderCtx, RenderTarget};

use super::{FrameInput, FrameStatus, RenderBackend};

/// Backend rendering to a window surface through wgpu.
///
/// The surface target is consumed when the context is created; a new
/// surface needs a new backend.
pub struct WgpuBackend<'w> {
    target: Option<wgpu::SurfaceTarget<'w>>,
    init: GpuInit,
}

impl<'w> WgpuBackend<'w> {
    pub fn new(target: impl Into<wgpu::SurfaceTarget<'w>>, init: GpuInit) -> Self {
        Self {
            target: Some(target.into()),
            init,
        }
    }
}

/// Live GPU state for one surface.
pub struct WgpuContext<'w> {
    gpu: Gpu<'w>,
    renderer: MeshRenderer,
}

impl<'w> WgpuContext<'w> {
    #[inline]
    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }
}

impl<'w> RenderBackend for WgpuBackend<'w> {
    type Context = WgpuContext<'w>;

    fn create_context(&mut self, view: &ViewState) -> Result<Self::Context> {
        let target = self
            .target
            .take()
            .context("surface target already consumed by an earlier context")?;

        let gpu = pollster::block_on(Gpu::new(target, view.size, self.init.clone()))
            .context("failed to create GPU context")?;

        Ok(WgpuContext {
            gpu,
            renderer: MeshRenderer::new(),
        })
    }

    fn configure(&mut self, ctx: &mut Self::Context, view: &ViewState) {
        if ctx.gpu.resize(view.size) {
            log::debug!("surface reconfigured to {}x{}", view.size.width(), view.size.height());
        }
    }

    fn draw_frame(
        &mut self,
        ctx: &mut Self::Context,
        frame: FrameInput<'_>,
    ) -> Result<FrameStatus> {
        let mut gpu_frame = match ctx.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                return match ctx.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("frame {} skipped: {reason}", frame.tick.index);
                        Ok(FrameStatus::Skipped)
                    }
                    SurfaceErrorAction::Fatal => Err(anyhow!("fatal surface error: {reason}")),
                };
            }
        };

        let triangles = {
            let rctx = RenderCtx::new(
                ctx.gpu.device(),
                ctx.gpu.queue(),
                ctx.gpu.surface_format(),
                frame.view,
            );
            let mut target = RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view);
            ctx.renderer.render(&rctx, &mut target, frame.clear, frame.draw_list)
        };

        ctx.gpu.submit(gpu_frame);
        log::trace!("frame {} presented ({triangles} triangles)", frame.tick.index);
        Ok(FrameStatus::Presented)
    }
}
