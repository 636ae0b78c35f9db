use anyhow::{bail, Context as _, Result};

use crate::backend::{FrameInput, FrameStatus, RenderBackend};
use crate::coords::{SurfaceSize, ViewState};

/// Owns the backend and its GPU context for the lifetime of a surface.
///
/// The context exists between `initialize` and `teardown`. Surface
/// reconfiguration is skipped when the size did not change.
pub struct GraphicsContextManager<B: RenderBackend> {
    backend: B,
    context: Option<B::Context>,
    configured: Option<SurfaceSize>,
}

impl<B: RenderBackend> GraphicsContextManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            context: None,
            configured: None,
        }
    }

    /// Creates the GPU context at `view`'s size.
    pub fn initialize(&mut self, view: &ViewState) -> Result<()> {
        if self.context.is_some() {
            bail!("graphics context already exists");
        }
        let ctx = self.backend.create_context(view)?;
        self.context = Some(ctx);
        self.configured = Some(view.size);
        log::info!(
            "graphics context created at {}x{}",
            view.size.width(),
            view.size.height()
        );
        Ok(())
    }

    /// Reconfigures the surface for `view`. Returns false when there is no
    /// context or the size is unchanged.
    pub fn configure(&mut self, view: &ViewState) -> bool {
        let Some(ctx) = self.context.as_mut() else {
            return false;
        };
        if self.configured == Some(view.size) {
            return false;
        }
        self.backend.configure(ctx, view);
        self.configured = Some(view.size);
        true
    }

    pub fn draw(&mut self, frame: FrameInput<'_>) -> Result<FrameStatus> {
        let ctx = self.context.as_mut().context("no graphics context")?;
        self.backend.draw_frame(ctx, frame)
    }

    /// Destroys the context. No-op without one.
    pub fn teardown(&mut self) {
        if let Some(ctx) = self.context.take() {
            self.backend.destroy_context(ctx);
            log::info!("graphics context destroyed");
        }
        self.configured = None;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    #[inline]
    pub fn configured_size(&self) -> Option<SurfaceSize> {
        self.configured
    }

    #[inline]
    pub fn context(&self) -> Option<&B::Context> {
        self.context.as_ref()
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: RenderBackend> Drop for GraphicsContextManager<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
