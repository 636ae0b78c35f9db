//! Rendering engine lifecycle.
//!
//! ```text
//! Uninitialized ──initialize──▶ Ready ──teardown──▶ TornDown
//!                                 │ ▲
//!                     resize / render_frame
//! ```
//!
//! [`Engine`] owns the three collaborators a host surface drives:
//! - [`GraphicsContextManager`]: GPU context creation, reconfiguration, teardown
//! - [`ResizeHandler`]: clamped surface size → viewport, aspect, projection
//! - [`FrameScheduler`]: one scene draw + present per refresh
//!
//! Entry points come in two flavors. `initialize`, `resize` and
//! `render_frame` are silent: they never fail, logging precondition
//! violations at `warn` and runtime failures at `error`. The `try_*`
//! mirrors return an [`EngineError`] instead.
//!
//! The engine is single-threaded: every call comes from the host's render
//! thread, in order, through `&mut self`.

mod config;
mod context;
mod error;
mod resize;
mod scheduler;

use std::fmt;

pub use config::EngineConfig;
pub use context::GraphicsContextManager;
pub use error::EngineError;
pub use resize::{ResizeHandler, ResizeOutcome};
pub use scheduler::{FrameReport, FrameScheduler, FrameStats};

use crate::backend::RenderBackend;
use crate::coords::ViewState;
use crate::scene::Scene;

/// Where the engine is in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
    TornDown,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Ready => "ready",
            LifecycleState::TornDown => "torn down",
        })
    }
}

/// Vector-graphics engine driven by surface lifecycle callbacks.
pub struct Engine<B: RenderBackend, S: Scene> {
    state: LifecycleState,
    config: EngineConfig,
    contexts: GraphicsContextManager<B>,
    resizer: ResizeHandler,
    scheduler: FrameScheduler,
    scene: S,
}

impl<B: RenderBackend, S: Scene> Engine<B, S> {
    pub fn new(backend: B, scene: S) -> Self {
        Self::with_config(backend, scene, EngineConfig::default())
    }

    pub fn with_config(backend: B, scene: S, config: EngineConfig) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            contexts: GraphicsContextManager::new(backend),
            resizer: ResizeHandler::new(config.initial_size),
            scheduler: FrameScheduler::new(config.frame_budget),
            scene,
            config,
        }
    }

    // ── silent entry points ───────────────────────────────────────────────

    /// Surface created: establishes the GPU context.
    pub fn initialize(&mut self) {
        if let Err(err) = self.try_initialize() {
            report("initialize", &err);
        }
    }

    /// Surface changed: applies new dimensions (height clamped to ≥ 1).
    pub fn resize(&mut self, width: i32, height: i32) {
        if let Err(err) = self.try_resize(width, height) {
            report("resize", &err);
        }
    }

    /// Draw frame: renders and presents one frame.
    pub fn render_frame(&mut self) {
        if let Err(err) = self.try_render_frame() {
            report("render_frame", &err);
        }
    }

    // ── result channel ────────────────────────────────────────────────────

    pub fn try_initialize(&mut self) -> Result<(), EngineError> {
        match self.state {
            LifecycleState::Uninitialized => {}
            LifecycleState::Ready => return Err(EngineError::AlreadyInitialized),
            state @ LifecycleState::TornDown => return Err(EngineError::NotReady { state }),
        }

        self.contexts
            .initialize(self.resizer.view())
            .map_err(EngineError::Backend)?;
        self.scheduler.reset_clock();
        self.state = LifecycleState::Ready;
        log::info!("engine ready");
        Ok(())
    }

    /// Applies host dimensions and returns the resulting view.
    ///
    /// Before `initialize` the size is only recorded; the context is
    /// created at that size later.
    pub fn try_resize(&mut self, width: i32, height: i32) -> Result<ViewState, EngineError> {
        if self.state == LifecycleState::TornDown {
            return Err(EngineError::NotReady { state: self.state });
        }

        if self.resizer.resize(width, height) == ResizeOutcome::Changed {
            self.contexts.configure(self.resizer.view());
        }
        Ok(*self.resizer.view())
    }

    pub fn try_render_frame(&mut self) -> Result<FrameReport, EngineError> {
        if self.state != LifecycleState::Ready {
            return Err(EngineError::NotReady { state: self.state });
        }

        self.scheduler.render_frame(
            &mut self.contexts,
            &mut self.scene,
            self.resizer.view(),
            self.config.clear_color,
            self.config.tolerance,
        )
    }

    /// Destroys the GPU context. Further frames and resizes are rejected;
    /// repeated calls are no-ops.
    pub fn teardown(&mut self) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        self.contexts.teardown();
        self.state = LifecycleState::TornDown;
        log::info!(
            "engine torn down after {} frames",
            self.scheduler.stats().presented
        );
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        self.resizer.view()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        self.scheduler.stats()
    }

    #[inline]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    #[inline]
    pub fn backend(&self) -> &B {
        self.contexts.backend()
    }

    /// The live backend context, if any.
    #[inline]
    pub fn context(&self) -> Option<&B::Context> {
        self.contexts.context()
    }
}

fn report(op: &str, err: &EngineError) {
    if err.is_precondition() {
        log::warn!("{op} ignored: {err}");
    } else {
        log::error!("{op} failed: {err}");
    }
}
