use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use vellum_engine::coords::SurfaceSize;
use vellum_engine::{Engine, LifecycleState, SurfaceCallbacks, WgpuBackend};

use crate::cli::{to_host, Cli};
use crate::demo::DemoScene;

/// Runs the engine in a window until it is closed or the frame limit is
/// reached.
pub fn run(cli: Cli) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut host = WindowHost::new(cli);

    event_loop
        .run_app(&mut host)
        .context("winit event loop terminated with error")?;

    host.failure.map_or(Ok(()), Err)
}

#[self_referencing]
struct Surface {
    window: Window,

    #[borrows(window)]
    #[not_covariant]
    engine: Engine<WgpuBackend<'this>, DemoScene>,
}

/// winit host: maps window events onto the engine's surface callbacks.
///
/// - `resumed`: window creation → `on_surface_created` + `on_surface_changed`
/// - `Resized` / `ScaleFactorChanged`: `on_surface_changed`
/// - `RedrawRequested`: `on_draw_frame`
struct WindowHost {
    cli: Cli,
    surface: Option<Surface>,
    failure: Option<anyhow::Error>,
}

impl WindowHost {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            surface: None,
            failure: None,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.cli.title.clone())
            .with_inner_size(PhysicalSize::new(self.cli.width.max(1), self.cli.height.max(1)));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let inner = window.inner_size();
        let config = self.cli.engine_config(SurfaceSize::new(inner.width, inner.height));
        let gpu_init = self.cli.gpu_init();
        let scene = DemoScene::new().context("failed to build demo scene")?;

        let mut surface = SurfaceBuilder {
            window,
            engine_builder: |w| Engine::with_config(WgpuBackend::new(w, gpu_init), scene, config),
        }
        .build();

        let ready = surface.with_engine_mut(|engine| {
            engine.on_surface_created();
            engine.on_surface_changed(to_host(inner.width), to_host(inner.height));
            engine.state() == LifecycleState::Ready
        });
        anyhow::ensure!(ready, "engine failed to initialize; see log for the backend error");

        surface.with_window(|w| w.request_redraw());
        self.surface = Some(surface);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.close(event_loop);
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut surface) = self.surface.take() {
            surface.with_engine_mut(|engine| engine.teardown());
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for WindowHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        if let Err(err) = self.create_surface(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // The surface target dies with the window; the next resume builds a new engine.
        if let Some(mut surface) = self.surface.take() {
            surface.with_engine_mut(|engine| engine.teardown());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw, one frame per refresh.
        if let Some(surface) = self.surface.as_ref() {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(size) => {
                surface.with_engine_mut(|engine| {
                    engine.on_surface_changed(to_host(size.width), to_host(size.height));
                });
                surface.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = surface.with_window(|w| w.inner_size());
                surface.with_engine_mut(|engine| {
                    engine.on_surface_changed(to_host(size.width), to_host(size.height));
                });
            }

            WindowEvent::RedrawRequested => {
                let limit = self.cli.frames;
                let (presented, failed) = surface.with_engine_mut(|engine| {
                    engine.on_draw_frame();
                    (engine.stats().presented, engine.stats().failed)
                });

                if failed > 0 {
                    self.fail(event_loop, anyhow::anyhow!("frame rendering failed; see log"));
                } else if limit.is_some_and(|n| presented >= n) {
                    log::info!("frame limit reached ({presented})");
                    self.close(event_loop);
                }
            }

            _ => {}
        }
    }
}
