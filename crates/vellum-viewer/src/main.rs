mod cli;
mod demo;
mod runtime;

use anyhow::{Context, Result};
use clap::Parser;

use vellum_engine::logging::init_logging;
use vellum_engine::{Engine, HeadlessBackend, SurfaceCallbacks};

use cli::Cli;
use demo::DemoScene;

/// Frames rendered in headless mode without `--frames`.
const HEADLESS_FRAMES: u64 = 3;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());

    if cli.headless {
        run_headless(&cli)
    } else {
        runtime::run(cli)
    }
}

/// Drives created → changed → N × draw without a window, then tears down.
fn run_headless(cli: &Cli) -> Result<()> {
    let scene = DemoScene::new().context("failed to build demo scene")?;
    let mut engine = Engine::new(HeadlessBackend::new(), scene);

    let (width, height) = cli.requested_size();
    engine.on_surface_created();
    engine.on_surface_changed(width, height);

    let frames = cli.frames.unwrap_or(HEADLESS_FRAMES);
    for _ in 0..frames {
        engine
            .try_render_frame()
            .context("headless frame failed")?;
    }

    let view = *engine.view();
    let last = engine.context().and_then(|c| c.last_frame.clone());
    engine.teardown();

    println!(
        "rendered {} frames at {}x{} (aspect {:.3})",
        engine.stats().presented,
        view.size.width(),
        view.size.height(),
        view.aspect
    );
    if let Some(frame) = last {
        println!(
            "last frame: {} fills, {} strokes, {} triangles",
            frame.fills, frame.strokes, frame.triangles
        );
    }
    Ok(())
}
