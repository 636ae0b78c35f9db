use vellum_engine::backend::HeadlessBackend;
use vellum_engine::coords::SurfaceSize;
use vellum_engine::paint::Color;
use vellum_engine::path::Path;
use vellum_engine::time::FrameTick;
use vellum_engine::{
    Canvas, EmptyScene, Engine, EngineError, FrameStatus, LifecycleState, SurfaceCallbacks,
};

fn ellipse_scene() -> impl FnMut(&mut Canvas<'_>, &FrameTick) -> anyhow::Result<()> {
    let ellipse = Path::ellipse(0.0, 0.0, 90.0, 50.0).expect("valid ellipse");
    move |canvas: &mut Canvas<'_>, _tick: &FrameTick| {
        let vp = canvas.viewport();
        canvas.set_clear_color(Color::WHITE);
        canvas.load_identity();
        canvas.translate(vp.width / 2.0, vp.height / 2.0);
        canvas.fill(&ellipse)?;
        Ok(())
    }
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn zero_height_then_real_size_then_frame() {
    let mut engine = Engine::new(HeadlessBackend::new(), ellipse_scene());
    engine.initialize();

    let view = engine.try_resize(800, 0).unwrap();
    assert_eq!((view.size.width(), view.size.height()), (800, 1));

    let view = engine.try_resize(800, 600).unwrap();
    assert_eq!((view.size.width(), view.size.height()), (800, 600));

    let report = engine.try_render_frame().unwrap();
    assert_eq!(report.status, FrameStatus::Presented);
    assert_eq!(report.commands, 1);

    let frame = engine.context().and_then(|c| c.last_frame.clone()).unwrap();
    assert_eq!(frame.clear, Color::WHITE);
    assert_eq!(frame.view.size, SurfaceSize::new(800, 600));
    assert!(frame.triangles > 0);
}

#[test]
fn frame_without_resize_uses_default_viewport() {
    let mut engine = Engine::new(HeadlessBackend::new(), ellipse_scene());
    engine.initialize();
    engine.render_frame();

    assert_eq!(engine.stats().presented, 1);
    assert_eq!(engine.view().size, SurfaceSize::MIN);
    assert!(engine.view().is_finite());
}

// ── properties ────────────────────────────────────────────────────────────

#[test]
fn effective_height_is_max_h_1() {
    let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
    engine.initialize();
    for h in [-4096, -1, 0, 1, 2, 37, 1080, 4096] {
        let view = engine.try_resize(320, h).unwrap();
        assert_eq!(i64::from(view.size.height()), i64::from(h.max(1)));
    }
}

#[test]
fn resize_is_idempotent() {
    let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
    engine.initialize();

    let a = engine.try_resize(1024, 768).unwrap();
    let b = engine.try_resize(1024, 768).unwrap();
    assert_eq!(a, b);
    assert_eq!(engine.context().map(|c| c.configures), Some(1));
}

#[test]
fn frames_stay_finite_after_degenerate_sizes() {
    let mut engine = Engine::new(HeadlessBackend::new(), ellipse_scene());
    engine.initialize();

    for (w, h) in [(0, 0), (800, 0), (-1, -1), (1, 0), (800, 600), (0, 600)] {
        engine.resize(w, h);
        let report = engine.try_render_frame().unwrap();
        assert_eq!(report.status, FrameStatus::Presented);
        assert!(engine.view().is_finite(), "{w}x{h}");
    }
    assert_eq!(engine.stats().failed, 0);
}

// ── lifecycle guards ──────────────────────────────────────────────────────

#[test]
fn frame_before_initialize_is_rejected() {
    let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
    let err = engine.try_render_frame().unwrap_err();
    assert!(matches!(
        err,
        EngineError::NotReady { state: LifecycleState::Uninitialized }
    ));
}

#[test]
fn double_initialize_is_rejected() {
    let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
    engine.try_initialize().unwrap();
    assert!(matches!(engine.try_initialize(), Err(EngineError::AlreadyInitialized)));
    assert_eq!(engine.backend().contexts_created(), 1);
}

#[test]
fn teardown_ends_the_lifecycle() {
    let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
    engine.on_surface_created();
    engine.on_draw_frame();
    engine.teardown();
    engine.teardown();

    assert_eq!(engine.state(), LifecycleState::TornDown);
    assert_eq!(engine.backend().contexts_destroyed(), 1);
    assert!(engine.context().is_none());
    assert!(matches!(
        engine.try_render_frame(),
        Err(EngineError::NotReady { state: LifecycleState::TornDown })
    ));
    assert!(engine.try_resize(10, 10).is_err());
    assert!(engine.try_initialize().is_err());
}

#[test]
fn backend_failure_is_reported_not_panicked() {
    let mut engine = Engine::new(HeadlessBackend::failing(), EmptyScene);
    engine.on_surface_created();
    assert_eq!(engine.state(), LifecycleState::Uninitialized);
    engine.on_draw_frame();
    assert_eq!(engine.stats().presented, 0);
}
