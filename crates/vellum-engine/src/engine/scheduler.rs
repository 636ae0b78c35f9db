use std::time::{Duration, Instant};

use crate::backend::{FrameInput, FrameStatus, RenderBackend};
use crate::coords::ViewState;
use crate::paint::Color;
use crate::scene::{Canvas, DrawList, Scene};
use crate::time::{FrameClock, FrameTick};

use super::context::GraphicsContextManager;
use super::EngineError;

/// What happened to one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameReport {
    pub tick: FrameTick,
    pub status: FrameStatus,
    /// Draw commands the scene recorded.
    pub commands: usize,
    /// Wall time spent in `render_frame`.
    pub elapsed: Duration,
}

/// Running totals across frames.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub presented: u64,
    pub skipped: u64,
    pub failed: u64,
    pub over_budget: u64,
    pub last_duration: Duration,
    pub max_duration: Duration,
}

/// Drives one frame per display refresh.
///
/// Each frame: tick the clock, reset the draw list, let the scene record
/// through a fresh [`Canvas`], then hand the list to the backend to clear,
/// draw and present.
pub struct FrameScheduler {
    clock: FrameClock,
    draw_list: DrawList,
    budget: Duration,
    stats: FrameStats,
}

impl FrameScheduler {
    pub fn new(budget: Duration) -> Self {
        Self {
            clock: FrameClock::new(),
            draw_list: DrawList::new(),
            budget,
            stats: FrameStats::default(),
        }
    }

    /// Restarts frame timing, e.g. after the surface was (re)created.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn render_frame<B, S>(
        &mut self,
        contexts: &mut GraphicsContextManager<B>,
        scene: &mut S,
        view: &ViewState,
        clear_color: Color,
        tolerance: f32,
    ) -> Result<FrameReport, EngineError>
    where
        B: RenderBackend,
        S: Scene + ?Sized,
    {
        let started = Instant::now();
        let tick = self.clock.tick();

        self.draw_list.clear();
        let mut canvas = Canvas::new(&mut self.draw_list, view, clear_color, tolerance);
        let drawn = scene.draw(&mut canvas, &tick);
        let clear = canvas.finish();
        if let Err(err) = drawn {
            self.stats.failed += 1;
            return Err(EngineError::Scene(err));
        }
        let commands = self.draw_list.len();

        let status = contexts
            .draw(FrameInput {
                tick,
                clear,
                draw_list: &mut self.draw_list,
                view,
            })
            .map_err(|err| {
                self.stats.failed += 1;
                EngineError::Backend(err)
            })?;

        let elapsed = started.elapsed();
        self.record(&tick, status, elapsed);

        Ok(FrameReport {
            tick,
            status,
            commands,
            elapsed,
        })
    }

    fn record(&mut self, tick: &FrameTick, status: FrameStatus, elapsed: Duration) {
        match status {
            FrameStatus::Presented => self.stats.presented += 1,
            FrameStatus::Skipped => self.stats.skipped += 1,
        }
        self.stats.last_duration = elapsed;
        self.stats.max_duration = self.stats.max_duration.max(elapsed);

        if elapsed > self.budget {
            self.stats.over_budget += 1;
            log::debug!(
                "frame {} took {:.2}ms (budget {:.2}ms)",
                tick.index,
                elapsed.as_secs_f64() * 1000.0,
                self.budget.as_secs_f64() * 1000.0
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::coords::SurfaceSize;
    use crate::path::Path;
    use crate::scene::EmptyScene;

    fn ready(view: &ViewState) -> GraphicsContextManager<HeadlessBackend> {
        let mut gcm = GraphicsContextManager::new(HeadlessBackend::new());
        gcm.initialize(view).unwrap();
        gcm
    }

    #[test]
    fn frame_records_scene_commands() {
        let view = ViewState::for_size(SurfaceSize::new(320, 240));
        let mut gcm = ready(&view);
        let mut sched = FrameScheduler::new(Duration::from_secs(1));
        let ellipse = Path::ellipse(0.0, 0.0, 90.0, 50.0).unwrap();

        let mut scene = |canvas: &mut Canvas<'_>, _tick: &FrameTick| -> anyhow::Result<()> {
            canvas.translate(160.0, 120.0);
            canvas.fill(&ellipse)?;
            Ok(())
        };

        let report = sched
            .render_frame(&mut gcm, &mut scene, &view, Color::WHITE, 0.25)
            .unwrap();
        assert_eq!(report.status, FrameStatus::Presented);
        assert_eq!(report.commands, 1);
        assert_eq!(report.tick.index, 0);

        let last = gcm.context().and_then(|c| c.last_frame.clone()).unwrap();
        assert_eq!(last.fills, 1);
        assert_eq!(last.clear, Color::WHITE);
        assert!(last.triangles > 0);
    }

    #[test]
    fn draw_list_is_reset_between_frames() {
        let view = ViewState::default();
        let mut gcm = ready(&view);
        let mut sched = FrameScheduler::new(Duration::from_secs(1));
        let rect = Path::rect(0.0, 0.0, 1.0, 1.0).unwrap();
        let mut scene = |canvas: &mut Canvas<'_>, _tick: &FrameTick| -> anyhow::Result<()> {
            canvas.fill(&rect)?;
            Ok(())
        };

        for _ in 0..3 {
            let report = sched
                .render_frame(&mut gcm, &mut scene, &view, Color::WHITE, 0.25)
                .unwrap();
            assert_eq!(report.commands, 1);
        }
        assert_eq!(sched.stats().presented, 3);
    }

    #[test]
    fn scene_error_fails_the_frame() {
        let view = ViewState::default();
        let mut gcm = ready(&view);
        let mut sched = FrameScheduler::new(Duration::from_secs(1));
        let mut scene = |_canvas: &mut Canvas<'_>, _tick: &FrameTick| -> anyhow::Result<()> {
            Err(anyhow!("boom"))
        };

        let err = sched
            .render_frame(&mut gcm, &mut scene, &view, Color::WHITE, 0.25)
            .unwrap_err();
        assert!(matches!(err, EngineError::Scene(_)));
        assert_eq!(sched.stats().failed, 1);
        assert_eq!(gcm.context().map(|c| c.frames), Some(0));
    }

    #[test]
    fn skipped_frames_are_counted() {
        let view = ViewState::default();
        let mut gcm = GraphicsContextManager::new(HeadlessBackend::skipping_every(2));
        gcm.initialize(&view).unwrap();
        let mut sched = FrameScheduler::new(Duration::from_secs(1));

        for _ in 0..4 {
            sched.render_frame(&mut gcm, &mut EmptyScene, &view, Color::WHITE, 0.25).unwrap();
        }
        assert_eq!(sched.stats().presented, 2);
        assert_eq!(sched.stats().skipped, 2);
    }

    #[test]
    fn zero_budget_counts_every_frame_as_slow() {
        let view = ViewState::default();
        let mut gcm = ready(&view);
        let mut sched = FrameScheduler::new(Duration::ZERO);
        sched.render_frame(&mut gcm, &mut EmptyScene, &view, Color::WHITE, 0.25).unwrap();
        assert_eq!(sched.stats().over_budget, 1);
    }
}
