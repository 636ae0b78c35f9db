//! Host surface callbacks.
//!
//! A platform surface reports three events: the surface was created, its
//! size changed, and it wants a frame. [`SurfaceCallbacks`] is that
//! contract; hosts forward their platform events here and the engine maps
//! each one onto its lifecycle entry point.

use crate::backend::RenderBackend;
use crate::engine::Engine;
use crate::scene::Scene;

/// Surface lifecycle events delivered by a host, on its render thread.
///
/// Expected order: `on_surface_created` once, then any interleaving of
/// `on_surface_changed` and `on_draw_frame`. Out-of-order calls are
/// tolerated and logged.
pub trait SurfaceCallbacks {
    fn on_surface_created(&mut self);

    /// Raw host dimensions; negative or zero values are accepted.
    fn on_surface_changed(&mut self, width: i32, height: i32);

    fn on_draw_frame(&mut self);
}

impl<B: RenderBackend, S: Scene> SurfaceCallbacks for Engine<B, S> {
    #[inline]
    fn on_surface_created(&mut self) {
        self.initialize();
    }

    #[inline]
    fn on_surface_changed(&mut self, width: i32, height: i32) {
        self.resize(width, height);
    }

    #[inline]
    fn on_draw_frame(&mut self) {
        self.render_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::coords::SurfaceSize;
    use crate::scene::EmptyScene;

    fn drive(host: &mut dyn SurfaceCallbacks) {
        host.on_surface_created();
        host.on_surface_changed(800, 0);
        host.on_draw_frame();
        host.on_surface_changed(800, 600);
        host.on_draw_frame();
    }

    #[test]
    fn callbacks_drive_the_engine() {
        let mut engine = Engine::new(HeadlessBackend::new(), EmptyScene);
        drive(&mut engine);

        assert_eq!(engine.view().size, SurfaceSize::new(800, 600));
        assert_eq!(engine.stats().presented, 2);
        assert_eq!(engine.context().map(|c| c.configures), Some(2));
    }
}
