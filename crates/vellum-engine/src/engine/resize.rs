use crate::coords::{SurfaceSize, ViewState};

/// Whether a resize changed the view.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    Changed,
    Unchanged,
}

/// Turns raw host surface dimensions into a [`ViewState`].
///
/// Dimensions are clamped to at least one pixel per axis before any
/// viewport math, so the aspect ratio and projection are always finite.
#[derive(Debug, Clone)]
pub struct ResizeHandler {
    view: ViewState,
}

impl ResizeHandler {
    pub fn new(initial: SurfaceSize) -> Self {
        Self {
            view: ViewState::for_size(initial),
        }
    }

    /// Applies host dimensions `width` × `height`.
    ///
    /// Repeating the same dimensions leaves the view untouched and reports
    /// `Unchanged`.
    pub fn resize(&mut self, width: i32, height: i32) -> ResizeOutcome {
        log::info!("surface changed w:{width} h:{height}");
        let size = SurfaceSize::clamped(width, height);
        let clamped = i64::from(size.width()) != i64::from(width)
            || i64::from(size.height()) != i64::from(height);
        if clamped {
            log::debug!("surface size clamped to {}x{}", size.width(), size.height());
        }

        if size == self.view.size {
            return ResizeOutcome::Unchanged;
        }
        self.view = ViewState::for_size(size);
        ResizeOutcome::Changed
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn effective_height_is_at_least_one() {
        for h in [i32::MIN, -600, -1, 0, 1, 2, 600, i32::MAX] {
            let mut r = ResizeHandler::new(SurfaceSize::MIN);
            r.resize(800, h);
            assert_eq!(i64::from(r.view().size.height()), i64::from(h.max(1)));
            assert!(r.view().is_finite(), "h = {h}");
        }
    }

    #[test]
    fn zero_height_gives_finite_aspect() {
        let mut r = ResizeHandler::new(SurfaceSize::MIN);
        r.resize(800, 0);
        assert_eq!(r.view().aspect, 800.0);
        assert!(r.view().projection.is_finite());
    }

    // ── idempotence ───────────────────────────────────────────────────────

    #[test]
    fn repeated_resize_is_unchanged() {
        let mut r = ResizeHandler::new(SurfaceSize::MIN);
        assert_eq!(r.resize(800, 600), ResizeOutcome::Changed);
        let first = *r.view();
        assert_eq!(r.resize(800, 600), ResizeOutcome::Unchanged);
        assert_eq!(*r.view(), first);
    }

    #[test]
    fn clamped_sizes_compare_equal() {
        let mut r = ResizeHandler::new(SurfaceSize::MIN);
        r.resize(800, 0);
        assert_eq!(r.resize(800, -5), ResizeOutcome::Unchanged);
        assert_eq!(r.resize(800, 1), ResizeOutcome::Unchanged);
    }
}
