use super::{Rect, SurfaceSize};

/// Viewport size in surface pixels.
///
/// Renderers treat this as the coordinate basis for converting pixel
/// positions to clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport covering a whole surface.
    #[inline]
    pub fn from_size(size: SurfaceSize) -> Self {
        Self::new(size.width() as f32, size.height() as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Height is floored at one pixel.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height.max(1.0)
    }

    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
