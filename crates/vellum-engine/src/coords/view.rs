use glam::Mat4;

use super::{SurfaceSize, Viewport};

/// Everything derived from the current surface size.
///
/// Built by the resize handler; read by renderers and scenes. The
/// projection maps `[0, w] × [0, h]` surface pixels (origin top-left,
/// +Y down) to clip space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub size: SurfaceSize,
    pub viewport: Viewport,
    pub aspect: f32,
    pub projection: Mat4,
}

impl ViewState {
    pub fn for_size(size: SurfaceSize) -> Self {
        let viewport = Viewport::from_size(size);
        Self {
            size,
            viewport,
            aspect: viewport.aspect(),
            projection: Mat4::orthographic_rh(0.0, viewport.width, viewport.height, 0.0, -1.0, 1.0),
        }
    }

    /// False if any derived value is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.viewport.is_valid() && self.aspect.is_finite() && self.projection.is_finite()
    }

    #[inline]
    pub fn projection_cols(&self) -> [[f32; 4]; 4] {
        self.projection.to_cols_array_2d()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::for_size(SurfaceSize::MIN)
    }
}
