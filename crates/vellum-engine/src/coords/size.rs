/// Drawable surface size in physical pixels.
///
/// Both dimensions are at least one pixel. Hosts report sizes as raw signed
/// integers and may report a zero height while a surface is collapsed or
/// mid-rotation; [`SurfaceSize::clamped`] is the only way host values enter
/// the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    width: u32,
    height: u32,
}

impl SurfaceSize {
    /// Smallest representable surface.
    pub const MIN: Self = Self { width: 1, height: 1 };

    /// Creates a size from unsigned pixel counts, flooring each axis at 1.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Creates a size from raw host integers: `max(v, 1)` per axis.
    #[inline]
    pub fn clamped(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }
    }

    #[inline]
    pub const fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u32 {
        self.height
    }

    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::MIN
    }
}
