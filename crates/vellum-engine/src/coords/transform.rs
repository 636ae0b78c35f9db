use glam::{Affine2, Vec2 as GVec2};

use super::Vec2;

/// 2D affine transform (user space to surface space).
///
/// Composition follows the vector-graphics convention: `translate`, `scale`
/// and `rotate` post-multiply, so the most recently applied operation acts
/// on user coordinates first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(Affine2);

impl Transform {
    pub const IDENTITY: Self = Self(Affine2::IDENTITY);

    #[inline]
    pub fn from_translation(x: f32, y: f32) -> Self {
        Self(Affine2::from_translation(GVec2::new(x, y)))
    }

    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Self(Affine2::from_scale(GVec2::new(sx, sy)))
    }

    /// Rotation by `degrees`, counter-clockwise in a y-up frame
    /// (clockwise on screen, since +Y points down).
    #[inline]
    pub fn from_rotation_degrees(degrees: f32) -> Self {
        Self(Affine2::from_angle(degrees.to_radians()))
    }

    /// Builds a transform from `[sx, shy, shx, sy, tx, ty]`.
    #[inline]
    pub fn from_cols_array(m: [f32; 6]) -> Self {
        Self(Affine2::from_cols_array(&m))
    }

    /// Returns `[sx, shy, shx, sy, tx, ty]`.
    #[inline]
    pub fn to_cols_array(self) -> [f32; 6] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[inline]
    pub fn translate(&mut self, x: f32, y: f32) {
        self.multiply(Self::from_translation(x, y));
    }

    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.multiply(Self::from_scale(sx, sy));
    }

    #[inline]
    pub fn rotate(&mut self, degrees: f32) {
        self.multiply(Self::from_rotation_degrees(degrees));
    }

    /// `self = self * rhs`.
    #[inline]
    pub fn multiply(&mut self, rhs: Transform) {
        self.0 = self.0 * rhs.0;
    }

    #[inline]
    pub fn then(self, rhs: Transform) -> Self {
        Self(self.0 * rhs.0)
    }

    #[inline]
    pub fn transform_point(self, p: Vec2) -> Vec2 {
        let out = self.0.transform_point2(GVec2::new(p.x, p.y));
        Vec2::new(out.x, out.y)
    }

    /// Uniform scale estimate; used to pick tessellation tolerance.
    #[inline]
    pub fn max_scale(self) -> f32 {
        let x = self.0.matrix2.x_axis.length();
        let y = self.0.matrix2.y_axis.length();
        x.max(y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn as_affine(&self) -> &Affine2 {
        &self.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
