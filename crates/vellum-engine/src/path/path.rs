use std::cell::RefCell;
use std::sync::Arc;

use crate::coords::{Rect, Vec2};

use super::builder::PathBuilder;
use super::tessellate::{self, quantize_tolerance};
use super::{FillRule, Mesh, PathError, StrokeStyle};

/// Immutable vector path in user space.
///
/// Fill and stroke tessellations are cached on the path and rebuilt only
/// when the requested fill rule, stroke style, or (quantized) tolerance
/// changes. Paths are meant to be built once and drawn every frame.
#[derive(Debug, Clone)]
pub struct Path {
    inner: lyon::path::Path,
    bounds: Option<Rect>,
    cache: RefCell<MeshCache>,
}

#[derive(Debug, Clone, Default)]
struct MeshCache {
    fill: Option<(FillRule, u32, Arc<Mesh>)>,
    stroke: Option<(StrokeStyle, u32, Arc<Mesh>)>,
}

impl Path {
    #[inline]
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Closed ellipse centered at `(cx, cy)` with the given diameters.
    pub fn ellipse(cx: f32, cy: f32, width: f32, height: f32) -> Result<Path, PathError> {
        let mut b = PathBuilder::new();
        b.add_ellipse(cx, cy, width, height)?;
        b.build()
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Result<Path, PathError> {
        let mut b = PathBuilder::new();
        b.add_rect(x, y, width, height)?;
        b.build()
    }

    pub fn round_rect(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        arc_width: f32,
        arc_height: f32,
    ) -> Result<Path, PathError> {
        let mut b = PathBuilder::new();
        b.add_round_rect(x, y, width, height, arc_width, arc_height)?;
        b.build()
    }

    pub fn line(from: Vec2, to: Vec2) -> Result<Path, PathError> {
        let mut b = PathBuilder::new();
        b.add_line(from, to)?;
        b.build()
    }

    pub fn polygon(points: &[Vec2], closed: bool) -> Result<Path, PathError> {
        let mut b = PathBuilder::new();
        b.add_polygon(points, closed)?;
        b.build()
    }

    pub(super) fn from_lyon(inner: lyon::path::Path) -> Self {
        let bounds = if inner.iter().next().is_some() {
            let b = lyon::algorithms::aabb::bounding_box(&inner);
            Some(Rect::from_min_max(b.min.into(), b.max.into()))
        } else {
            None
        };

        Self {
            inner,
            bounds,
            cache: RefCell::new(MeshCache::default()),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Exact bounds of the geometry (curves included), `None` when empty.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    #[inline]
    pub fn as_lyon(&self) -> &lyon::path::Path {
        &self.inner
    }

    /// Interior triangulation under `rule`.
    ///
    /// `tolerance` is the maximum distance, in user units, between the
    /// curves and their flattened approximation.
    pub fn fill_mesh(&self, rule: FillRule, tolerance: f32) -> Result<Arc<Mesh>, PathError> {
        let tol = quantize_tolerance(tolerance);
        let key = tol.to_bits();

        if let Some((r, k, mesh)) = &self.cache.borrow().fill {
            if *r == rule && *k == key {
                return Ok(Arc::clone(mesh));
            }
        }

        let mesh = Arc::new(tessellate::fill(&self.inner, rule, tol)?);
        self.cache.borrow_mut().fill = Some((rule, key, Arc::clone(&mesh)));
        Ok(mesh)
    }

    /// Outline triangulation for `style`.
    pub fn stroke_mesh(&self, style: &StrokeStyle, tolerance: f32) -> Result<Arc<Mesh>, PathError> {
        let tol = quantize_tolerance(tolerance);
        let key = tol.to_bits();

        if let Some((s, k, mesh)) = &self.cache.borrow().stroke {
            if s == style && *k == key {
                return Ok(Arc::clone(mesh));
            }
        }

        let mesh = Arc::new(tessellate::stroke(&self.inner, style, tol)?);
        self.cache.borrow_mut().stroke = Some((*style, key, Arc::clone(&mesh)));
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    // ── fill ──────────────────────────────────────────────────────────────

    #[test]
    fn ellipse_fill_covers_its_area() {
        let path = Path::ellipse(0.0, 0.0, 180.0, 100.0).unwrap();
        let mesh = path.fill_mesh(FillRule::EvenOdd, 0.25).unwrap();

        assert!(!mesh.is_empty());
        let expected = PI * 90.0 * 50.0;
        assert!((mesh.area() - expected).abs() / expected < 0.01);

        let b = mesh.bounds().unwrap();
        assert!(b.origin.x >= -90.01 && b.max().x <= 90.01);
        assert!(b.origin.y >= -50.01 && b.max().y <= 50.01);
    }

    #[test]
    fn rect_fill_is_two_triangles() {
        let mesh = Path::rect(0.0, 0.0, 10.0, 20.0)
            .unwrap()
            .fill_mesh(FillRule::NonZero, 0.25)
            .unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn even_odd_leaves_overlap_hollow() {
        let mut b = Path::builder();
        b.add_rect(0.0, 0.0, 10.0, 10.0).unwrap();
        b.add_rect(2.0, 2.0, 6.0, 6.0).unwrap();
        let path = b.build().unwrap();

        let even_odd = path.fill_mesh(FillRule::EvenOdd, 0.25).unwrap();
        let non_zero = path.fill_mesh(FillRule::NonZero, 0.25).unwrap();
        assert!((even_odd.area() - 64.0).abs() < 1e-3);
        assert!((non_zero.area() - 100.0).abs() < 1e-3);
    }

    // ── stroke ────────────────────────────────────────────────────────────

    #[test]
    fn wider_stroke_covers_more() {
        let path = Path::line(Vec2::ZERO, Vec2::new(100.0, 0.0)).unwrap();
        let thin = path.stroke_mesh(&StrokeStyle::with_width(1.0), 0.25).unwrap();
        let thick = path.stroke_mesh(&StrokeStyle::with_width(8.0), 0.25).unwrap();
        assert!((thin.area() - 100.0).abs() < 0.5);
        assert!((thick.area() - 800.0).abs() < 1.0);
    }

    #[test]
    fn zero_width_stroke_is_empty() {
        let path = Path::line(Vec2::ZERO, Vec2::new(10.0, 0.0)).unwrap();
        assert!(path.stroke_mesh(&StrokeStyle::with_width(0.0), 0.25).unwrap().is_empty());
    }

    // ── cache ─────────────────────────────────────────────────────────────

    #[test]
    fn fill_mesh_is_cached_per_rule_and_tolerance() {
        let path = Path::ellipse(0.0, 0.0, 50.0, 50.0).unwrap();
        let a = path.fill_mesh(FillRule::EvenOdd, 0.25).unwrap();
        let b = path.fill_mesh(FillRule::EvenOdd, 0.3).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let c = path.fill_mesh(FillRule::NonZero, 0.25).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn empty_path_has_no_bounds() {
        let path = Path::builder().build().unwrap();
        assert!(path.is_empty());
        assert!(path.fill_mesh(FillRule::EvenOdd, 0.25).unwrap().is_empty());
    }
}
