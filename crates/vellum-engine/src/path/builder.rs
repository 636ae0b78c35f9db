use std::f32::consts::{FRAC_PI_2, PI};

use lyon::geom::Arc;
use lyon::math::{point, vector, Angle};

use crate::coords::Vec2;

use super::{Path, PathError};

/// How an arc built by [`PathBuilder::add_arc`] is closed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcClosure {
    /// Leave the arc open.
    Open,
    /// Close with a straight line between the arc's end points.
    Chord,
    /// Close through the ellipse center (pie slice).
    Pie,
}

/// Incremental path construction.
///
/// Segment calls follow pen semantics: `line_to`/`quad_to`/`cubic_to`
/// without an open subpath start one at the current point, and `move_to`
/// ends any open subpath first. The shape helpers append complete
/// subpaths, so several shapes can share one path.
///
/// Segments with non-finite coordinates are dropped and the first such
/// error is kept; [`PathBuilder::build`] reports it.
pub struct PathBuilder {
    inner: lyon::path::path::Builder,
    current: Vec2,
    start: Vec2,
    open: bool,
    error: Option<PathError>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            inner: lyon::path::Path::builder(),
            current: Vec2::ZERO,
            start: Vec2::ZERO,
            open: false,
            error: None,
        }
    }

    /// Starts a new subpath at `p`.
    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        if !self.accept(&[p]) {
            return self;
        }
        self.end_open();
        self.inner.begin(p.into());
        self.open = true;
        self.start = p;
        self.current = p;
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        if !self.accept(&[p]) {
            return self;
        }
        self.ensure_open();
        self.inner.line_to(p.into());
        self.current = p;
        self
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        if !self.accept(&[ctrl, to]) {
            return self;
        }
        self.ensure_open();
        self.inner.quadratic_bezier_to(ctrl.into(), to.into());
        self.current = to;
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> &mut Self {
        if !self.accept(&[ctrl1, ctrl2, to]) {
            return self;
        }
        self.ensure_open();
        self.inner.cubic_bezier_to(ctrl1.into(), ctrl2.into(), to.into());
        self.current = to;
        self
    }

    /// Closes the current subpath; the pen returns to its start.
    pub fn close(&mut self) -> &mut Self {
        if self.open {
            self.inner.end(true);
            self.open = false;
            self.current = self.start;
        }
        self
    }

    /// Appends an open two-point line.
    pub fn add_line(&mut self, from: Vec2, to: Vec2) -> Result<&mut Self, PathError> {
        check_finite(&[from, to])?;
        self.move_to(from).line_to(to);
        self.end_open();
        Ok(self)
    }

    /// Appends a polyline through `points`, closed when `closed` is set.
    pub fn add_polygon(&mut self, points: &[Vec2], closed: bool) -> Result<&mut Self, PathError> {
        let Some((&first, rest)) = points.split_first() else {
            return Err(PathError::IllegalArgument("polygon needs at least one point"));
        };
        check_finite(points)?;

        self.move_to(first);
        for &p in rest {
            self.line_to(p);
        }
        if closed {
            self.close();
        } else {
            self.end_open();
        }
        Ok(self)
    }

    /// Appends a closed axis-aligned rectangle.
    pub fn add_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<&mut Self, PathError> {
        check_extent(width, height)?;
        check_finite(&[Vec2::new(x, y)])?;

        self.move_to(Vec2::new(x, y))
            .line_to(Vec2::new(x + width, y))
            .line_to(Vec2::new(x + width, y + height))
            .line_to(Vec2::new(x, y + height))
            .close();
        Ok(self)
    }

    /// Appends a closed rectangle with elliptical corners. `arc_width` and
    /// `arc_height` are the corner ellipse diameters, clamped to the
    /// rectangle's extents.
    pub fn add_round_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        arc_width: f32,
        arc_height: f32,
    ) -> Result<&mut Self, PathError> {
        check_extent(width, height)?;
        check_finite(&[Vec2::new(x, y), Vec2::new(arc_width, arc_height)])?;

        let rx = arc_width.clamp(0.0, width) * 0.5;
        let ry = arc_height.clamp(0.0, height) * 0.5;
        let radii = Vec2::new(rx, ry);

        self.move_to(Vec2::new(x + rx, y));
        self.line_to(Vec2::new(x + width - rx, y));
        self.arc_segment(Vec2::new(x + width - rx, y + ry), radii, -FRAC_PI_2, FRAC_PI_2);
        self.line_to(Vec2::new(x + width, y + height - ry));
        self.arc_segment(Vec2::new(x + width - rx, y + height - ry), radii, 0.0, FRAC_PI_2);
        self.line_to(Vec2::new(x + rx, y + height));
        self.arc_segment(Vec2::new(x + rx, y + height - ry), radii, FRAC_PI_2, FRAC_PI_2);
        self.line_to(Vec2::new(x, y + ry));
        self.arc_segment(Vec2::new(x + rx, y + ry), radii, PI, FRAC_PI_2);
        self.close();
        Ok(self)
    }

    /// Appends a closed ellipse centered at `(cx, cy)` with the given
    /// diameters.
    pub fn add_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
    ) -> Result<&mut Self, PathError> {
        check_extent(width, height)?;
        check_finite(&[Vec2::new(cx, cy)])?;

        let center = Vec2::new(cx, cy);
        let radii = Vec2::new(width * 0.5, height * 0.5);

        self.move_to(Vec2::new(cx + radii.x, cy));
        self.arc_segment(center, radii, 0.0, PI);
        self.arc_segment(center, radii, PI, PI);
        self.close();
        Ok(self)
    }

    /// Appends an elliptical arc inscribed in the `width`×`height` box
    /// centered at `(cx, cy)`, starting at `start_deg` and sweeping
    /// `extent_deg` (negative sweeps run the other way).
    pub fn add_arc(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        start_deg: f32,
        extent_deg: f32,
        closure: ArcClosure,
    ) -> Result<&mut Self, PathError> {
        check_extent(width, height)?;
        if !(start_deg.is_finite() && extent_deg.is_finite()) {
            return Err(PathError::IllegalArgument("arc angles must be finite"));
        }
        check_finite(&[Vec2::new(cx, cy)])?;

        let center = Vec2::new(cx, cy);
        let radii = Vec2::new(width * 0.5, height * 0.5);
        let start = start_deg.to_radians();
        let sweep = extent_deg.to_radians();

        self.move_to(Vec2::new(cx + radii.x * start.cos(), cy + radii.y * start.sin()));
        self.arc_segment(center, radii, start, sweep);

        match closure {
            ArcClosure::Open => {
                self.end_open();
            }
            ArcClosure::Chord => {
                self.close();
            }
            ArcClosure::Pie => {
                self.line_to(center).close();
            }
        }
        Ok(self)
    }

    /// First error recorded by a dropped segment, if any.
    pub fn error(&self) -> Option<&PathError> {
        self.error.as_ref()
    }

    /// Finishes the path, or returns the first recorded segment error.
    pub fn build(mut self) -> Result<Path, PathError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.end_open();
        Ok(Path::from_lyon(self.inner.build()))
    }

    /// Appends an elliptical arc from the current point as quadratic curves.
    fn arc_segment(&mut self, center: Vec2, radii: Vec2, start: f32, sweep: f32) {
        if !self.accept(&[center, radii]) {
            return;
        }
        let arc = Arc {
            center: point(center.x, center.y),
            radii: vector(radii.x, radii.y),
            start_angle: Angle::radians(start),
            sweep_angle: Angle::radians(sweep),
            x_rotation: Angle::radians(0.0),
        };

        let inner = &mut self.inner;
        let mut finite = true;
        arc.for_each_quadratic_bezier(&mut |seg| {
            let ok = Vec2::from(seg.ctrl).is_finite() && Vec2::from(seg.to).is_finite();
            if finite && ok {
                inner.quadratic_bezier_to(seg.ctrl, seg.to);
            }
            finite &= ok;
        });
        if !finite {
            self.record(PathError::IllegalArgument("coordinates must be finite"));
            return;
        }
        self.current = Vec2::from(arc.to());
    }

    /// Returns false (recording an error) when any point is non-finite.
    fn accept(&mut self, points: &[Vec2]) -> bool {
        match check_finite(points) {
            Ok(()) => true,
            Err(err) => {
                self.record(err);
                false
            }
        }
    }

    fn record(&mut self, err: PathError) {
        if self.error.is_none() {
            log::debug!("path segment dropped: {err}");
            self.error = Some(err);
        }
    }

    fn ensure_open(&mut self) {
        if !self.open {
            self.inner.begin(self.current.into());
            self.open = true;
            self.start = self.current;
        }
    }

    fn end_open(&mut self) {
        if self.open {
            self.inner.end(false);
            self.open = false;
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_extent(width: f32, height: f32) -> Result<(), PathError> {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(PathError::IllegalArgument("width and height must be positive"));
    }
    Ok(())
}

fn check_finite(points: &[Vec2]) -> Result<(), PathError> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(PathError::IllegalArgument("coordinates must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── argument checks ───────────────────────────────────────────────────

    #[test]
    fn rect_rejects_non_positive_extent() {
        let mut b = PathBuilder::new();
        assert!(matches!(b.add_rect(0.0, 0.0, 0.0, 10.0), Err(PathError::IllegalArgument(_))));
        assert!(matches!(b.add_rect(0.0, 0.0, 10.0, -1.0), Err(PathError::IllegalArgument(_))));
    }

    #[test]
    fn ellipse_rejects_nan() {
        let mut b = PathBuilder::new();
        assert!(b.add_ellipse(0.0, 0.0, f32::NAN, 10.0).is_err());
        assert!(b.add_ellipse(f32::INFINITY, 0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn polygon_rejects_empty() {
        let mut b = PathBuilder::new();
        assert!(b.add_polygon(&[], true).is_err());
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn ellipse_bounds_match_diameters() {
        let mut b = PathBuilder::new();
        b.add_ellipse(0.0, 0.0, 180.0, 100.0).unwrap();
        let r = b.build().unwrap().bounds().unwrap();
        assert!(approx(r.origin.x, -90.0) && approx(r.origin.y, -50.0));
        assert!(approx(r.size.x, 180.0) && approx(r.size.y, 100.0));
    }

    #[test]
    fn round_rect_stays_inside_its_box() {
        let mut b = PathBuilder::new();
        b.add_round_rect(10.0, 20.0, 100.0, 50.0, 400.0, 20.0).unwrap();
        let r = b.build().unwrap().bounds().unwrap();
        assert!(approx(r.origin.x, 10.0) && approx(r.origin.y, 20.0));
        assert!(approx(r.size.x, 100.0) && approx(r.size.y, 50.0));
    }

    #[test]
    fn pie_arc_includes_center() {
        let mut b = PathBuilder::new();
        b.add_arc(0.0, 0.0, 20.0, 20.0, 0.0, 90.0, ArcClosure::Pie).unwrap();
        let r = b.build().unwrap().bounds().unwrap();
        assert!(approx(r.origin.x, 0.0) && approx(r.origin.y, 0.0));
        assert!(approx(r.size.x, 10.0) && approx(r.size.y, 10.0));
    }

    // ── pen semantics ─────────────────────────────────────────────────────

    #[test]
    fn line_to_without_move_starts_at_origin() {
        let mut b = PathBuilder::new();
        b.line_to(Vec2::new(5.0, 5.0));
        let r = b.build().unwrap().bounds().unwrap();
        assert_eq!(r.origin, Vec2::ZERO);
        assert_eq!(r.size, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn shapes_append_to_one_path() {
        let mut b = PathBuilder::new();
        b.add_rect(0.0, 0.0, 10.0, 10.0).unwrap();
        b.add_line(Vec2::new(20.0, 20.0), Vec2::new(30.0, 40.0)).unwrap();
        let r = b.build().unwrap().bounds().unwrap();
        assert_eq!(r.size, Vec2::new(30.0, 40.0));
    }

    // ── non-finite segments ───────────────────────────────────────────────

    #[test]
    fn nan_line_to_is_dropped_and_reported() {
        let mut b = PathBuilder::new();
        b.move_to(Vec2::ZERO).line_to(Vec2::new(f32::NAN, 5.0));
        assert!(b.error().is_some());
        assert!(matches!(b.build(), Err(PathError::IllegalArgument(_))));
    }

    #[test]
    fn every_raw_segment_checks_finiteness() {
        let inf = Vec2::new(f32::INFINITY, 0.0);
        let ok = Vec2::new(1.0, 1.0);

        let mut b = PathBuilder::new();
        b.move_to(inf);
        assert!(b.build().is_err());

        let mut b = PathBuilder::new();
        b.move_to(Vec2::ZERO).quad_to(ok, inf);
        assert!(b.build().is_err());

        let mut b = PathBuilder::new();
        b.move_to(Vec2::ZERO).cubic_to(inf, ok, ok);
        assert!(b.build().is_err());
    }

    #[test]
    fn first_error_is_sticky_across_later_segments() {
        let mut b = PathBuilder::new();
        b.line_to(Vec2::new(0.0, f32::NAN));
        b.move_to(Vec2::ZERO).line_to(Vec2::new(4.0, 4.0)).close();
        b.add_rect(0.0, 0.0, 2.0, 2.0).unwrap();
        assert!(b.error().is_some());
        assert!(b.build().is_err());
    }

    #[test]
    fn overflowing_shape_is_reported_at_build() {
        let mut b = PathBuilder::new();
        b.add_rect(f32::MAX, 0.0, f32::MAX, 1.0).unwrap();
        assert!(b.build().is_err());
    }
}
