use crate::coords::Vec2;

use super::Color;

/// Gradient behavior outside the [0, 1] parameter range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the ramp.
    Repeat,
    /// Mirror-repeat the ramp.
    Reflect,
}

impl SpreadMode {
    /// Maps a raw ramp parameter into [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }

    /// Numeric code consumed by the mesh shader.
    pub(crate) fn shader_code(self) -> f32 {
        match self {
            SpreadMode::Pad => 0.0,
            SpreadMode::Repeat => 1.0,
            SpreadMode::Reflect => 2.0,
        }
    }
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Evaluates a stop list at `t` in [0, 1], interpolating between
/// neighboring stops. Stops are expected in non-decreasing order.
pub(crate) fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.t {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.t {
            let span = b.t - a.t;
            let k = if span > 0.0 { (t - a.t) / span } else { 1.0 };
            return Color::from_premul(
                a.color.r + (b.color.r - a.color.r) * k,
                a.color.g + (b.color.g - a.color.g) * k,
                a.color.b + (b.color.b - a.color.b) * k,
                a.color.a + (b.color.a - a.color.a) * k,
            );
        }
    }
    stops[stops.len() - 1].color
}

fn stops_are_valid(stops: &[ColorStop]) -> bool {
    stops.len() >= 2
        && stops.iter().all(|s| (0.0..=1.0).contains(&s.t) && s.color.is_finite())
        && stops.windows(2).all(|w| w[0].t <= w[1].t)
}

/// Linear gradient in user space.
///
/// `start` and `end` are transformed with the path they paint, so a
/// gradient follows its geometry through translate/scale/rotate.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self {
            start,
            end,
            stops,
            spread,
        }
    }

    /// Returns true when the gradient is structurally usable: finite
    /// geometry, a non-degenerate axis and at least two ordered stops in
    /// [0, 1].
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start != self.end
            && stops_are_valid(&self.stops)
    }

    /// Raw ramp parameter of user-space point `p`: its projection onto the
    /// start→end axis, 0 at `start` and 1 at `end`.
    pub fn parameter_at(&self, p: Vec2) -> f32 {
        let d = self.end - self.start;
        let len2 = d.dot(d);
        if len2 > 0.0 {
            (p - self.start).dot(d) / len2
        } else {
            0.0
        }
    }

    /// Evaluates the ramp at raw parameter `t` (spread applied).
    pub fn color_at(&self, t: f32) -> Color {
        sample_stops(&self.stops, self.spread.apply(t))
    }
}

/// Radial gradient in user space.
///
/// The ramp runs from `focus` (t = 0) to the circle of `radius` around
/// `center` (t = 1). A focus on or outside the circle is pulled just
/// inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub focus: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl RadialGradient {
    /// Fraction of the radius the focus may sit away from the center.
    const FOCUS_LIMIT: f32 = 0.99;

    pub fn new(
        center: Vec2,
        focus: Vec2,
        radius: f32,
        stops: Vec<ColorStop>,
        spread: SpreadMode,
    ) -> Self {
        Self {
            center,
            focus,
            radius,
            stops,
            spread,
        }
    }

    /// Centered gradient: focus coincides with `center`.
    pub fn centered(center: Vec2, radius: f32, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self::new(center, center, radius, stops, spread)
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.focus.is_finite()
            && self.radius.is_finite()
            && self.radius > 0.0
            && stops_are_valid(&self.stops)
    }

    /// Focus point actually used for shading.
    pub fn effective_focus(&self) -> Vec2 {
        let offset = self.focus - self.center;
        let limit = self.radius * Self::FOCUS_LIMIT;
        let dist = offset.length();
        if dist > limit && dist > 0.0 {
            self.center + offset * (limit / dist)
        } else {
            self.focus
        }
    }

    /// Raw ramp parameter of user-space point `p`.
    pub fn parameter_at(&self, p: Vec2) -> f32 {
        let f = self.effective_focus();
        let fp = f - self.center;
        let d = p - f;
        let r2 = self.radius * self.radius;
        let den = r2 - fp.dot(fp);
        if den <= 0.0 {
            return 0.0;
        }
        let cross = d.x * fp.y - d.y * fp.x;
        let disc = (r2 * d.dot(d) - cross * cross).max(0.0);
        (d.dot(fp) + disc.sqrt()) / den
    }

    /// Evaluates the ramp at raw parameter `t` (spread applied).
    pub fn color_at(&self, t: f32) -> Color {
        sample_stops(&self.stops, self.spread.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn black_white() -> Vec<ColorStop> {
        vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(1.0, Color::WHITE)]
    }

    fn ramp(spread: SpreadMode) -> LinearGradient {
        LinearGradient::new(Vec2::ZERO, Vec2::new(10.0, 0.0), black_white(), spread)
    }

    // ── spread ────────────────────────────────────────────────────────────

    #[test]
    fn pad_clamps() {
        assert_eq!(SpreadMode::Pad.apply(-0.5), 0.0);
        assert_eq!(SpreadMode::Pad.apply(1.5), 1.0);
    }

    #[test]
    fn repeat_wraps() {
        assert!(approx(SpreadMode::Repeat.apply(1.25), 0.25));
        assert!(approx(SpreadMode::Repeat.apply(-0.25), 0.75));
    }

    #[test]
    fn reflect_mirrors() {
        assert!(approx(SpreadMode::Reflect.apply(1.25), 0.75));
        assert!(approx(SpreadMode::Reflect.apply(2.25), 0.25));
    }

    // ── stops ─────────────────────────────────────────────────────────────

    #[test]
    fn color_at_interpolates_midpoint() {
        let c = ramp(SpreadMode::Pad).color_at(0.5);
        assert!(approx(c.r, 0.5));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn middle_stop_is_reached() {
        let red = Color::from_straight(1.0, 0.0, 0.0, 1.0);
        let stops = vec![
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(0.5, red),
            ColorStop::new(1.0, Color::BLACK),
        ];
        assert_eq!(sample_stops(&stops, 0.5), red);
        assert!(approx(sample_stops(&stops, 0.25).r, 0.5));
    }

    #[test]
    fn unordered_or_out_of_range_stops_are_invalid() {
        let mut g = ramp(SpreadMode::Pad);
        g.stops = vec![ColorStop::new(0.8, Color::BLACK), ColorStop::new(0.2, Color::WHITE)];
        assert!(!g.is_valid());
        g.stops = vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(1.5, Color::WHITE)];
        assert!(!g.is_valid());
    }

    // ── linear ────────────────────────────────────────────────────────────

    #[test]
    fn linear_parameter_projects_onto_axis() {
        let g = ramp(SpreadMode::Pad);
        assert!(approx(g.parameter_at(Vec2::new(5.0, 40.0)), 0.5));
        assert!(approx(g.parameter_at(Vec2::new(-10.0, 0.0)), -1.0));
    }

    #[test]
    fn degenerate_axis_is_invalid() {
        let mut g = ramp(SpreadMode::Pad);
        assert!(g.is_valid());
        g.end = g.start;
        assert!(!g.is_valid());
        g.end = Vec2::new(f32::NAN, 0.0);
        assert!(!g.is_valid());
    }

    // ── radial ────────────────────────────────────────────────────────────

    #[test]
    fn centered_radial_parameter_is_distance_over_radius() {
        let center = Vec2::new(10.0, 10.0);
        let g = RadialGradient::centered(center, 20.0, black_white(), SpreadMode::Pad);
        assert!(approx(g.parameter_at(Vec2::new(10.0, 10.0)), 0.0));
        assert!(approx(g.parameter_at(Vec2::new(20.0, 10.0)), 0.5));
        assert!(approx(g.parameter_at(Vec2::new(10.0, -10.0)), 1.0));
    }

    #[test]
    fn offset_focus_starts_ramp_at_focus_and_ends_on_circle() {
        let focus = Vec2::new(5.0, 0.0);
        let g = RadialGradient::new(Vec2::ZERO, focus, 10.0, black_white(), SpreadMode::Pad);
        assert!(approx(g.parameter_at(Vec2::new(5.0, 0.0)), 0.0));
        assert!(approx(g.parameter_at(Vec2::new(10.0, 0.0)), 1.0));
        assert!(approx(g.parameter_at(Vec2::new(-10.0, 0.0)), 1.0));
        assert!(approx(g.parameter_at(Vec2::new(0.0, 10.0)), 1.0));
    }

    #[test]
    fn focus_outside_circle_is_pulled_inside() {
        let focus = Vec2::new(50.0, 0.0);
        let g = RadialGradient::new(Vec2::ZERO, focus, 10.0, black_white(), SpreadMode::Pad);
        let f = g.effective_focus();
        assert!(f.length() < 10.0);
        assert!(g.parameter_at(Vec2::new(-10.0, 0.0)).is_finite());
    }

    #[test]
    fn radial_rejects_non_positive_radius() {
        let mut g = RadialGradient::centered(Vec2::ZERO, 10.0, black_white(), SpreadMode::Pad);
        assert!(g.is_valid());
        g.radius = 0.0;
        assert!(!g.is_valid());
    }
}
