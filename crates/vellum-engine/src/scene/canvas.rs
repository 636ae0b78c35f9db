use crate::coords::{Rect, Transform, ViewState, Viewport};
use crate::paint::{Color, Paint};
use crate::path::{FillRule, Path, PathError, StrokeStyle};

use super::{DrawList, MeshCmd, ZIndex};

/// Which parts of a path [`Canvas::draw_path`] records.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DrawMode {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

impl DrawMode {
    #[inline]
    fn fills(self) -> bool {
        matches!(self, DrawMode::Fill | DrawMode::FillAndStroke)
    }

    #[inline]
    fn strokes(self) -> bool {
        matches!(self, DrawMode::Stroke | DrawMode::FillAndStroke)
    }
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform,
    fill_paint: Paint,
    stroke_paint: Paint,
    stroke_style: StrokeStyle,
    fill_rule: FillRule,
    z: ZIndex,
    clip_depth: usize,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill_paint: Paint::default(),
            stroke_paint: Paint::default(),
            stroke_style: StrokeStyle::default(),
            fill_rule: FillRule::default(),
            z: ZIndex::default(),
            clip_depth: 0,
        }
    }
}

/// Per-frame drawing context handed to a scene.
///
/// Holds the current path-user-to-surface transform, fill and stroke
/// paints, stroke style, fill rule and clear color. Every frame starts
/// from the defaults: identity transform, black paints, 1px butt/miter
/// stroke, even-odd fill, and the engine's configured clear color.
///
/// Drawing records commands into the frame's [`DrawList`]; nothing touches
/// the GPU until the scene returns.
pub struct Canvas<'a> {
    list: &'a mut DrawList,
    view: &'a ViewState,
    clear_color: Color,
    tolerance: f32,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(
        list: &'a mut DrawList,
        view: &'a ViewState,
        clear_color: Color,
        tolerance: f32,
    ) -> Self {
        Self {
            list,
            view,
            clear_color,
            tolerance,
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    /// Ends the frame's recording, unwinding any unbalanced `save`/`clip`,
    /// and returns the color the surface is cleared to.
    pub(crate) fn finish(mut self) -> Color {
        while self.list.clip_depth() > 0 {
            self.list.pop_clip();
        }
        self.saved.clear();
        self.clear_color
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        self.view
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.view.viewport
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Color the whole surface is cleared to before this frame's commands.
    #[inline]
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Paints `rect` (surface pixels, transform ignored) with the clear color.
    pub fn clear_rect(&mut self, rect: Rect) -> Result<(), PathError> {
        let Some(rect) = rect.normalized().intersect(self.view.viewport.bounds()) else {
            return Ok(());
        };
        let path = Path::rect(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y)?;
        let mesh = path.fill_mesh(FillRule::NonZero, self.tolerance)?;
        let paint = Paint::solid(self.clear_color);
        self.list.push_fill(self.state.z, MeshCmd::new(mesh, Transform::IDENTITY, paint));
        Ok(())
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[inline]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Transform) {
        self.state.transform = transform;
    }

    #[inline]
    pub fn load_identity(&mut self) {
        self.state.transform.set_identity();
    }

    /// Post-multiplies the current transform by `m`.
    #[inline]
    pub fn multiply(&mut self, m: Transform) {
        self.state.transform.multiply(m);
    }

    #[inline]
    pub fn translate(&mut self, x: f32, y: f32) {
        self.state.transform.translate(x, y);
    }

    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform.scale(sx, sy);
    }

    #[inline]
    pub fn rotate(&mut self, degrees: f32) {
        self.state.transform.rotate(degrees);
    }

    // ── paint and style ───────────────────────────────────────────────────

    #[inline]
    pub fn fill_paint(&self) -> &Paint {
        &self.state.fill_paint
    }

    #[inline]
    pub fn set_fill_paint(&mut self, paint: impl Into<Paint>) {
        self.state.fill_paint = paint.into();
    }

    #[inline]
    pub fn stroke_paint(&self) -> &Paint {
        &self.state.stroke_paint
    }

    #[inline]
    pub fn set_stroke_paint(&mut self, paint: impl Into<Paint>) {
        self.state.stroke_paint = paint.into();
    }

    #[inline]
    pub fn stroke_style(&self) -> &StrokeStyle {
        &self.state.stroke_style
    }

    #[inline]
    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.state.stroke_style = style;
    }

    #[inline]
    pub fn set_stroke_width(&mut self, width: f32) {
        self.state.stroke_style.width = width;
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }

    #[inline]
    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.state.fill_rule = rule;
    }

    #[inline]
    pub fn set_z_index(&mut self, z: ZIndex) {
        self.state.z = z;
    }

    // ── state stack ───────────────────────────────────────────────────────

    /// Pushes the current state (transform, paints, style, z, clip).
    pub fn save(&mut self) {
        let mut snapshot = self.state.clone();
        snapshot.clip_depth = self.list.clip_depth();
        self.saved.push(snapshot);
    }

    /// Pops the last saved state, closing clips opened since the `save`.
    /// Without a matching `save` this is a no-op.
    pub fn restore(&mut self) {
        let Some(state) = self.saved.pop() else {
            log::debug!("canvas restore without save");
            return;
        };
        while self.list.clip_depth() > state.clip_depth {
            self.list.pop_clip();
        }
        self.state = state;
    }

    /// Intersects the clip region with `rect` (surface pixels) until the
    /// enclosing `restore`.
    pub fn clip(&mut self, rect: Rect) {
        self.list.push_clip(rect.normalized());
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Records `path` with the current state.
    ///
    /// Tessellation tolerance is scaled by the transform so curves stay
    /// smooth in surface pixels; meshes are cached on the path.
    pub fn draw_path(&mut self, path: &Path, mode: DrawMode) -> Result<(), PathError> {
        if path.is_empty() {
            return Ok(());
        }
        let tolerance = self.user_tolerance();

        if mode.fills() && !self.state.fill_paint.is_invisible() {
            let mesh = path.fill_mesh(self.state.fill_rule, tolerance)?;
            let cmd = MeshCmd::new(mesh, self.state.transform, self.state.fill_paint.clone());
            self.list.push_fill(self.state.z, cmd);
        }

        if mode.strokes() && !self.state.stroke_paint.is_invisible() {
            let mesh = path.stroke_mesh(&self.state.stroke_style, tolerance)?;
            let cmd = MeshCmd::new(mesh, self.state.transform, self.state.stroke_paint.clone());
            self.list.push_stroke(self.state.z, cmd);
        }

        Ok(())
    }

    /// Fills `path` with the current fill paint.
    #[inline]
    pub fn fill(&mut self, path: &Path) -> Result<(), PathError> {
        self.draw_path(path, DrawMode::Fill)
    }

    /// Strokes `path` with the current stroke paint and style.
    #[inline]
    pub fn stroke(&mut self, path: &Path) -> Result<(), PathError> {
        self.draw_path(path, DrawMode::Stroke)
    }

    fn user_tolerance(&self) -> f32 {
        let scale = self.state.transform.max_scale();
        if scale.is_finite() && scale > 0.0 {
            self.tolerance / scale
        } else {
            self.tolerance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{SurfaceSize, Vec2};
    use crate::scene::DrawCmd;

    fn view() -> ViewState {
        ViewState::for_size(SurfaceSize::new(200, 100))
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_path_records_current_state() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::WHITE, 0.25);

        let ellipse = Path::ellipse(0.0, 0.0, 90.0, 50.0).unwrap();
        canvas.translate(100.0, 50.0);
        canvas.set_fill_paint(Color::from_straight(1.0, 0.0, 0.0, 1.0));
        canvas.draw_path(&ellipse, DrawMode::FillAndStroke).unwrap();
        assert_eq!(canvas.finish(), Color::WHITE);

        assert_eq!(list.len(), 2);
        let DrawCmd::Fill(fill) = &list.items()[0].cmd else {
            panic!("expected fill first");
        };
        assert_eq!(fill.transform, Transform::from_translation(100.0, 50.0));
        assert_eq!(fill.paint, Paint::solid(Color::from_straight(1.0, 0.0, 0.0, 1.0)));
        assert!(matches!(list.items()[1].cmd, DrawCmd::Stroke(_)));
    }

    #[test]
    fn invisible_paint_records_nothing() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::WHITE, 0.25);

        canvas.set_fill_paint(Color::TRANSPARENT);
        canvas.fill(&Path::rect(0.0, 0.0, 10.0, 10.0).unwrap()).unwrap();
        canvas.finish();
        assert!(list.is_empty());
    }

    #[test]
    fn clear_rect_ignores_transform_and_clips_to_surface() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::BLACK, 0.25);

        canvas.scale(4.0, 4.0);
        canvas.clear_rect(Rect::new(150.0, -10.0, 100.0, 60.0)).unwrap();
        canvas.finish();

        let cmd = list.items()[0].cmd.mesh_cmd();
        assert_eq!(cmd.transform, Transform::IDENTITY);
        assert_eq!(cmd.mesh.bounds(), Some(Rect::new(150.0, 0.0, 50.0, 50.0)));
    }

    // ── state stack ───────────────────────────────────────────────────────

    #[test]
    fn restore_returns_to_saved_state() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::WHITE, 0.25);

        canvas.save();
        canvas.translate(5.0, 5.0);
        canvas.set_stroke_width(3.0);
        canvas.set_fill_rule(FillRule::NonZero);
        canvas.clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.restore();

        assert_eq!(canvas.transform(), Transform::IDENTITY);
        assert_eq!(canvas.stroke_style().width, 1.0);
        assert_eq!(canvas.fill_rule(), FillRule::EvenOdd);
        canvas.finish();
        assert_eq!(list.clip_depth(), 0);
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::WHITE, 0.25);
        canvas.translate(1.0, 2.0);
        canvas.restore();
        assert_eq!(canvas.transform().transform_point(Vec2::ZERO), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn finish_closes_open_clips() {
        let mut list = DrawList::new();
        let view = view();
        let mut canvas = Canvas::new(&mut list, &view, Color::WHITE, 0.25);
        canvas.clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        canvas.finish();
        assert_eq!(list.clip_depth(), 0);
    }
}
