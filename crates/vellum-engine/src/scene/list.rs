use crate::coords::Rect;

use super::{DrawCmd, MeshCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in surface pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Clipping
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope
/// draw commands to a scissor rect. Clips are intersected with the current
/// parent, so nested regions never draw outside their ancestors.
///
/// ```ignore
/// draw_list.push_clip(panel_rect);
/// // ... push commands ...
/// draw_list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Stack of active scissor rects (surface pixels).
    /// The top is always the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nested clip regions currently open.
    #[inline]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip rect from the clip stack.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Records a fill of `cmd`'s mesh.
    #[inline]
    pub fn push_fill(&mut self, z: ZIndex, cmd: MeshCmd) {
        if !cmd.mesh.is_empty() {
            self.push(z, DrawCmd::Fill(cmd));
        }
    }

    /// Records a stroke of `cmd`'s mesh.
    #[inline]
    pub fn push_stroke(&mut self, z: ZIndex, cmd: MeshCmd) {
        if !cmd.mesh.is_empty() {
            self.push(z, DrawCmd::Stroke(cmd));
        }
    }

    /// Begins a scissor region. All draw commands pushed until the matching
    /// pop are clipped to `rect` (intersected with any parent clip rect).
    ///
    /// Calls must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // Intersect with the parent; if no overlap, produce a zero-area rect so
            // the renderer skips those draw calls.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region started by [`push_clip`](Self::push_clip).
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Returns indices into `items` in paint order (back-to-front).
    ///
    /// This buffer is owned by `DrawList` and reused across frames.
    pub fn indices_in_paint_order(&mut self) -> &[usize] {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        &self.sorted_indices
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::coords::{Transform, Vec2};
    use crate::paint::{Color, Paint};
    use crate::path::Mesh;

    fn triangle() -> Arc<Mesh> {
        Arc::new(Mesh {
            vertices: vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            indices: vec![0, 1, 2],
        })
    }

    fn cmd(color: Color) -> MeshCmd {
        MeshCmd::new(triangle(), Transform::IDENTITY, Paint::solid(color))
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_fill(ZIndex(2), cmd(Color::BLACK));
        list.push_fill(ZIndex(0), cmd(Color::WHITE));
        list.push_stroke(ZIndex(2), cmd(Color::WHITE));
        list.push_fill(ZIndex(-1), cmd(Color::BLACK));

        let order: Vec<usize> = list.indices_in_paint_order().to_vec();
        assert_eq!(order, vec![3, 1, 0, 2]);
    }

    #[test]
    fn empty_meshes_are_not_recorded() {
        let mut list = DrawList::new();
        let empty = MeshCmd::new(Arc::new(Mesh::default()), Transform::IDENTITY, Paint::default());
        list.push_fill(ZIndex(0), empty.clone());
        list.push_stroke(ZIndex(0), empty);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_fill(ZIndex(0), cmd(Color::BLACK));
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.clip_depth(), 0);
        list.push_fill(ZIndex(0), cmd(Color::BLACK));
        assert_eq!(list.items()[0].key.order, 0);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_fill(ZIndex(0), cmd(Color::BLACK));
        list.pop_clip();
        list.push_fill(ZIndex(0), cmd(Color::BLACK));
        list.pop_clip();
        list.push_fill(ZIndex(0), cmd(Color::BLACK));

        let clips: Vec<Option<Rect>> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(
            clips,
            vec![
                Some(Rect::new(50.0, 50.0, 50.0, 50.0)),
                Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
                None,
            ]
        );
    }

    #[test]
    fn disjoint_clip_collapses_to_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert!(list.current_clip().is_some_and(Rect::is_empty));
    }
}
