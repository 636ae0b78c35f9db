use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::scene::DrawList;

use super::common::resolve_paint;
use super::ramp::GradientRamps;

/// Vertex fed to the mesh pipeline.
///
/// `pos` is already in surface pixels; `local` keeps the user-space
/// position so gradients are evaluated before the transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct MeshVertex {
    pub pos: [f32; 2],
    pub local: [f32; 2],
    pub color: [f32; 4],
    pub geometry: [f32; 4],
    pub params: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // local
        2 => Float32x4, // solid color
        3 => Float32x4, // gradient geometry
        4 => Float32x4  // kind, spread, ramp row, radius
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Index range sharing one scissor rect.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DrawRange {
    pub indices: Range<u32>,
    pub clip: Option<Rect>,
}

/// One frame's draw list flattened into a single vertex/index stream,
/// plus the gradient ramps its paints reference.
#[derive(Debug, Default)]
pub(super) struct MeshBatch {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub ranges: Vec<DrawRange>,
    pub ramps: GradientRamps,
}

impl MeshBatch {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.ranges.clear();
        self.ramps.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Rebuilds the batch from `draw_list` in paint order.
    ///
    /// Vertices are transformed on the CPU; consecutive commands with the
    /// same clip share one range. Commands with non-finite transforms are
    /// dropped.
    pub fn rebuild(&mut self, draw_list: &mut DrawList) {
        self.clear();

        for item in draw_list.iter_in_paint_order() {
            let cmd = item.cmd.mesh_cmd();
            if !cmd.transform.is_finite() || cmd.mesh.is_empty() {
                continue;
            }

            let paint = resolve_paint(&cmd.paint, &mut self.ramps);
            let Ok(base) = u32::try_from(self.vertices.len()) else {
                log::warn!("mesh batch exceeds u32 vertex indices; dropping remaining commands");
                break;
            };

            self.vertices.extend(cmd.mesh.vertices.iter().map(|&v| {
                let p = cmd.transform.transform_point(v);
                MeshVertex {
                    pos: [p.x, p.y],
                    local: [v.x, v.y],
                    color: paint.color,
                    geometry: paint.geometry,
                    params: paint.params,
                }
            }));

            let start = self.indices.len() as u32;
            self.indices.extend(cmd.mesh.indices.iter().map(|&i| base + i));
            let end = self.indices.len() as u32;

            match self.ranges.last_mut() {
                Some(last) if last.clip == item.clip_rect && last.indices.end == start => {
                    last.indices.end = end;
                }
                _ => self.ranges.push(DrawRange {
                    indices: start..end,
                    clip: item.clip_rect,
                }),
            }
        }
    }
}
