//! Shared GPU types and helpers for the mesh renderer.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};
use crate::paint::{Color, ColorStop, Paint};

use super::ramp::GradientRamps;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── view uniform ──────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewUniform {
    pub projection: [[f32; 4]; 4],
}

pub(super) const VIEW_UNIFORM_SIZE: u64 = std::mem::size_of::<ViewUniform>() as u64;

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a clip rect (surface pixels) to scissor arguments clamped to
/// the viewport.
///
/// `None` clip means the whole viewport. Returns `None` when the result
/// has zero area and the draw should be skipped.
pub(super) fn clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
) -> Option<(u32, u32, u32, u32)> {
    let vw = viewport.width.max(1.0) as u32;
    let vh = viewport.height.max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, vw, vh),
        Some(r) => {
            let x = (r.origin.x.max(0.0) as u32).min(vw);
            let y = (r.origin.y.max(0.0) as u32).min(vh);
            let x2 = ((r.origin.x + r.size.x).max(0.0).ceil() as u32).min(vw);
            let y2 = ((r.origin.y + r.size.y).max(0.0).ceil() as u32).min(vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 {
        None
    } else {
        Some((x, y, w, h))
    }
}

// ── paint resolution ──────────────────────────────────────────────────────

pub(super) const PAINT_SOLID: f32 = 0.0;
pub(super) const PAINT_LINEAR: f32 = 1.0;
pub(super) const PAINT_RADIAL: f32 = 2.0;

/// Per-command shading inputs shared by every vertex of a mesh.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ResolvedPaint {
    /// Solid color; unused by gradients.
    pub color: [f32; 4],
    /// Linear: `[x0, y0, x1, y1]`. Radial: `[cx, cy, fx, fy]`. User space.
    pub geometry: [f32; 4],
    /// `[kind, spread, ramp row, radius]`.
    pub params: [f32; 4],
}

impl ResolvedPaint {
    fn solid(c: Color) -> Self {
        Self {
            color: c.to_array(),
            geometry: [0.0; 4],
            params: [PAINT_SOLID, 0.0, 0.0, 0.0],
        }
    }

    /// Stand-in for a gradient that cannot be shaded: its last stop, or
    /// nothing when that is unusable too.
    fn fallback(stops: &[ColorStop]) -> Self {
        match stops.last() {
            Some(s) if s.color.is_finite() => Self::solid(s.color),
            _ => Self::solid(Color::TRANSPARENT),
        }
    }
}

/// Reduces a paint to what the mesh shader consumes, baking gradient
/// stops into `ramps`.
///
/// Invalid gradients (degenerate axis or radius, non-finite values,
/// fewer than two ordered stops) paint their last stop color.
pub(super) fn resolve_paint(paint: &Paint, ramps: &mut GradientRamps) -> ResolvedPaint {
    match paint {
        Paint::Solid(c) => ResolvedPaint::solid(*c),
        Paint::LinearGradient(g) => {
            if !g.is_valid() {
                return ResolvedPaint::fallback(&g.stops);
            }
            let Some(row) = ramps.row_for(&g.stops) else {
                return ResolvedPaint::fallback(&g.stops);
            };
            ResolvedPaint {
                color: [0.0; 4],
                geometry: [g.start.x, g.start.y, g.end.x, g.end.y],
                params: [PAINT_LINEAR, g.spread.shader_code(), row as f32, 0.0],
            }
        }
        Paint::RadialGradient(g) => {
            if !g.is_valid() {
                return ResolvedPaint::fallback(&g.stops);
            }
            let Some(row) = ramps.row_for(&g.stops) else {
                return ResolvedPaint::fallback(&g.stops);
            };
            let f = g.effective_focus();
            ResolvedPaint {
                color: [0.0; 4],
                geometry: [g.center.x, g.center.y, f.x, f.y],
                params: [PAINT_RADIAL, g.spread.shader_code(), row as f32, g.radius],
            }
        }
    }
}
