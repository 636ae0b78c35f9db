use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeTessellator, StrokeVertex,
    VertexBuffers,
};

use crate::coords::Vec2;

use super::{FillRule, Mesh, PathError, StrokeStyle};

/// Smallest tolerance handed to lyon; finer values only add vertices.
const MIN_TOLERANCE: f32 = 0.001;

/// Snaps a tolerance down to a power of two so that small changes in
/// transform scale reuse cached meshes.
pub(super) fn quantize_tolerance(tolerance: f32) -> f32 {
    if !tolerance.is_finite() || tolerance <= MIN_TOLERANCE {
        return MIN_TOLERANCE;
    }
    tolerance.log2().floor().exp2().max(MIN_TOLERANCE)
}

pub(super) fn fill(
    path: &lyon::path::Path,
    rule: FillRule,
    tolerance: f32,
) -> Result<Mesh, PathError> {
    let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    let options = FillOptions::tolerance(tolerance).with_fill_rule(rule.into());

    FillTessellator::new().tessellate_path(
        path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| Vec2::from(v.position())),
    )?;

    Ok(Mesh { vertices: buffers.vertices, indices: buffers.indices })
}

pub(super) fn stroke(
    path: &lyon::path::Path,
    style: &StrokeStyle,
    tolerance: f32,
) -> Result<Mesh, PathError> {
    if style.is_degenerate() {
        return Ok(Mesh::default());
    }

    let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    let options = style.to_options(tolerance);

    StrokeTessellator::new().tessellate_path(
        path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| Vec2::from(v.position())),
    )?;

    Ok(Mesh { vertices: buffers.vertices, indices: buffers.indices })
}
