use std::sync::Arc;

use crate::coords::Transform;
use crate::paint::Paint;
use crate::path::Mesh;

/// Renderer-agnostic draw command stream.
///
/// Geometry arrives pre-tessellated in user space; the renderer applies
/// `transform` and shades with `paint`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(MeshCmd),
    Stroke(MeshCmd),
}

impl DrawCmd {
    #[inline]
    pub fn mesh_cmd(&self) -> &MeshCmd {
        match self {
            DrawCmd::Fill(cmd) | DrawCmd::Stroke(cmd) => cmd,
        }
    }
}

/// Tessellated geometry with its user-to-surface transform and paint.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCmd {
    pub mesh: Arc<Mesh>,
    pub transform: Transform,
    pub paint: Paint,
}

impl MeshCmd {
    #[inline]
    pub fn new(mesh: Arc<Mesh>, transform: Transform, paint: Paint) -> Self {
        Self {
            mesh,
            transform,
            paint,
        }
    }
}
