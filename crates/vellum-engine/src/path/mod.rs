//! Vector paths.
//!
//! Responsibilities:
//! - record path geometry (move/line/quad/cubic/close) in user space
//! - build common shapes (line, polygon, rect, round rect, ellipse, arc)
//! - tessellate fills and strokes into triangle meshes, cached per path
//!
//! Geometry is stored as a `lyon` path; tessellation uses `lyon`'s fill and
//! stroke tessellators.

mod builder;
mod error;
mod mesh;
mod path;
mod style;
mod tessellate;

pub use builder::{ArcClosure, PathBuilder};
pub use error::PathError;
pub use mesh::Mesh;
pub use path::Path;
pub use style::{FillRule, LineCap, LineJoin, StrokeStyle};
