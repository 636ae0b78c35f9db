//! Coordinate and geometry types shared across the engine.
//!
//! Canonical CPU space:
//! - Surface pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The renderer maps surface pixels to clip space with the orthographic
//! projection held in [`ViewState`], recomputed on every resize.

mod rect;
mod size;
mod transform;
mod vec2;
mod view;
mod viewport;

pub use rect::Rect;
pub use size::SurfaceSize;
pub use transform::Transform;
pub use vec2::Vec2;
pub use view::ViewState;
pub use viewport::Viewport;
