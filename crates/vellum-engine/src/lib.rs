//! Vellum engine crate.
//!
//! A vector-graphics rendering engine core driven by three host surface
//! callbacks: surface created, surface changed, draw frame. The lifecycle
//! lives in [`engine`]; paths, paints and the draw model live in [`path`],
//! [`paint`] and [`scene`]; GPU work goes through a [`backend`].

pub mod backend;
pub mod coords;
pub mod device;
pub mod engine;
pub mod host;
pub mod logging;
pub mod paint;
pub mod path;
pub mod render;
pub mod scene;
pub mod time;

pub use backend::{FrameStatus, HeadlessBackend, RenderBackend, WgpuBackend};
pub use engine::{Engine, EngineConfig, EngineError, LifecycleState};
pub use host::SurfaceCallbacks;
pub use scene::{Canvas, DrawMode, EmptyScene, Scene};
