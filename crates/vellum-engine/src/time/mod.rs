//! Time subsystem.
//!
//! Frame timing without coupling to a runtime: the scheduler owns one
//! `FrameClock` and calls `tick()` once per rendered frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTick};
