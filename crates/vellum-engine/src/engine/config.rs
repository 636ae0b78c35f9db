use std::time::Duration;

use crate::coords::SurfaceSize;
use crate::paint::Color;

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Surface size assumed until the first resize.
    pub initial_size: SurfaceSize,

    /// Clear color every frame starts from.
    pub clear_color: Color,

    /// Frames slower than this are logged.
    pub frame_budget: Duration,

    /// Maximum distance, in surface pixels, between a curve and its
    /// tessellation.
    pub tolerance: f32,
}

impl EngineConfig {
    pub const DEFAULT_TOLERANCE: f32 = 0.25;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_size: SurfaceSize::MIN,
            clear_color: Color::WHITE,
            frame_budget: Duration::from_secs_f64(1.0 / 60.0),
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}
