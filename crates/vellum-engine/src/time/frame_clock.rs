use std::time::{Duration, Instant};

/// One display refresh as seen by the scheduler.
#[derive(Debug, Copy, Clone)]
pub struct FrameTick {
    /// Monotonic frame counter, starting at 0.
    pub index: u64,

    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Timestamp taken at the tick.
    pub now: Instant,
}

/// Produces [`FrameTick`]s for one render loop.
///
/// Delta time is clamped to `[dt_min, dt_max]` so a stalled or suspended
/// surface does not hand scenes a huge step, and back-to-back ticks never
/// see zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    next_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            next_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Forgets the previous tick; the next tick reports `dt_min`.
    ///
    /// Called when a surface is (re)created so the first frame after a
    /// pause is not charged for the pause.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Number of ticks produced so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.next_index
    }

    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the refresh happened at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.dt_min,
        };
        let dt = raw.clamp(self.dt_min, self.dt_max);

        self.last = Some(now);
        let index = self.next_index;
        self.next_index = self.next_index.wrapping_add(1);

        FrameTick {
            index,
            dt: dt.as_secs_f32(),
            now,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_count_up_from_zero() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0).index, 0);
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(16)).index, 1);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);

        let stalled = clock.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(stalled.dt, FrameClock::DEFAULT_DT_MAX.as_secs_f32());

        let instant = clock.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(instant.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
    }

    #[test]
    fn reset_drops_the_gap() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        let tick = clock.tick_at(t0 + Duration::from_millis(200));
        assert_eq!(tick.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
        assert_eq!(tick.index, 1);
    }
}
