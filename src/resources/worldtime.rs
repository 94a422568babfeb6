//! Simulation clock.
//!
//! The core never reads a clock: the caller hands in elapsed milliseconds
//! every frame and [`WorldTime`] converts them into whole fixed-length
//! simulation ticks, carrying the remainder to the next frame.

/// Upper bound on ticks run for a single frame, so a stalled frame cannot
/// trigger an unbounded catch-up.
pub const MAX_TICKS_PER_FRAME: u32 = 32;

#[derive(Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled milliseconds since start.
    pub elapsed_ms: f32,
    /// Scaled milliseconds of the last frame.
    pub delta_ms: f32,
    pub time_scale: f32,
    /// Length of one simulation tick.
    pub tick_ms: f32,
    /// Time not yet consumed by a whole tick.
    pub accumulator_ms: f32,
    /// Ticks run since start.
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0.0,
            delta_ms: 0.0,
            time_scale: 1.0,
            tick_ms: 1000.0 / 120.0,
            accumulator_ms: 0.0,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_tick_ms(mut self, tick_ms: f32) -> Self {
        if tick_ms > 0.0 {
            self.tick_ms = tick_ms;
        }
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tick_is_120hz() {
        let wt = WorldTime::default();
        assert!((wt.tick_ms - 1000.0 / 120.0).abs() < 1e-6);
        assert_eq!(wt.tick_count, 0);
    }

    #[test]
    fn test_with_tick_ms_ignores_non_positive() {
        let wt = WorldTime::default().with_tick_ms(0.0);
        assert!((wt.tick_ms - 1000.0 / 120.0).abs() < 1e-6);
        let wt = WorldTime::default().with_tick_ms(10.0);
        assert!((wt.tick_ms - 10.0).abs() < 1e-6);
    }
}
