//! Time update system.
//!
//! Updates the shared [`WorldTime`] once per frame, applying `time_scale` to
//! the provided delta, and reports how many fixed simulation ticks the frame
//! covers.
use crate::resources::worldtime::{MAX_TICKS_PER_FRAME, WorldTime};

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `dt_ms` is expected to be the unscaled frame delta. Returns the number of
/// whole ticks to run this frame; any remainder carries over. A frame that
/// would need more than [`MAX_TICKS_PER_FRAME`] ticks drops the excess time.
pub fn update_world_time(wt: &mut WorldTime, dt_ms: f32) -> u32 {
    let scaled_dt = dt_ms.max(0.0) * wt.time_scale;
    wt.elapsed_ms += scaled_dt;
    wt.delta_ms = scaled_dt;
    wt.accumulator_ms += scaled_dt;

    let mut ticks = 0;
    while wt.accumulator_ms >= wt.tick_ms {
        wt.accumulator_ms -= wt.tick_ms;
        ticks += 1;
        if ticks == MAX_TICKS_PER_FRAME {
            wt.accumulator_ms = 0.0;
            break;
        }
    }
    wt.tick_count += ticks as u64;
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_carries_over() {
        let mut wt = WorldTime::default().with_tick_ms(10.0);
        assert_eq!(update_world_time(&mut wt, 25.0), 2);
        assert!((wt.accumulator_ms - 5.0).abs() < 1e-4);
        assert_eq!(update_world_time(&mut wt, 5.0), 1);
        assert_eq!(wt.tick_count, 3);
        assert!((wt.elapsed_ms - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_time_scale_applies() {
        let mut wt = WorldTime::default().with_tick_ms(10.0).with_time_scale(0.5);
        assert_eq!(update_world_time(&mut wt, 40.0), 2);
        assert!((wt.delta_ms - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut wt = WorldTime::default().with_tick_ms(1.0);
        assert_eq!(update_world_time(&mut wt, 10_000.0), MAX_TICKS_PER_FRAME);
        assert_eq!(wt.accumulator_ms, 0.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut wt = WorldTime::default();
        assert_eq!(update_world_time(&mut wt, -50.0), 0);
        assert_eq!(wt.elapsed_ms, 0.0);
    }
}
