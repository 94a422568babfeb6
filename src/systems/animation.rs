//! Animation system.
//!
//! Pools advance their animations at a fixed cadence counted in simulation
//! ticks, so animation speed does not depend on the frame rate or the tick
//! rate.

use crate::components::entitypool::EntityPool;

/// Step animations on every pool when `tick` falls on the cadence.
///
/// Returns true when a step happened.
pub fn animation(pools: &mut [&mut EntityPool], tick: u64, cadence: u32) -> bool {
    let cadence = u64::from(cadence.max(1));
    if tick % cadence != 0 {
        return false;
    }
    for pool in pools.iter_mut() {
        pool.update_animations();
    }
    true
}
