//! Movement system.
//!
//! Integrates every pool for one fixed tick. Velocities are in pixels per
//! tick, so no delta scaling happens here; frame-rate independence comes
//! from running a whole number of ticks per frame.

use crate::components::entitypool::EntityPool;
use crate::components::player::Player;
use crate::resources::screensize::ScreenSize;

/// Move, un-flash and cull every pool, then move the player.
pub fn movement(pools: &mut [&mut EntityPool], player: &mut Player, screen: &ScreenSize) {
    for pool in pools.iter_mut() {
        pool.integrate(screen);
    }
    player.integrate(screen);
}
