//! Skyraid library.
//!
//! A small 2D arcade shooter core: fixed-capacity entity pools with
//! swap-removal, box collision with shrink correction, a time-driven event
//! sequencer for screen transitions and an instanced-batch hand-off to an
//! external renderer. Exposed as a library for the headless driver and the
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
