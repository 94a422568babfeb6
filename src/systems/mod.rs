//! Per-frame systems.
//!
//! Free functions that advance the simulation over the pools handed to them
//! by the orchestrator.
//!
//! Submodules overview
//! - [`animation`] – step pool animations on a fixed tick cadence
//! - [`audio`] – consumer side of the audio thread
//! - [`collision`] – bullet and hazard resolution policies
//! - [`movement`] – integrate pools and the player for one tick
//! - [`render`] – hand batches to a renderer backend
//! - [`screens`] – title, ready and game-over sequences and their captions
//! - [`spawner`] – random enemy spawns and enemy fire
//! - [`time`] – update simulation time and count fixed ticks

pub mod animation;
pub mod audio;
pub mod collision;
pub mod movement;
pub mod render;
pub mod screens;
pub mod spawner;
pub mod time;
