//! Long-lived data shared by systems.
//!
//! This module groups the data the orchestrator owns for the whole run and
//! hands to systems during a frame: configuration, timing, asset
//! descriptors, decoded input and the audio bridge. Each submodule documents
//! the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `fontstore` – character to glyph animation lookup
//! - `gameconfig` – INI-backed game configuration
//! - `gamestate` – current and pending screen, run score
//! - `input` – decoded directional and fire intents
//! - `screensize` – playfield dimensions in pixels
//! - `spritestore` – sprite descriptors keyed by string IDs
//! - `worldtime` – simulation time and fixed tick accumulator
pub mod audio;
pub mod fontstore;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod screensize;
pub mod spritestore;
pub mod worldtime;
