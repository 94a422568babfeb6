//! Per-kind entity data.
//!
//! Submodules overview:
//! - [`boxcollider`] – shrink-corrected axis-aligned box overlap
//! - [`drawbatch`] – column storage handed to the renderer, and the
//!   [`Drawable`](drawbatch::Drawable) view
//! - [`entitypool`] – fixed-capacity pool of live entities of one kind
//! - [`eventsequence`] – timed phase sequencer for screen transitions
//! - [`player`] – the player ship
//! - [`sprite`] – sprite descriptors, animations and panels

pub mod boxcollider;
pub mod drawbatch;
pub mod entitypool;
pub mod eventsequence;
pub mod player;
pub mod sprite;
