//! Messages exchanged between the simulation and its collaborators.
//!
//! Submodules:
//! - [`audio`] – commands for the background audio thread
//! - [`collision`] – summaries of collision passes
pub mod audio;
pub mod collision;
