//! Event and message types, and the observers that react to them.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`interaction`] – a player using a tool on an engine
//! - [`removal`] – engine and boat removal requests
//! - [`sound`] – sound identifiers and the requests replicated to clients
pub mod audio;
pub mod interaction;
pub mod removal;
pub mod sound;
