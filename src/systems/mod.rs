//! Systems and world-level operations.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`coupling`] – hook and unhook engines, follow and integrity systems
//! - [`engine`] – engine ticks and submersion
//! - [`interaction`] – dispatch player actions on engines
//! - [`lookup`] – find boats and engines inside a box
//! - [`removal`] – turn engines into dropped items
//! - [`replication`] – ship sound requests from server to client
//! - [`sound`] – apply replicated requests to the registry
pub mod audio;
pub mod coupling;
pub mod engine;
pub mod interaction;
pub mod lookup;
pub mod removal;
pub mod replication;
pub mod sound;
