//! Boatism library.
//!
//! A boat-mounted engine for a voxel sandbox: fuel, heat, coupling to a towed
//! boat, and arbitration of the engine's looping sounds. Exposes the ECS
//! components, resources, systems and events for the binary and for
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod persistence;
pub mod resources;
pub mod systems;
