//! ECS components for entities.
//!
//! This module groups all component types attached to entities in the server
//! world: engines, boats, players and dropped items, plus the data they carry.
//!
//! Submodules overview:
//! - [`boat`] – towed vehicle kind and heading
//! - [`boatengine`] – the engine state machine: run state, power, loops to play
//! - [`capabilities`] – traits the engine data implements (drive, sound, persist)
//! - [`coupling`] – the two halves of an engine <-> boat link
//! - [`droppeditem`] – an engine item lying in the world
//! - [`equipment`] – armor and held item slots carried by an engine
//! - [`fuel`] – tank with overflow reporting
//! - [`player`] – the acting player's posture
//! - [`stableid`] – UUID that survives persistence and replication
//! - [`thermal`] – overheat accumulation and decay
//! - [`worldposition`] – 3D position and axis-aligned search boxes
pub mod boat;
pub mod boatengine;
pub mod capabilities;
pub mod coupling;
pub mod droppeditem;
pub mod equipment;
pub mod fuel;
pub mod player;
pub mod stableid;
pub mod thermal;
pub mod worldposition;
