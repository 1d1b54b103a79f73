//! Sound requests emitted by engines on the server side.
//!
//! The engine state machine never talks to the audio backend. It records
//! [`EngineSound`] cues, the engine tick system wraps them into
//! [`SoundRequest`] messages tagged with the engine's [`StableId`], and the
//! requests are replicated to the client world where
//! [`SoundInstanceRegistry`](crate::resources::soundregistry::SoundInstanceRegistry)
//! arbitrates them.

use bevy_ecs::message::Message;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::components::stableid::StableId;

/// Semantic identity of a looping engine sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundInstanceIdentifier {
    /// Normal running loop.
    EngineRunning,
    /// Muffled loop played while the engine is under water.
    EngineUnderwater,
    /// Warning hiss layered over the running loop when the engine gets hot.
    EngineOverheating,
}

/// Mixer category a sound plays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCategory {
    Neutral,
    Ambient,
}

impl SoundInstanceIdentifier {
    /// Registered sound event id.
    pub fn sound_id(&self) -> &'static str {
        match self {
            SoundInstanceIdentifier::EngineRunning => "boatism:boat_engine_running",
            SoundInstanceIdentifier::EngineUnderwater => "boatism:boat_engine_underwater",
            SoundInstanceIdentifier::EngineOverheating => "boatism:boat_engine_overheating",
        }
    }

    pub fn category(&self) -> SoundCategory {
        match self {
            SoundInstanceIdentifier::EngineUnderwater => SoundCategory::Ambient,
            _ => SoundCategory::Neutral,
        }
    }

    /// Whether this loop is exclusive among all main sounds.
    pub fn is_main_sound(&self) -> bool {
        !matches!(self, SoundInstanceIdentifier::EngineOverheating)
    }

    /// Identifiers preempted when this one starts.
    pub fn unsupported_instances(&self) -> SmallVec<[SoundInstanceIdentifier; 2]> {
        match self {
            SoundInstanceIdentifier::EngineUnderwater => {
                smallvec![SoundInstanceIdentifier::EngineOverheating]
            }
            _ => SmallVec::new(),
        }
    }
}

/// What an engine wants the client to do with its sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineSound {
    Play(SoundInstanceIdentifier),
    Stop(SoundInstanceIdentifier),
    /// Stop every sound this engine owns.
    StopAll,
}

/// A cue tagged with the engine that produced it.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub engine: StableId,
    pub cue: EngineSound,
}
