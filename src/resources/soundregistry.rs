//! Client-side registry of active engine sound instances.
//!
//! The registry decides which looping sounds may play together. Only
//! *stateful* instances (those carrying a [`SoundInstanceState`]) are managed.
//!
//! # Start rules
//!
//! New entries always win over existing ones. Against the entries active
//! before the call:
//! - a new main sound stops every other main sound
//! - a new instance stops every entry whose identifier it lists as unsupported
//!
//! # Keying
//!
//! With [`KeyingMode::Identifier`] entries are keyed by identifier alone, so
//! two engines playing the same identifier share one key and step on each
//! other's sounds. [`KeyingMode::IdentifierAndEngine`] scopes both exclusion
//! and `stop` to the originating engine.
//!
//! The registry lives for one client session; see [`begin_client_session`] and
//! [`end_client_session`].

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::components::stableid::StableId;
use crate::events::audio::{AudioCmd, AudioSink};
use crate::events::sound::{SoundCategory, SoundInstanceIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyingMode {
    #[default]
    Identifier,
    IdentifierAndEngine,
}

impl fmt::Display for KeyingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyingMode::Identifier => write!(f, "identifier"),
            KeyingMode::IdentifierAndEngine => write!(f, "identifier_and_engine"),
        }
    }
}

impl FromStr for KeyingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identifier" => Ok(KeyingMode::Identifier),
            "identifier_and_engine" => Ok(KeyingMode::IdentifierAndEngine),
            other => Err(format!("unknown sound keying '{}'", other)),
        }
    }
}

/// Exclusion behaviour of a stateful sound instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundInstanceState {
    pub main_sound: bool,
    pub unsupported: SmallVec<[SoundInstanceIdentifier; 2]>,
}

/// Handle to a playable sound owned by one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundInstance {
    pub engine: StableId,
    pub sound_id: String,
    pub category: SoundCategory,
    pub volume: f32,
    pub pitch: f32,
    pub state: Option<SoundInstanceState>,
}

impl SoundInstance {
    /// Plain instance without exclusion state.
    pub fn new(engine: StableId, sound_id: impl Into<String>) -> Self {
        Self {
            engine,
            sound_id: sound_id.into(),
            category: SoundCategory::Neutral,
            volume: 1.0,
            pitch: 1.0,
            state: None,
        }
    }

    pub fn with_state(mut self, state: SoundInstanceState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn is_main_sound(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.main_sound)
    }

    /// The stateful instance an engine plays for `identifier`.
    pub fn for_engine(engine: StableId, identifier: SoundInstanceIdentifier) -> Self {
        let mut instance = Self::new(engine, identifier.sound_id()).with_state(SoundInstanceState {
            main_sound: identifier.is_main_sound(),
            unsupported: identifier.unsupported_instances(),
        });
        instance.category = identifier.category();
        if identifier == SoundInstanceIdentifier::EngineUnderwater {
            instance.pitch = 0.6;
        }
        instance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundInstanceEntry {
    pub identifier: SoundInstanceIdentifier,
    pub instance: SoundInstance,
}

impl SoundInstanceEntry {
    pub fn new(identifier: SoundInstanceIdentifier, instance: SoundInstance) -> Self {
        Self {
            identifier,
            instance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Playing; `displaced` keys were stopped to make room.
    Started { displaced: usize },
    /// The instance has no exclusion state and was not registered.
    Rejected,
}

#[derive(Resource, Debug, Default)]
pub struct SoundInstanceRegistry {
    active: Vec<SoundInstanceEntry>,
    keying: KeyingMode,
}

impl SoundInstanceRegistry {
    pub fn new(keying: KeyingMode) -> Self {
        Self {
            active: Vec::new(),
            keying,
        }
    }

    pub fn keying(&self) -> KeyingMode {
        self.keying
    }

    pub fn active_entries(&self) -> &[SoundInstanceEntry] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_active(&self, identifier: SoundInstanceIdentifier) -> bool {
        self.active.iter().any(|e| e.identifier == identifier)
    }

    pub fn is_active_for(&self, identifier: SoundInstanceIdentifier, engine: StableId) -> bool {
        self.active
            .iter()
            .any(|e| e.identifier == identifier && e.instance.engine == engine)
    }

    /// Register and play `instance`, stopping whatever it excludes.
    pub fn start(
        &mut self,
        identifier: SoundInstanceIdentifier,
        instance: SoundInstance,
        sink: &mut impl AudioSink,
    ) -> StartOutcome {
        let Some(state) = instance.state.as_ref() else {
            warn!(
                "sound instance '{}' has no exclusion state, not registered",
                instance.sound_id
            );
            return StartOutcome::Rejected;
        };

        let mut displaced: Vec<SoundInstanceEntry> = Vec::new();
        for active in &self.active {
            let Some(active_state) = active.instance.state.as_ref() else {
                continue;
            };
            if self.keying == KeyingMode::IdentifierAndEngine
                && active.instance.engine != instance.engine
            {
                continue;
            }
            let excluded = (state.main_sound && active_state.main_sound)
                || state.unsupported.contains(&active.identifier);
            if excluded && !displaced.iter().any(|d| same_key(self.keying, d, active)) {
                displaced.push(active.clone());
            }
        }

        for entry in &displaced {
            debug!(
                "{:?} preempts {:?} (engine {})",
                identifier, entry.identifier, entry.instance.engine
            );
            self.stop(entry, sink);
        }

        sink.play(&instance);
        self.active.push(SoundInstanceEntry::new(identifier, instance));
        StartOutcome::Started {
            displaced: displaced.len(),
        }
    }

    /// Stop and remove every entry sharing `entry`'s key.
    pub fn stop(&mut self, entry: &SoundInstanceEntry, sink: &mut impl AudioSink) -> usize {
        let keying = self.keying;
        let before = self.active.len();
        self.active.retain(|active| {
            if same_key(keying, active, entry) {
                sink.stop(&active.instance);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    /// Stop `identifier` as requested by `engine`.
    pub fn stop_identifier(
        &mut self,
        identifier: SoundInstanceIdentifier,
        engine: StableId,
        sink: &mut impl AudioSink,
    ) -> usize {
        let probe = SoundInstanceEntry::new(
            identifier,
            SoundInstance::for_engine(engine, identifier),
        );
        self.stop(&probe, sink)
    }

    /// Stop and remove every entry owned by `engine`.
    pub fn stop_all_for_engine(&mut self, engine: StableId, sink: &mut impl AudioSink) -> usize {
        let before = self.active.len();
        self.active.retain(|active| {
            if active.instance.engine == engine {
                sink.stop(&active.instance);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    /// Stop and remove everything.
    pub fn stop_all(&mut self, sink: &mut impl AudioSink) -> usize {
        let stopped = self.active.len();
        for entry in self.active.drain(..) {
            sink.stop(&entry.instance);
        }
        stopped
    }
}

fn same_key(keying: KeyingMode, a: &SoundInstanceEntry, b: &SoundInstanceEntry) -> bool {
    match keying {
        KeyingMode::Identifier => a.identifier == b.identifier,
        KeyingMode::IdentifierAndEngine => {
            a.identifier == b.identifier && a.instance.engine == b.instance.engine
        }
    }
}

/// Create the session's registry.
///
/// Also makes sure `Messages<AudioCmd>` exists so the registry has somewhere
/// to send play/stop commands.
pub fn begin_client_session(world: &mut World, keying: KeyingMode) {
    world.insert_resource(SoundInstanceRegistry::new(keying));
    if !world.contains_resource::<Messages<AudioCmd>>() {
        world.insert_resource(Messages::<AudioCmd>::default());
    }
    info!("client session started (sound keying: {})", keying);
}

/// Stop every active sound and drop the session's registry.
pub fn end_client_session(world: &mut World) {
    let Some(mut registry) = world.remove_resource::<SoundInstanceRegistry>() else {
        return;
    };
    let stopped = match world.get_resource_mut::<Messages<AudioCmd>>() {
        Some(mut audio) => registry.stop_all(audio.as_mut()),
        None => registry.stop_all(&mut Vec::<AudioCmd>::new()),
    };
    info!("client session ended, {} sounds stopped", stopped);
}
