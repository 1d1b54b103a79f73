//! The boat engine: state machine, power output and sound cues.
//!
//! [`BoatEngine`] owns the engine's [`FuelStore`] and [`ThermalModel`] and
//! moves between [`EngineState::Stopped`] and [`EngineState::Running`].
//!
//! # Tick order while running
//!
//! 1. An engine that reached maximum heat on the previous tick stops.
//! 2. Fuel is burnt; an empty tank stops the engine.
//! 3. Heat is accumulated (or shed when submerged).
//! 4. Power output is recomputed from the selected power level and the heat.
//! 5. The wanted sound loop is requested if it changed.
//!
//! Sound changes are queued as [`EngineSound`] cues and drained by
//! [`crate::systems::engine::boat_engine_tick_system`].
//!
//! The lock flag only gates coupling; it is stored here but never consulted
//! by `start`/`stop`.

use bevy_ecs::prelude::Component;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::fuel::FuelStore;
use crate::components::thermal::ThermalModel;
use crate::events::sound::{EngineSound, SoundInstanceIdentifier};
use crate::resources::engineconfig::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
}

/// Why a running engine stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    OutOfFuel,
    Overheated,
}

/// Rotation of the engine's steering arm, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmRotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl ArmRotation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.pitch, self.yaw, self.roll]
    }

    pub fn from_array(values: [f32; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

#[derive(Component, Debug, Clone)]
pub struct BoatEngine {
    pub fuel: FuelStore,
    pub thermal: ThermalModel,
    pub arm_rotation: ArmRotation,
    state: EngineState,
    power_level: i32,
    power_output: i32,
    max_power_level: i32,
    fuel_per_tick: f32,
    warning_threshold: i32,
    locked: bool,
    submerged: bool,
    playing_loop: Option<SoundInstanceIdentifier>,
    warning_playing: bool,
    cues: SmallVec<[EngineSound; 4]>,
}

impl BoatEngine {
    /// Stopped engine with an empty tank, tuned by `config`.
    ///
    /// The selected power level starts at half of the maximum.
    pub fn new(config: &EngineConfig) -> Self {
        let max_power_level = config.max_power_level.max(0);
        Self {
            fuel: FuelStore::new(config.max_fuel),
            thermal: ThermalModel::new(config.max_overheat, config.heat_step, config.cool_step),
            arm_rotation: ArmRotation::default(),
            state: EngineState::Stopped,
            power_level: max_power_level / 2,
            power_output: 0,
            max_power_level,
            fuel_per_tick: config.fuel_per_tick.max(0.0),
            warning_threshold: config.overheat_warning_threshold(),
            locked: false,
            submerged: false,
            playing_loop: None,
            warning_playing: false,
            cues: SmallVec::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Start the engine. Returns `true` if the state changed.
    ///
    /// Starting an empty engine, or one already running, does nothing.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        if self.fuel.is_empty() {
            debug!("start refused: no fuel");
            return false;
        }
        self.state = EngineState::Running;
        self.recompute_power();
        self.sync_sound_loops();
        true
    }

    /// Stop the engine. Returns `true` if the state changed.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = EngineState::Stopped;
        self.power_output = 0;
        self.playing_loop = None;
        self.warning_playing = false;
        self.cues.push(EngineSound::StopAll);
        true
    }

    /// Advance the engine by one tick.
    ///
    /// Returns the reason if the engine stopped on its own during this tick.
    pub fn tick(&mut self) -> Option<StopReason> {
        if !self.is_running() {
            self.thermal.tick(false, self.submerged);
            self.power_output = 0;
            return None;
        }
        if self.thermal.is_overheated() {
            self.stop();
            return Some(StopReason::Overheated);
        }
        self.fuel.consume(self.fuel_per_tick);
        if self.fuel.is_empty() {
            self.stop();
            return Some(StopReason::OutOfFuel);
        }
        self.thermal.tick(true, self.submerged);
        self.recompute_power();
        self.sync_sound_loops();
        None
    }

    /// Power level selected by the user.
    pub fn power_level(&self) -> i32 {
        self.power_level
    }

    pub fn max_power_level(&self) -> i32 {
        self.max_power_level
    }

    /// Select a power level, clamped to `0..=max_power_level`.
    pub fn set_power_level(&mut self, level: i32) {
        self.power_level = level.clamp(0, self.max_power_level);
        if self.is_running() {
            self.recompute_power();
        }
    }

    pub fn increase_power(&mut self) -> i32 {
        self.set_power_level(self.power_level.saturating_add(1));
        self.power_level
    }

    pub fn decrease_power(&mut self) -> i32 {
        self.set_power_level(self.power_level.saturating_sub(1));
        self.power_level
    }

    /// Effective output after fuel and heat are taken into account.
    pub fn power_output(&self) -> i32 {
        self.power_output
    }

    fn recompute_power(&mut self) {
        if self.fuel.is_empty() {
            self.power_output = 0;
            return;
        }
        let max = self.thermal.max_overheat() as i64;
        let headroom = max - self.thermal.overheat() as i64;
        self.power_output = (self.power_level as i64 * headroom / max) as i32;
    }

    pub fn overheat(&self) -> i32 {
        self.thermal.overheat()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Flip the lock flag and return the new value.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    pub fn is_submerged(&self) -> bool {
        self.submerged
    }

    pub fn set_submerged(&mut self, submerged: bool) {
        if self.submerged == submerged {
            return;
        }
        self.submerged = submerged;
        self.sync_sound_loops();
    }

    /// Loop currently requested from the client, if any.
    pub fn playing_loop(&self) -> Option<SoundInstanceIdentifier> {
        self.playing_loop
    }

    /// Take the queued sound cues, oldest first.
    pub fn take_sound_cues(&mut self) -> SmallVec<[EngineSound; 4]> {
        std::mem::take(&mut self.cues)
    }

    fn sync_sound_loops(&mut self) {
        if !self.is_running() {
            return;
        }
        let wanted = if self.submerged {
            SoundInstanceIdentifier::EngineUnderwater
        } else {
            SoundInstanceIdentifier::EngineRunning
        };
        // the client drops the warning when a loop that excludes it starts
        let warning_allowed = !wanted
            .unsupported_instances()
            .contains(&SoundInstanceIdentifier::EngineOverheating);
        if self.playing_loop != Some(wanted) {
            self.cues.push(EngineSound::Play(wanted));
            self.playing_loop = Some(wanted);
            if !warning_allowed {
                self.warning_playing = false;
            }
        }

        let hot = warning_allowed && self.thermal.overheat() >= self.warning_threshold;
        if hot && !self.warning_playing {
            self.cues
                .push(EngineSound::Play(SoundInstanceIdentifier::EngineOverheating));
            self.warning_playing = true;
        } else if !hot && self.warning_playing {
            self.cues
                .push(EngineSound::Stop(SoundInstanceIdentifier::EngineOverheating));
            self.warning_playing = false;
        }
    }
}
