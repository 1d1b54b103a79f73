//! Engine tuning resource.
//!
//! Holds every constant of the fuel, heat, power, coupling and sound rules.
//! Defaults are safe to run with; [`EngineConfig::load_from_file`] overrides
//! whatever keys the INI file provides.
//!
//! # Configuration File Format
//!
//! ```ini
//! [fuel]
//! max_fuel = 6000
//! per_tick = 1
//!
//! [heat]
//! max_overheat = 600
//! heat_step = 1
//! cool_step = 2
//! warning_fraction = 0.8
//!
//! [power]
//! max_power_level = 10
//!
//! [coupling]
//! search_radius = 5
//! removal_search_size = 10
//! mount_distance = 1.2
//!
//! [sound]
//! keying = identifier
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::soundregistry::KeyingMode;

const DEFAULT_MAX_FUEL: f32 = 6000.0;
const DEFAULT_FUEL_PER_TICK: f32 = 1.0;
const DEFAULT_MAX_OVERHEAT: i32 = 600;
const DEFAULT_HEAT_STEP: i32 = 1;
const DEFAULT_COOL_STEP: i32 = 2;
const DEFAULT_OVERHEAT_WARNING: f32 = 0.8;
const DEFAULT_MAX_POWER_LEVEL: i32 = 10;
const DEFAULT_COUPLING_SEARCH_RADIUS: f32 = 5.0;
const DEFAULT_REMOVAL_SEARCH_SIZE: f32 = 10.0;
const DEFAULT_MOUNT_DISTANCE: f32 = 1.2;
const DEFAULT_CONFIG_PATH: &str = "./boatism.ini";

/// Engine tuning shared by every engine in the world.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Tank capacity.
    pub max_fuel: f32,
    /// Fuel burnt per running tick.
    pub fuel_per_tick: f32,
    /// Heat at which the engine is forced to stop.
    pub max_overheat: i32,
    /// Heat gained per running tick above water.
    pub heat_step: i32,
    /// Heat lost per tick while stopped or submerged.
    pub cool_step: i32,
    /// Fraction of `max_overheat` at which the warning loop starts.
    pub overheat_warning: f32,
    /// Highest power level a user can select.
    pub max_power_level: i32,
    /// Half extent of the box searched for a boat when coupling.
    pub coupling_search_radius: f32,
    /// Edge length of the box searched for a boat's engine on boat removal.
    pub removal_search_size: f32,
    /// Distance behind the boat's pivot where a hooked engine sits.
    pub mount_distance: f32,
    /// How the client sound registry keys active entries.
    pub sound_keying: KeyingMode,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            max_fuel: DEFAULT_MAX_FUEL,
            fuel_per_tick: DEFAULT_FUEL_PER_TICK,
            max_overheat: DEFAULT_MAX_OVERHEAT,
            heat_step: DEFAULT_HEAT_STEP,
            cool_step: DEFAULT_COOL_STEP,
            overheat_warning: DEFAULT_OVERHEAT_WARNING,
            max_power_level: DEFAULT_MAX_POWER_LEVEL,
            coupling_search_radius: DEFAULT_COUPLING_SEARCH_RADIUS,
            removal_search_size: DEFAULT_REMOVAL_SEARCH_SIZE,
            mount_distance: DEFAULT_MOUNT_DISTANCE,
            sound_keying: KeyingMode::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Heat value at which the warning loop kicks in.
    pub fn overheat_warning_threshold(&self) -> i32 {
        let fraction = self.overheat_warning.clamp(0.0, 1.0);
        (self.max_overheat as f32 * fraction).ceil() as i32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;

        info!(
            "Loaded engine config: fuel={} (-{}/tick), overheat={} (+{}/-{}), power={}, keying={}",
            self.max_fuel,
            self.fuel_per_tick,
            self.max_overheat,
            self.heat_step,
            self.cool_step,
            self.max_power_level,
            self.sound_keying
        );
        Ok(())
    }

    /// Read configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    /// Apply every key present in `config`. On error nothing is changed.
    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let mut next = self.clone();

        // [fuel]
        if let Some(v) = config.getfloat("fuel", "max_fuel").ok().flatten() {
            next.max_fuel = v as f32;
        }
        if let Some(v) = config.getfloat("fuel", "per_tick").ok().flatten() {
            next.fuel_per_tick = v as f32;
        }

        // [heat]
        if let Some(v) = get_i32(config, "heat", "max_overheat") {
            next.max_overheat = v;
        }
        if let Some(v) = get_i32(config, "heat", "heat_step") {
            next.heat_step = v;
        }
        if let Some(v) = get_i32(config, "heat", "cool_step") {
            next.cool_step = v;
        }
        if let Some(v) = config.getfloat("heat", "warning_fraction").ok().flatten() {
            next.overheat_warning = v as f32;
        }

        // [power]
        if let Some(v) = get_i32(config, "power", "max_power_level") {
            next.max_power_level = v;
        }

        // [coupling]
        if let Some(v) = config.getfloat("coupling", "search_radius").ok().flatten() {
            next.coupling_search_radius = v as f32;
        }
        if let Some(v) = config
            .getfloat("coupling", "removal_search_size")
            .ok()
            .flatten()
        {
            next.removal_search_size = v as f32;
        }
        if let Some(v) = config.getfloat("coupling", "mount_distance").ok().flatten() {
            next.mount_distance = v as f32;
        }

        // [sound]
        if let Some(v) = config.get("sound", "keying") {
            next.sound_keying = v.parse()?;
        }

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("fuel", "max_fuel", Some(self.max_fuel.to_string()));
        config.set("fuel", "per_tick", Some(self.fuel_per_tick.to_string()));

        config.set("heat", "max_overheat", Some(self.max_overheat.to_string()));
        config.set("heat", "heat_step", Some(self.heat_step.to_string()));
        config.set("heat", "cool_step", Some(self.cool_step.to_string()));
        config.set(
            "heat",
            "warning_fraction",
            Some(self.overheat_warning.to_string()),
        );

        config.set(
            "power",
            "max_power_level",
            Some(self.max_power_level.to_string()),
        );

        config.set(
            "coupling",
            "search_radius",
            Some(self.coupling_search_radius.to_string()),
        );
        config.set(
            "coupling",
            "removal_search_size",
            Some(self.removal_search_size.to_string()),
        );
        config.set(
            "coupling",
            "mount_distance",
            Some(self.mount_distance.to_string()),
        );

        config.set("sound", "keying", Some(self.sound_keying.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved engine config to {:?}", self.config_path);
        Ok(())
    }
}

/// Integer key that fits in an `i32`; anything else is skipped.
fn get_i32(config: &Ini, section: &str, key: &str) -> Option<i32> {
    let v = config.getint(section, key).ok().flatten()?;
    match i32::try_from(v) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("[{}] {} = {} is out of range, ignored", section, key, v);
            None
        }
    }
}
