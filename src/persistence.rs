//! Engine <-> item persistence.
//!
//! A removed engine is turned into an [`EngineItem`]: a base-engine item
//! whose key/value document ([`EngineDocument`]) carries the engine's full
//! state. Placing the item again restores that state, with the selected power
//! level capped at half of the maximum.
//!
//! Document keys: `HookedEntity`, `ArmorItems`, `HeldItems`, `PowerOutput`,
//! `Overheat`, `Rotation`, `IsSubmerged`, `Fuel`, `IsLocked`. Missing keys read
//! as their defaults. The hooked boat id is written for reference only; a
//! restored engine is never re-hooked automatically.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::components::boatengine::{ArmRotation, BoatEngine};
use crate::components::capabilities::Persistable;
use crate::components::coupling::HookedBoat;
use crate::components::equipment::{Equipment, ItemStack};
use crate::components::stableid::StableId;
use crate::components::worldposition::WorldPosition;
use crate::resources::engineconfig::EngineConfig;

/// Item id of a boxed-up boat engine.
pub const BASE_ENGINE_ITEM: &str = "boatism:base_engine";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("entity {0:?} is not a boat engine")]
    NotAnEngine(Entity),

    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("item '{0}' is not a boat engine item")]
    WrongItem(String),

    #[error("malformed engine document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persisted engine state, keyed the way the item document stores it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineDocument {
    #[serde(rename = "HookedEntity", skip_serializing_if = "Option::is_none")]
    pub hooked_entity: Option<Uuid>,
    #[serde(rename = "ArmorItems")]
    pub armor_items: Vec<ItemStack>,
    #[serde(rename = "HeldItems")]
    pub held_items: Vec<ItemStack>,
    #[serde(rename = "PowerOutput")]
    pub power_output: i32,
    #[serde(rename = "Overheat")]
    pub overheat: i32,
    #[serde(rename = "Rotation")]
    pub rotation: [f32; 3],
    #[serde(rename = "IsSubmerged")]
    pub is_submerged: bool,
    #[serde(rename = "Fuel")]
    pub fuel: f32,
    #[serde(rename = "IsLocked")]
    pub is_locked: bool,
}

/// A retrievable item with its key/value document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineItem {
    pub id: String,
    pub nbt: Map<String, Value>,
}

impl EngineItem {
    /// Wrap a document into a base-engine item.
    pub fn from_document(doc: &EngineDocument) -> Result<Self, PersistError> {
        let nbt = match serde_json::to_value(doc)? {
            Value::Object(map) => map,
            other => {
                return Err(PersistError::Malformed(serde::de::Error::custom(format!(
                    "expected an object, got {other}"
                ))));
            }
        };
        Ok(Self {
            id: BASE_ENGINE_ITEM.to_string(),
            nbt,
        })
    }

    /// Decode the item's document.
    pub fn document(&self) -> Result<EngineDocument, PersistError> {
        if self.id != BASE_ENGINE_ITEM {
            return Err(PersistError::WrongItem(self.id.clone()));
        }
        Ok(serde_json::from_value(Value::Object(self.nbt.clone()))?)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Persistable for BoatEngine {
    fn write_document(&self, doc: &mut EngineDocument) -> Result<(), PersistError> {
        if !self.fuel.fuel().is_finite() {
            return Err(PersistError::NonFinite("Fuel"));
        }
        if !self.arm_rotation.is_finite() {
            return Err(PersistError::NonFinite("Rotation"));
        }
        doc.power_output = self.power_level();
        doc.overheat = self.overheat();
        doc.rotation = self.arm_rotation.to_array();
        doc.is_submerged = self.is_submerged();
        doc.fuel = self.fuel.fuel();
        doc.is_locked = self.is_locked();
        Ok(())
    }

    fn read_document(&mut self, doc: &EngineDocument) {
        self.set_power_level(doc.power_output.min(self.max_power_level() / 2));
        self.thermal.set(doc.overheat);
        self.arm_rotation = ArmRotation::from_array(doc.rotation);
        if !self.arm_rotation.is_finite() {
            self.arm_rotation = ArmRotation::default();
        }
        self.set_submerged(doc.is_submerged);
        self.fuel.set(doc.fuel);
        self.set_locked(doc.is_locked);
    }
}

impl Persistable for Equipment {
    fn write_document(&self, doc: &mut EngineDocument) -> Result<(), PersistError> {
        doc.armor_items = self.armor.to_vec();
        doc.held_items = self.held.to_vec();
        Ok(())
    }

    fn read_document(&mut self, doc: &EngineDocument) {
        self.set_armor(doc.armor_items.iter().cloned());
        self.set_held(doc.held_items.iter().cloned());
    }
}

/// Build the item for an engine's current state.
pub fn engine_to_item(
    engine: &BoatEngine,
    equipment: Option<&Equipment>,
    hooked: Option<StableId>,
) -> Result<EngineItem, PersistError> {
    let mut doc = EngineDocument {
        hooked_entity: hooked.map(|id| id.uuid()),
        ..EngineDocument::default()
    };
    engine.write_document(&mut doc)?;
    equipment
        .cloned()
        .unwrap_or_default()
        .write_document(&mut doc)?;
    EngineItem::from_document(&doc)
}

/// Rebuild a stopped engine and its equipment from an item.
pub fn engine_from_item(
    item: &EngineItem,
    config: &EngineConfig,
) -> Result<(BoatEngine, Equipment), PersistError> {
    let doc = item.document()?;
    let mut engine = BoatEngine::new(config);
    engine.read_document(&doc);
    // restored engines never carry pending sound cues
    engine.take_sound_cues();
    let mut equipment = Equipment::default();
    equipment.read_document(&doc);
    Ok((engine, equipment))
}

/// Build the item for an engine entity in `world`.
pub fn item_from_engine_entity(world: &World, engine: Entity) -> Result<EngineItem, PersistError> {
    let Some(state) = world.get::<BoatEngine>(engine) else {
        return Err(PersistError::NotAnEngine(engine));
    };
    let hooked = world.get::<HookedBoat>(engine).map(|h| h.boat_id);
    engine_to_item(state, world.get::<Equipment>(engine), hooked)
}

/// Spawn an engine entity from an item at `position`.
pub fn spawn_engine_from_item(
    world: &mut World,
    item: &EngineItem,
    position: WorldPosition,
) -> Result<Entity, PersistError> {
    let config = world.get_resource::<EngineConfig>().cloned().unwrap_or_default();
    let (engine, equipment) = engine_from_item(item, &config)?;
    Ok(world
        .spawn((StableId::new(), position, engine, equipment))
        .id())
}
