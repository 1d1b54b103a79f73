//! Coupling, interaction and removal integration tests.

use bevy_ecs::prelude::*;

use boatism::components::boat::BoatKind;
use boatism::components::boatengine::{ArmRotation, BoatEngine};
use boatism::components::coupling::{EngineCoupler, HookedBoat};
use boatism::components::droppeditem::DroppedItem;
use boatism::components::equipment::{Equipment, ItemStack};
use boatism::components::stableid::StableId;
use boatism::components::worldposition::WorldPosition;
use boatism::events::interaction::{ActionResult, EngineAction, InteractionEvent};
use boatism::events::removal::{RemoveBoatEvent, RemoveEngineEvent};
use boatism::events::sound::{EngineSound, SoundRequest};
use boatism::game::{setup_server_world, spawn_boat, spawn_boat_engine, spawn_player};
use boatism::persistence::{PersistError, spawn_engine_from_item};
use boatism::resources::engineconfig::EngineConfig;
use boatism::resources::worldside::WorldSide;
use boatism::systems::coupling::{coupled_engine, hook_onto, hooked_boat, is_locked, unhook};
use boatism::systems::interaction::handle_interaction;
use boatism::systems::removal::{remove_boat, remove_boat_engine};

fn make_world() -> World {
    setup_server_world(EngineConfig::new())
}

fn dropped_items(world: &mut World) -> Vec<DroppedItem> {
    let mut query = world.query::<&DroppedItem>();
    query.iter(world).cloned().collect()
}

#[test]
fn hooking_a_second_boat_releases_the_first() {
    let mut world = make_world();
    let a = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let b = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    assert!(hook_onto(&mut world, engine, a));
    assert!(hook_onto(&mut world, engine, b));

    assert_eq!(hooked_boat(&world, engine), Some(b));
    assert_eq!(coupled_engine(&world, b), Some(engine));
    assert_eq!(coupled_engine(&world, a), None);
}

#[test]
fn hooking_a_taken_boat_unhooks_its_engine() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let first = spawn_boat_engine(&mut world, WorldPosition::default());
    let second = spawn_boat_engine(&mut world, WorldPosition::default());

    assert!(hook_onto(&mut world, first, boat));
    assert!(hook_onto(&mut world, second, boat));

    assert_eq!(hooked_boat(&world, first), None);
    assert_eq!(hooked_boat(&world, second), Some(boat));
    assert_eq!(coupled_engine(&world, boat), Some(second));
}

#[test]
fn unhook_without_link_is_a_no_op() {
    let mut world = make_world();
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());
    assert!(!unhook(&mut world, engine));
}

#[test]
fn hook_onto_rejects_wrong_entities() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    assert!(!hook_onto(&mut world, boat, engine));
    assert!(world.get::<HookedBoat>(boat).is_none());
    assert!(world.get::<EngineCoupler>(engine).is_none());
}

#[test]
fn couple_action_hooks_the_nearest_boat() {
    let mut world = make_world();
    let far = spawn_boat(&mut world, WorldPosition::new(30.0, 0.0, 0.0), BoatKind::Boat);
    let chest = spawn_boat(&mut world, WorldPosition::new(1.0, 0.0, 0.0), BoatKind::ChestBoat);
    let plain = spawn_boat(&mut world, WorldPosition::new(-2.0, 0.0, 1.0), BoatKind::Boat);
    let player = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    let result = handle_interaction(&mut world, EngineAction::Couple, player, engine);

    assert_eq!(result, ActionResult::Success);
    assert_eq!(hooked_boat(&world, engine), Some(plain));
    assert_eq!(coupled_engine(&world, chest), None);
    assert_eq!(coupled_engine(&world, far), None);
}

#[test]
fn couple_action_passes_without_a_boat() {
    let mut world = make_world();
    spawn_boat(&mut world, WorldPosition::new(0.0, 0.0, 6.0), BoatKind::Boat);
    let player = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    let result = handle_interaction(&mut world, EngineAction::Couple, player, engine);

    assert_eq!(result, ActionResult::Pass);
    assert_eq!(hooked_boat(&world, engine), None);
}

#[test]
fn sneaking_toggles_the_lock_and_lock_blocks_coupling() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let sneaking = spawn_player(&mut world, WorldPosition::default(), true);
    let standing = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    let result = handle_interaction(&mut world, EngineAction::Couple, sneaking, engine);
    assert_eq!(result, ActionResult::Pass);
    assert!(is_locked(&world, engine));

    let result = handle_interaction(&mut world, EngineAction::Couple, standing, engine);
    assert_eq!(result, ActionResult::Pass);
    assert_eq!(coupled_engine(&world, boat), None);

    handle_interaction(&mut world, EngineAction::Couple, sneaking, engine);
    assert!(!is_locked(&world, engine));
    let result = handle_interaction(&mut world, EngineAction::Couple, standing, engine);
    assert_eq!(result, ActionResult::Success);
    assert_eq!(coupled_engine(&world, boat), Some(engine));
}

#[test]
fn lock_does_not_touch_an_existing_link() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let sneaking = spawn_player(&mut world, WorldPosition::default(), true);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());
    assert!(hook_onto(&mut world, engine, boat));

    handle_interaction(&mut world, EngineAction::Couple, sneaking, engine);

    assert!(is_locked(&world, engine));
    assert_eq!(hooked_boat(&world, engine), Some(boat));
}

#[test]
fn refuel_toggle_and_throttle_actions() {
    let mut world = make_world();
    let player = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    let result = handle_interaction(&mut world, EngineAction::ToggleEngine, player, engine);
    assert_eq!(result, ActionResult::Success);
    assert!(!world.get::<BoatEngine>(engine).unwrap().is_running());

    handle_interaction(&mut world, EngineAction::Refuel, player, engine);
    assert_eq!(world.get::<BoatEngine>(engine).unwrap().fuel.fuel(), 6000.0);

    handle_interaction(&mut world, EngineAction::ToggleEngine, player, engine);
    assert!(world.get::<BoatEngine>(engine).unwrap().is_running());

    handle_interaction(&mut world, EngineAction::ThrottleUp, player, engine);
    assert_eq!(world.get::<BoatEngine>(engine).unwrap().power_level(), 6);
    handle_interaction(&mut world, EngineAction::ThrottleDown, player, engine);
    handle_interaction(&mut world, EngineAction::ThrottleDown, player, engine);
    assert_eq!(world.get::<BoatEngine>(engine).unwrap().power_level(), 4);

    handle_interaction(&mut world, EngineAction::ToggleEngine, player, engine);
    assert!(!world.get::<BoatEngine>(engine).unwrap().is_running());
}

#[test]
fn client_side_interactions_are_ignored() {
    let mut world = make_world();
    world.insert_resource(WorldSide::Client);
    let player = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    let result = handle_interaction(&mut world, EngineAction::Refuel, player, engine);

    assert_eq!(result, ActionResult::Pass);
    assert!(world.get::<BoatEngine>(engine).unwrap().fuel.is_empty());
}

#[test]
fn interaction_event_runs_through_the_observer() {
    let mut world = make_world();
    let player = spawn_player(&mut world, WorldPosition::default(), false);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    world.trigger(InteractionEvent {
        action: EngineAction::Refuel,
        actor: player,
        target: engine,
    });
    world.flush();

    assert!(!world.get::<BoatEngine>(engine).unwrap().fuel.is_empty());
}

#[test]
fn removing_an_engine_drops_its_item_and_clears_the_link() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::new(3.0, 1.0, -2.0));
    assert!(hook_onto(&mut world, engine, boat));
    let boat_id = *world.get::<StableId>(boat).unwrap();
    let engine_id = *world.get::<StableId>(engine).unwrap();
    {
        let mut state = world.get_mut::<BoatEngine>(engine).unwrap();
        state.fuel.set(42.0);
        state.thermal.set(7);
        state.set_locked(true);
        state.start();
    }
    world
        .get_mut::<Equipment>(engine)
        .unwrap()
        .set_held([ItemStack::new("minecraft:stick", 1)]);

    let dropped = remove_boat_engine(&mut world, engine).unwrap();

    assert!(world.get_entity(engine).is_err());
    assert!(world.get::<EngineCoupler>(boat).is_none());
    let position = *world.get::<WorldPosition>(dropped).unwrap();
    assert_eq!(position, WorldPosition::new(3.0, 1.0, -2.0));

    let doc = world.get::<DroppedItem>(dropped).unwrap().item.document().unwrap();
    assert_eq!(doc.fuel, 42.0);
    assert_eq!(doc.overheat, 7);
    assert!(doc.is_locked);
    assert_eq!(doc.hooked_entity, Some(boat_id.uuid()));
    assert_eq!(doc.armor_items.len(), 4);
    assert_eq!(doc.held_items[0], ItemStack::new("minecraft:stick", 1));
    assert!(doc.held_items[1].is_empty());

    let requests: Vec<SoundRequest> = world
        .resource_mut::<Messages<SoundRequest>>()
        .drain()
        .collect();
    assert_eq!(
        requests.last(),
        Some(&SoundRequest {
            engine: engine_id,
            cue: EngineSound::StopAll,
        })
    );
    assert_eq!(
        requests
            .iter()
            .filter(|r| r.cue == EngineSound::StopAll)
            .count(),
        1
    );
}

#[test]
fn failed_removal_leaves_engine_and_link_intact() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());
    assert!(hook_onto(&mut world, engine, boat));
    world.get_mut::<BoatEngine>(engine).unwrap().arm_rotation =
        ArmRotation::new(f32::NAN, 0.0, 0.0);

    let result = remove_boat_engine(&mut world, engine);

    assert!(matches!(result, Err(PersistError::NonFinite("Rotation"))));
    assert!(world.get_entity(engine).is_ok());
    assert_eq!(coupled_engine(&world, boat), Some(engine));
    assert!(dropped_items(&mut world).is_empty());
}

#[test]
fn removing_a_non_engine_is_an_error() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);

    let result = remove_boat_engine(&mut world, boat);

    assert!(matches!(result, Err(PersistError::NotAnEngine(e)) if e == boat));
    assert!(world.get_entity(boat).is_ok());
}

#[test]
fn removing_a_boat_drops_its_engine() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::new(0.0, 0.0, 0.0), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::new(0.0, 0.0, -1.2));
    assert!(hook_onto(&mut world, engine, boat));

    let dropped = remove_boat(&mut world, boat).unwrap();

    assert!(dropped.is_some());
    assert!(world.get_entity(boat).is_err());
    assert!(world.get_entity(engine).is_err());
    assert_eq!(dropped_items(&mut world).len(), 1);
}

#[test]
fn removing_an_empty_boat_drops_nothing() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::ChestBoat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());

    assert_eq!(remove_boat(&mut world, boat).unwrap(), None);
    assert!(world.get_entity(boat).is_err());
    assert!(world.get_entity(engine).is_ok());
}

#[test]
fn removal_events_run_through_observers() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());
    let loose = spawn_boat_engine(&mut world, WorldPosition::new(50.0, 0.0, 0.0));
    assert!(hook_onto(&mut world, engine, boat));

    world.trigger(RemoveBoatEvent { boat });
    world.trigger(RemoveEngineEvent { engine: loose });
    world.flush();

    assert!(world.get_entity(boat).is_err());
    assert!(world.get_entity(engine).is_err());
    assert!(world.get_entity(loose).is_err());
    assert_eq!(dropped_items(&mut world).len(), 2);
}

#[test]
fn restored_engine_halves_power_and_stays_unhooked() {
    let mut world = make_world();
    let boat = spawn_boat(&mut world, WorldPosition::default(), BoatKind::Boat);
    let engine = spawn_boat_engine(&mut world, WorldPosition::default());
    assert!(hook_onto(&mut world, engine, boat));
    {
        let mut state = world.get_mut::<BoatEngine>(engine).unwrap();
        state.set_power_level(10);
        state.fuel.set(100.0);
    }
    let dropped = remove_boat_engine(&mut world, engine).unwrap();
    let item = world.get::<DroppedItem>(dropped).unwrap().item.clone();

    let restored = spawn_engine_from_item(&mut world, &item, WorldPosition::default()).unwrap();

    let state = world.get::<BoatEngine>(restored).unwrap();
    assert_eq!(state.power_level(), 5);
    assert_eq!(state.fuel.fuel(), 100.0);
    assert!(!state.is_running());
    assert_eq!(hooked_boat(&world, restored), None);
    assert_eq!(coupled_engine(&world, boat), None);
}
