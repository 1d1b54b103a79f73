//! Spatial entity lookups used by coupling and removal.
//!
//! The first match inside the search box wins; there is no tie-break beyond
//! iteration order, except that plain boats are preferred over chest boats.

use bevy_ecs::prelude::*;

use crate::components::boat::Boat;
use crate::components::boatengine::BoatEngine;
use crate::components::stableid::StableId;
use crate::components::worldposition::{SearchBox, WorldPosition};

/// First boat inside `search`, plain boats before chest boats.
pub fn find_boat_in(world: &mut World, search: SearchBox) -> Option<Entity> {
    let mut query = world.query::<(Entity, &WorldPosition, &Boat)>();
    let mut candidates: Vec<(Entity, &Boat)> = query
        .iter(world)
        .filter(|(_, pos, _)| search.contains(pos))
        .map(|(entity, _, boat)| (entity, boat))
        .collect();
    // stable: keeps iteration order within a kind
    candidates.sort_by_key(|(_, boat)| boat.kind);
    candidates.first().map(|(entity, _)| *entity)
}

/// First boat within `half_extent` blocks of `center`.
pub fn find_boat_near(world: &mut World, center: WorldPosition, half_extent: f32) -> Option<Entity> {
    find_boat_in(world, SearchBox::around(center, half_extent))
}

/// Engine with stable id `id` inside a box of edge `size` around `center`.
pub fn find_engine_by_id(
    world: &mut World,
    id: StableId,
    center: WorldPosition,
    size: f32,
) -> Option<Entity> {
    let search = SearchBox::of_size(center, size);
    let mut query = world.query_filtered::<(Entity, &StableId, &WorldPosition), With<BoatEngine>>();
    query
        .iter(world)
        .find(|(_, engine_id, pos)| **engine_id == id && search.contains(pos))
        .map(|(entity, _, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boat::BoatKind;
    use crate::resources::engineconfig::EngineConfig;

    #[test]
    fn prefers_plain_boats_and_respects_range() {
        let mut world = World::new();
        let chest = world
            .spawn((WorldPosition::new(1.0, 0.0, 0.0), Boat::new(BoatKind::ChestBoat)))
            .id();
        assert_eq!(
            find_boat_near(&mut world, WorldPosition::default(), 5.0),
            Some(chest)
        );

        let boat = world
            .spawn((WorldPosition::new(-2.0, 0.0, 3.0), Boat::new(BoatKind::Boat)))
            .id();
        world.spawn((WorldPosition::new(30.0, 0.0, 0.0), Boat::new(BoatKind::Boat)));
        assert_eq!(
            find_boat_near(&mut world, WorldPosition::default(), 5.0),
            Some(boat)
        );
        assert_eq!(
            find_boat_near(&mut world, WorldPosition::new(0.0, 50.0, 0.0), 5.0),
            None
        );
    }

    #[test]
    fn finds_engine_by_id_in_box() {
        let mut world = World::new();
        let id = StableId::new();
        let engine = world
            .spawn((
                id,
                WorldPosition::new(3.0, 0.0, 0.0),
                BoatEngine::new(&EngineConfig::new()),
            ))
            .id();
        assert_eq!(
            find_engine_by_id(&mut world, id, WorldPosition::default(), 10.0),
            Some(engine)
        );
        assert_eq!(
            find_engine_by_id(&mut world, id, WorldPosition::new(20.0, 0.0, 0.0), 10.0),
            None
        );
        assert_eq!(
            find_engine_by_id(&mut world, StableId::new(), WorldPosition::default(), 10.0),
            None
        );
    }
}
