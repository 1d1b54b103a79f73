use bevy_ecs::prelude::Resource;

/// Which side of the game a world simulates.
///
/// Interactions only act on the server; the client world only mirrors sounds.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WorldSide {
    #[default]
    Server,
    Client,
}

impl WorldSide {
    pub fn is_client(&self) -> bool {
        *self == WorldSide::Client
    }
}
