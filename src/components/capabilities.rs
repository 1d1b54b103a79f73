//! Capability traits implemented by engine data.
//!
//! Systems that only need one aspect of an engine are written against these
//! traits instead of the concrete [`BoatEngine`].

use smallvec::SmallVec;

use crate::components::boatengine::{BoatEngine, StopReason};
use crate::events::sound::EngineSound;
use crate::persistence::{EngineDocument, PersistError};

/// Something that can be started, stopped and ticked for power.
pub trait Drivable {
    fn start(&mut self) -> bool;
    fn stop(&mut self) -> bool;
    fn is_running(&self) -> bool;
    fn power_output(&self) -> i32;
    fn tick(&mut self) -> Option<StopReason>;
}

/// Something that queues sound cues for the client.
pub trait Soundful {
    fn take_sound_cues(&mut self) -> SmallVec<[EngineSound; 4]>;
}

/// Something that can be written to and restored from an engine document.
pub trait Persistable {
    fn write_document(&self, doc: &mut EngineDocument) -> Result<(), PersistError>;
    fn read_document(&mut self, doc: &EngineDocument);
}

impl Drivable for BoatEngine {
    fn start(&mut self) -> bool {
        BoatEngine::start(self)
    }

    fn stop(&mut self) -> bool {
        BoatEngine::stop(self)
    }

    fn is_running(&self) -> bool {
        BoatEngine::is_running(self)
    }

    fn power_output(&self) -> i32 {
        BoatEngine::power_output(self)
    }

    fn tick(&mut self) -> Option<StopReason> {
        BoatEngine::tick(self)
    }
}

impl Soundful for BoatEngine {
    fn take_sound_cues(&mut self) -> SmallVec<[EngineSound; 4]> {
        BoatEngine::take_sound_cues(self)
    }
}
