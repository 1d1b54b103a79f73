//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `engineconfig` – engine tuning loaded from an INI file
//! - `soundregistry` – client-side arbitration of active sound instances
//! - `waterlevel` – water surface used for submersion
//! - `worldside` – whether a world is the server or a client
pub mod audio;
pub mod engineconfig;
pub mod soundregistry;
pub mod waterlevel;
pub mod worldside;
