//! Boatism headless simulation.
//!
//! Runs a scripted scenario against the server and client worlds: a boat, a
//! player and an engine are spawned, the engine is coupled, refuelled and
//! started, then ticked until the boat is removed or the tick budget runs out.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 400 --submerge-at 120 --remove-boat-at 300
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};

use boatism::components::boat::BoatKind;
use boatism::components::boatengine::BoatEngine;
use boatism::components::droppeditem::DroppedItem;
use boatism::components::worldposition::WorldPosition;
use boatism::events::interaction::{EngineAction, InteractionEvent};
use boatism::events::removal::RemoveBoatEvent;
use boatism::game::{
    client_schedule, run_tick, server_schedule, setup_client_world, setup_server_world,
    spawn_boat, spawn_boat_engine, spawn_player,
};
use boatism::resources::audio::{setup_audio, shutdown_audio};
use boatism::resources::engineconfig::EngineConfig;
use boatism::resources::soundregistry::end_client_session;
use boatism::resources::waterlevel::WaterLevel;

/// Boatism engine simulation
#[derive(Parser)]
#[command(version, about = "Headless boat engine simulation")]
struct Cli {
    /// Engine configuration file. Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./boatism.ini")]
    config: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Raise the water above the engine at this tick.
    #[arg(long, value_name = "TICK")]
    submerge_at: Option<u32>,

    /// Break the boat at this tick, dropping its engine as an item.
    #[arg(long, value_name = "TICK")]
    remove_boat_at: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    let mut server = setup_server_world(config.clone());
    let mut client = setup_client_world(&config);
    setup_audio(&mut client);
    server.insert_resource(WaterLevel::new(0.0));

    let boat = spawn_boat(&mut server, WorldPosition::new(0.0, 0.5, 0.0), BoatKind::Boat);
    let player = spawn_player(&mut server, WorldPosition::new(1.0, 0.5, 1.0), false);
    let engine = spawn_boat_engine(&mut server, WorldPosition::new(2.0, 0.5, 0.0));

    for action in [
        EngineAction::Couple,
        EngineAction::Refuel,
        EngineAction::ToggleEngine,
    ] {
        server.trigger(InteractionEvent {
            action,
            actor: player,
            target: engine,
        });
        server.flush();
    }

    let mut server_schedule = server_schedule();
    let mut client_schedule = client_schedule();
    for tick in 0..cli.ticks {
        if cli.submerge_at == Some(tick) {
            info!("tick {}: water rises", tick);
            server.insert_resource(WaterLevel::new(10.0));
        }
        if cli.remove_boat_at == Some(tick) {
            info!("tick {}: boat breaks", tick);
            server.trigger(RemoveBoatEvent { boat });
            server.flush();
        }

        run_tick(
            &mut server,
            &mut client,
            &mut server_schedule,
            &mut client_schedule,
        );

        if tick % 50 == 0 {
            if let Some(state) = server.get::<BoatEngine>(engine) {
                info!(
                    "tick {}: running={} power={} overheat={} fuel={}",
                    tick,
                    state.is_running(),
                    state.power_output(),
                    state.overheat(),
                    state.fuel.fuel()
                );
            }
        }
    }

    let mut dropped = server.query::<&DroppedItem>();
    for item in dropped.iter(&server) {
        match item.item.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("dropped item cannot be shown: {}", e),
        }
    }

    end_client_session(&mut client);
    client_schedule.run(&mut client);
    shutdown_audio(&mut client);
    info!("simulation finished");
}
