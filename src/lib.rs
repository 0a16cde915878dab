#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The world model of a voxel game: procedural terrain, a chunked block store that
//! follows the player, player edits that survive chunk churn, and view-direction
//! targeting for digging and building.
//!
//! ## Key Modules
//!
//! * `config` - Session tunables, loadable from JSON
//! * `engine_state` - The per-tick driver, the inventory and the voxel world
//! * `error` - The crate's error type
//!
//! ## Architecture
//!
//! The crate is headless. A renderer or game loop sits outside it and calls
//! [`engine_state::EngineState::update`] once per tick with the player's position
//! and view direction. Everything runs on the caller's thread.
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     if let Err(error) = voxel_world::run() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

use cgmath::{Point3, Vector3};
use log::{debug, info};

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::{TerrainSettings, WorldConfig};
pub use engine_state::{EngineState, FrameReport, PlayerAction};
pub use error::WorldError;

use engine_state::voxels::block::texture_file;

/// Environment variable naming a JSON config file.
pub const CONFIG_PATH_VARIABLE: &str = "VOXEL_WORLD_CONFIG";

/// Ticks the headless walk runs for.
const WALK_TICKS: u32 = 64;
/// Distance the player covers each tick.
const WALK_STEP: f32 = 0.5;

/// Loads the config from [`CONFIG_PATH_VARIABLE`], or the defaults if it is unset.
pub fn load_config() -> Result<WorldConfig, WorldError> {
    match std::env::var_os(CONFIG_PATH_VARIABLE) {
        Some(path) => {
            info!("Loading config from {:?}", path);
            WorldConfig::load(path)
        }
        None => {
            info!("{} not set, using default config", CONFIG_PATH_VARIABLE);
            Ok(WorldConfig::default())
        }
    }
}

/// Runs a headless session: the player walks along +x, digging the block ahead
/// of them and placing it back every few ticks.
pub fn run() -> Result<(), WorldError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = load_config()?;
    let start = Point3::from(config.player_start);
    let mut engine_state = EngineState::new(config)?;
    info!(
        "World ready: {} chunks, {} blocks",
        engine_state.world.loaded_chunks().count(),
        engine_state.world.block_count()
    );

    let forward = Vector3::new(1.0, -1.0, 0.0);
    let mut dug = 0;
    let mut placed = 0;

    for tick in 0..WALK_TICKS {
        let position = start + Vector3::new(tick as f32 * WALK_STEP, 0.0, 0.0);
        let actions = PlayerAction {
            dig: tick % 4 == 0,
            place: tick % 4 == 2,
            cycle_block_type: tick % 16 == 15,
        };
        let report = engine_state.update(position, forward, &actions);

        if let Some(chunk) = report.changed_chunk {
            info!(
                "Entered chunk {:?}: {} chunks, {} blocks resident",
                chunk,
                engine_state.world.loaded_chunks().count(),
                engine_state.world.block_count()
            );
        }
        if !report.dug.is_air() {
            dug += 1;
        }
        if report.placed {
            placed += 1;
            if let Ok(texture) = texture_file(engine_state.placing_type()) {
                debug!("Placed {}", texture);
            }
        }
    }

    info!(
        "Walk finished: dug {}, placed {}, {} edits, {} visible",
        dug,
        placed,
        engine_state.world.player_edits().len(),
        engine_state
            .visible_blocks(start + Vector3::new(WALK_TICKS as f32 * WALK_STEP, 0.0, 0.0), forward)
            .len()
    );
    for (block_type, count) in engine_state.inventory.iter() {
        info!("Holding {} {}", count, block_type.name());
    }

    Ok(())
}
