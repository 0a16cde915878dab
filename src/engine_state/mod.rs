//! # Engine State Module
//!
//! The driver-facing side of the engine: everything a game loop calls once per tick.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world, the player's inventory and the current chunk
//! * `PlayerAction` - What the player asked for this tick
//! * `inventory` - Blocks the player has dug and can place again
//! * `voxels` - Blocks, chunks, terrain generation and world storage
//!
//! ## Architecture
//!
//! Rendering, windowing and camera motion live outside this crate. A driver reports
//! the player's position and view direction each tick through [`EngineState::update`],
//! and asks [`EngineState::visible_blocks`] and [`EngineState::target_block`] what to
//! draw and outline.

use cgmath::{Point3, Vector3};

use crate::config::WorldConfig;
use crate::error::WorldError;
use inventory::Inventory;
use voxels::{
    block::{block_type::BlockType, Block},
    terrain::{TerrainGenerator, TerrainSource},
    world::World,
};

pub mod inventory;
pub mod voxels;

/// The main state container for a play session.
///
/// # Examples
///
/// ```
/// use cgmath::{Point3, Vector3};
/// use voxel_world::{config::WorldConfig, engine_state::{EngineState, PlayerAction}};
///
/// let mut config = WorldConfig::default();
/// config.terrain.seed = Some(7);
/// let mut engine_state = EngineState::new(config).unwrap();
///
/// let position = Point3::new(0.0, 8.0, 0.0);
/// let forward = Vector3::new(1.0, -1.0, 0.0);
/// let report = engine_state.update(position, forward, &PlayerAction::default());
/// assert!(report.changed_chunk.is_none());
/// ```
pub struct EngineState {
    /// The voxel world around the player
    pub world: World,
    /// Blocks the player holds
    pub inventory: Inventory,
    /// Session configuration
    config: WorldConfig,
    /// Chunk the player was in at the end of the previous tick
    current_player_chunk_position: Point3<i32>,
    /// Type the next placement will use
    placing_type: BlockType,
}

/// What happened during one call to [`EngineState::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// The chunk the player moved into, if they crossed a chunk boundary
    pub changed_chunk: Option<Point3<i32>>,
    /// Type of the block dug out, or `AIR` if nothing was dug
    pub dug: BlockType,
    /// Whether a block was placed
    pub placed: bool,
}

impl EngineState {
    /// Creates a session with procedural terrain built from `config`.
    ///
    /// # Errors
    ///
    /// Any validation error in `config`.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let terrain = TerrainGenerator::from_settings(&config.terrain)?;
        Self::with_terrain(config, Box::new(terrain))
    }

    /// Creates a session over any terrain source.
    pub fn with_terrain(
        config: WorldConfig,
        terrain: Box<dyn TerrainSource>,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        let start = Point3::from(config.player_start);
        let world = World::new(terrain, start, config.chunk_radius)?;
        let current_player_chunk_position = world.get_chunk(start);

        Ok(EngineState {
            world,
            inventory: Inventory::new(),
            config,
            current_player_chunk_position,
            placing_type: BlockType::GRASS,
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Chunk the player is in.
    pub fn current_chunk(&self) -> Point3<i32> {
        self.current_player_chunk_position
    }

    /// Type the next placement will use.
    pub fn placing_type(&self) -> BlockType {
        self.placing_type
    }

    /// Advances one tick.
    ///
    /// Swaps chunks if the player crossed a chunk boundary, then applies the
    /// player's actions: digging credits the inventory, placing spends from it.
    ///
    /// # Arguments
    ///
    /// * `position` - The player's position this tick
    /// * `forward` - The player's view direction
    /// * `actions` - What the player asked for this tick
    pub fn update(
        &mut self,
        position: Point3<f32>,
        forward: Vector3<f32>,
        actions: &PlayerAction,
    ) -> FrameReport {
        let mut report = FrameReport {
            changed_chunk: None,
            dug: BlockType::AIR,
            placed: false,
        };

        if self
            .world
            .has_moved_chunks(self.current_player_chunk_position, position)
        {
            let new_chunk = self.world.get_chunk(position);
            self.world
                .move_to_chunk(self.current_player_chunk_position, new_chunk);
            self.current_player_chunk_position = new_chunk;
            report.changed_chunk = Some(new_chunk);
        }

        let allowance = self.config.directional_angle_allowance;

        if actions.dig {
            report.dug = self.world.delete_in_direction_of(position, forward, allowance);
            self.inventory.credit(report.dug);
        }

        if actions.place {
            if self.inventory.count(self.placing_type) == 0 {
                log::debug!("No {:?} left to place", self.placing_type);
            } else if self.world.create_in_direction_of(
                position,
                forward,
                self.placing_type,
                allowance,
            ) {
                self.inventory.debit(self.placing_type);
                report.placed = true;
            }
        }

        if actions.cycle_block_type {
            self.placing_type = self.placing_type.next_placeable();
        }

        report
    }

    /// Resident blocks within render distance and field of view.
    pub fn visible_blocks(&self, position: Point3<f32>, forward: Vector3<f32>) -> Vec<Block> {
        self.world
            .blocks_within_view(
                position,
                forward,
                self.config.field_of_view_angle,
                self.config.render_radius,
            )
            .copied()
            .collect()
    }

    /// The lattice cell the player is looking at, for outlining.
    pub fn target_block(
        &self,
        position: Point3<f32>,
        forward: Vector3<f32>,
    ) -> Option<Point3<i32>> {
        self.world.outline_in_direction_of(
            position,
            forward,
            self.config.directional_angle_allowance,
        )
    }
}

/// Represents player actions for one tick.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAction {
    /// Remove the targeted block
    pub dig: bool,
    /// Place a block against the targeted block
    pub place: bool,
    /// Switch to the next placeable block type
    pub cycle_block_type: bool,
}
