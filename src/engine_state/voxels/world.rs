//! # World Module
//!
//! This module provides the `World` struct which owns the resident chunks around
//! the player and the record of every edit the player has made.
//!
//! ## Architecture
//!
//! Only the player's chunk and its 26 neighbours are generated up front. When the
//! player crosses into another chunk, far chunks are dropped and the slice of
//! chunks that just became adjacent is generated.
//!
//! ## Player Edits
//!
//! Procedural generation alone would forget anything the player dug or built
//! as soon as its chunk unloads. Every edit that differs from what the terrain
//! produces is kept in `player_edits`, and [`World::generate_block_at`]
//! consults that overlay before the terrain. Edits therefore survive any number
//! of unload/reload cycles.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Point queries only look inside the one or two chunks that can contain the point

use std::collections::HashMap;

use cgmath::{MetricSpace, Point3, Vector3};

use crate::error::WorldError;

use super::block::{block_type::BlockType, Block};
use super::chunk::{chunk_of, chunk_of_lattice, is_valid_chunk_radius, Chunk};
use super::targeting::angle_between;
use super::terrain::TerrainSource;

/// The loaded part of a voxel world plus its edit history.
pub struct World {
    /// Half-width of every chunk, in blocks
    chunk_radius: u32,
    /// A mapping from chunk coordinates to resident chunk data.
    pub(super) chunks: HashMap<Point3<i32>, Chunk>,
    /// Edits that diverge from procedural generation, keyed by lattice cell.
    /// `AIR` marks a block the player removed.
    player_edits: HashMap<Point3<i32>, BlockType>,
    /// Procedural terrain
    terrain: Box<dyn TerrainSource>,
}

impl World {
    /// Creates a world and generates every chunk adjacent to the player.
    ///
    /// # Arguments
    ///
    /// * `terrain` - The procedural generator the world is filled from
    /// * `origin_position` - The player's starting position
    /// * `chunk_radius` - Half-width of each chunk, in blocks
    ///
    /// # Errors
    ///
    /// `WorldError::InvalidChunkRadius` if `chunk_radius` is zero or above
    /// [`MAX_CHUNK_RADIUS`](super::chunk::MAX_CHUNK_RADIUS).
    ///
    /// # Examples
    ///
    /// ```
    /// use cgmath::Point3;
    /// use voxel_world::engine_state::voxels::{block::block_type::BlockType, world::World};
    ///
    /// let flat = |p: Point3<f32>| if p.y == 0.0 { BlockType::GRASS } else { BlockType::AIR };
    /// let world = World::new(Box::new(flat), Point3::new(0.0, 0.0, 0.0), 2).unwrap();
    /// assert_eq!(world.block_count(), 12 * 12);
    /// ```
    pub fn new(
        terrain: Box<dyn TerrainSource>,
        origin_position: Point3<f32>,
        chunk_radius: u32,
    ) -> Result<Self, WorldError> {
        if !is_valid_chunk_radius(chunk_radius) {
            return Err(WorldError::InvalidChunkRadius(chunk_radius));
        }

        let mut world = World {
            chunk_radius,
            chunks: HashMap::new(),
            player_edits: HashMap::new(),
            terrain,
        };
        let origin_chunk = world.get_chunk(origin_position);
        world.initialize_adjacent_chunks(origin_chunk);
        log::info!(
            "World created around chunk {:?} with {} blocks",
            origin_chunk,
            world.block_count()
        );
        Ok(world)
    }

    /// Half-width of every chunk, in blocks.
    pub fn chunk_radius(&self) -> u32 {
        self.chunk_radius
    }

    /// Returns the chunk a point is in.
    pub fn get_chunk(&self, position: Point3<f32>) -> Point3<i32> {
        chunk_of(position, self.chunk_radius)
    }

    /// Whether the player has left `old_chunk`.
    ///
    /// # Arguments
    ///
    /// * `old_chunk` - The chunk the player was last known to be in
    /// * `new_position` - The player's current position
    pub fn has_moved_chunks(&self, old_chunk: Point3<i32>, new_position: Point3<f32>) -> bool {
        self.get_chunk(new_position) != old_chunk
    }

    /// The block type that belongs at a lattice cell when its chunk is generated.
    ///
    /// Player edits take precedence over the terrain; the terrain is only asked
    /// about cells the player never changed.
    pub fn generate_block_at(&self, position: Point3<i32>) -> BlockType {
        if let Some(edited) = self.player_edits.get(&position) {
            return *edited;
        }
        self.terrain.classify(Point3::new(
            position.x as f32,
            position.y as f32,
            position.z as f32,
        ))
    }

    /// Moves the resident neighbourhood from `old_chunk` to `new_chunk`.
    ///
    /// First drops every chunk that is more than one chunk away from `new_chunk`
    /// on all three axes at once, then generates the 3x3 slice of chunks one step
    /// past `new_chunk` along every axis that changed.
    ///
    /// A chunk that is near on any single axis stays resident, so a chunk left
    /// behind on the axis of travel is kept while it still lines up with the
    /// player on another axis.
    pub fn move_to_chunk(&mut self, old_chunk: Point3<i32>, new_chunk: Point3<i32>) {
        log::debug!("Moving from chunk {:?} to {:?}", old_chunk, new_chunk);
        self.delete_distance_chunks(new_chunk);
        self.load_next_chunks(old_chunk, new_chunk);
    }

    /// Clips `position` to the block lattice and returns the block type there.
    ///
    /// # Returns
    ///
    /// The type of the resident block whose cell contains `position`, or
    /// `BlockType::AIR` if there is none.
    pub fn get_block_at(&self, position: Point3<f32>) -> BlockType {
        self.find_block_containing(position)
            .map(Block::block_type)
            .unwrap_or(BlockType::AIR)
    }

    /// Every resident block, in no particular order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.chunks.values().flat_map(|chunk| chunk.blocks().iter())
    }

    /// Number of resident blocks.
    pub fn block_count(&self) -> usize {
        self.chunks.values().map(Chunk::len).sum()
    }

    /// Coordinates of every resident chunk.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.chunks.keys().copied()
    }

    /// Whether the chunk at `position` is resident.
    pub fn is_chunk_loaded(&self, position: Point3<i32>) -> bool {
        self.chunks.contains_key(&position)
    }

    /// Edits that diverge from procedural generation. `AIR` marks a removed block.
    pub fn player_edits(&self) -> &HashMap<Point3<i32>, BlockType> {
        &self.player_edits
    }

    /// The resident blocks a renderer should draw this frame.
    ///
    /// A block is visible when its center is within `render_radius` of `origin`
    /// and within `field_of_view_angle` of `forward`. A block centered exactly on
    /// `origin` has no direction and is skipped.
    pub fn blocks_within_view(
        &self,
        origin: Point3<f32>,
        forward: Vector3<f32>,
        field_of_view_angle: f32,
        render_radius: f32,
    ) -> impl Iterator<Item = &Block> + '_ {
        self.blocks().filter(move |block| {
            origin.distance(block.center_f32()) <= render_radius
                && angle_between(block.displacement_from(origin), forward)
                    .is_some_and(|angle| angle <= field_of_view_angle)
        })
    }

    /// Records an edit, keeping only those that differ from the terrain.
    pub(super) fn record_edit(&mut self, position: Point3<i32>, block_type: BlockType) {
        let generated = self.terrain.classify(Point3::new(
            position.x as f32,
            position.y as f32,
            position.z as f32,
        ));
        if generated == block_type {
            log::trace!("Edit at {:?} restores generated {:?}", position, block_type);
            self.player_edits.remove(&position);
        } else {
            log::trace!("Edit at {:?}: {:?}", position, block_type);
            self.player_edits.insert(position, block_type);
        }
    }

    /// Puts a block into its chunk, generating the chunk first if it is not resident.
    ///
    /// # Returns
    ///
    /// `false` if the cell was already occupied.
    pub(super) fn insert_block(&mut self, block: Block) -> bool {
        let chunk_position = chunk_of_lattice(block.center(), self.chunk_radius);
        match self.chunks.get_mut(&chunk_position) {
            Some(chunk) => chunk.insert(block),
            None => {
                self.add_chunk_at(chunk_position);
                self.chunks
                    .get(&chunk_position)
                    .and_then(|chunk| chunk.get_block_at(block.center()))
                    .is_some_and(|placed| *placed == block)
            }
        }
    }

    /// Removes the block at a lattice cell from the resident set.
    pub(super) fn remove_block(&mut self, center: Point3<i32>) -> Option<Block> {
        let chunk_position = chunk_of_lattice(center, self.chunk_radius);
        self.chunks.get_mut(&chunk_position)?.remove(center)
    }

    /// The resident block whose cell contains `position`.
    ///
    /// A point on a cell face touches two cells on that axis; the lower cell is
    /// checked first. Non-finite positions are in no cell.
    fn find_block_containing(&self, position: Point3<f32>) -> Option<&Block> {
        let candidates = |v: f32| (v - 0.5).ceil() as i32..=(v + 0.5).floor() as i32;
        for x in candidates(position.x) {
            for y in candidates(position.y) {
                for z in candidates(position.z) {
                    let center = Point3::new(x, y, z);
                    let chunk_position = chunk_of_lattice(center, self.chunk_radius);
                    if let Some(block) = self
                        .chunks
                        .get(&chunk_position)
                        .and_then(|chunk| chunk.get_block_at(center))
                        .filter(|block| block.contains(position))
                    {
                        return Some(block);
                    }
                }
            }
        }
        None
    }

    /// Generates all chunks near the player at the start of the game.
    fn initialize_adjacent_chunks(&mut self, origin_chunk: Point3<i32>) {
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    self.add_chunk_at(origin_chunk + Vector3::new(x, y, z));
                }
            }
        }
    }

    /// Drops every chunk that is more than one chunk away on all three axes.
    fn delete_distance_chunks(&mut self, new_chunk: Point3<i32>) {
        let before = self.chunks.len();
        self.chunks.retain(|position, _| {
            !((position.x - new_chunk.x).abs() > 1
                && (position.y - new_chunk.y).abs() > 1
                && (position.z - new_chunk.z).abs() > 1)
        });
        log::debug!("Unloaded {} chunks", before - self.chunks.len());
    }

    /// Generates the chunks that became adjacent by moving from `old_chunk` to `new_chunk`.
    ///
    /// For every axis that changed, loads the 3x3 slice one chunk further along
    /// the direction of travel, in anticipation of further movement that way.
    fn load_next_chunks(&mut self, old_chunk: Point3<i32>, new_chunk: Point3<i32>) {
        let before = self.chunks.len();
        let delta = new_chunk - old_chunk;

        for axis in 0..3 {
            if delta[axis] == 0 {
                continue;
            }
            let direction = delta[axis].signum();
            for a in -1..=1 {
                for b in -1..=1 {
                    let offset = match axis {
                        0 => Vector3::new(direction, a, b),
                        1 => Vector3::new(a, direction, b),
                        _ => Vector3::new(a, b, direction),
                    };
                    self.add_chunk_at(new_chunk + offset);
                }
            }
        }
        log::debug!("Loaded {} chunks", self.chunks.len() - before);
    }

    /// Generates the chunk at the specified chunk coordinates if it isn't resident already.
    fn add_chunk_at(&mut self, position: Point3<i32>) {
        if self.chunks.contains_key(&position) {
            return;
        }
        let chunk = Chunk::generate(position, self.chunk_radius, |cell| {
            self.generate_block_at(cell)
        });
        self.chunks.insert(position, chunk);
    }
}
