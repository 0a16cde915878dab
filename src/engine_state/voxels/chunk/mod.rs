//! # Chunk Module
//!
//! This module provides the `Chunk` struct, the unit in which the world is
//! loaded and unloaded, together with the arithmetic that maps world positions
//! to chunk coordinates.
//!
//! ## Geometry
//!
//! A chunk of radius `r` is a cube `2r` blocks on a side. Chunk `c` covers the
//! lattice range `[2r * c, 2r * (c + 1))` on every axis, which is exactly the set
//! of positions `p` with `floor(p / 2r) == c`. Chunk coordinates and lattice
//! extents therefore always agree.
//!
//! ## Storage
//!
//! - `solid_array`: A bit vector (1 bit per cell) indicating which cells hold a block
//! - `blocks`: A vector containing only the blocks themselves
//!
//! ### Performance Characteristics
//! - **Solidity Check**: O(1) - Just check the bit in `solid_array`
//! - **Block Lookup**: O(n) in the number of blocks in this chunk
//! - **Memory Usage**: ~1 bit per air cell + sizeof(Block) per block

use bitvec::prelude::BitVec;
use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;

use super::block::block_type::BlockType;
use super::block::Block;

pub mod chunk_creation;

/// Largest supported chunk radius. A chunk then has `1024³` cells, which still
/// indexes with `i32` lattice arithmetic.
pub const MAX_CHUNK_RADIUS: u32 = 512;

/// Whether `chunk_radius` is within `1..=MAX_CHUNK_RADIUS`.
pub fn is_valid_chunk_radius(chunk_radius: u32) -> bool {
    (1..=MAX_CHUNK_RADIUS).contains(&chunk_radius)
}

/// Number of lattice cells in a chunk of the given radius.
pub fn cell_count(chunk_radius: u32) -> usize {
    let width = 2 * chunk_radius as usize;
    width * width * width
}

/// The chunk coordinate containing a world-space position.
///
/// # Arguments
/// * `position` - Any point in world space
/// * `chunk_radius` - Half-width of a chunk in blocks (at least 1)
///
/// # Returns
/// `floor(position / (2 * chunk_radius))` on each axis.
pub fn chunk_of(position: Point3<f32>, chunk_radius: u32) -> Point3<i32> {
    let width = 2.0 * chunk_radius as f32;
    Point3::new(
        (position.x / width).floor() as i32,
        (position.y / width).floor() as i32,
        (position.z / width).floor() as i32,
    )
}

/// The chunk coordinate containing a lattice cell.
///
/// Integer counterpart of [`chunk_of`]; both agree for every lattice position.
pub fn chunk_of_lattice(position: Point3<i32>, chunk_radius: u32) -> Point3<i32> {
    let width = 2 * chunk_radius as i32;
    Point3::new(
        position.x.div_euclid(width),
        position.y.div_euclid(width),
        position.z.div_euclid(width),
    )
}

/// Snaps a world-space position to the nearest lattice cell.
///
/// Halves round away from zero.
pub fn to_lattice(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    )
}

/// A cube of `2r` x `2r` x `2r` lattice cells and the blocks that occupy them.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// Half-width of this chunk in blocks.
    chunk_radius: u32,

    /// A bit vector where each bit represents whether the corresponding cell holds a block.
    ///
    /// Cells are stored x fastest, then y, then z, relative to the chunk's minimum corner.
    solid_array: BitVec,

    /// The blocks in this chunk. Air is never stored.
    blocks: Vec<Block>,
}

impl Chunk {
    /// Creates a chunk with no blocks.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `chunk_radius` - Half-width of a chunk in blocks
    pub fn empty(position: Point3<i32>, chunk_radius: u32) -> Self {
        ChunkCreationIterator::new(position, chunk_radius).return_chunk()
    }

    /// Generates a chunk by asking `block_at` for every cell in its extent.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `chunk_radius` - Half-width of a chunk in blocks
    /// * `block_at` - Produces the block type for a lattice cell; `AIR` leaves the cell empty
    ///
    /// # Returns
    /// A new `Chunk` holding one block per non-air cell.
    pub fn generate<F>(position: Point3<i32>, chunk_radius: u32, mut block_at: F) -> Self
    where
        F: FnMut(Point3<i32>) -> BlockType,
    {
        let mut cci = ChunkCreationIterator::new(position, chunk_radius);
        while !cci.is_complete() {
            let block_type = block_at(cci.current_position());
            cci.push_block_type(block_type);
        }
        cci.return_chunk()
    }

    /// Number of cells along one edge.
    pub fn width(&self) -> i32 {
        2 * self.chunk_radius as i32
    }

    /// Lattice position of this chunk's minimum corner.
    pub fn origin(&self) -> Point3<i32> {
        let width = self.width();
        Point3::new(
            self.position.x * width,
            self.position.y * width,
            self.position.z * width,
        )
    }

    /// Whether the lattice cell lies inside this chunk's extent.
    pub fn contains(&self, center: Point3<i32>) -> bool {
        chunk_of_lattice(center, self.chunk_radius) == self.position
    }

    /// The blocks in this chunk, in no particular order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks in this chunk.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether this chunk holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Checks if the cell at the given lattice position holds a block.
    ///
    /// # Returns
    /// `true` if the cell is solid, `false` if it's air or outside this chunk.
    pub fn is_block_solid(&self, center: Point3<i32>) -> bool {
        self.solid_index(center)
            .map(|index| self.solid_array[index])
            .unwrap_or(false)
    }

    /// Gets the block occupying a lattice cell of this chunk.
    pub fn get_block_at(&self, center: Point3<i32>) -> Option<&Block> {
        if !self.is_block_solid(center) {
            return None;
        }
        self.blocks.iter().find(|block| block.center() == center)
    }

    /// Adds a block to this chunk.
    ///
    /// # Returns
    /// `false` without changing anything if the cell is outside this chunk or
    /// already occupied.
    pub fn insert(&mut self, block: Block) -> bool {
        match self.solid_index(block.center()) {
            Some(index) if !self.solid_array[index] => {
                self.solid_array.set(index, true);
                self.blocks.push(block);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the block occupying a lattice cell.
    pub fn remove(&mut self, center: Point3<i32>) -> Option<Block> {
        let index = self.solid_index(center)?;
        if !self.solid_array[index] {
            return None;
        }
        let block_index = self.blocks.iter().position(|block| block.center() == center)?;
        self.solid_array.set(index, false);
        Some(self.blocks.swap_remove(block_index))
    }

    /// Index of a lattice cell in `solid_array`, or `None` outside this chunk.
    fn solid_index(&self, center: Point3<i32>) -> Option<usize> {
        if !self.contains(center) {
            return None;
        }
        let origin = self.origin();
        let width = self.width();
        let (lx, ly, lz) = (center.x - origin.x, center.y - origin.y, center.z - origin.z);
        Some((lx + width * ly + width * width * lz) as usize)
    }
}
