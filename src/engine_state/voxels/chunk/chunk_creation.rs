//! # Chunk Creation Module
//!
//! This module provides functionality for populating a chunk cell by cell while
//! keeping its occupancy bit vector and its block list in step.
//!
//! The `ChunkCreationIterator` walks the chunk's cube in storage order (x fastest,
//! then y, then z). For every cell the caller pushes the generated block type:
//! 1. The occupancy bit for the cell is appended to `solid_array`
//! 2. Non-air types become a `Block` at the cell's lattice position
//!
//! Air only ever costs a single bit.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{cell_count, Chunk};

/// A builder that fills a chunk in storage order.
///
/// The builder ensures the bit vector tracking solid cells and the vector storing
/// block data stay consistent as block types are added.
pub struct ChunkCreationIterator {
    /// The chunk coordinate of the chunk being created
    position: Point3<i32>,
    /// Half-width of the chunk in blocks
    chunk_radius: u32,
    /// Number of cells along one edge (`2 * chunk_radius`)
    width: i32,
    /// Lattice position of the chunk's minimum corner
    origin: Point3<i32>,
    /// One bit per cell, set where a block exists
    solid_array: BitVec,
    /// Only the non-air blocks, in the order they were pushed
    blocks: Vec<Block>,
    /// Current X position within the chunk (0..width)
    local_x: i32,
    /// Current Y position within the chunk (0..width)
    local_y: i32,
    /// Current Z position within the chunk (0..width)
    local_z: i32,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinate of the chunk to create
    /// * `chunk_radius` - Half-width of a chunk in blocks
    pub fn new(position: Point3<i32>, chunk_radius: u32) -> Self {
        let width = 2 * chunk_radius as i32;
        ChunkCreationIterator {
            position,
            chunk_radius,
            width,
            origin: Point3::new(position.x * width, position.y * width, position.z * width),
            solid_array: BitVec::with_capacity(cell_count(chunk_radius)),
            blocks: Vec::new(),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Whether every cell of the chunk has been pushed.
    pub fn is_complete(&self) -> bool {
        self.local_z == self.width
    }

    /// Lattice position of the cell the next pushed type will land in.
    pub fn current_position(&self) -> Point3<i32> {
        Point3::new(
            self.origin.x + self.local_x,
            self.origin.y + self.local_y,
            self.origin.z + self.local_z,
        )
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// Cells that were never pushed are left empty.
    pub fn return_chunk(mut self) -> Chunk {
        self.solid_array.resize(cell_count(self.chunk_radius), false);
        Chunk {
            position: self.position,
            chunk_radius: self.chunk_radius,
            solid_array: self.solid_array,
            blocks: self.blocks,
        }
    }

    /// Records the block type of the current cell and advances to the next one.
    ///
    /// Pushing past the last cell is ignored.
    ///
    /// # Arguments
    /// * `block_type` - The type generated for the current cell
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.is_complete() {
            return;
        }

        let is_solid = !block_type.is_air();
        self.solid_array.push(is_solid);

        if is_solid {
            self.blocks.push(Block::new(block_type, self.current_position()));
        }

        self.local_x += 1;
        if self.local_x == self.width {
            self.local_x = 0;
            self.local_y += 1;
            if self.local_y == self.width {
                self.local_y = 0;
                self.local_z += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_cells_x_first() {
        let mut cci = ChunkCreationIterator::new(Point3::new(1, 0, -1), 1);
        assert_eq!(cci.current_position(), Point3::new(2, 0, -2));
        cci.push_block_type(BlockType::AIR);
        assert_eq!(cci.current_position(), Point3::new(3, 0, -2));
        cci.push_block_type(BlockType::AIR);
        assert_eq!(cci.current_position(), Point3::new(2, 1, -2));
        cci.push_block_type(BlockType::AIR);
        cci.push_block_type(BlockType::AIR);
        assert_eq!(cci.current_position(), Point3::new(2, 0, -1));
    }

    #[test]
    fn only_solid_cells_become_blocks() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0), 1);
        for i in 0..8 {
            let block_type = if i % 2 == 0 { BlockType::DIRT } else { BlockType::AIR };
            cci.push_block_type(block_type);
        }
        assert!(cci.is_complete());
        cci.push_block_type(BlockType::STONE);

        let chunk = cci.return_chunk();
        assert_eq!(chunk.len(), 4);
        assert!(chunk.is_block_solid(Point3::new(0, 0, 0)));
        assert!(!chunk.is_block_solid(Point3::new(1, 0, 0)));
        assert!(chunk.blocks().iter().all(|b| b.block_type() == BlockType::DIRT));
    }
}
