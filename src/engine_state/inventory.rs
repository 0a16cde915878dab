//! # Inventory
//!
//! Blocks the player has dug and can place again. The world never touches the
//! inventory; the driver credits and debits it from the results of digging and
//! placing.

use std::collections::HashMap;

use crate::engine_state::voxels::block::block_type::BlockType;

/// Counts of each block type the player holds.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    counts: HashMap<BlockType, usize>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one block of `block_type`. Air is ignored.
    pub fn credit(&mut self, block_type: BlockType) {
        if block_type.is_air() {
            return;
        }
        *self.counts.entry(block_type).or_insert(0) += 1;
    }

    /// Takes one block of `block_type`.
    ///
    /// # Returns
    /// `false` if the player holds none.
    pub fn debit(&mut self, block_type: BlockType) -> bool {
        match self.counts.get_mut(&block_type) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// How many blocks of `block_type` the player holds.
    pub fn count(&self, block_type: BlockType) -> usize {
        self.counts.get(&block_type).copied().unwrap_or(0)
    }

    /// Every held type with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(block_type, count)| (*block_type, *count))
    }
}
