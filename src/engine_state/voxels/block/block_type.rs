//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion from
//! the compact storage representation.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// `AIR` is the "no block here" sentinel: it is what queries answer when a cell is
/// empty and what the edit overlay records for a dug-out block, but it is never
/// stored as a resident block. The `FromPrimitive` derive allows conversion from
/// the compact `BlockTypeSize` form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Absence of a block.
    AIR,

    /// The surface layer of the terrain.
    GRASS,

    /// The layers just below the surface, above sea level.
    DIRT,

    /// Everything deep or below sea level.
    STONE,
}

impl BlockType {
    /// Every block type that can exist as a resident block, in placement-cycle order.
    pub const SOLID_TYPES: [BlockType; 3] = [BlockType::GRASS, BlockType::DIRT, BlockType::STONE];

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value is not a known type.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Whether this is the `AIR` sentinel.
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// Lowercase name used as the key into the resource tables.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::AIR => "air",
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::STONE => "stone",
        }
    }

    /// The solid type that follows this one when the player cycles what they place.
    ///
    /// `AIR` is not placeable and cycles to the first solid type.
    pub fn next_placeable(self) -> Self {
        match self {
            BlockType::GRASS => BlockType::DIRT,
            BlockType::DIRT => BlockType::STONE,
            BlockType::STONE | BlockType::AIR => BlockType::GRASS,
        }
    }
}
