//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, the block data
//! structure and the asset tables the rendering side looks blocks up in.

use block_type::BlockType;
use cgmath::{Point3, Vector3};
use phf::phf_map;

use crate::error::WorldError;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Maps each block type name to the texture drawn on its faces.
pub static BLOCK_TEXTURE_FILES: phf::Map<&'static str, &'static str> = phf_map! {
    "grass" => "grass.png",
    "dirt" => "dirt.png",
    "stone" => "stone.png",
};

/// Maps each block type name to the icon shown for it in the inventory.
pub static BLOCK_ICON_FILES: phf::Map<&'static str, &'static str> = phf_map! {
    "grass" => "grass_icon.png",
    "dirt" => "dirt_icon.png",
    "stone" => "stone_icon.png",
};

/// Looks up the texture file for a block type.
///
/// # Errors
/// `WorldError::MissingTexture` if the type has no texture, which is always the
/// case for `BlockType::AIR`. This is a configuration bug on the caller's side,
/// not an "empty cell" answer.
pub fn texture_file(block_type: BlockType) -> Result<&'static str, WorldError> {
    BLOCK_TEXTURE_FILES
        .get(block_type.name())
        .copied()
        .ok_or(WorldError::MissingTexture(block_type))
}

/// Looks up the inventory icon file for a block type.
///
/// # Errors
/// `WorldError::MissingIcon` if the type has no icon.
pub fn icon_file(block_type: BlockType) -> Result<&'static str, WorldError> {
    BLOCK_ICON_FILES
        .get(block_type.name())
        .copied()
        .ok_or(WorldError::MissingIcon(block_type))
}

/// Represents a single voxel block placed in the world.
///
/// A block is a type tag plus the lattice cell it occupies. It never changes
/// after construction; edits replace or remove blocks instead. Geometry for
/// drawing is derived by the renderer from `center`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Block {
    block_type: BlockType,
    center: Point3<i32>,
}

impl Block {
    /// Creates a new block of the specified type.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to create. Must not be `BlockType::AIR`;
    ///   air is the absence of a block and is never stored.
    /// * `center` - The lattice cell the block occupies
    pub fn new(block_type: BlockType, center: Point3<i32>) -> Self {
        debug_assert!(!block_type.is_air(), "air is never stored as a block");
        Block { block_type, center }
    }

    /// The type of this block.
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// The lattice cell this block occupies.
    pub fn center(&self) -> Point3<i32> {
        self.center
    }

    /// The block center in world space.
    pub fn center_f32(&self) -> Point3<f32> {
        Point3::new(self.center.x as f32, self.center.y as f32, self.center.z as f32)
    }

    /// Vector from `origin` to this block's center.
    pub fn displacement_from(&self, origin: Point3<f32>) -> Vector3<f32> {
        self.center_f32() - origin
    }

    /// Whether `position` lies inside this block's unit cell.
    ///
    /// Cell faces are inclusive: a point exactly half a block from the center on
    /// some axis is considered inside.
    pub fn contains(&self, position: Point3<f32>) -> bool {
        let center = self.center_f32();
        (center.x - position.x).abs() <= 0.5
            && (center.y - position.y).abs() <= 0.5
            && (center.z - position.z).abs() <= 0.5
    }
}
