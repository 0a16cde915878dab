//! # Error Module
//!
//! Errors raised while configuring or constructing a world. Steady-state queries
//! (block lookups, ray targeting) never fail; they answer with `BlockType::AIR`
//! or `None` when nothing is there.

use thiserror::Error;

use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::chunk::MAX_CHUNK_RADIUS;

/// Every failure the world can report to its caller.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A chunk must span at least one block in each direction and stay small
    /// enough to index its cells.
    #[error("chunk radius must be in 1..={}, got {0}", MAX_CHUNK_RADIUS)]
    InvalidChunkRadius(u32),

    /// The terrain generator was asked for a floor above its ceiling.
    #[error("terrain height bounds are inverted: min {min} > max {max}")]
    InvalidHeightBounds {
        /// Requested minimum (sea level)
        min: i32,
        /// Requested maximum (highest peak)
        max: i32,
    },

    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The block type has no texture registered for it.
    #[error("{0:?} does not have a texture")]
    MissingTexture(BlockType),

    /// The block type has no inventory icon registered for it.
    #[error("{0:?} does not have an icon")]
    MissingIcon(BlockType),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `WorldConfig`.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
