//! # Configuration
//!
//! Tunables for a world session, loadable from JSON. Every field has a default,
//! so a config file only needs to mention what it changes:
//!
//! ```json
//! {
//!     "chunk_radius": 3,
//!     "terrain": { "seed": 1234, "variance": 6.0 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::chunk::is_valid_chunk_radius;
use crate::error::WorldError;

/// Settings for the driver and the chunk store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Half-width of one chunk, in blocks
    pub chunk_radius: u32,
    /// Maximum distance from the player at which blocks are drawn
    pub render_radius: f32,
    /// Blocks further than this angle (radians) from the view direction are not drawn
    pub field_of_view_angle: f32,
    /// Angle (radians) within which a block counts as "in the direction" of the view
    pub directional_angle_allowance: f32,
    /// Where the player starts
    pub player_start: [f32; 3],
    /// Terrain generator parameters
    pub terrain: TerrainSettings,
}

/// Parameters of the procedural terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Minimum surface height, i.e. sea level
    pub min_height: i32,
    /// Maximum surface height
    pub max_height: i32,
    /// Around 1.0 for flat terrain, around 10.0 for rugged terrain
    pub variance: f32,
    /// Noise seed; a random one is drawn when absent
    pub seed: Option<u32>,
    /// Number of column heights the generator remembers
    pub height_cache_size: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_radius: 4,
            render_radius: 20.0,
            field_of_view_angle: 1.0,
            directional_angle_allowance: 0.1,
            player_start: [0.0, 8.0, 0.0],
            terrain: TerrainSettings::default(),
        }
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        TerrainSettings {
            min_height: -4,
            max_height: 6,
            variance: 2.0,
            seed: None,
            height_cache_size: 4096,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !is_valid_chunk_radius(self.chunk_radius) {
            return Err(WorldError::InvalidChunkRadius(self.chunk_radius));
        }
        if self.terrain.min_height > self.terrain.max_height {
            return Err(WorldError::InvalidHeightBounds {
                min: self.terrain.min_height,
                max: self.terrain.max_height,
            });
        }
        if self.terrain.height_cache_size == 0 {
            return Err(WorldError::InvalidConfig(
                "height_cache_size must be non-zero".into(),
            ));
        }
        if !(self.render_radius > 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "render_radius must be positive, got {}",
                self.render_radius
            )));
        }
        for (name, angle) in [
            ("field_of_view_angle", self.field_of_view_angle),
            ("directional_angle_allowance", self.directional_angle_allowance),
        ] {
            if !(angle > 0.0) {
                return Err(WorldError::InvalidConfig(format!(
                    "{name} must be positive, got {angle}"
                )));
            }
        }
        Ok(())
    }
}
