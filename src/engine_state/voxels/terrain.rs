//! # Terrain Module
//!
//! Procedural terrain. The world never asks "how is terrain made", only "what
//! belongs at this position", through the [`TerrainSource`] trait. The production
//! implementation is [`TerrainGenerator`], a seeded Perlin heightmap; tests and
//! tools can plug in any closure instead.
//!
//! ## Layering
//!
//! For a column `(x, z)` with surface height `h`, a cell at height `y` is:
//! - `GRASS` when `y == h`
//! - `DIRT` when `0 <= y < h`
//! - `STONE` when `y < h` and `y < 0`
//! - `AIR` above the surface

use std::cell::RefCell;
use std::num::NonZeroUsize;

use cgmath::Point3;
use lru::LruCache;
use noise::{NoiseFn, Perlin};

use crate::config::TerrainSettings;
use crate::error::WorldError;

use super::block::block_type::BlockType;
use super::chunk::to_lattice;

/// Base frequency applied to world coordinates before `variance` scales them.
pub const NOISE_FREQUENCY: f64 = 0.01;

/// Anything that can say which block type procedural generation puts at a position.
///
/// Implementations must be pure: the same position always yields the same type.
pub trait TerrainSource {
    /// The generated block type at `position`, or `BlockType::AIR` for empty space.
    fn classify(&self, position: Point3<f32>) -> BlockType;
}

impl<F> TerrainSource for F
where
    F: Fn(Point3<f32>) -> BlockType,
{
    fn classify(&self, position: Point3<f32>) -> BlockType {
        self(position)
    }
}

/// Heightmap terrain driven by seeded Perlin noise.
pub struct TerrainGenerator {
    /// Minimum surface height, i.e. sea level
    min_height: i32,
    /// Maximum surface height, i.e. the highest peak
    max_height: i32,
    /// Around 1.0 for flat terrain, around 10.0 for rugged terrain
    variance: f64,
    /// Seed the noise field was built from
    seed: u32,
    perlin: Perlin,
    /// Surface heights of recently sampled columns
    height_cache: RefCell<LruCache<(i32, i32), i32>>,
}

/// Columns remembered when no cache size is given.
const DEFAULT_HEIGHT_CACHE_SIZE: usize = 4096;

impl TerrainGenerator {
    /// Creates a terrain generator.
    ///
    /// # Arguments
    /// * `min_height` - Minimum surface height, i.e. sea level
    /// * `max_height` - Maximum surface height
    /// * `variance` - Low values (around 1.0) give flat terrain, high values
    ///   (around 10.0) varied terrain
    /// * `seed` - Seed for the Perlin noise field
    ///
    /// # Errors
    /// `WorldError::InvalidHeightBounds` if `min_height > max_height`.
    pub fn new(
        min_height: i32,
        max_height: i32,
        variance: f32,
        seed: u32,
    ) -> Result<Self, WorldError> {
        Self::with_cache_size(
            min_height,
            max_height,
            variance,
            seed,
            DEFAULT_HEIGHT_CACHE_SIZE,
        )
    }

    /// Creates a terrain generator from configuration, drawing a random seed if none is set.
    pub fn from_settings(settings: &TerrainSettings) -> Result<Self, WorldError> {
        let seed = settings.seed.unwrap_or_else(|| fastrand::u32(..));
        log::info!("Terrain seed: {seed}");
        Self::with_cache_size(
            settings.min_height,
            settings.max_height,
            settings.variance,
            seed,
            settings.height_cache_size,
        )
    }

    fn with_cache_size(
        min_height: i32,
        max_height: i32,
        variance: f32,
        seed: u32,
        cache_size: usize,
    ) -> Result<Self, WorldError> {
        if min_height > max_height {
            return Err(WorldError::InvalidHeightBounds {
                min: min_height,
                max: max_height,
            });
        }
        let capacity = NonZeroUsize::new(cache_size)
            .ok_or_else(|| WorldError::InvalidConfig("height cache size must be non-zero".into()))?;

        Ok(TerrainGenerator {
            min_height,
            max_height,
            variance: variance as f64,
            seed,
            perlin: Perlin::new(seed),
            height_cache: RefCell::new(LruCache::new(capacity)),
        })
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Surface height of the column at `(x, z)`.
    ///
    /// # Returns
    /// A value in `[min_height, max_height]`.
    pub fn generate(&self, x: i32, z: i32) -> i32 {
        let cached = self.height_cache.borrow_mut().get(&(x, z)).copied();
        if let Some(height) = cached {
            return height;
        }

        let scale = self.variance * NOISE_FREQUENCY;
        let sample = self.perlin.get([x as f64 * scale, z as f64 * scale]);
        let normalized = ((sample + 1.0) / 2.0).clamp(0.0, 1.0);
        let span = (self.max_height - self.min_height) as f64;
        let height = (self.min_height + (normalized * span).round() as i32)
            .clamp(self.min_height, self.max_height);

        self.height_cache.borrow_mut().put((x, z), height);
        height
    }
}

impl TerrainSource for TerrainGenerator {
    fn classify(&self, position: Point3<f32>) -> BlockType {
        let Point3 { x, y, z } = to_lattice(position);
        let height = self.generate(x, z);

        if y == height {
            BlockType::GRASS
        } else if (0..height).contains(&y) {
            BlockType::DIRT
        } else if y < height {
            BlockType::STONE
        } else {
            BlockType::AIR
        }
    }
}
