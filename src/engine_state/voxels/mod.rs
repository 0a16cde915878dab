//! # Voxel World Core
//!
//! This module contains the voxel world itself: what a block is, how space is cut
//! into chunks, how terrain is generated, which chunks are resident, and which
//! block the player is looking at.
//!
//! ## Architecture
//!
//! * **Block**: Block types, the block value itself and block faces
//! * **Chunk**: Cubes of lattice cells, the unit of loading and unloading
//! * **Terrain**: The procedural source of truth for unedited cells
//! * **World**: Resident chunks around the player plus the player-edit overlay
//! * **Targeting**: Ray-direction queries for outlining, digging and placing
//!
//! ## Data Flow
//!
//! 1. The driver reports player movement; the world swaps chunks when a chunk
//!    boundary is crossed
//! 2. Chunk generation asks the edit overlay first and the terrain second
//! 3. Renderers enumerate resident blocks; edits go through targeting
//!
//! ## Thread Safety
//!
//! Everything here is single-threaded and runs to completion inside one driver
//! tick. Nothing is shared across threads.

pub mod block;
pub mod chunk;
pub mod targeting;
pub mod terrain;
pub mod world;
