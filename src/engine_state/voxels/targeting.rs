//! # Targeting Module
//!
//! Resolves which resident block the player is looking at. One query serves the
//! outline highlight, digging and building: the target is the closest block
//! whose center lies within an angular allowance of the view direction.

use cgmath::{InnerSpace, Point3, Vector3};

use super::block::{block_side::BlockSide, block_type::BlockType, Block};
use super::world::World;

/// Angle between two vectors, in radians within `[0, π]`.
///
/// # Returns
/// `None` if either vector has zero or non-finite length, since no direction
/// can be derived from it.
pub fn angle_between(first: Vector3<f32>, second: Vector3<f32>) -> Option<f32> {
    let lengths = first.magnitude() * second.magnitude();
    if lengths == 0.0 || !lengths.is_finite() {
        return None;
    }
    Some((first.dot(second) / lengths).clamp(-1.0, 1.0).acos())
}

/// Snaps a vector to the lattice unit vector along its dominant axis.
///
/// Ties between axes prefer x, then y, then z.
pub fn find_axis_aligned_unit_vector(vector: Vector3<f32>) -> Vector3<i32> {
    BlockSide::facing(vector).normal()
}

impl World {
    /// Finds the closest resident block in the direction of `forward` from `origin`.
    ///
    /// A block is a candidate when the angle between `forward` and the vector from
    /// `origin` to its center is at most `angle_allowance`. Among candidates the
    /// nearest wins; equally near candidates resolve to the lowest center by
    /// x, then y, then z, so the answer never depends on storage order.
    ///
    /// # Returns
    /// A copy of the targeted block, or `None` if nothing is in that direction.
    pub fn find_block_in_direction_of(
        &self,
        origin: Point3<f32>,
        forward: Vector3<f32>,
        angle_allowance: f32,
    ) -> Option<Block> {
        let mut closest: Option<(f32, Block)> = None;

        for block in self.blocks() {
            let displacement = block.displacement_from(origin);
            let Some(angle) = angle_between(forward, displacement) else {
                continue;
            };
            if angle > angle_allowance {
                continue;
            }

            let distance = displacement.magnitude();
            let is_closer = match &closest {
                None => true,
                Some((best_distance, best)) => {
                    distance < *best_distance
                        || (distance == *best_distance
                            && lattice_order(block.center()) < lattice_order(best.center()))
                }
            };
            if is_closer {
                closest = Some((distance, *block));
            }
        }

        closest.map(|(_, block)| block)
    }

    /// The lattice cell a renderer should outline as "looked at".
    ///
    /// Read-only; the world is not changed.
    pub fn outline_in_direction_of(
        &self,
        origin: Point3<f32>,
        forward: Vector3<f32>,
        angle_allowance: f32,
    ) -> Option<Point3<i32>> {
        self.find_block_in_direction_of(origin, forward, angle_allowance)
            .map(|block| block.center())
    }

    /// Deletes the closest block in the direction of `forward` from `origin`.
    ///
    /// The removal is recorded as a player edit so the block stays gone when its
    /// chunk is generated again.
    ///
    /// # Returns
    /// The type of the removed block, so the caller can credit the player, or
    /// `BlockType::AIR` if nothing was targeted.
    pub fn delete_in_direction_of(
        &mut self,
        origin: Point3<f32>,
        forward: Vector3<f32>,
        angle_allowance: f32,
    ) -> BlockType {
        let Some(target) = self.find_block_in_direction_of(origin, forward, angle_allowance) else {
            return BlockType::AIR;
        };

        self.record_edit(target.center(), BlockType::AIR);
        match self.remove_block(target.center()) {
            Some(removed) => removed.block_type(),
            None => BlockType::AIR,
        }
    }

    /// Places a block against the face of the targeted block that faces `origin`.
    ///
    /// The vector from the target to `origin` is snapped to its dominant axis; the
    /// new block goes into the neighbouring cell on that side.
    ///
    /// # Arguments
    /// * `origin` - Where the player is
    /// * `forward` - Where the player is looking
    /// * `block_type` - The type to place; `BlockType::AIR` is refused
    /// * `angle_allowance` - Targeting tolerance in radians
    ///
    /// # Returns
    /// `true` if a block was placed; `false` if nothing was targeted or the cell is
    /// already occupied.
    pub fn create_in_direction_of(
        &mut self,
        origin: Point3<f32>,
        forward: Vector3<f32>,
        block_type: BlockType,
        angle_allowance: f32,
    ) -> bool {
        if block_type.is_air() {
            log::warn!("Refusing to place an air block");
            return false;
        }
        let Some(target) = self.find_block_in_direction_of(origin, forward, angle_allowance) else {
            return false;
        };

        let displacement = origin - target.center_f32();
        let desired = target.center() + find_axis_aligned_unit_vector(displacement);
        let desired_position = Point3::new(desired.x as f32, desired.y as f32, desired.z as f32);
        if !self.get_block_at(desired_position).is_air() {
            return false;
        }

        self.record_edit(desired, block_type);
        self.insert_block(Block::new(block_type, desired))
    }
}

fn lattice_order(center: Point3<i32>) -> (i32, i32, i32) {
    (center.x, center.y, center.z)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn angles_cover_zero_to_pi() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        assert!(close(angle_between(x, Vector3::new(5.0, 0.0, 0.0)).unwrap(), 0.0));
        assert!(close(angle_between(x, Vector3::new(0.0, 2.0, 0.0)).unwrap(), FRAC_PI_2));
        assert!(close(angle_between(x, Vector3::new(1.0, 1.0, 0.0)).unwrap(), FRAC_PI_4));
        assert!(close(angle_between(x, Vector3::new(-3.0, 0.0, 0.0)).unwrap(), PI));
    }

    #[test]
    fn nearly_parallel_vectors_do_not_produce_nan() {
        let angle = angle_between(Vector3::new(0.707, -0.707, 0.0), Vector3::new(1.0, -1.0, 0.0));
        assert!(angle.is_some_and(|a| a.is_finite() && a < 1e-3));
    }

    #[test]
    fn degenerate_vectors_have_no_angle() {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        assert_eq!(angle_between(zero, Vector3::new(1.0, 0.0, 0.0)), None);
        assert_eq!(angle_between(Vector3::new(1.0, 0.0, 0.0), zero), None);
        assert_eq!(
            angle_between(Vector3::new(f32::NAN, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            None
        );
    }

    #[test]
    fn unit_vector_follows_the_dominant_axis() {
        let snap = |x, y, z| find_axis_aligned_unit_vector(Vector3::new(x, y, z));
        assert_eq!(snap(-3.0, 0.0, 0.0), Vector3::new(-1, 0, 0));
        assert_eq!(snap(0.0, 0.0, 2.0), Vector3::new(0, 0, 1));
        assert_eq!(snap(0.0, 2.0, 0.0), Vector3::new(0, 1, 0));
        assert_eq!(snap(2.0, -2.0, 2.0), Vector3::new(1, 0, 0));
    }
}
