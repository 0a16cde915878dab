//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and maps arbitrary
//! directions onto the face they point out of. Block placement uses it to snap
//! "where the player is relative to the target" onto the neighbouring cell.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Determines which face a direction points out of.
    ///
    /// The axis with the largest magnitude wins; ties go to x, then y, then z.
    /// The sign of that component picks between the two opposite faces, with
    /// negative zero counting as negative.
    ///
    /// # Arguments
    /// * `direction` - Any vector; it does not need to be normalized
    ///
    /// # Returns
    /// The face whose outward normal is closest to `direction` along a single axis.
    pub fn facing(direction: Vector3<f32>) -> BlockSide {
        let (x, y, z) = (direction.x.abs(), direction.y.abs(), direction.z.abs());

        if x >= y && x >= z {
            if direction.x.is_sign_negative() {
                BlockSide::LEFT
            } else {
                BlockSide::RIGHT
            }
        } else if y >= x && y >= z {
            if direction.y.is_sign_negative() {
                BlockSide::BOTTOM
            } else {
                BlockSide::TOP
            }
        } else if direction.z.is_sign_negative() {
            BlockSide::BACK
        } else {
            BlockSide::FRONT
        }
    }

    /// The outward unit normal of this face on the block lattice.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_decides_the_face() {
        assert_eq!(BlockSide::facing(Vector3::new(-3.0, 0.5, 1.0)), BlockSide::LEFT);
        assert_eq!(BlockSide::facing(Vector3::new(0.1, 2.0, -1.0)), BlockSide::TOP);
        assert_eq!(BlockSide::facing(Vector3::new(0.1, -0.2, -1.0)), BlockSide::BACK);
        assert_eq!(BlockSide::facing(Vector3::new(0.0, 0.0, 0.4)), BlockSide::FRONT);
    }

    #[test]
    fn ties_prefer_x_then_y() {
        assert_eq!(BlockSide::facing(Vector3::new(1.0, 1.0, 1.0)), BlockSide::RIGHT);
        assert_eq!(BlockSide::facing(Vector3::new(0.0, -2.0, 2.0)), BlockSide::BOTTOM);
    }

    #[test]
    fn normals_are_unit_and_opposite_faces_cancel() {
        let sides = [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ];
        for side in sides {
            let n = side.normal();
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1);
            assert_eq!(BlockSide::facing(n.cast::<f32>().unwrap()), side);
        }
        assert_eq!(
            BlockSide::LEFT.normal() + BlockSide::RIGHT.normal(),
            Vector3::new(0, 0, 0)
        );
    }
}
