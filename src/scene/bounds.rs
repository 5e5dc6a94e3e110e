//! Axis-aligned bounding boxes for scene framing.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// World-space axis-aligned bounding box.
///
/// An empty box has `min = +inf` and `max = -inf` on every axis so that
/// [`union`](Self::union) with it is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The box that contains nothing.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a box from its corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Whether the box contains no point (any axis with `min > max`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to contain `point`.
    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Conservative world-space box for a primitive whose local position
    /// extent is `min..max`.
    ///
    /// Both corners are transformed into world space; the result is the
    /// cube around their midpoint whose half-size is the distance from the
    /// midpoint to the transformed `max`. The cube contains the primitive
    /// for any rotation in `world`, unlike a box built from the two
    /// transformed corners alone.
    #[must_use]
    pub fn from_transformed_extent(min: Vec3, max: Vec3, world: &Mat4) -> Self {
        let world_min = world.transform_point3(min);
        let world_max = world.transform_point3(max);
        let center = (world_min + world_max) * 0.5;
        let radius = (world_max - center).length();
        Self {
            min: center - Vec3::splat(radius),
            max: center + Vec3::splat(radius),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
