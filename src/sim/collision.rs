//! Axis-aligned collision detection and the slide response
//!
//! The player is a vertical box tested against the obstacle set. Blocked
//! diagonal movement is resolved by re-testing each horizontal axis on its
//! own and keeping whichever components are unobstructed. This is an
//! approximation, not continuous collision detection: a fast enough entity
//! could tunnel through thin geometry, which is acceptable here because
//! player speed and obstacle thickness are both small and bounded.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::consts::SLIDE_EPSILON;

/// Axis-aligned bounding box as a world-space min/max corner pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test, closed on every axis
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Grown by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Aabb {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

/// The player's collision volume at a proposed eye position: half-extent
/// `radius` in X/Z, spanning from the feet to slightly above the eye.
pub fn player_aabb(eye: Vec3, radius: f32, height: f32) -> Aabb {
    Aabb::new(
        Vec3::new(eye.x - radius, eye.y - height, eye.z - radius),
        Vec3::new(eye.x + radius, eye.y + 0.1, eye.z + radius),
    )
}

/// First obstacle whose box intersects the player box at `eye`, if any.
/// List order breaks ties; callers only use presence or absence.
pub fn first_obstacle_hit<'a>(
    eye: Vec3,
    radius: f32,
    height: f32,
    obstacles: &'a [Obstacle],
) -> Option<&'a Obstacle> {
    let player_box = player_aabb(eye, radius, height);
    obstacles.iter().find(|o| player_box.intersects(&o.aabb))
}

/// Resolve a proposed horizontal displacement against the obstacle set.
///
/// The full vector is tried first. On a hit, the X and Z components are
/// re-tested independently, each nudged by [`SLIDE_EPSILON`] along its own
/// direction, and whichever components pass are summed. Zero, one, or both
/// components may survive.
pub fn resolve_slide(
    eye: Vec3,
    displacement: Vec3,
    radius: f32,
    height: f32,
    obstacles: &[Obstacle],
) -> Vec3 {
    if first_obstacle_hit(eye + displacement, radius, height, obstacles).is_none() {
        return displacement;
    }

    let mut applied = Vec3::ZERO;

    let step_x = Vec3::new(displacement.x, 0.0, 0.0);
    if step_x.x != 0.0 {
        let probe = eye + step_x + step_x.normalize_or_zero() * SLIDE_EPSILON;
        if first_obstacle_hit(probe, radius, height, obstacles).is_none() {
            applied += step_x;
        }
    }

    let step_z = Vec3::new(0.0, 0.0, displacement.z);
    if step_z.z != 0.0 {
        let probe = eye + step_z + step_z.normalize_or_zero() * SLIDE_EPSILON;
        if first_obstacle_hit(probe, radius, height, obstacles).is_none() {
            applied += step_z;
        }
    }

    applied
}
