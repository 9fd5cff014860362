//! Level layout via rejection sampling
//!
//! Obstacles and orbs are placed by drawing uniform random candidates and
//! discarding any that violate the spacing constraints; the portal is placed
//! on a polar ring whose radius band clears the spawn by construction. The
//! attempt budget is finite and injectable through [`Tuning`]: exhausting it
//! is a warning, not an error, and the level proceeds with fewer entities.

use glam::Vec3;
use rand::Rng;

use super::collision::Aabb;
use super::state::{Obstacle, Orb, Portal};
use crate::tuning::Tuning;

/// Obstacle box extents (a tall pillar resting on the ground)
pub const OBSTACLE_SIZE: Vec3 = Vec3::new(1.0, 5.0, 1.0);

/// Obstacles may not spawn within this distance of the player spawn
const OBSTACLE_SPAWN_CLEARANCE: f32 = 4.0;
/// Minimum distance between obstacle centers
const OBSTACLE_SEPARATION: f32 = 3.0;
/// Obstacles keep this much center distance from the outer walls
const OBSTACLE_WALL_MARGIN: f32 = 2.0;
/// Orbs may not spawn within this distance of the player spawn
const ORB_SPAWN_CLEARANCE: f32 = 3.0;
const ORB_WALL_MARGIN: f32 = 1.0;
/// Orbs keep clear of every obstacle box grown by this much
const ORB_OBSTACLE_CLEARANCE: f32 = 0.5;

/// Where the player stands at level start (the eye point)
fn spawn_point(tuning: &Tuning) -> Vec3 {
    Vec3::new(0.0, tuning.player_height, 0.0)
}

/// Uniform draw from the central 80% of the floor at the given height
fn random_floor_position<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, y: f32) -> Vec3 {
    let span = tuning.world_size * 0.8;
    Vec3::new(
        (rng.random::<f32>() - 0.5) * span,
        y,
        (rng.random::<f32>() - 0.5) * span,
    )
}

/// Chebyshev distance from the world center on the ground plane
fn center_distance(position: Vec3) -> f32 {
    position.x.abs().max(position.z.abs())
}

/// Place up to `tuning.obstacle_count` pillars
pub fn place_obstacles<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Vec<Obstacle> {
    let count = tuning.obstacle_count as usize;
    let max_attempts = tuning
        .placement_attempts_per_item
        .saturating_mul(tuning.obstacle_count);
    let spawn = spawn_point(tuning);
    let mut placed: Vec<Obstacle> = Vec::with_capacity(count);

    let mut attempts = 0;
    while placed.len() < count && attempts < max_attempts {
        attempts += 1;
        let position = random_floor_position(rng, tuning, OBSTACLE_SIZE.y / 2.0);

        if position.distance(spawn) <= OBSTACLE_SPAWN_CLEARANCE {
            continue;
        }
        if center_distance(position) >= tuning.world_size / 2.0 - OBSTACLE_WALL_MARGIN {
            continue;
        }
        if placed
            .iter()
            .any(|o| o.position.distance(position) < OBSTACLE_SEPARATION)
        {
            continue;
        }

        placed.push(Obstacle {
            position,
            aabb: Aabb::from_center_size(position, OBSTACLE_SIZE),
        });
    }

    if placed.len() < count {
        log::warn!(
            "placed {}/{} obstacles before exhausting {} attempts",
            placed.len(),
            count,
            max_attempts
        );
    }
    placed
}

/// Place up to `count` orbs clear of the spawn, walls, and obstacle boxes
pub fn place_orbs<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    count: u32,
    obstacles: &[Obstacle],
) -> Vec<Orb> {
    let max_attempts = tuning.placement_attempts_per_item.saturating_mul(count);
    let count = count as usize;
    let spawn = spawn_point(tuning);
    let mut placed: Vec<Orb> = Vec::with_capacity(count);

    // Float around eye level, but always below the ceiling
    let min_height = tuning.player_height * 0.8;
    let max_height = tuning.player_height + 1.2;

    let mut attempts = 0;
    while placed.len() < count && attempts < max_attempts {
        attempts += 1;
        let y = (min_height + rng.random::<f32>() * (max_height - min_height))
            .min(tuning.wall_height - tuning.orb_radius * 2.0);
        let position = random_floor_position(rng, tuning, y);

        if position.distance(spawn) <= ORB_SPAWN_CLEARANCE {
            continue;
        }
        if center_distance(position) >= tuning.world_size / 2.0 - ORB_WALL_MARGIN {
            continue;
        }
        let orb_box = Aabb::from_center_size(position, Vec3::splat(tuning.orb_radius * 2.0));
        if obstacles
            .iter()
            .any(|o| orb_box.intersects(&o.aabb.expanded(ORB_OBSTACLE_CLEARANCE)))
        {
            continue;
        }

        placed.push(Orb {
            position,
            spin: 0.0,
        });
    }

    if placed.len() < count {
        log::warn!(
            "placed {}/{} orbs before exhausting {} attempts",
            placed.len(),
            count,
            max_attempts
        );
    }
    placed
}

/// Place the exit portal on a ring away from the spawn, at eye level.
/// The radius band starts at 30% of the world size, so the spawn zone is
/// avoided without any rejection loop.
pub fn place_portal<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Portal {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let radius = tuning.world_size * 0.3 + rng.random::<f32>() * tuning.world_size * 0.15;
    Portal {
        position: crate::polar_to_world(radius, angle, tuning.player_height),
        spin: 0.0,
    }
}
