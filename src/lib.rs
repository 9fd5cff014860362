//! Lumenfall - a first-person orb-collection game in fading light
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio, HUD, and input capture are external collaborators: the
//! host feeds a [`sim::TickInput`] into [`sim::tick`] once per frame and
//! reacts to the [`sim::GameEvent`]s the simulation queues.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Orbs needed for level 1
    pub const BASE_ORB_COUNT: u32 = 5;
    /// How many more orbs are needed per level
    pub const ORB_INCREMENT: u32 = 1;
    /// Light fade rate for level 1 (points per second)
    pub const BASE_FADE_RATE: f32 = 3.0;
    /// How much faster the fade gets per level
    pub const FADE_INCREMENT: f32 = 1.5;
    /// The last level number
    pub const FINAL_LEVEL: u32 = 100;
    /// Every level starts with full light
    pub const INITIAL_LIGHT_LEVEL: f32 = 100.0;
    pub const LIGHT_BOOST_PER_ORB: f32 = 10.0;
    /// At or below this light level the run is lost
    pub const MIN_LIGHT_LEVEL: f32 = 10.0;

    /// Player defaults - the tracked position is the eye point
    pub const PLAYER_HEIGHT: f32 = 1.8;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Slightly smaller radius for easier collision navigation
    pub const PLAYER_RADIUS: f32 = 0.4;
    pub const JUMP_FORCE: f32 = 7.0;
    pub const GRAVITY: f32 = 18.0;

    /// Arena dimensions
    pub const WORLD_SIZE: f32 = 30.0;
    pub const WALL_HEIGHT: f32 = 8.0;

    /// Entity defaults
    pub const ORB_RADIUS: f32 = 0.3;
    /// Extra reach beyond the player and orb radii when collecting
    pub const COLLECTION_MARGIN: f32 = 0.2;
    pub const EXIT_RADIUS: f32 = 1.5;
    pub const OBSTACLE_COUNT: u32 = 7;

    /// Rejection-sampling attempts allowed per requested entity
    pub const PLACEMENT_ATTEMPTS_PER_ITEM: u32 = 5;

    /// Seconds between entering the portal and the next level starting
    pub const LEVEL_TRANSITION_DELAY: f32 = 1.5;

    /// Camera shake
    pub const WALK_SHAKE_FREQUENCY: f32 = 7.0;
    pub const WALK_SHAKE_AMOUNT: f32 = 0.3;
    pub const WALK_SHAKE_ROLL_AMOUNT: f32 = 0.05;
    pub const LAND_SHAKE_INTENSITY: f32 = 0.8;
    pub const LAND_SHAKE_DURATION: f32 = 0.3;

    /// Offset applied along a slide axis before re-testing it, so a box
    /// already in contact does not immediately re-collide
    pub const SLIDE_EPSILON: f32 = 0.01;
}

/// Project a direction onto the XZ plane and normalize; zero if vertical.
#[inline]
pub fn flatten_to_xz(dir: Vec3) -> Vec3 {
    Vec3::new(dir.x, 0.0, dir.z).normalize_or_zero()
}

/// Convert polar (radius, angle) to a world-space position at the given height.
#[inline]
pub fn polar_to_world(radius: f32, angle: f32, y: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}
