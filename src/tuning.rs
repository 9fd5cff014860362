//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here, defaulting to the
//! values in [`crate::consts`]. Hosts can deserialize a modified `Tuning` to
//! rebalance a build without touching algorithm code; tests inject shrunken
//! worlds and hostile attempt budgets the same way.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay configuration, injectable per [`crate::sim::GameState`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Side length of the square play area
    pub world_size: f32,
    /// Wall (and ceiling) height
    pub wall_height: f32,
    /// Horizontal movement speed (units per second)
    pub player_speed: f32,
    /// Half-extent of the player's collision box in X/Z
    pub player_radius: f32,
    /// Eye height above the feet
    pub player_height: f32,
    /// Initial upward velocity of a jump
    pub jump_force: f32,
    /// Downward acceleration (units per second squared)
    pub gravity: f32,
    pub orb_radius: f32,
    /// Extra reach beyond the player and orb radii when collecting
    pub collection_margin: f32,
    pub initial_light_level: f32,
    pub light_boost_per_orb: f32,
    /// Light level at or below which the run is lost
    pub min_light_level: f32,
    pub base_orb_count: u32,
    pub orb_increment: u32,
    pub base_fade_rate: f32,
    pub fade_increment: f32,
    /// Clearing this level wins the run
    pub final_level: u32,
    pub obstacle_count: u32,
    /// Radius of the exit portal ring
    pub exit_radius: f32,
    /// Rejection-sampling attempts allowed per requested entity
    pub placement_attempts_per_item: u32,
    /// Seconds between entering the portal and the next level starting
    pub level_transition_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            wall_height: WALL_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            player_height: PLAYER_HEIGHT,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            orb_radius: ORB_RADIUS,
            collection_margin: COLLECTION_MARGIN,
            initial_light_level: INITIAL_LIGHT_LEVEL,
            light_boost_per_orb: LIGHT_BOOST_PER_ORB,
            min_light_level: MIN_LIGHT_LEVEL,
            base_orb_count: BASE_ORB_COUNT,
            orb_increment: ORB_INCREMENT,
            base_fade_rate: BASE_FADE_RATE,
            fade_increment: FADE_INCREMENT,
            final_level: FINAL_LEVEL,
            obstacle_count: OBSTACLE_COUNT,
            exit_radius: EXIT_RADIUS,
            placement_attempts_per_item: PLACEMENT_ATTEMPTS_PER_ITEM,
            level_transition_delay: LEVEL_TRANSITION_DELAY,
        }
    }
}

impl Tuning {
    /// Orb quota for a level (level numbers start at 1)
    pub fn orbs_for_level(&self, level: u32) -> u32 {
        self.base_orb_count + level.saturating_sub(1) * self.orb_increment
    }

    /// Light fade rate in points per second for a level
    pub fn fade_rate_for_level(&self, level: u32) -> f32 {
        self.base_fade_rate + level.saturating_sub(1) as f32 * self.fade_increment
    }

    /// Distance at which an orb is collected
    pub fn collection_distance(&self) -> f32 {
        self.player_radius + self.orb_radius + self.collection_margin
    }

    /// Highest Y the player's eye may reach
    pub fn ceiling_limit(&self) -> f32 {
        self.wall_height - self.player_radius * 0.1
    }

    /// Furthest the player's eye may travel from center on X or Z
    pub fn boundary_limit(&self) -> f32 {
        self.world_size / 2.0 - self.player_radius
    }
}
