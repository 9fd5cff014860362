//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies
//! - One `tick` per host frame, fixed internal order

pub mod collision;
pub mod level;
pub mod player;
pub mod shake;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_obstacle_hit, player_aabb, resolve_slide};
pub use shake::{CameraShake, ShakeOffset};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, Orb, PendingTransition, Player, Portal,
};
pub use tick::{TickInput, tick};
