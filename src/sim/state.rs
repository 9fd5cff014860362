//! Game state and core simulation types
//!
//! All mutable game state lives in one [`GameState`] aggregate owned by the
//! host and mutated only through [`super::tick::tick`]. Presentation-side
//! collaborators react to the queued [`GameEvent`]s instead of being called
//! directly.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level;
use super::shake::{CameraShake, ShakeOffset};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Portal entered, waiting out the delay before the next level
    LevelComplete,
    /// The light ran out (terminal until reset)
    Lost,
    /// The final level was cleared (terminal until reset)
    Won,
}

/// A static pillar the player collides with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    /// World-space box, fixed at level setup
    pub aabb: Aabb,
}

/// A collectible light orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub position: Vec3,
    /// Accumulated idle spin (radians), visual only
    pub spin: f32,
}

/// The level exit. Exists only once the orb quota is met.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub position: Vec3,
    /// Accumulated idle spin (radians), visual only
    pub spin: f32,
}

impl Portal {
    /// Pulsing glow intensity for the renderer's point light
    pub fn glow_intensity(&self, time_secs: f32) -> f32 {
        2.0 + (time_secs * 3.0).sin() * 0.5
    }
}

/// The player rig. `position` is the eye point; the feet sit at
/// `position.y - height`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub can_jump: bool,
    /// Derived each tick: trying to move, grounded, and actually displacing
    pub walking: bool,
}

impl Player {
    /// Fresh player at the spawn point, standing on the ground
    pub fn spawn(eye_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, eye_height, 0.0),
            velocity_y: 0.0,
            on_ground: true,
            can_jump: true,
            walking: false,
        }
    }
}

/// Presentation events, queued during a tick and drained once per frame by
/// the host's audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32, orbs_needed: u32 },
    OrbCollected { score: u32, orbs_needed: u32 },
    PortalRevealed,
    LevelComplete { level: u32 },
    Won { level: u32 },
    Lost { level: u32, score: u32 },
    Jumped,
    Landed,
    WalkStarted,
    WalkStopped,
}

/// A scheduled advance out of `LevelComplete`, stamped with the epoch it was
/// created under so a reset in the meantime invalidates it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingTransition {
    /// Simulated seconds until the next level starts
    pub remaining: f32,
    pub epoch: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducible layouts
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level number, starting at 1
    pub level: u32,
    /// Orb quota for this level
    pub orbs_needed: u32,
    /// Light drain for this level (points per second)
    pub fade_rate: f32,
    /// Orbs collected this level, never exceeds `orbs_needed`
    pub score: u32,
    /// Remaining light in [0, 100]
    pub light_level: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    pub portal: Option<Portal>,
    pub shake: CameraShake,
    /// Camera displacement computed by the last tick
    #[serde(skip)]
    pub shake_offset: ShakeOffset,
    /// Scheduled advance out of `LevelComplete`, if any
    pub pending_transition: Option<PendingTransition>,
    /// Bumped by every level setup and reset; stale transitions never fire
    pub level_epoch: u32,
    /// Ticks are skipped until the host signals assets are ready
    pub assets_ready: bool,
    /// Elapsed simulated time (seconds)
    pub time_secs: f32,
    /// Queued presentation events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New run with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New run at level 1; `tick` stays inert until
    /// [`notify_assets_loaded`](Self::notify_assets_loaded) is called
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::spawn(tuning.player_height);
        let mut state = Self {
            seed,
            tuning,
            phase: GamePhase::Playing,
            level: 1,
            orbs_needed: 0,
            fade_rate: 0.0,
            score: 0,
            light_level: 0.0,
            player,
            obstacles: Vec::new(),
            orbs: Vec::new(),
            portal: None,
            shake: CameraShake::default(),
            shake_offset: ShakeOffset::default(),
            pending_transition: None,
            level_epoch: 0,
            assets_ready: false,
            time_secs: 0.0,
            events: Vec::new(),
        };
        state.setup_level(1);
        state
    }

    /// RNG for a level's layout, derived from the run seed and level number
    pub(crate) fn layout_rng(&self, level: u32) -> Pcg32 {
        let level_seed = (level as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(level_seed)
    }

    /// RNG for the portal draw, decorrelated from the layout stream
    pub(crate) fn portal_rng(&self) -> Pcg32 {
        let portal_seed = (self.level as u64).wrapping_mul(7919).wrapping_add(self.seed);
        Pcg32::seed_from_u64(portal_seed)
    }

    /// Tear down the previous level's entities and lay out `level`
    pub fn setup_level(&mut self, level: u32) {
        log::info!("Setting up level {level}");
        self.level_epoch = self.level_epoch.wrapping_add(1);
        self.pending_transition = None;
        self.phase = GamePhase::Playing;
        self.level = level;
        self.orbs_needed = self.tuning.orbs_for_level(level);
        self.fade_rate = self.tuning.fade_rate_for_level(level);
        self.score = 0;
        self.light_level = self.tuning.initial_light_level;
        self.player = Player::spawn(self.tuning.player_height);
        self.portal = None;
        self.shake.reset();

        let mut rng = self.layout_rng(level);
        self.obstacles = level::place_obstacles(&mut rng, &self.tuning);
        self.orbs = level::place_orbs(&mut rng, &self.tuning, self.orbs_needed, &self.obstacles);

        self.events.push(GameEvent::LevelStarted {
            level,
            orbs_needed: self.orbs_needed,
        });
    }

    /// Collapse any state back to a fresh level 1 run. The host wires this to
    /// its restart interaction from `Lost` or `Won`.
    pub fn reset(&mut self) {
        log::info!("Resetting game to level 1");
        self.time_secs = 0.0;
        self.setup_level(1);
    }

    /// Host signal that external assets finished loading; ticks run after this
    pub fn notify_assets_loaded(&mut self) {
        self.assets_ready = true;
    }

    /// Drain the queued presentation events for host consumption
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Monotonic visual brightness in [0, 1]; forced to zero once lost
    pub fn light_intensity_factor(&self) -> f32 {
        if self.phase == GamePhase::Lost {
            return 0.0;
        }
        (self.light_level / 100.0).clamp(0.0, 1.0).powf(1.5)
    }

    /// Fog (near, far) distances for the renderer; the fog closes in as the
    /// light fades, and far never drops below near + 5
    pub fn fog_range(&self) -> (f32, f32) {
        let dimmed = (100.0 - self.light_level) / 100.0;
        let near = 3.0 + dimmed * self.tuning.world_size * 0.2;
        let far = self.tuning.world_size * 0.75 - dimmed * self.tuning.world_size * 0.4;
        (near, far.max(near + 5.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_level_one_full_light() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.orbs_needed, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.light_level, 100.0);
        assert!(state.portal.is_none());
        assert!(!state.assets_ready);
        assert_eq!(state.orbs.len(), 5);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.position, ob.position);
        }
        for (oa, ob) in a.orbs.iter().zip(&b.orbs) {
            assert_eq!(oa.position, ob.position);
        }
    }

    #[test]
    fn test_setup_level_bumps_epoch_and_clears_pending() {
        let mut state = GameState::new(7);
        let epoch = state.level_epoch;
        state.pending_transition = Some(PendingTransition {
            remaining: 1.0,
            epoch,
        });
        state.setup_level(2);
        assert_eq!(state.level_epoch, epoch + 1);
        assert!(state.pending_transition.is_none());
        assert_eq!(state.orbs_needed, 6);
        assert_eq!(state.light_level, 100.0);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(7);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelStarted {
            level: 1,
            orbs_needed: 5
        }));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_light_intensity_zero_when_lost() {
        let mut state = GameState::new(7);
        state.light_level = 50.0;
        assert!(state.light_intensity_factor() > 0.0);
        state.phase = GamePhase::Lost;
        assert_eq!(state.light_intensity_factor(), 0.0);
    }

    #[test]
    fn test_fog_closes_in_as_light_fades() {
        let mut state = GameState::new(7);
        let (near_bright, far_bright) = state.fog_range();
        state.light_level = 0.0;
        let (near_dark, far_dark) = state.fog_range();
        assert!(near_dark > near_bright);
        assert!(far_dark < far_bright);
        assert!(far_dark >= near_dark + 5.0);
    }
}
