//! Per-frame simulation update
//!
//! Core loop advancing the game deterministically. One call per rendered
//! frame, fixed internal order: player kinematics, orb pickups and the
//! portal check, light decay, then the cosmetic animators. Light decay and
//! portal checks are suspended in every phase but `Playing`.

use glam::Vec3;

use super::level;
use super::player;
use super::state::{GameEvent, GamePhase, GameState, PendingTransition};

/// Input intent for a single tick, refreshed by the host's input collaborator
/// before each call. `jump` and `reset` are one-shot triggers the host clears
/// after the tick.
#[derive(Debug, Clone)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump trigger
    pub jump: bool,
    /// Restart trigger, honored in `Lost` and `Won`
    pub reset: bool,
    /// The camera's current forward direction, queried from the rig
    pub look_dir: Vec3,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,
            reset: false,
            look_dir: Vec3::NEG_Z,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Assets are an external asynchronous precondition: until the host
    // signals ready, the tick is skipped whole and the host shows loading.
    if !state.assets_ready {
        return;
    }

    if input.reset && matches!(state.phase, GamePhase::Lost | GamePhase::Won) {
        state.reset();
        return;
    }

    state.time_secs += dt;

    match state.phase {
        GamePhase::Playing => {
            player::update(state, input, dt);
            collect_orbs(state);
            check_portal(state);
            // A portal entry above may have ended the phase; the light only
            // burns while actually playing
            if state.phase == GamePhase::Playing {
                decay_light(state, dt);
            }
        }
        GamePhase::LevelComplete => advance_pending_transition(state, dt),
        GamePhase::Lost | GamePhase::Won => {}
    }

    // Cosmetic animators run in every phase
    animate_entities(state, dt);
    state.shake_offset = state.shake.update(
        dt,
        state.player.walking,
        state.player.on_ground,
        state.tuning.player_speed,
    );
}

/// Remove every orb in reach, bumping score and light; the portal appears
/// the moment the quota is met
fn collect_orbs(state: &mut GameState) {
    let collect_dist = state.tuning.collection_distance();
    let player_pos = state.player.position;

    let mut i = 0;
    while i < state.orbs.len() {
        if state.orbs[i].position.distance(player_pos) < collect_dist {
            state.orbs.remove(i);
            state.score += 1;
            state.light_level =
                (state.light_level + state.tuning.light_boost_per_orb).min(100.0);
            state.events.push(GameEvent::OrbCollected {
                score: state.score,
                orbs_needed: state.orbs_needed,
            });
            if state.score >= state.orbs_needed && state.portal.is_none() {
                let mut rng = state.portal_rng();
                state.portal = Some(level::place_portal(&mut rng, &state.tuning));
                state.events.push(GameEvent::PortalRevealed);
                log::info!("Exit portal revealed on level {}", state.level);
            }
        } else {
            i += 1;
        }
    }
}

/// Entering the portal ends the level: the final level wins the run, any
/// other level schedules the delayed advance
fn check_portal(state: &mut GameState) {
    let Some(portal) = &state.portal else {
        return;
    };
    let reach = state.tuning.exit_radius + state.tuning.player_radius;
    if state.player.position.distance(portal.position) >= reach {
        return;
    }

    stop_walking(state);

    if state.level >= state.tuning.final_level {
        log::info!("Final level {} cleared", state.level);
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won { level: state.level });
    } else {
        log::info!("Level {} complete", state.level);
        state.phase = GamePhase::LevelComplete;
        state.portal = None;
        state.pending_transition = Some(PendingTransition {
            remaining: state.tuning.level_transition_delay,
            epoch: state.level_epoch,
        });
        state
            .events
            .push(GameEvent::LevelComplete { level: state.level });
    }
}

/// Burn down the light meter; at or below the minimum the run is lost
fn decay_light(state: &mut GameState, dt: f32) {
    state.light_level = (state.light_level - state.fade_rate * dt).max(0.0);
    if state.light_level <= state.tuning.min_light_level {
        log::info!("Light exhausted on level {}", state.level);
        state.phase = GamePhase::Lost;
        stop_walking(state);
        state.events.push(GameEvent::Lost {
            level: state.level,
            score: state.score,
        });
    }
}

/// Count down the scheduled advance. A stale epoch means a reset or a new
/// level happened since the transition was scheduled, so it is dropped
/// rather than fired.
fn advance_pending_transition(state: &mut GameState, dt: f32) {
    let Some(mut pending) = state.pending_transition else {
        return;
    };
    if pending.epoch != state.level_epoch {
        state.pending_transition = None;
        return;
    }
    pending.remaining -= dt;
    if pending.remaining <= 0.0 {
        state.setup_level(state.level + 1);
    } else {
        state.pending_transition = Some(pending);
    }
}

/// Idle animation for orbs and the portal; no gameplay effect
fn animate_entities(state: &mut GameState, dt: f32) {
    let time = state.time_secs;
    for (index, orb) in state.orbs.iter_mut().enumerate() {
        orb.position.y += (time * 2.0 + index as f32 * 0.5).sin() * 0.005;
        orb.spin += dt * 0.5;
    }
    if let Some(portal) = &mut state.portal {
        portal.spin += dt * 0.5;
    }
}

/// End any active walk, with the event the audio collaborator listens for
fn stop_walking(state: &mut GameState) {
    if state.player.walking {
        state.player.walking = false;
        state.events.push(GameEvent::WalkStopped);
        state.shake.stop_walking();
    }
}
