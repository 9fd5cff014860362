//! Player kinematics: movement intent, gravity, jumping, and clamps
//!
//! Runs once per tick while the game is in `Playing`. Horizontal movement is
//! resolved through the slide response in [`super::collision`]; vertical
//! movement integrates gravity and clamps against the ground plane and the
//! ceiling; the world boundary is a hard clamp, not a collision response.

use glam::Vec3;

use super::collision;
use super::state::{GameEvent, GameState};
use super::tick::TickInput;
use crate::flatten_to_xz;

/// Resolve the four direction flags against the look direction into a unit
/// intent vector on the XZ plane. Opposing flags cancel through summation;
/// no combination is an error.
pub fn move_intent(
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    look_dir: Vec3,
) -> Vec3 {
    let fwd = flatten_to_xz(look_dir);
    // Up cross forward points to the camera's left
    let left_dir = Vec3::Y.cross(fwd);

    let mut dir = Vec3::ZERO;
    if forward {
        dir += fwd;
    }
    if backward {
        dir -= fwd;
    }
    if left {
        dir += left_dir;
    }
    if right {
        dir -= left_dir;
    }
    dir.normalize_or_zero()
}

/// Advance the player one frame. Emits `Jumped`, `Landed`, and the
/// walk-start/stop events as the derived states flip.
pub fn update(state: &mut GameState, input: &TickInput, dt: f32) {
    let radius = state.tuning.player_radius;
    let height = state.tuning.player_height;

    // Jump trigger (one-shot from the host). The caller only runs us while
    // playing, so no separate game-over guard is needed here.
    if input.jump && state.player.can_jump {
        state.player.velocity_y = state.tuning.jump_force;
        state.player.can_jump = false;
        state.player.on_ground = false;
        if state.player.walking {
            state.player.walking = false;
            state.events.push(GameEvent::WalkStopped);
            state.shake.stop_walking();
        }
        state.events.push(GameEvent::Jumped);
    }

    // Horizontal movement with slide response
    let intent = move_intent(
        input.forward,
        input.backward,
        input.left,
        input.right,
        input.look_dir,
    );
    let displacement = intent * state.tuning.player_speed * dt;
    let applied = collision::resolve_slide(
        state.player.position,
        displacement,
        radius,
        height,
        &state.obstacles,
    );
    state.player.position += applied;

    // Vertical integration with ground and ceiling clamps
    let was_on_ground = state.player.on_ground;
    state.player.velocity_y -= state.tuning.gravity * dt;
    let proposed_y = state.player.position.y + state.player.velocity_y * dt;

    if proposed_y < height {
        // Feet reached the floor
        state.player.position.y = height;
        state.player.velocity_y = 0.0;
        state.player.can_jump = true;
        state.player.on_ground = true;
        if !was_on_ground {
            state.events.push(GameEvent::Landed);
            state.shake.trigger_landing();
        }
    } else {
        state.player.on_ground = false;
        let ceiling = state.tuning.ceiling_limit();
        if proposed_y > ceiling {
            state.player.position.y = ceiling;
            state.player.velocity_y = state.player.velocity_y.min(0.0);
        } else {
            state.player.position.y = proposed_y;
        }
    }

    // Hard world boundary
    let limit = state.tuning.boundary_limit();
    state.player.position.x = state.player.position.x.clamp(-limit, limit);
    state.player.position.z = state.player.position.z.clamp(-limit, limit);

    // Derived walking flag: intent present, grounded, and the slide left
    // actual displacement
    let trying = input.forward || input.backward || input.left || input.right;
    let moved = applied.length_squared() > 1e-4;
    let should_walk = trying && state.player.on_ground && moved;
    if should_walk != state.player.walking {
        state.player.walking = should_walk;
        if should_walk {
            state.events.push(GameEvent::WalkStarted);
        } else {
            state.events.push(GameEvent::WalkStopped);
            state.shake.stop_walking();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Aabb;
    use crate::sim::state::Obstacle;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn test_state() -> GameState {
        let mut state = GameState::new(1);
        state.assets_ready = true;
        // Open field for movement tests
        state.obstacles.clear();
        state.orbs.clear();
        state
    }

    fn forward_input() -> TickInput {
        TickInput {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_intent_normalizes_diagonals() {
        let dir = move_intent(true, false, false, true, Vec3::NEG_Z);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.z < 0.0);
    }

    #[test]
    fn test_opposing_flags_cancel() {
        let dir = move_intent(true, true, false, false, Vec3::NEG_Z);
        assert_eq!(dir, Vec3::ZERO);
    }

    #[test]
    fn test_look_direction_steers_movement() {
        // Looking +X, forward intent is +X
        let dir = move_intent(true, false, false, false, Vec3::X);
        assert!((dir - Vec3::X).length() < 1e-6);
        // Strafing right while looking +X heads toward +Z
        let dir = move_intent(false, false, false, true, Vec3::X);
        assert!((dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_boundary_clamp_is_exact() {
        let mut state = test_state();
        let input = TickInput {
            forward: true,
            look_dir: Vec3::X,
            ..Default::default()
        };
        for _ in 0..1200 {
            update(&mut state, &input, DT);
        }
        let limit = state.tuning.boundary_limit();
        assert_eq!(state.player.position.x, limit);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut state = test_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        update(&mut state, &jump, DT);
        assert!(!state.player.can_jump);
        assert!(!state.player.on_ground);
        assert!(state.drain_events().contains(&GameEvent::Jumped));

        let coast = TickInput::default();
        let mut landed_after = 0;
        for frame in 0..240 {
            update(&mut state, &coast, DT);
            if state.player.on_ground {
                landed_after = frame;
                break;
            }
        }
        assert!(landed_after > 0, "player never landed");
        assert_eq!(state.player.position.y, state.tuning.player_height);
        assert!(state.player.can_jump);
        assert!(state.drain_events().contains(&GameEvent::Landed));
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut state = test_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        update(&mut state, &jump, DT);
        let v_after_first = state.player.velocity_y;
        update(&mut state, &jump, DT);
        // Second press must not re-apply jump force
        assert!(state.player.velocity_y < v_after_first);
    }

    #[test]
    fn test_blocked_axis_component_dropped() {
        let mut state = test_state();
        // Wall of pillars straight ahead on -Z
        for i in -3..=3 {
            let position = Vec3::new(i as f32, 2.5, -2.0);
            state.obstacles.push(Obstacle {
                position,
                aabb: Aabb::from_center_size(position, Vec3::new(1.0, 5.0, 1.0)),
            });
        }
        let input = TickInput {
            forward: true,
            right: true,
            look_dir: Vec3::NEG_Z,
            ..Default::default()
        };
        let before = state.player.position;
        for _ in 0..30 {
            update(&mut state, &input, DT);
        }
        // Slid along +X, held short of the wall on Z
        assert!(state.player.position.x > before.x);
        assert!(state.player.position.z > -1.1);
    }

    #[test]
    fn test_walk_events_fire_on_transitions() {
        let mut state = test_state();
        update(&mut state, &forward_input(), DT);
        assert!(state.player.walking);
        assert!(state.drain_events().contains(&GameEvent::WalkStarted));

        update(&mut state, &TickInput::default(), DT);
        assert!(!state.player.walking);
        assert!(state.drain_events().contains(&GameEvent::WalkStopped));
    }

    #[test]
    fn test_pushing_into_obstacle_stops_walking() {
        let mut state = test_state();
        // Pillar dead ahead on -Z, wide enough that no slide survives
        let position = Vec3::new(0.0, 2.5, -1.5);
        state.obstacles.push(Obstacle {
            position,
            aabb: Aabb::from_center_size(position, Vec3::new(40.0, 5.0, 1.0)),
        });
        for _ in 0..60 {
            update(&mut state, &forward_input(), DT);
        }
        state.drain_events();
        update(&mut state, &forward_input(), DT);
        // Intent is present but the slide is fully blocked
        assert!(!state.player.walking);
        assert!(!state
            .drain_events()
            .contains(&GameEvent::WalkStarted));
    }

    proptest! {
        #[test]
        fn prop_vertical_position_stays_in_bounds(
            commands in prop::collection::vec((any::<bool>(), any::<bool>(), 0u8..4), 1..200)
        ) {
            let mut state = test_state();
            for (jump, forward, look) in commands {
                let look_dir = match look {
                    0 => Vec3::NEG_Z,
                    1 => Vec3::X,
                    2 => Vec3::Z,
                    _ => Vec3::NEG_X,
                };
                let input = TickInput { jump, forward, look_dir, ..Default::default() };
                update(&mut state, &input, DT);
                prop_assert!(state.player.position.y >= state.tuning.player_height - 1e-4);
                prop_assert!(state.player.position.y <= state.tuning.ceiling_limit() + 1e-4);
            }
        }

        #[test]
        fn prop_horizontal_position_stays_in_bounds(
            commands in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..300)
        ) {
            let mut state = test_state();
            for (forward, backward, left, right) in commands {
                let input = TickInput { forward, backward, left, right, ..Default::default() };
                update(&mut state, &input, DT);
                let limit = state.tuning.boundary_limit();
                prop_assert!(state.player.position.x.abs() <= limit);
                prop_assert!(state.player.position.z.abs() <= limit);
            }
        }
    }
}
