//! Cosmetic camera shake: walk bob and landing pulses
//!
//! Purely visual. The simulation advances the oscillator once per tick and
//! the host applies the produced offset to its camera rig on top of the
//! player position. Jitter comes from an integer hash of the frame counter
//! so replays of the same state stay identical.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-frame camera displacement produced by [`CameraShake::update`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShakeOffset {
    /// Local-space positional offset for the camera rig
    pub offset: Vec3,
    /// Roll around the view axis (radians)
    pub roll: f32,
}

/// Oscillator state for the walk bob and landing shake
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraShake {
    /// Peak of the active landing pulse
    intensity: f32,
    /// Seconds left on the landing pulse
    time_left: f32,
    /// Progress through the walk bob cycle
    walk_phase: f32,
    /// Frame counter feeding the jitter hash
    ticks: u32,
}

impl CameraShake {
    /// Start a landing pulse at full intensity
    pub fn trigger_landing(&mut self) {
        self.intensity = LAND_SHAKE_INTENSITY;
        self.time_left = LAND_SHAKE_DURATION;
    }

    /// Walking stopped; the bob cycle restarts from zero next time
    pub fn stop_walking(&mut self) {
        self.walk_phase = 0.0;
    }

    /// Clear all shake state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the oscillator and produce this frame's camera displacement
    pub fn update(&mut self, dt: f32, walking: bool, on_ground: bool, player_speed: f32) -> ShakeOffset {
        self.ticks = self.ticks.wrapping_add(1);
        let mut out = ShakeOffset::default();

        // Landing pulse, fading linearly over its duration
        if self.time_left > 0.0 {
            let current = self.intensity * (self.time_left / LAND_SHAKE_DURATION);
            let jitter_y = hash_unit(self.ticks) - 0.5;
            let jitter_roll = hash_unit(self.ticks.wrapping_add(104_729)) - 0.5;
            out.offset.y += jitter_y * 2.0 * current;
            out.roll += jitter_roll * current * 0.1;
            self.time_left -= dt;
            if self.time_left <= 0.0 {
                self.intensity = 0.0;
                self.time_left = 0.0;
            }
        }

        // Walk bob, phase advancing with movement speed
        if walking && on_ground {
            self.walk_phase += dt * player_speed * 0.5;
            out.offset.y += (self.walk_phase * WALK_SHAKE_FREQUENCY).sin() * WALK_SHAKE_AMOUNT;
            out.roll +=
                (self.walk_phase * WALK_SHAKE_FREQUENCY * 0.5).cos() * WALK_SHAKE_ROLL_AMOUNT;
        }

        out
    }
}

/// Deterministic jitter in [0, 1) from a counter
fn hash_unit(n: u32) -> f32 {
    let h = n.wrapping_mul(2_654_435_761).wrapping_add(7919);
    (h % 1000) as f32 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_idle_shake_is_zero() {
        let mut shake = CameraShake::default();
        let out = shake.update(DT, false, true, 5.0);
        assert_eq!(out, ShakeOffset::default());
    }

    #[test]
    fn test_landing_pulse_decays_to_zero() {
        let mut shake = CameraShake::default();
        shake.trigger_landing();
        let first = shake.update(DT, false, true, 5.0);
        assert!(first.offset.y.abs() <= LAND_SHAKE_INTENSITY);

        // Pulse is gone after its duration has elapsed
        for _ in 0..((LAND_SHAKE_DURATION / DT) as usize + 2) {
            shake.update(DT, false, true, 5.0);
        }
        let after = shake.update(DT, false, true, 5.0);
        assert_eq!(after, ShakeOffset::default());
    }

    #[test]
    fn test_walk_bob_oscillates_within_amplitude() {
        let mut shake = CameraShake::default();
        let mut peak: f32 = 0.0;
        for _ in 0..240 {
            let out = shake.update(DT, true, true, 5.0);
            assert!(out.offset.y.abs() <= WALK_SHAKE_AMOUNT + 1e-6);
            assert!(out.roll.abs() <= WALK_SHAKE_ROLL_AMOUNT + 1e-6);
            peak = peak.max(out.offset.y.abs());
        }
        assert!(peak > WALK_SHAKE_AMOUNT * 0.5);
    }

    #[test]
    fn test_stop_walking_restarts_bob_cycle() {
        let mut shake = CameraShake::default();
        for _ in 0..30 {
            shake.update(DT, true, true, 5.0);
        }
        shake.stop_walking();
        // First bob sample after a restart is near the cycle origin
        let out = shake.update(DT, true, true, 5.0);
        let expected = (DT * 5.0 * 0.5 * WALK_SHAKE_FREQUENCY).sin() * WALK_SHAKE_AMOUNT;
        assert!((out.offset.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_airborne_walk_produces_no_bob() {
        let mut shake = CameraShake::default();
        let out = shake.update(DT, true, false, 5.0);
        assert_eq!(out, ShakeOffset::default());
    }
}
