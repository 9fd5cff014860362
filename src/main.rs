//! Lumenfall entry point
//!
//! Headless driver: runs a scripted bot through the simulation for a bounded
//! number of frames and logs the events a presentation layer would react to.
//! Doubles as a smoke test and as the reference for embedding the core.

use lumenfall::sim::{GamePhase, GameState, TickInput, tick};

const DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Starting run with seed {seed}");

    let mut state = GameState::new(seed);
    // No real assets to wait for in the headless driver
    state.notify_assets_loaded();

    let mut input = TickInput::default();
    let mut frame = 0;
    while frame < MAX_FRAMES {
        steer_toward_target(&state, &mut input);
        tick(&mut state, &input, DT);
        input.jump = false;
        input.reset = false;

        for event in state.drain_events() {
            log::info!("[frame {frame:5}] {event:?}");
        }

        if matches!(state.phase, GamePhase::Lost | GamePhase::Won) {
            break;
        }
        frame += 1;
    }

    println!(
        "run over after {frame} frames: level {} score {}/{} light {:.1} phase {:?}",
        state.level, state.score, state.orbs_needed, state.light_level, state.phase
    );
}

/// Point the bot at the nearest orb, or at the portal once it exists
fn steer_toward_target(state: &GameState, input: &mut TickInput) {
    let eye = state.player.position;
    let target = state
        .portal
        .as_ref()
        .map(|portal| portal.position)
        .or_else(|| {
            state
                .orbs
                .iter()
                .min_by(|a, b| {
                    let da = a.position.distance(eye);
                    let db = b.position.distance(eye);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|orb| orb.position)
        });

    match target {
        Some(target) => {
            input.look_dir = (target - eye).normalize_or_zero();
            input.forward = true;
        }
        None => {
            input.forward = false;
        }
    }
}
