//! Fixed-step simulation tick
//!
//! One call advances exactly one frame:
//! player -> spawning -> per-entity physics and collision -> compaction -> snapshot.
//!
//! The per-entity pass only visits entities that existed when the frame began.
//! Anything appended during the frame (shots, loot, effects, spawns) is first
//! visited on the next frame.

use super::collision;
use super::input::TickInput;
use super::physics;
use super::player;
use super::snapshot::HudSnapshot;
use super::spawn;
use super::state::SimState;

/// Shake multiplier applied every frame
pub const SHAKE_DECAY: f32 = 0.9;

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput) -> HudSnapshot {
    if state.game_over {
        return state.hud_snapshot();
    }
    state.events.clear();

    let frame_len = state.entities.len();

    player::update(state, input);
    state.frame += 1;
    spawn::update(state);

    for index in 0..frame_len {
        if !state.entities.is_live(index) {
            continue;
        }
        physics::integrate(state, index, frame_len);

        let collides = state.entities.get(index).is_some_and(|e| !e.is_removed() && !e.is_ephemeral());
        if collides {
            collision::resolve(state, index, input, frame_len);
        }
    }

    state.entities.compact();

    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    state.hud_snapshot()
}
