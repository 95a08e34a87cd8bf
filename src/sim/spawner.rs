//! Obstacle spawning
//!
//! Obstacles enter at the right edge with a random lane, a label from the
//! pool for their half of the track, and a size that grows with label length
//! and difficulty.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Obstacle, RunEvent, RunState};
use crate::content::TrackSide;
use crate::tuning::RunnerTuning;

/// Drawn size for a label at a given difficulty
pub fn obstacle_size(tuning: &RunnerTuning, label: &str, difficulty: f32) -> Vec2 {
    let grow = 1.0 + difficulty.clamp(0.0, 1.0) * tuning.obstacle_size_ramp;
    let chars = label.chars().count() as f32;
    Vec2::new(
        (tuning.obstacle_base_width + chars * tuning.obstacle_width_per_char) * grow,
        tuning.obstacle_height * grow,
    )
}

/// Spawn if the interval for the current difficulty has elapsed
///
/// Returns the new obstacle's id. An empty phrase pool skips the spawn
/// without resetting the timer, so the next tick retries.
pub fn maybe_spawn(state: &mut RunState, tuning: &RunnerTuning, difficulty: f32) -> Option<u32> {
    if state.clock - state.last_spawn_time <= tuning.spawn_interval(difficulty) {
        return None;
    }
    spawn_obstacle(state, tuning, difficulty)
}

/// Unconditionally spawn one obstacle at the right edge
pub fn spawn_obstacle(state: &mut RunState, tuning: &RunnerTuning, difficulty: f32) -> Option<u32> {
    let (lo, hi) = if tuning.min_y <= tuning.max_y {
        (tuning.min_y, tuning.max_y)
    } else {
        (tuning.max_y, tuning.min_y)
    };
    let y = state.rng.random_range(lo..=hi);
    let side = TrackSide::for_y(y, (lo + hi) * 0.5);

    let Some(label) = state.phrases.get(state.locale, side).choose(&mut state.rng).cloned()
    else {
        log::warn!(
            "No obstacle phrases for {}/{:?}, skipping spawn",
            state.locale.as_str(),
            side
        );
        return None;
    };

    let is_danger = state.rng.random_bool(tuning.danger_chance.clamp(0.0, 1.0));
    let size = obstacle_size(tuning, &label, difficulty);
    // Map the lane into the band where the whole box fits; the midline stays put
    let half_h = size.y * 0.5;
    let y = if hi - lo > size.y {
        let t = (y - lo) / (hi - lo);
        (lo + half_h) + t * (hi - lo - size.y)
    } else {
        (lo + hi) * 0.5
    };

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(tuning.spawn_x + size.x * 0.5, y),
        size,
        label,
        is_danger,
    });
    state.last_spawn_time = state.clock;
    state.events.push(RunEvent::Spawned { id });
    log::trace!("Spawned obstacle {} at y={:.1}", id, y);
    Some(id)
}
