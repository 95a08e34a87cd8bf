//! Per-frame simulation tick
//!
//! Order within a tick: goal check, player smoothing, spawn, obstacle
//! advance, collision, rank. Reaching the goal ends the tick before any
//! collision test, so a run that finishes and collides on the same frame
//! counts as a success.

use super::collision::first_hit;
use super::spawner::maybe_spawn;
use super::state::{RunEvent, RunPhase, RunState, TerminalReason};
use crate::consts::*;
use crate::clamp_track_y;
use crate::tuning::RunnerTuning;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New pointer target (track units); `None` keeps the last one
    pub target_y: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Measured frame duration in seconds; only used by delta-time pacing
    pub dt: f32,
}

/// Advance the run by one frame
pub fn tick(state: &mut RunState, input: &TickInput, tuning: &RunnerTuning) {
    if input.pause {
        match state.phase {
            RunPhase::Running => {
                state.pause();
                return;
            }
            RunPhase::Paused => state.start(),
            _ => {}
        }
    }

    if let Some(y) = input.target_y {
        if state.phase != RunPhase::Over {
            state.set_target(y, tuning);
        }
    }

    if state.phase != RunPhase::Running {
        return;
    }
    state.events.clear();

    let scale = tuning.pacing.step_scale(input.dt);
    state.time_ticks += 1;
    state.clock += FRAME_SECONDS * scale;

    let difficulty = tuning.difficulty(state.distance);
    let speed = tuning.speed(difficulty) * scale;

    // Progress and goal
    let prev_distance = state.distance;
    state.distance += tuning.distance_per_tick * scale;
    if state.distance >= GOAL {
        state.distance = state.distance.min(GOAL);
        observe_rank(state, prev_distance);
        log::info!("Run complete after {} ticks", state.time_ticks);
        state.finish(TerminalReason::Success, None);
        return;
    }

    // Ease toward the pointer target; upstream clamping is not trusted
    let target = clamp_track_y(state.target_y, tuning.min_y, tuning.max_y);
    state.target_y = target;
    // Compounded per reference frame
    let smoothing = 1.0 - (1.0 - tuning.smoothing).powf(scale);
    state.player_y += (target - state.player_y) * smoothing;
    state.player_y = clamp_track_y(state.player_y, tuning.min_y, tuning.max_y);

    maybe_spawn(state, tuning, difficulty);

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.obstacles.retain(|o| !o.is_gone(tuning.despawn_x));

    if let Some(id) = first_hit(tuning, state.player_y, &state.obstacles) {
        log::info!(
            "Collision with obstacle {} at distance {:.2}",
            id,
            state.distance
        );
        state.finish(TerminalReason::Collision, Some(id));
        return;
    }

    observe_rank(state, prev_distance);
}

/// Ranks only move on whole-number distance changes
fn observe_rank(state: &mut RunState, prev_distance: f32) {
    if state.distance.floor() == prev_distance.floor() {
        return;
    }
    if let Some(index) = state.rank_tracker.observe(&state.ranks, state.distance) {
        if let Some(rank) = state.ranks.get(index) {
            log::info!("Rank up: {}", rank.name);
        }
        state.events.push(RunEvent::RankChanged { index });
    }
}
