//! Demo/idle steering
//!
//! Picks a target that dodges the nearest obstacle heading into the
//! player's lane. Used by the native demo and the idle attract mode.

use super::collision::player_sprite;
use super::state::RunState;
use crate::clamp_track_y;
use crate::tuning::RunnerTuning;

/// How far ahead of the player (track units) obstacles are considered
const LOOKAHEAD: f32 = 35.0;
/// Extra vertical gap kept from an obstacle edge
const CLEARANCE: f32 = 2.0;

/// Target to steer toward this frame
pub fn autopilot_target(state: &RunState, tuning: &RunnerTuning) -> f32 {
    let player = player_sprite(tuning, state.player_y);
    let lane_end = player.max.x + LOOKAHEAD;

    // Nearest obstacle that is still ahead of or inside the lane and overlaps our band
    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            let b = o.bounds();
            b.max.x >= player.min.x
                && b.min.x <= lane_end
                && b.min.y < player.max.y + CLEARANCE
                && b.max.y > player.min.y - CLEARANCE
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let Some(threat) = threat else {
        return state.target_y;
    };

    let b = threat.bounds();
    let half = tuning.player_height * 0.5 + CLEARANCE;
    let above = b.min.y - half;
    let below = b.max.y + half;
    let above_ok = above >= tuning.min_y;
    let below_ok = below <= tuning.max_y;

    let target = match (above_ok, below_ok) {
        (true, true) => {
            if (state.player_y - above).abs() <= (below - state.player_y).abs() {
                above
            } else {
                below
            }
        }
        (true, false) => above,
        (false, true) => below,
        (false, false) => state.target_y,
    };
    clamp_track_y(target, tuning.min_y, tuning.max_y)
}
