//! Run state and core simulation types
//!
//! A `RunState` lives for one run. Only the engine mutates it; renderers
//! read a `RunSnapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::rank::{RankTable, RankTracker};
use crate::clamp_track_y;
use crate::content::{Locale, PhrasePools};
use crate::tuning::RunnerTuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Created, waiting for the first pointer-down
    Ready,
    /// Ticking
    Running,
    /// Frozen mid-run
    Paused,
    /// Terminal; see `RunState::outcome` for why
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Reached the goal distance
    Success,
    /// Hit an obstacle first
    Collision,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    /// Spawned a new obstacle
    Spawned { id: u32 },
    /// Rank changed to the tier at `index`
    RankChanged { index: usize },
    /// Run ended
    Terminal {
        reason: TerminalReason,
        /// Obstacle hit, for collisions
        obstacle: Option<u32>,
    },
}

/// A textual obstacle scrolling right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Center of the drawn box
    pub pos: Vec2,
    /// Full width/height of the drawn box
    pub size: Vec2,
    pub label: String,
    /// Drawn in the warning style; no gameplay effect
    pub is_danger: bool,
}

impl Obstacle {
    /// Drawn bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Right edge has left the track past `despawn_x`
    pub fn is_gone(&self, despawn_x: f32) -> bool {
        self.pos.x + self.size.x * 0.5 < despawn_x
    }
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub distance: f32,
    pub player_y: f32,
    pub target_y: f32,
    pub obstacles: Vec<Obstacle>,
    pub rank_index: usize,
    pub phase: RunPhase,
    pub outcome: Option<TerminalReason>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Progress toward the goal, 0..=GOAL
    pub distance: f32,
    pub player_y: f32,
    /// Pointer-driven destination for `player_y`
    pub target_y: f32,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Simulation clock (seconds)
    pub clock: f32,
    pub last_spawn_time: f32,
    pub phase: RunPhase,
    pub outcome: Option<TerminalReason>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub locale: Locale,
    pub phrases: PhrasePools,
    pub ranks: RankTable,
    pub rank_tracker: RankTracker,
    /// Events produced by the last tick (drained by the caller)
    pub events: Vec<RunEvent>,
    next_id: u32,
}

impl RunState {
    /// New run with built-in content, player centered on the track
    pub fn new(seed: u64, tuning: &RunnerTuning) -> Self {
        Self::with_content(seed, tuning, Locale::default(), PhrasePools::builtin(), RankTable::default())
    }

    pub fn with_content(
        seed: u64,
        tuning: &RunnerTuning,
        locale: Locale,
        phrases: PhrasePools,
        ranks: RankTable,
    ) -> Self {
        let mid = clamp_track_y((tuning.min_y + tuning.max_y) * 0.5, tuning.min_y, tuning.max_y);
        let start_rank = ranks.index_for(0.0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            distance: 0.0,
            player_y: mid,
            target_y: mid,
            obstacles: Vec::new(),
            clock: 0.0,
            last_spawn_time: 0.0,
            phase: RunPhase::Ready,
            outcome: None,
            time_ticks: 0,
            locale,
            phrases,
            ranks,
            rank_tracker: RankTracker::starting_at(start_rank),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Over
    }

    /// Ready/Paused -> Running. No effect once over.
    pub fn start(&mut self) {
        if matches!(self.phase, RunPhase::Ready | RunPhase::Paused) {
            self.phase = RunPhase::Running;
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Paused;
        }
    }

    /// Set the pointer target, clamped to the track
    pub fn set_target(&mut self, y: f32, tuning: &RunnerTuning) {
        self.target_y = clamp_track_y(y, tuning.min_y, tuning.max_y);
    }

    /// Enter the terminal phase and record why
    pub(crate) fn finish(&mut self, reason: TerminalReason, obstacle: Option<u32>) {
        self.phase = RunPhase::Over;
        self.outcome = Some(reason);
        self.events.push(RunEvent::Terminal { reason, obstacle });
    }

    /// Take the events from the last tick
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rank index last reported
    pub fn rank_index(&self) -> usize {
        self.rank_tracker.current().unwrap_or(0)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            distance: self.distance,
            player_y: self.player_y,
            target_y: self.target_y,
            obstacles: self.obstacles.clone(),
            rank_index: self.rank_index(),
            phase: self.phase,
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let tuning = RunnerTuning::default();
        let state = RunState::new(7, &tuning);
        assert_eq!(state.phase, RunPhase::Ready);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.player_y, 50.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.outcome, None);
        assert_eq!(state.rank_index(), 0);
    }

    #[test]
    fn test_phase_transitions() {
        let tuning = RunnerTuning::default();
        let mut state = RunState::new(7, &tuning);
        state.pause();
        assert_eq!(state.phase, RunPhase::Ready);
        state.start();
        assert_eq!(state.phase, RunPhase::Running);
        state.pause();
        assert_eq!(state.phase, RunPhase::Paused);
        state.start();
        assert_eq!(state.phase, RunPhase::Running);

        state.finish(TerminalReason::Collision, Some(3));
        state.start();
        assert_eq!(state.phase, RunPhase::Over);
        assert_eq!(state.outcome, Some(TerminalReason::Collision));
    }

    #[test]
    fn test_set_target_clamps() {
        let tuning = RunnerTuning::default();
        let mut state = RunState::new(7, &tuning);
        state.set_target(-40.0, &tuning);
        assert_eq!(state.target_y, tuning.min_y);
        state.set_target(400.0, &tuning);
        assert_eq!(state.target_y, tuning.max_y);
    }

    #[test]
    fn test_despawn_threshold_uses_right_edge() {
        let o = Obstacle {
            id: 1,
            pos: Vec2::new(-18.0, 50.0),
            size: Vec2::new(6.0, 7.0),
            label: "X".into(),
            is_danger: false,
        };
        // Right edge at -15
        assert!(!o.is_gone(-20.0));
        assert!(o.is_gone(-10.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let tuning = RunnerTuning::default();
        let state = RunState::new(7, &tuning);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
