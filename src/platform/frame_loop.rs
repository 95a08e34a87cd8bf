//! Animation-frame driver
//!
//! The host schedules one callback per display frame and hands back the
//! `FrameToken` it was given. Pausing, restarting or tearing down bumps the
//! loop generation, so a callback still queued from before is recognised as
//! stale and does nothing.

use super::input::{PointerAction, PointerTracker};
use crate::consts::FRAME_SECONDS;
use crate::content::{Locale, PhrasePools};
use crate::sim::{RankInfo, RankTable, RunEvent, RunPhase, RunSnapshot, RunState, TerminalReason};
use crate::sim::{TickInput, tick};
use crate::tuning::RunnerTuning;

/// Receives engine output once per frame
pub trait RunObserver {
    /// Fresh snapshot after every tick
    fn on_tick(&mut self, snapshot: &RunSnapshot);

    /// Rank changed (once per threshold crossing)
    fn on_rank_change(&mut self, _rank: &RankInfo) {}

    /// Run ended
    fn on_terminal(&mut self, _reason: TerminalReason) {}
}

/// Proof that a frame callback was scheduled by the current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Request another frame carrying this token
    Reschedule(FrameToken),
    Stop,
}

/// Owns one run and drives it from frame callbacks
#[derive(Debug)]
pub struct RunLoop {
    tuning: RunnerTuning,
    locale: Locale,
    state: RunState,
    pointer: PointerTracker,
    pending_target: Option<f32>,
    generation: u64,
    scheduled: bool,
    last_time_ms: Option<f64>,
}

impl RunLoop {
    pub fn new(seed: u64, tuning: RunnerTuning, locale: Locale) -> Self {
        let state = Self::fresh_state(seed, &tuning, locale);
        Self {
            tuning,
            locale,
            state,
            pointer: PointerTracker::new(),
            pending_target: None,
            generation: 0,
            scheduled: false,
            last_time_ms: None,
        }
    }

    fn fresh_state(seed: u64, tuning: &RunnerTuning, locale: Locale) -> RunState {
        RunState::with_content(seed, tuning, locale, PhrasePools::builtin(), RankTable::default())
    }

    /// Read-only view of the run
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn tuning(&self) -> &RunnerTuning {
        &self.tuning
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.state.snapshot()
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Token for a new frame callback, if the run wants one and none is queued
    pub fn schedule(&mut self) -> Option<FrameToken> {
        if self.scheduled || self.state.phase != RunPhase::Running {
            return None;
        }
        self.scheduled = true;
        Some(FrameToken(self.generation))
    }

    /// Invalidate any queued frame callback (pause, restart, teardown)
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduled = false;
        self.last_time_ms = None;
    }

    /// Run one frame. `now_ms` is the host's frame timestamp.
    pub fn frame(
        &mut self,
        token: FrameToken,
        now_ms: f64,
        observer: &mut dyn RunObserver,
    ) -> FrameOutcome {
        if token.0 != self.generation || !self.scheduled {
            log::debug!("Ignoring stale frame callback");
            return FrameOutcome::Stop;
        }
        self.scheduled = false;

        let dt = self
            .last_time_ms
            .map(|last| ((now_ms - last) / 1000.0) as f32)
            .unwrap_or(FRAME_SECONDS);
        self.last_time_ms = Some(now_ms);

        let input = TickInput {
            target_y: self.pending_target.take(),
            pause: false,
            dt,
        };
        tick(&mut self.state, &input, &self.tuning);
        self.dispatch(observer);

        if self.state.phase == RunPhase::Running {
            self.scheduled = true;
            FrameOutcome::Reschedule(FrameToken(self.generation))
        } else {
            FrameOutcome::Stop
        }
    }

    fn dispatch(&mut self, observer: &mut dyn RunObserver) {
        let events = self.state.drain_events();
        observer.on_tick(&self.state.snapshot());
        for event in events {
            match event {
                RunEvent::RankChanged { index } => {
                    if let Some(rank) = self.state.ranks.get(index) {
                        observer.on_rank_change(rank);
                    }
                }
                RunEvent::Terminal { reason, .. } => observer.on_terminal(reason),
                RunEvent::Spawned { .. } => {}
            }
        }
    }

    /// Press: start or resume, then aim. Returns a token if a frame must be requested.
    pub fn pointer_down(&mut self, track_y: f32) -> Option<FrameToken> {
        if self.state.is_over() {
            return None;
        }
        if let PointerAction::Engage { target_y } = self.pointer.pointer_down(track_y, &self.tuning)
        {
            self.pending_target = Some(target_y);
        }
        if self.state.phase != RunPhase::Running {
            self.state.start();
            log::info!("Run started (seed {})", self.state.seed);
        }
        self.schedule()
    }

    /// Drag
    pub fn pointer_move(&mut self, track_y: f32) {
        if let PointerAction::Aim { target_y } = self.pointer.pointer_move(track_y, &self.tuning) {
            self.pending_target = Some(target_y);
        }
    }

    /// Release or leave; the target stays where it was
    pub fn pointer_up(&mut self) {
        self.pointer.pointer_up();
    }

    /// Set the target directly (autopilot, keyboard)
    pub fn steer(&mut self, track_y: f32) {
        self.pending_target = Some(track_y);
    }

    /// Freeze the run and drop any queued frame
    pub fn pause(&mut self) {
        if self.state.phase == RunPhase::Running {
            self.state.pause();
            self.cancel();
            log::info!("Run paused at {:.1}", self.state.distance);
        }
    }

    /// Continue a paused run
    pub fn resume(&mut self) -> Option<FrameToken> {
        if self.state.phase != RunPhase::Paused {
            return None;
        }
        self.state.start();
        self.schedule()
    }

    /// Throw away the current run and start over in the Ready phase
    pub fn restart(&mut self, seed: u64) {
        self.cancel();
        self.state = Self::fresh_state(seed, &self.tuning, self.locale);
        self.pointer = PointerTracker::new();
        self.pending_target = None;
        log::info!("Run reset with seed {}", seed);
    }

    /// Switch phrase language; applies from the next restart
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

/// Frames-per-second from a rolling window of frame timestamps
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp (ms) and return the current estimate
    pub fn record(&mut self, now_ms: f64) -> u32 {
        let len = self.frame_times.len();
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % len;

        // Oldest sample is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((len - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        ticks: usize,
        last: Option<RunSnapshot>,
        ranks: Vec<String>,
        terminal: Vec<TerminalReason>,
    }

    impl RunObserver for Recorder {
        fn on_tick(&mut self, snapshot: &RunSnapshot) {
            self.ticks += 1;
            self.last = Some(snapshot.clone());
        }

        fn on_rank_change(&mut self, rank: &RankInfo) {
            self.ranks.push(rank.name.clone());
        }

        fn on_terminal(&mut self, reason: TerminalReason) {
            self.terminal.push(reason);
        }
    }

    fn run_loop() -> RunLoop {
        RunLoop::new(42, RunnerTuning::default(), Locale::En)
    }

    #[test]
    fn test_nothing_scheduled_before_start() {
        let mut lp = run_loop();
        assert_eq!(lp.schedule(), None);
        assert!(lp.pointer_down(50.0).is_some());
        // Already queued
        assert_eq!(lp.schedule(), None);
    }

    #[test]
    fn test_frames_tick_and_reschedule() {
        let mut lp = run_loop();
        let mut rec = Recorder::default();
        let mut token = lp.pointer_down(30.0).unwrap();
        let mut now = 0.0;
        for _ in 0..10 {
            match lp.frame(token, now, &mut rec) {
                FrameOutcome::Reschedule(next) => token = next,
                FrameOutcome::Stop => panic!("run stopped early"),
            }
            now += 16.0;
        }
        assert_eq!(rec.ticks, 10);
        let snap = rec.last.unwrap();
        assert!(snap.distance > 0.0);
        assert_eq!(snap.target_y, 30.0);
    }

    #[test]
    fn test_stale_callback_after_pause_is_ignored() {
        let mut lp = run_loop();
        let mut rec = Recorder::default();
        let token = lp.pointer_down(50.0).unwrap();
        lp.pause();

        assert_eq!(lp.frame(token, 16.0, &mut rec), FrameOutcome::Stop);
        assert_eq!(rec.ticks, 0);
        assert_eq!(lp.state().distance, 0.0);

        let resumed = lp.resume().unwrap();
        assert_ne!(resumed, token);
        assert_eq!(lp.frame(token, 32.0, &mut rec), FrameOutcome::Stop);
        assert_eq!(
            lp.frame(resumed, 32.0, &mut rec),
            FrameOutcome::Reschedule(resumed)
        );
        assert_eq!(rec.ticks, 1);
    }

    #[test]
    fn test_restart_invalidates_queued_frame() {
        let mut lp = run_loop();
        let mut rec = Recorder::default();
        let token = lp.pointer_down(50.0).unwrap();
        lp.restart(7);
        assert_eq!(lp.frame(token, 16.0, &mut rec), FrameOutcome::Stop);
        assert_eq!(lp.state().phase, RunPhase::Ready);
        assert_eq!(rec.ticks, 0);
    }

    #[test]
    fn test_collision_reported_once_and_loop_stops() {
        let mut lp = run_loop();
        let mut rec = Recorder::default();
        let token = lp.pointer_down(50.0).unwrap();
        let id = lp.state.next_entity_id();
        let player_x = lp.tuning.player_x;
        lp.state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(player_x, 50.0),
            size: Vec2::new(10.0, 8.0),
            label: "RUMOR".into(),
            is_danger: false,
        });

        assert_eq!(lp.frame(token, 0.0, &mut rec), FrameOutcome::Stop);
        assert_eq!(rec.terminal, vec![TerminalReason::Collision]);
        assert!(!lp.is_scheduled());
        assert_eq!(lp.pointer_down(50.0), None);
        assert_eq!(lp.frame(token, 16.0, &mut rec), FrameOutcome::Stop);
        assert_eq!(rec.terminal.len(), 1);
    }

    #[test]
    fn test_full_run_reports_success_and_ranks() {
        let tuning = RunnerTuning {
            distance_per_tick: 0.25,
            ..Default::default()
        };
        let mut lp = RunLoop::new(3, tuning, Locale::Zh);
        let mut rec = Recorder::default();
        let mut token = lp.pointer_down(50.0);
        let mut now = 0.0;
        while let Some(t) = token {
            lp.state.obstacles.clear();
            token = match lp.frame(t, now, &mut rec) {
                FrameOutcome::Reschedule(next) => Some(next),
                FrameOutcome::Stop => None,
            };
            now += 16.0;
        }
        assert_eq!(rec.terminal, vec![TerminalReason::Success]);
        assert_eq!(rec.ranks.len(), 9);
        assert_eq!(rec.ranks.last().map(String::as_str), Some(crate::content::REPORTER_TITLES[9]));
    }

    #[test]
    fn test_release_freezes_target() {
        let mut lp = run_loop();
        let mut rec = Recorder::default();
        let token = lp.pointer_down(20.0).unwrap();
        lp.pointer_up();
        lp.pointer_move(80.0);
        lp.frame(token, 0.0, &mut rec);
        assert_eq!(lp.state().target_y, 20.0);
    }

    #[test]
    fn test_fps_meter_steady_rate() {
        let mut meter = FpsMeter::new();
        // Start at 1s so every sample counts as recorded
        let mut now = 1000.0;
        for _ in 0..59 {
            meter.record(now);
            now += 1000.0 / 60.0;
        }
        assert_eq!(meter.fps(), 0);
        for _ in 0..120 {
            meter.record(now);
            now += 1000.0 / 30.0;
        }
        assert_eq!(meter.fps(), 30);
    }
}
