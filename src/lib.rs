//! Press Runner - a side-scrolling dodge game and trivia progression
//!
//! Core modules:
//! - `sim`: Runner engine (physics, spawning, collisions, ranks)
//! - `tuning`: Data-driven game balance
//! - `content`: Obstacle phrase pools and reporter titles
//! - `platform`: Frame loop, pointer input and LocalStorage plumbing
//! - `quiz`: Trivia scoring and promotion tracking
//! - `highscores`: Best runs board
//! - `renderer`: Immediate-mode DOM markup from run snapshots

pub mod content;
pub mod highscores;
pub mod platform;
pub mod quiz;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use content::Locale;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Pacing, RunnerTuning, TuningError};

/// Track and timing constants
pub mod consts {
    /// Distance at which a run is complete
    pub const GOAL: f32 = 100.0;

    /// Default vertical bounds of the player marker (percent of track height)
    pub const TRACK_MIN_Y: f32 = 8.0;
    pub const TRACK_MAX_Y: f32 = 92.0;

    /// Reference frame length the per-tick constants are tuned against (60 Hz)
    pub const FRAME_SECONDS: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted in delta-time pacing (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Absolute lower bound on the spawn interval, whatever the tuning says
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.05;
}

/// Clamp a vertical track coordinate to `[min_y, max_y]`
///
/// NaN input collapses to the middle of the range. Inverted bounds are swapped.
#[inline]
pub fn clamp_track_y(y: f32, min_y: f32, max_y: f32) -> f32 {
    let (lo, hi) = if min_y <= max_y {
        (min_y, max_y)
    } else {
        (max_y, min_y)
    };
    if y.is_nan() {
        return (lo + hi) * 0.5;
    }
    y.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_track_y() {
        assert_eq!(clamp_track_y(-5.0, 8.0, 92.0), 8.0);
        assert_eq!(clamp_track_y(150.0, 8.0, 92.0), 92.0);
        assert_eq!(clamp_track_y(40.0, 8.0, 92.0), 40.0);
        assert_eq!(clamp_track_y(f32::NAN, 8.0, 92.0), 50.0);
        assert_eq!(clamp_track_y(f32::INFINITY, 8.0, 92.0), 92.0);
        assert_eq!(clamp_track_y(0.0, 92.0, 8.0), 8.0);
    }
}
