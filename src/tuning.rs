//! Data-driven game balance
//!
//! One table of runner constants. Defaults are tuned for 60 Hz; a JSON
//! override (LocalStorage on web, file on native) can replace any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How per-tick progress relates to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Every tick advances by the same amount regardless of frame duration.
    /// Faster displays finish a run sooner in wall-clock time.
    #[default]
    FrameCoupled,
    /// Per-tick amounts scale with measured frame delta (capped at `MAX_FRAME_DT`).
    DeltaTime,
}

impl Pacing {
    /// Scale factor applied to per-tick constants for a frame of `dt` seconds
    pub fn step_scale(&self, dt: f32) -> f32 {
        match self {
            Pacing::FrameCoupled => 1.0,
            Pacing::DeltaTime => {
                let dt = if dt.is_finite() { dt } else { FRAME_SECONDS };
                dt.clamp(0.0, MAX_FRAME_DT) / FRAME_SECONDS
            }
        }
    }
}

/// Invalid tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{low_field} ({low}) must be below {high_field} ({high})")]
    InvertedRange {
        low_field: &'static str,
        low: f32,
        high_field: &'static str,
        high: f32,
    },
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runner balance constants
///
/// Speeds and distances are in percent-of-track per tick, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub pacing: Pacing,

    // === Progress ===
    /// Distance gained each tick
    pub distance_per_tick: f32,

    // === Obstacle speed: base + difficulty^exponent * ramp ===
    pub base_speed: f32,
    pub speed_ramp: f32,
    pub ramp_exponent: f32,

    // === Spawning ===
    /// Interval at difficulty 0
    pub spawn_interval: f32,
    /// Fraction of the interval removed at difficulty 1
    pub spawn_interval_ramp: f32,
    /// Interval never drops below this
    pub spawn_interval_min: f32,
    /// Probability an obstacle is flagged as danger
    pub danger_chance: f64,
    pub spawn_x: f32,
    pub despawn_x: f32,

    // === Obstacle size ===
    pub obstacle_base_width: f32,
    pub obstacle_width_per_char: f32,
    pub obstacle_height: f32,
    /// Extra size at difficulty 1 (0.3 = 30% larger)
    pub obstacle_size_ramp: f32,

    // === Player ===
    pub min_y: f32,
    pub max_y: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Fraction of the remaining gap to target closed each tick
    pub smoothing: f32,

    // === Hitboxes (fraction of the drawn size) ===
    pub player_hitbox_scale: f32,
    pub obstacle_hitbox_scale: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            pacing: Pacing::FrameCoupled,

            distance_per_tick: 0.03,

            base_speed: 0.35,
            speed_ramp: 0.9,
            ramp_exponent: 2.0,

            spawn_interval: 1.4,
            spawn_interval_ramp: 0.65,
            spawn_interval_min: 0.45,
            danger_chance: 0.6,
            spawn_x: 110.0,
            despawn_x: -20.0,

            obstacle_base_width: 6.0,
            obstacle_width_per_char: 1.4,
            obstacle_height: 7.0,
            obstacle_size_ramp: 0.35,

            min_y: TRACK_MIN_Y,
            max_y: TRACK_MAX_Y,
            player_x: 15.0,
            player_width: 6.0,
            player_height: 6.0,
            smoothing: 0.2,

            player_hitbox_scale: 0.6,
            obstacle_hitbox_scale: 0.75,
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    if value.is_nan() || value < min || value > max {
        return Err(TuningError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_order(
    low_field: &'static str,
    low: f32,
    high_field: &'static str,
    high: f32,
) -> Result<(), TuningError> {
    if low >= high {
        return Err(TuningError::InvertedRange {
            low_field,
            low,
            high_field,
            high,
        });
    }
    Ok(())
}

impl RunnerTuning {
    /// LocalStorage key for a balance override
    pub const STORAGE_KEY: &'static str = "press_runner_tuning";

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every constant against the ranges the engine relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        check_range("distance_per_tick", self.distance_per_tick, 1e-4, GOAL)?;
        check_range("base_speed", self.base_speed, 0.0, 50.0)?;
        check_range("speed_ramp", self.speed_ramp, 0.0, 50.0)?;
        // Late-game speed must ramp super-linearly
        check_range("ramp_exponent", self.ramp_exponent, 2.0, 8.0)?;
        check_range("spawn_interval", self.spawn_interval, SPAWN_INTERVAL_FLOOR, 60.0)?;
        check_range("spawn_interval_ramp", self.spawn_interval_ramp, 0.01, 1.0)?;
        check_range("spawn_interval_min", self.spawn_interval_min, SPAWN_INTERVAL_FLOOR, 60.0)?;
        check_order(
            "spawn_interval_min",
            self.spawn_interval_min,
            "spawn_interval",
            self.spawn_interval,
        )?;
        check_range("danger_chance", self.danger_chance as f32, 0.0, 1.0)?;
        check_range("spawn_x", self.spawn_x, GOAL, 1000.0)?;
        check_range("despawn_x", self.despawn_x, -1000.0, 0.0)?;
        check_range("obstacle_base_width", self.obstacle_base_width, 0.1, 100.0)?;
        check_range("obstacle_width_per_char", self.obstacle_width_per_char, 0.0, 20.0)?;
        check_range("obstacle_height", self.obstacle_height, 0.1, 100.0)?;
        check_range("obstacle_size_ramp", self.obstacle_size_ramp, 0.0, 5.0)?;
        check_range("min_y", self.min_y, 0.0, 100.0)?;
        check_range("max_y", self.max_y, 0.0, 100.0)?;
        check_order("min_y", self.min_y, "max_y", self.max_y)?;
        check_range("player_x", self.player_x, 0.0, 100.0)?;
        check_range("player_width", self.player_width, 0.1, 100.0)?;
        check_range("player_height", self.player_height, 0.1, 100.0)?;
        // 1.0 would be a snap, not an approach
        check_range("smoothing", self.smoothing, 0.01, 0.99)?;
        // Hitboxes must stay strictly smaller than the sprites
        check_range("player_hitbox_scale", self.player_hitbox_scale, 0.05, 0.95)?;
        check_range("obstacle_hitbox_scale", self.obstacle_hitbox_scale, 0.05, 0.95)?;
        Ok(())
    }

    /// Difficulty in [0, 1] for a given distance
    #[inline]
    pub fn difficulty(&self, distance: f32) -> f32 {
        (distance / GOAL).clamp(0.0, 1.0)
    }

    /// Obstacle speed per tick at a given difficulty
    pub fn speed(&self, difficulty: f32) -> f32 {
        let d = difficulty.clamp(0.0, 1.0);
        self.base_speed + d.powf(self.ramp_exponent.max(2.0)) * self.speed_ramp
    }

    /// Seconds between spawns at a given difficulty
    ///
    /// Strictly decreasing until it meets the floor; never below
    /// `SPAWN_INTERVAL_FLOOR` even if the tuning is degenerate.
    pub fn spawn_interval(&self, difficulty: f32) -> f32 {
        let d = difficulty.clamp(0.0, 1.0);
        let floor = self.spawn_interval_min.max(SPAWN_INTERVAL_FLOOR);
        let interval = self.spawn_interval * (1.0 - d * self.spawn_interval_ramp);
        if interval.is_nan() {
            return floor;
        }
        interval.max(floor)
    }

    /// Load the override from LocalStorage, falling back to defaults
    ///
    /// An override that fails to parse or validate is removed.
    pub fn load() -> Self {
        let Some(json) = crate::platform::storage::load_raw(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override ({:?} pacing)", tuning.pacing);
                tuning
            }
            Err(e) => {
                log::warn!("Discarding tuning override: {}", e);
                crate::platform::storage::remove(Self::STORAGE_KEY);
                Self::default()
            }
        }
    }

    /// Load an override from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        RunnerTuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = RunnerTuning::from_json(r#"{"distance_per_tick": 0.05, "pacing": "delta_time"}"#)
            .unwrap();
        assert_eq!(tuning.distance_per_tick, 0.05);
        assert_eq!(tuning.pacing, Pacing::DeltaTime);
        assert_eq!(tuning.smoothing, RunnerTuning::default().smoothing);
    }

    #[test]
    fn test_rejects_linear_ramp() {
        let err = RunnerTuning::from_json(r#"{"ramp_exponent": 1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "ramp_exponent",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_full_size_hitbox() {
        let tuning = RunnerTuning {
            obstacle_hitbox_scale: 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_track() {
        let tuning = RunnerTuning {
            min_y: 60.0,
            max_y: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RunnerTuning::from_json("{not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_speed_is_superlinear() {
        let tuning = RunnerTuning::default();
        let early = tuning.speed(0.5) - tuning.speed(0.0);
        let late = tuning.speed(1.0) - tuning.speed(0.5);
        assert!(late > early * 2.0);
    }

    #[test]
    fn test_spawn_interval_decreasing_with_floor() {
        let tuning = RunnerTuning::default();
        let mut prev = tuning.spawn_interval(0.0);
        for i in 1..=10 {
            let next = tuning.spawn_interval(i as f32 / 10.0);
            assert!(next <= prev);
            assert!(next >= tuning.spawn_interval_min);
            prev = next;
        }
        assert!(tuning.spawn_interval(0.5) < tuning.spawn_interval(0.0));
    }

    #[test]
    fn test_degenerate_interval_hits_floor() {
        let tuning = RunnerTuning {
            spawn_interval: 0.0,
            spawn_interval_min: -1.0,
            ..Default::default()
        };
        assert_eq!(tuning.spawn_interval(0.0), SPAWN_INTERVAL_FLOOR);
        assert_eq!(tuning.spawn_interval(1.0), SPAWN_INTERVAL_FLOOR);
    }

    #[test]
    fn test_pacing_scale() {
        assert_eq!(Pacing::FrameCoupled.step_scale(0.5), 1.0);
        assert!((Pacing::DeltaTime.step_scale(FRAME_SECONDS * 2.0) - 2.0).abs() < 1e-4);
        // Hitches are capped
        assert!((Pacing::DeltaTime.step_scale(5.0) - MAX_FRAME_DT / FRAME_SECONDS).abs() < 1e-3);
        assert_eq!(Pacing::DeltaTime.step_scale(-1.0), 0.0);
    }

    #[test]
    fn test_load_without_override_is_default() {
        assert_eq!(RunnerTuning::load(), RunnerTuning::default());
    }
}
