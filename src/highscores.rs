//! Best runs board
//!
//! Persisted to LocalStorage, tracks the top 10 runs by distance.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::TerminalReason;

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Distance reached (100 for a completed run)
    pub distance: f32,
    pub outcome: TerminalReason,
    /// Rank title at the end of the run
    pub rank: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best runs, sorted by distance descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "press_runner_best_runs";

    /// Create empty board
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a distance qualifies for the board
    pub fn qualifies(&self, distance: f32) -> bool {
        if distance.is_nan() || distance <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if distance beats the lowest entry
        self.entries
            .last()
            .map(|e| distance > e.distance)
            .unwrap_or(true)
    }

    /// Add a finished run. Returns the rank achieved (1-indexed) or None.
    pub fn add_run(
        &mut self,
        distance: f32,
        outcome: TerminalReason,
        rank: &str,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(distance) {
            return None;
        }

        let entry = HighScoreEntry {
            distance,
            outcome,
            rank: rank.to_string(),
            timestamp,
        };

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| distance > e.distance);
        let place = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(place)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest distance (if any)
    pub fn best_distance(&self) -> Option<f32> {
        self.entries.first().map(|e| e.distance)
    }

    /// Number of runs on the board that reached the goal
    pub fn completions(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == TerminalReason::Success)
            .count()
    }

    /// Load from LocalStorage (empty on native)
    pub fn load() -> Self {
        match storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!("Loaded {} best runs", scores.entries.len());
                scores
            }
            None => {
                log::info!("No best runs found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Best runs saved ({} entries)", self.entries.len());
        }
    }
}
