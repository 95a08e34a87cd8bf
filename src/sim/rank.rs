//! Rank lookup and change tracking
//!
//! A rank table maps ascending thresholds to titles. The tracker reports a
//! rank only when it differs from the last one reported, so each threshold
//! crossing produces exactly one event.

use serde::{Deserialize, Serialize};

use crate::content::{REPORTER_TITLES, TITLE_ACCENTS};

/// One tier of a rank table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankInfo {
    /// Minimum value that earns this rank
    pub threshold: f32,
    pub name: String,
    /// CSS color for the badge
    pub accent: String,
}

/// Ascending threshold table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankTable {
    tiers: Vec<RankInfo>,
}

impl RankTable {
    /// Build a table, sorting tiers by threshold
    ///
    /// An empty list yields a single unnamed tier at 0 so lookups always succeed.
    pub fn new(mut tiers: Vec<RankInfo>) -> Self {
        if tiers.is_empty() {
            tiers.push(RankInfo {
                threshold: 0.0,
                name: String::new(),
                accent: String::new(),
            });
        }
        tiers.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { tiers }
    }

    /// Reporter titles spaced `step` apart, starting at 0
    pub fn reporter_titles(step: f32) -> Self {
        let tiers = REPORTER_TITLES
            .iter()
            .zip(TITLE_ACCENTS)
            .enumerate()
            .map(|(i, (name, accent))| RankInfo {
                threshold: i as f32 * step,
                name: (*name).to_string(),
                accent: (*accent).to_string(),
            })
            .collect();
        Self::new(tiers)
    }

    /// Index of the highest tier whose threshold is <= `value`
    pub fn index_for(&self, value: f32) -> usize {
        self.tiers
            .iter()
            .rposition(|tier| tier.threshold <= value)
            .unwrap_or(0)
    }

    pub fn get(&self, index: usize) -> Option<&RankInfo> {
        self.tiers.get(index)
    }

    /// Tier for a value
    pub fn lookup(&self, value: f32) -> &RankInfo {
        &self.tiers[self.index_for(value)]
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for RankTable {
    /// Runner ranks: one title every 10 distance
    fn default() -> Self {
        Self::reporter_titles(10.0)
    }
}

/// Remembers the last reported rank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTracker {
    reported: Option<usize>,
}

impl RankTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker that treats `index` as already reported
    pub fn starting_at(index: usize) -> Self {
        Self {
            reported: Some(index),
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.reported
    }

    /// Returns the new rank index if it differs from the last report
    pub fn observe(&mut self, table: &RankTable, value: f32) -> Option<usize> {
        let index = table.index_for(value);
        if self.reported == Some(index) {
            return None;
        }
        self.reported = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_thresholds() {
        let table = RankTable::default();
        assert_eq!(table.len(), REPORTER_TITLES.len());
        assert_eq!(table.index_for(0.0), 0);
        assert_eq!(table.index_for(9.99), 0);
        assert_eq!(table.index_for(10.0), 1);
        assert_eq!(table.index_for(95.0), 9);
        assert_eq!(table.index_for(500.0), 9);
        assert_eq!(table.lookup(25.0).name, REPORTER_TITLES[2]);
    }

    #[test]
    fn test_below_first_threshold_uses_first_tier() {
        let table = RankTable::new(vec![RankInfo {
            threshold: 5.0,
            name: "Only".into(),
            accent: "#fff".into(),
        }]);
        assert_eq!(table.index_for(-1.0), 0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let tier = |threshold: f32, name: &str| RankInfo {
            threshold,
            name: name.into(),
            accent: String::new(),
        };
        let table = RankTable::new(vec![tier(20.0, "c"), tier(0.0, "a"), tier(10.0, "b")]);
        assert_eq!(table.lookup(15.0).name, "b");
    }

    #[test]
    fn test_empty_table_still_resolves() {
        let table = RankTable::new(Vec::new());
        assert_eq!(table.index_for(42.0), 0);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_tracker_reports_each_crossing_once() {
        let table = RankTable::default();
        let mut tracker = RankTracker::starting_at(0);
        let mut events = Vec::new();
        for step in 0..=305 {
            let distance = step as f32 * 0.1;
            if let Some(index) = tracker.observe(&table, distance) {
                events.push(index);
            }
        }
        assert_eq!(events, vec![1, 2, 3]);
    }
}
