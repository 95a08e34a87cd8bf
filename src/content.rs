//! Static content consumed by the engine and quiz
//!
//! Obstacle phrases are keyed by locale and by the half of the track an
//! obstacle spawns in. Reporter titles back both rank tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Some(Locale::Zh),
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Which half of the track an obstacle occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackSide {
    /// Censorship pressure from above
    Upper,
    /// Disinformation from below
    Lower,
}

impl TrackSide {
    /// Side for a vertical position given the track midline
    pub fn for_y(y: f32, midline: f32) -> Self {
        if y < midline {
            TrackSide::Upper
        } else {
            TrackSide::Lower
        }
    }
}

const UPPER_ZH: &[&str] = &["删帖", "封号", "审查", "断网", "禁言", "约谈", "屏蔽关键词", "下架"];
const LOWER_ZH: &[&str] = &["谣言", "标题党", "假新闻", "水军", "断章取义", "深度伪造", "带节奏"];
const UPPER_EN: &[&str] = &[
    "CENSORED",
    "ACCOUNT BANNED",
    "TAKEDOWN",
    "SHUTDOWN",
    "GAG ORDER",
    "BLOCKED",
    "KEYWORD FILTER",
];
const LOWER_EN: &[&str] = &[
    "RUMOR",
    "CLICKBAIT",
    "FAKE NEWS",
    "BOT FARM",
    "OUT OF CONTEXT",
    "DEEPFAKE",
    "SPIN",
];

/// Reporter titles, lowest first
pub const REPORTER_TITLES: &[&str] = &[
    "见习记者 (Apprentice)",
    "助理记者 (Assistant)",
    "独立记者 (Independent)",
    "骨干记者 (Core)",
    "首席记者 (Chief)",
    "高级记者 (Senior)",
    "资深记者 (Veteran)",
    "专家记者 (Expert)",
    "王牌记者 (Ace)",
    "传奇记者 (Legendary)",
];

/// Accent color per title tier (HUD badge)
pub const TITLE_ACCENTS: &[&str] = &[
    "#94a3b8", "#64748b", "#3b82f6", "#2563eb", "#8b5cf6", "#7c3aed", "#f59e0b", "#d97706",
    "#ef4444", "#eab308",
];

/// Obstacle label pools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhrasePools {
    pools: HashMap<Locale, HashMap<TrackSide, Vec<String>>>,
}

impl PhrasePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in zh/en pools
    pub fn builtin() -> Self {
        let mut pools = Self::new();
        pools.set(Locale::Zh, TrackSide::Upper, UPPER_ZH);
        pools.set(Locale::Zh, TrackSide::Lower, LOWER_ZH);
        pools.set(Locale::En, TrackSide::Upper, UPPER_EN);
        pools.set(Locale::En, TrackSide::Lower, LOWER_EN);
        pools
    }

    /// Replace the pool for one locale/side
    pub fn set<S: AsRef<str>>(&mut self, locale: Locale, side: TrackSide, phrases: &[S]) {
        self.pools
            .entry(locale)
            .or_default()
            .insert(side, phrases.iter().map(|p| p.as_ref().to_string()).collect());
    }

    /// Phrases for one locale/side; empty if none configured
    pub fn get(&self, locale: Locale, side: TrackSide) -> &[String] {
        self.pools
            .get(&locale)
            .and_then(|sides| sides.get(&side))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pools_populated() {
        let pools = PhrasePools::builtin();
        for locale in [Locale::Zh, Locale::En] {
            for side in [TrackSide::Upper, TrackSide::Lower] {
                assert!(!pools.get(locale, side).is_empty());
            }
        }
    }

    #[test]
    fn test_missing_pool_is_empty() {
        let mut pools = PhrasePools::new();
        assert!(pools.get(Locale::En, TrackSide::Upper).is_empty());
        pools.set(Locale::En, TrackSide::Upper, &["X"]);
        assert_eq!(pools.get(Locale::En, TrackSide::Upper), ["X".to_string()]);
        assert!(pools.get(Locale::En, TrackSide::Lower).is_empty());
    }

    #[test]
    fn test_side_for_y() {
        assert_eq!(TrackSide::for_y(20.0, 50.0), TrackSide::Upper);
        assert_eq!(TrackSide::for_y(50.0, 50.0), TrackSide::Lower);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("zh-CN"), Some(Locale::Zh));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(REPORTER_TITLES.len(), TITLE_ACCENTS.len());
    }
}
