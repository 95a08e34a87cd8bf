//! Trivia scoring and reporter promotions
//!
//! A session walks a question pool in order. The lifetime correct-answer
//! count persists across sessions; every `PROMOTION_INTERVAL` correct
//! answers promotes the player to the next reporter title exactly once.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::{RankInfo, RankTable};

/// Points per correct answer
pub const POINTS_PER_CORRECT: u32 = 10;
/// Streak length that triggers the celebration
pub const CELEBRATION_STREAK: u32 = 10;
/// Correct answers per promotion
pub const PROMOTION_INTERVAL: u32 = 20;

/// Persisted lifetime counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizProgress {
    pub correct_total: u32,
}

impl QuizProgress {
    const STORAGE_KEY: &'static str = "press_runner_quiz_progress";

    pub fn load() -> Self {
        match storage::load_json::<Self>(Self::STORAGE_KEY) {
            Some(progress) => {
                log::info!("Loaded quiz progress ({} correct)", progress.correct_total);
                progress
            }
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Quiz progress saved");
        }
    }
}

/// Result of answering the current question
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Streak just reached `CELEBRATION_STREAK`
    pub celebrate: bool,
    /// New title if this answer crossed a promotion boundary
    pub promotion: Option<RankInfo>,
}

/// One pass over a question pool
#[derive(Debug, Clone)]
pub struct QuizSession {
    question_count: usize,
    index: usize,
    answered: bool,
    finished: bool,
    score: u32,
    streak: u32,
    progress: QuizProgress,
    titles: RankTable,
}

impl QuizSession {
    pub fn new(question_count: usize, progress: QuizProgress) -> Self {
        Self {
            question_count,
            index: 0,
            answered: false,
            finished: question_count == 0,
            score: 0,
            streak: 0,
            progress,
            titles: RankTable::reporter_titles(PROMOTION_INTERVAL as f32),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> &QuizProgress {
        &self.progress
    }

    /// Current reporter title from the lifetime count
    pub fn title(&self) -> &RankInfo {
        self.titles.lookup(self.progress.correct_total as f32)
    }

    /// Answer the current question; `None` if already answered or finished
    ///
    /// Correct answers persist the lifetime counter immediately.
    pub fn answer(&mut self, correct: bool) -> Option<AnswerOutcome> {
        if self.finished || self.answered {
            return None;
        }
        self.answered = true;

        if !correct {
            self.streak = 0;
            return Some(AnswerOutcome {
                correct,
                celebrate: false,
                promotion: None,
            });
        }

        self.score += POINTS_PER_CORRECT;
        self.streak += 1;
        self.progress.correct_total += 1;
        self.progress.save();

        let celebrate = self.streak == CELEBRATION_STREAK;
        let promotion = if self.progress.correct_total % PROMOTION_INTERVAL == 0 {
            let title = self.title().clone();
            log::info!("Promoted to {}", title.name);
            Some(title)
        } else {
            None
        };

        Some(AnswerOutcome {
            correct,
            celebrate,
            promotion,
        })
    }

    /// Move to the next question; returns false once the pool is exhausted
    pub fn next(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.answered = false;
        if self.index + 1 < self.question_count {
            self.index += 1;
            true
        } else {
            self.finished = true;
            false
        }
    }

    /// Start the pool over, keeping lifetime progress
    pub fn restart(&mut self) {
        let progress = std::mem::take(&mut self.progress);
        *self = Self::new(self.question_count, progress);
    }
}
