use std::time::Duration;

use crate::quiz::sampler::Question;

pub const BASE_SCORE: u32 = 100;
pub const BONUS_SECS: i32 = 2;
pub const PENALTY_SECS: i32 = -3;
pub const MAX_REMAINING_SECS: i32 = 9999;
/// How long the feedback phase shows before the next question.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(800);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Presenting,
    Feedback { correct: bool },
    Ended,
}

/// A missed question, recorded at submission time for the game-over list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrongEntry {
    pub hanzi: String,
    pub pinyin: String,
    pub correct_korean: String,
    pub chosen: String,
}

/// What a submission did, returned so the caller can schedule the
/// feedback-to-next-question advance against the new token.
#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub correct: bool,
    pub gained: u32,
    pub time_delta: i32,
    pub token: u64,
}

/// One round of play. Pure state: the 1s clock cadence and the 800ms
/// feedback delay live with the caller, which invokes `clock_tick` and
/// `advance` when their deadlines pass. The generation token is the only
/// staleness guard: every transition bumps it, and a scheduled advance
/// must present a matching token to take effect.
pub struct Round {
    pub phase: Phase,
    pub question: Question,
    /// Index the player picked for the current question, kept for
    /// feedback highlighting. Cleared when the next question presents.
    pub chosen: Option<usize>,
    pub initial_secs: i32,
    pub remaining_secs: i32,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub correct_count: u32,
    pub wrong_log: Vec<WrongEntry>,
    generation: u64,
}

impl Round {
    pub fn new(question: Question, initial_secs: i32) -> Self {
        Self {
            phase: Phase::Presenting,
            question,
            chosen: None,
            initial_secs,
            remaining_secs: clamp_secs(initial_secs),
            score: 0,
            combo: 0,
            max_combo: 0,
            correct_count: 0,
            wrong_log: Vec::new(),
            generation: 1,
        }
    }

    /// Full reinit for a new round. The token keeps counting up rather
    /// than resetting, so an advance scheduled before the restart can
    /// never match again.
    pub fn restart(&mut self, question: Question, initial_secs: i32) {
        self.phase = Phase::Presenting;
        self.question = question;
        self.chosen = None;
        self.initial_secs = initial_secs;
        self.remaining_secs = clamp_secs(initial_secs);
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.correct_count = 0;
        self.wrong_log.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Presenting -> Feedback. Scoring and the time adjustment happen
    /// here, synchronously. Returns None when not presenting (double
    /// submission after the options locked) or the index is out of range.
    pub fn submit(&mut self, option_idx: usize) -> Option<Outcome> {
        if self.phase != Phase::Presenting {
            return None;
        }
        let chosen = self.question.options.get(option_idx)?.clone();
        let correct = self.question.is_correct(option_idx);

        let gained = if correct {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.correct_count += 1;
            BASE_SCORE * self.combo
        } else {
            self.combo = 0;
            self.wrong_log.push(WrongEntry {
                hanzi: self.question.correct.hanzi.clone(),
                pinyin: self.question.correct.pinyin.clone(),
                correct_korean: self.question.correct.korean.clone(),
                chosen,
            });
            0
        };
        self.score += gained;

        let time_delta = if correct { BONUS_SECS } else { PENALTY_SECS };
        self.remaining_secs = clamp_secs(self.remaining_secs + time_delta);

        self.chosen = Some(option_idx);
        self.generation += 1;
        self.phase = Phase::Feedback { correct };

        Some(Outcome {
            correct,
            gained,
            time_delta,
            token: self.generation,
        })
    }

    /// Feedback -> Presenting with the next question.
    pub fn advance(&mut self, question: Question) {
        if self.phase == Phase::Ended {
            return;
        }
        self.question = question;
        self.chosen = None;
        self.generation += 1;
        self.phase = Phase::Presenting;
    }

    /// One second elapsed on the round clock. Hitting zero ends the round
    /// from either sub-state. Note a penalty can park the clock at zero
    /// mid-feedback; the round still ends on the next tick, as the
    /// adjustment itself never terminates play.
    pub fn clock_tick(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.remaining_secs = clamp_secs(self.remaining_secs - 1);
        if self.remaining_secs <= 0 {
            self.end();
        }
    }

    pub fn end(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.phase = Phase::Ended;
        self.generation += 1;
    }

    /// Fraction of the configured round time left, for the HUD bar.
    pub fn time_ratio(&self) -> f64 {
        if self.initial_secs <= 0 {
            return 0.0;
        }
        (self.remaining_secs as f64 / self.initial_secs as f64).clamp(0.0, 1.0)
    }
}

fn clamp_secs(secs: i32) -> i32 {
    secs.clamp(0, MAX_REMAINING_SECS)
}
