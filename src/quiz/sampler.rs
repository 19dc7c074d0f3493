use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::quiz::words::{WordItem, WordStore};

pub const OPTION_COUNT: usize = 4;
/// How many recently asked indices to steer away from.
pub const RECENT_WINDOW: usize = 4;
/// Avoidance is advisory: after this many colliding draws the repeat is
/// accepted, so sampling terminates even on a 4-word store.
const RESAMPLE_CAP: usize = 20;

#[derive(Clone, Debug)]
pub struct Question {
    pub correct: WordItem,
    pub options: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, option_idx: usize) -> bool {
        self.options
            .get(option_idx)
            .is_some_and(|o| *o == self.correct.korean)
    }

    pub fn correct_idx(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.correct.korean)
            .unwrap_or(0)
    }
}

pub struct Sampler {
    recent: VecDeque<usize>,
    rng: SmallRng,
}

impl Sampler {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            recent: VecDeque::with_capacity(RECENT_WINDOW),
            rng,
        }
    }

    /// Forget the recent-question window. Called on round restart so the
    /// new round's opening questions aren't biased by the previous round.
    pub fn reset(&mut self) {
        self.recent.clear();
    }

    /// Store preconditions (>= 4 usable words, >= 4 distinct translations)
    /// are enforced at load time, never here.
    pub fn sample(&mut self, store: &WordStore) -> Question {
        let idx = self.pick_index(store.len());
        self.recent.push_back(idx);
        if self.recent.len() > RECENT_WINDOW {
            self.recent.pop_front();
        }

        let correct = store.get(idx).clone();

        // Indices sharing the correct item's translation would render as a
        // second right answer, so they never enter the distractor pool.
        let mut pool: Vec<usize> = (0..store.len())
            .filter(|&i| i != idx && store.get(i).korean != correct.korean)
            .collect();
        pool.shuffle(&mut self.rng);

        let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
        options.push(correct.korean.clone());
        for &i in &pool {
            let candidate = &store.get(i).korean;
            if !options.contains(candidate) {
                options.push(candidate.clone());
            }
            if options.len() == OPTION_COUNT {
                break;
            }
        }
        options.shuffle(&mut self.rng);

        Question { correct, options }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let mut idx = self.rng.gen_range(0..len);
        let mut attempts = 0;
        while self.recent.contains(&idx) && attempts < RESAMPLE_CAP {
            idx = self.rng.gen_range(0..len);
            attempts += 1;
        }
        idx
    }
}
