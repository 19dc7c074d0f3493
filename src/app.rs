use std::io::{self, Write};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::quiz::round::{FEEDBACK_DELAY, Outcome, Phase, Round};
use crate::quiz::sampler::Sampler;
use crate::quiz::words::WordStore;
use crate::ui::theme::Theme;

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Intro,
    Round,
    GameOver,
}

/// A scheduled Feedback -> Presenting transition. The token was captured
/// at scheduling time; if the round's generation has moved on by the time
/// the deadline passes, the transition is dropped.
struct PendingAdvance {
    due: Instant,
    token: u64,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub words: WordStore,
    pub round: Option<Round>,
    /// Result of the current question's submission, shown in the
    /// feedback toast. Cleared when the next question presents.
    pub last_outcome: Option<Outcome>,
    pub muted: bool,
    pub should_quit: bool,
    sampler: Sampler,
    next_clock_tick: Option<Instant>,
    pending_advance: Option<PendingAdvance>,
}

impl App {
    pub fn new(config: Config, words: WordStore) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let muted = config.muted;

        Self {
            screen: AppScreen::Intro,
            config,
            theme,
            words,
            round: None,
            last_outcome: None,
            muted,
            should_quit: false,
            sampler: Sampler::new(SmallRng::from_entropy()),
            next_clock_tick: None,
            pending_advance: None,
        }
    }

    /// Start or restart a round: fresh state, fresh sample window, both
    /// timers re-armed, and (on restart) the token bumped so anything
    /// scheduled by the previous round can never fire.
    pub fn start_round(&mut self) {
        self.sampler.reset();
        let question = self.sampler.sample(&self.words);
        let initial = self.config.initial_secs as i32;
        match self.round {
            Some(ref mut round) => round.restart(question, initial),
            None => self.round = Some(Round::new(question, initial)),
        }
        self.pending_advance = None;
        self.last_outcome = None;
        self.next_clock_tick = Some(Instant::now() + CLOCK_PERIOD);
        self.screen = AppScreen::Round;
    }

    pub fn submit_choice(&mut self, option_idx: usize) {
        let Some(ref mut round) = self.round else {
            return;
        };
        // submit() ignores anything outside Presenting, so a key mashed
        // during feedback falls through without side effects.
        if let Some(outcome) = round.submit(option_idx) {
            if !outcome.correct && !self.muted {
                ring_bell();
            }
            self.pending_advance = Some(PendingAdvance {
                due: Instant::now() + FEEDBACK_DELAY,
                token: outcome.token,
            });
            self.last_outcome = Some(outcome);
        }
    }

    /// Service both timers off the event-loop tick.
    pub fn on_tick(&mut self, now: Instant) {
        if self.screen != AppScreen::Round {
            return;
        }

        // Round clock: the deadline marches in whole CLOCK_PERIOD steps so
        // cadence doesn't drift with the tick rate.
        while let Some(due) = self.next_clock_tick {
            if now < due {
                break;
            }
            if let Some(ref mut round) = self.round {
                round.clock_tick();
                if round.phase == Phase::Ended {
                    self.finish_round();
                    return;
                }
            }
            self.next_clock_tick = Some(due + CLOCK_PERIOD);
        }

        if let Some(ref pending) = self.pending_advance {
            if now >= pending.due {
                let token = pending.token;
                self.pending_advance = None;
                let live = self.round.as_ref().is_some_and(|r| {
                    r.generation() == token && matches!(r.phase, Phase::Feedback { .. })
                });
                if live {
                    let question = self.sampler.sample(&self.words);
                    if let Some(ref mut round) = self.round {
                        round.advance(question);
                    }
                    self.last_outcome = None;
                }
            }
        }
    }

    /// Esc during play: end the round to the summary instead of losing it.
    pub fn end_round_early(&mut self) {
        if let Some(ref mut round) = self.round {
            round.end();
        }
        self.finish_round();
    }

    fn finish_round(&mut self) {
        self.pending_advance = None;
        self.next_clock_tick = None;
        self.screen = AppScreen::GameOver;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.config.muted = self.muted;
    }
}

/// The terminal stand-in for the wrong-answer sound: BEL, which most
/// emulators render as a beep or a visual flash.
fn ring_bell() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::words::WordItem;

    fn test_app() -> App {
        let items = (0..10)
            .map(|i| WordItem {
                hanzi: format!("字{i}"),
                pinyin: format!("zi{i}"),
                korean: format!("뜻{i}"),
            })
            .collect();
        let words = WordStore::from_items(items).unwrap();
        let mut config = Config::default();
        config.initial_secs = 60;
        App::new(config, words)
    }

    fn correct_idx(app: &App) -> usize {
        app.round.as_ref().unwrap().question.correct_idx()
    }

    #[test]
    fn start_round_enters_presenting_with_armed_clock() {
        let mut app = test_app();
        app.start_round();
        assert_eq!(app.screen, AppScreen::Round);
        let round = app.round.as_ref().unwrap();
        assert_eq!(round.phase, Phase::Presenting);
        assert_eq!(round.remaining_secs, 60);
        assert!(app.next_clock_tick.is_some());
    }

    #[test]
    fn pending_advance_fires_only_after_its_deadline() {
        let mut app = test_app();
        app.start_round();
        let idx = correct_idx(&app);
        app.submit_choice(idx);
        let pending_due = app.pending_advance.as_ref().unwrap().due;

        // Before the deadline nothing moves.
        app.on_tick(pending_due - Duration::from_millis(100));
        assert!(matches!(
            app.round.as_ref().unwrap().phase,
            Phase::Feedback { correct: true }
        ));

        app.on_tick(pending_due);
        assert_eq!(app.round.as_ref().unwrap().phase, Phase::Presenting);
        assert!(app.pending_advance.is_none());
    }

    #[test]
    fn restart_during_feedback_discards_the_stale_advance() {
        let mut app = test_app();
        app.start_round();
        let idx = correct_idx(&app);
        app.submit_choice(idx);
        let stale_token = app.pending_advance.as_ref().unwrap().token;
        let stale_due = app.pending_advance.as_ref().unwrap().due;

        app.start_round();
        assert!(app.pending_advance.is_none());
        let round = app.round.as_ref().unwrap();
        assert_ne!(round.generation(), stale_token);
        assert_eq!(round.score, 0);

        // Even a re-injected stale deadline is a no-op against the token.
        app.pending_advance = Some(PendingAdvance {
            due: stale_due,
            token: stale_token,
        });
        let question_before = app.round.as_ref().unwrap().question.correct.hanzi.clone();
        app.on_tick(stale_due + Duration::from_secs(10_000));
        // The big jump also exhausts the clock and ends the round; the
        // stale advance still must not have replaced the question first.
        assert_eq!(
            app.round.as_ref().unwrap().question.correct.hanzi,
            question_before
        );
    }

    #[test]
    fn clock_exhaustion_moves_to_game_over() {
        let mut app = test_app();
        app.start_round();
        let start = app.next_clock_tick.unwrap();
        app.on_tick(start + Duration::from_secs(120));
        assert_eq!(app.screen, AppScreen::GameOver);
        assert_eq!(app.round.as_ref().unwrap().phase, Phase::Ended);
        assert!(app.next_clock_tick.is_none());
        assert!(app.pending_advance.is_none());
    }

    #[test]
    fn submit_during_feedback_changes_nothing() {
        let mut app = test_app();
        app.start_round();
        let idx = correct_idx(&app);
        app.submit_choice(idx);
        let score = app.round.as_ref().unwrap().score;
        app.submit_choice(0);
        app.submit_choice(3);
        assert_eq!(app.round.as_ref().unwrap().score, score);
        assert!(app.round.as_ref().unwrap().wrong_log.is_empty());
    }

    #[test]
    fn last_outcome_lives_exactly_as_long_as_the_feedback() {
        let mut app = test_app();
        app.start_round();
        assert!(app.last_outcome.is_none());

        let idx = correct_idx(&app);
        app.submit_choice(idx);
        let outcome = app.last_outcome.expect("set at submission");
        assert!(outcome.correct);
        assert_eq!(outcome.gained, 100);
        assert_eq!(outcome.time_delta, 2);

        let due = app.pending_advance.as_ref().unwrap().due;
        app.on_tick(due);
        assert!(app.last_outcome.is_none());
    }

    #[test]
    fn mute_toggle_tracks_into_config() {
        let mut app = test_app();
        assert!(!app.muted);
        app.toggle_mute();
        assert!(app.muted);
        assert!(app.config.muted);
        app.toggle_mute();
        assert!(!app.config.muted);
    }

    #[test]
    fn end_round_early_lands_on_summary() {
        let mut app = test_app();
        app.start_round();
        app.end_round_early();
        assert_eq!(app.screen, AppScreen::GameOver);
        assert_eq!(app.round.as_ref().unwrap().phase, Phase::Ended);
    }
}
