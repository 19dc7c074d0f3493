use rand::SeedableRng;
use rand::rngs::SmallRng;

use hanvoca::quiz::round::{BASE_SCORE, MAX_REMAINING_SECS, Phase, Round};
use hanvoca::quiz::sampler::Sampler;
use hanvoca::quiz::words::{WordItem, WordStore};

fn test_store() -> WordStore {
    let items = (0..30)
        .map(|i| WordItem {
            hanzi: format!("字{i}"),
            pinyin: format!("zi{i}"),
            korean: format!("뜻{i}"),
        })
        .collect();
    WordStore::from_items(items).unwrap()
}

fn wrong_idx(round: &Round) -> usize {
    round
        .question
        .options
        .iter()
        .position(|o| *o != round.question.correct.korean)
        .unwrap()
}

#[test]
fn all_correct_round_trends_time_up_and_logs_nothing() {
    let store = test_store();
    let mut sampler = Sampler::new(SmallRng::seed_from_u64(1));
    let mut round = Round::new(sampler.sample(&store), 60);

    let mut expected_score = 0;
    for n in 1..=10u32 {
        let before = round.remaining_secs;
        let idx = round.question.correct_idx();
        let outcome = round.submit(idx).expect("presenting, submit accepted");
        assert!(outcome.correct);
        expected_score += BASE_SCORE * n;
        assert_eq!(round.remaining_secs, before + 2);
        round.advance(sampler.sample(&store));
    }

    assert_eq!(round.score, expected_score);
    assert_eq!(round.correct_count, 10);
    assert_eq!(round.max_combo, 10);
    assert!(round.wrong_log.is_empty());
}

#[test]
fn one_miss_then_clock_exhaustion_logs_exactly_the_chosen_answer() {
    let store = test_store();
    let mut sampler = Sampler::new(SmallRng::seed_from_u64(2));
    let mut round = Round::new(sampler.sample(&store), 5);

    let idx = wrong_idx(&round);
    let chosen_text = round.question.options[idx].clone();
    let outcome = round.submit(idx).unwrap();
    assert!(!outcome.correct);
    assert_eq!(round.remaining_secs, 2);

    while round.phase != Phase::Ended {
        round.clock_tick();
    }

    assert_eq!(round.remaining_secs, 0);
    assert_eq!(round.wrong_log.len(), 1);
    assert_eq!(round.wrong_log[0].chosen, chosen_text);
    // No advance happened after the miss, so the logged word is the one
    // still on the card.
    assert_eq!(
        round.wrong_log[0].correct_korean,
        round.question.correct.korean
    );
}

#[test]
fn remaining_secs_always_within_bounds() {
    let store = test_store();
    let mut sampler = Sampler::new(SmallRng::seed_from_u64(3));
    let mut round = Round::new(sampler.sample(&store), MAX_REMAINING_SECS);

    // Alternate correct answers and ticks near the ceiling.
    for _ in 0..50 {
        let idx = round.question.correct_idx();
        round.submit(idx).unwrap();
        assert!(round.remaining_secs >= 0 && round.remaining_secs <= MAX_REMAINING_SECS);
        round.clock_tick();
        assert!(round.remaining_secs >= 0 && round.remaining_secs <= MAX_REMAINING_SECS);
        round.advance(sampler.sample(&store));
    }
    assert_eq!(round.remaining_secs, MAX_REMAINING_SECS);

    // Hammer wrong answers toward the floor.
    let mut round = Round::new(sampler.sample(&store), 4);
    for _ in 0..10 {
        if round.phase == Phase::Ended {
            break;
        }
        let idx = wrong_idx(&round);
        round.submit(idx);
        assert!(round.remaining_secs >= 0);
        round.advance(sampler.sample(&store));
        round.clock_tick();
    }
    assert!(round.remaining_secs >= 0);
}

#[test]
fn restart_during_feedback_yields_a_fresh_first_question() {
    let store = test_store();
    let mut sampler = Sampler::new(SmallRng::seed_from_u64(4));
    let mut round = Round::new(sampler.sample(&store), 60);

    let idx = round.question.correct_idx();
    let outcome = round.submit(idx).unwrap();
    assert!(matches!(round.phase, Phase::Feedback { .. }));

    // Restart while the 800ms advance is still outstanding.
    sampler.reset();
    round.restart(sampler.sample(&store), 60);

    // The stale advance would check this token; it can never match now.
    assert_ne!(round.generation(), outcome.token);
    assert_eq!(round.phase, Phase::Presenting);
    assert_eq!(round.score, 0);
    assert_eq!(round.combo, 0);
    assert!(round.wrong_log.is_empty());
    assert_eq!(round.remaining_secs, 60);
}

#[test]
fn mixed_round_scores_and_logs_consistently() {
    let store = test_store();
    let mut sampler = Sampler::new(SmallRng::seed_from_u64(5));
    let mut round = Round::new(sampler.sample(&store), 120);

    // correct, correct, wrong, correct: combo goes 1, 2, 0, 1
    let seq = [true, true, false, true];
    for &answer_correctly in &seq {
        let idx = if answer_correctly {
            round.question.correct_idx()
        } else {
            wrong_idx(&round)
        };
        round.submit(idx).unwrap();
        round.advance(sampler.sample(&store));
    }

    assert_eq!(round.score, 100 + 200 + 100);
    assert_eq!(round.correct_count, 3);
    assert_eq!(round.max_combo, 2);
    assert_eq!(round.combo, 1);
    assert_eq!(round.wrong_log.len(), 1);
    // 120 + 2 + 2 - 3 + 2
    assert_eq!(round.remaining_secs, 123);
}
