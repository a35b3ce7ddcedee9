//! Difficulty-based spaced repetition
//!
//! Each review moves a card's difficulty (0-5) and schedules the next review
//! a whole number of days out:
//!
//! | outcome | difficulty change | base days |
//! |---------|-------------------|-----------|
//! | Again   | +1 (max 5)        | 1         |
//! | Hard    | unchanged         | 2         |
//! | Good    | -1 (min 0)        | 4         |
//! | Easy    | -2 (min 0)        | 7         |
//!
//! The base is scaled by a multiplier taken from the difficulty the card had
//! before the review (1.0 for 0-1, 1.5, 2.0, 3.0, then 4.0 from 5) and
//! floored.

use chrono::{DateTime, Duration, Utc};

use super::models::{DeckStats, Flashcard, ReviewOutcome, MAX_DIFFICULTY};

fn base_days(outcome: ReviewOutcome) -> f64 {
    match outcome {
        ReviewOutcome::Again => 1.0,
        ReviewOutcome::Hard => 2.0,
        ReviewOutcome::Good => 4.0,
        ReviewOutcome::Easy => 7.0,
    }
}

fn difficulty_multiplier(difficulty: u8) -> f64 {
    match difficulty {
        0 | 1 => 1.0,
        2 => 1.5,
        3 => 2.0,
        4 => 3.0,
        _ => 4.0,
    }
}

/// Difficulty after answering with `outcome`
pub fn next_difficulty(difficulty: u8, outcome: ReviewOutcome) -> u8 {
    let difficulty = difficulty.min(MAX_DIFFICULTY);
    match outcome {
        ReviewOutcome::Again => difficulty.saturating_add(1).min(MAX_DIFFICULTY),
        ReviewOutcome::Hard => difficulty,
        ReviewOutcome::Good => difficulty.saturating_sub(1),
        ReviewOutcome::Easy => difficulty.saturating_sub(2),
    }
}

/// Days until the next review for a card currently at `difficulty`
pub fn interval_days(difficulty: u8, outcome: ReviewOutcome) -> i64 {
    (base_days(outcome) * difficulty_multiplier(difficulty)).floor() as i64
}

/// Apply one review at `now`, returning the updated card.
///
/// Pure: the same card, outcome and `now` always give the same result.
pub fn review(card: &Flashcard, outcome: ReviewOutcome, now: DateTime<Utc>) -> Flashcard {
    let current = card.difficulty.min(MAX_DIFFICULTY);
    let days = interval_days(current, outcome);
    let difficulty = next_difficulty(current, outcome);

    log::debug!(
        "Review {}: difficulty {} -> {}, next in {} days",
        outcome,
        current,
        difficulty,
        days
    );

    Flashcard {
        difficulty,
        next_review_date: now + Duration::days(days),
        review_count: card.review_count.saturating_add(1),
        correct_count: if outcome.is_correct() {
            card.correct_count.saturating_add(1)
        } else {
            card.correct_count
        },
        updated_at: now,
        ..card.clone()
    }
}

/// Interval in days each outcome would schedule, ordered Again, Hard,
/// Good, Easy.
pub fn preview_intervals(difficulty: u8) -> [i64; 4] {
    ReviewOutcome::ALL.map(|outcome| interval_days(difficulty, outcome))
}

/// Positions of the cards due at `now`, most overdue first. Ties keep deck
/// order.
pub fn due_indices(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<usize> {
    let mut due: Vec<usize> = (0..cards.len()).filter(|&i| cards[i].is_due(now)).collect();
    due.sort_by_key(|&i| cards[i].next_review_date);
    due
}

/// Cards due at `now`, most overdue first
pub fn due_cards(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<&Flashcard> {
    due_indices(cards, now).into_iter().map(|i| &cards[i]).collect()
}

pub fn deck_stats(cards: &[Flashcard], now: DateTime<Utc>) -> DeckStats {
    let total_reviews: u64 = cards.iter().map(|c| u64::from(c.review_count)).sum();
    let correct_reviews: u64 = cards.iter().map(|c| u64::from(c.correct_count)).sum();
    let new_cards = cards.iter().filter(|c| c.is_new()).count();

    DeckStats {
        total: cards.len(),
        due: cards.iter().filter(|c| c.is_due(now)).count(),
        new_cards,
        reviewed: cards.len() - new_cards,
        total_reviews,
        correct_reviews,
        accuracy: if total_reviews == 0 {
            0.0
        } else {
            correct_reviews as f32 / total_reviews as f32
        },
    }
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
