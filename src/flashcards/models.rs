//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest difficulty a card can reach
pub const MAX_DIFFICULTY: u8 = 5;

/// A question/answer pair derived from a document, with its review schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub document_id: i64,
    pub front: String,
    pub back: String,
    /// Recall difficulty, 0 (easy) to 5 (hard)
    #[serde(default)]
    pub difficulty: u8,
    pub next_review_date: DateTime<Utc>,
    #[serde(default)]
    pub review_count: u32,
    /// Never exceeds `review_count`
    #[serde(default)]
    pub correct_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    /// A fresh card, due immediately
    pub fn new(document_id: i64, front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            document_id,
            front: front.into(),
            back: back.into(),
            difficulty: 0,
            next_review_date: now,
            review_count: 0,
            correct_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the card is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_date
    }

    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }

    /// Fraction of reviews answered correctly, 0 for unreviewed cards
    pub fn accuracy(&self) -> f32 {
        if self.review_count == 0 {
            0.0
        } else {
            self.correct_count as f32 / self.review_count as f32
        }
    }
}

/// How well the user recalled a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewOutcome {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// Map a UI button rating (1-4: Again, Hard, Good, Easy)
    pub fn from_rating(rating: u8) -> Option<Self> {
        match rating {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Good and Easy count as correct answers
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Good | Self::Easy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "again" | "1" => Ok(Self::Again),
            "hard" | "2" => Ok(Self::Hard),
            "good" | "3" => Ok(Self::Good),
            "easy" | "4" => Ok(Self::Easy),
            other => Err(format!("Unknown review outcome: {}", other)),
        }
    }
}

/// Statistics for a set of cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total: usize,
    pub due: usize,
    pub new_cards: usize,
    pub reviewed: usize,
    pub total_reviews: u64,
    pub correct_reviews: u64,
    /// correct_reviews / total_reviews, 0 when nothing has been reviewed
    pub accuracy: f32,
}
