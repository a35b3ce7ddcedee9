use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use mindmesh_lib::flashcards::algorithm::{format_interval, interval_days};
use mindmesh_lib::flashcards::{review, ReviewOutcome};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck: &Path,
    position: usize,
    outcome: ReviewOutcome,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut cards = app.load_deck(deck)?;
    let index = app.card_index(&cards, position)?;
    let now = Utc::now();

    let days = interval_days(cards[index].difficulty, outcome);
    let updated = review(&cards[index], outcome, now);
    cards[index] = updated.clone();
    app.save_deck(deck, &cards)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        OutputFormat::Plain => {
            let color = if outcome.is_correct() { Color::GREEN } else { Color::YELLOW };
            println!("{}", updated.front);
            println!("  {}", paint(&updated.back, Color::DIM, use_color));
            println!(
                "{}: next review in {} ({}), difficulty {}",
                paint(outcome.as_str(), color, use_color),
                format_interval(days),
                updated.next_review_date.format("%Y-%m-%d %H:%M"),
                updated.difficulty
            );
        }
    }

    Ok(())
}
