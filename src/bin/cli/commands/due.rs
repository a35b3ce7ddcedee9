use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use mindmesh_lib::flashcards::algorithm::{deck_stats, due_indices, format_interval, preview_intervals};
use mindmesh_lib::flashcards::Flashcard;

use crate::app::App;
use crate::render::terminal::{paint, truncate, Color};
use crate::OutputFormat;

pub fn run(app: &App, deck: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.load_deck(deck)?;
    let now = Utc::now();
    let stats = deck_stats(&cards, now);

    // positions are 1-based to match `review`
    let due: Vec<(usize, &Flashcard)> = due_indices(&cards, now)
        .into_iter()
        .map(|i| (i + 1, &cards[i]))
        .collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "due": due.iter().map(|(position, card)| {
                    serde_json::json!({
                        "position": position,
                        "card": card,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due.");
            } else {
                println!("{:>4}  {:<60} {}", "#", "Front", "Again/Hard/Good/Easy");
                for (position, card) in &due {
                    let preview: Vec<String> = preview_intervals(card.difficulty)
                        .iter()
                        .map(|&d| format_interval(d))
                        .collect();
                    println!(
                        "{:>4}  {:<60} {}",
                        position,
                        truncate(&card.front, 60),
                        paint(&preview.join(" / "), Color::GRAY, use_color)
                    );
                }
            }

            println!(
                "\n{} cards, {} due, {} new, {} reviewed",
                stats.total,
                paint(&stats.due.to_string(), Color::YELLOW, use_color),
                stats.new_cards,
                stats.reviewed
            );
            if stats.total_reviews > 0 {
                println!(
                    "{} of {} reviews correct ({:.0}%)",
                    stats.correct_reviews,
                    stats.total_reviews,
                    stats.accuracy * 100.0
                );
            }
        }
    }

    Ok(())
}
