use std::path::Path;

use anyhow::Result;

use mindmesh_lib::flashcards::FlashcardGenerator;

use crate::app::App;
use crate::render::terminal::{paint, wrap_lines, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    file: &Path,
    document_id: i64,
    out: Option<&Path>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let document = app.load_document(file, document_id, None)?;
    let cards = FlashcardGenerator::new(&app.config).generate(document.id, &document.content);

    if let Some(path) = out {
        app.save_deck(path, &cards)?;
        log::info!("Wrote {} cards to {}", cards.len(), path.display());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No flashcards generated from '{}'.", document.title);
                return Ok(());
            }

            for (i, card) in cards.iter().enumerate() {
                println!("{:>3}. {}", i + 1, paint(&card.front, Color::BOLD, use_color));
                for line in wrap_lines(&card.back, "     ", 80) {
                    println!("{}", paint(&line, Color::DIM, use_color));
                }
            }

            match out {
                Some(path) => println!("\n{} cards saved to {}", cards.len(), path.display()),
                None => println!("\n{} cards", cards.len()),
            }
        }
    }

    Ok(())
}
