use std::path::Path;

use anyhow::Result;

use mindmesh_lib::analysis::TextAnalyzer;

use crate::app::App;
use crate::render::terminal::{bar, paint, wrap_lines, Color};
use crate::OutputFormat;

pub fn run(app: &App, file: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let document = app.load_document(file, 1, None)?;
    let analysis = TextAnalyzer::new(app.config.analysis.clone()).analyze(&document.content);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&document.title, Color::BOLD, use_color));

            println!("\n{} ({})", paint("Sentences", Color::CYAN, use_color), analysis.sentences.len());
            for (i, sentence) in analysis.sentences.iter().enumerate() {
                let lines = wrap_lines(sentence, "     ", 80);
                for (j, line) in lines.iter().enumerate() {
                    if j == 0 {
                        println!("{:>3}. {}", i + 1, line.trim_start());
                    } else {
                        println!("{}", line);
                    }
                }
            }

            println!("\n{} ({})", paint("Key phrases", Color::CYAN, use_color), analysis.key_phrases.len());
            for phrase in &analysis.key_phrases {
                println!("  {} {:.3}  {}", bar(phrase.importance, 10), phrase.importance, phrase.text);
            }

            println!("\n{} ({})", paint("Entities", Color::CYAN, use_color), analysis.entities.len());
            for entity in &analysis.entities {
                let kind = format!("{:?}", entity.kind);
                println!(
                    "  {:.2}  {:<14} {}",
                    entity.confidence,
                    paint(&kind, Color::GRAY, use_color),
                    entity.text
                );
            }
        }
    }

    Ok(())
}
