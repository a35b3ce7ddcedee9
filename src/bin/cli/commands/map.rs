use std::path::Path;

use anyhow::{Context, Result};

use mindmesh_lib::cognitive_map::CognitiveMapBuilder;

use crate::app::App;
use crate::render::terminal::{paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    file: &Path,
    title: Option<&str>,
    document_id: i64,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let document = app.load_document(file, document_id, title)?;
    let map = CognitiveMapBuilder::new(&app.config)
        .build(document.id, &document.title, &document.content)
        .context("Failed to build cognitive map")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Plain => {
            if map.is_empty() {
                println!("No concepts found in '{}'.", document.title);
                return Ok(());
            }

            println!("{}", paint(&map.title, Color::BOLD, use_color));
            println!();

            let text_w = map
                .nodes()
                .iter()
                .map(|n| n.text.chars().count())
                .max()
                .unwrap_or(4)
                .clamp(4, 30);

            println!(
                "{:<8} {:<text_w$} {:<9} {:>5} {:>8} {:>8}",
                "Id", "Concept", "Category", "Imp", "X", "Y",
                text_w = text_w
            );
            println!("{} {} {} {} {} {}", rule(8), rule(text_w), rule(9), rule(5), rule(8), rule(8));
            for node in map.nodes() {
                println!(
                    "{:<8} {:<text_w$} {:<9} {:>5.2} {:>8.1} {:>8.1}",
                    node.id,
                    truncate(&node.text, text_w),
                    node.category,
                    node.importance,
                    node.x,
                    node.y,
                    text_w = text_w
                );
            }

            println!();
            for edge in map.edges() {
                let source = map.node(&edge.source_id).map(|n| n.text.as_str()).unwrap_or("?");
                let target = map.node(&edge.target_id).map(|n| n.text.as_str()).unwrap_or("?");
                println!(
                    "  {} {} {}  {}",
                    source,
                    paint(&format!("-[{}]->", edge.label), Color::YELLOW, use_color),
                    target,
                    paint(&format!("{:.2}", edge.weight), Color::GRAY, use_color)
                );
            }

            println!("\n{} nodes, {} edges", map.nodes().len(), map.edges().len());
        }
    }

    Ok(())
}
