use std::path::Path;

use anyhow::Result;

use mindmesh_lib::analysis::{cosine_similarity, TextAnalyzer};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, a: &Path, b: &Path, format: &OutputFormat) -> Result<()> {
    let first = app.load_document(a, 1, None)?;
    let second = app.load_document(b, 2, None)?;

    let analyzer = TextAnalyzer::new(app.config.analysis.clone());
    let score = cosine_similarity(&analyzer.embed(&first.content), &analyzer.embed(&second.content));

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": first.title,
                "b": second.title,
                "similarity": score,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{:.4}  {} <> {}", score, first.title, second.title);
        }
    }

    Ok(())
}
