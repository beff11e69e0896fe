//! Mindmap command implementation.

use crate::cli::Output;
use crate::mindmap::{render_svg, MindMap};
use anyhow::{Context, Result};

/// Render a mind-map JSON file to an SVG image.
pub fn run_mindmap(input: &str, output: &str) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read mind-map file: {}", input))?;
    let map: MindMap = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mind-map JSON in: {}", input))?;

    let svg = render_svg(&map)?;
    std::fs::write(output, svg)
        .with_context(|| format!("Failed to write SVG file: {}", output))?;

    let queries: usize = map.topics.iter().map(|t| t.queries.len()).sum();
    Output::success(&format!(
        "Rendered {} topics and {} queries to {}",
        map.topics.len(),
        queries,
        output
    ));

    Ok(())
}
