//! SVG output for mind maps.

use super::{layout, MindMap, CANVAS_SIZE};
use crate::error::Result;
use std::fmt::Write;

const TOPIC_FILL: &str = "#E6E6FA";
const QUERY_FILL: &str = "#FFE4B5";

const QUERY_BOX_WIDTH: f64 = 12.0;
const QUERY_BOX_HEIGHT: f64 = 6.0;

const TOPIC_FONT_SIZE: f64 = 3.0;
const TOPIC_LINE_HEIGHT: f64 = 3.4;
const QUERY_FONT_SIZE: f64 = 1.8;
const QUERY_LINE_HEIGHT: f64 = 2.0;

const LABEL_WRAP_COLUMNS: usize = 20;
const QUERY_MAX_WORDS: usize = 6;

/// Render a mind map as a standalone SVG document.
pub fn render_svg(map: &MindMap) -> Result<String> {
    let layout = layout(map)?;
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="900" viewBox="0 0 {size} {size}" preserveAspectRatio="none" font-family="sans-serif">"#,
        size = CANVAS_SIZE
    );
    let _ = writeln!(
        out,
        r#"  <rect width="{size}" height="{size}" fill="white"/>"#,
        size = CANVAS_SIZE
    );

    for (topic, &(x, y)) in map.topics.iter().zip(&layout.topic_centers) {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="0.5"/>"#,
            x,
            flip(y),
            super::TOPIC_RADIUS,
            TOPIC_FILL
        );
        write_label(
            &mut out,
            &topic.name,
            x,
            flip(y + 25.0),
            TOPIC_FONT_SIZE,
            TOPIC_LINE_HEIGHT,
            true,
        );

        for query in &topic.queries {
            let (qx, qy) = layout.query_positions[&query.id];
            let _ = writeln!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{}" height="{}" fill="{}" stroke="black" stroke-width="0.15"/>"#,
                qx - QUERY_BOX_WIDTH / 2.0,
                flip(qy) - QUERY_BOX_HEIGHT / 2.0,
                QUERY_BOX_WIDTH,
                QUERY_BOX_HEIGHT,
                QUERY_FILL
            );
            let truncated = super::truncate_text(&query.text, QUERY_MAX_WORDS);
            write_label(
                &mut out,
                &truncated,
                qx,
                flip(qy),
                QUERY_FONT_SIZE,
                QUERY_LINE_HEIGHT,
                false,
            );
        }
    }

    for [from, to] in &map.connections {
        let (x1, y1) = layout.query_positions[from];
        let (x2, y2) = layout.query_positions[to];
        let _ = writeln!(
            out,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="0.2"/>"#,
            x1,
            flip(y1),
            x2,
            flip(y2)
        );
    }

    out.push_str("</svg>\n");
    Ok(out)
}

/// The layout uses y-up coordinates; SVG is y-down.
fn flip(y: f64) -> f64 {
    CANVAS_SIZE - y
}

/// Write a centered, wrapped text label.
fn write_label(
    out: &mut String,
    text: &str,
    x: f64,
    y: f64,
    font_size: f64,
    line_height: f64,
    bold: bool,
) {
    let lines = super::wrap_text(text, LABEL_WRAP_COLUMNS);
    if lines.is_empty() {
        return;
    }

    let weight = if bold { r#" font-weight="bold""# } else { "" };
    let _ = writeln!(
        out,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{}"{}>"#,
        x, y, font_size, weight
    );
    let offset = (lines.len() as f64 - 1.0) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let line_y = y + (i as f64 - offset) * line_height + font_size * 0.35;
        let _ = writeln!(
            out,
            r#"    <tspan x="{:.2}" y="{:.2}">{}</tspan>"#,
            x,
            line_y,
            xml_escape(line)
        );
    }
    let _ = writeln!(out, "  </text>");
}

/// Escape text content for XML.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::{QueryNode, Topic};

    fn sample_map() -> MindMap {
        MindMap {
            topics: vec![
                Topic {
                    name: "Optimization".to_string(),
                    queries: vec![
                        QueryNode {
                            id: "q1".to_string(),
                            text: "what is gradient descent".to_string(),
                        },
                        QueryNode {
                            id: "q2".to_string(),
                            text: "why does momentum help convergence speed overall".to_string(),
                        },
                    ],
                },
                Topic {
                    name: "Generalization".to_string(),
                    queries: vec![QueryNode {
                        id: "q3".to_string(),
                        text: "what is overfitting".to_string(),
                    }],
                },
            ],
            connections: vec![["q1".to_string(), "q3".to_string()]],
        }
    }

    #[test]
    fn test_render_produces_expected_elements() {
        let svg = render_svg(&sample_map()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<rect").count(), 4); // background + 3 query boxes
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("Optimization"));
        assert!(svg.contains(TOPIC_FILL));
        assert!(svg.contains(QUERY_FILL));
    }

    #[test]
    fn test_long_query_text_is_truncated() {
        // Seven words truncate to six plus an ellipsis before wrapping.
        let svg = render_svg(&sample_map()).unwrap();
        assert!(svg.contains("speed..."));
        assert!(!svg.contains("overall"));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let map = MindMap {
            topics: vec![Topic {
                name: "Trees & Graphs".to_string(),
                queries: vec![QueryNode {
                    id: "q1".to_string(),
                    text: "is a < b".to_string(),
                }],
            }],
            connections: vec![],
        };

        let svg = render_svg(&map).unwrap();
        assert!(svg.contains("Trees &amp; Graphs"));
        assert!(svg.contains("is a &lt; b"));
    }

    #[test]
    fn test_invalid_map_propagates_error() {
        let map = MindMap {
            topics: vec![],
            connections: vec![["missing".to_string(), "also-missing".to_string()]],
        };
        assert!(render_svg(&map).is_err());
    }
}
