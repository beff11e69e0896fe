//! Mind-map rendering from a JSON graph description.
//!
//! The graph groups study queries under topics and connects related queries;
//! the renderer lays it out on a fixed canvas and emits a standalone SVG.

mod svg;

pub use svg::render_svg;

use crate::error::{LeseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Side length of the square layout canvas.
pub const CANVAS_SIZE: f64 = 100.0;

/// Fixed centers used when the map has up to three topics.
const TRIPLE_CENTERS: [(f64, f64); 3] = [(25.0, 50.0), (50.0, 25.0), (75.0, 50.0)];

/// Radius of a topic disc.
const TOPIC_RADIUS: f64 = 22.0;

/// Radius of the ring query nodes sit on around their topic.
const QUERY_RING_RADIUS: f64 = 19.0;

/// A mind-map graph description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindMap {
    /// Topic clusters.
    pub topics: Vec<Topic>,
    /// Pairs of query ids to connect with a line.
    #[serde(default)]
    pub connections: Vec<[String; 2]>,
}

/// A topic cluster with its member queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Topic label.
    pub name: String,
    /// Queries belonging to this topic.
    pub queries: Vec<QueryNode>,
}

/// A single query node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryNode {
    /// Identifier referenced by connections.
    pub id: String,
    /// Query text shown in the node.
    pub text: String,
}

/// Computed node positions on the canvas.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Topic centers in input order.
    pub topic_centers: Vec<(f64, f64)>,
    /// Query positions by id.
    pub query_positions: HashMap<String, (f64, f64)>,
}

/// Lay out a mind map on the canvas.
///
/// Up to three topics take the fixed triangle centers; larger maps fall back
/// to an evenly spaced ring. Query nodes sit on a ring around their topic.
/// Duplicate query ids and connections to unknown ids are errors.
pub fn layout(map: &MindMap) -> Result<Layout> {
    let topic_centers = topic_centers(map.topics.len());

    let mut query_positions = HashMap::new();
    for (topic, &(x, y)) in map.topics.iter().zip(&topic_centers) {
        let count = topic.queries.len();
        for (j, query) in topic.queries.iter().enumerate() {
            let angle = 2.0 * std::f64::consts::PI * j as f64 / count as f64;
            let position = (
                x + QUERY_RING_RADIUS * angle.cos(),
                y + QUERY_RING_RADIUS * angle.sin(),
            );
            if query_positions.insert(query.id.clone(), position).is_some() {
                return Err(LeseError::InvalidInput(format!(
                    "Duplicate query id in mind map: {}",
                    query.id
                )));
            }
        }
    }

    for [from, to] in &map.connections {
        for id in [from, to] {
            if !query_positions.contains_key(id) {
                return Err(LeseError::InvalidInput(format!(
                    "Connection references unknown query id: {}",
                    id
                )));
            }
        }
    }

    Ok(Layout {
        topic_centers,
        query_positions,
    })
}

/// Centers for `count` topics.
fn topic_centers(count: usize) -> Vec<(f64, f64)> {
    if count <= TRIPLE_CENTERS.len() {
        return TRIPLE_CENTERS[..count].to_vec();
    }

    let ring_radius = 30.0;
    let center = CANVAS_SIZE / 2.0;
    (0..count)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / count as f64;
            (
                center + ring_radius * angle.cos(),
                center + ring_radius * angle.sin(),
            )
        })
        .collect()
}

/// Truncate text to at most `max_words` words, appending an ellipsis.
pub fn truncate_text(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}...", words[..max_words].join(" "))
}

/// Greedy word wrap at `width` columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: &str, text: &str) -> QueryNode {
        QueryNode {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn three_topic_map() -> MindMap {
        MindMap {
            topics: vec![
                Topic {
                    name: "Optimization".to_string(),
                    queries: vec![query("q1", "what is gradient descent"), query("q2", "why momentum")],
                },
                Topic {
                    name: "Generalization".to_string(),
                    queries: vec![query("q3", "what is overfitting")],
                },
                Topic {
                    name: "Architectures".to_string(),
                    queries: vec![query("q4", "what is a convolution")],
                },
            ],
            connections: vec![["q1".to_string(), "q3".to_string()]],
        }
    }

    #[test]
    fn test_three_topics_take_fixed_centers() {
        let layout = layout(&three_topic_map()).unwrap();
        assert_eq!(
            layout.topic_centers,
            vec![(25.0, 50.0), (50.0, 25.0), (75.0, 50.0)]
        );
        assert_eq!(layout.query_positions.len(), 4);
    }

    #[test]
    fn test_queries_sit_on_the_topic_ring() {
        let layout = layout(&three_topic_map()).unwrap();
        let (qx, qy) = layout.query_positions["q3"];
        let (tx, ty) = layout.topic_centers[1];
        let distance = ((qx - tx).powi(2) + (qy - ty).powi(2)).sqrt();
        assert!((distance - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_more_than_three_topics_fall_back_to_a_ring() {
        let topics = (0..5)
            .map(|i| Topic {
                name: format!("topic {}", i),
                queries: vec![],
            })
            .collect();
        let map = MindMap {
            topics,
            connections: vec![],
        };

        let layout = layout(&map).unwrap();
        assert_eq!(layout.topic_centers.len(), 5);
        for &(x, y) in &layout.topic_centers {
            let distance = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((distance - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_duplicate_query_id_is_an_error() {
        let map = MindMap {
            topics: vec![Topic {
                name: "t".to_string(),
                queries: vec![query("q1", "a"), query("q1", "b")],
            }],
            connections: vec![],
        };
        assert!(layout(&map).is_err());
    }

    #[test]
    fn test_unknown_connection_endpoint_is_an_error() {
        let mut map = three_topic_map();
        map.connections.push(["q1".to_string(), "missing".to_string()]);
        assert!(layout(&map).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short text", 6), "short text");
        assert_eq!(
            truncate_text("one two three four five six seven", 6),
            "one two three four five six..."
        );
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
        assert_eq!(
            wrap_text("gradient descent update rule", 16),
            vec!["gradient descent", "update rule"]
        );
        assert!(wrap_text("", 20).is_empty());
    }

    #[test]
    fn test_map_deserializes_from_graph_json() {
        let raw = r#"{
            "topics": [
                {"name": "Optimization", "queries": [{"id": "q1", "text": "what is sgd"}]}
            ],
            "connections": [["q1", "q1"]]
        }"#;
        let map: MindMap = serde_json::from_str(raw).unwrap();
        assert_eq!(map.topics.len(), 1);
        assert_eq!(map.connections.len(), 1);
    }
}
