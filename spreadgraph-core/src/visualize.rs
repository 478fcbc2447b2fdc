//! Hand-off data for renderers: Graphviz DOT and visualizer JSON.
//!
//! Nothing here draws. The DOT text and the JSON document describe the raw
//! connections, the spread tree and each person's level so an external
//! renderer can color and lay them out.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

use crate::model::SocialGraph;
use crate::spread::SpreadResult;

/// Fill colors per level; levels past the end reuse the last color.
const LEVEL_COLORS: [&str; 6] = [
    "gold",
    "orange",
    "lightsalmon",
    "lightskyblue",
    "lightblue",
    "lavender",
];

const UNREACHED_COLOR: &str = "lightgrey";

fn level_color(level: Option<usize>) -> &'static str {
    match level {
        Some(level) => LEVEL_COLORS[level.min(LEVEL_COLORS.len() - 1)],
        None => UNREACHED_COLOR,
    }
}

/// A person in the visualizer JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizerNode {
    pub id: usize,
    pub name: String,
    /// Hop level, `None` when the spread never reached this person
    pub level: Option<usize>,
    pub reached: bool,
    pub is_start: bool,
}

/// An edge in the visualizer JSON output, by node id.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizerEdge {
    pub from: usize,
    pub to: usize,
}

/// Statistics in the visualizer JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizerStats {
    pub total_people: usize,
    pub total_connections: usize,
    pub reached: usize,
    pub spread_edges: usize,
    pub depth: usize,
    pub connected: bool,
}

/// Complete visualizer document.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizerGraph {
    pub nodes: Vec<VisualizerNode>,
    /// Undirected connections of the social graph
    pub connections: Vec<VisualizerEdge>,
    /// Directed first-discovery edges of the spread tree
    pub spread: Vec<VisualizerEdge>,
    pub stats: VisualizerStats,
}

/// Build the visualizer document for a graph and one run over it.
///
/// Node ids follow the graph's entity insertion order.
pub fn spread_to_visualizer_json(graph: &SocialGraph, result: &SpreadResult) -> VisualizerGraph {
    let ids: HashMap<&str, usize> = graph
        .entities()
        .iter()
        .enumerate()
        .map(|(i, e)| (e.as_str(), i))
        .collect();
    let start = result.start().map(|s| s.as_str());

    let nodes = graph
        .entities()
        .iter()
        .enumerate()
        .map(|(id, entity)| {
            let level = result.level_of(entity.as_str());
            VisualizerNode {
                id,
                name: entity.to_string(),
                level,
                reached: level.is_some(),
                is_start: start == Some(entity.as_str()),
            }
        })
        .collect();

    let to_edge = |a: &str, b: &str| match (ids.get(a), ids.get(b)) {
        (Some(&from), Some(&to)) => Some(VisualizerEdge { from, to }),
        _ => None,
    };
    let connections: Vec<VisualizerEdge> = graph
        .edges()
        .filter_map(|(a, b)| to_edge(a.as_str(), b.as_str()))
        .collect();
    let spread: Vec<VisualizerEdge> = result
        .spread_graph()
        .edges()
        .filter_map(|(a, b)| to_edge(a.as_str(), b.as_str()))
        .collect();

    VisualizerGraph {
        stats: VisualizerStats {
            total_people: graph.entity_count(),
            total_connections: connections.len(),
            reached: result.reached(),
            spread_edges: spread.len(),
            depth: result.depth(),
            connected: graph.is_connected(),
        },
        nodes,
        connections,
        spread,
    }
}

/// Generate a Graphviz DOT document of the spread.
///
/// - nodes are filled by level, unreached people are grey
/// - spread tree edges are solid arrows labelled with the level they reached
/// - connections the spread did not travel along are dashed and undirected
pub fn generate_dot(graph: &SocialGraph, result: &SpreadResult) -> String {
    // ~60 bytes/node + ~50 bytes/edge + header/footer
    let estimated_capacity = graph.entity_count() * 60 + graph.edge_count() * 50 + 150;
    let mut dot = String::with_capacity(estimated_capacity);

    if let Err(e) = write_dot_content(&mut dot, graph, result) {
        tracing::error!(detail = %e, "failed to generate DOT string");
        return "digraph spread {\n}\n".to_string();
    }

    dot
}

/// Escape a name for use inside a quoted DOT ID.
fn escape_dot_id(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

fn write_dot_content(
    dot: &mut String,
    graph: &SocialGraph,
    result: &SpreadResult,
) -> std::fmt::Result {
    writeln!(dot, "digraph spread {{")?;
    writeln!(dot, "  rankdir=TB;")?;
    writeln!(dot, "  node [shape=ellipse, style=filled, fontname=\"Helvetica\"];")?;
    writeln!(dot)?;

    let start = result.start().map(|s| s.as_str());
    for entity in graph.entities() {
        let level = result.level_of(entity.as_str());
        let color = level_color(level);
        let id = escape_dot_id(entity.as_str());
        if start == Some(entity.as_str()) {
            writeln!(dot, "  \"{}\" [fillcolor={}, penwidth=2];", id, color)?;
        } else {
            writeln!(dot, "  \"{}\" [fillcolor={}];", id, color)?;
        }
    }

    writeln!(dot)?;

    let tree = result.spread_graph();
    for (from, to) in tree.edges() {
        let level = result.level_of(to.as_str()).unwrap_or_default();
        writeln!(
            dot,
            "  \"{}\" -> \"{}\" [label=\"{}\"];",
            escape_dot_id(from.as_str()),
            escape_dot_id(to.as_str()),
            level
        )?;
    }

    for (a, b) in graph.edges() {
        let in_tree = tree.parent(b.as_str()) == Some(a) || tree.parent(a.as_str()) == Some(b);
        if !in_tree {
            writeln!(
                dot,
                "  \"{}\" -> \"{}\" [dir=none, style=dashed, color=grey];",
                escape_dot_id(a.as_str()),
                escape_dot_id(b.as_str())
            )?;
        }
    }

    writeln!(dot, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpreadEngine;

    fn split_graph() -> SocialGraph {
        SocialGraph::from_parts(["A", "B", "C", "X"], [("A", "B"), ("B", "C"), ("A", "C")])
    }

    #[test]
    fn test_generate_dot_empty() {
        let dot = generate_dot(&SocialGraph::new(), &SpreadResult::default());
        assert!(dot.contains("digraph spread"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_generate_dot_spread() {
        let graph = split_graph();
        let result = SpreadEngine::new(&graph).run(Some("A"));
        let dot = generate_dot(&graph, &result);

        assert!(dot.contains("\"A\" [fillcolor=gold, penwidth=2];"));
        assert!(dot.contains("\"A\" -> \"B\" [label=\"1\"];"));
        assert!(dot.contains("\"A\" -> \"C\" [label=\"1\"];"));
        // B-C was not used by the spread
        assert!(dot.contains("\"B\" -> \"C\" [dir=none, style=dashed, color=grey];"));
        assert!(dot.contains("\"X\" [fillcolor=lightgrey];"));
    }

    #[test]
    fn test_generate_dot_escapes_names() {
        let graph = SocialGraph::from_parts(
            ["Patryk \"Pat\" Gacek", "Ania", "C:\\Kasia"],
            [("Patryk \"Pat\" Gacek", "Ania"), ("Ania", "C:\\Kasia")],
        );
        let result = SpreadEngine::new(&graph).run(None);
        let dot = generate_dot(&graph, &result);

        assert!(dot.contains(r#"  "Patryk \"Pat\" Gacek" [fillcolor=gold, penwidth=2];"#));
        assert!(dot.contains(r#"  "Patryk \"Pat\" Gacek" -> "Ania" [label="1"];"#));
        assert!(dot.contains(r#"  "Ania" -> "C:\\Kasia" [label="2"];"#));
        assert!(!dot.contains(r#""Patryk "Pat""#));
    }

    #[test]
    fn test_escape_dot_id() {
        assert_eq!(escape_dot_id("plain"), "plain");
        assert_eq!(escape_dot_id(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_dot_id(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_level_color_saturates() {
        assert_eq!(level_color(Some(0)), "gold");
        assert_eq!(level_color(Some(99)), "lavender");
        assert_eq!(level_color(None), UNREACHED_COLOR);
    }

    #[test]
    fn test_visualizer_json() {
        let graph = split_graph();
        let result = SpreadEngine::new(&graph).run(Some("A"));
        let viz = spread_to_visualizer_json(&graph, &result);

        assert_eq!(viz.nodes.len(), 4);
        assert!(viz.nodes[0].is_start);
        assert_eq!(viz.nodes[3].level, None);
        assert!(!viz.nodes[3].reached);
        assert_eq!(viz.connections.len(), 3);
        assert_eq!(viz.spread.len(), 2);
        assert_eq!(viz.stats.reached, 3);
        assert_eq!(viz.stats.depth, 1);
        assert!(!viz.stats.connected);

        let json = serde_json::to_value(&viz).unwrap();
        assert!(json["nodes"][3]["level"].is_null());
        assert_eq!(json["spread"][0]["from"], 0);
    }
}
