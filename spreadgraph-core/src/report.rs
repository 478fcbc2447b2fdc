//! Output formatting - plaintext dump and JSON.

use serde_json::json;
use std::fmt::Write;

use crate::entity::Entity;
use crate::model::SocialGraph;
use crate::spread::SpreadResult;

/// Render a graph and the result of a run over it as text.
///
/// Sections: `Graph Nodes`, `Graph Edges`, `Levels`, `Depth`,
/// `Spread order`, `Start node`, `Connected`.
pub fn describe(graph: &SocialGraph, result: &SpreadResult) -> String {
    let mut out = String::with_capacity(64 + graph.entity_count() * 24 + graph.edge_count() * 24);

    if let Err(e) = write_description(&mut out, graph, result) {
        tracing::error!(detail = %e, "failed to format spread description");
    }
    out
}

fn write_description(
    out: &mut String,
    graph: &SocialGraph,
    result: &SpreadResult,
) -> std::fmt::Result {
    let nodes: Vec<&str> = graph.entities().iter().map(Entity::as_str).collect();
    writeln!(out, "Graph Nodes ({}): {}", nodes.len(), nodes.join(", "))?;

    let edges: Vec<String> = graph.edges().map(|(a, b)| format!("{}-{}", a, b)).collect();
    writeln!(out, "Graph Edges ({}): {}", edges.len(), edges.join(", "))?;

    let levels: Vec<String> = result
        .levels()
        .map(|(entity, level)| format!("{}={}", entity, level))
        .collect();
    writeln!(out, "Levels: {{{}}}", levels.join(", "))?;
    writeln!(out, "Depth: {}", result.depth())?;

    let order: Vec<&str> = result.order().iter().map(|d| d.entity.as_str()).collect();
    writeln!(out, "Spread order: [{}]", order.join(", "))?;

    match result.start() {
        Some(start) => writeln!(out, "Start node: {}", start)?,
        None => writeln!(out, "Start node: none")?,
    }
    writeln!(out, "Connected: {}", graph.is_connected())?;
    Ok(())
}

/// Build the JSON document printed by [`print_json`].
pub fn to_json(graph: &SocialGraph, result: &SpreadResult) -> serde_json::Value {
    let edges: Vec<[&str; 2]> = graph.edges().map(|(a, b)| [a.as_str(), b.as_str()]).collect();
    json!({
        "graph": {
            "nodes": graph.entities(),
            "edges": edges,
            "connected": graph.is_connected(),
        },
        "result": result,
    })
}

/// Prints the text dump to stdout.
pub fn print_plain(graph: &SocialGraph, result: &SpreadResult) {
    print!("{}", describe(graph, result));
}

/// Prints graph and result in JSON format.
pub fn print_json(graph: &SocialGraph, result: &SpreadResult) {
    match serde_json::to_string_pretty(&to_json(graph, result)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(detail = %e, "JSON serialization failed, falling back to text");
            print_plain(graph, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpreadEngine;

    #[test]
    fn test_describe_sections() {
        let graph = SocialGraph::from_edges([("Person_1", "Person_2"), ("Person_2", "Person_3")])
            .unwrap();
        let result = SpreadEngine::new(&graph).run(Some("Person_1"));
        let text = describe(&graph, &result);

        for section in [
            "Graph Nodes",
            "Graph Edges",
            "Levels",
            "Depth",
            "Spread order",
            "Start node",
            "Connected",
        ] {
            assert!(text.contains(section), "missing section {}", section);
        }
        assert!(text.contains("Levels: {Person_1=0, Person_2=1, Person_3=2}"));
        assert!(text.contains("Start node: Person_1"));
        assert!(text.contains("Connected: true"));
    }

    #[test]
    fn test_describe_empty_result() {
        let graph = SocialGraph::new();
        let text = describe(&graph, &SpreadResult::default());
        assert!(text.contains("Graph Nodes (0)"));
        assert!(text.contains("Start node: none"));
        assert!(text.contains("Connected: false"));
    }

    #[test]
    fn test_to_json() {
        let graph = SocialGraph::from_parts(["A", "B", "C"], [("A", "B")]);
        let result = SpreadEngine::new(&graph).run(Some("A"));
        let json = to_json(&graph, &result);

        assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(json["graph"]["edges"][0][1], "B");
        assert_eq!(json["graph"]["connected"], false);
        assert_eq!(json["result"]["order"].as_array().unwrap().len(), 2);
    }
}
