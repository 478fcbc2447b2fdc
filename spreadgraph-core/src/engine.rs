//! Breadth-first spread engine.
//!
//! Turns the undirected connections of a [`SocialGraph`] into a directed
//! spread tree, recording for every reachable entity the hop level at which
//! it was first informed.
//!
//! ```rust,ignore
//! use spreadgraph_core::prelude::*;
//!
//! let graph = SocialGraph::from_parts(["A", "B"], [("A", "B")]);
//! let result = SpreadEngine::new(&graph).with_debug(true).run(Some("A"));
//! assert_eq!(result.depth(), 1);
//! ```
//!
//! Performance characteristics:
//! - Time: O(|V| + |E|), each entity is dequeued once and each adjacency list
//!   scanned once
//! - Space: O(|V|) for the visited flags and the queue
//!
//! With debug tracing on, every dequeue also snapshots the queue for the
//! trace sink.

use std::collections::VecDeque;
use std::fmt;
use tracing::{info, warn};

use crate::entity::Entity;
use crate::error::{SpreadGraphError, SpreadGraphResult};
use crate::model::SocialGraph;
use crate::spread::SpreadResult;
use crate::trace::{TraceEvent, TraceSink, TracingSink};

/// Where the engine is in its current (or last) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Idle,
    Validating,
    Traversing,
    Completed,
    Rejected,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Traversing => "traversing",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Runs single-source BFS over a borrowed, read-only [`SocialGraph`].
///
/// The engine keeps no result between runs; each call to [`run`](Self::run)
/// hands back a fresh [`SpreadResult`]. Engines are cheap, so concurrent runs
/// over one graph should each use their own engine.
#[derive(Debug)]
pub struct SpreadEngine<'g, S = TracingSink> {
    graph: &'g SocialGraph,
    sink: S,
    debug: bool,
    state: RunState,
}

impl<'g> SpreadEngine<'g> {
    /// Create an engine with debug tracing off.
    ///
    /// Enabling debug later forwards trace events to `tracing`.
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self {
            graph,
            sink: TracingSink,
            debug: false,
            state: RunState::Idle,
        }
    }
}

impl<'g, S: TraceSink> SpreadEngine<'g, S> {
    /// Enable or disable debug tracing.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Send trace events to `sink`. Enables debug tracing.
    pub fn with_sink<T: TraceSink>(self, sink: T) -> SpreadEngine<'g, T> {
        SpreadEngine {
            graph: self.graph,
            sink,
            debug: true,
            state: self.state,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Start node used when a run is given none: the first-inserted entity.
    pub fn default_start(&self) -> Option<&'g Entity> {
        self.graph.entities().first()
    }

    /// Run the spread, returning an empty result if validation fails.
    pub fn run(&mut self, start: Option<&str>) -> SpreadResult {
        self.try_run(start).unwrap_or_default()
    }

    /// Run the spread, reporting why a run was rejected.
    pub fn try_run(&mut self, start: Option<&str>) -> SpreadGraphResult<SpreadResult> {
        self.state = RunState::Validating;

        let graph = self.graph;
        let start = start.or_else(|| graph.entities().first().map(Entity::as_str));
        if let Err(err) = graph.validate(start) {
            return Err(self.reject(err));
        }
        let Some(root) = start.and_then(|name| graph.id_of(name)) else {
            return Err(self.reject(SpreadGraphError::structural("no start node available")));
        };

        self.state = RunState::Traversing;
        let start_entity = graph.entity_at(root).clone();
        self.trace(|| TraceEvent::Started {
            start: start_entity.clone(),
        });

        let mut result = SpreadResult::with_root(start_entity, graph.entity_count());
        let mut visited = vec![false; graph.entity_count()];
        visited[root] = true;

        // (graph id, position in the spread tree, level)
        let mut queue = VecDeque::from([(root, 0usize, 0usize)]);

        while let Some((node, position, level)) = queue.pop_front() {
            self.trace(|| TraceEvent::Visiting {
                entity: graph.entity_at(node).clone(),
                level,
                queue: queue.iter().map(|&(id, _, _)| graph.entity_at(id).clone()).collect(),
            });

            for neighbor in graph.neighbor_ids(node) {
                if visited[neighbor] {
                    self.trace(|| TraceEvent::Skipped {
                        from: graph.entity_at(node).clone(),
                        to: graph.entity_at(neighbor).clone(),
                    });
                    continue;
                }

                visited[neighbor] = true;
                let next_level = level + 1;
                let discovered =
                    result.record(position, graph.entity_at(neighbor).clone(), next_level);
                queue.push_back((neighbor, discovered, next_level));

                self.trace(|| TraceEvent::Accepted {
                    from: graph.entity_at(node).clone(),
                    to: graph.entity_at(neighbor).clone(),
                    level: next_level,
                });
            }
        }

        self.state = RunState::Completed;
        self.trace(|| TraceEvent::Completed {
            reached: result.reached(),
            depth: result.depth(),
        });
        info!(
            start = %graph.entity_at(root),
            reached = result.reached(),
            depth = result.depth(),
            "spread run completed"
        );

        Ok(result)
    }

    fn reject(&mut self, err: SpreadGraphError) -> SpreadGraphError {
        self.state = RunState::Rejected;
        warn!(detail = %err, "spread run rejected");
        self.trace(|| TraceEvent::Rejected {
            reason: err.to_string(),
        });
        err
    }

    fn trace(&mut self, event: impl FnOnce() -> TraceEvent) {
        if self.debug {
            self.sink.record(event());
        }
    }
}
