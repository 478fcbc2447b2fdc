//! The social connections graph and its validation.
//!
//! [`SocialGraph`] is an undirected simple graph over [`Entity`] names.
//! Entities keep their insertion order and every adjacency list keeps the
//! insertion order of its edges, so traversals over the graph are
//! reproducible run to run.
//!
//! Construction never fails on mismatched inputs: connection endpoints that
//! were not listed as people are admitted as implicit entities. Whether the
//! result is fit for traversal is answered separately by
//! [`SocialGraph::validate`].

use petgraph::graph::UnGraph;
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use crate::entity::{is_textual, Entity, NodeLabel};
use crate::error::{SpreadGraphError, SpreadGraphResult};
use crate::random::{RandomGraphSource, PERSON_PREFIX};

/// Undirected graph of people and their connections.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    /// Entities in insertion order; the position is the entity's id in `graph`
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
    /// GraphMap keeps per-node adjacency vectors in edge insertion order
    graph: UnGraphMap<usize, ()>,
}

impl SocialGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of people and a list of connections.
    ///
    /// Duplicate people collapse to one entity. Connection endpoints absent
    /// from `people` are added as entities after the listed ones. An entirely
    /// empty input is logged and yields an empty graph.
    pub fn from_parts<P, C, A, B>(people: P, connections: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Entity>,
        C: IntoIterator<Item = (A, B)>,
        A: Into<Entity>,
        B: Into<Entity>,
    {
        let mut graph = Self::new();
        for person in people {
            graph.insert_entity(person.into());
        }
        for (a, b) in connections {
            graph.insert_connection(a.into(), b.into());
        }

        if graph.is_empty() {
            warn!(detail = %SpreadGraphError::EmptyInput, "constructed an empty social graph");
        }
        graph
    }

    /// Build a graph from connections alone.
    ///
    /// Entities are taken from the endpoints in order of first appearance.
    /// An empty connection list is reported as [`SpreadGraphError::EmptyInput`].
    pub fn from_edges<C, A, B>(connections: C) -> SpreadGraphResult<Self>
    where
        C: IntoIterator<Item = (A, B)>,
        A: Into<Entity>,
        B: Into<Entity>,
    {
        let mut graph = Self::new();
        for (a, b) in connections {
            graph.insert_connection(a.into(), b.into());
        }

        if graph.is_empty() {
            return Err(SpreadGraphError::EmptyInput);
        }
        Ok(graph)
    }

    /// Admit a graph built elsewhere.
    ///
    /// Every node label must be textual; a single numeric label rejects the
    /// whole graph.
    pub fn load_graph(raw: &UnGraph<NodeLabel, ()>) -> SpreadGraphResult<Self> {
        if let Some(label) = raw.node_indices().map(|i| &raw[i]).find(|l| !l.is_textual()) {
            return Err(SpreadGraphError::structural(format!(
                "node '{}' is not a textual identifier",
                label
            )));
        }

        let mut graph = Self::new();
        for label in raw.node_indices().filter_map(|i| raw[i].as_text()) {
            graph.insert_entity(Entity::from(label));
        }
        for edge in raw.edge_references() {
            if let (Some(a), Some(b)) = (raw[edge.source()].as_text(), raw[edge.target()].as_text())
            {
                graph.insert_connection(a.into(), b.into());
            }
        }
        Ok(graph)
    }

    /// Relabel a numerically-labeled graph into `<prefix><id>` entities.
    pub fn from_numeric(raw: &UnGraphMap<usize, ()>, prefix: &str) -> Self {
        let label = |id: usize| Entity::new(format!("{}{}", prefix, id));

        let mut graph = Self::new();
        for id in raw.nodes() {
            graph.insert_entity(label(id));
        }
        for (a, b, _) in raw.all_edges() {
            graph.insert_connection(label(a), label(b));
        }
        graph
    }

    /// Obtain a graph from a random-graph collaborator and relabel it to
    /// `Person_<id>` entities.
    pub fn from_random_source<R>(
        source: &R,
        num_nodes: usize,
        edge_prob: f64,
        seed: Option<u64>,
    ) -> SpreadGraphResult<Self>
    where
        R: RandomGraphSource + ?Sized,
    {
        let raw = source.generate(num_nodes, edge_prob, seed)?;
        Ok(Self::from_numeric(&raw, PERSON_PREFIX))
    }

    /// Generate an Erdos-Renyi community of `num_nodes` people.
    #[cfg(feature = "random")]
    pub fn random_community(
        num_nodes: usize,
        edge_prob: f64,
        seed: Option<u64>,
    ) -> SpreadGraphResult<Self> {
        Self::from_random_source(&crate::random::ErdosRenyi, num_nodes, edge_prob, seed)
    }

    fn insert_entity(&mut self, entity: Entity) -> usize {
        if let Some(&id) = self.index.get(&entity) {
            return id;
        }
        let id = self.entities.len();
        self.index.insert(entity.clone(), id);
        self.entities.push(entity);
        self.graph.add_node(id);
        id
    }

    fn insert_connection(&mut self, a: Entity, b: Entity) {
        let a = self.insert_entity(a);
        let b = self.insert_entity(b);
        self.graph.add_edge(a, b, ());
    }

    /// Check the graph (and optionally a start node) is fit for traversal.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. the graph has at least one entity
    /// 2. every entity identifier is textual
    /// 3. the start node, when supplied, is textual
    /// 4. the start node is a member of the graph
    pub fn validate(&self, start: Option<&str>) -> SpreadGraphResult<()> {
        if self.is_empty() {
            return Err(SpreadGraphError::structural("graph has no entities"));
        }

        if let Some(bad) = self.entities.iter().find(|e| !e.is_well_formed()) {
            return Err(SpreadGraphError::structural(format!(
                "entity {:?} is not a textual identifier",
                bad.as_str()
            )));
        }

        if let Some(start) = start {
            if !is_textual(start) {
                return Err(SpreadGraphError::start_node(
                    start,
                    "start node is not a textual identifier",
                ));
            }
            if !self.contains(start) {
                return Err(SpreadGraphError::start_node(
                    start,
                    "start node is not a member of the graph",
                ));
            }
        }

        Ok(())
    }

    /// Boolean form of [`validate`](Self::validate).
    pub fn is_valid(&self, start: Option<&str>) -> bool {
        self.validate(start).is_ok()
    }

    /// Whether every entity lies in a single connected component.
    ///
    /// The empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        !self.is_empty() && connected_components(&self.graph) == 1
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Connections in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Entity, &Entity)> + '_ {
        self.graph
            .all_edges()
            .map(move |(a, b, _)| (&self.entities[a], &self.entities[b]))
    }

    pub fn has_connection(&self, a: &str, b: &str) -> bool {
        match (self.id_of(a), self.id_of(b)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Neighbors of `name` in edge insertion order (empty if unknown).
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.id_of(name)
            .into_iter()
            .flat_map(move |id| self.neighbor_ids(id))
            .map(move |n| &self.entities[n])
    }

    pub fn degree(&self, name: &str) -> usize {
        self.neighbors(name).count()
    }

    pub(crate) fn id_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn entity_at(&self, id: usize) -> &Entity {
        &self.entities[id]
    }

    pub(crate) fn neighbor_ids(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(id)
    }
}

impl fmt::Display for SocialGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SocialGraph with {} entities and {} connections",
            self.entity_count(),
            self.edge_count()
        )
    }
}
