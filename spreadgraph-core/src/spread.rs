//! Output of a spread run.
//!
//! A [`SpreadResult`] owns everything it reports. It never borrows the
//! [`SocialGraph`](crate::SocialGraph) it was computed from, so the caller can
//! keep results from several runs side by side.

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

use crate::entity::Entity;

/// One first-discovery event: `entity` was reached at hop distance `level`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Discovery {
    pub entity: Entity,
    pub level: usize,
}

/// Directed BFS tree: an edge `a -> b` means `a` first passed the
/// information to `b`.
///
/// Node ids are discovery positions, so `nodes()[i]` is the i-th entity
/// discovered.
#[derive(Debug, Clone, Default)]
pub struct SpreadGraph {
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
    tree: DiGraphMap<usize, ()>,
}

impl SpreadGraph {
    pub(crate) fn with_capacity(nodes: usize) -> Self {
        Self {
            entities: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            tree: DiGraphMap::with_capacity(nodes, nodes.saturating_sub(1)),
        }
    }

    pub(crate) fn add_root(&mut self, entity: Entity) -> usize {
        self.push(entity)
    }

    /// Record that the node at `parent` discovered `entity`.
    pub(crate) fn add_discovery(&mut self, parent: usize, entity: Entity) -> usize {
        let id = self.push(entity);
        self.tree.add_edge(parent, id, ());
        id
    }

    fn push(&mut self, entity: Entity) -> usize {
        let id = self.entities.len();
        self.index.insert(entity.clone(), id);
        self.entities.push(entity);
        self.tree.add_node(id);
        id
    }

    pub fn node_count(&self) -> usize {
        self.entities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.tree.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in discovery order.
    pub fn nodes(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn root(&self) -> Option<&Entity> {
        self.entities.first()
    }

    /// `(discoverer, discovered)` pairs in discovery order.
    pub fn edges(&self) -> impl Iterator<Item = (&Entity, &Entity)> + '_ {
        self.tree
            .all_edges()
            .map(move |(a, b, _)| (&self.entities[a], &self.entities[b]))
    }

    /// The entity that first informed `name`; `None` for the root or an
    /// unknown name.
    pub fn parent(&self, name: &str) -> Option<&Entity> {
        let id = self.index.get(name)?;
        self.tree
            .neighbors_directed(*id, Direction::Incoming)
            .next()
            .map(|p| &self.entities[p])
    }

    /// Entities first informed by `name`, in discovery order.
    pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.index
            .get(name)
            .copied()
            .into_iter()
            .flat_map(move |id| self.tree.neighbors_directed(id, Direction::Outgoing))
            .map(move |c| &self.entities[c])
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.index.get(name).map_or(0, |&id| {
            self.tree.neighbors_directed(id, Direction::Incoming).count()
        })
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.children(name).count()
    }

    /// Hops from the root to `name`, following parent links.
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        let mut current = self.index.get(name).copied()?;
        let mut hops = 0;
        while let Some(parent) = self
            .tree
            .neighbors_directed(current, Direction::Incoming)
            .next()
        {
            current = parent;
            hops += 1;
        }
        Some(hops)
    }

    fn edge_ids(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tree.all_edges().map(|(a, b, _)| (a, b))
    }
}

impl PartialEq for SpreadGraph {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities && self.edge_ids().eq(other.edge_ids())
    }
}

impl Eq for SpreadGraph {}

impl Serialize for SpreadGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let edges: Vec<(&Entity, &Entity)> = self.edges().collect();
        let mut state = serializer.serialize_struct("SpreadGraph", 2)?;
        state.serialize_field("nodes", &self.entities)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

/// Everything one spread run produced.
///
/// An empty result (no start, no discoveries) is what a rejected run returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SpreadResult {
    start: Option<Entity>,
    order: Vec<Discovery>,
    depth: usize,
    spread_graph: SpreadGraph,
}

impl SpreadResult {
    pub(crate) fn with_root(start: Entity, capacity: usize) -> Self {
        let mut spread_graph = SpreadGraph::with_capacity(capacity);
        spread_graph.add_root(start.clone());
        Self {
            order: vec![Discovery {
                entity: start.clone(),
                level: 0,
            }],
            start: Some(start),
            depth: 0,
            spread_graph,
        }
    }

    /// Append a discovery made by the node at spread position `parent`.
    pub(crate) fn record(&mut self, parent: usize, entity: Entity, level: usize) -> usize {
        self.depth = self.depth.max(level);
        self.order.push(Discovery {
            entity: entity.clone(),
            level,
        });
        self.spread_graph.add_discovery(parent, entity)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn start(&self) -> Option<&Entity> {
        self.start.as_ref()
    }

    /// Discoveries in the exact order they happened.
    pub fn order(&self) -> &[Discovery] {
        &self.order
    }

    /// Maximum level reached; 0 when only the start was reached.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn spread_graph(&self) -> &SpreadGraph {
        &self.spread_graph
    }

    /// Number of entities reached, start included.
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    pub fn level_of(&self, name: &str) -> Option<usize> {
        self.spread_graph
            .index
            .get(name)
            .map(|&pos| self.order[pos].level)
    }

    /// `(entity, level)` pairs in discovery order.
    pub fn levels(&self) -> impl Iterator<Item = (&Entity, usize)> + '_ {
        self.order.iter().map(|d| (&d.entity, d.level))
    }

    /// Entities grouped by level: `result.waves()[k]` were reached after k hops.
    pub fn waves(&self) -> Vec<Vec<&Entity>> {
        let mut waves: Vec<Vec<&Entity>> = Vec::new();
        for d in &self.order {
            if waves.len() <= d.level {
                waves.resize_with(d.level + 1, Vec::new);
            }
            waves[d.level].push(&d.entity);
        }
        waves
    }
}
