//! Undirected, unweighted graph model.
//!
//! [`Network`] is the adjacency structure the optimizer reads. It is built once
//! (from an edge list, a pre-built adjacency map, or a `petgraph` graph) and is
//! never mutated during a run.
//!
//! Vertices iterate in ascending id order. That order is the canonical one used
//! for every [`Domain`], so crossover cut points mean the same thing for every
//! encoding of a run, and seeded runs are reproducible.

use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Vertex identifier.
pub type VertexId = usize;

/// Community identifier. Only equality is meaningful.
pub type CommunityId = usize;

/// Undirected, unweighted adjacency structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    /// Vertex -> sorted, deduplicated neighbor list.
    adj: BTreeMap<VertexId, Vec<VertexId>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from an undirected edge list.
    ///
    /// Each pair is inserted in both directions; repeated edges collapse.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut network = Self::new();
        for (u, v) in edges {
            network.add_edge(u, v);
        }
        network
    }

    /// Build a network from an adjacency map, checking that it is symmetric.
    pub fn from_adjacency(adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>) -> Result<Self> {
        for (&u, neighbors) in &adjacency {
            for &v in neighbors {
                let reverse = adjacency.get(&v).is_some_and(|n| n.contains(&u));
                if !reverse {
                    return Err(Error::AsymmetricAdjacency { from: u, to: v });
                }
            }
        }

        let adj = adjacency
            .into_iter()
            .map(|(u, neighbors)| (u, neighbors.into_iter().collect()))
            .collect();
        Ok(Self { adj })
    }

    /// Add a vertex with no edges. No-op if it already exists.
    pub fn add_vertex(&mut self, v: VertexId) {
        self.adj.entry(v).or_default();
    }

    /// Add an undirected edge.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) {
        Self::insert_sorted(self.adj.entry(u).or_default(), v);
        Self::insert_sorted(self.adj.entry(v).or_default(), u);
    }

    fn insert_sorted(list: &mut Vec<VertexId>, v: VertexId) {
        if let Err(pos) = list.binary_search(&v) {
            list.insert(pos, v);
        }
    }

    /// Number of vertices, isolated ones included.
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of distinct undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        let loops = self
            .adj
            .iter()
            .filter(|(u, neighbors)| neighbors.binary_search(u).is_ok())
            .count();
        (self.degree_sum() - loops) / 2 + loops
    }

    /// Sum of all vertex degrees (twice the edge count for loop-free graphs).
    pub fn degree_sum(&self) -> usize {
        self.adj.values().map(Vec::len).sum()
    }

    /// Whether the network has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Whether `v` is a vertex of the network.
    pub fn contains(&self, v: VertexId) -> bool {
        self.adj.contains_key(&v)
    }

    /// Degree of `v`; 0 for vertices the network does not know.
    pub fn degree(&self, v: VertexId) -> usize {
        self.adj.get(&v).map_or(0, Vec::len)
    }

    /// Neighbors of `v` in ascending order; empty for unknown vertices.
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self.adj.get(&v).map_or(&[], Vec::as_slice)
    }

    /// Whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adj.keys().copied()
    }

    /// The canonical encoding domain: every vertex with at least one neighbor.
    pub fn domain(&self) -> Domain {
        Domain::new(
            self.adj
                .iter()
                .filter(|(_, neighbors)| !neighbors.is_empty())
                .map(|(&v, _)| v)
                .collect(),
        )
    }
}

impl<N, E> From<&UnGraph<N, E>> for Network {
    /// Vertex ids are node indices. Parallel edges collapse.
    fn from(graph: &UnGraph<N, E>) -> Self {
        let mut network = Self::new();
        for node in graph.node_indices() {
            network.add_vertex(node.index());
        }
        for edge in graph.edge_references() {
            network.add_edge(edge.source().index(), edge.target().index());
        }
        network
    }
}

/// Ordered vertex set shared by all encodings of one run.
///
/// Position `i` of every encoding holds the pointer of `vertices()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    vertices: Vec<VertexId>,
    position: HashMap<VertexId, usize>,
}

impl Domain {
    /// Build a domain over `vertices` in the given order.
    pub fn new(vertices: Vec<VertexId>) -> Self {
        let position = vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();
        Self { vertices, position }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the domain has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in canonical order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Position of `v` in the canonical order.
    pub fn position(&self, v: VertexId) -> Option<usize> {
        self.position.get(&v).copied()
    }

    /// Whether `v` belongs to the domain.
    pub fn contains(&self, v: VertexId) -> bool {
        self.position.contains_key(&v)
    }
}
