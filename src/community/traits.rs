//! Community detection seam over `petgraph` graphs.

use crate::error::Result;
use petgraph::graph::UnGraph;

/// A community detector that works on `petgraph` undirected graphs.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns one dense label (`0..k`) per node index. Node and edge weights
    /// are ignored; an empty graph is [`Error::EmptyInput`](crate::Error::EmptyInput).
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;

    /// Resolution parameter (gamma) of the modularity being optimized.
    fn resolution(&self) -> f64 {
        1.0
    }
}
