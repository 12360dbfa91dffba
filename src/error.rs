use thiserror::Error;

use crate::graph::VertexId;

/// Result alias for `psonet`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the graph model and the community detection primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Two encodings (or an encoding and a pointer list) disagree on their vertex domain.
    #[error("encoding domain mismatch: expected {expected} vertices, found {found}")]
    DomainMismatch {
        /// Size of the expected domain.
        expected: usize,
        /// Size of the domain that was supplied.
        found: usize,
    },

    /// Two encodings have domains of the same size over different vertices or orders.
    #[error("encoding domains differ in vertices or order ({len} vertices each)")]
    DomainOrderMismatch {
        /// Size shared by both domains.
        len: usize,
    },

    /// An encoding points a vertex at something that is not its neighbor.
    #[error("vertex {vertex} points to {target}, which is not one of its neighbors")]
    InvalidPointer {
        /// The vertex holding the pointer.
        vertex: VertexId,
        /// The pointer target.
        target: VertexId,
    },

    /// Adjacency input is not symmetric.
    #[error("adjacency is not symmetric: {from} lists {to} but {to} does not list {from}")]
    AsymmetricAdjacency {
        /// Vertex whose neighbor set names `to`.
        from: VertexId,
        /// Vertex missing the reverse entry.
        to: VertexId,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}
