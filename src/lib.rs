//! # psonet
//!
//! Community detection for undirected, unweighted graphs by modularity
//! optimization. A swarm of locus-based encodings is evolved with two-point
//! crossover toward personal and global bests plus single-locus mutation
//! (PSO-Net).
//!
//! The crate works on in-memory graphs only: build a [`Network`] from an edge
//! list, an adjacency map or a `petgraph` graph, then run [`PsoNet`].
//!
//! ## Features
//!
//! - `parallel`: update the particles of a generation on rayon.
//! - `serde`: `Serialize`/`Deserialize` for [`Partition`] and [`Outcome`].

pub mod community;
/// Error types used across `psonet`.
pub mod error;
pub mod graph;


pub use community::{
    crossover, decode, decode_with_min_size, initialize_population, modularity,
    modularity_with_resolution, mutate, CommunityDetection, Encoding, Outcome, Partition,
    Progress, PsoNet, MIN_COMMUNITY_SIZE,
};
pub use error::{Error, Result};
pub use graph::{CommunityId, Domain, Network, VertexId};
