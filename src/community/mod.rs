//! Community detection by locus-based swarm search.
//!
//! Given a graph, find groups of vertices that are densely connected inside
//! and sparsely connected to each other.
//!
//! ## The Modularity Objective
//!
//! Candidate partitions are scored by Newman-Girvan **modularity** Q, the
//! fraction of edges inside communities minus the fraction expected if edges
//! were rewired at random with the same degree sequence:
//!
//! ```text
//! Q = Σ_s [ l_s / m - (d_s / 2m)² ]
//! ```
//!
//! A good partition has Q > 0. A graph without edges scores 0 for any partition.
//!
//! ## Locus-Based Encoding
//!
//! A candidate is not stored as a partition but as an [`Encoding`]: every
//! non-isolated vertex points at one of its neighbors. Decoding follows the
//! pointer chains, and each chain becomes a community. Small chains (fewer than
//! [`MIN_COMMUNITY_SIZE`] vertices) are folded into the community their pointer
//! leads to, when that community is large.
//!
//! Because pointers always follow real edges, every decoded community is held
//! together by edges of the graph, and crossover or mutation can never produce
//! an invalid candidate.
//!
//! ## PSO-Net
//!
//! [`PsoNet`] evolves a swarm of encodings. Each particle is pulled toward its
//! personal best and the global best by two-point crossover, then perturbed by
//! single-locus mutation. The best modularity seen is tracked per generation.
//!
//! ## Usage
//!
//! ```rust
//! use psonet::community::PsoNet;
//! use psonet::Network;
//!
//! // Two disjoint edges
//! let network = Network::from_edges([(1, 2), (3, 4)]);
//!
//! let outcome = PsoNet::new()
//!     .with_particles(10)
//!     .with_generations(20)
//!     .with_seed(42)
//!     .run(&network)
//!     .unwrap();
//!
//! assert_eq!(outcome.partition.get(1), outcome.partition.get(2));
//! assert_ne!(outcome.partition.get(1), outcome.partition.get(3));
//! assert!((outcome.modularity - 0.5).abs() < 1e-12);
//! ```
//!
//! ## References
//!
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."
//! - Park & Song (1989). "A genetic algorithm for clustering problems." (locus-based adjacency)
//! - Pizzuti (2008). "GA-Net: A Genetic Algorithm for Community Detection in Social Networks."

mod decode;
mod encoding;
mod modularity;
mod operators;
mod partition;
mod pso_net;
mod traits;

pub use decode::{decode, decode_with_min_size, MIN_COMMUNITY_SIZE};
pub use encoding::{initialize_population, Encoding};
pub use modularity::{modularity, modularity_with_resolution};
pub use operators::{crossover, mutate};
pub use partition::Partition;
pub use pso_net::{Outcome, Progress, PsoNet};
pub use traits::CommunityDetection;
