//! Locus-based particle encoding.
//!
//! Each non-isolated vertex holds one "gene": a pointer to one of its
//! neighbors. Following the pointers yields chains and cycles, and each weakly
//! connected chain decodes into one community (see [`decode`](super::decode)).
//!
//! ```text
//! graph:  1 - 2 - 3      encoding: 1 -> 2, 2 -> 1, 3 -> 2
//!                        decodes to {1, 2, 3}
//! ```
//!
//! All encodings of a run share one [`Domain`], so a position means the same
//! vertex in every encoding and crossover can exchange plain index ranges.

use crate::error::{Error, Result};
use crate::graph::{Domain, Network, VertexId};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;

/// A particle: one neighbor pointer per domain vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    domain: Arc<Domain>,
    pointers: Vec<VertexId>,
}

impl Encoding {
    /// Draw every pointer uniformly from the vertex's neighbors.
    ///
    /// Fails if the domain holds a vertex with no neighbors in `network`.
    pub fn random<R: Rng + ?Sized>(
        network: &Network,
        domain: Arc<Domain>,
        rng: &mut R,
    ) -> Result<Self> {
        let pointers = domain
            .vertices()
            .iter()
            .map(|&v| {
                network
                    .neighbors(v)
                    .choose(rng)
                    .copied()
                    .ok_or(Error::InvalidParameter {
                        name: "domain",
                        message: "contains a vertex without neighbors",
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { domain, pointers })
    }

    /// Build an encoding from explicit pointers, given in domain order.
    pub fn from_pointers(domain: Arc<Domain>, pointers: Vec<VertexId>) -> Result<Self> {
        if pointers.len() != domain.len() {
            return Err(Error::DomainMismatch {
                expected: domain.len(),
                found: pointers.len(),
            });
        }
        Ok(Self { domain, pointers })
    }

    /// Pointer target of `v`, if `v` is in the domain.
    pub fn get(&self, v: VertexId) -> Option<VertexId> {
        self.domain.position(v).map(|i| self.pointers[i])
    }

    /// `(vertex, pointer)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.domain
            .vertices()
            .iter()
            .copied()
            .zip(self.pointers.iter().copied())
    }

    /// Pointers in domain order.
    pub fn pointers(&self) -> &[VertexId] {
        &self.pointers
    }

    /// The shared vertex domain.
    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    /// Number of vertices in the domain.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Whether both encodings range over the same vertices in the same order.
    pub fn same_domain(&self, other: &Encoding) -> bool {
        Arc::ptr_eq(&self.domain, &other.domain) || self.domain == other.domain
    }

    /// Check that every pointer is a true neighbor of its vertex.
    pub fn validate(&self, network: &Network) -> Result<()> {
        for (vertex, target) in self.iter() {
            if !network.has_edge(vertex, target) {
                return Err(Error::InvalidPointer { vertex, target });
            }
        }
        Ok(())
    }

    pub(crate) fn pointers_mut(&mut self) -> &mut [VertexId] {
        &mut self.pointers
    }
}

/// Create `count` random encodings over the network's non-isolated vertices.
///
/// All encodings share one domain. An empty network yields `count` empty encodings.
pub fn initialize_population<R: Rng + ?Sized>(
    network: &Network,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Encoding>> {
    let domain = Arc::new(network.domain());
    (0..count)
        .map(|_| Encoding::random(network, Arc::clone(&domain), rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_population_respects_neighbors() {
        let g = Network::from_edges([(1, 2), (2, 3), (3, 1)]);
        let mut rng = StdRng::seed_from_u64(7);
        let population = initialize_population(&g, 5, &mut rng).unwrap();

        assert_eq!(population.len(), 5);
        for particle in &population {
            assert_eq!(particle.len(), 3);
            particle.validate(&g).unwrap();
            for (v, target) in particle.iter() {
                assert!(g.neighbors(v).contains(&target));
            }
        }
        assert!(population[0].same_domain(&population[4]));
    }

    #[test]
    fn test_isolated_vertices_are_left_out() {
        let mut g = Network::from_edges([(1, 2)]);
        g.add_vertex(3);
        let mut rng = StdRng::seed_from_u64(1);
        let population = initialize_population(&g, 2, &mut rng).unwrap();

        assert_eq!(population[0].get(1), Some(2));
        assert_eq!(population[0].get(2), Some(1));
        assert_eq!(population[0].get(3), None);
    }

    #[test]
    fn test_empty_network_gives_empty_encodings() {
        let g = Network::new();
        let mut rng = StdRng::seed_from_u64(1);
        let population = initialize_population(&g, 3, &mut rng).unwrap();
        assert_eq!(population.len(), 3);
        assert!(population.iter().all(Encoding::is_empty));
    }

    #[test]
    fn test_from_pointers_checks_length() {
        let domain = Arc::new(Domain::new(vec![1, 2]));
        let err = Encoding::from_pointers(domain, vec![2]).unwrap_err();
        assert_eq!(
            err,
            Error::DomainMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_validate_rejects_non_neighbor() {
        let g = Network::from_edges([(1, 2), (2, 3)]);
        let domain = Arc::new(g.domain());
        let enc = Encoding::from_pointers(domain, vec![3, 1, 2]).unwrap();
        assert_eq!(
            enc.validate(&g),
            Err(Error::InvalidPointer {
                vertex: 1,
                target: 3
            })
        );
    }
}
