//! Genetic operators on encodings.

use super::encoding::Encoding;
use crate::error::{Error, Result};
use crate::graph::Network;
use rand::seq::{index, IndexedRandom};
use rand::Rng;

/// Two-point crossover.
///
/// Draws two distinct cut points `i < j` over the shared domain order.
/// `child1` takes `a` outside `[i, j)` and `b` inside it; `child2` the reverse.
/// Domains with fewer than two vertices have no pair of cut points, so the
/// children are plain copies of the parents.
pub fn crossover<R: Rng + ?Sized>(
    a: &Encoding,
    b: &Encoding,
    rng: &mut R,
) -> Result<(Encoding, Encoding)> {
    if a.len() != b.len() {
        return Err(Error::DomainMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    if !a.same_domain(b) {
        return Err(Error::DomainOrderMismatch { len: a.len() });
    }

    let mut child1 = a.clone();
    let mut child2 = b.clone();
    let n = a.len();
    if n < 2 {
        return Ok((child1, child2));
    }

    let cuts = index::sample(rng, n, 2);
    let (i, j) = {
        let (x, y) = (cuts.index(0), cuts.index(1));
        (x.min(y), x.max(y))
    };

    child1.pointers_mut()[i..j].copy_from_slice(&b.pointers()[i..j]);
    child2.pointers_mut()[i..j].copy_from_slice(&a.pointers()[i..j]);
    Ok((child1, child2))
}

/// Single-locus mutation.
///
/// Copies `encoding` and redraws the pointer of one uniformly chosen vertex
/// from its neighbors in `network`. The new pointer may equal the old one.
pub fn mutate<R: Rng + ?Sized>(encoding: &Encoding, network: &Network, rng: &mut R) -> Encoding {
    let mut mutated = encoding.clone();
    if mutated.is_empty() {
        return mutated;
    }

    let pos = rng.random_range(0..mutated.len());
    let vertex = mutated.domain().vertices()[pos];
    if let Some(&target) = network.neighbors(vertex).choose(rng) {
        mutated.pointers_mut()[pos] = target;
    }
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::initialize_population;
    use crate::graph::Domain;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn ring(n: usize) -> Network {
        Network::from_edges((0..n).map(|i| (i, (i + 1) % n)))
    }

    #[test]
    fn test_crossover_exchanges_one_segment() {
        let domain = Arc::new(Domain::new((0..8).collect()));
        let a = Encoding::from_pointers(Arc::clone(&domain), vec![100; 8]).unwrap();
        let b = Encoding::from_pointers(Arc::clone(&domain), vec![200; 8]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let (c1, c2) = crossover(&a, &b, &mut rng).unwrap();
            // c1 = 100.. 200.. 100..; a single contiguous block from b
            let from_b: Vec<usize> = (0..8).filter(|&k| c1.pointers()[k] == 200).collect();
            assert!(!from_b.is_empty());
            assert_eq!(from_b.last().unwrap() - from_b[0] + 1, from_b.len());
            // last position is never inside [i, j)
            assert_eq!(c1.pointers()[7], 100);
            for k in 0..8 {
                assert_ne!(c1.pointers()[k], c2.pointers()[k]);
            }
        }
    }

    #[test]
    fn test_crossover_keeps_domain() {
        let g = ring(12);
        let mut rng = StdRng::seed_from_u64(5);
        let pop = initialize_population(&g, 2, &mut rng).unwrap();
        let (c1, c2) = crossover(&pop[0], &pop[1], &mut rng).unwrap();
        assert!(c1.same_domain(&pop[0]));
        assert!(c2.same_domain(&pop[1]));
        c1.validate(&g).unwrap();
        c2.validate(&g).unwrap();
    }

    #[test]
    fn test_crossover_rejects_mismatched_domains() {
        let a = Encoding::from_pointers(Arc::new(Domain::new(vec![1, 2])), vec![2, 1]).unwrap();
        let b =
            Encoding::from_pointers(Arc::new(Domain::new(vec![1, 2, 3])), vec![2, 3, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            crossover(&a, &b, &mut rng).unwrap_err(),
            Error::DomainMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_crossover_rejects_same_size_different_vertices() {
        let a = Encoding::from_pointers(Arc::new(Domain::new(vec![1, 2])), vec![2, 1]).unwrap();
        let b = Encoding::from_pointers(Arc::new(Domain::new(vec![3, 4])), vec![4, 3]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = crossover(&a, &b, &mut rng).unwrap_err();
        assert_eq!(err, Error::DomainOrderMismatch { len: 2 });
        assert!(!err.to_string().contains("expected"));
    }

    #[test]
    fn test_crossover_on_tiny_domain_copies_parents() {
        let domain = Arc::new(Domain::new(vec![1]));
        let a = Encoding::from_pointers(Arc::clone(&domain), vec![5]).unwrap();
        let b = Encoding::from_pointers(domain, vec![6]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let (c1, c2) = crossover(&a, &b, &mut rng).unwrap();
        assert_eq!(c1, a);
        assert_eq!(c2, b);
    }

    #[test]
    fn test_mutate_changes_at_most_one_pointer() {
        let g = Network::from_edges((0..10).flat_map(|i| [(i, (i + 1) % 10), (i, (i + 3) % 10)]));
        let mut rng = StdRng::seed_from_u64(9);
        let pop = initialize_population(&g, 1, &mut rng).unwrap();

        for _ in 0..100 {
            let mutated = mutate(&pop[0], &g, &mut rng);
            mutated.validate(&g).unwrap();
            let changed = pop[0]
                .pointers()
                .iter()
                .zip(mutated.pointers())
                .filter(|(x, y)| x != y)
                .count();
            assert!(changed <= 1);
        }
    }

    #[test]
    fn test_mutate_empty_is_noop() {
        let g = Network::new();
        let mut rng = StdRng::seed_from_u64(0);
        let pop = initialize_population(&g, 1, &mut rng).unwrap();
        assert_eq!(mutate(&pop[0], &g, &mut rng), pop[0]);
    }
}
