//! Newman-Girvan modularity.
//!
//! ```text
//! Q = Σ_s [ l_s / m - γ (d_s / 2m)² ]
//! ```
//!
//! - m   = number of edges (half the degree sum of the whole network)
//! - l_s = edges with both endpoints in community s
//! - d_s = sum of degrees of the vertices in community s
//! - γ   = resolution (1 for standard modularity)
//!
//! Vertices missing from the partition contribute to no community, but their
//! degree still counts toward m.

use super::partition::Partition;
use crate::graph::{CommunityId, Network};
use std::collections::BTreeMap;

/// Standard modularity (γ = 1) of `partition` on `network`.
///
/// Returns 0 for a network without edges.
pub fn modularity(network: &Network, partition: &Partition) -> f64 {
    modularity_with_resolution(network, partition, 1.0)
}

/// Modularity with resolution parameter `resolution`.
///
/// Higher values reward smaller communities.
pub fn modularity_with_resolution(
    network: &Network,
    partition: &Partition,
    resolution: f64,
) -> f64 {
    let m = network.degree_sum() as f64 / 2.0;
    if m == 0.0 {
        return 0.0;
    }

    // community -> (internal endpoint count, degree sum)
    let mut stats: BTreeMap<CommunityId, (usize, usize)> = BTreeMap::new();
    for (v, c) in partition.iter() {
        let neighbors = network.neighbors(v);
        let internal = neighbors
            .iter()
            .filter(|&&u| partition.get(u) == Some(c))
            .count();
        let entry = stats.entry(c).or_insert((0, 0));
        entry.0 += internal;
        entry.1 += neighbors.len();
    }

    stats
        .values()
        .map(|&(internal, degree)| {
            // each internal edge was seen from both endpoints
            let l_s = internal as f64 / 2.0;
            let d_s = degree as f64;
            l_s / m - resolution * (d_s / (2.0 * m)).powi(2)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(pairs: &[(usize, usize)]) -> Partition {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_two_disjoint_edges() {
        let g = Network::from_edges([(1, 2), (3, 4)]);
        let p = partition(&[(1, 1), (2, 1), (3, 2), (4, 2)]);
        assert!((modularity(&g, &p) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_community_is_zero() {
        let g = Network::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)]);
        let p = partition(&[(1, 1), (2, 1), (3, 1), (4, 1)]);
        assert!(modularity(&g, &p).abs() < 1e-12);
    }

    #[test]
    fn test_singletons_on_four_cycle() {
        // every community: l_s = 0, d_s = 2, m = 4 -> 4 * -(2/8)^2
        let g = Network::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)]);
        let p = partition(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert!((modularity(&g, &p) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_no_edges_is_zero() {
        let mut g = Network::new();
        g.add_vertex(1);
        g.add_vertex(2);
        let p = partition(&[(1, 1), (2, 2)]);
        assert_eq!(modularity(&g, &p), 0.0);
        assert_eq!(modularity(&Network::new(), &Partition::new()), 0.0);
    }

    #[test]
    fn test_unassigned_vertices_still_count_toward_m() {
        let g = Network::from_edges([(1, 2), (3, 4)]);
        let p = partition(&[(1, 1), (2, 1)]);
        // l = 1, d = 2, m = 2 -> 1/2 - (2/4)^2
        assert!((modularity(&g, &p) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_two_triangles_with_bridge() {
        let g = Network::from_edges([(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]);
        let p = partition(&[(0, 0), (1, 0), (2, 0), (3, 1), (4, 1), (5, 1)]);
        // m = 7, each side: l = 3, d = 7 -> 2 * (3/7 - 1/4)
        let expected = 2.0 * (3.0 / 7.0 - 0.25);
        assert!((modularity(&g, &p) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_scales_penalty() {
        let g = Network::from_edges([(1, 2), (3, 4)]);
        let p = partition(&[(1, 1), (2, 1), (3, 2), (4, 2)]);
        // 2 * (1/2 - 2 * (2/4)^2)
        assert!(modularity_with_resolution(&g, &p, 2.0).abs() < 1e-12);
        // 2 * (1/2 - 0.5 * (2/4)^2)
        assert!((modularity_with_resolution(&g, &p, 0.5) - 0.75).abs() < 1e-12);
        assert_eq!(
            modularity_with_resolution(&g, &p, 1.0),
            modularity(&g, &p)
        );
    }
}
