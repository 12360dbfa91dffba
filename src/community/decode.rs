//! Encoding -> partition decoder.
//!
//! ## Chain discovery
//!
//! The encoding is read as a "points-to" graph over its own domain. Starting
//! from each unvisited vertex (in canonical order) a breadth-first walk follows
//! pointer edges; every vertex reached joins the walk's community. A walk stops
//! when the pointer leaves the domain or lands on a visited vertex, so a chain
//! that runs into an earlier community stays separate from it.
//!
//! ## Small-community absorption
//!
//! Communities with fewer than `min_size` members are dissolved. Each of their
//! vertices moves to the community of its pointer target when that target sits
//! in a retained (large) community, and otherwise keeps its original id.
//! Absorption looks only at the frozen large-community map, never at other
//! absorption decisions, so the order small vertices are processed in has no
//! effect on the result.

use super::encoding::Encoding;
use super::partition::Partition;
use crate::graph::CommunityId;
use std::collections::VecDeque;

/// Communities smaller than this are dissolved into their pointer targets' communities.
pub const MIN_COMMUNITY_SIZE: usize = 5;

/// Decode with the default absorption threshold ([`MIN_COMMUNITY_SIZE`]).
pub fn decode(encoding: &Encoding) -> Partition {
    decode_with_min_size(encoding, MIN_COMMUNITY_SIZE)
}

/// Decode, dissolving communities with fewer than `min_size` members.
///
/// Community ids are `1, 2, 3, ...` in discovery order.
pub fn decode_with_min_size(encoding: &Encoding, min_size: usize) -> Partition {
    let labels = discover_chains(encoding);
    let n = labels.len();
    if n == 0 {
        return Partition::new();
    }

    let n_communities = labels.iter().copied().max().unwrap_or(0);
    let mut sizes = vec![0usize; n_communities + 1];
    for &c in &labels {
        sizes[c] += 1;
    }

    let domain = encoding.domain();
    let pointers = encoding.pointers();
    let is_large = |c: CommunityId| sizes[c] >= min_size;

    domain
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let own = labels[i];
            if is_large(own) {
                return (v, own);
            }
            let absorbed = domain
                .position(pointers[i])
                .map(|j| labels[j])
                .filter(|&target| is_large(target));
            (v, absorbed.unwrap_or(own))
        })
        .collect()
}

/// Label each domain position with its pointer-chain community (1-based).
fn discover_chains(encoding: &Encoding) -> Vec<CommunityId> {
    let domain = encoding.domain();
    let pointers = encoding.pointers();
    let n = pointers.len();

    // 0 = unvisited
    let mut labels = vec![0; n];
    let mut next_id = 0;
    let mut queue = VecDeque::new();

    for start in 0..n {
        if labels[start] != 0 {
            continue;
        }
        next_id += 1;
        labels[start] = next_id;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if let Some(target) = domain.position(pointers[current]) {
                if labels[target] == 0 {
                    labels[target] = next_id;
                    queue.push_back(target);
                }
            }
        }
    }

    labels
}
