//! Vertex -> community assignment.

use crate::graph::{CommunityId, VertexId};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A hard partition of (a subset of) the vertices into communities.
///
/// Community ids carry no meaning beyond equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    assignment: BTreeMap<VertexId, CommunityId>,
}

impl Partition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `v` to community `c`, replacing any previous assignment.
    pub fn assign(&mut self, v: VertexId, c: CommunityId) {
        let _ = self.assignment.insert(v, c);
    }

    /// Community of `v`.
    pub fn get(&self, v: VertexId) -> Option<CommunityId> {
        self.assignment.get(&v).copied()
    }

    /// Number of assigned vertices.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether no vertex is assigned.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// `(vertex, community)` pairs in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, CommunityId)> + '_ {
        self.assignment.iter().map(|(&v, &c)| (v, c))
    }

    /// Members of each community, ascending.
    pub fn communities(&self) -> BTreeMap<CommunityId, Vec<VertexId>> {
        let mut groups: BTreeMap<CommunityId, Vec<VertexId>> = BTreeMap::new();
        for (v, c) in self.iter() {
            groups.entry(c).or_default().push(v);
        }
        groups
    }

    /// Number of distinct communities.
    pub fn community_count(&self) -> usize {
        self.communities().len()
    }

    /// Dense labels for the index space `0..n`.
    ///
    /// Communities are renumbered `0..k` in order of their smallest member.
    /// Indices missing from the partition each get a fresh label of their own.
    pub fn to_labels(&self, n: usize) -> Vec<usize> {
        let mut renumber: HashMap<CommunityId, usize> = HashMap::new();
        let mut next = 0;
        (0..n)
            .map(|v| match self.get(v) {
                Some(c) => *renumber.entry(c).or_insert_with(|| {
                    next += 1;
                    next - 1
                }),
                None => {
                    next += 1;
                    next - 1
                }
            })
            .collect()
    }
}

impl FromIterator<(VertexId, CommunityId)> for Partition {
    fn from_iter<I: IntoIterator<Item = (VertexId, CommunityId)>>(iter: I) -> Self {
        Self {
            assignment: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_communities_group_members() {
        let p: Partition = [(1, 10), (2, 10), (3, 4), (5, 10)].into_iter().collect();
        let groups = p.communities();
        assert_eq!(groups[&10], vec![1, 2, 5]);
        assert_eq!(groups[&4], vec![3]);
        assert_eq!(p.community_count(), 2);
    }

    #[test]
    fn test_to_labels_is_dense() {
        let p: Partition = [(0, 7), (1, 7), (3, 2)].into_iter().collect();
        // index 2 is unassigned and gets its own label
        assert_eq!(p.to_labels(4), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_assign_replaces() {
        let mut p = Partition::new();
        p.assign(1, 1);
        p.assign(1, 3);
        assert_eq!(p.get(1), Some(3));
        assert_eq!(p.len(), 1);
    }
}
