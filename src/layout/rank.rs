//! Layer assignment.
//!
//! Ranks derive from topological depth with the longest-path convention:
//! every edge that survives cycle breaking points from a lower rank to a
//! strictly higher rank. Back edges reported by the classification pass are
//! skipped, so cyclic input still yields a terminating, deterministic
//! layering instead of an error.

use std::collections::HashSet;

use crate::graph::Traversal;

/// Assigns a rank to every node, indexed by arena index.
pub(crate) fn assign_ranks(adjacency: &[Vec<usize>], traversal: &Traversal) -> Vec<usize> {
    let mut ranks = vec![0usize; adjacency.len()];
    let back_edges: HashSet<(usize, usize)> = traversal.back_edges.iter().copied().collect();

    // Reverse postorder is a topological order of the cycle-broken graph, so
    // a single relaxation sweep computes the longest path from any source.
    for &node in traversal.postorder.iter().rev() {
        for &successor in &adjacency[node] {
            if back_edges.contains(&(node, successor)) {
                continue;
            }
            ranks[successor] = ranks[successor].max(ranks[node] + 1);
        }
    }

    ranks
}
