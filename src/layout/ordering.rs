//! Within-layer ordering via the barycenter heuristic.
//!
//! Alternating downward/upward sweeps pull each node toward the average
//! order of its neighbors in the fixed adjacent layer. The sort is stable
//! and nodes without neighbors keep their current order, so the result is
//! deterministic for a given snapshot. Exact crossing minimization is not
//! attempted.

use std::cmp::Ordering;

/// Groups nodes into layers by rank, in insertion order within each layer.
pub(crate) fn layers_from_ranks(ranks: &[usize]) -> Vec<Vec<usize>> {
    let layer_count = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, &rank) in ranks.iter().enumerate() {
        layers[rank].push(node);
    }
    layers
}

/// Inverts successor lists into predecessor lists.
pub(crate) fn predecessor_lists(successors: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); successors.len()];
    for (node, targets) in successors.iter().enumerate() {
        for &target in targets {
            predecessors[target].push(node);
        }
    }
    predecessors
}

/// Reorders every layer in place through `iterations` barycenter sweeps.
pub(crate) fn order_layers(
    layers: &mut [Vec<usize>],
    predecessors: &[Vec<usize>],
    successors: &[Vec<usize>],
    iterations: usize,
) {
    let mut positions = vec![0.0f32; predecessors.len()];
    for layer in layers.iter() {
        for (order, &node) in layer.iter().enumerate() {
            positions[node] = order as f32;
        }
    }

    for iteration in 0..iterations {
        let downward = iteration % 2 == 0;
        let sweep: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };

        for layer_idx in sweep {
            let neighbors = if downward { predecessors } else { successors };

            let mut keyed: Vec<(usize, f32)> = layers[layer_idx]
                .iter()
                .map(|&node| {
                    let adjacent = &neighbors[node];
                    let barycenter = if adjacent.is_empty() {
                        positions[node]
                    } else {
                        adjacent.iter().map(|&n| positions[n]).sum::<f32>()
                            / adjacent.len() as f32
                    };
                    (node, barycenter)
                })
                .collect();

            keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

            for (order, &(node, _)) in keyed.iter().enumerate() {
                positions[node] = order as f32;
            }
            layers[layer_idx] = keyed.into_iter().map(|(node, _)| node).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_from_ranks() {
        assert_eq!(
            layers_from_ranks(&[0, 1, 1, 2]),
            vec![vec![0], vec![1, 2], vec![3]]
        );
    }

    #[test]
    fn test_layers_from_ranks_empty() {
        assert!(layers_from_ranks(&[]).is_empty());
    }

    #[test]
    fn test_predecessor_lists() {
        let successors = vec![vec![1, 2], vec![2], vec![]];
        assert_eq!(
            predecessor_lists(&successors),
            vec![vec![], vec![0], vec![0, 1]]
        );
    }

    #[test]
    fn test_ordering_follows_parents() {
        // Layer 0: 0, 1. Layer 1: 2 (child of 1), 3 (child of 0). A single
        // downward sweep swaps the second layer to remove the crossing.
        let successors = vec![vec![3], vec![2], vec![], vec![]];
        let predecessors = predecessor_lists(&successors);
        let mut layers = vec![vec![0, 1], vec![2, 3]];

        order_layers(&mut layers, &predecessors, &successors, 1);

        assert_eq!(layers[1], vec![3, 2]);
    }

    #[test]
    fn test_ordering_is_stable_for_ties() {
        // Both children hang off the same parent; their insertion order is
        // the tie-break and survives any number of sweeps.
        let successors = vec![vec![1, 2], vec![], vec![]];
        let predecessors = predecessor_lists(&successors);
        let mut layers = vec![vec![0], vec![1, 2]];

        order_layers(&mut layers, &predecessors, &successors, 4);

        assert_eq!(layers[1], vec![1, 2]);
    }

    #[test]
    fn test_ordering_noop_for_single_layer() {
        let successors: Vec<Vec<usize>> = vec![vec![], vec![], vec![]];
        let predecessors = predecessor_lists(&successors);
        let mut layers = vec![vec![0, 1, 2]];

        order_layers(&mut layers, &predecessors, &successors, 4);

        assert_eq!(layers, vec![vec![0, 1, 2]]);
    }
}
