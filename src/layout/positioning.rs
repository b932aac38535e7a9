//! Coordinate assignment for ordered layers.
//!
//! Rank maps to the horizontal axis (drawing direction is left-to-right),
//! within-layer order to the vertical axis. Spacing comes from the fixed
//! node footprint plus the configured gaps, so footprints never overlap.
//! Each layer is centered against the tallest one. Positions are the
//! top-left corner of the footprint.

use crate::{config::LayoutOptions, geometry::Point};

/// Computes a position for every node, indexed by arena index.
pub(crate) fn assign_positions(
    layers: &[Vec<usize>],
    node_count: usize,
    options: &LayoutOptions,
) -> Vec<Point> {
    let mut positions = vec![Point::default(); node_count];

    let vertical_step = options.node_height + options.node_spacing;
    let horizontal_step = options.node_width + options.rank_spacing;

    let layer_height = |count: usize| -> f32 {
        if count == 0 {
            0.0
        } else {
            count as f32 * options.node_height + (count - 1) as f32 * options.node_spacing
        }
    };
    let max_height = layers
        .iter()
        .map(|layer| layer_height(layer.len()))
        .fold(0.0f32, f32::max);

    for (rank, layer) in layers.iter().enumerate() {
        let x = options.margin + rank as f32 * horizontal_step;
        let start_y = options.margin + (max_height - layer_height(layer.len())) / 2.0;

        for (order, &node) in layer.iter().enumerate() {
            positions[node] = Point::new(x, start_y + order as f32 * vertical_step);
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn options() -> LayoutOptions {
        LayoutOptions::default()
    }

    #[test]
    fn test_ranks_advance_horizontally() {
        let layers = vec![vec![0], vec![1]];
        let positions = assign_positions(&layers, 2, &options());

        assert!(positions[0].x() < positions[1].x());
        // One footprint plus one rank gap apart.
        assert!(approx_eq!(
            f32,
            positions[1].x() - positions[0].x(),
            172.0 + 50.0
        ));
    }

    #[test]
    fn test_nodes_in_a_layer_stack_vertically() {
        let layers = vec![vec![0], vec![1, 2]];
        let positions = assign_positions(&layers, 3, &options());

        assert!(approx_eq!(f32, positions[1].x(), positions[2].x()));
        assert!(approx_eq!(
            f32,
            positions[2].y() - positions[1].y(),
            36.0 + 50.0
        ));
    }

    #[test]
    fn test_single_node_layer_is_centered_against_tallest() {
        let layers = vec![vec![0], vec![1, 2]];
        let positions = assign_positions(&layers, 3, &options());

        // Tallest layer spans 2 * 36 + 50 = 122; the lone node sits in its
        // vertical middle.
        let expected = 20.0 + (122.0 - 36.0) / 2.0;
        assert!(approx_eq!(f32, positions[0].y(), expected));
    }

    #[test]
    fn test_margin_offsets_origin() {
        let layers = vec![vec![0]];
        let positions = assign_positions(&layers, 1, &options());

        assert!(approx_eq!(f32, positions[0].x(), 20.0));
        assert!(approx_eq!(f32, positions[0].y(), 20.0));
    }

    #[test]
    fn test_empty_input() {
        let positions = assign_positions(&[], 0, &options());
        assert!(positions.is_empty());
    }
}
