//! Dense distance matrix.

use super::DistanceMethod;
use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind};
/// use sc_optim::distance::{DistanceMatrix, DistanceMethod};
///
/// let nodes = vec![
///     Node::new("a", NodeKind::Customer, 0.0, 0.0),
///     Node::new("b", NodeKind::Customer, 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes, DistanceMethod::Manhattan);
/// assert!((dm.get(0, 1) - 111.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes pairwise distances between node coordinates.
    pub fn from_nodes(nodes: &[Node], method: DistanceMethod) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = method.between(
                    nodes[i].latitude,
                    nodes[i].longitude,
                    nodes[j].latitude,
                    nodes[j].longitude,
                );
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Indices within `radius` of `from`, excluding `from` itself.
    pub fn neighbors_within(&self, from: usize, radius: f64) -> Vec<usize> {
        (0..self.size)
            .filter(|&j| j != from && self.get(from, j) <= radius)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new("a", NodeKind::Customer, 0.0, 0.0),
            Node::new("b", NodeKind::Customer, 0.0, 1.0),
            Node::new("c", NodeKind::Customer, 0.0, 5.0),
        ]
    }

    #[test]
    fn test_from_nodes_symmetric_zero_diagonal() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes(), DistanceMethod::Haversine);
        assert_eq!(dm.size(), 3);
        for i in 0..3 {
            assert_eq!(dm.get(i, i), 0.0);
            for j in 0..3 {
                assert!((dm.get(i, j) - dm.get(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_neighbors_within() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes(), DistanceMethod::Manhattan);
        assert_eq!(dm.neighbors_within(0, 120.0), vec![1]);
        assert_eq!(dm.neighbors_within(1, 500.0), vec![0, 2]);
        assert!(dm.neighbors_within(2, 50.0).is_empty());
    }
}
