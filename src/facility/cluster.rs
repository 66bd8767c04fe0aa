//! Density-based grouping of demand points.
//!
//! # Algorithm
//!
//! DBSCAN-style: a node with at least `min_points − 1` neighbors within
//! `epsilon` km (haversine) seeds a cluster. The cluster then absorbs the
//! seed's neighbors, and the neighborhoods of any absorbed node that is
//! itself dense. Sparse absorbed nodes join as border points without
//! being expanded. Nodes that end up in no cluster are noise and are
//! dropped.
//!
//! # Reference
//!
//! Ester, M. et al. (1996). "A density-based algorithm for discovering
//! clusters in large spatial databases with noise", *KDD-96*, 226-231.

use std::collections::VecDeque;

use tracing::debug;

use super::centroid::weighted_mean;
use crate::distance::{DistanceMatrix, DistanceMethod};
use crate::models::{Node, NodeKind};

/// Default neighborhood radius in kilometres.
pub const DEFAULT_EPSILON_KM: f64 = 50.0;

/// Default minimum cluster size (seed included).
pub const DEFAULT_MIN_POINTS: usize = 3;

/// Groups node indices into density clusters.
///
/// Each node appears in at most one cluster. Noise indices are omitted.
pub fn cluster_indices(nodes: &[Node], epsilon_km: f64, min_points: usize) -> Vec<Vec<usize>> {
    let n = nodes.len();
    let dm = DistanceMatrix::from_nodes(nodes, DistanceMethod::Haversine);
    let is_dense = |neighbors: &[usize]| neighbors.len() + 1 >= min_points;

    let mut visited = vec![false; n];
    let mut assigned = vec![false; n];
    let mut clusters = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let neighbors = dm.neighbors_within(seed, epsilon_km);
        if !is_dense(&neighbors) {
            continue;
        }

        let mut cluster = vec![seed];
        assigned[seed] = true;

        let mut queued = vec![false; n];
        queued[seed] = true;
        let mut queue = VecDeque::with_capacity(neighbors.len());
        for j in neighbors {
            queued[j] = true;
            queue.push_back(j);
        }

        while let Some(j) = queue.pop_front() {
            if !visited[j] {
                visited[j] = true;
                let reach = dm.neighbors_within(j, epsilon_km);
                if is_dense(&reach) {
                    for k in reach {
                        if !queued[k] {
                            queued[k] = true;
                            queue.push_back(k);
                        }
                    }
                }
            }
            if !assigned[j] {
                assigned[j] = true;
                cluster.push(j);
            }
        }

        clusters.push(cluster);
    }

    debug!(
        nodes = n,
        clusters = clusters.len(),
        noise = assigned.iter().filter(|a| !**a).count(),
        "clustered demand points"
    );
    clusters
}

/// Groups demand nodes into density clusters, dropping noise.
///
/// # Examples
///
/// ```
/// use sc_optim::facility::cluster_demand_points;
/// use sc_optim::models::{Node, NodeKind};
///
/// let nodes = vec![
///     Node::new("a", NodeKind::Customer, 0.00, 0.00),
///     Node::new("b", NodeKind::Customer, 0.05, 0.00),
///     Node::new("c", NodeKind::Customer, 0.00, 0.05),
///     Node::new("far", NodeKind::Customer, 4.50, 0.00),
/// ];
/// let clusters = cluster_demand_points(&nodes, 50.0, 3);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].len(), 3);
/// ```
pub fn cluster_demand_points(nodes: &[Node], epsilon_km: f64, min_points: usize) -> Vec<Vec<Node>> {
    cluster_indices(nodes, epsilon_km, min_points)
        .into_iter()
        .map(|idx| idx.into_iter().map(|i| nodes[i].clone()).collect())
        .collect()
}

/// Places one warehouse at the weighted mean of each cluster.
///
/// Facility ids are `optimal-{cluster index}`.
pub fn optimize_cluster_locations(clusters: &[Vec<Node>]) -> Vec<Node> {
    clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            let p = weighted_mean(cluster);
            Node::new(format!("optimal-{i}"), NodeKind::Warehouse, p.latitude, p.longitude)
                .with_name(format!(
                    "Optimal Facility for Cluster ({} points)",
                    cluster.len()
                ))
        })
        .collect()
}
