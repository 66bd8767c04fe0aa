//! Center-of-gravity estimators and location scoring.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::distance::DistanceMethod;
use crate::models::{GeoPoint, Node};

/// Transport cost per kilometre per unit of demand weight used when
/// scoring a location.
pub const COST_PER_KM_UNIT: f64 = 10.0;

/// Nodes whose coordinates can take part in a centroid computation.
fn usable(nodes: &[Node]) -> impl Iterator<Item = &Node> {
    nodes.iter().filter(|n| {
        let ok = n.latitude.is_finite() && n.longitude.is_finite();
        if !ok {
            warn!(node = %n.id, "skipping node with non-finite coordinates");
        }
        ok
    })
}

/// Weighted mean of node coordinates, computed independently per axis.
///
/// Returns `(0, 0)` when no node has finite coordinates. Weights fall back
/// to 1 per node when absent or zero (see [`Node::effective_weight`]).
///
/// # Examples
///
/// ```
/// use sc_optim::facility::weighted_mean;
/// use sc_optim::models::{Node, NodeKind};
///
/// let nodes = vec![
///     Node::new("a", NodeKind::Customer, 0.0, 0.0),
///     Node::new("b", NodeKind::Customer, 0.0, 2.0),
///     Node::new("c", NodeKind::Customer, 0.0, 4.0),
/// ];
/// let cog = weighted_mean(&nodes);
/// assert!((cog.latitude - 0.0).abs() < 1e-12);
/// assert!((cog.longitude - 2.0).abs() < 1e-12);
/// ```
pub fn weighted_mean(nodes: &[Node]) -> GeoPoint {
    let mut total_weight = 0.0;
    let mut lat = 0.0;
    let mut lng = 0.0;

    for node in usable(nodes) {
        let w = node.effective_weight();
        total_weight += w;
        lat += node.latitude * w;
        lng += node.longitude * w;
    }

    if total_weight <= 0.0 {
        return GeoPoint::default();
    }
    GeoPoint::new(lat / total_weight, lng / total_weight)
}

/// Relative slack when comparing the running weight against half the total.
const MEDIAN_HALF_TOLERANCE: f64 = 1e-9;

/// Per-axis weighted median.
///
/// Latitude and longitude are each taken from the first node, in sorted
/// order along that axis, at which the running weight reaches half of the
/// total, up to rounding. The result is unchanged when every weight is
/// scaled by the same positive factor. This is not the 2-D geometric median; see [`weiszfeld_median`]
/// for that.
pub fn weighted_median(nodes: &[Node]) -> GeoPoint {
    let points: Vec<(f64, f64, f64)> = usable(nodes)
        .map(|n| (n.latitude, n.longitude, n.effective_weight()))
        .collect();
    if points.is_empty() {
        return GeoPoint::default();
    }

    let half = points.iter().map(|p| p.2).sum::<f64>() / 2.0;
    let threshold = half * (1.0 - MEDIAN_HALF_TOLERANCE);
    let axis_median = |key: fn(&(f64, f64, f64)) -> f64| -> f64 {
        let mut sorted = points.clone();
        sorted.sort_by(|a, b| key(a).total_cmp(&key(b)));
        let mut running = 0.0;
        for p in &sorted {
            running += p.2;
            if running >= threshold {
                return key(p);
            }
        }
        // Rounding left the running sum just short of the threshold.
        sorted.last().map(key).unwrap_or_default()
    };

    GeoPoint::new(axis_median(|p| p.0), axis_median(|p| p.1))
}

const WEISZFELD_MAX_ITERATIONS: usize = 100;
const WEISZFELD_TOLERANCE: f64 = 1e-6;

/// Weighted geometric median by Weiszfeld iteration, seeded at the
/// weighted mean.
///
/// Points closer than the tolerance to the current estimate are left out of
/// an update step.
pub fn weiszfeld_median(nodes: &[Node], method: DistanceMethod) -> GeoPoint {
    let mut current = weighted_mean(nodes);
    let points: Vec<&Node> = usable(nodes).collect();
    if points.is_empty() {
        return current;
    }

    for _ in 0..WEISZFELD_MAX_ITERATIONS {
        let mut num_lat = 0.0;
        let mut num_lng = 0.0;
        let mut denom = 0.0;

        for node in &points {
            let d = method.distance(GeoPoint::from(*node), current);
            if d > WEISZFELD_TOLERANCE {
                let w = node.effective_weight() / d;
                num_lat += node.latitude * w;
                num_lng += node.longitude * w;
                denom += w;
            }
        }

        if denom == 0.0 {
            break;
        }

        let next = GeoPoint::new(num_lat / denom, num_lng / denom);
        let converged = (next.latitude - current.latitude).abs() < WEISZFELD_TOLERANCE
            && (next.longitude - current.longitude).abs() < WEISZFELD_TOLERANCE;
        current = next;
        if converged {
            break;
        }
    }

    current
}

/// Sum of demand weight times distance from `point` to every node.
pub fn total_weighted_distance(nodes: &[Node], point: GeoPoint, method: DistanceMethod) -> f64 {
    usable(nodes)
        .map(|n| n.effective_weight() * method.distance(GeoPoint::from(n), point))
        .sum()
}

/// Summary scores for a candidate facility location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetrics {
    /// Unweighted sum of distances to all demand points (km).
    pub total_distance: f64,
    /// Σ distance · weight · [`COST_PER_KM_UNIT`].
    pub total_cost: f64,
    /// `max(0, 100 − cost / (Σweight · 1000) · 100)`.
    pub efficiency_score: f64,
}

/// Scores `point` as a facility serving `nodes`.
pub fn location_metrics(nodes: &[Node], point: GeoPoint, method: DistanceMethod) -> LocationMetrics {
    let mut total_distance = 0.0;
    let mut total_cost = 0.0;
    let mut total_weight = 0.0;

    for node in usable(nodes) {
        let d = method.distance(GeoPoint::from(node), point);
        let w = node.effective_weight();
        total_distance += d;
        total_cost += d * w * COST_PER_KM_UNIT;
        total_weight += w;
    }

    let efficiency_score = if total_weight > 0.0 {
        (100.0 - total_cost / (total_weight * 1000.0) * 100.0).max(0.0)
    } else {
        0.0
    };

    LocationMetrics {
        total_distance,
        total_cost,
        efficiency_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn node(id: &str, lat: f64, lng: f64, w: f64) -> Node {
        Node::new(id, NodeKind::Customer, lat, lng).with_weight(w)
    }

    #[test]
    fn test_mean_empty_is_origin() {
        assert_eq!(weighted_mean(&[]), GeoPoint::new(0.0, 0.0));
        assert_eq!(weighted_median(&[]), GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_mean_single_node() {
        let p = weighted_mean(&[node("a", -1.3, 36.8, 17.0)]);
        assert_eq!(p, GeoPoint::new(-1.3, 36.8));
    }

    #[test]
    fn test_mean_weighted() {
        let p = weighted_mean(&[node("a", 0.0, 0.0, 3.0), node("b", 4.0, 8.0, 1.0)]);
        assert!((p.latitude - 1.0).abs() < 1e-12);
        assert!((p.longitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_zero_weights_fall_back_to_unweighted() {
        let p = weighted_mean(&[node("a", 0.0, 0.0, 0.0), node("b", 2.0, 2.0, 0.0)]);
        assert_eq!(p, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_mean_skips_non_finite() {
        let p = weighted_mean(&[node("a", f64::NAN, 0.0, 1.0), node("b", 2.0, 4.0, 1.0)]);
        assert_eq!(p, GeoPoint::new(2.0, 4.0));
    }

    #[test]
    fn test_median_per_axis() {
        // Heavy node pulls latitude; longitude median comes from a different node.
        let nodes = vec![
            node("a", 0.0, 10.0, 5.0),
            node("b", 1.0, 0.0, 1.0),
            node("c", 2.0, 5.0, 1.0),
        ];
        let p = weighted_median(&nodes);
        assert_eq!(p.latitude, 0.0);
        assert_eq!(p.longitude, 10.0);
    }

    #[test]
    fn test_median_stable_under_inexact_scaling() {
        let base = [(1.0, 2.0), (2.0, 3.0), (3.0, 5.0)];
        let nodes: Vec<Node> = base.iter().map(|&(x, w)| node("n", 0.0, x, w)).collect();
        // 0.7 * 2 + 0.7 * 3 rounds just below half of the scaled total.
        let scaled: Vec<Node> = base.iter().map(|&(x, w)| node("n", 0.0, x, w * 0.7)).collect();
        assert_eq!(weighted_median(&nodes).longitude, 2.0);
        assert_eq!(weighted_median(&scaled), weighted_median(&nodes));

        let weights = [1.0, 5.0, 2.0, 4.0];
        let nodes: Vec<Node> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| node("n", i as f64, 2.0, w))
            .collect();
        let tenth: Vec<Node> = nodes
            .iter()
            .map(|n| n.clone().with_weight(n.effective_weight() * 0.1))
            .collect();
        assert_eq!(weighted_median(&tenth), weighted_median(&nodes));
    }

    #[test]
    fn test_median_equal_weights() {
        let nodes = vec![
            node("a", 3.0, 1.0, 1.0),
            node("b", 1.0, 3.0, 1.0),
            node("c", 2.0, 2.0, 1.0),
        ];
        assert_eq!(weighted_median(&nodes), GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_weiszfeld_not_worse_than_mean() {
        let nodes = vec![
            node("a", 0.0, 0.0, 1.0),
            node("b", 0.0, 1.0, 1.0),
            node("c", 1.0, 0.0, 1.0),
            node("d", 5.0, 5.0, 1.0),
        ];
        let method = DistanceMethod::Euclidean;
        let mean = weighted_mean(&nodes);
        let gm = weiszfeld_median(&nodes, method);
        assert!(
            total_weighted_distance(&nodes, gm, method)
                <= total_weighted_distance(&nodes, mean, method) + 1e-9
        );
    }

    #[test]
    fn test_location_metrics() {
        let nodes = vec![node("a", 0.0, 1.0, 2.0)];
        let m = location_metrics(&nodes, GeoPoint::new(0.0, 0.0), DistanceMethod::Manhattan);
        assert!((m.total_distance - 111.0).abs() < 1e-9);
        assert!((m.total_cost - 2220.0).abs() < 1e-9);
        // 100 - 2220 / 2000 * 100 < 0
        assert_eq!(m.efficiency_score, 0.0);

        let m = location_metrics(&nodes, GeoPoint::new(0.0, 1.0), DistanceMethod::Manhattan);
        assert_eq!(m.efficiency_score, 100.0);
    }
}
