//! Flow totals and node utilization over a routed network.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Node, Route};

/// Utilization above which a node is reported as a bottleneck.
pub const BOTTLENECK_UTILIZATION: f64 = 0.8;

/// A node whose throughput exceeds [`BOTTLENECK_UTILIZATION`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub node_id: String,
    pub utilization: f64,
}

/// Aggregate flow statistics of a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    /// Sum of route volumes.
    pub total_flow: f64,
    /// Sum of `volume * cost`.
    pub total_cost: f64,
    /// Mean node utilization.
    pub average_utilization: f64,
    /// Bottleneck nodes, most utilized first.
    pub bottlenecks: Vec<Bottleneck>,
}

impl NetworkMetrics {
    /// Computes flow totals and per-node utilization.
    ///
    /// A node's utilization is `(inflow + outflow) / (2 * capacity)`, with
    /// nodes lacking a capacity treated as 1000. Routes touching unknown
    /// nodes still count toward the totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use sc_optim::models::{Node, NodeKind, Route};
    /// use sc_optim::network::NetworkMetrics;
    ///
    /// let nodes = vec![
    ///     Node::new("a", NodeKind::Warehouse, 0.0, 0.0).with_capacity(100.0),
    ///     Node::new("b", NodeKind::Retail, 0.0, 1.0).with_capacity(100.0),
    /// ];
    /// let routes = vec![Route::new("ab", "a", "b").with_volume(90.0).with_cost(2.0)];
    /// let m = NetworkMetrics::compute(&nodes, &routes);
    /// assert_eq!(m.total_flow, 90.0);
    /// assert_eq!(m.total_cost, 180.0);
    /// assert!((m.average_utilization - 0.45).abs() < 1e-12);
    /// assert!(m.bottlenecks.is_empty());
    /// ```
    pub fn compute(nodes: &[Node], routes: &[Route]) -> Self {
        let mut throughput: HashMap<&str, f64> = HashMap::with_capacity(nodes.len());
        let mut total_flow = 0.0;
        let mut total_cost = 0.0;
        for route in routes {
            total_flow += route.volume;
            total_cost += route.flow_cost();
            *throughput.entry(route.from.as_str()).or_default() += route.volume;
            *throughput.entry(route.to.as_str()).or_default() += route.volume;
        }

        let mut utilization_sum = 0.0;
        let mut bottlenecks = Vec::new();
        for node in nodes {
            let flow = throughput.get(node.id.as_str()).copied().unwrap_or(0.0);
            let utilization = flow / (2.0 * node.effective_capacity());
            utilization_sum += utilization;
            if utilization > BOTTLENECK_UTILIZATION {
                bottlenecks.push(Bottleneck {
                    node_id: node.id.clone(),
                    utilization,
                });
            }
        }
        bottlenecks.sort_by(|a, b| b.utilization.total_cmp(&a.utilization));

        Self {
            total_flow,
            total_cost,
            average_utilization: utilization_sum / nodes.len().max(1) as f64,
            bottlenecks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    #[test]
    fn test_empty_network() {
        let m = NetworkMetrics::compute(&[], &[]);
        assert_eq!(m.total_flow, 0.0);
        assert_eq!(m.average_utilization, 0.0);
        assert!(m.bottlenecks.is_empty());
    }

    #[test]
    fn test_bottleneck_detection() {
        let nodes = vec![
            Node::new("hub", NodeKind::Distribution, 0.0, 0.0).with_capacity(100.0),
            Node::new("a", NodeKind::Retail, 0.0, 1.0),
            Node::new("b", NodeKind::Retail, 0.0, 2.0),
        ];
        let routes = vec![
            Route::new("h-a", "hub", "a").with_volume(90.0).with_cost(1.0),
            Route::new("h-b", "hub", "b").with_volume(90.0).with_cost(3.0),
        ];
        let m = NetworkMetrics::compute(&nodes, &routes);
        assert_eq!(m.total_flow, 180.0);
        assert_eq!(m.total_cost, 360.0);
        // hub: 180 / 200 = 0.9; a and b: 90 / 2000 = 0.045 each
        assert_eq!(m.bottlenecks.len(), 1);
        assert_eq!(m.bottlenecks[0].node_id, "hub");
        assert!((m.bottlenecks[0].utilization - 0.9).abs() < 1e-12);
        assert!((m.average_utilization - (0.9 + 0.09) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_camel_case() {
        let m = NetworkMetrics::compute(&[], &[]);
        let json = serde_json::to_value(&m).expect("serialize");
        assert!(json.get("averageUtilization").is_some());
        assert!(json.get("totalFlow").is_some());
    }
}
