//! Raw flow metrics over a route set and a volume allocation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::objective::{Objective, ObjectiveMetric};
use crate::models::Route;

/// Metrics of one volume allocation.
///
/// `weighted_sum` is present only when objectives were supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessMetrics {
    pub cost: f64,
    pub volume: f64,
    pub transit_time: f64,
    pub max_volume: f64,
    pub flow_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_sum: Option<f64>,
}

impl FitnessMetrics {
    /// Computes all metrics for `volumes[i]` assigned to `routes[i]`.
    pub fn compute(routes: &[Route], volumes: &[f64], objectives: &[Objective]) -> Self {
        let n = volumes.len();
        let mut cost = 0.0;
        let mut volume = 0.0;
        let mut transit_time = 0.0;
        let mut max_volume: f64 = 0.0;
        for (route, &v) in routes.iter().zip(volumes) {
            cost += v * route.cost;
            volume += v;
            transit_time += v * route.transit_time;
            max_volume = max_volume.max(v);
        }

        let denom = n.max(1) as f64;
        let mean = volume / denom;
        let variance = volumes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / denom;
        let flow_balance = 100.0 / (1.0 + variance.sqrt() / mean.max(1.0));

        let mut metrics = Self {
            cost,
            volume,
            transit_time,
            max_volume,
            flow_balance,
            weighted_sum: None,
        };
        if !objectives.is_empty() {
            let sum = objectives
                .iter()
                .map(|o| o.normalize(metrics.get(o.name)) * o.weight)
                .sum();
            metrics.weighted_sum = Some(sum);
        }
        metrics
    }

    /// Value of a single raw metric.
    pub fn get(&self, metric: ObjectiveMetric) -> f64 {
        match metric {
            ObjectiveMetric::Cost => self.cost,
            ObjectiveMetric::Volume => self.volume,
            ObjectiveMetric::TransitTime => self.transit_time,
            ObjectiveMetric::MaxVolume => self.max_volume,
            ObjectiveMetric::FlowBalance => self.flow_balance,
        }
    }

    /// The metrics keyed by name, plus `weightedSum` when present.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = [
            ObjectiveMetric::Cost,
            ObjectiveMetric::Volume,
            ObjectiveMetric::TransitTime,
            ObjectiveMetric::MaxVolume,
            ObjectiveMetric::FlowBalance,
        ]
        .into_iter()
        .map(|m| (m.key().to_string(), self.get(m)))
        .collect();
        if let Some(ws) = self.weighted_sum {
            map.insert("weightedSum".into(), ws);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("r1", "a", "b").with_cost(2.0).with_transit_time(10.0),
            Route::new("r2", "b", "c").with_cost(3.0).with_transit_time(20.0),
        ]
    }

    #[test]
    fn test_raw_metrics() {
        let m = FitnessMetrics::compute(&routes(), &[10.0, 30.0], &[]);
        assert_eq!(m.cost, 110.0);
        assert_eq!(m.volume, 40.0);
        assert_eq!(m.transit_time, 700.0);
        assert_eq!(m.max_volume, 30.0);
        // mean 20, stddev 10
        assert!((m.flow_balance - 100.0 / 1.5).abs() < 1e-9);
        assert!(m.weighted_sum.is_none());
    }

    #[test]
    fn test_even_flow_is_fully_balanced() {
        let m = FitnessMetrics::compute(&routes(), &[25.0, 25.0], &[]);
        assert!((m.flow_balance - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_allocation_has_no_nan() {
        let m = FitnessMetrics::compute(&[], &[], &[]);
        assert_eq!(m.cost, 0.0);
        assert_eq!(m.max_volume, 0.0);
        assert!(m.flow_balance.is_finite());
    }

    #[test]
    fn test_weighted_sum() {
        let objectives = vec![
            Objective::new(ObjectiveMetric::Cost, 1.0, true),
            Objective::new(ObjectiveMetric::Volume, 0.5, false),
        ];
        let m = FitnessMetrics::compute(&routes(), &[10.0, 30.0], &objectives);
        let expected = 100_000.0 / 111.0 + 0.5 * 40.0;
        assert!((m.weighted_sum.expect("objectives given") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_to_map_keys() {
        let objectives = vec![Objective::new(ObjectiveMetric::FlowBalance, 1.0, false)];
        let map = FitnessMetrics::compute(&routes(), &[10.0, 30.0], &objectives).to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["cost", "flowBalance", "maxVolume", "transitTime", "volume", "weightedSum"]
        );
    }
}
