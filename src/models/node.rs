//! Network node and time window types.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// Role of a node in the supply network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Depot,
    #[default]
    Customer,
    Warehouse,
    Distribution,
    Retail,
    Supplier,
    Port,
    Airport,
    #[serde(alias = "rail_hub")]
    RailHub,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Returns `true` for kinds a tour may start from.
    pub fn is_depot_like(self) -> bool {
        matches!(self, NodeKind::Depot | NodeKind::Warehouse | NodeKind::Distribution)
    }

    /// Returns `true` for kinds that receive deliveries on a tour.
    pub fn is_customer_like(self) -> bool {
        matches!(self, NodeKind::Customer | NodeKind::Retail)
    }
}

/// Access restrictions enforced on vehicles entering a node.
///
/// A limit of zero is treated as "no limit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restrictions {
    pub height_limit: Option<f64>,
    pub weight_limit: Option<f64>,
    pub width_limit: Option<f64>,
    pub environmental_zone: bool,
    pub permit_required: bool,
}

/// Optional per-node attributes used by the route planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetadata {
    pub restrictions: Option<Restrictions>,
    pub traffic_factor: Option<f64>,
    pub toll_cost: Option<f64>,
}

/// A facility, customer, or hub in the supply network.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind};
///
/// let n = Node::new("nbo", NodeKind::Warehouse, -1.29, 36.82).with_weight(4.0);
/// assert_eq!(n.effective_weight(), 4.0);
/// assert_eq!(Node::new("x", NodeKind::Customer, 0.0, 0.0).effective_weight(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub metadata: Option<NodeMetadata>,
}

impl Node {
    /// Creates a node with no weight, capacity, or metadata.
    pub fn new(id: impl Into<String>, kind: NodeKind, latitude: f64, longitude: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            latitude,
            longitude,
            weight: None,
            capacity: None,
            metadata: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Demand weight, falling back to 1 when absent, zero, or non-finite.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }

    /// Node capacity, falling back to 1000 when absent or non-positive.
    pub fn effective_capacity(&self) -> f64 {
        match self.capacity {
            Some(c) if c.is_finite() && c > 0.0 => c,
            _ => 1000.0,
        }
    }

    /// The restriction block, if any.
    pub fn restrictions(&self) -> Option<&Restrictions> {
        self.metadata.as_ref().and_then(|m| m.restrictions.as_ref())
    }

    /// Traffic slowdown factor leaving this node (1.0 when unset).
    pub fn traffic_factor(&self) -> f64 {
        match self.metadata.as_ref().and_then(|m| m.traffic_factor) {
            Some(f) if f.is_finite() && f > 0.0 => f,
            _ => 1.0,
        }
    }

    /// Toll charged at this node (0 when unset).
    pub fn toll_cost(&self) -> f64 {
        match self.metadata.as_ref().and_then(|m| m.toll_cost) {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => 0.0,
        }
    }

    /// Checks the coordinate and weight invariants.
    pub fn validate(&self) -> Result<(), OptimError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(OptimError::InvalidNode {
                id: self.id.clone(),
                reason: "coordinates must be finite".into(),
            });
        }
        if let Some(w) = self.weight {
            if w.is_nan() || w < 0.0 {
                return Err(OptimError::InvalidNode {
                    id: self.id.clone(),
                    reason: format!("weight must be non-negative, got {w}"),
                });
            }
        }
        Ok(())
    }
}

/// An arrival window at a node, in minutes from tour start.
///
/// The vehicle may arrive early and wait until `earliest_arrival`; arriving
/// after `latest_arrival` makes the tour infeasible.
///
/// # Examples
///
/// ```
/// use sc_optim::models::TimeWindow;
///
/// let tw = TimeWindow::new("c1", 5.0, 10.0).unwrap();
/// assert!(tw.contains(7.0));
/// assert!(tw.is_violated(12.0));
/// assert!(TimeWindow::new("c1", 10.0, 5.0).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub node_id: String,
    pub earliest_arrival: f64,
    pub latest_arrival: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(node_id: impl Into<String>, earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self {
            node_id: node_id.into(),
            earliest_arrival: earliest,
            latest_arrival: latest,
        })
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest_arrival && time <= self.latest_arrival
    }

    /// Waiting time if arriving at `arrival` (0 if on time or late).
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        (self.earliest_arrival - arrival).max(0.0)
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.latest_arrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new("a", 20.0, 10.0).is_none());
        assert!(TimeWindow::new("a", f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new("a", 10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new("a", 10.0, 20.0).expect("valid");
        assert!((tw.waiting_time(5.0) - 5.0).abs() < 1e-10);
        assert_eq!(tw.waiting_time(15.0), 0.0);
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_effective_weight_fallbacks() {
        let base = Node::new("a", NodeKind::Customer, 0.0, 0.0);
        assert_eq!(base.effective_weight(), 1.0);
        assert_eq!(base.clone().with_weight(0.0).effective_weight(), 1.0);
        assert_eq!(base.clone().with_weight(f64::NAN).effective_weight(), 1.0);
        assert_eq!(base.with_weight(2.5).effective_weight(), 2.5);
    }

    #[test]
    fn test_metadata_defaults() {
        let n = Node::new("a", NodeKind::Retail, 0.0, 0.0);
        assert_eq!(n.traffic_factor(), 1.0);
        assert_eq!(n.toll_cost(), 0.0);
        assert!(n.restrictions().is_none());
        assert_eq!(n.effective_capacity(), 1000.0);
    }

    #[test]
    fn test_validate() {
        assert!(Node::new("a", NodeKind::Customer, 1.0, 2.0).validate().is_ok());
        assert!(Node::new("a", NodeKind::Customer, f64::NAN, 2.0)
            .validate()
            .is_err());
        assert!(Node::new("a", NodeKind::Customer, 1.0, 2.0)
            .with_weight(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "k1",
            "name": "Kisumu",
            "type": "warehouse",
            "latitude": -0.09,
            "longitude": 34.77,
            "weight": 3,
            "metadata": {
                "trafficFactor": 1.5,
                "restrictions": { "heightLimit": 4.0, "permitRequired": true }
            }
        }"#;
        let node: Node = serde_json::from_str(json).expect("valid node json");
        assert_eq!(node.kind, NodeKind::Warehouse);
        assert_eq!(node.traffic_factor(), 1.5);
        let r = node.restrictions().expect("has restrictions");
        assert_eq!(r.height_limit, Some(4.0));
        assert!(r.permit_required);
        assert!(!r.environmental_zone);
    }

    #[test]
    fn test_unknown_kind_maps_to_other() {
        let json = r#"{"id":"m","type":"market","latitude":0,"longitude":0}"#;
        let node: Node = serde_json::from_str(json).expect("valid node json");
        assert_eq!(node.kind, NodeKind::Other);
    }
}
