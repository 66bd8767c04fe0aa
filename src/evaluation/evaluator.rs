//! Tour evaluator: edge lookup, tour cost, and time-window schedule.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Node, Route, TimeWindow};

/// Cost charged per tour leg with no usable edge.
pub const MISSING_EDGE_PENALTY: f64 = 1_000_000.0;

/// Why a tour schedule is infeasible.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleViolation {
    /// No edge connects two consecutive stops.
    MissingEdge { from: String, to: String },
    /// A stop was reached after its latest arrival time.
    TimeWindowViolated {
        node_id: String,
        arrival: f64,
        latest: f64,
    },
}

/// Evaluates index tours against a fixed edge set.
///
/// Tours are sequences of indices into the node slice. Edges are looked
/// up by `(from, to)` index; when the edge set contains duplicates the
/// first one wins.
///
/// # Examples
///
/// ```
/// use sc_optim::evaluation::{TourEvaluator, MISSING_EDGE_PENALTY};
/// use sc_optim::models::{Node, NodeKind, Route};
///
/// let nodes = vec![
///     Node::new("d", NodeKind::Depot, 0.0, 0.0),
///     Node::new("a", NodeKind::Customer, 0.0, 1.0),
/// ];
/// let routes = vec![
///     Route::new("d->a", "d", "a").with_cost(3.0),
///     Route::new("a->d", "a", "d").with_cost(4.0),
/// ];
/// let eval = TourEvaluator::new(&nodes, &routes);
/// assert_eq!(eval.tour_cost(&[0, 1, 0]), 7.0);
/// assert_eq!(eval.tour_cost(&[1, 1]), MISSING_EDGE_PENALTY);
/// ```
pub struct TourEvaluator<'a> {
    nodes: &'a [Node],
    edges: HashMap<(usize, usize), &'a Route>,
    windows: Vec<Option<&'a TimeWindow>>,
    service_time: f64,
}

impl<'a> TourEvaluator<'a> {
    /// Indexes `routes` against `nodes`.
    ///
    /// Routes naming a node id not present in `nodes` are skipped.
    pub fn new(nodes: &'a [Node], routes: &'a [Route]) -> Self {
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut edges = HashMap::with_capacity(routes.len());
        let mut dangling = 0usize;
        for route in routes {
            match (index.get(route.from.as_str()), index.get(route.to.as_str())) {
                (Some(&f), Some(&t)) => {
                    edges.entry((f, t)).or_insert(route);
                }
                _ => dangling += 1,
            }
        }
        if dangling > 0 {
            debug!(dangling, "skipped routes referencing unknown nodes");
        }

        Self {
            nodes,
            edges,
            windows: vec![None; nodes.len()],
            service_time: 0.0,
        }
    }

    /// Attaches time windows and the per-stop service time in minutes.
    ///
    /// Windows for unknown node ids are ignored.
    pub fn with_time_windows(mut self, windows: &'a [TimeWindow], service_time: f64) -> Self {
        for tw in windows {
            if let Some(i) = self.nodes.iter().position(|n| n.id == tw.node_id) {
                self.windows[i] = Some(tw);
            }
        }
        self.service_time = service_time;
        self
    }

    /// The edge from node index `from` to node index `to`, if any.
    pub fn edge(&self, from: usize, to: usize) -> Option<&'a Route> {
        self.edges.get(&(from, to)).copied()
    }

    /// Sum of leg costs, with [`MISSING_EDGE_PENALTY`] per missing leg.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        tour.windows(2)
            .map(|leg| {
                self.edge(leg[0], leg[1])
                    .map_or(MISSING_EDGE_PENALTY, |r| r.cost)
            })
            .sum()
    }

    /// Walks the tour from time zero and returns the completion time.
    ///
    /// Each leg adds its transit time; arriving early waits for the
    /// window to open, arriving late is a violation. Service time is
    /// added at every stop after the first.
    pub fn check_schedule(&self, tour: &[usize]) -> Result<f64, ScheduleViolation> {
        let mut time = 0.0;
        for leg in tour.windows(2) {
            let (from, to) = (leg[0], leg[1]);
            let route = self
                .edge(from, to)
                .ok_or_else(|| ScheduleViolation::MissingEdge {
                    from: self.nodes[from].id.clone(),
                    to: self.nodes[to].id.clone(),
                })?;
            time += route.transit_time;

            if let Some(tw) = self.windows[to] {
                if tw.is_violated(time) {
                    return Err(ScheduleViolation::TimeWindowViolated {
                        node_id: tw.node_id.clone(),
                        arrival: time,
                        latest: tw.latest_arrival,
                    });
                }
                time += tw.waiting_time(time);
            }
            time += self.service_time;
        }
        Ok(time)
    }

    /// Returns `true` if [`check_schedule`](Self::check_schedule) succeeds.
    pub fn is_schedule_feasible(&self, tour: &[usize]) -> bool {
        self.check_schedule(tour).is_ok()
    }

    /// Converts a tour into its leg routes, flagged optimized with `volume`.
    ///
    /// Legs without an edge are omitted.
    pub fn tour_routes(&self, tour: &[usize], volume: f64) -> Vec<Route> {
        tour.windows(2)
            .filter_map(|leg| self.edge(leg[0], leg[1]))
            .map(|r| r.optimized_with_volume(volume))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn setup() -> (Vec<Node>, Vec<Route>) {
        let nodes = vec![
            Node::new("d", NodeKind::Depot, 0.0, 0.0),
            Node::new("a", NodeKind::Customer, 0.0, 1.0),
            Node::new("b", NodeKind::Customer, 0.0, 2.0),
        ];
        let routes = vec![
            Route::new("d->a", "d", "a").with_cost(1.0).with_transit_time(4.0),
            Route::new("a->b", "a", "b").with_cost(2.0).with_transit_time(3.0),
            Route::new("b->d", "b", "d").with_cost(3.0).with_transit_time(5.0),
            Route::new("a->d", "a", "d").with_cost(10.0).with_transit_time(1.0),
        ];
        (nodes, routes)
    }

    #[test]
    fn test_tour_cost() {
        let (nodes, routes) = setup();
        let eval = TourEvaluator::new(&nodes, &routes);
        assert_eq!(eval.tour_cost(&[0, 1, 2, 0]), 6.0);
        assert_eq!(eval.tour_cost(&[0, 1, 0]), 11.0);
        assert_eq!(eval.tour_cost(&[0]), 0.0);
    }

    #[test]
    fn test_missing_edge_penalty() {
        let (nodes, routes) = setup();
        let eval = TourEvaluator::new(&nodes, &routes);
        // d->b and b->a are missing.
        assert_eq!(eval.tour_cost(&[0, 2, 1, 0]), 2.0 * MISSING_EDGE_PENALTY + 10.0);
    }

    #[test]
    fn test_first_duplicate_edge_wins() {
        let (nodes, mut routes) = setup();
        routes.push(Route::new("dup", "d", "a").with_cost(0.5));
        let eval = TourEvaluator::new(&nodes, &routes);
        assert_eq!(eval.edge(0, 1).map(|r| r.id.as_str()), Some("d->a"));
    }

    #[test]
    fn test_dangling_routes_skipped() {
        let (nodes, mut routes) = setup();
        routes.push(Route::new("x", "d", "ghost").with_cost(0.5));
        let eval = TourEvaluator::new(&nodes, &routes);
        assert_eq!(eval.tour_cost(&[0, 1, 2, 0]), 6.0);
    }

    #[test]
    fn test_schedule_without_windows() {
        let (nodes, routes) = setup();
        let eval = TourEvaluator::new(&nodes, &routes).with_time_windows(&[], 10.0);
        // 4 + 10 + 3 + 10 + 5 + 10
        let t = eval.check_schedule(&[0, 1, 2, 0]).expect("feasible");
        assert!((t - 42.0).abs() < 1e-10);
    }

    #[test]
    fn test_schedule_waits_when_early() {
        let (nodes, routes) = setup();
        let windows = vec![TimeWindow::new("a", 20.0, 30.0).expect("valid")];
        let eval = TourEvaluator::new(&nodes, &routes).with_time_windows(&windows, 10.0);
        // arrive a at 4, wait to 20, serve to 30, arrive b at 33, serve to 43, back at 48, serve 58
        let t = eval.check_schedule(&[0, 1, 2, 0]).expect("feasible");
        assert!((t - 58.0).abs() < 1e-10);
    }

    #[test]
    fn test_schedule_rejects_late_arrival() {
        let nodes = vec![
            Node::new("d", NodeKind::Depot, 0.0, 0.0),
            Node::new("c", NodeKind::Customer, 0.0, 1.0),
        ];
        let routes = vec![Route::new("d->c", "d", "c").with_transit_time(12.0)];
        let windows = vec![TimeWindow::new("c", 5.0, 10.0).expect("valid")];
        let eval = TourEvaluator::new(&nodes, &routes).with_time_windows(&windows, 10.0);
        assert_eq!(
            eval.check_schedule(&[0, 1]),
            Err(ScheduleViolation::TimeWindowViolated {
                node_id: "c".into(),
                arrival: 12.0,
                latest: 10.0,
            })
        );
        assert!(!eval.is_schedule_feasible(&[0, 1]));
    }

    #[test]
    fn test_schedule_rejects_missing_edge() {
        let (nodes, routes) = setup();
        let eval = TourEvaluator::new(&nodes, &routes);
        assert!(matches!(
            eval.check_schedule(&[0, 2]),
            Err(ScheduleViolation::MissingEdge { .. })
        ));
    }

    #[test]
    fn test_tour_routes_skip_missing_legs() {
        let (nodes, routes) = setup();
        let eval = TourEvaluator::new(&nodes, &routes);
        let legs = eval.tour_routes(&[0, 2, 1, 0], 25.0);
        // d->b missing, b->a missing, a->d present.
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].id, "a->d");
        assert_eq!(legs[0].volume, 25.0);
        assert!(legs[0].is_optimized);
    }
}
