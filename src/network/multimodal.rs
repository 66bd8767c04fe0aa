//! Multi-modal edge generation and preferred-mode shortest paths.
//!
//! # Algorithm
//!
//! Dijkstra with linear-scan selection: each round settles the unsettled
//! node with the smallest tentative cost, stopping once the destination
//! is settled or nothing reachable remains. Edges of the preferred mode
//! weigh 70% of their cost. O(V² + E).
//!
//! # Reference
//!
//! Dijkstra, E.W. (1959). "A note on two problems in connexion with
//! graphs", *Numerische Mathematik* 1, 269-271.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::distance::haversine_distance;
use crate::models::{Node, NodeKind, Route, TransportMode};

/// Weight multiplier for edges of the preferred mode.
pub const PREFERRED_MODE_DISCOUNT: f64 = 0.7;

/// Mode of the direct link between two nodes.
///
/// Air between airports, rail between rail hubs, sea between ports,
/// road otherwise.
pub fn link_mode(from: &Node, to: &Node) -> TransportMode {
    match (from.kind, to.kind) {
        (NodeKind::Airport, NodeKind::Airport) => TransportMode::Air,
        (NodeKind::RailHub, NodeKind::RailHub) => TransportMode::Rail,
        (NodeKind::Port, NodeKind::Port) => TransportMode::Sea,
        _ => TransportMode::Road,
    }
}

/// Builds one directed edge per ordered pair of distinct nodes.
///
/// Cost is haversine distance times the mode's cost factor; transit
/// minutes are distance times its time factor. Ids are
/// `"{from}->{to}:{mode}"`.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind, TransportMode};
/// use sc_optim::network::generate_multi_modal_routes;
///
/// let nodes = vec![
///     Node::new("jfk", NodeKind::Airport, 40.64, -73.78),
///     Node::new("lhr", NodeKind::Airport, 51.47, -0.45),
///     Node::new("dc", NodeKind::Warehouse, 40.70, -74.00),
/// ];
/// let routes = generate_multi_modal_routes(&nodes);
/// assert_eq!(routes.len(), 6);
/// assert_eq!(routes[0].mode, TransportMode::Air);
/// assert_eq!(routes[1].mode, TransportMode::Road);
/// ```
pub fn generate_multi_modal_routes(nodes: &[Node]) -> Vec<Route> {
    let mut routes = Vec::with_capacity(nodes.len() * nodes.len().saturating_sub(1));
    for from in nodes {
        for to in nodes {
            if from.id == to.id {
                continue;
            }
            let mode = link_mode(from, to);
            let distance =
                haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude);
            let mode_name = match mode {
                TransportMode::Road => "road",
                TransportMode::Rail => "rail",
                TransportMode::Air => "air",
                TransportMode::Sea => "sea",
            };
            routes.push(
                Route::new(format!("{}->{}:{mode_name}", from.id, to.id), &from.id, &to.id)
                    .with_cost(distance * mode.cost_factor())
                    .with_transit_time(distance * mode.time_factor())
                    .with_mode(mode),
            );
        }
    }
    routes
}

struct NodeData {
    weight: f64,
    settled: bool,
    /// Index of the route used to reach this node.
    via: Option<usize>,
}

/// Cheapest path from `source` to `destination` over `routes`.
///
/// Edges of `preferred_mode` are discounted by 30% for the search only;
/// the returned routes keep their own cost and are flagged optimized.
/// Returns `Some(vec![])` when source and destination coincide and `None`
/// when either id is unknown or the destination is unreachable. Routes
/// with an unknown endpoint or a negative or non-finite cost are ignored.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind, Route, TransportMode};
/// use sc_optim::network::plan_multi_modal_route;
///
/// let nodes = vec![
///     Node::new("a", NodeKind::Port, 0.0, 0.0),
///     Node::new("b", NodeKind::Port, 0.0, 1.0),
/// ];
/// let routes = vec![
///     Route::new("road", "a", "b").with_cost(100.0),
///     Route::new("sea", "a", "b").with_cost(120.0).with_mode(TransportMode::Sea),
/// ];
/// let path = plan_multi_modal_route("a", "b", &nodes, &routes, None).unwrap();
/// assert_eq!(path[0].id, "road");
/// let path = plan_multi_modal_route("a", "b", &nodes, &routes, Some(TransportMode::Sea)).unwrap();
/// assert_eq!(path[0].id, "sea");
/// assert_eq!(path[0].cost, 120.0);
/// ```
pub fn plan_multi_modal_route(
    source: &str,
    destination: &str,
    nodes: &[Node],
    routes: &[Route],
    preferred_mode: Option<TransportMode>,
) -> Option<Vec<Route>> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let start = *index.get(source)?;
    let end = *index.get(destination)?;
    if start == end {
        return Some(Vec::new());
    }

    // Adjacency: node -> (neighbor, weight, route index).
    let mut adjacency: Vec<Vec<(usize, f64, usize)>> = vec![Vec::new(); nodes.len()];
    let mut ignored = 0usize;
    for (ri, route) in routes.iter().enumerate() {
        let (Some(&f), Some(&t)) = (index.get(route.from.as_str()), index.get(route.to.as_str()))
        else {
            ignored += 1;
            continue;
        };
        if !route.cost.is_finite() || route.cost < 0.0 {
            ignored += 1;
            continue;
        }
        let weight = if preferred_mode == Some(route.mode) {
            route.cost * PREFERRED_MODE_DISCOUNT
        } else {
            route.cost
        };
        adjacency[f].push((t, weight, ri));
    }
    if ignored > 0 {
        warn!(ignored, "ignored unusable routes");
    }

    let mut data: Vec<NodeData> = (0..nodes.len())
        .map(|_| NodeData {
            weight: f64::INFINITY,
            settled: false,
            via: None,
        })
        .collect();
    data[start].weight = 0.0;

    loop {
        let current = data
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.settled && d.weight.is_finite())
            .min_by(|a, b| a.1.weight.total_cmp(&b.1.weight))
            .map(|(i, _)| i);
        let Some(current) = current else {
            break;
        };
        if current == end {
            break;
        }
        data[current].settled = true;

        for &(next, weight, ri) in &adjacency[current] {
            if data[next].settled {
                continue;
            }
            let alt = data[current].weight + weight;
            if alt < data[next].weight {
                data[next].weight = alt;
                data[next].via = Some(ri);
            }
        }
    }

    data[end].via?;

    let mut path = Vec::new();
    let mut node = end;
    while let Some(ri) = data[node].via {
        let route = &routes[ri];
        path.push(route.optimized_with_volume(route.volume));
        node = index.get(route.from.as_str()).copied()?;
        if node == start {
            break;
        }
    }
    path.reverse();

    debug!(
        source,
        destination,
        hops = path.len(),
        weight = data[end].weight,
        "multi-modal path found"
    );
    Some(path)
}
