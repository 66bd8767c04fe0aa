//! Greedy flow assignment from supply nodes to demand nodes.
//!
//! Not an exact min-cost flow: routes are visited cheapest first, direct
//! source-to-sink routes are filled up to an even share of total supply,
//! and remaining node capacity is then pushed through any route in
//! bounded chunks.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::{Node, NodeKind, Route};

/// Upper bound on transshipment passes over the route list.
pub const MAX_TRANSSHIPMENT_PASSES: usize = 100;

/// Largest volume moved along one route in one transshipment pass.
pub const TRANSSHIPMENT_CHUNK: f64 = 100.0;

/// Supply and demand nodes, as indices into the node slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Terminals {
    pub sources: Vec<usize>,
    pub sinks: Vec<usize>,
}

impl Terminals {
    pub fn is_source(&self, i: usize) -> bool {
        self.sources.contains(&i)
    }

    pub fn is_sink(&self, i: usize) -> bool {
        self.sinks.contains(&i)
    }
}

/// Finds supply and demand nodes.
///
/// Sources have outgoing routes and no incoming ones; sinks the reverse.
/// When the topology yields no source, warehouses, airports and ports are
/// used, else the first node. When it yields no sink, retail nodes are
/// used, else the last node.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind, Route};
/// use sc_optim::network::identify_terminals;
///
/// let nodes = vec![
///     Node::new("plant", NodeKind::Supplier, 0.0, 0.0),
///     Node::new("dc", NodeKind::Distribution, 0.0, 1.0),
///     Node::new("shop", NodeKind::Retail, 0.0, 2.0),
/// ];
/// let routes = vec![Route::new("r1", "plant", "dc"), Route::new("r2", "dc", "shop")];
/// let t = identify_terminals(&nodes, &routes);
/// assert_eq!(t.sources, vec![0]);
/// assert_eq!(t.sinks, vec![2]);
/// ```
pub fn identify_terminals(nodes: &[Node], routes: &[Route]) -> Terminals {
    if nodes.is_empty() {
        return Terminals::default();
    }

    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    for route in routes {
        *outgoing.entry(route.from.as_str()).or_default() += 1;
        *incoming.entry(route.to.as_str()).or_default() += 1;
    }

    let mut terminals = Terminals::default();
    for (i, node) in nodes.iter().enumerate() {
        let out = outgoing.get(node.id.as_str()).copied().unwrap_or(0);
        let inc = incoming.get(node.id.as_str()).copied().unwrap_or(0);
        if inc == 0 && out > 0 {
            terminals.sources.push(i);
        } else if out == 0 && inc > 0 {
            terminals.sinks.push(i);
        }
    }

    if terminals.sources.is_empty() {
        terminals.sources = kinds(nodes, |k| {
            matches!(k, NodeKind::Warehouse | NodeKind::Airport | NodeKind::Port)
        });
        if terminals.sources.is_empty() {
            terminals.sources.push(0);
        }
    }
    if terminals.sinks.is_empty() {
        terminals.sinks = kinds(nodes, |k| k == NodeKind::Retail);
        if terminals.sinks.is_empty() {
            terminals.sinks.push(nodes.len() - 1);
        }
    }
    terminals
}

fn kinds(nodes: &[Node], keep: impl Fn(NodeKind) -> bool) -> Vec<usize> {
    (0..nodes.len()).filter(|&i| keep(nodes[i].kind)).collect()
}

/// Assigns volumes to `routes` greedily, cheapest route first.
///
/// Every node has a remaining capacity (its capacity, default 1000) that
/// each unit of flow through it consumes at both ends. Direct
/// source-to-sink routes get up to `floor(total supply / sinks)` each;
/// after that up to [`MAX_TRANSSHIPMENT_PASSES`] passes move at most
/// [`TRANSSHIPMENT_CHUNK`] along every route whose endpoints both have
/// capacity left. Routes are returned sorted by cost with fresh volumes;
/// those that received flow are flagged optimized. Routes naming unknown
/// nodes receive none.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Node, NodeKind, Route};
/// use sc_optim::network::assign_min_cost_flow;
///
/// let nodes = vec![
///     Node::new("plant", NodeKind::Supplier, 0.0, 0.0).with_capacity(400.0),
///     Node::new("shop", NodeKind::Retail, 0.0, 1.0),
/// ];
/// let routes = vec![Route::new("r", "plant", "shop").with_cost(2.0)];
/// let flows = assign_min_cost_flow(&nodes, &routes);
/// assert_eq!(flows[0].volume, 400.0);
/// assert!(flows[0].is_optimized);
/// ```
pub fn assign_min_cost_flow(nodes: &[Node], routes: &[Route]) -> Vec<Route> {
    let terminals = identify_terminals(nodes, routes);
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut result: Vec<Route> = routes
        .iter()
        .map(|r| Route {
            volume: 0.0,
            ..r.clone()
        })
        .collect();
    result.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let endpoints: Vec<Option<(usize, usize)>> = result
        .iter()
        .map(|r| Some((*index.get(r.from.as_str())?, *index.get(r.to.as_str())?)))
        .collect();

    let mut remaining: Vec<f64> = nodes.iter().map(Node::effective_capacity).collect();
    let total_supply: f64 = terminals.sources.iter().map(|&i| remaining[i]).sum();
    let per_sink_demand = (total_supply / terminals.sinks.len().max(1) as f64).floor();

    info!(
        nodes = nodes.len(),
        routes = routes.len(),
        sources = terminals.sources.len(),
        sinks = terminals.sinks.len(),
        total_supply,
        "flow assignment started"
    );

    for (route, ends) in result.iter_mut().zip(&endpoints) {
        let Some((f, t)) = *ends else {
            continue;
        };
        if !(terminals.is_source(f) && terminals.is_sink(t)) {
            continue;
        }
        let flow = remaining[f].min(per_sink_demand).min(remaining[t]);
        if flow > 0.0 {
            route.volume = flow;
            route.is_optimized = true;
            remaining[f] -= flow;
            remaining[t] -= flow;
        }
    }

    let mut passes = 0;
    while passes < MAX_TRANSSHIPMENT_PASSES {
        let mut assigned = false;
        for (route, ends) in result.iter_mut().zip(&endpoints) {
            let Some((f, t)) = *ends else {
                continue;
            };
            let flow = remaining[f].min(remaining[t]).min(TRANSSHIPMENT_CHUNK);
            if flow > 0.0 {
                route.volume += flow;
                route.is_optimized = true;
                remaining[f] -= flow;
                remaining[t] -= flow;
                assigned = true;
            }
        }
        if !assigned {
            break;
        }
        passes += 1;
    }
    debug!(passes, "transshipment finished");

    info!(
        total_flow = result.iter().map(|r| r.volume).sum::<f64>(),
        "flow assignment finished"
    );
    result
}
