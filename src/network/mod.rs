//! Multi-modal networks: edge generation, preferred-mode shortest paths,
//! greedy flow assignment, and flow metrics.

mod flow;
mod metrics;
mod multimodal;

pub use flow::{
    assign_min_cost_flow, identify_terminals, Terminals, MAX_TRANSSHIPMENT_PASSES,
    TRANSSHIPMENT_CHUNK,
};
pub use metrics::{Bottleneck, NetworkMetrics, BOTTLENECK_UTILIZATION};
pub use multimodal::{
    generate_multi_modal_routes, link_mode, plan_multi_modal_route, PREFERRED_MODE_DISCOUNT,
};
