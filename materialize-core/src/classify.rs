// STRIDE classification over trust-zone ranks

use crate::graph::{DataFlowGraph, Zone};
use crate::threat::{Threat, ThreatMap};
use std::collections::HashSet;
use tracing::debug;

/// Rank of the canonical untrusted zone.
pub const UNTRUSTED_ZONE: Zone = 0;
/// Rank of the canonical trusted zone.
pub const TRUSTED_ZONE: Zone = 1;

pub type ZoneRule = fn(Zone, Zone) -> bool;

/// Flow moves from a less trusted zone into a more trusted one.
pub fn enters_higher_trust(source: Zone, destination: Zone) -> bool {
    source < destination
}

/// Flow moves from a more trusted zone into a less trusted one.
pub fn leaves_to_lower_trust(source: Zone, destination: Zone) -> bool {
    source > destination
}

pub fn crosses_untrusted_to_trusted(source: Zone, destination: Zone) -> bool {
    source == UNTRUSTED_ZONE && destination == TRUSTED_ZONE
}

fn matching_flows(graph: &DataFlowGraph, rule: ZoneRule) -> Vec<Threat> {
    graph
        .flows()
        .filter(|flow| rule(flow.source.zone, flow.destination.zone))
        .map(|flow| Threat::from_flow(&flow))
        .collect()
}

/// Threats present in both lists, compared by flow id, in `left` order.
pub fn intersect_by_flow(left: &[Threat], right: &[Threat]) -> Vec<Threat> {
    let right_ids: HashSet<&str> = right.iter().map(|t| t.flow_id.as_str()).collect();
    left.iter()
        .filter(|t| right_ids.contains(t.flow_id.as_str()))
        .cloned()
        .collect()
}

/// Evaluate every flow against every category.
///
/// Tampering shares the Elevation of Privilege rule and Denial of Service
/// shares the Spoofing rule. Repudiation is the flows flagged for both
/// Spoofing and Tampering.
pub fn classify(graph: &DataFlowGraph) -> ThreatMap {
    let spoofing = matching_flows(graph, crosses_untrusted_to_trusted);
    let tampering = matching_flows(graph, enters_higher_trust);
    let repudiation = intersect_by_flow(&spoofing, &tampering);

    let threats = ThreatMap {
        repudiation,
        information_disclosure: matching_flows(graph, leaves_to_lower_trust),
        denial_of_service: matching_flows(graph, crosses_untrusted_to_trusted),
        elevation_of_privilege: matching_flows(graph, enters_higher_trust),
        spoofing,
        tampering,
    };

    for (category, found) in threats.iter() {
        debug!(category = category.as_str(), count = found.len(), "classified");
    }
    debug!(
        flows = graph.flow_count(),
        threats = threats.total(),
        "classification complete"
    );

    threats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_zone_graph() -> DataFlowGraph {
        let mut graph = DataFlowGraph::new();
        graph.add_node("out", "Outside", UNTRUSTED_ZONE).unwrap();
        graph.add_node("in", "Inside", TRUSTED_ZONE).unwrap();
        graph.add_flow("inbound", "out", "in", "in").unwrap();
        graph.add_flow("outbound", "in", "out", "in").unwrap();
        graph
    }

    #[test]
    fn test_every_category_is_evaluated() {
        let threats = classify(&two_zone_graph());
        for (category, found) in threats.iter() {
            assert_eq!(found.len(), 1, "{} should flag one flow", category);
        }
        assert_eq!(threats.repudiation[0].flow_id, "inbound");
        assert_eq!(threats.information_disclosure[0].flow_id, "outbound");
    }

    #[test]
    fn test_untrusted_to_trusted_is_literal() {
        assert!(crosses_untrusted_to_trusted(0, 1));
        assert!(!crosses_untrusted_to_trusted(0, 2));
        assert!(!crosses_untrusted_to_trusted(1, 2));
    }
}
