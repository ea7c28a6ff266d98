// Diagram ingestion: JSON data flow diagrams with trust-zone groupings

use crate::error::{MaterializeError, Result};
use crate::graph::{DataFlowGraph, Zone};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A trust boundary grouping. Zones are listed least trusted first and a
/// zone's rank is its position in that list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub process: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    pub zones: Vec<ZoneSpec>,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl Diagram {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| MaterializeError::ingestion(path, e.to_string()))?;
        let diagram: Diagram = serde_json::from_str(&content)
            .map_err(|e| MaterializeError::ingestion(path, e.to_string()))?;
        debug!(
            path = %path.display(),
            zones = diagram.zones.len(),
            nodes = diagram.nodes.len(),
            edges = diagram.edges.len(),
            "loaded diagram"
        );
        Ok(diagram)
    }

    /// Rank every node by the zone that contains it.
    ///
    /// Fails when a zone id repeats, a zone lists an undeclared node or the
    /// same node twice, or a node sits in no zone or in more than one.
    pub fn trust_zones(&self, path: &Path) -> Result<HashMap<&str, Zone>> {
        let invalid = |reason: String| MaterializeError::ingestion(path, reason);
        let declared: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut seen_zones = HashSet::new();
        let mut ranks: HashMap<&str, Zone> = HashMap::new();

        for (rank, zone) in self.zones.iter().enumerate() {
            let rank = rank as Zone;
            if !seen_zones.insert(zone.id.as_str()) {
                return Err(invalid(format!("duplicate zone id '{}'", zone.id)));
            }
            for member in &zone.members {
                if !declared.contains(member.as_str()) {
                    return Err(invalid(format!(
                        "zone '{}' lists undeclared node '{}'",
                        zone.id, member
                    )));
                }
                if let Some(previous) = ranks.insert(member.as_str(), rank) {
                    return Err(invalid(if previous == rank {
                        format!("zone '{}' lists node '{}' more than once", zone.id, member)
                    } else {
                        format!("node '{}' belongs to more than one zone", member)
                    }));
                }
            }
        }

        if let Some(orphan) = self.nodes.iter().find(|n| !ranks.contains_key(n.id.as_str())) {
            return Err(invalid(format!("node '{}' has no trust zone", orphan.id)));
        }

        Ok(ranks)
    }

    /// Build the in-memory graph. Structural problems are ingestion errors;
    /// edges pointing at unknown nodes are data errors.
    pub fn build_graph(&self, path: &Path) -> Result<DataFlowGraph> {
        let ranks = self.trust_zones(path)?;

        let mut graph = DataFlowGraph::new();
        for node in &self.nodes {
            graph.add_node(node.id.as_str(), node.label.as_str(), ranks[node.id.as_str()])?;
        }
        for edge in &self.edges {
            graph.add_flow(
                edge.id.as_str(),
                &edge.source,
                &edge.destination,
                &edge.process,
            )?;
        }

        debug!(
            nodes = graph.node_count(),
            flows = graph.flow_count(),
            "built data flow graph"
        );
        Ok(graph)
    }
}

/// Read a diagram file and build its graph.
pub fn load_graph(path: &Path) -> Result<DataFlowGraph> {
    Diagram::load(path)?.build_graph(path)
}
