// In-memory data flow graph

use crate::error::{EdgeRole, MaterializeError, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ordinal trust-zone rank. Lower values are less trusted.
pub type Zone = i64;

/// An actor, process or data store in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub zone: Zone,
}

/// Edge weight for a directed data flow. Source and destination are the
/// graph endpoints; the mediating process is stored alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub id: String,
    pub process: NodeIndex,
}

/// A flow with every node reference resolved.
#[derive(Debug, Clone, Copy)]
pub struct FlowRef<'a> {
    pub id: &'a str,
    pub source: &'a Node,
    pub destination: &'a Node,
    pub process: &'a Node,
}

#[derive(Debug, Default)]
pub struct DataFlowGraph {
    graph: DiGraph<Node, Flow>,
    nodes_by_id: HashMap<String, NodeIndex>,
    flow_ids: HashSet<String>,
}

impl DataFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        zone: Zone,
    ) -> Result<NodeIndex> {
        let id = id.into();
        if self.nodes_by_id.contains_key(&id) {
            return Err(MaterializeError::DuplicateId { kind: "node", id });
        }

        let index = self.graph.add_node(Node {
            id: id.clone(),
            label: label.into(),
            zone,
        });
        self.nodes_by_id.insert(id, index);
        Ok(index)
    }

    /// Adds a flow between existing nodes. Any reference to an unknown node
    /// id is a data error and leaves the graph unchanged.
    pub fn add_flow(
        &mut self,
        id: impl Into<String>,
        source: &str,
        destination: &str,
        process: &str,
    ) -> Result<EdgeIndex> {
        let id = id.into();
        if self.flow_ids.contains(&id) {
            return Err(MaterializeError::DuplicateId { kind: "edge", id });
        }

        let source = self.resolve(&id, source, EdgeRole::Source)?;
        let destination = self.resolve(&id, destination, EdgeRole::Destination)?;
        let process = self.resolve(&id, process, EdgeRole::Process)?;

        self.flow_ids.insert(id.clone());
        Ok(self
            .graph
            .add_edge(source, destination, Flow { id, process }))
    }

    fn resolve(&self, edge: &str, node: &str, role: EdgeRole) -> Result<NodeIndex> {
        self.nodes_by_id
            .get(node)
            .copied()
            .ok_or_else(|| MaterializeError::DanglingReference {
                edge: edge.to_string(),
                role,
                node: node.to_string(),
            })
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes_by_id.get(id).map(|index| &self.graph[*index])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Flows in insertion order.
    pub fn flows(&self) -> impl Iterator<Item = FlowRef<'_>> {
        self.graph.edge_references().map(|edge| FlowRef {
            id: &edge.weight().id,
            source: &self.graph[edge.source()],
            destination: &self.graph[edge.target()],
            process: &self.graph[edge.weight().process],
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn flow_count(&self) -> usize {
        self.graph.edge_count()
    }
}
