use crate::config::LinearizerConfig;
use crate::workflow::{NodeOutputs, OrderedMap, TaskNode, WorkflowGraph};
use ahash::AHashMap;
use tracing::debug;

/// The executable part of a workflow, with lookup tables over it.
///
/// Borrowed from the input graph; nothing here outlives one linearization.
pub(crate) struct PreparedGraph<'g> {
    /// Retained nodes, in document order.
    pub nodes: Vec<&'g TaskNode>,
    pub by_id: AHashMap<&'g str, &'g TaskNode>,
    /// Resolves connection endpoints. With duplicate names the last node wins.
    pub name_to_id: AHashMap<&'g str, &'g str>,
    pub connections: &'g OrderedMap<NodeOutputs>,
}

impl<'g> PreparedGraph<'g> {
    /// Filters out annotation nodes and builds the id/name tables.
    ///
    /// Returns `None` when the graph has no node list or no connection map.
    pub fn new(graph: &'g WorkflowGraph, config: &LinearizerConfig) -> Option<Self> {
        let (Some(all_nodes), Some(connections)) = (&graph.nodes, &graph.connections) else {
            debug!("Workflow has no node list or no connection map, nothing to linearize");
            return None;
        };

        let nodes: Vec<&TaskNode> = all_nodes
            .iter()
            .filter(|n| !config.is_annotation(&n.node_type))
            .collect();

        let skipped = all_nodes.len() - nodes.len();
        if skipped > 0 {
            debug!(skipped, "Dropped annotation nodes from the build order");
        }

        let mut by_id = AHashMap::with_capacity(nodes.len());
        let mut name_to_id = AHashMap::with_capacity(nodes.len());
        for node in &nodes {
            by_id.insert(node.id.as_str(), *node);
            if let Some(previous) = name_to_id.insert(node.name.as_str(), node.id.as_str()) {
                debug!(
                    name = %node.name,
                    shadowed = previous,
                    "Duplicate node name, connections resolve to the later node"
                );
            }
        }

        Some(Self {
            nodes,
            by_id,
            name_to_id,
            connections,
        })
    }

    pub fn resolve(&self, name: &str) -> Option<&'g str> {
        self.name_to_id.get(name).copied()
    }

    pub fn node(&self, id: &str) -> Option<&'g TaskNode> {
        self.by_id.get(id).copied()
    }
}
