use super::preprocess::PreparedGraph;
use crate::config::LinearizerConfig;
use crate::workflow::{NodeOutputs, OrderedMap};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::debug;

/// One resolved connection, seen from either of its endpoints.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectionRecord<'g> {
    pub peer_id: &'g str,
    pub peer_name: &'g str,
    pub kind: &'g str,
    pub output_index: usize,
    pub input_index: u32,
}

#[derive(Debug, Default)]
pub(crate) struct NodeConnections<'g> {
    pub outgoing: Vec<ConnectionRecord<'g>>,
    pub incoming: Vec<ConnectionRecord<'g>>,
}

/// Bidirectional connection records plus the adjacency projections the traversal needs.
pub(crate) struct ConnectionIndex<'g> {
    connections: AHashMap<&'g str, NodeConnections<'g>>,
    /// Targets of primary edges, one entry per edge, in document order.
    primary_children: AHashMap<&'g str, Vec<&'g str>>,
    /// Distinct primary producers of each node.
    primary_parents: AHashMap<&'g str, Vec<&'g str>>,
    /// Auxiliary providers feeding each node.
    dependencies: AHashMap<&'g str, Vec<&'g str>>,
    /// Inverse of `dependencies`.
    consumers: AHashMap<&'g str, Vec<&'g str>>,
    primary_kind: String,
}

impl<'g> ConnectionIndex<'g> {
    pub fn build(graph: &PreparedGraph<'g>, config: &LinearizerConfig) -> Self {
        let mut index = Self {
            connections: graph
                .nodes
                .iter()
                .map(|n| (n.id.as_str(), NodeConnections::default()))
                .collect(),
            primary_children: AHashMap::new(),
            primary_parents: AHashMap::new(),
            dependencies: AHashMap::new(),
            consumers: AHashMap::new(),
            primary_kind: config.primary_kind.clone(),
        };

        let connections: &'g OrderedMap<NodeOutputs> = graph.connections;
        for (source_name, outputs) in connections.iter() {
            let Some(source_id) = graph.resolve(source_name) else {
                debug!(source = source_name, "Skipping connections from unknown node");
                continue;
            };
            let source_name = graph.node(source_id).map_or(source_name, |n| n.name.as_str());

            for (kind, groups) in outputs.iter() {
                for (output_index, group) in groups.groups().iter().enumerate() {
                    for target in group {
                        let Some(target_id) = graph.resolve(&target.node) else {
                            debug!(
                                source = source_name,
                                target = %target.node,
                                "Skipping connection to unknown node"
                            );
                            continue;
                        };
                        let target_name = graph
                            .node(target_id)
                            .map_or(target.node.as_str(), |n| n.name.as_str());

                        index.record(
                            source_id,
                            source_name,
                            target_id,
                            target_name,
                            kind,
                            output_index,
                            target.index,
                        );
                    }
                }
            }
        }

        index
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        source_id: &'g str,
        source_name: &'g str,
        target_id: &'g str,
        target_name: &'g str,
        kind: &'g str,
        output_index: usize,
        input_index: u32,
    ) {
        self.connections
            .entry(source_id)
            .or_default()
            .outgoing
            .push(ConnectionRecord {
                peer_id: target_id,
                peer_name: target_name,
                kind,
                output_index,
                input_index,
            });
        self.connections
            .entry(target_id)
            .or_default()
            .incoming
            .push(ConnectionRecord {
                peer_id: source_id,
                peer_name: source_name,
                kind,
                output_index,
                input_index,
            });

        if kind == self.primary_kind {
            self.primary_children
                .entry(source_id)
                .or_default()
                .push(target_id);
            push_unique(self.primary_parents.entry(target_id).or_default(), source_id);
        } else {
            push_unique(self.dependencies.entry(target_id).or_default(), source_id);
            push_unique(self.consumers.entry(source_id).or_default(), target_id);
        }
    }

    pub fn connections(&self, id: &str) -> Option<&NodeConnections<'g>> {
        self.connections.get(id)
    }

    pub fn children(&self, id: &str) -> &[&'g str] {
        self.primary_children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents(&self, id: &str) -> &[&'g str] {
        self.primary_parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dependencies(&self, id: &str) -> &[&'g str] {
        self.dependencies.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn consumers(&self, id: &str) -> &[&'g str] {
        self.consumers.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_merge_point(&self, id: &str) -> bool {
        self.parents(id).len() >= 2
    }

    /// A node that only feeds capability edges and takes no part in the primary flow.
    pub fn is_pure_provider(&self, id: &str) -> bool {
        !self.consumers(id).is_empty()
            && self.children(id).is_empty()
            && self.parents(id).is_empty()
    }

    /// Whether the primary edges leaving `id` split into mutually exclusive branches
    /// by their shape alone: more than one output group, or one group fanning out
    /// to several targets that all land on input slot 0.
    pub fn has_branching_outputs(&self, id: &str) -> bool {
        let Some(node) = self.connections.get(id) else {
            return false;
        };
        let primary: Vec<&ConnectionRecord> = node
            .outgoing
            .iter()
            .filter(|c| c.kind == self.primary_kind)
            .collect();

        let groups = primary.iter().map(|c| c.output_index).unique().count();
        match groups {
            0 => false,
            1 => primary.len() > 1 && primary.iter().all(|c| c.input_index == 0),
            _ => true,
        }
    }
}

fn push_unique<'g>(list: &mut Vec<&'g str>, id: &'g str) {
    if !list.contains(&id) {
        list.push(id);
    }
}
