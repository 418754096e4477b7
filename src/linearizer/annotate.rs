use super::index::{ConnectionIndex, ConnectionRecord};
use crate::config::LinearizerConfig;
use crate::step::{ConnectionDescriptor, ConnectionInfo, ConnectionType};
use crate::workflow::TaskNode;
use itertools::Itertools;

/// Produces the wiring guidance attached to each step.
pub(crate) struct StepAnnotator<'a, 'g> {
    index: &'a ConnectionIndex<'g>,
    config: &'a LinearizerConfig,
}

impl<'a, 'g> StepAnnotator<'a, 'g> {
    pub fn new(index: &'a ConnectionIndex<'g>, config: &'a LinearizerConfig) -> Self {
        Self { index, config }
    }

    pub fn for_node(&self, node: &TaskNode) -> ConnectionInfo {
        let none: &[ConnectionRecord] = &[];
        let (outgoing, incoming) = self
            .index
            .connections(&node.id)
            .map(|c| (c.outgoing.as_slice(), c.incoming.as_slice()))
            .unwrap_or((none, none));

        ConnectionInfo {
            connects_to: outgoing.iter().map(|c| self.descriptor(c)).collect(),
            connects_from: incoming.iter().map(|c| self.descriptor(c)).collect(),
            next_steps: outgoing
                .iter()
                .map(|c| format!("Connect to '{}'{}", c.peer_name, self.slot_suffix(c)))
                .collect(),
            previous_steps: incoming
                .iter()
                .map(|c| format!("Receives from '{}'{}", c.peer_name, self.slot_suffix(c)))
                .collect(),
            connection_instructions: self.instructions(&node.name, outgoing, incoming),
        }
    }

    /// Return steps have no connections of their own, only a pointer back.
    pub fn for_return(&self, branch_node_name: &str) -> ConnectionInfo {
        ConnectionInfo {
            next_steps: vec![format!("Return to '{}'", branch_node_name)],
            connection_instructions: format!(
                "Go back to '{}' and build its next branch.",
                branch_node_name
            ),
            ..ConnectionInfo::default()
        }
    }

    fn classify(&self, kind: &str) -> ConnectionType {
        if self.config.is_primary(kind) {
            ConnectionType::MainFlow
        } else if self.config.is_dependency_kind(kind) {
            ConnectionType::Dependency
        } else {
            ConnectionType::Conditional
        }
    }

    fn descriptor(&self, record: &ConnectionRecord) -> ConnectionDescriptor {
        ConnectionDescriptor {
            node_name: record.peer_name.to_string(),
            kind: record.kind.to_string(),
            output_index: record.output_index,
            input_index: record.input_index,
            connection_type: self.classify(record.kind),
        }
    }

    fn slot_suffix(&self, record: &ConnectionRecord) -> String {
        let mut suffix = String::new();
        if !self.config.is_primary(record.kind) {
            suffix.push_str(&format!(" via {}", record.kind));
        }
        if record.output_index > 0 {
            suffix.push_str(&format!(" from output {}", record.output_index + 1));
        }
        if record.input_index > 0 {
            suffix.push_str(&format!(" (input {})", record.input_index + 1));
        }
        suffix
    }

    fn instructions(
        &self,
        name: &str,
        outgoing: &[ConnectionRecord],
        incoming: &[ConnectionRecord],
    ) -> String {
        match outgoing {
            [only] => format!(
                "Connect '{}' to '{}'{}.",
                name,
                only.peer_name,
                self.slot_suffix(only)
            ),
            [] if incoming.is_empty() => {
                format!("'{}' has no connections; it stands on its own.", name)
            }
            [] => format!(
                "'{}' receives input from {} and has no outgoing connections.",
                name,
                quoted_names(incoming)
            ),
            many => format!(
                "Connect '{}' to {} nodes: {}.",
                name,
                many.iter().map(|c| c.peer_name).unique().count(),
                quoted_names(many)
            ),
        }
    }
}

fn quoted_names(records: &[ConnectionRecord]) -> String {
    records
        .iter()
        .map(|c| c.peer_name)
        .unique()
        .map(|n| format!("'{}'", n))
        .join(", ")
}
