use super::ordered::OrderedMap;
use crate::error::{LoadError, read_file};
use serde::{Deserialize, Deserializer, Serialize};

/// A single executable (or annotation) unit of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub position: [f64; 2],
}

impl TaskNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            parameters: serde_json::Map::new(),
            position: [0.0, 0.0],
        }
    }

    pub fn with_parameter(mut self, key: &str, value: serde_json::Value) -> Self {
        self.parameters.insert(key.to_string(), value);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }
}

/// One end of a connection: the target node (by name) and its input slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub index: u32,
}

/// The ordered output groups of one edge kind leaving a node.
///
/// Group `i` is output port `i` (e.g. `true`/`false` of a conditional). A `null`
/// group in the source document is read as an empty group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutputGroups(pub Vec<Vec<ConnectionTarget>>);

impl<'de> Deserialize<'de> for OutputGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = Vec::<Option<Vec<ConnectionTarget>>>::deserialize(deserializer)?;
        Ok(OutputGroups(
            groups.into_iter().map(Option::unwrap_or_default).collect(),
        ))
    }
}

impl OutputGroups {
    pub fn groups(&self) -> &[Vec<ConnectionTarget>] {
        &self.0
    }

    /// Returns the group at `output`, growing the list with empty groups as needed.
    fn group_mut(&mut self, output: usize) -> &mut Vec<ConnectionTarget> {
        if self.0.len() <= output {
            self.0.resize_with(output + 1, Vec::new);
        }
        &mut self.0[output]
    }
}

/// Outgoing connections of one node, keyed by edge kind.
pub type NodeOutputs = OrderedMap<OutputGroups>;

/// The raw workflow document: a node list plus a connection map keyed by source node name.
///
/// Both fields are optional. A document missing either one linearizes to an
/// empty build order rather than failing to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<TaskNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<OrderedMap<NodeOutputs>>,
}

impl WorkflowGraph {
    /// Creates a graph with an empty node list and an empty connection map.
    pub fn new() -> Self {
        Self {
            nodes: Some(Vec::new()),
            connections: Some(OrderedMap::new()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        Self::from_json(&read_file(path)?)
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_node(mut self, node: TaskNode) -> Self {
        self.nodes.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Adds a primary (`main`) connection from output 0 of `source` to input 0 of `target`.
    pub fn connect(self, source: &str, target: &str) -> Self {
        self.connect_kind(source, "main", 0, target, 0)
    }

    /// Adds a connection of any kind between named output and input slots.
    pub fn connect_kind(
        mut self,
        source: &str,
        kind: &str,
        output: usize,
        target: &str,
        input: u32,
    ) -> Self {
        let outputs = self
            .connections
            .get_or_insert_with(OrderedMap::new)
            .entry_or_default(source);
        outputs
            .entry_or_default(kind)
            .group_mut(output)
            .push(ConnectionTarget {
                node: target.to_string(),
                kind: Some(kind.to_string()),
                index: input,
            });
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.as_ref().map_or(0, Vec::len)
    }
}
