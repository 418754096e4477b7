use crate::workflow::TaskNode;
use serde::{Deserialize, Serialize};

/// Coarse classification of a connection, for the tutorial UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    MainFlow,
    Dependency,
    Conditional,
}

/// One connection as seen from a step: the peer node and the slots involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
    pub node_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub output_index: usize,
    pub input_index: u32,
    pub connection_type: ConnectionType,
}

/// Wiring guidance attached to every step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub connects_to: Vec<ConnectionDescriptor>,
    pub connects_from: Vec<ConnectionDescriptor>,
    pub next_steps: Vec<String>,
    pub previous_steps: Vec<String>,
    pub connection_instructions: String,
}

/// A step backed by a real node of the workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStep {
    pub step_number: usize,
    pub node: TaskNode,
    pub is_trigger: bool,
    pub is_merge_node: bool,
    /// Pulled in front of its consumer through an auxiliary edge.
    pub is_dependency: bool,
    pub connection_info: ConnectionInfo,
}

/// A synthetic "go back to the branching node" instruction between two branches.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStep {
    pub step_number: usize,
    /// Derived as `<nodeId>_return_<branchIndex>`.
    pub id: String,
    pub name: String,
    pub node_type: String,
    pub position: [f64; 2],
    pub return_to_node_name: String,
    pub connection_info: ConnectionInfo,
}

/// An entry of the build order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StepRecord", from = "StepRecord")]
pub enum Step {
    Task(TaskStep),
    Return(ReturnStep),
}

impl Step {
    pub fn step_number(&self) -> usize {
        match self {
            Step::Task(s) => s.step_number,
            Step::Return(s) => s.step_number,
        }
    }

    pub(crate) fn set_step_number(&mut self, number: usize) {
        match self {
            Step::Task(s) => s.step_number = number,
            Step::Return(s) => s.step_number = number,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Step::Task(s) => &s.node.id,
            Step::Return(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Step::Task(s) => &s.node.name,
            Step::Return(s) => &s.name,
        }
    }

    pub fn node_type(&self) -> &str {
        match self {
            Step::Task(s) => &s.node.node_type,
            Step::Return(s) => &s.node_type,
        }
    }

    pub fn connection_info(&self) -> &ConnectionInfo {
        match self {
            Step::Task(s) => &s.connection_info,
            Step::Return(s) => &s.connection_info,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Step::Return(_))
    }

    pub fn as_task(&self) -> Option<&TaskStep> {
        match self {
            Step::Task(s) => Some(s),
            Step::Return(_) => None,
        }
    }
}

/// The flat record shape consumers store and render.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepRecord {
    id: String,
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    position: [f64; 2],
    step_number: usize,
    #[serde(default)]
    is_trigger: bool,
    #[serde(default)]
    is_merge_node: bool,
    #[serde(default)]
    is_dependency: bool,
    #[serde(default)]
    is_return_step: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    return_to_node_name: Option<String>,
    #[serde(default)]
    connection_info: ConnectionInfo,
}

impl From<Step> for StepRecord {
    fn from(step: Step) -> Self {
        match step {
            Step::Task(s) => StepRecord {
                id: s.node.id,
                name: s.node.name,
                node_type: s.node.node_type,
                parameters: Some(s.node.parameters),
                position: s.node.position,
                step_number: s.step_number,
                is_trigger: s.is_trigger,
                is_merge_node: s.is_merge_node,
                is_dependency: s.is_dependency,
                is_return_step: false,
                return_to_node_name: None,
                connection_info: s.connection_info,
            },
            Step::Return(s) => StepRecord {
                id: s.id,
                name: s.name,
                node_type: s.node_type,
                parameters: None,
                position: s.position,
                step_number: s.step_number,
                is_trigger: false,
                is_merge_node: false,
                is_dependency: false,
                is_return_step: true,
                return_to_node_name: Some(s.return_to_node_name),
                connection_info: s.connection_info,
            },
        }
    }
}

impl From<StepRecord> for Step {
    fn from(record: StepRecord) -> Self {
        if record.is_return_step {
            Step::Return(ReturnStep {
                step_number: record.step_number,
                return_to_node_name: record
                    .return_to_node_name
                    .unwrap_or_else(|| record.name.clone()),
                id: record.id,
                name: record.name,
                node_type: record.node_type,
                position: record.position,
                connection_info: record.connection_info,
            })
        } else {
            Step::Task(TaskStep {
                step_number: record.step_number,
                node: TaskNode {
                    id: record.id,
                    name: record.name,
                    node_type: record.node_type,
                    parameters: record.parameters.unwrap_or_default(),
                    position: record.position,
                },
                is_trigger: record.is_trigger,
                is_merge_node: record.is_merge_node,
                is_dependency: record.is_dependency,
                connection_info: record.connection_info,
            })
        }
    }
}
