use crate::config::{ComplexityThresholds, LinearizerConfig};
use crate::step::{Step, TaskStep};
use crate::usage::{ServiceUsage, infer_service};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Diagnostics about how a build order was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalReport {
    pub entry_points: usize,
    pub fallback_sweeps: usize,
    /// Ids of nodes emitted without a valid ordering (cyclic or deadlocked input).
    pub forced_nodes: Vec<String>,
}

impl TraversalReport {
    pub fn is_degraded(&self) -> bool {
        !self.forced_nodes.is_empty()
    }
}

/// Size tier of a workflow by its number of real steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Small,
    Medium,
    Large,
}

impl Complexity {
    pub fn from_step_count(real_steps: usize, thresholds: &ComplexityThresholds) -> Self {
        if real_steps <= thresholds.small_max {
            Complexity::Small
        } else if real_steps <= thresholds.medium_max {
            Complexity::Medium
        } else {
            Complexity::Large
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Small => write!(f, "small"),
            Complexity::Medium => write!(f, "medium"),
            Complexity::Large => write!(f, "large"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub total_steps: usize,
    pub real_steps: usize,
    pub return_steps: usize,
    pub triggers: usize,
    pub dependencies: usize,
    pub merge_points: usize,
    pub node_types: BTreeSet<String>,
    pub complexity: Complexity,
}

/// The ordered build steps of one workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    steps: Vec<Step>,
    #[serde(default)]
    report: TraversalReport,
}

impl BuildPlan {
    pub fn new(steps: Vec<Step>, report: TraversalReport) -> Self {
        Self { steps, report }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn report(&self) -> &TraversalReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps backed by a real node, skipping return instructions.
    pub fn real_steps(&self) -> impl Iterator<Item = &TaskStep> {
        self.steps.iter().filter_map(Step::as_task)
    }

    /// Names of the trigger steps, in build order.
    pub fn triggers(&self) -> Vec<&str> {
        self.real_steps()
            .filter(|s| s.is_trigger)
            .map(|s| s.node.name.as_str())
            .collect()
    }

    /// One display name per step; return steps are prefixed with `↩ `.
    pub fn step_names(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Task(s) => s.node.name.clone(),
                Step::Return(s) => format!("↩ {}", s.return_to_node_name),
            })
            .collect()
    }

    /// Position (0-based) of the real step for `node_id`, if it was emitted.
    pub fn position_of(&self, node_id: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| !s.is_return() && s.id() == node_id)
    }

    pub fn summary(&self, thresholds: &ComplexityThresholds) -> BuildSummary {
        let real: Vec<&TaskStep> = self.real_steps().collect();
        BuildSummary {
            total_steps: self.steps.len(),
            real_steps: real.len(),
            return_steps: self.steps.len() - real.len(),
            triggers: real.iter().filter(|s| s.is_trigger).count(),
            dependencies: real.iter().filter(|s| s.is_dependency).count(),
            merge_points: real.iter().filter(|s| s.is_merge_node).count(),
            node_types: real.iter().map(|s| s.node.node_type.clone()).collect(),
            complexity: Complexity::from_step_count(real.len(), thresholds),
        }
    }

    /// Counts real steps per inferred external service.
    pub fn service_usage(&self, config: &LinearizerConfig) -> ServiceUsage {
        self.real_steps()
            .filter(|s| !config.is_annotation(&s.node.node_type))
            .filter_map(|s| infer_service(&s.node, config))
            .collect()
    }
}
