use crate::error::{LoadError, read_file};
use serde::{Deserialize, Serialize};

/// Tuning knobs for how node types and edge kinds are classified.
///
/// Every field has a default, so a config file only needs to list what it changes.
///
/// Type-tag matching is done on the full tag or on its last `.`-separated
/// segment, ignoring case: `n8n-nodes-base.if` matches a configured `"if"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinearizerConfig {
    /// The edge kind that carries the main execution flow.
    pub primary_kind: String,
    /// Documentation-only node types that never appear in a build order.
    pub annotation_types: Vec<String>,
    /// Control-flow node types whose outputs are always mutually exclusive.
    pub branching_types: Vec<String>,
    /// Extra trigger types, on top of any tag containing "trigger".
    pub trigger_types: Vec<String>,
    /// Auxiliary edge kinds starting with this prefix are capability providers.
    pub dependency_kind_prefix: String,
    /// Generic HTTP node types whose service is read from `parameters.url`.
    pub http_request_types: Vec<String>,
    pub complexity: ComplexityThresholds,
}

/// Upper bounds (inclusive) on the real-step count for each complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplexityThresholds {
    pub small_max: usize,
    pub medium_max: usize,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            small_max: 5,
            medium_max: 15,
        }
    }
}

impl Default for LinearizerConfig {
    fn default() -> Self {
        Self {
            primary_kind: "main".to_string(),
            annotation_types: vec!["stickyNote".to_string()],
            branching_types: vec!["if".to_string(), "switch".to_string()],
            trigger_types: vec!["webhook".to_string(), "start".to_string()],
            dependency_kind_prefix: "ai_".to_string(),
            http_request_types: vec!["httpRequest".to_string()],
            complexity: ComplexityThresholds::default(),
        }
    }
}

impl LinearizerConfig {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        Self::from_json(&read_file(path)?)
    }

    pub fn is_annotation(&self, node_type: &str) -> bool {
        matches_any(node_type, &self.annotation_types)
    }

    pub fn is_branching(&self, node_type: &str) -> bool {
        matches_any(node_type, &self.branching_types)
    }

    pub fn is_trigger(&self, node_type: &str) -> bool {
        node_type.to_lowercase().contains("trigger") || matches_any(node_type, &self.trigger_types)
    }

    pub fn is_http_request(&self, node_type: &str) -> bool {
        matches_any(node_type, &self.http_request_types)
    }

    pub fn is_primary(&self, kind: &str) -> bool {
        kind == self.primary_kind
    }

    pub fn is_dependency_kind(&self, kind: &str) -> bool {
        !self.is_primary(kind) && kind.starts_with(&self.dependency_kind_prefix)
    }
}

/// The last `.`-separated segment of a type tag (`n8n-nodes-base.slack` -> `slack`).
pub fn type_segment(node_type: &str) -> &str {
    node_type.rsplit('.').next().unwrap_or(node_type)
}

fn matches_any(node_type: &str, candidates: &[String]) -> bool {
    let segment = type_segment(node_type);
    candidates
        .iter()
        .any(|c| c.eq_ignore_ascii_case(node_type) || c.eq_ignore_ascii_case(segment))
}
