use crate::config::LinearizerConfig;
use crate::error::LoadError;
use crate::plan::BuildPlan;
use crate::workflow::WorkflowGraph;
use tracing::debug;

mod annotate;
mod index;
mod preprocess;
mod traversal;

use index::ConnectionIndex;
use preprocess::PreparedGraph;
use traversal::Traversal;

/// Turns a workflow graph into a build order a person can follow one step at a time.
///
/// A `Linearizer` holds only configuration; each call builds its working state
/// from scratch, so one instance can be shared across threads and reused.
#[derive(Debug, Clone, Default)]
pub struct Linearizer {
    config: LinearizerConfig,
}

pub struct LinearizerBuilder {
    config: LinearizerConfig,
}

impl LinearizerBuilder {
    pub fn new() -> Self {
        Self {
            config: LinearizerConfig::default(),
        }
    }

    /// Replaces the whole configuration. Later `with_*` calls extend it.
    pub fn with_config(mut self, config: LinearizerConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_primary_kind(mut self, kind: &str) -> Self {
        self.config.primary_kind = kind.to_string();
        self
    }
    pub fn with_branching_type(mut self, node_type: &str) -> Self {
        self.config.branching_types.push(node_type.to_string());
        self
    }
    pub fn with_trigger_type(mut self, node_type: &str) -> Self {
        self.config.trigger_types.push(node_type.to_string());
        self
    }
    pub fn with_annotation_type(mut self, node_type: &str) -> Self {
        self.config.annotation_types.push(node_type.to_string());
        self
    }
    pub fn build(self) -> Linearizer {
        Linearizer {
            config: self.config,
        }
    }
}

impl Default for LinearizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Linearizer {
    pub fn builder() -> LinearizerBuilder {
        LinearizerBuilder::new()
    }

    pub fn config(&self) -> &LinearizerConfig {
        &self.config
    }

    /// Computes the build order of `graph`.
    ///
    /// Never fails: a graph without a node list or connection map yields an
    /// empty plan, dangling connection references are dropped, and nodes the
    /// traversal cannot order are appended by the fallback sweep.
    pub fn linearize(&self, graph: &WorkflowGraph) -> BuildPlan {
        let Some(prepared) = PreparedGraph::new(graph, &self.config) else {
            return BuildPlan::default();
        };

        let index = ConnectionIndex::build(&prepared, &self.config);
        let (steps, report) = Traversal::new(&prepared, &index, &self.config).run();

        debug!(
            steps = steps.len(),
            nodes = prepared.nodes.len(),
            forced = report.forced_nodes.len(),
            "Linearized workflow"
        );
        BuildPlan::new(steps, report)
    }

    /// Parses a workflow document and computes its build order.
    pub fn linearize_json(&self, json: &str) -> Result<BuildPlan, LoadError> {
        let graph = WorkflowGraph::from_json(json)?;
        Ok(self.linearize(&graph))
    }
}

/// Linearizes `graph` with the default configuration.
pub fn build_order(graph: &WorkflowGraph) -> BuildPlan {
    Linearizer::default().linearize(graph)
}
