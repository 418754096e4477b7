use super::definition::WorkflowGraph;
use crate::error::WorkflowConversionError;

/// A trait for custom graph formats that can be converted into a `WorkflowGraph`.
///
/// Implement it on your own document structs when your editor does not export
/// the name-keyed connection format directly. Node ids and names must both be
/// filled in: connections are joined on names, steps are identified by ids.
///
/// # Example
///
/// ```rust
/// use tejun::prelude::*;
/// use tejun::error::WorkflowConversionError;
///
/// struct Edge { from: String, to: String }
/// struct MyFlow { steps: Vec<(String, String)>, edges: Vec<Edge> }
///
/// impl IntoWorkflowGraph for MyFlow {
///     fn into_workflow_graph(self) -> std::result::Result<WorkflowGraph, WorkflowConversionError> {
///         let mut graph = WorkflowGraph::new();
///         for (i, (name, kind)) in self.steps.into_iter().enumerate() {
///             graph = graph.with_node(TaskNode::new(format!("n{}", i), name, kind));
///         }
///         for edge in &self.edges {
///             graph = graph.connect(&edge.from, &edge.to);
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoWorkflowGraph {
    /// Consumes the object and converts it into a linearizable workflow graph.
    fn into_workflow_graph(self) -> Result<WorkflowGraph, WorkflowConversionError>;
}

impl IntoWorkflowGraph for WorkflowGraph {
    fn into_workflow_graph(self) -> Result<WorkflowGraph, WorkflowConversionError> {
        Ok(self)
    }
}
