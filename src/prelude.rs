//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the tejun crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use tejun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = WorkflowGraph::from_file("path/to/workflow.json")?;
//! let config = LinearizerConfig::from_file("path/to/config.json")?;
//!
//! let linearizer = Linearizer::builder().with_config(config).build();
//! let plan = linearizer.linearize(&graph);
//!
//! println!("{}", TutorialFormatter::format_plan(&plan));
//! # Ok(())
//! # }
//! ```

// Engine
pub use crate::config::{ComplexityThresholds, LinearizerConfig};
pub use crate::linearizer::{Linearizer, LinearizerBuilder, build_order};

// Input model
pub use crate::workflow::{
    ConnectionTarget, IntoWorkflowGraph, NodeOutputs, OrderedMap, OutputGroups, TaskNode,
    WorkflowGraph,
};

// Output model and derived views
pub use crate::plan::{BuildPlan, BuildSummary, Complexity, TraversalReport};
pub use crate::step::{
    ConnectionDescriptor, ConnectionInfo, ConnectionType, ReturnStep, Step, TaskStep,
};
pub use crate::usage::{ServiceUsage, infer_service};

// Error types
pub use crate::error::{LoadError, WorkflowConversionError};

// Rendering
pub use crate::tutorial::TutorialFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
