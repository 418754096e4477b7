//! # Tejun - Workflow Build-Order Engine
//!
//! **Tejun** turns a node-based automation workflow into a flat, deterministic
//! build order: the sequence of steps a person follows to recreate the
//! workflow by hand, one node at a time.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Graph**: Parse a workflow document with [`WorkflowGraph::from_json`],
//!     or implement [`IntoWorkflowGraph`] for your own format.
//! 2.  **Linearize**: Build a [`Linearizer`] (optionally configured through its builder)
//!     and call `linearize`. The engine walks the primary flow depth-first, holds merge
//!     points back until every producer is built, pulls capability providers in front of
//!     the nodes that use them, and inserts "go back" steps between mutually exclusive
//!     branches.
//! 3.  **Consume the Plan**: Walk [`BuildPlan::steps`], serialize them for storage, or
//!     render them with [`TutorialFormatter`].
//!
//! Linearization never fails. Malformed documents produce an empty plan, dangling
//! connections are ignored, and nodes that cannot be ordered (cycles, deadlocked
//! merges) are appended by a bounded fallback sweep.
//!
//! ## Quick Start
//!
//! ```rust
//! use tejun::prelude::*;
//!
//! let json = r#"{
//!     "nodes": [
//!         { "id": "1", "name": "Webhook", "type": "n8n-nodes-base.webhook", "position": [0, 0] },
//!         { "id": "2", "name": "Check", "type": "n8n-nodes-base.if", "position": [200, 0] },
//!         { "id": "3", "name": "Notify", "type": "n8n-nodes-base.slack", "position": [400, -100] },
//!         { "id": "4", "name": "Archive", "type": "n8n-nodes-base.googleSheets", "position": [400, 100] }
//!     ],
//!     "connections": {
//!         "Webhook": { "main": [[{ "node": "Check", "type": "main", "index": 0 }]] },
//!         "Check": { "main": [
//!             [{ "node": "Notify", "type": "main", "index": 0 }],
//!             [{ "node": "Archive", "type": "main", "index": 0 }]
//!         ] }
//!     }
//! }"#;
//!
//! let plan = Linearizer::default().linearize_json(json)?;
//! assert_eq!(plan.step_names(), vec!["Webhook", "Check", "Notify", "↩ Check", "Archive"]);
//!
//! println!("{}", TutorialFormatter::format_plan(&plan));
//! # Ok::<(), tejun::error::LoadError>(())
//! ```
//!
//! [`WorkflowGraph::from_json`]: crate::workflow::WorkflowGraph::from_json
//! [`IntoWorkflowGraph`]: crate::workflow::IntoWorkflowGraph
//! [`Linearizer`]: crate::linearizer::Linearizer
//! [`BuildPlan::steps`]: crate::plan::BuildPlan::steps
//! [`TutorialFormatter`]: crate::tutorial::TutorialFormatter

pub mod config;
pub mod error;
pub mod linearizer;
pub mod plan;
pub mod prelude;
pub mod step;
pub mod tutorial;
pub mod usage;
pub mod workflow;
