//! Common test utilities for building workflow graphs.
use tejun::prelude::*;

/// `Trigger -> A -> B -> C`, all primary and single-target.
#[allow(dead_code)]
pub fn create_linear_chain() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("t", "Trigger", "n8n-nodes-base.manualTrigger"))
        .with_node(TaskNode::new("a", "A", "n8n-nodes-base.set"))
        .with_node(TaskNode::new("b", "B", "n8n-nodes-base.code"))
        .with_node(TaskNode::new("c", "C", "n8n-nodes-base.slack"))
        .connect("Trigger", "A")
        .connect("A", "B")
        .connect("B", "C")
}

/// `Trigger -> IF`, with IF's `true` output feeding X and `false` feeding Y.
#[allow(dead_code)]
pub fn create_conditional() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("t", "Trigger", "n8n-nodes-base.webhook"))
        .with_node(TaskNode::new("if", "IF", "n8n-nodes-base.if").at(200.0, 0.0))
        .with_node(TaskNode::new("x", "X", "n8n-nodes-base.slack"))
        .with_node(TaskNode::new("y", "Y", "n8n-nodes-base.gmail"))
        .connect("Trigger", "IF")
        .connect_kind("IF", "main", 0, "X", 0)
        .connect_kind("IF", "main", 1, "Y", 0)
}

/// Two independent chains `T1 -> P1` and `T2 -> P2` joining in `M`.
///
/// The merge node is listed first so document order alone cannot place it.
#[allow(dead_code)]
pub fn create_merge() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("m", "M", "n8n-nodes-base.merge"))
        .with_node(TaskNode::new("t2", "T2", "n8n-nodes-base.scheduleTrigger"))
        .with_node(TaskNode::new("p2", "P2", "n8n-nodes-base.httpRequest"))
        .with_node(TaskNode::new("t1", "T1", "n8n-nodes-base.webhook"))
        .with_node(TaskNode::new("p1", "P1", "n8n-nodes-base.set"))
        .connect("T1", "P1")
        .connect("T2", "P2")
        .connect_kind("P1", "main", 0, "M", 0)
        .connect_kind("P2", "main", 0, "M", 1)
}

/// `Trigger -> Agent -> Reply`, with a model and a tool feeding the agent.
#[allow(dead_code)]
pub fn create_agent() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("t", "Chat", "@n8n/n8n-nodes-langchain.chatTrigger"))
        .with_node(TaskNode::new("agent", "Agent", "@n8n/n8n-nodes-langchain.agent"))
        .with_node(TaskNode::new("reply", "Reply", "n8n-nodes-base.slack"))
        .with_node(TaskNode::new("llm", "Model", "@n8n/n8n-nodes-langchain.lmChatOpenAi"))
        .with_node(TaskNode::new("tool", "Search", "@n8n/n8n-nodes-langchain.toolSerpApi"))
        .connect("Chat", "Agent")
        .connect("Agent", "Reply")
        .connect_kind("Model", "ai_languageModel", 0, "Agent", 0)
        .connect_kind("Search", "ai_tool", 0, "Agent", 0)
}

/// Two islands with their own triggers: `T1 -> A1 -> A2` and `T2 -> B1`.
#[allow(dead_code)]
pub fn create_islands() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("t1", "T1", "n8n-nodes-base.webhook"))
        .with_node(TaskNode::new("a1", "A1", "n8n-nodes-base.set"))
        .with_node(TaskNode::new("a2", "A2", "n8n-nodes-base.code"))
        .with_node(TaskNode::new("t2", "T2", "n8n-nodes-base.cron"))
        .with_node(TaskNode::new("b1", "B1", "n8n-nodes-base.slack"))
        .connect("T1", "A1")
        .connect("A1", "A2")
        .connect("T2", "B1")
}

/// `T -> A -> M -> B -> M`: M waits on B, which waits on M.
#[allow(dead_code)]
pub fn create_merge_deadlock() -> WorkflowGraph {
    WorkflowGraph::new()
        .with_node(TaskNode::new("t", "T", "n8n-nodes-base.webhook"))
        .with_node(TaskNode::new("a", "A", "n8n-nodes-base.set"))
        .with_node(TaskNode::new("m", "M", "n8n-nodes-base.merge"))
        .with_node(TaskNode::new("b", "B", "n8n-nodes-base.code"))
        .connect("T", "A")
        .connect_kind("A", "main", 0, "M", 0)
        .connect("M", "B")
        .connect_kind("B", "main", 0, "M", 1)
}

/// Ids of the real steps in build order.
#[allow(dead_code)]
pub fn real_ids(plan: &BuildPlan) -> Vec<String> {
    plan.real_steps().map(|s| s.node.id.clone()).collect()
}

/// Finds the real step for a node name, panicking with a readable message if absent.
#[allow(dead_code)]
pub fn task<'a>(plan: &'a BuildPlan, name: &str) -> &'a TaskStep {
    plan.real_steps()
        .find(|s| s.node.name == name)
        .unwrap_or_else(|| panic!("no step for node '{}'", name))
}

/// Asserts that every primary edge of `graph` goes forward in `plan`.
#[allow(dead_code)]
pub fn assert_topological(graph: &WorkflowGraph, plan: &BuildPlan) {
    let nodes = graph.nodes.as_ref().expect("graph has nodes");
    let id_of = |name: &str| {
        nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.id.clone())
            .expect("known node")
    };
    let connections = graph.connections.as_ref().expect("graph has connections");
    for (source, outputs) in connections.iter() {
        let Some(groups) = outputs.get("main") else {
            continue;
        };
        for target in groups.groups().iter().flatten() {
            let from = plan.position_of(&id_of(source)).expect("source emitted");
            let to = plan.position_of(&id_of(&target.node)).expect("target emitted");
            assert!(
                from < to,
                "'{}' (step {}) should come before '{}' (step {})",
                source,
                from + 1,
                target.node,
                to + 1
            );
        }
    }
}
