//! Tests for document loading, configuration and custom graph conversion.
mod common;
use common::*;
use tejun::error::WorkflowConversionError;
use tejun::prelude::*;

#[test]
fn test_connection_map_keeps_document_order() {
    let json = r#"{
        "nodes": [],
        "connections": {
            "Zeta": { "main": [[{ "node": "A", "type": "main", "index": 0 }]] },
            "Alpha": { "main": [[{ "node": "B", "type": "main", "index": 0 }]] },
            "Mid": {
                "ai_tool": [[{ "node": "C", "type": "ai_tool", "index": 0 }]],
                "main": [[{ "node": "D", "type": "main", "index": 0 }]]
            }
        }
    }"#;
    let graph = WorkflowGraph::from_json(json).expect("document parses");
    let connections = graph.connections.as_ref().unwrap();

    let sources: Vec<&str> = connections.iter().map(|(name, _)| name).collect();
    assert_eq!(sources, vec!["Zeta", "Alpha", "Mid"]);
    let kinds: Vec<&str> = connections
        .get("Mid")
        .unwrap()
        .iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(kinds, vec!["ai_tool", "main"]);
}

#[test]
fn test_null_output_groups_read_as_empty() {
    let json = r#"{
        "nodes": [],
        "connections": {
            "IF": { "main": [null, [{ "node": "Y", "index": 0 }]] }
        }
    }"#;
    let graph = WorkflowGraph::from_json(json).expect("document parses");
    let groups = graph.connections.as_ref().unwrap().get("IF").unwrap().get("main").unwrap();

    assert_eq!(groups.groups().len(), 2);
    assert!(groups.groups()[0].is_empty());
    assert_eq!(groups.groups()[1][0].node, "Y");
    assert_eq!(groups.groups()[1][0].kind, None);
}

#[test]
fn test_null_group_keeps_output_numbering() {
    let json = r#"{
        "nodes": [
            { "id": "t", "name": "Trigger", "type": "n8n-nodes-base.webhook" },
            { "id": "if", "name": "IF", "type": "n8n-nodes-base.if" },
            { "id": "y", "name": "Y", "type": "n8n-nodes-base.set" }
        ],
        "connections": {
            "Trigger": { "main": [[{ "node": "IF", "type": "main", "index": 0 }]] },
            "IF": { "main": [null, [{ "node": "Y", "type": "main", "index": 0 }]] }
        }
    }"#;
    let plan = Linearizer::default().linearize_json(json).expect("document parses");

    assert_eq!(plan.step_names(), vec!["Trigger", "IF", "Y"]);
    assert_eq!(
        task(&plan, "IF").connection_info.connects_to[0].output_index,
        1
    );
}

#[test]
fn test_node_defaults() {
    let json = r#"{ "nodes": [{ "id": "1", "name": "A", "type": "x.y" }], "connections": {} }"#;
    let graph = WorkflowGraph::from_json(json).expect("document parses");
    let node = &graph.nodes.as_ref().unwrap()[0];

    assert!(node.parameters.is_empty());
    assert_eq!(node.position, [0.0, 0.0]);
}

#[test]
fn test_builder_graph_writes_loadable_json() {
    let graph = create_agent();
    let json = graph.to_json().expect("graph serializes");

    assert_eq!(WorkflowGraph::from_json(&json).expect("graph parses"), graph);
    assert!(json.find("\"Chat\"").unwrap() < json.find("\"Agent\"").unwrap());
}

#[test]
fn test_ordered_map_insert_replaces_in_place() {
    let mut map: OrderedMap<u32> = [("b", 1), ("a", 2)].into_iter().collect();
    map.insert("b", 3);
    map.insert("c", 4);

    let entries: Vec<(&str, u32)> = map.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(entries, vec![("b", 3), ("a", 2), ("c", 4)]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("b"), Some(&3));
    assert_eq!(map.get("c"), Some(&4));
    assert_eq!(map.get("d"), None);
    *map.entry_or_default("a") += 10;
    *map.entry_or_default("d") += 1;
    assert_eq!(map.get("a"), Some(&12));
    assert_eq!(map.iter().last(), Some(("d", &1)));
}

#[test]
fn test_default_config() {
    let config = LinearizerConfig::default();

    assert_eq!(config.primary_kind, "main");
    assert!(config.is_branching("n8n-nodes-base.if"));
    assert!(config.is_branching("n8n-nodes-base.Switch"));
    assert!(!config.is_branching("n8n-nodes-base.merge"));
    assert!(config.is_annotation("n8n-nodes-base.stickyNote"));
    assert!(config.is_http_request("n8n-nodes-base.httpRequest"));
}

#[test]
fn test_trigger_detection() {
    let config = LinearizerConfig::default();

    assert!(config.is_trigger("n8n-nodes-base.scheduleTrigger"));
    assert!(config.is_trigger("@n8n/n8n-nodes-langchain.chatTrigger"));
    assert!(config.is_trigger("n8n-nodes-base.webhook"));
    assert!(config.is_trigger("n8n-nodes-base.start"));
    assert!(!config.is_trigger("n8n-nodes-base.respondToWebhook"));
    assert!(!config.is_trigger("n8n-nodes-base.set"));
}

#[test]
fn test_edge_kind_classification() {
    let config = LinearizerConfig::default();

    assert!(config.is_primary("main"));
    assert!(config.is_dependency_kind("ai_languageModel"));
    assert!(config.is_dependency_kind("ai_memory"));
    assert!(!config.is_dependency_kind("main"));
    assert!(!config.is_dependency_kind("error"));
}

#[test]
fn test_partial_config_file() {
    let config = LinearizerConfig::from_json(
        r#"{ "branchingTypes": ["if", "switch", "router"], "complexity": { "smallMax": 3 } }"#,
    )
    .expect("config parses");

    assert!(config.is_branching("acme.router"));
    assert_eq!(config.complexity.small_max, 3);
    assert_eq!(config.complexity.medium_max, 15);
    assert_eq!(config.trigger_types, LinearizerConfig::default().trigger_types);

    assert!(matches!(
        LinearizerConfig::from_json("[1, 2]"),
        Err(LoadError::JsonParse(_))
    ));
}

#[test]
fn test_custom_annotation_type() {
    let graph = create_linear_chain().with_node(TaskNode::new("n", "Comment", "acme.comment"));

    assert_eq!(build_order(&graph).len(), 5);
    let linearizer = Linearizer::builder().with_annotation_type("comment").build();
    assert_eq!(linearizer.linearize(&graph).len(), 4);
}

#[test]
fn test_custom_trigger_type() {
    let graph = create_linear_chain().with_node(TaskNode::new("p", "Poll", "acme.poller"));
    let linearizer = Linearizer::builder().with_trigger_type("poller").build();

    assert_eq!(linearizer.linearize(&graph).triggers(), vec!["Trigger", "Poll"]);
}

/// A minimal editor export: nodes by index, edges as index pairs.
struct Sketch {
    nodes: Vec<(&'static str, &'static str)>,
    edges: Vec<(usize, usize)>,
}

impl IntoWorkflowGraph for Sketch {
    fn into_workflow_graph(self) -> std::result::Result<WorkflowGraph, WorkflowConversionError> {
        let mut graph = WorkflowGraph::new();
        for (i, (name, node_type)) in self.nodes.iter().enumerate() {
            graph = graph.with_node(TaskNode::new(format!("n{}", i), *name, *node_type));
        }
        for &(from, to) in &self.edges {
            let (Some(source), Some(target)) = (self.nodes.get(from), self.nodes.get(to)) else {
                return Err(WorkflowConversionError::Validation(format!(
                    "edge {} -> {} points outside the node list",
                    from, to
                )));
            };
            graph = graph.connect(source.0, target.0);
        }
        Ok(graph)
    }
}

#[test]
fn test_custom_format_conversion() {
    let sketch = Sketch {
        nodes: vec![
            ("Send", "n8n-nodes-base.slack"),
            ("Start", "n8n-nodes-base.manualTrigger"),
            ("Fetch", "n8n-nodes-base.httpRequest"),
        ],
        edges: vec![(1, 2), (2, 0)],
    };

    let graph = sketch.into_workflow_graph().expect("sketch converts");
    assert_eq!(build_order(&graph).step_names(), vec!["Start", "Fetch", "Send"]);
}

#[test]
fn test_custom_format_conversion_error() {
    let sketch = Sketch {
        nodes: vec![("Start", "n8n-nodes-base.manualTrigger")],
        edges: vec![(0, 7)],
    };

    match sketch.into_workflow_graph() {
        Err(WorkflowConversionError::Validation(message)) => {
            assert!(message.contains("0 -> 7"));
        }
        Ok(_) => panic!("Expected a validation error"),
    }
}
