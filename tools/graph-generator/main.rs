use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tejun::prelude::*;

/// A CLI tool to generate random workflow graphs for the tejun linearizer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of trigger nodes (each starts its own chain)
    #[arg(long, default_value_t = 1)]
    triggers: usize,

    /// Number of non-trigger nodes to generate
    #[arg(long, default_value_t = 20)]
    nodes: usize,

    /// Probability that a generated node is a conditional or switch
    #[arg(long, default_value_t = 0.15)]
    branch_rate: f64,

    /// Probability that a generated node merges two earlier nodes
    #[arg(long, default_value_t = 0.1)]
    merge_rate: f64,

    /// Probability that a generated node is an agent with a model provider
    #[arg(long, default_value_t = 0.1)]
    agent_rate: f64,

    /// Add a back edge that closes a cycle
    #[arg(long)]
    cycles: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const ACTION_TYPES: [&str; 6] = [
    "n8n-nodes-base.slack",
    "n8n-nodes-base.gmail",
    "n8n-nodes-base.httpRequest",
    "n8n-nodes-base.set",
    "n8n-nodes-base.code",
    "n8n-nodes-base.googleSheets",
];

const HTTP_HOSTS: [&str; 3] = [
    "https://api.github.com/repos",
    "https://www.example.com/hook",
    "https://api.openweathermap.org/data/2.5/weather",
];

/// A node that can still take primary children, with its number of output groups.
struct Producer {
    name: String,
    outputs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Add validation to ensure rates are probabilities
    for (flag, rate) in [
        ("--branch-rate", cli.branch_rate),
        ("--merge-rate", cli.merge_rate),
        ("--agent-rate", cli.agent_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            eprintln!("Error: {} ({}) must be between 0 and 1", flag, rate);
            std::process::exit(1);
        }
    }
    if cli.triggers == 0 {
        eprintln!("Error: --triggers must be at least 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating workflow ({} trigger(s), {} node(s))...",
        cli.triggers, cli.nodes
    );

    let graph = generate_workflow(&mut rng, &cli);
    let node_count = graph.node_count();
    fs::write(&cli.output, graph.to_json()?)?;

    println!(
        "Successfully generated {} nodes and saved the workflow to '{}'",
        node_count, cli.output
    );

    Ok(())
}

fn generate_workflow(rng: &mut StdRng, cli: &Cli) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new();
    let mut producers: Vec<Producer> = Vec::new();
    let mut next_id = 0usize;
    let mut new_id = || {
        next_id += 1;
        format!("node-{}", next_id)
    };

    for t in 0..cli.triggers {
        let name = format!("Trigger {}", t + 1);
        graph = graph.with_node(
            TaskNode::new(new_id(), &name, "n8n-nodes-base.webhook").at(0.0, t as f64 * 300.0),
        );
        producers.push(Producer { name, outputs: 1 });
    }

    for i in 0..cli.nodes {
        let x = (i + 1) as f64 * 220.0;
        let y = rng.random_range(-400.0..400.0);

        if producers.len() >= 2 && rng.random_bool(cli.merge_rate) {
            let name = format!("Merge {}", i + 1);
            let first = rng.random_range(0..producers.len());
            let mut second = rng.random_range(0..producers.len());
            if second == first {
                second = (first + 1) % producers.len();
            }
            let (a, a_out) = pick_output(rng, &producers[first]);
            let (b, b_out) = pick_output(rng, &producers[second]);
            graph = graph
                .with_node(TaskNode::new(new_id(), &name, "n8n-nodes-base.merge").at(x, y))
                .connect_kind(&a, "main", a_out, &name, 0)
                .connect_kind(&b, "main", b_out, &name, 1);
            producers.push(Producer { name, outputs: 1 });
            continue;
        }

        let parent = rng.random_range(0..producers.len());
        let (parent_name, parent_output) = pick_output(rng, &producers[parent]);

        let (name, node_type, outputs) = if rng.random_bool(cli.branch_rate) {
            if rng.random_bool(0.5) {
                (format!("If {}", i + 1), "n8n-nodes-base.if", 2)
            } else {
                (format!("Switch {}", i + 1), "n8n-nodes-base.switch", 3)
            }
        } else if rng.random_bool(cli.agent_rate) {
            (
                format!("Agent {}", i + 1),
                "@n8n/n8n-nodes-langchain.agent",
                1,
            )
        } else {
            let node_type = ACTION_TYPES[rng.random_range(0..ACTION_TYPES.len())];
            (format!("Step {}", i + 1), node_type, 1)
        };

        let mut node = TaskNode::new(new_id(), &name, node_type).at(x, y);
        if node_type.ends_with("httpRequest") {
            let url = HTTP_HOSTS[rng.random_range(0..HTTP_HOSTS.len())];
            node = node.with_parameter("url", serde_json::json!(url));
        }
        graph = graph
            .with_node(node)
            .connect_kind(&parent_name, "main", parent_output, &name, 0);

        if node_type.ends_with(".agent") {
            let model = format!("Model {}", i + 1);
            graph = graph
                .with_node(
                    TaskNode::new(new_id(), &model, "@n8n/n8n-nodes-langchain.lmChatOpenAi")
                        .at(x, y + 200.0),
                )
                .connect_kind(&model, "ai_languageModel", 0, &name, 0);
        }

        producers.push(Producer { name, outputs });
    }

    if cli.cycles && producers.len() > cli.triggers + 1 {
        let from = &producers[producers.len() - 1].name;
        let to = &producers[rng.random_range(cli.triggers..producers.len() - 1)].name;
        println!("-> Closing a cycle from '{}' back to '{}'.", from, to);
        graph = graph.connect(from, to);
    }

    graph
}

fn pick_output(rng: &mut StdRng, producer: &Producer) -> (String, usize) {
    (
        producer.name.clone(),
        rng.random_range(0..producer.outputs),
    )
}
