use clap::{Parser, ValueEnum};
use std::time::Instant;
use tejun::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Selects how the build order is printed.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Numbered tutorial with wiring instructions
    Text,
    /// The ordered step records as JSON
    Json,
    /// Counts, complexity and service usage only
    Summary,
}

/// Prints the step-by-step build order of an automation workflow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file
    workflow_path: String,

    /// Optional path to a linearizer configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let config = match &cli.config {
        Some(path) => LinearizerConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => LinearizerConfig::default(),
    };
    let graph = WorkflowGraph::from_file(&cli.workflow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workflow: {}", e)));
    let load_duration = load_start.elapsed();

    // --- 2. Linearization ---
    let linearize_start = Instant::now();
    let linearizer = Linearizer::builder().with_config(config).build();
    let plan = linearizer.linearize(&graph);
    let linearize_duration = linearize_start.elapsed();

    // --- 3. Output ---
    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(plan.steps())
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize steps: {}", e)));
            println!("{}", json);
        }
        OutputFormat::Summary => print_summary(&plan, linearizer.config()),
        OutputFormat::Text => {
            println!("{}", TutorialFormatter::format_plan(&plan));
            print_summary(&plan, linearizer.config());
            println!("\n--- Performance Summary ---");
            println!("File Loading:    {:?}", load_duration);
            println!("Linearization:   {:?}", linearize_duration);
        }
    }
}

fn print_summary(plan: &BuildPlan, config: &LinearizerConfig) {
    let summary = plan.summary(&config.complexity);
    println!("--- Build Summary ---");
    print!("{}", TutorialFormatter::format_summary(&summary));

    let triggers = plan.triggers();
    if !triggers.is_empty() {
        println!("Trigger names: {}", triggers.join(", "));
    }

    let usage = plan.service_usage(config);
    if !usage.is_empty() {
        println!("\n--- Services ---");
        for (service, count) in usage.iter() {
            println!("{:<24} {}", service, count);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
