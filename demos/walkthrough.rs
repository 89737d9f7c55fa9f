//! Walkthrough: step through both built-in scenarios and compare where the
//! model looks when it translates the first "bat".
//!
//! Usage:
//!   cargo run --example walkthrough
//!   cargo run --example walkthrough -- --step 7 --svg bat.svg

use anyhow::Result;
use attnviz_rs::{
    top_context, Command, Dataset, Shell, VizConfig, ATTENTION_ID, SEQUENTIAL_ID,
};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "walkthrough")]
#[command(about = "Compare local and global attention on the bat paragraph")]
struct Args {
    /// Output step to stop at (7 is the first "bat")
    #[arg(short, long, default_value = "7")]
    step: usize,

    /// Write the attention scenario's final frame as SVG
    #[arg(long)]
    svg: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let dataset = Arc::new(Dataset::builtin());
    let config = VizConfig::default();

    println!("=== Attention walkthrough: step {} ===\n", args.step);

    for id in [SEQUENTIAL_ID, ATTENTION_ID] {
        let mut shell = Shell::new(Arc::clone(&dataset), config.clone());
        shell.apply(&Command::Select(id.to_string()))?;
        shell.apply(&Command::Start)?;
        for _ in 0..args.step {
            shell.apply(&Command::Next)?;
        }
        shell.apply(&Command::Wait(config.reconcile_delay_ms))?;

        let scene = shell.scene();
        let Some(example) = shell.stepper().selected_example() else {
            continue;
        };
        let Some(step) = scene.active_step else {
            continue;
        };
        let output = &example.output_steps[step];

        println!("--- {} ---", example.name);
        println!("Output token {}: {}", step, output.output_token);
        println!("Connectors drawn: {}", scene.curves.len());
        println!("Top context:");
        for entry in top_context(&example.input_tokens, &output.weights, &config) {
            println!("  {:>3}% {}", (entry.weight * 100.0).round(), entry.token);
        }
        println!();

        if id == ATTENTION_ID {
            if let Some(path) = &args.svg {
                std::fs::write(path, shell.render_svg()?)?;
                println!("SVG written to {path}");
            }
        }
    }

    Ok(())
}
