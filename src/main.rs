//! attnviz-rs CLI: play a scripted session and render the resulting frame

use anyhow::{Context, Result};
use attnviz_rs::{parse_script, Dataset, Shell, VizConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "attnviz-rs")]
#[command(about = "Attention visualization: weighted highlights and connectors for a translation")]
#[command(version)]
struct Cli {
    /// Path to dataset JSON file (built-in scenarios if omitted)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Path to config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for scene.json and scene.svg
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Commands to play, separated by ';' (e.g. "select attention-context; start; next")
    #[arg(short, long, default_value = "")]
    script: String,

    /// Viewport width in px (overrides the config)
    #[arg(short, long)]
    width: Option<f64>,

    /// List the examples and exit
    #[arg(long)]
    list: bool,

    /// Report dataset authoring issues and exit
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = match &cli.dataset {
        Some(path) => Dataset::load(&path.to_string_lossy())?,
        None => Dataset::builtin(),
    };
    let mut config = match &cli.config {
        Some(path) => VizConfig::load(&path.to_string_lossy())?,
        None => VizConfig::default(),
    };
    if let Some(width) = cli.width {
        anyhow::ensure!(width > 0.0, "--width must be positive, got {width}");
        config.layout.viewport_width = width;
    }

    if cli.list {
        println!("=== Examples ===");
        for example in dataset.examples() {
            println!(
                "{:<20} {:<28} {} inputs, {} steps",
                example.id,
                example.name,
                example.n_inputs(),
                example.n_steps()
            );
        }
        return Ok(());
    }

    if cli.validate {
        println!("=== Dataset issues ===");
        if dataset.issues().is_empty() {
            println!("None");
        }
        for issue in dataset.issues() {
            println!("- {issue}");
        }
        return Ok(());
    }

    let commands = parse_script(&cli.script)?;
    info!("Playing {} commands", commands.len());

    let mut shell = Shell::new(Arc::new(dataset), config);
    shell.run(&commands)?;
    shell.print_summary();

    // Save scene
    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let json_path = cli.output.join("scene.json");
    std::fs::write(&json_path, shell.scene().to_json()?)?;
    let svg_path = cli.output.join("scene.svg");
    std::fs::write(&svg_path, shell.render_svg()?)?;
    info!(
        "Scene saved to {} and {}",
        json_path.display(),
        svg_path.display()
    );

    Ok(())
}
