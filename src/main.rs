//! Fusion Planner - command line entry point
//!
//! Reads an inventory dump (JSON array of `{slot, type, level, weight}`),
//! plans fusions toward the configured targets, and prints what to fuse
//! and what to sell.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fusion_planner::core::error::Result;
use fusion_planner::inventory::{describe, is_fusable};
use fusion_planner::planner::{build_plan, FusionInput, FusionPlan, FusionPlanner, TargetStatus};
use fusion_planner::{OwnedItem, PlannerConfig};
use tracing_subscriber::EnvFilter;

/// Plan chip fusions and pick chips to sell
#[derive(Parser, Debug)]
#[command(name = "fusion-planner")]
#[command(about = "Plan chip fusions toward a target loadout and list leftover chips to sell")]
struct Args {
    /// Inventory JSON file
    #[arg(long, short = 'i')]
    inventory: PathBuf,

    /// Planner configuration (TOML); defaults to the built-in target table
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print each target's planned tree before pruning
    #[arg(long)]
    tree: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable fusion, sell and target lists
    Text,
    /// The full plan as pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "fusion_planner=debug"
    } else {
        "fusion_planner=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => PlannerConfig::load_from_toml(path)?,
        None => PlannerConfig::default(),
    };
    let planner = FusionPlanner::new(config)?;

    let content = std::fs::read_to_string(&args.inventory)?;
    let inventory: Vec<OwnedItem> = serde_json::from_str(&content)?;
    tracing::info!(
        "Loaded {} slot(s) from {}",
        inventory.len(),
        args.inventory.display()
    );

    let (mut set, ignored) = FusionPlanner::load(inventory, is_fusable);
    let resolved = planner.resolve(&mut set)?;

    if args.tree {
        for entry in &resolved {
            println!("{}", describe(&entry.target));
            println!("{}\n", entry.root.render_tree());
        }
    }

    let plan = build_plan(resolved, &mut set, ignored)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print_text(&plan),
    }

    Ok(())
}

fn describe_input(input: &FusionInput) -> String {
    match input {
        FusionInput::Item(item) => format!("{} (slot {})", describe(&item.code), item.slot.0),
        FusionInput::Fused(code) => format!("{} (fused)", describe(code)),
    }
}

fn print_text(plan: &FusionPlan) {
    println!("=== FUSIONS ({}) ===", plan.fusions.len());
    for record in &plan.fusions {
        println!(
            "  {} + {} -> {}",
            describe_input(&record.lower),
            describe_input(&record.upper),
            describe(&record.product)
        );
    }

    println!("\n=== SELL ({}) ===", plan.disposable.len());
    for item in &plan.disposable {
        println!("  {} (slot {})", describe(&item.code), item.slot.0);
    }

    println!(
        "\n=== TARGETS ({}/{} met) ===",
        plan.satisfied_count(),
        plan.targets.len()
    );
    for outcome in &plan.targets {
        let status = match outcome.status {
            TargetStatus::Held(code) => format!("held as {}", describe(&code)),
            TargetStatus::Fused(code) => format!("fused into {}", describe(&code)),
            TargetStatus::Partial => "partial".to_string(),
            TargetStatus::Unmet => "unmet".to_string(),
        };
        println!("  {:<32} {}", describe(&outcome.target), status);
    }
}
