use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use party_budget_sim::monte_carlo::{run_simulation_with, RunOptions};
use party_budget_sim::reporting::{display_applied_changes, display_budget, display_simulation_results};
use party_budget_sim::{Category, EventPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    Drinks,
    Food,
    Supplies,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Drinks => Category::Drinks,
            CategoryArg::Food => Category::Food,
            CategoryArg::Supplies => Category::Supplies,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "party-budget-sim", version)]
#[command(about = "Event budget check with Monte Carlo purchase recommendations")]
struct Args {
    /// Event plan JSON file (uses a built-in sample cookout when omitted)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Confidence level in percent for the recommended quantities
    #[arg(long, default_value_t = 95.0)]
    confidence: f64,

    /// Number of Monte Carlo trials per item
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Categories to simulate (repeatable; all when omitted)
    #[arg(long = "category", value_enum)]
    categories: Vec<CategoryArg>,

    /// Overwrite purchased units with the recommendations
    #[arg(long)]
    apply: bool,

    /// Write the resulting plan to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the recommendations as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut plan = match &args.plan {
        Some(path) => EventPlan::load(path)?,
        None => EventPlan::demo(),
    };

    let categories: Vec<Category> = if args.categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        args.categories.iter().copied().map(Category::from).collect()
    };

    let config = plan.simulation_config(&categories, args.confidence, args.trials);
    let options = RunOptions {
        seed: args.seed,
        cancel: None,
    };
    let results = run_simulation_with(&config, &options).context("simulation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display_budget(&plan, &plan.budget());
        display_simulation_results(&plan, &results, args.confidence, args.trials);
    }

    if args.apply {
        let changes = plan.apply_recommendations(&results);
        if !args.json {
            display_applied_changes(&changes);
            display_budget(&plan, &plan.budget());
        }
    }

    if let Some(path) = &args.save {
        plan.save(path)?;
        if !args.json {
            println!("\nPlan written to {}", path.display());
        }
    }

    Ok(())
}
