/// Reporting and output formatting module
/// Handles all console output for budgets and simulation results

use std::collections::HashMap;

use crate::budget::{BudgetSummary, EventPlan, UnitChange};
use crate::models::{HistogramBin, SimulationResult};

const BAR_WIDTH: usize = 40;

fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ {:^76} ║", title);
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");
}

/// Display the event parameters and derived financial figures
pub fn display_budget(plan: &EventPlan, summary: &BudgetSummary) {
    banner(&format!("BUDGET - {}", plan.event_name.to_uppercase()));

    println!(
        "Attendees: {} | Ticket Price: ${:.2}",
        plan.attendee_count, plan.ticket_price
    );
    println!(
        "Total Cost: ${:.2} | Revenue: ${:.2} | Profit: ${:.2} ({})",
        summary.total_cost,
        summary.revenue,
        summary.profit,
        if summary.is_viable { "viable" } else { "loss" }
    );
    match summary.break_even_attendees {
        Some(attendees) => println!("Break-even Attendance: {}", attendees),
        None => println!("Break-even Attendance: n/a (free event)"),
    }
    match summary.recommended_ticket_price {
        Some(price) => println!("Break-even Ticket Price: ${:.2}", price),
        None => println!("Break-even Ticket Price: n/a (no attendees)"),
    }

    println!("\nSupply Coverage:");
    for (item, coverage) in plan.items.iter().zip(&summary.coverage) {
        println!(
            "  {:<24} {:>7.1} / {:>7.1} servings  {}",
            item.display_name(),
            coverage.supply_servings,
            coverage.projected_servings,
            if coverage.covered { "ok" } else { "SHORT" }
        );
    }
}

/// Display simulation statistics and histograms for every simulated item, in plan order
pub fn display_simulation_results(
    plan: &EventPlan,
    results: &HashMap<String, SimulationResult>,
    confidence_level: f64,
    trial_count: u32,
) {
    banner(&format!(
        "MONTE CARLO RECOMMENDATIONS ({} trials, {:.0}% confidence)",
        trial_count, confidence_level
    ));

    for item in &plan.items {
        let Some(result) = results.get(&item.id) else {
            continue;
        };
        println!("{} [{}]", item.display_name(), item.id);
        println!(
            "   Mean: {:.1} | Median: {:.1} | Range: [{:.1}, {:.1}] servings",
            result.mean, result.median, result.min, result.max
        );
        println!(
            "   Recommend: {:.1} servings = {} units (${:.2}) | Purchased: {} | Stockout risk: {:.0}%",
            result.recommended_servings,
            result.recommended_units,
            result.total_cost,
            item.units_purchased,
            result.stockout_risk_percent
        );
        display_histogram(&result.distribution);
        println!();
    }

    let total: f64 = results.values().map(|r| r.total_cost).sum();
    println!("Total recommended spend: ${:.2}", total);
}

fn display_histogram(bins: &[HistogramBin]) {
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in bins {
        let bar = "█".repeat(bin.count * BAR_WIDTH / peak);
        println!(
            "   {:>8.1} - {:<8.1} |{:<width$}| {}{}",
            bin.lower_bound,
            bin.upper_bound,
            bar,
            bin.count,
            if bin.contains_recommendation { "  <- recommended" } else { "" },
            width = BAR_WIDTH
        );
    }
}

/// Display purchased-unit changes after applying recommendations
pub fn display_applied_changes(changes: &[UnitChange]) {
    if changes.is_empty() {
        println!("\nPurchased units already match the recommendations.");
        return;
    }
    println!("\nApplied recommendations:");
    for change in changes {
        println!(
            "  {}: {} -> {} units",
            change.item_id, change.old_units, change.new_units
        );
    }
}
