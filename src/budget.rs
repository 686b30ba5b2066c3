/// Event plan and budget arithmetic
/// The plan is an explicit value: after changing it, call `budget()` again to
/// get fresh derived figures.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PlanError;
use crate::models::{Category, Item, Profile, Relationship, SimulationConfig, SimulationResult};
use crate::profiles::weighted_multiplier;

/// Everything the user has entered about an event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPlan {
    pub event_name: String,
    pub attendee_count: u32,
    pub ticket_price: f64,
    pub profiles: Vec<Profile>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Whether current purchases cover the expected consumption of one item
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCoverage {
    pub item_id: String,
    pub supply_servings: f64,
    pub projected_servings: f64,
    pub covered: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_cost: f64,
    pub revenue: f64,
    pub profit: f64,
    pub is_viable: bool,
    pub break_even_attendees: Option<u32>,
    pub recommended_ticket_price: Option<f64>,
    pub coverage: Vec<ItemCoverage>,
}

/// Purchased units changed by `apply_recommendations`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitChange {
    pub item_id: String,
    pub old_units: u32,
    pub new_units: u32,
}

impl EventPlan {
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let raw = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| PlanError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), PlanError> {
        let raw = serde_json::to_string_pretty(self).map_err(|source| PlanError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Derived financial figures and per-item coverage
    pub fn budget(&self) -> BudgetSummary {
        let total_cost: f64 = self
            .items
            .iter()
            .map(|item| item.cost_per_unit * item.units_purchased as f64)
            .sum();
        let revenue = self.attendee_count as f64 * self.ticket_price;
        let profit = revenue - total_cost;

        let break_even_attendees =
            (self.ticket_price > 0.0).then(|| (total_cost / self.ticket_price).ceil() as u32);
        let recommended_ticket_price = (self.attendee_count > 0)
            .then(|| round_up_to_cent(total_cost / self.attendee_count as f64));

        let per_attendee = if self.profiles.is_empty() {
            0.0
        } else {
            weighted_multiplier(&self.profiles)
        };
        let projected_servings = self.attendee_count as f64 * per_attendee;
        let coverage = self
            .items
            .iter()
            .map(|item| {
                let supply_servings = item.supply_servings();
                ItemCoverage {
                    item_id: item.id.clone(),
                    supply_servings,
                    projected_servings,
                    covered: supply_servings >= projected_servings,
                }
            })
            .collect();

        BudgetSummary {
            total_cost,
            revenue,
            profit,
            is_viable: profit >= 0.0,
            break_even_attendees,
            recommended_ticket_price,
            coverage,
        }
    }

    /// Simulation input restricted to items in `categories`. Only relationships
    /// with both ends among the kept items are passed on.
    pub fn simulation_config(
        &self,
        categories: &[Category],
        confidence_level: f64,
        trial_count: u32,
    ) -> SimulationConfig {
        let items: Vec<Item> = self
            .items
            .iter()
            .filter(|item| categories.contains(&item.category))
            .cloned()
            .collect();
        let kept = |id: &str| items.iter().any(|item| item.id == id);
        let relationships = self
            .relationships
            .iter()
            .filter(|rel| kept(&rel.primary_item_id) && kept(&rel.secondary_item_id))
            .cloned()
            .collect();

        SimulationConfig {
            attendee_count: self.attendee_count,
            profiles: self.profiles.clone(),
            items,
            relationships,
            confidence_level,
            trial_count,
        }
    }

    /// Overwrite purchased units with the simulated recommendations.
    /// Returns the items whose count actually changed.
    pub fn apply_recommendations(&mut self, results: &HashMap<String, SimulationResult>) -> Vec<UnitChange> {
        let mut changes = Vec::new();
        for item in &mut self.items {
            let Some(result) = results.get(&item.id) else {
                continue;
            };
            if item.units_purchased != result.recommended_units {
                changes.push(UnitChange {
                    item_id: item.id.clone(),
                    old_units: item.units_purchased,
                    new_units: result.recommended_units,
                });
                item.units_purchased = result.recommended_units;
            }
        }
        let unmatched = results
            .keys()
            .filter(|id| !self.items.iter().any(|item| &item.id == *id))
            .count();
        if unmatched > 0 {
            warn!("{unmatched} recommendation(s) did not match any item in the plan");
        }
        changes
    }

    /// Sample backyard cookout used when no plan file is given
    pub fn demo() -> Self {
        let item = |id: &str, name: &str, cost: f64, units: u32, servings: f64, category| Item {
            id: id.to_string(),
            name: Some(name.to_string()),
            cost_per_unit: cost,
            units_purchased: units,
            servings_per_unit: servings,
            category,
        };
        let link = |primary: &str, secondary: &str, ratio: f64| Relationship {
            primary_item_id: primary.to_string(),
            secondary_item_id: secondary.to_string(),
            ratio,
        };

        Self {
            event_name: "Summer Cookout".to_string(),
            attendee_count: 60,
            ticket_price: 15.0,
            profiles: vec![
                Profile::new("Light eater", 25.0, 0.6),
                Profile::new("Average eater", 55.0, 1.0),
                Profile::new("Heavy eater", 20.0, 1.7),
            ],
            items: vec![
                item("beer", "Beer (24-pack)", 28.0, 3, 24.0, Category::Drinks),
                item("soda", "Soda (12-pack)", 6.5, 4, 12.0, Category::Drinks),
                item("burgers", "Burger patties (8)", 14.0, 6, 8.0, Category::Food),
                item("buns", "Burger buns (8)", 3.5, 6, 8.0, Category::Food),
                item("chips", "Chips (family bag)", 4.0, 5, 10.0, Category::Food),
                item("plates", "Paper plates (50)", 5.0, 2, 50.0, Category::Supplies),
            ],
            relationships: vec![link("burgers", "buns", 1.0)],
        }
    }
}

fn round_up_to_cent(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}
