/// Data structures shared by the simulator, the budget store and the reports

use serde::{Deserialize, Serialize};

/// Behavioral segment of the attendee population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Share of attendees, 0-100 (need not sum to 100 before normalization)
    pub percentage: f64,
    /// Mean servings one attendee of this profile consumes per item
    pub consumption_multiplier: f64,
}

impl Profile {
    pub fn new(name: &str, percentage: f64, consumption_multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            percentage,
            consumption_multiplier,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drinks,
    Food,
    Supplies,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Drinks, Category::Food, Category::Supplies];
}

/// One purchasable product on the shopping list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub cost_per_unit: f64,
    pub units_purchased: u32,
    pub servings_per_unit: f64,
    pub category: Category,
}

impl Item {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Current supply expressed in servings
    pub fn supply_servings(&self) -> f64 {
        self.servings_per_unit * self.units_purchased as f64
    }
}

/// Consuming one unit of `primary_item_id` requires `ratio` units of `secondary_item_id`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub primary_item_id: String,
    pub secondary_item_id: String,
    pub ratio: f64,
}

/// Immutable input of one simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub attendee_count: u32,
    pub profiles: Vec<Profile>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Percent, 0-100
    pub confidence_level: f64,
    pub trial_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub lower_bound: f64,
    /// Exclusive, except for the last bin
    pub upper_bound: f64,
    pub count: usize,
    pub contains_recommendation: bool,
}

/// Per-item outcome of a simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub recommended_servings: f64,
    pub recommended_units: u32,
    pub total_cost: f64,
    /// Complement of the confidence level, not an independently measured rate
    pub stockout_risk_percent: f64,
    pub distribution: Vec<HistogramBin>,
}
