pub mod analysis;
pub mod budget;
pub mod consumption;
pub mod error;
pub mod models;
pub mod monte_carlo;
pub mod profiles;
pub mod relationships;
pub mod reporting;
pub mod stats;

pub use budget::{BudgetSummary, EventPlan};
pub use error::{ConfigError, PlanError, SimulationError};
pub use models::{Category, HistogramBin, Item, Profile, Relationship, SimulationConfig, SimulationResult};
pub use monte_carlo::{run_simulation, run_simulation_with, CancelFlag, RunOptions};
