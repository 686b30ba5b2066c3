/// Monte Carlo simulation of event consumption
/// Validates the config, samples every item's trials in parallel, applies
/// complementary-item minimums, then derives per-item recommendations

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::analysis::analyze_item;
use crate::consumption::sample_trial_total;
use crate::error::{ConfigError, SimulationError};
use crate::models::{Item, SimulationConfig, SimulationResult};
use crate::profiles::{distribute_attendees, normalize_profiles, AttendeeGroup};
use crate::relationships::{propagate, resolve_links};

/// Trials sampled between two cancellation checks
const TRIAL_BATCH: u32 = 256;
/// Spreads per-item seeds across the seed space
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Shared flag that stops a running simulation between trial batches
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Fixed seed for reproducible runs; a random one is drawn when unset
    pub seed: Option<u64>,
    pub cancel: Option<CancelFlag>,
}

impl RunOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            cancel: None,
        }
    }
}

/// Run the simulation with a random seed
pub fn run_simulation(config: &SimulationConfig) -> Result<HashMap<String, SimulationResult>, SimulationError> {
    run_simulation_with(config, &RunOptions::default())
}

/// Run the simulation and return recommendations keyed by item id.
/// Items that cannot be simulated are logged and left out of the map.
pub fn run_simulation_with(
    config: &SimulationConfig,
    options: &RunOptions,
) -> Result<HashMap<String, SimulationResult>, SimulationError> {
    validate_config(config)?;

    let items = simulated_items(&config.items);
    let profiles = normalize_profiles(&config.profiles);
    let groups = distribute_attendees(config.attendee_count, &profiles);
    let links = resolve_links(&config.relationships, &items);

    let seed = options.seed.unwrap_or_else(rand::random);
    info!(
        "simulating {} item(s) x {} trial(s) for {} attendee(s)",
        items.len(),
        config.trial_count,
        config.attendee_count
    );
    debug!("simulation seed {seed}");

    // Every item must finish sampling before minimums can be compared across items
    let mut samples = (0..items.len())
        .into_par_iter()
        .map(|index| {
            let mut rng = ChaCha8Rng::seed_from_u64(item_seed(seed, index));
            sample_item_trials(&mut rng, &groups, config.trial_count, options.cancel.as_ref())
        })
        .collect::<Result<Vec<_>, _>>()?;

    propagate(&mut samples, &items, &links);

    let results: HashMap<String, SimulationResult> = items
        .iter()
        .zip(samples)
        .map(|(item, trials)| {
            let result = analyze_item(item, trials, config.confidence_level);
            debug!(
                "{}: mean {:.1}, recommend {:.1} servings ({} units)",
                item.id, result.mean, result.recommended_servings, result.recommended_units
            );
            (item.id.clone(), result)
        })
        .collect();

    info!("simulation finished with {} recommendation(s)", results.len());
    Ok(results)
}

/// Fail-fast checks run before any sampling
pub fn validate_config(config: &SimulationConfig) -> Result<(), ConfigError> {
    if config.trial_count == 0 {
        return Err(ConfigError::NoTrials);
    }
    if !(0.0..=100.0).contains(&config.confidence_level) {
        return Err(ConfigError::ConfidenceOutOfRange(config.confidence_level));
    }

    for profile in &config.profiles {
        if !profile.percentage.is_finite() || profile.percentage < 0.0 {
            return Err(ConfigError::InvalidPercentage {
                name: profile.name.clone(),
                value: profile.percentage,
            });
        }
        if !profile.consumption_multiplier.is_finite() || profile.consumption_multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier {
                name: profile.name.clone(),
                value: profile.consumption_multiplier,
            });
        }
    }
    if config.attendee_count > 0 && config.profiles.is_empty() {
        return Err(ConfigError::NoProfiles {
            attendees: config.attendee_count,
        });
    }

    let mut seen = HashSet::new();
    for item in &config.items {
        if !seen.insert(item.id.as_str()) {
            return Err(ConfigError::DuplicateItem(item.id.clone()));
        }
    }

    if config.items.is_empty() && !config.relationships.is_empty() {
        return Err(ConfigError::RelationshipsWithoutItems(config.relationships.len()));
    }
    for rel in &config.relationships {
        if !rel.ratio.is_finite() || rel.ratio <= 0.0 {
            return Err(ConfigError::InvalidRatio {
                primary: rel.primary_item_id.clone(),
                secondary: rel.secondary_item_id.clone(),
                ratio: rel.ratio,
            });
        }
    }

    Ok(())
}

/// Items usable in a run. Items without a positive serving size or with a
/// negative cost are dropped with a warning.
fn simulated_items(items: &[Item]) -> Vec<Item> {
    items
        .iter()
        .filter(|item| {
            let valid_servings = item.servings_per_unit.is_finite() && item.servings_per_unit > 0.0;
            let valid_cost = item.cost_per_unit.is_finite() && item.cost_per_unit >= 0.0;
            if !valid_servings {
                warn!(
                    "excluding item '{}': servings per unit must be positive (got {})",
                    item.id, item.servings_per_unit
                );
            } else if !valid_cost {
                warn!(
                    "excluding item '{}': cost per unit must not be negative (got {})",
                    item.id, item.cost_per_unit
                );
            }
            valid_servings && valid_cost
        })
        .cloned()
        .collect()
}

fn item_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(SEED_STRIDE)
}

fn sample_item_trials(
    rng: &mut ChaCha8Rng,
    groups: &[AttendeeGroup<'_>],
    trial_count: u32,
    cancel: Option<&CancelFlag>,
) -> Result<Vec<f64>, SimulationError> {
    let mut trials = Vec::with_capacity(trial_count.min(TRIAL_BATCH) as usize);
    for trial in 0..trial_count {
        if trial % TRIAL_BATCH == 0 && cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(SimulationError::Cancelled);
        }
        trials.push(sample_trial_total(rng, groups));
    }
    Ok(trials)
}
