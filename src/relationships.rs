/// Complementary item constraints
/// Raises secondary-item trial samples to what the primary item's consumption requires.
/// Minimums come from the sampled primary values only and never chain through
/// other relationships, so cyclic relationship graphs cannot recurse.

use log::warn;
use std::collections::HashMap;

use crate::models::{Item, Relationship};

/// A relationship whose endpoints were found in the item list
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLink {
    pub primary: usize,
    pub secondary: usize,
    pub ratio: f64,
}

/// Map relationships onto item indices. Relationships naming an unknown item,
/// or linking an item to itself, are skipped with a warning.
pub fn resolve_links(relationships: &[Relationship], items: &[Item]) -> Vec<ResolvedLink> {
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.as_str(), i))
        .collect();

    relationships
        .iter()
        .filter_map(|rel| {
            let primary = index.get(rel.primary_item_id.as_str());
            let secondary = index.get(rel.secondary_item_id.as_str());
            match (primary, secondary) {
                (Some(&primary), Some(&secondary)) if primary != secondary => Some(ResolvedLink {
                    primary,
                    secondary,
                    ratio: rel.ratio,
                }),
                (Some(_), Some(_)) => {
                    warn!("skipping relationship of item '{}' to itself", rel.primary_item_id);
                    None
                }
                _ => {
                    warn!(
                        "skipping relationship {} -> {}: item not found",
                        rel.primary_item_id, rel.secondary_item_id
                    );
                    None
                }
            }
        })
        .collect()
}

/// Servings of the secondary item needed to go with `primary_servings`
/// of the primary item, counting whole primary units
pub fn required_secondary_servings(
    primary_servings: f64,
    primary: &Item,
    secondary: &Item,
    ratio: f64,
) -> f64 {
    let primary_units = (primary_servings / primary.servings_per_unit).ceil();
    primary_units * ratio * secondary.servings_per_unit
}

/// Enforce every link on every trial index. `samples[i]` holds the trials of `items[i]`.
/// A secondary sample ends as the max of its own value and all minimums implied by its links.
pub fn propagate(samples: &mut [Vec<f64>], items: &[Item], links: &[ResolvedLink]) {
    if links.is_empty() {
        return;
    }
    let trial_count = samples.iter().map(Vec::len).max().unwrap_or(0);
    let mut floors = vec![0.0_f64; samples.len()];

    for trial in 0..trial_count {
        floors.iter_mut().for_each(|f| *f = 0.0);

        for link in links {
            let Some(&primary_servings) = samples[link.primary].get(trial) else {
                continue;
            };
            let required = required_secondary_servings(
                primary_servings,
                &items[link.primary],
                &items[link.secondary],
                link.ratio,
            );
            floors[link.secondary] = floors[link.secondary].max(required);
        }

        for (item_samples, &floor) in samples.iter_mut().zip(&floors) {
            if let Some(value) = item_samples.get_mut(trial) {
                if *value < floor {
                    *value = floor;
                }
            }
        }
    }
}
