/// Result analysis module
/// Turns an item's raw trial samples into a purchase recommendation

use crate::models::{Item, SimulationResult};
use crate::stats::{histogram, mean, median, percentile, sort_ascending};

/// Summarize one item's trials at the given confidence level (percent).
/// An empty sample set yields an all-zero result with no histogram.
pub fn analyze_item(item: &Item, mut samples: Vec<f64>, confidence_level: f64) -> SimulationResult {
    let stockout_risk_percent = 100.0 - confidence_level;
    if samples.is_empty() {
        return SimulationResult {
            mean: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            recommended_servings: 0.0,
            recommended_units: 0,
            total_cost: 0.0,
            stockout_risk_percent,
            distribution: Vec::new(),
        };
    }

    sort_ascending(&mut samples);
    let recommended_servings = percentile(&samples, confidence_level);
    let recommended_units = (recommended_servings / item.servings_per_unit).ceil() as u32;

    SimulationResult {
        mean: mean(&samples),
        median: median(&samples),
        min: samples[0],
        max: samples[samples.len() - 1],
        recommended_servings,
        recommended_units,
        total_cost: recommended_units as f64 * item.cost_per_unit,
        stockout_risk_percent,
        distribution: histogram(&samples, recommended_servings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn soda() -> Item {
        Item {
            id: "soda".to_string(),
            name: Some("Soda (12-pack)".to_string()),
            cost_per_unit: 6.5,
            units_purchased: 2,
            servings_per_unit: 12.0,
            category: Category::Drinks,
        }
    }

    #[test]
    fn test_recommendation_from_percentile() {
        let samples: Vec<f64> = (1..=100).rev().map(|i| i as f64).collect();
        let result = analyze_item(&soda(), samples, 95.0);

        assert_eq!(result.min, 1.0);
        assert_eq!(result.max, 100.0);
        assert_eq!(result.mean, 50.5);
        assert_eq!(result.median, 50.5);
        assert_eq!(result.recommended_servings, 96.0);
        assert_eq!(result.recommended_units, 8);
        assert_eq!(result.total_cost, 52.0);
        assert_eq!(result.stockout_risk_percent, 5.0);

        let total: usize = result.distribution.iter().map(|b| b.count).sum();
        assert_eq!(total, 100);
        assert_eq!(result.distribution.len(), 15);
        let flagged: Vec<_> = result.distribution.iter().filter(|b| b.contains_recommendation).collect();
        assert_eq!(flagged.len(), 1);
        assert!(flagged[0].lower_bound <= 96.0 && 96.0 < flagged[0].upper_bound);
    }

    #[test]
    fn test_empty_samples() {
        let result = analyze_item(&soda(), Vec::new(), 90.0);
        assert_eq!(result.mean, 0.0);
        assert_eq!(result.recommended_units, 0);
        assert_eq!(result.total_cost, 0.0);
        assert!(result.distribution.is_empty());
        assert_eq!(result.stockout_risk_percent, 10.0);
    }

    #[test]
    fn test_higher_confidence_recommends_at_least_as_much() {
        let samples: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 + 20.0).collect();
        let at_90 = analyze_item(&soda(), samples.clone(), 90.0);
        let at_99 = analyze_item(&soda(), samples, 99.0);
        assert!(at_99.recommended_servings >= at_90.recommended_servings);
        assert!(at_99.recommended_units >= at_90.recommended_units);
    }
}
