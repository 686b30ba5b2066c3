/// Attendee profile handling
/// Normalizes profile percentages and splits the attendee count across profiles.
/// In both steps the last profile absorbs the rounding remainder.

use crate::models::Profile;

const TOTAL_PERCENT: f64 = 100.0;
const SUM_TOLERANCE: f64 = 1e-9;

/// A profile together with the number of attendees assigned to it
#[derive(Clone, Debug, PartialEq)]
pub struct AttendeeGroup<'a> {
    pub profile: &'a Profile,
    pub attendees: u32,
}

/// Rescale percentages so they sum to exactly 100, keeping order.
/// Every profile but the last is rounded to a whole percent.
/// A profile set whose percentages are all zero is treated as evenly weighted.
pub fn normalize_profiles(profiles: &[Profile]) -> Vec<Profile> {
    let sum: f64 = profiles.iter().map(|p| p.percentage).sum();
    if profiles.is_empty() || (sum - TOTAL_PERCENT).abs() < SUM_TOLERANCE {
        return profiles.to_vec();
    }

    let weight = |p: &Profile| if sum > 0.0 { p.percentage } else { 1.0 };
    let weight_sum = if sum > 0.0 { sum } else { profiles.len() as f64 };

    let mut normalized = profiles.to_vec();
    let last = normalized.len() - 1;
    let mut assigned = 0.0;
    for profile in &mut normalized[..last] {
        profile.percentage = (weight(profile) * TOTAL_PERCENT / weight_sum).round();
        assigned += profile.percentage;
    }
    normalized[last].percentage = TOTAL_PERCENT - assigned;
    normalized
}

/// Split `attendee_count` across normalized profiles.
/// Each group is capped at the attendees still unassigned, so the group
/// sizes always sum to exactly `attendee_count`.
pub fn distribute_attendees(attendee_count: u32, profiles: &[Profile]) -> Vec<AttendeeGroup<'_>> {
    let Some((last, rest)) = profiles.split_last() else {
        return Vec::new();
    };

    let mut remaining = attendee_count;
    let mut groups = Vec::with_capacity(profiles.len());
    for profile in rest {
        let share = (profile.percentage / TOTAL_PERCENT * attendee_count as f64)
            .round()
            .max(0.0);
        let attendees = (share as u32).min(remaining);
        remaining -= attendees;
        groups.push(AttendeeGroup { profile, attendees });
    }
    groups.push(AttendeeGroup {
        profile: last,
        attendees: remaining,
    });
    groups
}

/// Mean consumption multiplier per attendee, weighted by normalized percentage.
/// A last profile pushed below zero by rounding carries no weight.
pub fn weighted_multiplier(profiles: &[Profile]) -> f64 {
    let normalized = normalize_profiles(profiles);
    let weight_sum: f64 = normalized.iter().map(|p| p.percentage.max(0.0)).sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }
    normalized
        .iter()
        .map(|p| p.percentage.max(0.0) * p.consumption_multiplier)
        .sum::<f64>()
        / weight_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eaters(percentages: &[f64]) -> Vec<Profile> {
        percentages
            .iter()
            .enumerate()
            .map(|(i, &pct)| Profile::new(&format!("profile-{i}"), pct, 1.0 + i as f64 * 0.5))
            .collect()
    }

    #[test]
    fn test_normalized_input_is_unchanged() {
        let profiles = eaters(&[30.0, 50.0, 20.0]);
        assert_eq!(normalize_profiles(&profiles), profiles);
    }

    #[test]
    fn test_rounding_error_lands_on_last_profile() {
        let normalized = normalize_profiles(&eaters(&[1.0, 1.0, 1.0]));
        let pcts: Vec<f64> = normalized.iter().map(|p| p.percentage).collect();
        assert_eq!(pcts, vec![33.0, 33.0, 34.0]);
    }

    #[test]
    fn test_rescaling_keeps_order_and_multipliers() {
        let input = eaters(&[20.0, 60.0, 20.0, 50.0]);
        let normalized = normalize_profiles(&input);
        let pcts: Vec<f64> = normalized.iter().map(|p| p.percentage).collect();
        assert_eq!(pcts, vec![13.0, 40.0, 13.0, 34.0]);
        for (before, after) in input.iter().zip(&normalized) {
            assert_eq!(before.name, after.name);
            assert_eq!(before.consumption_multiplier, after.consumption_multiplier);
        }
    }

    #[test]
    fn test_degenerate_profile_sets() {
        assert!(normalize_profiles(&[]).is_empty());
        assert_eq!(normalize_profiles(&eaters(&[37.0]))[0].percentage, 100.0);
        let zeros = normalize_profiles(&eaters(&[0.0, 0.0]));
        assert_eq!(zeros[0].percentage, 50.0);
        assert_eq!(zeros[1].percentage, 50.0);
    }

    #[test]
    fn test_distribution_assigns_remainder_to_last() {
        let profiles = eaters(&[33.0, 33.0, 34.0]);
        let groups = distribute_attendees(10, &profiles);
        let counts: Vec<u32> = groups.iter().map(|g| g.attendees).collect();
        assert_eq!(counts, vec![3, 3, 4]);
    }

    #[test]
    fn test_distribution_never_overshoots() {
        // rounding would hand out 2 + 2 of 3 attendees
        let profiles = eaters(&[50.0, 50.0, 0.0]);
        let groups = distribute_attendees(3, &profiles);
        let counts: Vec<u32> = groups.iter().map(|g| g.attendees).collect();
        assert_eq!(counts, vec![2, 1, 0]);
    }

    #[test]
    fn test_distribution_without_profiles() {
        assert!(distribute_attendees(25, &[]).is_empty());
    }

    #[test]
    fn test_rounding_can_push_last_profile_negative() {
        // six 16.56% shares each round up to 17, leaving -2 for the last
        let mut percentages = vec![10.0; 6];
        percentages.push(0.4);
        let normalized = normalize_profiles(&eaters(&percentages));
        assert_eq!(normalized[0].percentage, 17.0);
        assert_eq!(normalized[6].percentage, -2.0);

        let groups = distribute_attendees(100, &normalized);
        let counts: Vec<u32> = groups.iter().map(|g| g.attendees).collect();
        assert_eq!(counts, vec![17, 17, 17, 17, 17, 15, 0]);
    }

    #[test]
    fn test_negative_share_carries_no_weight() {
        let mut profiles: Vec<Profile> = (0..6).map(|i| Profile::new(&format!("p{i}"), 10.0, 1.0)).collect();
        profiles.push(Profile::new("tiny", 0.4, 50.0));
        assert!((weighted_multiplier(&profiles) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_multiplier() {
        let profiles = vec![
            Profile::new("light", 50.0, 0.5),
            Profile::new("heavy", 50.0, 1.5),
        ];
        assert!((weighted_multiplier(&profiles) - 1.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn profile_set() -> impl Strategy<Value = Vec<Profile>> {
        proptest::collection::vec((0.01f64..500.0, 0.1f64..3.0), 1..12).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (pct, mult))| Profile::new(&format!("p{i}"), pct, mult))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn normalized_percentages_sum_to_100(profiles in profile_set()) {
            let total: f64 = normalize_profiles(&profiles).iter().map(|p| p.percentage).sum();
            prop_assert!((total - 100.0).abs() < 1e-9, "total was {}", total);
        }

        #[test]
        fn normalization_is_idempotent(profiles in profile_set()) {
            let once = normalize_profiles(&profiles);
            let twice = normalize_profiles(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn distribution_sums_to_attendee_count(profiles in profile_set(), count in 0u32..5_000) {
            let normalized = normalize_profiles(&profiles);
            let total: u32 = distribute_attendees(count, &normalized).iter().map(|g| g.attendees).sum();
            prop_assert_eq!(total, count);
        }
    }
}
