/// Consumption sampling module
/// Draws per-attendee consumption for one trial and aggregates it into a trial total

use rand::{Rng, RngCore};
use rand_distr::Open01;
use std::f64::consts::TAU;

use crate::profiles::AttendeeGroup;

/// Standard deviation of an attendee's consumption, as a fraction of the profile mean
pub const RELATIVE_STD_DEV: f64 = 0.2;
/// Every attendee consumes at least this many servings per item
pub const MIN_ATTENDEE_SERVINGS: f64 = 0.1;

/// Source of uniform draws in the open interval (0, 1)
pub trait UniformSource {
    fn next_open01(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    fn next_open01(&mut self) -> f64 {
        self.sample(Open01)
    }
}

/// Box-Muller transform of two independent uniform draws
pub fn standard_normal<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u1 = source.next_open01();
    let u2 = source.next_open01();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Consumption of a single attendee: Normal(multiplier, 0.2 * multiplier),
/// floored at `MIN_ATTENDEE_SERVINGS`
pub fn sample_attendee<S: UniformSource + ?Sized>(source: &mut S, multiplier: f64) -> f64 {
    let std_dev = multiplier * RELATIVE_STD_DEV;
    (multiplier + std_dev * standard_normal(source)).max(MIN_ATTENDEE_SERVINGS)
}

/// Total servings consumed by all attendees in one trial
pub fn sample_trial_total<S: UniformSource + ?Sized>(source: &mut S, groups: &[AttendeeGroup<'_>]) -> f64 {
    let mut total = 0.0;
    for group in groups {
        let multiplier = group.profile.consumption_multiplier;
        for _ in 0..group.attendees {
            total += sample_attendee(source, multiplier);
        }
    }
    total
}
