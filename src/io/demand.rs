//! Demand schedule generators.
//!
//! These produce per-week end-customer demand for
//! `GameConfig::demand_schedule`. The kernel itself only ever reads one
//! value per week; how the schedule was built is a setup concern.

use rand::thread_rng;
use rand_distr::{Distribution, Normal};

/// Every week has the exact same demand. Useful for steady-state play
/// and for classrooms that want a controlled baseline.
pub fn constant(weeks: u32, value: u32) -> Vec<u32> {
    vec![value; weeks as usize]
}

/// A one-time step: `low` until `step_week` (1-based), `high` afterwards.
/// The classic way to provoke the bullwhip effect in a live game.
pub fn step(weeks: u32, low: u32, high: u32, step_week: u32) -> Vec<u32> {
    (1..=weeks)
        .map(|w| if w < step_week { low } else { high })
        .collect()
}

/// Demand drawn from a Normal distribution, rounded and clamped at zero.
pub fn normal(weeks: u32, mean: f64, std_dev: f64) -> Vec<u32> {
    let mut rng = thread_rng();
    let dist = Normal::new(mean, std_dev).expect("valid demand distribution parameters");

    (0..weeks)
        .map(|_| {
            let sample: f64 = dist.sample(&mut rng);
            sample.round().max(0.0) as u32
        })
        .collect()
}
