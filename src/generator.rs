//! Synthetic scenario generation.
//!
//! Produces reproducible random scenarios for what-if comparisons of
//! ordering policies. Identical seeds produce identical scenarios.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::models::{Customer, Scenario, Turn};

/// Random scenario generator.
///
/// # Example
/// ```
/// use u_serve::generator::ScenarioGenerator;
///
/// let a = ScenarioGenerator::new(42).generate(20);
/// let b = ScenarioGenerator::new(42).generate(20);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    seed: u64,
    first_turn: Turn,
    arrival_gap: RangeInclusive<Turn>,
    profit: RangeInclusive<u32>,
    prep_time: RangeInclusive<Turn>,
    patience: RangeInclusive<Turn>,
}

impl ScenarioGenerator {
    /// Creates a generator with default ranges.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            first_turn: 1,
            arrival_gap: 0..=3,
            profit: 1..=50,
            prep_time: 1..=10,
            patience: 0..=15,
        }
    }

    /// Sets the arrival turn of the first customer.
    pub fn with_first_turn(mut self, turn: Turn) -> Self {
        self.first_turn = turn;
        self
    }

    /// Sets the range of turns between consecutive arrivals.
    pub fn with_arrival_gap(mut self, gap: RangeInclusive<Turn>) -> Self {
        self.arrival_gap = ordered(gap);
        self
    }

    /// Sets the profit range (whole currency units).
    pub fn with_profit(mut self, profit: RangeInclusive<u32>) -> Self {
        self.profit = ordered(profit);
        self
    }

    /// Sets the preparation time range. A lower bound of 0 is raised to 1.
    pub fn with_prep_time(mut self, prep_time: RangeInclusive<Turn>) -> Self {
        let (lo, hi) = ordered(prep_time).into_inner();
        self.prep_time = lo.max(1)..=hi.max(1);
        self
    }

    /// Sets the patience range.
    pub fn with_patience(mut self, patience: RangeInclusive<Turn>) -> Self {
        self.patience = ordered(patience);
        self
    }

    /// Generates `count` customers with sequential IDs starting at 1.
    pub fn generate(&self, count: usize) -> Scenario {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut turn = self.first_turn;
        let mut customers = Vec::with_capacity(count);

        for i in 0..count {
            if i > 0 {
                turn = turn.saturating_add(rng.random_range(self.arrival_gap.clone()));
            }
            let profit = rng.random_range(self.profit.clone()) as f64;
            let customer = Customer::new(i as u64 + 1, turn)
                .with_profit(profit)
                .with_prep_time(rng.random_range(self.prep_time.clone()))
                .with_patience(rng.random_range(self.patience.clone()));
            customers.push(customer);
        }

        log::debug!("generated {} customers (seed {})", count, self.seed);
        Scenario::from_customers(customers)
    }
}

/// Swaps reversed bounds so sampling never sees an empty range.
fn ordered<T: PartialOrd>(range: RangeInclusive<T>) -> RangeInclusive<T> {
    let (lo, hi) = range.into_inner();
    if lo <= hi {
        lo..=hi
    } else {
        hi..=lo
    }
}
