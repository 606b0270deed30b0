//! Built-in ordering policies.
//!
//! | Policy | Key | Direction | Ties |
//! |--------|-----|-----------|------|
//! | FIFO | entry turn | ascending | new customer after equals |
//! | LIFO | entry turn | descending | new customer before equals |
//! | MAXP | profit | descending | new customer before equals |
//! | SPT | prep time | ascending | new customer after equals |
//!
//! The tie-break side is observable: when the scheduler rebuilds its queue
//! by re-inserting customers in queue order, "before equals" policies
//! reverse the relative order of tied customers, "after equals" policies
//! keep it.

use super::OrderingPolicy;
use crate::models::Customer;

/// Sort direction of a policy key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smaller keys are served first.
    Ascending,
    /// Larger keys are served first.
    Descending,
}

/// Where a new customer goes among customers with an equal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ties {
    AfterEquals,
    BeforeEquals,
}

/// Binary search for the insertion index in a queue sorted by `key`.
///
/// `queue` must already be ordered by `key` in `direction`.
pub fn insertion_index_by<K, F>(
    queue: &[Customer],
    customer: &Customer,
    key: F,
    direction: Direction,
    ties: Ties,
) -> usize
where
    K: PartialOrd,
    F: Fn(&Customer) -> K,
{
    let new_key = key(customer);
    queue.partition_point(|queued| {
        let k = key(queued);
        match (direction, ties) {
            (Direction::Ascending, Ties::AfterEquals) => k <= new_key,
            (Direction::Ascending, Ties::BeforeEquals) => k < new_key,
            (Direction::Descending, Ties::AfterEquals) => k >= new_key,
            (Direction::Descending, Ties::BeforeEquals) => k > new_key,
        }
    })
}

// ======================== Arrival-based policies ========================

/// First In First Out.
///
/// Earliest arrival is served first. Customers arriving on the same turn
/// are served in admission order.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl OrderingPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn insertion_index(&self, queue: &[Customer], customer: &Customer) -> usize {
        insertion_index_by(
            queue,
            customer,
            Customer::entry_turn,
            Direction::Ascending,
            Ties::AfterEquals,
        )
    }

    fn description(&self) -> &'static str {
        "Earliest Arrival First"
    }
}

/// Last In First Out.
///
/// Latest arrival is served first. A new customer goes in front of every
/// waiting customer that arrived on the same turn.
#[derive(Debug, Clone, Copy)]
pub struct Lifo;

impl OrderingPolicy for Lifo {
    fn name(&self) -> &'static str {
        "LIFO"
    }

    fn insertion_index(&self, queue: &[Customer], customer: &Customer) -> usize {
        insertion_index_by(
            queue,
            customer,
            Customer::entry_turn,
            Direction::Descending,
            Ties::BeforeEquals,
        )
    }

    fn description(&self) -> &'static str {
        "Latest Arrival First"
    }
}

// ======================== Order-based policies ========================

/// Maximum Profit.
///
/// Highest profit is served first; new customers go in front of equals.
#[derive(Debug, Clone, Copy)]
pub struct MaxProfit;

impl OrderingPolicy for MaxProfit {
    fn name(&self) -> &'static str {
        "MAXP"
    }

    fn insertion_index(&self, queue: &[Customer], customer: &Customer) -> usize {
        insertion_index_by(
            queue,
            customer,
            Customer::profit,
            Direction::Descending,
            Ties::BeforeEquals,
        )
    }

    fn description(&self) -> &'static str {
        "Highest Profit First"
    }
}

/// Shortest Preparation Time.
///
/// Shortest order is served first; ties in admission order.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl OrderingPolicy for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn insertion_index(&self, queue: &[Customer], customer: &Customer) -> usize {
        insertion_index_by(
            queue,
            customer,
            Customer::prep_time,
            Direction::Ascending,
            Ties::AfterEquals,
        )
    }

    fn description(&self) -> &'static str {
        "Shortest Preparation Time"
    }
}
