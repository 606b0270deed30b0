//! Single-slot serving scheduler.
//!
//! # Algorithm
//!
//! Each call to [`Scheduler::advance`] runs two phases:
//!
//! 1. **Expiry sweep**: find the first waiting customer (queue order) whose
//!    `entry_turn + patience <= turn`, remove it, and rebuild the queue by
//!    re-inserting every remaining customer with the policy's insertion rule.
//!    Repeat until a full scan finds no expired customer.
//! 2. **Selection**: if the slot is idle and the queue is non-empty, pop the
//!    head, book its profit, occupy the slot for `prep_time` turns and
//!    rebuild the queue.
//!
//! Rebuilding re-inserts customers in their current queue order, so policies
//! that place new customers before equal keys flip the order of ties on every
//! rebuild. Removals happen one at a time for the same reason: a batch filter
//! would rebuild fewer times and could order ties differently.
//!
//! # Complexity
//! O(n² log n) per turn in the worst case, where n = waiting customers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::report::ServiceReport;
use crate::dispatching::OrderingPolicy;
use crate::models::{Customer, Turn};

/// Occupancy of the serving slot at a given turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerState {
    /// The slot may select a customer.
    Idle,
    /// The slot is preparing an order until `until` (exclusive).
    Busy { until: Turn },
}

/// What happened during one call to [`Scheduler::advance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// The processed turn.
    pub turn: Turn,
    /// Customers dropped this turn, in removal order.
    pub expired: Vec<Customer>,
    /// Customer selected for service this turn.
    pub selected: Option<Customer>,
}

impl TurnOutcome {
    /// Whether nothing happened this turn.
    pub fn is_quiet(&self) -> bool {
        self.expired.is_empty() && self.selected.is_none()
    }
}

/// A waiting queue in front of a single serving slot.
///
/// # Preconditions
/// The caller admits each customer exactly once, no earlier than its entry
/// turn, and passes non-decreasing turns to [`advance`](Self::advance).
/// Violations are not detected; the resulting order and totals are
/// unspecified.
///
/// # Example
///
/// ```
/// use u_serve::dispatching::rules::Fifo;
/// use u_serve::models::Customer;
/// use u_serve::scheduler::Scheduler;
///
/// let mut scheduler = Scheduler::new(Fifo);
/// scheduler.admit(Customer::new(11111, 1).with_profit(10.0).with_prep_time(11).with_patience(12));
/// let outcome = scheduler.advance(1);
///
/// assert_eq!(outcome.selected.map(|c| c.id()), Some(11111));
/// assert_eq!(scheduler.total_served(), 1);
/// assert_eq!(scheduler.next_available_turn(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: Arc<dyn OrderingPolicy>,
    queue: Vec<Customer>,
    total_served: usize,
    total_profit: f64,
    total_expired: usize,
    next_available_turn: Turn,
}

impl Scheduler {
    /// First turn on which a new scheduler may select a customer.
    pub const DEFAULT_FIRST_TURN: Turn = 1;

    /// Creates an idle scheduler with an empty queue.
    pub fn new<P: OrderingPolicy + 'static>(policy: P) -> Self {
        Self::with_policy(Arc::new(policy))
    }

    /// Creates a scheduler from a shared policy handle.
    pub fn with_policy(policy: Arc<dyn OrderingPolicy>) -> Self {
        Self {
            policy,
            queue: Vec::new(),
            total_served: 0,
            total_profit: 0.0,
            total_expired: 0,
            next_available_turn: Self::DEFAULT_FIRST_TURN,
        }
    }

    /// Sets the first turn on which the slot may select a customer.
    pub fn with_first_turn(mut self, turn: Turn) -> Self {
        self.next_available_turn = turn;
        self
    }

    /// Adds an arriving customer at the position chosen by the policy.
    ///
    /// Does not look at the slot; arrival and selection are independent.
    pub fn admit(&mut self, customer: Customer) {
        log::trace!(
            "{}: admit customer {} (entry {})",
            self.policy.name(),
            customer.id(),
            customer.entry_turn()
        );
        self.insert(customer);
    }

    /// Processes `turn`: drops expired customers, then selects at most one.
    pub fn advance(&mut self, turn: Turn) -> TurnOutcome {
        let expired = self.purge_expired(turn);
        let selected = self.select(turn);
        TurnOutcome {
            turn,
            expired,
            selected,
        }
    }

    fn purge_expired(&mut self, turn: Turn) -> Vec<Customer> {
        let mut expired = Vec::new();

        while let Some(pos) = self.queue.iter().position(|c| c.is_expired_at(turn)) {
            let customer = self.queue.remove(pos);
            log::debug!(
                "{}: turn {}: customer {} expired (entry {}, patience {})",
                self.policy.name(),
                turn,
                customer.id(),
                customer.entry_turn(),
                customer.patience()
            );
            self.total_expired += 1;
            expired.push(customer);
            self.reorder();
        }

        expired
    }

    fn select(&mut self, turn: Turn) -> Option<Customer> {
        if turn < self.next_available_turn || self.queue.is_empty() {
            return None;
        }

        let customer = self.queue.remove(0);
        self.total_profit += customer.profit();
        self.total_served += 1;
        self.next_available_turn = turn.saturating_add(customer.prep_time());
        log::debug!(
            "{}: turn {}: selected customer {} (profit {}, busy until {})",
            self.policy.name(),
            turn,
            customer.id(),
            customer.profit(),
            self.next_available_turn
        );

        self.reorder();
        Some(customer)
    }

    fn insert(&mut self, customer: Customer) {
        let index = self.policy.insertion_index(&self.queue, &customer);
        self.queue.insert(index, customer);
    }

    /// Re-inserts every waiting customer, in current order, via the policy.
    fn reorder(&mut self) {
        let waiting = std::mem::take(&mut self.queue);
        for customer in waiting {
            self.insert(customer);
        }
    }

    /// Waiting customers, head first.
    pub fn queue(&self) -> &[Customer] {
        &self.queue
    }

    /// Number of waiting customers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no customer is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Customers selected so far.
    pub fn total_served(&self) -> usize {
        self.total_served
    }

    /// Profit of selected customers, summed in selection order.
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    /// Customers dropped after running out of patience.
    pub fn total_expired(&self) -> usize {
        self.total_expired
    }

    /// Turn at or after which the slot can select again.
    pub fn next_available_turn(&self) -> Turn {
        self.next_available_turn
    }

    /// Slot occupancy as seen at `turn`.
    pub fn state_at(&self, turn: Turn) -> ServerState {
        if turn < self.next_available_turn {
            ServerState::Busy {
                until: self.next_available_turn,
            }
        } else {
            ServerState::Idle
        }
    }

    /// Short name of the active policy (e.g., "FIFO").
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Snapshot of the running totals.
    pub fn report(&self) -> ServiceReport {
        ServiceReport {
            policy: self.policy.name().to_string(),
            description: self.policy.description().to_string(),
            total_profit: self.total_profit,
            total_served: self.total_served,
            total_expired: self.total_expired,
        }
    }
}
