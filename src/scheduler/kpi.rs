//! Service quality metrics (KPIs).
//!
//! Computed from the [`TurnOutcome`]s of one run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Service Rate | served / (served + expired) |
//! | Avg Profit | total profit / served |
//! | Avg Wait | mean(selection turn - entry turn) |
//! | Max Wait | largest single wait |
//! | Busy Until | turn the last selected order is finished |
//!
//! # Reference
//! Kleinrock (1975), "Queueing Systems, Vol. 1", Ch. 1: Performance Measures

use serde::{Deserialize, Serialize};

use super::serving::TurnOutcome;
use crate::models::Turn;

/// Service performance indicators. All times are in turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceKpi {
    pub served: usize,
    pub expired: usize,
    /// Fraction of finished customers that were served (0.0..=1.0).
    pub service_rate: f64,
    pub total_profit: f64,
    /// Mean profit per served customer.
    pub avg_profit: f64,
    /// Mean turns between arrival and selection.
    pub avg_wait_turns: f64,
    pub max_wait_turns: Turn,
    /// Turn at which the last selected order is finished (0 if none).
    pub busy_until: Turn,
}

impl ServiceKpi {
    /// Computes KPIs from per-turn outcomes, in processing order.
    pub fn calculate(outcomes: &[TurnOutcome]) -> Self {
        let mut served: usize = 0;
        let mut expired: usize = 0;
        let mut total_profit: f64 = 0.0;
        let mut total_wait: f64 = 0.0;
        let mut max_wait: Turn = 0;
        let mut busy_until: Turn = 0;

        for outcome in outcomes {
            expired += outcome.expired.len();

            if let Some(customer) = &outcome.selected {
                served += 1;
                total_profit += customer.profit();

                let wait = outcome.turn.saturating_sub(customer.entry_turn());
                total_wait += wait as f64;
                max_wait = max_wait.max(wait);
                busy_until = outcome.turn.saturating_add(customer.prep_time());
            }
        }

        let finished = served + expired;
        let service_rate = if finished == 0 {
            1.0
        } else {
            served as f64 / finished as f64
        };

        let (avg_profit, avg_wait_turns) = if served == 0 {
            (0.0, 0.0)
        } else {
            (total_profit / served as f64, total_wait / served as f64)
        };

        Self {
            served,
            expired,
            service_rate,
            total_profit,
            avg_profit,
            avg_wait_turns,
            max_wait_turns: max_wait,
            busy_until,
        }
    }

    /// Whether the run served at least `min_rate` of its customers.
    pub fn meets_service_rate(&self, min_rate: f64) -> bool {
        self.service_rate >= min_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn served(turn: Turn, entry: Turn, profit: f64, prep: Turn) -> TurnOutcome {
        TurnOutcome {
            turn,
            expired: Vec::new(),
            selected: Some(
                Customer::new(turn, entry)
                    .with_profit(profit)
                    .with_prep_time(prep),
            ),
        }
    }

    fn dropped(turn: Turn, count: u64) -> TurnOutcome {
        TurnOutcome {
            turn,
            expired: (0..count).map(|i| Customer::new(100 + i, 1)).collect(),
            selected: None,
        }
    }

    #[test]
    fn test_kpi_basic() {
        let outcomes = vec![served(1, 1, 10.0, 3), served(4, 2, 20.0, 2)];
        let kpi = ServiceKpi::calculate(&outcomes);
        assert_eq!(kpi.served, 2);
        assert_eq!(kpi.expired, 0);
        assert!((kpi.service_rate - 1.0).abs() < 1e-10);
        assert!((kpi.total_profit - 30.0).abs() < 1e-10);
        assert!((kpi.avg_profit - 15.0).abs() < 1e-10);
        assert!((kpi.avg_wait_turns - 1.0).abs() < 1e-10); // (0 + 2) / 2
        assert_eq!(kpi.max_wait_turns, 2);
        assert_eq!(kpi.busy_until, 6);
    }

    #[test]
    fn test_kpi_with_expiry() {
        let outcomes = vec![served(1, 1, 5.0, 4), dropped(3, 2), dropped(4, 1)];
        let kpi = ServiceKpi::calculate(&outcomes);
        assert_eq!(kpi.served, 1);
        assert_eq!(kpi.expired, 3);
        assert!((kpi.service_rate - 0.25).abs() < 1e-10);
        assert!(kpi.meets_service_rate(0.25));
        assert!(!kpi.meets_service_rate(0.5));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ServiceKpi::calculate(&[]);
        assert_eq!(kpi.served, 0);
        assert_eq!(kpi.busy_until, 0);
        assert!((kpi.service_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_profit - 0.0).abs() < 1e-10);
        assert!((kpi.avg_wait_turns - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_all_expired() {
        let kpi = ServiceKpi::calculate(&[dropped(2, 3)]);
        assert!((kpi.service_rate - 0.0).abs() < 1e-10);
        assert!((kpi.avg_profit - 0.0).abs() < 1e-10);
    }
}
