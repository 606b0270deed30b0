//! Turn-driving simulation runner.
//!
//! Feeds a scenario into one [`Scheduler`] per policy. Each turn it admits
//! every customer whose entry turn has been reached (file order among equal
//! turns) and then advances the scheduler. A run ends when every customer
//! has been admitted and the queue is empty, or when the configured turn
//! limit is passed.
//!
//! Only turns on which something can happen are advanced: the next arrival,
//! the next expiry in the queue, or the turn the slot frees up. Any turn in
//! between would have no arrival, expiry or selection, and `advance` leaves
//! the queue untouched on such a turn.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::SimulationConfig;
use crate::dispatching::OrderingPolicy;
use crate::error::ServeError;
use crate::models::{Customer, Scenario, Turn};
use crate::scheduler::{Scheduler, ServiceKpi, ServiceReport, TurnOutcome};
use crate::validation::validate_scenario;

/// Result of simulating one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub report: ServiceReport,
    pub kpi: ServiceKpi,
    /// Number of `advance` calls made.
    pub turns_processed: usize,
    /// Outcomes of turns on which a customer expired or was selected.
    pub outcomes: Vec<TurnOutcome>,
}

/// A validated scenario plus the settings to simulate it with.
///
/// # Example
/// ```
/// use u_serve::config::SimulationConfig;
/// use u_serve::models::Scenario;
/// use u_serve::simulation::Simulation;
///
/// let scenario = Scenario::parse("1 11111 10 11 12\n3 22222 10 11 1\n").unwrap();
/// let simulation = Simulation::new(scenario, SimulationConfig::default()).unwrap();
///
/// let runs = simulation.run_all();
/// assert_eq!(runs.len(), 4);
/// assert!(runs.iter().all(|r| r.report.total_served == 1));
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    scenario: Scenario,
    config: SimulationConfig,
}

impl Simulation {
    /// Validates `scenario` against `config` and builds the simulation.
    pub fn new(scenario: Scenario, config: SimulationConfig) -> Result<Self, ServeError> {
        validate_scenario(&scenario, config.first_turn).map_err(ServeError::Validation)?;
        Ok(Self { scenario, config })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every configured policy, each on a fresh scheduler.
    pub fn run_all(&self) -> Vec<SimulationRun> {
        self.config
            .policies
            .iter()
            .map(|kind| self.run(kind.policy()))
            .collect()
    }

    /// Runs one policy over the scenario.
    pub fn run(&self, policy: Arc<dyn OrderingPolicy>) -> SimulationRun {
        log::info!(
            "simulating {} customers with policy {}",
            self.scenario.len(),
            policy.name()
        );

        let mut scheduler = Scheduler::with_policy(policy).with_first_turn(self.config.first_turn);
        let mut pending = self.scenario.arrivals_in_order().into_iter().peekable();
        let mut outcomes = Vec::new();
        let mut turns_processed = 0;
        let mut turn = self.config.first_turn;

        loop {
            if self.config.turn_limit.is_some_and(|limit| turn > limit) {
                log::warn!(
                    "{}: stopped at turn limit with {} waiting and {} not yet arrived",
                    scheduler.policy_name(),
                    scheduler.len(),
                    pending.len()
                );
                break;
            }

            while let Some(customer) = pending.next_if(|c| c.entry_turn() <= turn) {
                scheduler.admit(customer);
            }

            let outcome = scheduler.advance(turn);
            turns_processed += 1;
            log::trace!("turn {}: {} waiting", turn, scheduler.len());
            if !outcome.is_quiet() {
                outcomes.push(outcome);
            }

            let next = match next_event(&scheduler, pending.peek()) {
                Some(event) => event.max(turn.saturating_add(1)),
                None => break,
            };
            if next == turn {
                break;
            }
            turn = next;
        }

        let report = scheduler.report();
        let kpi = ServiceKpi::calculate(&outcomes);
        log::info!(
            "{}: served {}, expired {}, profit {}",
            report.policy,
            report.total_served,
            report.total_expired,
            report.total_profit
        );

        SimulationRun {
            report,
            kpi,
            turns_processed,
            outcomes,
        }
    }
}

/// Earliest turn after which `advance` could do anything, or `None` when the
/// queue is empty and nobody is left to arrive.
fn next_event(scheduler: &Scheduler, next_arrival: Option<&Customer>) -> Option<Turn> {
    let arrival = next_arrival.map(Customer::entry_turn);
    if scheduler.is_empty() {
        return arrival;
    }

    let mut next = scheduler.next_available_turn();
    if let Some(expiry) = scheduler.queue().iter().map(Customer::expiry_turn).min() {
        next = next.min(expiry);
    }
    if let Some(arrival) = arrival {
        next = next.min(arrival);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::{Fifo, Lifo, MaxProfit, Spt};
    use crate::dispatching::PolicyKind;
    use crate::generator::ScenarioGenerator;
    use crate::validation::ValidationErrorKind;

    fn simulate(text: &str, policy: Arc<dyn OrderingPolicy>) -> SimulationRun {
        let scenario = Scenario::parse(text).unwrap();
        Simulation::new(scenario, SimulationConfig::default())
            .unwrap()
            .run(policy)
    }

    fn selected_ids(run: &SimulationRun) -> Vec<u64> {
        run.outcomes
            .iter()
            .filter_map(|o| o.selected.as_ref().map(Customer::id))
            .collect()
    }

    const SCENARIO: &str = "\
1 1 5 3 10
1 2 30 1 10
2 3 8 2 10
2 4 12 5 2
3 5 1 1 10
";

    #[test]
    fn test_end_to_end_two_customers() {
        let run = simulate("1 11111 10 11 12\n3 22222 10 11 1\n", Arc::new(Fifo));
        assert_eq!(run.report.total_served, 1);
        assert_eq!(run.report.total_expired, 1);
        assert!((run.report.total_profit - 10.0).abs() < 1e-12);
        assert_eq!(selected_ids(&run), vec![11111]);
        // Turns 1, 3 and 4: the empty queue at turn 1 jumps to the next arrival.
        assert_eq!(run.turns_processed, 3);
    }

    #[test]
    fn test_fifo_scenario() {
        let run = simulate(SCENARIO, Arc::new(Fifo));
        // t1: 1 (busy until 4); t4: 4 expired, 2 selected; t5: 3; t7: 5
        assert_eq!(selected_ids(&run), vec![1, 2, 3, 5]);
        assert_eq!(run.report.total_expired, 1);
        assert!((run.report.total_profit - 44.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_profit_scenario() {
        let run = simulate(SCENARIO, Arc::new(MaxProfit));
        // t1: 2 (30); t2: 4 (12, busy until 7); t7: 3 then t9: 1 then t12: 5
        assert_eq!(selected_ids(&run), vec![2, 4, 3, 1, 5]);
        assert_eq!(run.report.total_expired, 0);
        assert!((run.report.total_profit - 56.0).abs() < 1e-12);
    }

    #[test]
    fn test_spt_scenario() {
        let run = simulate(SCENARIO, Arc::new(Spt));
        // t1: 2; t2: 3 (prep 2); t4: 4 expires, 5 selected; t5: 1
        assert_eq!(selected_ids(&run), vec![2, 3, 5, 1]);
        assert_eq!(run.report.total_expired, 1);
    }

    #[test]
    fn test_lifo_scenario() {
        let run = simulate(SCENARIO, Arc::new(Lifo));
        // t1: 2 (admitted last among entry 1); t2: 4; t7: 5, then 3, then 1
        assert_eq!(selected_ids(&run), vec![2, 4, 5, 3, 1]);
    }

    #[test]
    fn test_run_all_uses_configured_policies() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let config =
            SimulationConfig::default().with_policies(vec![PolicyKind::Spt, PolicyKind::Fifo]);
        let runs = Simulation::new(scenario, config).unwrap().run_all();
        let names: Vec<&str> = runs.iter().map(|r| r.report.policy.as_str()).collect();
        assert_eq!(names, vec!["SPT", "FIFO"]);
    }

    #[test]
    fn test_jumps_over_idle_gap() {
        let run = simulate("1 1 1 1 5\n1000 2 1 1 5\n", Arc::new(Fifo));
        assert_eq!(run.report.total_served, 2);
        assert_eq!(run.turns_processed, 2);
    }

    #[test]
    fn test_turn_limit_stops_run() {
        let scenario = Scenario::parse("1 1 1 5 50\n1 2 1 5 50\n1 3 1 5 50\n").unwrap();
        let config = SimulationConfig::default().with_turn_limit(6);
        let run = Simulation::new(scenario, config)
            .unwrap()
            .run(Arc::new(Fifo));
        // Turn 1 serves customer 1, turn 6 serves customer 2, turn 11 is past the limit.
        assert_eq!(run.turns_processed, 2);
        assert_eq!(run.report.total_served, 2);
    }

    #[test]
    fn test_first_turn_config() {
        let scenario = Scenario::parse("3 1 1 1 5\n").unwrap();
        let config = SimulationConfig::default().with_first_turn(3);
        let run = Simulation::new(scenario, config)
            .unwrap()
            .run(Arc::new(Fifo));
        assert_eq!(run.report.total_served, 1);
        assert_eq!(run.outcomes[0].turn, 3);
    }

    #[test]
    fn test_empty_scenario() {
        let run = simulate("", Arc::new(Fifo));
        assert_eq!(run.report.total_served, 0);
        assert_eq!(run.turns_processed, 1);
        assert!(run.outcomes.is_empty());
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = Scenario::parse("1 7 1 1 1\n2 7 1 1 1\n").unwrap();
        let err = Simulation::new(scenario, SimulationConfig::default()).unwrap_err();
        match err {
            ServeError::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kpi_matches_report() {
        let run = simulate(SCENARIO, Arc::new(Fifo));
        assert_eq!(run.kpi.served, run.report.total_served);
        assert_eq!(run.kpi.expired, run.report.total_expired);
        assert_eq!(run.kpi.total_profit.to_bits(), run.report.total_profit.to_bits());
    }

    #[test]
    fn test_skips_long_busy_gap() {
        let run = simulate("1 1 1 1000000 5000000\n1 2 1 1 5000000\n", Arc::new(Fifo));
        assert_eq!(run.report.total_served, 2);
        assert_eq!(run.outcomes.len(), 2);
        assert_eq!(run.turns_processed, 2);
        assert_eq!(run.outcomes[1].turn, 1000001);
    }

    #[test]
    fn test_busy_gap_stops_at_arrivals_and_expiries() {
        let run = simulate("1 1 1 100 500\n1 2 5 1 10\n5 3 1 1 1000\n", Arc::new(Fifo));
        // Turn 5: arrival of 3, turn 11: customer 2 expires, turn 101: slot frees.
        assert_eq!(run.turns_processed, 4);
        let turns: Vec<u64> = run.outcomes.iter().map(|o| o.turn).collect();
        assert_eq!(turns, vec![1, 11, 101]);
        assert_eq!(run.outcomes[1].expired[0].id(), 2);
        assert_eq!(selected_ids(&run), vec![1, 3]);
    }

    fn advance_every_turn(
        scenario: &Scenario,
        kind: PolicyKind,
    ) -> (ServiceReport, Vec<TurnOutcome>) {
        let mut scheduler = Scheduler::with_policy(kind.policy());
        let mut pending = scenario.arrivals_in_order().into_iter().peekable();
        let mut outcomes = Vec::new();
        let mut turn = Scheduler::DEFAULT_FIRST_TURN;
        while pending.peek().is_some() || !scheduler.is_empty() {
            while let Some(customer) = pending.next_if(|c| c.entry_turn() <= turn) {
                scheduler.admit(customer);
            }
            let outcome = scheduler.advance(turn);
            if !outcome.is_quiet() {
                outcomes.push(outcome);
            }
            turn += 1;
        }
        (scheduler.report(), outcomes)
    }

    #[test]
    fn test_skipping_matches_advancing_every_turn() {
        for seed in 0..20 {
            let scenario = ScenarioGenerator::new(seed)
                .with_profit(1..=3)
                .with_prep_time(1..=12)
                .with_patience(0..=20)
                .generate(40);
            let simulation =
                Simulation::new(scenario.clone(), SimulationConfig::default()).unwrap();
            for kind in PolicyKind::ALL {
                let run = simulation.run(kind.policy());
                let (report, outcomes) = advance_every_turn(&scenario, kind);
                assert_eq!(run.report, report, "seed {seed}, {kind}");
                assert_eq!(run.outcomes, outcomes, "seed {seed}, {kind}");
            }
        }
    }
}
