//! Simulation configuration.
//!
//! Loaded from JSON; every field is optional.
//!
//! ```json
//! { "first_turn": 1, "policies": ["fifo", "maxp"], "turn_limit": 500 }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dispatching::PolicyKind;
use crate::error::ServeError;
use crate::models::Turn;
use crate::scheduler::Scheduler;

/// Settings shared by every policy run of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// First turn processed; the serving slot is free from this turn on.
    pub first_turn: Turn,
    /// Policies to simulate, in report order.
    pub policies: Vec<PolicyKind>,
    /// Last turn processed, if the run must stop early.
    pub turn_limit: Option<Turn>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            first_turn: Scheduler::DEFAULT_FIRST_TURN,
            policies: PolicyKind::ALL.to_vec(),
            turn_limit: None,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ServeError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Sets the first processed turn.
    pub fn with_first_turn(mut self, turn: Turn) -> Self {
        self.first_turn = turn;
        self
    }

    /// Sets the policies to simulate.
    pub fn with_policies(mut self, policies: Vec<PolicyKind>) -> Self {
        self.policies = policies;
        self
    }

    /// Sets the last processed turn.
    pub fn with_turn_limit(mut self, turn: Turn) -> Self {
        self.turn_limit = Some(turn);
        self
    }
}
