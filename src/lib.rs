//! Turn-based single-server service simulation.
//!
//! A single serving slot is shared by waiting customers. Each turn customers
//! may arrive, customers who ran out of patience leave, and if the slot is
//! free the next customer chosen by the active ordering policy is served,
//! occupying the slot for its preparation time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Customer`, `Scenario`, `Turn`
//! - **`dispatching`**: Ordering policies: FIFO, LIFO, MAXP, SPT
//! - **`scheduler`**: The serving `Scheduler`, `ServiceReport`, `ServiceKpi`
//! - **`simulation`**: Turn-driving runner comparing policies on a scenario
//! - **`validation`**: Scenario integrity checks (duplicate IDs, early arrivals)
//! - **`config`**: JSON-loadable simulation settings
//! - **`generator`**: Seeded synthetic scenarios
//!
//! # Determinism
//!
//! Given the same sequence of `admit`/`advance` calls, a scheduler produces
//! the same queue, served count and profit, bit for bit.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Kleinrock (1975), "Queueing Systems, Vol. 1: Theory"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;

pub use error::{ParseError, ServeError};
