//! Serving scheduler, reports and KPI evaluation.
//!
//! # Algorithm
//!
//! `Scheduler` keeps a policy-ordered waiting queue in front of one serving
//! slot. Every turn it drops customers who ran out of patience, then, if the
//! slot is idle, selects the head of the queue.
//!
//! # KPI
//!
//! `ServiceKpi` computes service rate, profit and waiting-time metrics from
//! the per-turn outcomes of a run.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Kleinrock (1975), "Queueing Systems, Vol. 1"

mod kpi;
pub mod report;
mod serving;

pub use kpi::ServiceKpi;
pub use report::ServiceReport;
pub use serving::{Scheduler, ServerState, TurnOutcome};
