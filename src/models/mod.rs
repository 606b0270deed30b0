//! Service simulation domain models.
//!
//! # Domain Mappings
//!
//! | u-serve | Restaurant | Clinic | Help desk |
//! |---------|-----------|--------|-----------|
//! | Customer | Diner order | Walk-in patient | Ticket |
//! | Scenario | Day of arrivals | Clinic session | Shift backlog |
//! | Turn | Kitchen tick | Time slot | Work interval |

mod customer;
mod scenario;

pub use customer::{Customer, FIELD_COUNT};
pub use scenario::Scenario;

/// Discrete unit of simulated time.
pub type Turn = u64;
