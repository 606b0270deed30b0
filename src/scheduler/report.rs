//! End-of-run service report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use crate::error::ServeError;

/// Totals of one scheduler run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceReport {
    /// Policy name (e.g., "FIFO").
    pub policy: String,
    /// Human-readable policy description.
    pub description: String,
    /// Sum of served customers' profit.
    pub total_profit: f64,
    /// Customers selected for service.
    pub total_served: usize,
    /// Customers dropped unserved.
    pub total_expired: usize,
}

impl fmt::Display for ServiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Results for the {} policy ({}):",
            self.description, self.policy
        )?;
        writeln!(f, "Total profit: ${:?}", self.total_profit)?;
        write!(f, "Customer served: {}", self.total_served)
    }
}

/// Writes reports as text, one block per policy.
pub fn write_reports<W: Write>(mut writer: W, reports: &[ServiceReport]) -> Result<(), ServeError> {
    for report in reports {
        writeln!(writer, "{report}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes reports as a pretty-printed JSON array.
pub fn write_reports_json<W: Write>(
    mut writer: W,
    reports: &[ServiceReport],
) -> Result<(), ServeError> {
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
