//! Input validation for simulation scenarios.
//!
//! The scheduler assumes its caller admits every customer exactly once and
//! no earlier than its entry turn. These checks let the simulation driver
//! refuse a scenario that would break those assumptions. Detects:
//! - Duplicate customer IDs
//! - Arrivals before the first simulated turn

use crate::models::{Scenario, Turn};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two customers share the same ID.
    DuplicateId,
    /// A customer arrives before the first turn the simulation processes.
    ArrivalBeforeStart,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scenario before it is simulated from `first_turn`.
///
/// Checks:
/// 1. No duplicate customer IDs
/// 2. No customer arrives before `first_turn`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_scenario(scenario: &Scenario, first_turn: Turn) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for customer in scenario.customers() {
        if !ids.insert(customer.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate customer ID: {}", customer.id()),
            ));
        }

        if customer.entry_turn() < first_turn {
            errors.push(ValidationError::new(
                ValidationErrorKind::ArrivalBeforeStart,
                format!(
                    "Customer {} arrives at turn {}, before first turn {}",
                    customer.id(),
                    customer.entry_turn(),
                    first_turn
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
