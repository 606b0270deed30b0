//! Scenario model.
//!
//! A scenario is the ordered list of customers that will arrive during a
//! simulation, loaded from a line-oriented text file. Blank lines and lines
//! starting with `#` are ignored. The first malformed record aborts loading;
//! no record is skipped or replaced with a default.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Customer, Turn};
use crate::error::ServeError;

/// Customers of one simulation, in file order.
///
/// # Example
/// ```
/// use u_serve::models::Scenario;
///
/// let scenario = Scenario::parse("1 11111 10 11 12\n3 22222 10 11 1\n").unwrap();
/// assert_eq!(scenario.len(), 2);
/// assert_eq!(scenario.last_entry_turn(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    customers: Vec<Customer>,
}

impl Scenario {
    /// Wraps an already-built customer list.
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// Parses scenario text.
    pub fn parse(text: &str) -> Result<Self, ServeError> {
        Self::from_reader(text.as_bytes())
    }

    /// Reads a scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ServeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads records line by line.
    ///
    /// Errors identify the 1-based line number and the offending text.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ServeError> {
        let mut customers = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let record = line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }

            let customer = record.parse::<Customer>().map_err(|source| ServeError::Record {
                line: index + 1,
                record: record.to_string(),
                source,
            })?;
            customers.push(customer);
        }

        log::debug!("loaded scenario with {} customers", customers.len());
        Ok(Self { customers })
    }

    /// Customers in file order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Earliest arrival turn, if any.
    pub fn first_entry_turn(&self) -> Option<Turn> {
        self.customers.iter().map(Customer::entry_turn).min()
    }

    /// Latest arrival turn, if any.
    pub fn last_entry_turn(&self) -> Option<Turn> {
        self.customers.iter().map(Customer::entry_turn).max()
    }

    /// Customers sorted by arrival turn; file order is kept among equal turns.
    pub fn arrivals_in_order(&self) -> Vec<Customer> {
        let mut arrivals = self.customers.clone();
        arrivals.sort_by_key(Customer::entry_turn);
        arrivals
    }

    /// Serializes the scenario back into record lines.
    pub fn to_records(&self) -> String {
        let mut out = String::new();
        for customer in &self.customers {
            out.push_str(&customer.to_record());
            out.push('\n');
        }
        out
    }
}
