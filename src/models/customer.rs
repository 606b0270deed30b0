//! Customer model.
//!
//! A customer is one arrival event together with the economics of its
//! order. Customers are immutable once built; the scheduler only reads them.
//!
//! # Record Format
//!
//! Scenario records hold five whitespace-separated fields in the order
//! `entry_turn id profit prep_time patience`:
//!
//! ```text
//! 1	23215	13	4	8
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Turn;
use crate::error::ParseError;

/// Number of fields in a scenario record.
pub const FIELD_COUNT: usize = 5;

/// A customer waiting to be served.
///
/// Equality is structural: two customers are equal only if all five
/// fields match.
///
/// # Example
/// ```
/// use u_serve::models::Customer;
///
/// let c: Customer = "1\t23215\t13\t4\t8".parse().unwrap();
/// assert_eq!(c.id(), 23215);
/// assert_eq!(c.entry_turn(), 1);
/// assert_eq!(c.profit(), 13.0);
/// assert_eq!(c.prep_time(), 4);
/// assert_eq!(c.patience(), 8);
/// assert_eq!(c.expiry_turn(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: u64,
    entry_turn: Turn,
    profit: f64,
    prep_time: Turn,
    patience: Turn,
}

impl Customer {
    /// Creates a customer arriving at `entry_turn`.
    ///
    /// Defaults: zero profit, one turn of preparation, zero patience.
    pub fn new(id: u64, entry_turn: Turn) -> Self {
        Self {
            id,
            entry_turn,
            profit: 0.0,
            prep_time: 1,
            patience: 0,
        }
    }

    /// Sets the profit earned when served.
    pub fn with_profit(mut self, profit: f64) -> Self {
        self.profit = profit;
        self
    }

    /// Sets the number of turns the serving slot is occupied.
    pub fn with_prep_time(mut self, prep_time: Turn) -> Self {
        self.prep_time = prep_time;
        self
    }

    /// Sets how many turns the customer waits before leaving.
    pub fn with_patience(mut self, patience: Turn) -> Self {
        self.patience = patience;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn entry_turn(&self) -> Turn {
        self.entry_turn
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn prep_time(&self) -> Turn {
        self.prep_time
    }

    pub fn patience(&self) -> Turn {
        self.patience
    }

    /// First turn on which the customer is dropped if still waiting.
    pub fn expiry_turn(&self) -> Turn {
        self.entry_turn.saturating_add(self.patience)
    }

    /// Whether the customer has run out of patience at `turn`.
    pub fn is_expired_at(&self, turn: Turn) -> bool {
        self.expiry_turn() <= turn
    }

    /// Serializes back into the tab-separated record format.
    pub fn to_record(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.entry_turn, self.id, self.profit, self.prep_time, self.patience
        )
    }
}

impl FromStr for Customer {
    type Err = ParseError;

    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        let entry_turn = parse_integer("entry turn", fields[0])?;
        let id = parse_integer("id", fields[1])?;
        let profit = parse_profit(fields[2])?;
        let prep_time = parse_integer("preparation time", fields[3])?;
        let patience = parse_integer("patience", fields[4])?;

        if prep_time == 0 {
            return Err(ParseError::ZeroPrepTime);
        }

        Ok(Self {
            id,
            entry_turn,
            profit,
            prep_time,
            patience,
        })
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_profit(value: &str) -> Result<f64, ParseError> {
    match value.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(ParseError::InvalidProfit {
            value: value.to_string(),
        }),
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, Entry: {}, Profit: {:?}, Prep: {}, Patience: {}",
            self.id, self.entry_turn, self.profit, self.prep_time, self.patience
        )
    }
}
