//! Ordering policies for the waiting queue.
//!
//! A policy decides where a newly admitted customer is placed in the
//! waiting queue. The head of the queue is served next.
//!
//! # Usage
//!
//! ```
//! use u_serve::dispatching::{rules, OrderingPolicy, PolicyKind};
//! use u_serve::models::Customer;
//!
//! let queue = vec![Customer::new(1, 1), Customer::new(2, 3)];
//! let late = Customer::new(3, 2);
//! assert_eq!(rules::Fifo.insertion_index(&queue, &late), 1);
//!
//! let policy = "lifo".parse::<PolicyKind>().unwrap().policy();
//! assert_eq!(policy.name(), "LIFO");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Kleinrock (1976), "Queueing Systems, Vol. 2", Ch. 3 (priority queueing)

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ServeError;
use crate::models::Customer;

/// An insertion rule for the waiting queue.
///
/// # Contract
/// `queue` is always in the order produced by previous calls to this
/// policy. The returned index must be in `0..=queue.len()`.
pub trait OrderingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FIFO", "SPT").
    fn name(&self) -> &'static str;

    /// Index at which `customer` is inserted into `queue`.
    fn insertion_index(&self, queue: &[Customer], customer: &Customer) -> usize;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Built-in policy selector, used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Earliest arrival first.
    #[serde(alias = "earliest-arrival")]
    Fifo,
    /// Latest arrival first.
    #[serde(alias = "latest-arrival")]
    Lifo,
    /// Highest profit first.
    #[serde(rename = "maxp", alias = "highest-profit")]
    MaxProfit,
    /// Shortest preparation time first.
    #[serde(alias = "shortest-prep")]
    Spt,
}

impl PolicyKind {
    /// Every built-in policy, in report order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Lifo,
        PolicyKind::MaxProfit,
        PolicyKind::Spt,
    ];

    /// Instantiates the policy.
    pub fn policy(self) -> Arc<dyn OrderingPolicy> {
        match self {
            PolicyKind::Fifo => Arc::new(rules::Fifo),
            PolicyKind::Lifo => Arc::new(rules::Lifo),
            PolicyKind::MaxProfit => Arc::new(rules::MaxProfit),
            PolicyKind::Spt => Arc::new(rules::Spt),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lifo => "lifo",
            PolicyKind::MaxProfit => "maxp",
            PolicyKind::Spt => "spt",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ServeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "earliest-arrival" => Ok(PolicyKind::Fifo),
            "lifo" | "latest-arrival" => Ok(PolicyKind::Lifo),
            "maxp" | "highest-profit" => Ok(PolicyKind::MaxProfit),
            "spt" | "shortest-prep" => Ok(PolicyKind::Spt),
            _ => Err(ServeError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_kind() {
        assert_eq!("fifo".parse::<PolicyKind>().unwrap(), PolicyKind::Fifo);
        assert_eq!("LIFO".parse::<PolicyKind>().unwrap(), PolicyKind::Lifo);
        assert_eq!(
            " highest-profit ".parse::<PolicyKind>().unwrap(),
            PolicyKind::MaxProfit
        );
        assert_eq!("shortest-prep".parse::<PolicyKind>().unwrap(), PolicyKind::Spt);
        assert!(matches!(
            "random".parse::<PolicyKind>(),
            Err(ServeError::UnknownPolicy(s)) if s == "random"
        ));
    }

    #[test]
    fn test_display_reparses() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_policy_names() {
        let names: Vec<&str> = PolicyKind::ALL.iter().map(|k| k.policy().name()).collect();
        assert_eq!(names, vec!["FIFO", "LIFO", "MAXP", "SPT"]);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PolicyKind::ALL).unwrap();
        assert_eq!(json, r#"["fifo","lifo","maxp","spt"]"#);
        let kind: PolicyKind = serde_json::from_str(r#""latest-arrival""#).unwrap();
        assert_eq!(kind, PolicyKind::Lifo);
    }
}
