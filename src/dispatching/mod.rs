//! Placement-order rules and rule engine.
//!
//! Decides the order in which the members of one scheduling unit are
//! offered to the placement engine. Greedy packing is order-sensitive,
//! so the same procedures packed longest-first and shortest-first can
//! overflow differently.
//!
//! # Usage
//!
//! ```
//! use u_roompack::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Lpt)
//!     .with_tie_breaker(rules::LongestRecovery);
//! assert_eq!(engine.rule_names(), vec!["LPT", "LRT"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (LPT)

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::config::PriorityPolicy;
use crate::models::Procedure;
use std::fmt::Debug;

/// Score returned by a placement rule.
///
/// Lower scores = placed earlier.
pub type RuleScore = f64;

/// A rule that ranks procedures within a scheduling unit.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// procedures that should be placed first.
pub trait PlacementRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "LPT").
    fn name(&self) -> &'static str;

    /// Scores one procedure.
    fn evaluate(&self, procedure: &Procedure) -> RuleScore;
}

impl RuleEngine {
    /// Builds the engine implementing a priority policy.
    ///
    /// `InputOrder` yields an engine without rules, which keeps the
    /// input order.
    pub fn for_policy(policy: PriorityPolicy) -> Self {
        match policy {
            PriorityPolicy::ShortestFirst => Self::new().with_rule(rules::Spt),
            PriorityPolicy::LongestFirst => Self::new().with_rule(rules::Lpt),
            PriorityPolicy::RecoveryConstrainedFirst => {
                Self::new().with_rule(rules::LongestRecovery)
            }
            PriorityPolicy::InputOrder => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_for_policy() {
        assert_eq!(
            RuleEngine::for_policy(PriorityPolicy::ShortestFirst).rule_names(),
            vec!["SPT"]
        );
        assert_eq!(
            RuleEngine::for_policy(PriorityPolicy::LongestFirst).rule_names(),
            vec!["LPT"]
        );
        assert_eq!(
            RuleEngine::for_policy(PriorityPolicy::RecoveryConstrainedFirst).rule_names(),
            vec!["LRT"]
        );
        assert!(RuleEngine::for_policy(PriorityPolicy::InputOrder).is_empty());
    }
}
