//! Rule engine for multi-criteria placement ordering.
//!
//! Applies rules in sequence; a later rule is consulted only when all
//! earlier rules tie. Exact ties keep the input order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::PlacementRule;
use crate::models::Procedure;

/// A composable rule engine for procedure ordering.
///
/// # Example
/// ```
/// use u_roompack::dispatching::{rules, RuleEngine};
/// use u_roompack::models::{Facility, Procedure};
///
/// let mut procedures = vec![
///     Procedure::new("short", 0, Facility::Cath, 60.0),
///     Procedure::new("long", 0, Facility::Cath, 240.0),
/// ];
/// RuleEngine::new().with_rule(rules::Lpt).sort(&mut procedures);
/// assert_eq!(procedures[0].id, "long");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn PlacementRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: PlacementRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after every earlier rule ties.
    pub fn with_tie_breaker<R: PlacementRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Whether the engine has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts procedures in place by priority (highest priority first).
    ///
    /// The sort is stable.
    pub fn sort(&self, procedures: &mut [Procedure]) {
        if self.rules.is_empty() {
            return;
        }
        procedures.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Procedure, b: &Procedure) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.evaluate(a).total_cmp(&rule.evaluate(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
