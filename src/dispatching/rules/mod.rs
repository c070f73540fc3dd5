//! Built-in placement-order rules.
//!
//! # Score Convention
//! All rules return lower scores for procedures placed first.

use super::{PlacementRule, RuleScore};
use crate::models::Procedure;

/// Shortest Processing Time.
///
/// Places short procedures first. Fills rooms with many small cases and
/// leaves long ones to compete for the remaining gaps.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl PlacementRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, procedure: &Procedure) -> RuleScore {
        procedure.duration_minutes
    }
}

/// Longest Processing Time.
///
/// Places long procedures first, the classic bin-packing heuristic.
///
/// # Reference
/// Graham (1969), LPT list scheduling is within 4/3 of optimal makespan.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl PlacementRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, procedure: &Procedure) -> RuleScore {
        -procedure.duration_minutes
    }
}

/// Longest Recovery Time.
///
/// Places procedures with the longest post-procedure holding-bay stay
/// first, so they land early in the day and release their bays sooner.
#[derive(Debug, Clone, Copy)]
pub struct LongestRecovery;

impl PlacementRule for LongestRecovery {
    fn name(&self) -> &'static str {
        "LRT"
    }

    fn evaluate(&self, procedure: &Procedure) -> RuleScore {
        -procedure.post_recovery_minutes
    }
}
