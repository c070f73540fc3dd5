//! Scheduling units.
//!
//! A scheduling unit is a contiguous span of days over which a group of
//! same-horizon procedures is packed jointly. The span determines which
//! rooms the domain constructor may offer.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::{Horizon, Procedure, DAYS_PER_WEEK};

/// Shape of a unit's day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// One calendar day.
    Day,
    /// Two consecutive days (Tue+Wed or Thu+Fri).
    DayPair,
    /// One week.
    Week,
    /// Two consecutive weeks.
    WeekPair,
}

impl UnitKind {
    /// Whether overflow is accounted per week rather than per day.
    #[inline]
    pub fn is_week_level(self) -> bool {
        matches!(self, UnitKind::Week | UnitKind::WeekPair)
    }
}

/// A group of procedures placed jointly over a span of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingUnit {
    /// Horizon class shared by all members.
    pub horizon: Horizon,
    /// Span shape.
    pub kind: UnitKind,
    /// First day of the span (also the unit's overflow key).
    pub first_day: usize,
    /// Number of days in the span.
    pub day_count: usize,
    /// Members in placement order.
    pub members: Vec<Procedure>,
}

impl SchedulingUnit {
    /// Creates an empty unit.
    pub fn new(horizon: Horizon, kind: UnitKind, first_day: usize, day_count: usize) -> Self {
        Self {
            horizon,
            kind,
            first_day,
            day_count,
            members: Vec::new(),
        }
    }

    /// Days covered by the unit.
    #[inline]
    pub fn days(&self) -> Range<usize> {
        self.first_day..self.first_day + self.day_count
    }

    /// Week containing the first day.
    #[inline]
    pub fn first_week(&self) -> usize {
        self.first_day / DAYS_PER_WEEK
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the unit has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
