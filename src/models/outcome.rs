//! Running outcome counters.
//!
//! Pure accumulation: no placement decision reads these values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Facility, Horizon, Procedure, SchedulingUnit};

/// Procedure counts per horizon class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonCounts {
    /// Emergency procedures.
    pub emergency: usize,
    /// Same-day procedures.
    pub same_day: usize,
    /// Same-week procedures.
    pub same_week: usize,
}

impl HorizonCounts {
    /// Count for one horizon.
    pub fn get(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::Emergency => self.emergency,
            Horizon::SameDay => self.same_day,
            Horizon::SameWeek => self.same_week,
        }
    }

    /// Increments the count for one horizon.
    pub fn increment(&mut self, horizon: Horizon) {
        match horizon {
            Horizon::Emergency => self.emergency += 1,
            Horizon::SameDay => self.same_day += 1,
            Horizon::SameWeek => self.same_week += 1,
        }
    }

    /// Sum over all horizons.
    pub fn total(&self) -> usize {
        self.emergency + self.same_day + self.same_week
    }
}

/// Placement outcome statistics for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStats {
    /// Classified input volume per horizon.
    pub procedures_by_horizon: HorizonCounts,
    /// Procedures committed to a room.
    pub placed: usize,
    /// Procedures placed outside their home facility.
    pub crossovers: usize,
    /// Cath-home procedures placed in an EP room.
    pub cath_to_ep: usize,
    /// EP-home procedures placed in a Cath room.
    pub ep_to_cath: usize,
    /// Overflowed procedures whose home facility is Cath.
    pub overflow_cath: usize,
    /// Overflowed procedures whose home facility is EP.
    pub overflow_ep: usize,
    /// First days of day-level units that overflowed.
    pub overflow_days: BTreeSet<usize>,
    /// First weeks of week-level units that overflowed.
    pub overflow_weeks: BTreeSet<usize>,
}

impl OutcomeStats {
    /// Total overflowed procedures.
    pub fn total_overflow(&self) -> usize {
        self.overflow_cath + self.overflow_ep
    }

    /// Overflow count for one home facility.
    pub fn overflow_for(&self, facility: Facility) -> usize {
        match facility {
            Facility::Cath => self.overflow_cath,
            Facility::Ep => self.overflow_ep,
        }
    }

    /// Placed plus overflowed.
    pub fn accounted(&self) -> usize {
        self.placed + self.total_overflow()
    }

    pub(crate) fn record_placement(&mut self, procedure: &Procedure, placed_in: Facility) {
        self.placed += 1;
        if procedure.facility != placed_in {
            self.crossovers += 1;
            match procedure.facility {
                Facility::Cath => self.cath_to_ep += 1,
                Facility::Ep => self.ep_to_cath += 1,
            }
        }
    }

    pub(crate) fn record_overflow(&mut self, procedure: &Procedure, unit: &SchedulingUnit) {
        match procedure.facility {
            Facility::Cath => self.overflow_cath += 1,
            Facility::Ep => self.overflow_ep += 1,
        }
        if unit.kind.is_week_level() {
            self.overflow_weeks.insert(unit.first_week());
        } else {
            self.overflow_days.insert(unit.first_day);
        }
    }
}
