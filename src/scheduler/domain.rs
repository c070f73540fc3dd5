//! Placement domains and capacity filtering.
//!
//! The domain of a procedure is every room it may legally be booked in
//! for its unit's span, before any selection takes place.
//!
//! # Algorithm
//! 1. Seed the home facility's rooms over the unit's days (restricted to
//!    the horizon's quota, if any).
//! 2. Under `AllFlex`, also seed the other facility's rooms.
//! 3. Drop rooms the capacity filter rejects.
//! 4. If nothing survives, the procedure is flexible, and the policy is
//!    `LabPreference`, seed the other facility instead and filter again.
//!
//! An empty result means overflow.

use crate::config::{CrossoverMode, SchedulerConfig};
use crate::models::{Facility, Procedure, RoomKey, SchedulingUnit, TimePeriod};

/// A room that can take a procedure, with its current load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The room.
    pub key: RoomKey,
    /// Minutes already booked in it.
    pub booked_minutes: f64,
}

/// Rejects rooms that are closed or would exceed the ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityFilter {
    ceiling_minutes: f64,
    close_threshold_minutes: f64,
}

impl CapacityFilter {
    /// Creates a filter.
    pub fn new(ceiling_minutes: f64, close_threshold_minutes: f64) -> Self {
        Self {
            ceiling_minutes,
            close_threshold_minutes,
        }
    }

    /// Creates the filter of a configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.room_ceiling_minutes, config.close_threshold_minutes)
    }

    /// Whether a room with `booked_minutes` can take `duration_minutes` more.
    ///
    /// A room booked past the close threshold takes nothing further, even
    /// if the ceiling would still allow it.
    #[inline]
    pub fn admits(&self, booked_minutes: f64, duration_minutes: f64) -> bool {
        booked_minutes <= self.close_threshold_minutes
            && booked_minutes + duration_minutes <= self.ceiling_minutes
    }
}

/// Builds filtered placement domains.
#[derive(Debug, Clone)]
pub struct DomainConstructor {
    config: SchedulerConfig,
    filter: CapacityFilter,
}

impl DomainConstructor {
    /// Creates a constructor for a configuration.
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            config: config.clone(),
            filter: CapacityFilter::from_config(config),
        }
    }

    /// Filtered candidates for `procedure` within `unit`, in `RoomKey` order.
    pub fn candidates(
        &self,
        period: &TimePeriod,
        unit: &SchedulingUnit,
        procedure: &Procedure,
    ) -> Vec<Candidate> {
        let home = procedure.facility;
        let facilities: &[Facility] = match self.config.crossover {
            CrossoverMode::AllFlex => &Facility::ALL,
            CrossoverMode::NoCrossovers | CrossoverMode::LabPreference => {
                std::slice::from_ref(&home)
            }
        };

        let candidates = self.seed(period, unit, procedure, facilities);
        if !candidates.is_empty() {
            return candidates;
        }

        if self.config.crossover == CrossoverMode::LabPreference && procedure.is_flexible() {
            return self.seed(period, unit, procedure, &[home.other()]);
        }

        candidates
    }

    fn seed(
        &self,
        period: &TimePeriod,
        unit: &SchedulingUnit,
        procedure: &Procedure,
        facilities: &[Facility],
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for day in unit.days() {
            for facility in Facility::ALL {
                if !facilities.contains(&facility) {
                    continue;
                }
                let visible = self.config.visible_rooms(unit.horizon, facility);
                for room in period.rooms_on(day, facility).iter().take(visible) {
                    let booked = room.booked_minutes();
                    if self.filter.admits(booked, procedure.duration_minutes) {
                        candidates.push(Candidate {
                            key: room.key(),
                            booked_minutes: booked,
                        });
                    }
                }
            }
        }
        candidates
    }
}
