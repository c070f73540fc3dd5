//! Procedure model.
//!
//! A procedure is one unit of work to be packed into a lab room: a
//! duration, a home facility, an urgency horizon, and the holding-bay
//! time it needs before and after it runs.
//!
//! # Time Representation
//! Durations are minutes (`f64`). Day and week are 0-based indices into
//! the scheduling horizon; a week is [`DAYS_PER_WEEK`] consecutive days.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Working days in one scheduling week (Monday to Friday).
pub const DAYS_PER_WEEK: usize = 5;

/// One of the two physical lab pools a procedure can run in.
///
/// Ordered `Cath < Ep`; the order is part of the deterministic
/// tie-break between equally loaded rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facility {
    /// Catheterization lab.
    Cath,
    /// Electrophysiology lab.
    Ep,
}

impl Facility {
    /// Both facilities, in tie-break order.
    pub const ALL: [Facility; 2] = [Facility::Cath, Facility::Ep];

    /// The opposite facility.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Facility::Cath => Facility::Ep,
            Facility::Ep => Facility::Cath,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Facility::Cath => "Cath",
            Facility::Ep => "EP",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Urgency tier controlling which days a procedure may be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// Must run on its recorded day; placed after everything else.
    Emergency,
    /// Must run on its recorded day (or its day pair).
    SameDay,
    /// May run on any day of its recorded week (or week pair).
    SameWeek,
}

impl Horizon {
    /// All horizons, most urgent first.
    pub const ALL: [Horizon; 3] = [Horizon::Emergency, Horizon::SameDay, Horizon::SameWeek];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Horizon::Emergency => "emergency",
            Horizon::SameDay => "same-day",
            Horizon::SameWeek => "same-week",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which facilities a procedure's room may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomFlexibility {
    /// Home facility only.
    Fixed,
    /// Either facility.
    Either,
}

/// A procedure to be placed.
///
/// Values are never mutated by the scheduler; classification produces
/// new values (see `scheduler::Classifier`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    /// Unique procedure identifier.
    pub id: String,
    /// Recorded calendar day (0-based).
    pub day: usize,
    /// Recorded week (0-based).
    pub week: usize,
    /// Home facility (where the procedure was historically done).
    pub facility: Facility,
    /// Room time in minutes, turnover included.
    pub duration_minutes: f64,
    /// Urgency horizon.
    pub horizon: Horizon,
    /// Room flexibility.
    pub flexibility: RoomFlexibility,
    /// Holding-bay time before the procedure (minutes).
    pub pre_recovery_minutes: f64,
    /// Holding-bay time after the procedure (minutes).
    pub post_recovery_minutes: f64,
}

impl Procedure {
    /// Creates a same-day, fixed-facility procedure with no recovery time.
    ///
    /// The week is derived from the day; override it with [`with_week`](Self::with_week).
    pub fn new(
        id: impl Into<String>,
        day: usize,
        facility: Facility,
        duration_minutes: f64,
    ) -> Self {
        Self {
            id: id.into(),
            day,
            week: day / DAYS_PER_WEEK,
            facility,
            duration_minutes,
            horizon: Horizon::SameDay,
            flexibility: RoomFlexibility::Fixed,
            pre_recovery_minutes: 0.0,
            post_recovery_minutes: 0.0,
        }
    }

    /// Sets the recorded week.
    pub fn with_week(mut self, week: usize) -> Self {
        self.week = week;
        self
    }

    /// Sets the urgency horizon.
    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the room flexibility.
    pub fn with_flexibility(mut self, flexibility: RoomFlexibility) -> Self {
        self.flexibility = flexibility;
        self
    }

    /// Marks the procedure as runnable in either facility.
    pub fn flexible(self) -> Self {
        self.with_flexibility(RoomFlexibility::Either)
    }

    /// Sets pre- and post-procedure holding-bay minutes.
    pub fn with_recovery(mut self, pre_minutes: f64, post_minutes: f64) -> Self {
        self.pre_recovery_minutes = pre_minutes;
        self.post_recovery_minutes = post_minutes;
        self
    }

    /// Whether the procedure may run outside its home facility.
    #[inline]
    pub fn is_flexible(&self) -> bool {
        self.flexibility == RoomFlexibility::Either
    }
}
