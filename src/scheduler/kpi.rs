//! Packing quality metrics (KPIs).
//!
//! Computes utilization and volume indicators from a completed
//! [`TimePeriod`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Room utilization | booked minutes / room ceiling, per room-day |
//! | Daily utilization | mean room utilization per facility per day |
//! | Weekly utilization | mean room utilization per facility per week |
//! | Overall utilization | mean room utilization per facility over the horizon |
//! | Minute breakdown | minutes by horizon × flexibility, input and placed |
//! | Overflow rate | overflowed / all procedures |
//! | Holding-bay peak | highest slot count per day |

use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::models::{
    Facility, Horizon, Procedure, Room, RoomFlexibility, RoomKey, TimePeriod, DAYS_PER_WEEK,
};

/// Utilization of one room-day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomUtilization {
    /// The room.
    pub key: RoomKey,
    /// Booked minutes.
    pub booked_minutes: f64,
    /// Booked minutes / ceiling (0.0..=1.0).
    pub utilization: f64,
}

/// Mean utilization per facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FacilityUtilization {
    /// Cath rooms.
    pub cath: f64,
    /// EP rooms.
    pub ep: f64,
    /// All rooms.
    pub all: f64,
}

impl FacilityUtilization {
    /// Value for one facility.
    pub fn get(&self, facility: Facility) -> f64 {
        match facility {
            Facility::Cath => self.cath,
            Facility::Ep => self.ep,
        }
    }

    fn from_rooms<'a>(rooms: impl Iterator<Item = &'a RoomUtilization>) -> Self {
        let mut sums = [0.0; 2];
        let mut counts = [0usize; 2];
        for room in rooms {
            let index = match room.key.facility {
                Facility::Cath => 0,
                Facility::Ep => 1,
            };
            sums[index] += room.utilization;
            counts[index] += 1;
        }
        let mean = |sum: f64, count: usize| if count == 0 { 0.0 } else { sum / count as f64 };
        Self {
            cath: mean(sums[0], counts[0]),
            ep: mean(sums[1], counts[1]),
            all: mean(sums[0] + sums[1], counts[0] + counts[1]),
        }
    }
}

/// Minutes split by room flexibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FlexMinutes {
    /// Home-facility-only procedures.
    pub fixed: f64,
    /// Either-facility procedures.
    pub flexible: f64,
}

impl FlexMinutes {
    /// Sum of both classes.
    pub fn total(&self) -> f64 {
        self.fixed + self.flexible
    }
}

/// Procedure minutes by horizon and flexibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MinuteBreakdown {
    /// Emergency minutes.
    pub emergency: FlexMinutes,
    /// Same-day minutes.
    pub same_day: FlexMinutes,
    /// Same-week minutes.
    pub same_week: FlexMinutes,
}

impl MinuteBreakdown {
    /// Minutes of one horizon.
    pub fn get(&self, horizon: Horizon) -> FlexMinutes {
        match horizon {
            Horizon::Emergency => self.emergency,
            Horizon::SameDay => self.same_day,
            Horizon::SameWeek => self.same_week,
        }
    }

    /// All minutes.
    pub fn total(&self) -> f64 {
        Horizon::ALL.iter().map(|&h| self.get(h).total()).sum()
    }

    fn add(&mut self, procedure: &Procedure) {
        let class = match procedure.horizon {
            Horizon::Emergency => &mut self.emergency,
            Horizon::SameDay => &mut self.same_day,
            Horizon::SameWeek => &mut self.same_week,
        };
        match procedure.flexibility {
            RoomFlexibility::Fixed => class.fixed += procedure.duration_minutes,
            RoomFlexibility::Either => class.flexible += procedure.duration_minutes,
        }
    }
}

/// Packing performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Per-room-day utilization, in room order.
    pub room_utilization: Vec<RoomUtilization>,
    /// Mean utilization per day.
    pub daily_utilization: Vec<FacilityUtilization>,
    /// Mean utilization per week (a trailing partial week counts).
    pub weekly_utilization: Vec<FacilityUtilization>,
    /// Mean utilization over the horizon.
    pub overall_utilization: FacilityUtilization,
    /// Minutes of all classified procedures.
    pub input_minutes: MinuteBreakdown,
    /// Minutes of placed procedures.
    pub placed_minutes: MinuteBreakdown,
    /// Overflowed / all procedures (0.0 when there are none).
    pub overflow_rate: f64,
    /// Highest holding-bay occupancy per day.
    pub holding_bay_peaks: Vec<u32>,
}

impl ScheduleKpi {
    /// Computes KPIs from a completed time period.
    ///
    /// # Arguments
    /// * `period` - The scheduling result.
    /// * `config` - The configuration it was produced with (for the ceiling).
    pub fn calculate(period: &TimePeriod, config: &SchedulerConfig) -> Self {
        let ceiling = config.room_ceiling_minutes;
        let room_utilization: Vec<RoomUtilization> = period
            .rooms()
            .iter()
            .map(|room| RoomUtilization {
                key: room.key(),
                booked_minutes: room.booked_minutes(),
                utilization: if ceiling > 0.0 {
                    room.booked_minutes() / ceiling
                } else {
                    0.0
                },
            })
            .collect();

        let daily_utilization = (0..period.num_days())
            .map(|day| {
                FacilityUtilization::from_rooms(room_utilization.iter().filter(|r| r.key.day == day))
            })
            .collect();
        let weekly_utilization = (0..period.num_weeks())
            .map(|week| {
                FacilityUtilization::from_rooms(
                    room_utilization
                        .iter()
                        .filter(|r| r.key.day / DAYS_PER_WEEK == week),
                )
            })
            .collect();
        let overall_utilization = FacilityUtilization::from_rooms(room_utilization.iter());

        let mut placed_minutes = MinuteBreakdown::default();
        for procedure in period.rooms().iter().flat_map(Room::procedures) {
            placed_minutes.add(procedure);
        }
        let mut input_minutes = placed_minutes;
        for (_, overflow) in period.overflow_lists() {
            for procedure in overflow {
                input_minutes.add(procedure);
            }
        }

        let accounted = period.stats().accounted();
        let overflow_rate = if accounted == 0 {
            0.0
        } else {
            period.stats().total_overflow() as f64 / accounted as f64
        };

        let bays = period.holding_bays();
        let holding_bay_peaks = (0..bays.num_days()).map(|day| bays.peak(day)).collect();

        Self {
            room_utilization,
            daily_utilization,
            weekly_utilization,
            overall_utilization,
            input_minutes,
            placed_minutes,
            overflow_rate,
            holding_bay_peaks,
        }
    }

    /// Fraction of a horizon's input minutes that were placed.
    ///
    /// `1.0` when the horizon had no input.
    pub fn placed_fraction(&self, horizon: Horizon) -> f64 {
        let input = self.input_minutes.get(horizon).total();
        if input <= 0.0 {
            1.0
        } else {
            self.placed_minutes.get(horizon).total() / input
        }
    }

    /// Whether the result meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_overflow_rate: f64, min_utilization: f64) -> bool {
        self.overflow_rate <= max_overflow_rate && self.overall_utilization.all >= min_utilization
    }
}
