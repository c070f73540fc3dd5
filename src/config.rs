//! Scheduler configuration.
//!
//! All policy knobs of a run live in one immutable [`SchedulerConfig`]
//! handed to the scheduler constructor. Configurations deserialize from
//! any serde format; missing fields take the defaults below.
//!
//! # Defaults
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | Horizon | 125 days (25 weeks) |
//! | Rooms | 5 Cath, 3 EP |
//! | Room ceiling | 634.8 min (10.58 h) |
//! | Close threshold | 600 min |
//! | Lab opens | 08:00 |
//! | Holding bays | 15-min slots, close at 30:00 |
//! | Crossover | lab preference |
//! | Priority | longest first |
//! | Selection | least loaded |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Facility, Horizon, DAYS_PER_WEEK};

/// Room count per facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCounts {
    /// Cath rooms.
    pub cath: usize,
    /// EP rooms.
    pub ep: usize,
}

impl RoomCounts {
    /// Creates a room count.
    pub fn new(cath: usize, ep: usize) -> Self {
        Self { cath, ep }
    }

    /// Rooms of one facility.
    #[inline]
    pub fn get(&self, facility: Facility) -> usize {
        match facility {
            Facility::Cath => self.cath,
            Facility::Ep => self.ep,
        }
    }

    /// Rooms of both facilities.
    #[inline]
    pub fn total(&self) -> usize {
        self.cath + self.ep
    }
}

impl Default for RoomCounts {
    fn default() -> Self {
        Self::new(5, 3)
    }
}

/// Room quotas per horizon class.
///
/// `None` means the class may use every room; `Some(counts)` limits it
/// to the first `counts` rooms of each facility, leaving the rest for
/// unrestricted classes (typically emergencies).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictedRooms {
    /// Quota for emergencies.
    pub emergency: Option<RoomCounts>,
    /// Quota for same-day procedures.
    pub same_day: Option<RoomCounts>,
    /// Quota for same-week procedures.
    pub same_week: Option<RoomCounts>,
}

impl RestrictedRooms {
    /// Quota of one horizon class.
    pub fn get(&self, horizon: Horizon) -> Option<RoomCounts> {
        match horizon {
            Horizon::Emergency => self.emergency,
            Horizon::SameDay => self.same_day,
            Horizon::SameWeek => self.same_week,
        }
    }

    /// Sets the quota of one horizon class.
    pub fn set(&mut self, horizon: Horizon, counts: Option<RoomCounts>) {
        match horizon {
            Horizon::Emergency => self.emergency = counts,
            Horizon::SameDay => self.same_day = counts,
            Horizon::SameWeek => self.same_week = counts,
        }
    }
}

/// Whether and how procedures may run outside their home facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverMode {
    /// Every procedure stays in its home facility.
    NoCrossovers,
    /// Flexible procedures move only when their home facility is full.
    #[default]
    LabPreference,
    /// Every procedure may use either facility from the start.
    AllFlex,
}

/// Placement order within a scheduling unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityPolicy {
    /// Ascending duration.
    ShortestFirst,
    /// Descending duration.
    #[default]
    LongestFirst,
    /// Descending post-procedure recovery.
    RecoveryConstrainedFirst,
    /// Input order.
    InputOrder,
}

/// How a room is chosen among the surviving candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Least booked minutes; ties by (day, facility, room).
    #[default]
    LeastLoaded,
    /// Uniformly at random, seeded by [`SchedulerConfig::seed`].
    UniformRandom,
}

/// Normal distribution replacing recorded post-procedure recovery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryDistribution {
    /// Mean (minutes).
    pub mean_minutes: f64,
    /// Standard deviation (minutes).
    pub std_dev_minutes: f64,
}

impl RecoveryDistribution {
    /// Creates a distribution.
    pub fn new(mean_minutes: f64, std_dev_minutes: f64) -> Self {
        Self {
            mean_minutes,
            std_dev_minutes,
        }
    }
}

/// Holding-bay grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingBayConfig {
    /// Slot width (minutes).
    pub resolution_minutes: u32,
    /// End of the last slot, minutes after midnight. May exceed 24 h to
    /// hold late recoveries on the same day's grid.
    pub closing_minute: u32,
}

impl Default for HoldingBayConfig {
    fn default() -> Self {
        Self {
            resolution_minutes: 15,
            closing_minute: 30 * 60,
        }
    }
}

/// Immutable configuration of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days in the horizon.
    pub num_days: usize,
    /// Rooms per facility per day.
    pub rooms: RoomCounts,
    /// Room quotas per horizon class.
    pub restricted_rooms: RestrictedRooms,
    /// Hard per-room-per-day limit (minutes).
    pub room_ceiling_minutes: f64,
    /// A room with more booked minutes than this takes no new cases.
    pub close_threshold_minutes: f64,
    /// Lab opening time, minutes after midnight.
    pub lab_open_minute: f64,
    /// Crossover policy.
    pub crossover: CrossoverMode,
    /// Pack same-week procedures over two-week spans.
    pub pair_weeks: bool,
    /// Pack same-day procedures over Tue+Wed and Thu+Fri.
    pub pair_days: bool,
    /// Treat every same-week procedure as same-day.
    pub same_day_only: bool,
    /// Draw post-procedure recovery from this distribution instead of the input.
    pub random_post_recovery: Option<RecoveryDistribution>,
    /// Placement order within a unit.
    pub priority: PriorityPolicy,
    /// Candidate selection strategy.
    pub selection: SelectionPolicy,
    /// Holding-bay grid layout.
    pub holding_bay: HoldingBayConfig,
    /// Seed for every random draw of the run.
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            num_days: 125,
            rooms: RoomCounts::default(),
            restricted_rooms: RestrictedRooms::default(),
            room_ceiling_minutes: 10.58 * 60.0,
            close_threshold_minutes: 10.0 * 60.0,
            lab_open_minute: 8.0 * 60.0,
            crossover: CrossoverMode::default(),
            pair_weeks: false,
            pair_days: false,
            same_day_only: false,
            random_post_recovery: None,
            priority: PriorityPolicy::default(),
            selection: SelectionPolicy::default(),
            holding_bay: HoldingBayConfig::default(),
            seed: 30,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of days.
    pub fn with_days(mut self, num_days: usize) -> Self {
        self.num_days = num_days;
        self
    }

    /// Sets the rooms per facility.
    pub fn with_rooms(mut self, cath: usize, ep: usize) -> Self {
        self.rooms = RoomCounts::new(cath, ep);
        self
    }

    /// Restricts one horizon class to a room quota.
    pub fn with_restricted_rooms(mut self, horizon: Horizon, cath: usize, ep: usize) -> Self {
        self.restricted_rooms
            .set(horizon, Some(RoomCounts::new(cath, ep)));
        self
    }

    /// Sets the hard room ceiling (minutes).
    pub fn with_room_ceiling(mut self, minutes: f64) -> Self {
        self.room_ceiling_minutes = minutes;
        self
    }

    /// Sets the close threshold (minutes).
    pub fn with_close_threshold(mut self, minutes: f64) -> Self {
        self.close_threshold_minutes = minutes;
        self
    }

    /// Sets the lab opening time (minutes after midnight).
    pub fn with_lab_open_minute(mut self, minute: f64) -> Self {
        self.lab_open_minute = minute;
        self
    }

    /// Sets the crossover policy.
    pub fn with_crossover(mut self, crossover: CrossoverMode) -> Self {
        self.crossover = crossover;
        self
    }

    /// Enables or disables week pairing.
    pub fn with_week_pairs(mut self, enabled: bool) -> Self {
        self.pair_weeks = enabled;
        self
    }

    /// Enables or disables day pairing.
    pub fn with_day_pairs(mut self, enabled: bool) -> Self {
        self.pair_days = enabled;
        self
    }

    /// Enables or disables the same-day-only override.
    pub fn with_same_day_only(mut self, enabled: bool) -> Self {
        self.same_day_only = enabled;
        self
    }

    /// Draws post-procedure recovery from `Normal(mean, std_dev)`.
    pub fn with_random_post_recovery(mut self, mean_minutes: f64, std_dev_minutes: f64) -> Self {
        self.random_post_recovery = Some(RecoveryDistribution::new(mean_minutes, std_dev_minutes));
        self
    }

    /// Sets the placement priority.
    pub fn with_priority(mut self, priority: PriorityPolicy) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the candidate selection strategy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the holding-bay grid layout.
    pub fn with_holding_bay(mut self, resolution_minutes: u32, closing_minute: u32) -> Self {
        self.holding_bay = HoldingBayConfig {
            resolution_minutes,
            closing_minute,
        };
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Weeks in the horizon; a trailing partial week counts.
    pub fn num_weeks(&self) -> usize {
        self.num_days.div_ceil(DAYS_PER_WEEK)
    }

    /// Rooms of `facility` visible to placements of `horizon`.
    pub fn visible_rooms(&self, horizon: Horizon, facility: Facility) -> usize {
        self.restricted_rooms
            .get(horizon)
            .unwrap_or(self.rooms)
            .get(facility)
    }

    /// Checks the configuration for inconsistencies.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_days == 0 {
            return Err(invalid("num_days", "horizon must contain at least one day"));
        }
        if !is_positive(self.room_ceiling_minutes) {
            return Err(invalid(
                "room_ceiling_minutes",
                format!("must be positive, got {}", self.room_ceiling_minutes),
            ));
        }
        if !self.close_threshold_minutes.is_finite() || self.close_threshold_minutes < 0.0 {
            return Err(invalid(
                "close_threshold_minutes",
                format!("must be non-negative, got {}", self.close_threshold_minutes),
            ));
        }
        if !self.lab_open_minute.is_finite() || self.lab_open_minute < 0.0 {
            return Err(invalid(
                "lab_open_minute",
                format!("must be non-negative, got {}", self.lab_open_minute),
            ));
        }

        for horizon in Horizon::ALL {
            let Some(quota) = self.restricted_rooms.get(horizon) else {
                continue;
            };
            for facility in Facility::ALL {
                let restricted = quota.get(facility);
                let total = self.rooms.get(facility);
                if restricted > total {
                    return Err(ConfigError::RestrictedRoomsExceedTotal {
                        horizon,
                        facility,
                        restricted,
                        total,
                    });
                }
            }
        }

        let bays = self.holding_bay;
        if bays.resolution_minutes == 0 {
            return Err(invalid("holding_bay.resolution_minutes", "must be positive"));
        }
        if bays.closing_minute == 0 || bays.closing_minute % bays.resolution_minutes != 0 {
            return Err(invalid(
                "holding_bay.closing_minute",
                format!(
                    "must be a positive multiple of the {}-minute resolution, got {}",
                    bays.resolution_minutes, bays.closing_minute
                ),
            ));
        }

        if let Some(dist) = self.random_post_recovery {
            if !dist.mean_minutes.is_finite() {
                return Err(invalid(
                    "random_post_recovery.mean_minutes",
                    format!("must be finite, got {}", dist.mean_minutes),
                ));
            }
            if !dist.std_dev_minutes.is_finite() || dist.std_dev_minutes < 0.0 {
                return Err(invalid(
                    "random_post_recovery.std_dev_minutes",
                    format!("must be non-negative, got {}", dist.std_dev_minutes),
                ));
            }
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_weeks(), 25);
        assert!((config.room_ceiling_minutes - 634.8).abs() < 1e-9);
    }

    #[test]
    fn test_builder() {
        let config = SchedulerConfig::new()
            .with_days(12)
            .with_rooms(4, 2)
            .with_restricted_rooms(Horizon::SameWeek, 3, 2)
            .with_crossover(CrossoverMode::AllFlex)
            .with_day_pairs(true)
            .with_priority(PriorityPolicy::ShortestFirst)
            .with_holding_bay(30, 1440)
            .with_seed(7);

        assert_eq!(config.num_weeks(), 3);
        assert_eq!(config.visible_rooms(Horizon::SameWeek, Facility::Cath), 3);
        assert_eq!(config.visible_rooms(Horizon::Emergency, Facility::Cath), 4);
        assert_eq!(config.visible_rooms(Horizon::SameDay, Facility::Ep), 2);
        assert_eq!(config.crossover, CrossoverMode::AllFlex);
        assert!(config.pair_days);
        assert!(!config.pair_weeks);
        assert_eq!(config.holding_bay.resolution_minutes, 30);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_restricted_exceeds_total() {
        let config = SchedulerConfig::new()
            .with_rooms(2, 2)
            .with_restricted_rooms(Horizon::SameDay, 2, 3);

        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::RestrictedRoomsExceedTotal {
                horizon: Horizon::SameDay,
                facility: Facility::Ep,
                restricted: 3,
                total: 2,
            }
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            SchedulerConfig::new().with_days(0),
            SchedulerConfig::new().with_room_ceiling(0.0),
            SchedulerConfig::new().with_room_ceiling(f64::NAN),
            SchedulerConfig::new().with_close_threshold(-1.0),
            SchedulerConfig::new().with_lab_open_minute(-30.0),
            SchedulerConfig::new().with_holding_bay(0, 1440),
            SchedulerConfig::new().with_holding_bay(15, 1441),
            SchedulerConfig::new().with_random_post_recovery(180.0, -1.0),
            SchedulerConfig::new().with_random_post_recovery(f64::INFINITY, 1.0),
        ];
        for config in cases {
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidParameter { .. })
                ),
                "expected invalid parameter for {config:?}"
            );
        }
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "num_days": 10,
            "rooms": { "cath": 2, "ep": 1 },
            "restricted_rooms": { "same_day": { "cath": 1, "ep": 1 } },
            "crossover": "AllFlex",
            "priority": "RecoveryConstrainedFirst",
            "random_post_recovery": { "mean_minutes": 180.0, "std_dev_minutes": 15.0 }
        }"#;
        let config: SchedulerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.num_days, 10);
        assert_eq!(config.rooms, RoomCounts::new(2, 1));
        assert_eq!(config.restricted_rooms.same_day, Some(RoomCounts::new(1, 1)));
        assert_eq!(config.restricted_rooms.same_week, None);
        assert_eq!(config.crossover, CrossoverMode::AllFlex);
        assert_eq!(config.priority, PriorityPolicy::RecoveryConstrainedFirst);
        assert_eq!(config.holding_bay, HoldingBayConfig::default());
        assert!((config.lab_open_minute - 480.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let config = SchedulerConfig::new().with_week_pairs(true).with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
