//! Greedy room-packing scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the input procedures.
//! 2. Classify them (crossover, same-day-only, recovery policies).
//! 3. Build scheduling units and order their members by priority.
//! 4. For each unit (same-week, then same-day, then emergency), for each
//!    member in order: construct the filtered domain, select a room, and
//!    commit it, or append the procedure to the unit's overflow list.
//! 5. Each commit marks the booking's recovery spans on the holding-bay grid.
//!
//! No decision is revisited once made.
//!
//! # Complexity
//! O(n * d * r) where n=procedures, d=days per unit, r=rooms per day.
//!
//! # Reference
//! Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin
//! Packing: A Survey"

use tracing::{debug, info, instrument, trace, warn};

use super::classify::Classifier;
use super::domain::DomainConstructor;
use super::occupancy::RecoveryIntervals;
use super::placement::{selector_for, CandidateSelector};
use super::units::UnitBuilder;
use crate::config::SchedulerConfig;
use crate::error::SchedulingError;
use crate::models::{HoldingBayGrid, Horizon, Procedure, SchedulingUnit, TimePeriod};
use crate::validation::validate_procedures;

/// Greedy procedure-to-room packer.
///
/// # Example
///
/// ```
/// use u_roompack::config::{CrossoverMode, SchedulerConfig};
/// use u_roompack::models::{Facility, Procedure};
/// use u_roompack::scheduler::RoomPackingScheduler;
///
/// let config = SchedulerConfig::new()
///     .with_days(1)
///     .with_rooms(2, 2)
///     .with_room_ceiling(600.0)
///     .with_crossover(CrossoverMode::NoCrossovers);
/// let procedures = vec![
///     Procedure::new("P1", 0, Facility::Cath, 250.0),
///     Procedure::new("P2", 0, Facility::Cath, 250.0),
///     Procedure::new("P3", 0, Facility::Cath, 250.0),
/// ];
///
/// let period = RoomPackingScheduler::new(config)?.schedule(&procedures)?;
/// assert_eq!(period.stats().placed, 3);
/// assert_eq!(period.stats().total_overflow(), 0);
/// # Ok::<(), u_roompack::SchedulingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoomPackingScheduler {
    config: SchedulerConfig,
}

impl RoomPackingScheduler {
    /// Creates a scheduler, validating the configuration.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Packs procedures into rooms.
    ///
    /// Each call starts from an empty time period and fresh random
    /// generators, so repeated calls over the same input agree.
    ///
    /// # Errors
    /// - [`SchedulingError::InvalidInput`] if any procedure fails validation.
    /// - [`SchedulingError::HoldingBayOverrun`] if a recovery span leaves the grid.
    #[instrument(skip(self, procedures), fields(
        procedures = procedures.len(),
        days = self.config.num_days,
        crossover = ?self.config.crossover,
        priority = ?self.config.priority
    ))]
    pub fn schedule(&self, procedures: &[Procedure]) -> Result<TimePeriod, SchedulingError> {
        validate_procedures(procedures, &self.config).map_err(SchedulingError::InvalidInput)?;

        let config = &self.config;
        let classification = Classifier::new(config)?.classify(procedures);
        let units = UnitBuilder::from_config(config).build(classification.procedures);

        let grid = HoldingBayGrid::new(
            config.num_days,
            config.holding_bay.resolution_minutes,
            config.holding_bay.closing_minute,
        );
        let mut period = TimePeriod::new(config.num_days, config.rooms, grid);
        period.stats_mut().procedures_by_horizon = classification.counts;

        let domain = DomainConstructor::new(config);
        // Separate stream from the classifier's.
        let mut selector = selector_for(config.selection, config.seed.wrapping_add(1));

        for mut unit in units {
            if unit.is_empty() {
                continue;
            }
            debug!(
                horizon = %unit.horizon,
                kind = ?unit.kind,
                first_day = unit.first_day,
                members = unit.len(),
                "packing unit"
            );
            let members = std::mem::take(&mut unit.members);
            for procedure in members {
                self.place(&mut period, &domain, selector.as_mut(), &unit, procedure)?;
            }
        }

        let stats = period.stats();
        info!(
            placed = stats.placed,
            overflow = stats.total_overflow(),
            crossovers = stats.crossovers,
            "scheduling complete"
        );
        Ok(period)
    }

    fn place(
        &self,
        period: &mut TimePeriod,
        domain: &DomainConstructor,
        selector: &mut dyn CandidateSelector,
        unit: &SchedulingUnit,
        procedure: Procedure,
    ) -> Result<(), SchedulingError> {
        let candidates = domain.candidates(period, unit, &procedure);
        let Some(choice) = selector
            .select(&candidates)
            .and_then(|index| candidates.get(index))
        else {
            if procedure.horizon == Horizon::Emergency {
                warn!(
                    procedure = %procedure.id,
                    day = procedure.day,
                    facility = %procedure.facility,
                    "emergency procedure overflowed"
                );
            } else {
                trace!(procedure = %procedure.id, first_day = unit.first_day, "overflow");
            }
            Self::overflow(period, unit, procedure);
            return Ok(());
        };

        let key = choice.key;
        let start_minute = self.config.lab_open_minute + choice.booked_minutes;
        // Checked before anything is committed.
        let intervals =
            RecoveryIntervals::derive(&procedure, key.day, start_minute, period.holding_bays())?;

        trace!(
            procedure = %procedure.id,
            room = %key,
            candidates = candidates.len(),
            start_minute,
            "placed"
        );
        match period.book(key, procedure, start_minute) {
            Ok(()) => intervals.apply(period.holding_bays_mut(), key.day),
            Err(procedure) => {
                warn!(procedure = %procedure.id, room = %key, "candidate room not in horizon");
                Self::overflow(period, unit, procedure);
            }
        }
        Ok(())
    }

    fn overflow(period: &mut TimePeriod, unit: &SchedulingUnit, procedure: Procedure) {
        period.stats_mut().record_overflow(&procedure, unit);
        period.push_overflow(unit.first_day, procedure);
    }
}
