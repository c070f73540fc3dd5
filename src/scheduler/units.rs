//! Scheduling-unit construction.
//!
//! Groups classified procedures into the day spans they are packed over
//! and orders the groups for processing.
//!
//! # Spans
//!
//! | Horizon | Pairing off | Pairing on |
//! |---------|-------------|------------|
//! | Emergency | one day | one day |
//! | SameDay | one day | Mon alone, Tue+Wed, Thu+Fri |
//! | SameWeek | one week | two weeks, a trailing odd week alone |
//!
//! Units are returned same-week first, then same-day, then emergency;
//! within a class by ascending first day. Every unit exists even when it
//! has no members.

use crate::config::SchedulerConfig;
use crate::dispatching::RuleEngine;
use crate::models::{Horizon, Procedure, SchedulingUnit, UnitKind, DAYS_PER_WEEK};

/// Placement order of horizon classes.
pub const PROCESSING_ORDER: [Horizon; 3] = [Horizon::SameWeek, Horizon::SameDay, Horizon::Emergency];

/// Builds ordered scheduling units from classified procedures.
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    num_days: usize,
    pair_days: bool,
    pair_weeks: bool,
    engine: RuleEngine,
}

impl UnitBuilder {
    /// Creates a builder for a horizon of `num_days` days.
    pub fn new(num_days: usize) -> Self {
        Self {
            num_days,
            pair_days: false,
            pair_weeks: false,
            engine: RuleEngine::new(),
        }
    }

    /// Creates a builder from a configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.num_days)
            .with_day_pairs(config.pair_days)
            .with_week_pairs(config.pair_weeks)
            .with_rule_engine(RuleEngine::for_policy(config.priority))
    }

    /// Enables or disables same-day pairing.
    pub fn with_day_pairs(mut self, enabled: bool) -> Self {
        self.pair_days = enabled;
        self
    }

    /// Enables or disables same-week pairing.
    pub fn with_week_pairs(mut self, enabled: bool) -> Self {
        self.pair_weeks = enabled;
        self
    }

    /// Sets the member ordering.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Builds every unit of the horizon and distributes the procedures.
    ///
    /// Procedures must lie inside the horizon (see
    /// [`validate_procedures`](crate::validation::validate_procedures)).
    pub fn build(&self, procedures: Vec<Procedure>) -> Vec<SchedulingUnit> {
        let mut by_horizon: Vec<Vec<SchedulingUnit>> = PROCESSING_ORDER
            .iter()
            .map(|&horizon| self.spans(horizon))
            .collect();

        for procedure in procedures {
            let class = PROCESSING_ORDER
                .iter()
                .position(|&h| h == procedure.horizon)
                .unwrap_or(0);
            let units = &mut by_horizon[class];
            let anchor = match procedure.horizon {
                Horizon::SameWeek => procedure.week * DAYS_PER_WEEK,
                Horizon::SameDay | Horizon::Emergency => procedure.day,
            };
            // Units are contiguous and sorted by first day.
            let index = units
                .partition_point(|u| u.first_day <= anchor)
                .saturating_sub(1);
            units[index].members.push(procedure);
        }

        let mut units: Vec<SchedulingUnit> = by_horizon.into_iter().flatten().collect();
        for unit in &mut units {
            self.engine.sort(&mut unit.members);
        }
        units
    }

    /// Empty units covering the whole horizon for one class.
    pub fn spans(&self, horizon: Horizon) -> Vec<SchedulingUnit> {
        match horizon {
            Horizon::Emergency => self.day_spans(horizon),
            Horizon::SameDay if self.pair_days => self.day_pair_spans(),
            Horizon::SameDay => self.day_spans(horizon),
            Horizon::SameWeek => self.week_spans(),
        }
    }

    fn day_spans(&self, horizon: Horizon) -> Vec<SchedulingUnit> {
        (0..self.num_days)
            .map(|day| SchedulingUnit::new(horizon, UnitKind::Day, day, 1))
            .collect()
    }

    fn day_pair_spans(&self) -> Vec<SchedulingUnit> {
        let mut units = Vec::new();
        let mut day = 0;
        while day < self.num_days {
            let paired = day % DAYS_PER_WEEK != 0 && day + 1 < self.num_days;
            if paired {
                units.push(SchedulingUnit::new(Horizon::SameDay, UnitKind::DayPair, day, 2));
                day += 2;
            } else {
                units.push(SchedulingUnit::new(Horizon::SameDay, UnitKind::Day, day, 1));
                day += 1;
            }
        }
        units
    }

    fn week_spans(&self) -> Vec<SchedulingUnit> {
        let weeks_per_unit = if self.pair_weeks { 2 } else { 1 };
        let span = weeks_per_unit * DAYS_PER_WEEK;
        (0..self.num_days)
            .step_by(span)
            .map(|first_day| {
                let day_count = span.min(self.num_days - first_day);
                let kind = if day_count > DAYS_PER_WEEK {
                    UnitKind::WeekPair
                } else {
                    UnitKind::Week
                };
                SchedulingUnit::new(Horizon::SameWeek, kind, first_day, day_count)
            })
            .collect()
    }
}
