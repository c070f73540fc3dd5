//! Procedure classification.
//!
//! Rewrites the input procedures according to the run's policies before
//! any packing happens:
//!
//! | Policy | Effect |
//! |--------|--------|
//! | `CrossoverMode::NoCrossovers` | flexibility forced to `Fixed` |
//! | `CrossoverMode::AllFlex` | flexibility forced to `Either` |
//! | same-day-only | `SameWeek` rewritten to `SameDay` |
//! | random post recovery | post time drawn from `Normal(mean, sd)`, clamped at 0 |
//!
//! Input values are never modified; a new list is returned.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::config::{CrossoverMode, SchedulerConfig};
use crate::error::ConfigError;
use crate::models::{Horizon, HorizonCounts, Procedure, RoomFlexibility};

/// Classified procedures plus per-horizon counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Procedures in input order, policies applied.
    pub procedures: Vec<Procedure>,
    /// Procedure count per (classified) horizon.
    pub counts: HorizonCounts,
}

/// Applies crossover, same-day-only, and recovery-time policies.
///
/// Random draws come from a generator seeded with
/// [`SchedulerConfig::seed`], so a fresh classifier over the same input
/// always yields the same output.
#[derive(Debug, Clone)]
pub struct Classifier {
    crossover: CrossoverMode,
    same_day_only: bool,
    post_recovery: Option<Normal<f64>>,
    rng: SmallRng,
}

impl Classifier {
    /// Creates a classifier for a configuration.
    ///
    /// Fails if the recovery distribution parameters are unusable.
    pub fn new(config: &SchedulerConfig) -> Result<Self, ConfigError> {
        let post_recovery = config
            .random_post_recovery
            .map(|dist| {
                Normal::new(dist.mean_minutes, dist.std_dev_minutes).map_err(|e| {
                    ConfigError::InvalidParameter {
                        parameter: "random_post_recovery",
                        reason: e.to_string(),
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            crossover: config.crossover,
            same_day_only: config.same_day_only,
            post_recovery,
            rng: SmallRng::seed_from_u64(config.seed),
        })
    }

    /// Classifies every procedure, preserving input order.
    pub fn classify(&mut self, procedures: &[Procedure]) -> Classification {
        let mut counts = HorizonCounts::default();
        let procedures = procedures
            .iter()
            .map(|p| {
                let classified = self.classify_one(p);
                counts.increment(classified.horizon);
                classified
            })
            .collect();
        Classification { procedures, counts }
    }

    /// Classifies a single procedure.
    pub fn classify_one(&mut self, procedure: &Procedure) -> Procedure {
        let mut p = procedure.clone();

        match self.crossover {
            CrossoverMode::NoCrossovers => p.flexibility = RoomFlexibility::Fixed,
            CrossoverMode::AllFlex => p.flexibility = RoomFlexibility::Either,
            CrossoverMode::LabPreference => {}
        }

        if self.same_day_only && p.horizon == Horizon::SameWeek {
            p.horizon = Horizon::SameDay;
        }

        if let Some(normal) = &self.post_recovery {
            p.post_recovery_minutes = normal.sample(&mut self.rng).max(0.0);
        }

        p
    }
}

/// Adds turnover time to every duration and caps it at the room ceiling.
///
/// For producers that record raw case lengths; durations handed to the
/// scheduler are expected to include turnover already.
pub fn normalize_durations(
    procedures: &[Procedure],
    turnover_minutes: f64,
    ceiling_minutes: f64,
) -> Vec<Procedure> {
    procedures
        .iter()
        .map(|p| {
            let mut normalized = p.clone();
            normalized.duration_minutes = (p.duration_minutes + turnover_minutes).min(ceiling_minutes);
            normalized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Facility;

    fn sample_procedures() -> Vec<Procedure> {
        vec![
            Procedure::new("A", 0, Facility::Cath, 60.0).with_horizon(Horizon::SameWeek),
            Procedure::new("B", 1, Facility::Ep, 90.0).flexible(),
            Procedure::new("C", 2, Facility::Cath, 30.0)
                .with_horizon(Horizon::Emergency)
                .with_recovery(15.0, 120.0),
        ]
    }

    fn classify(config: &SchedulerConfig) -> Classification {
        Classifier::new(config)
            .unwrap()
            .classify(&sample_procedures())
    }

    #[test]
    fn test_lab_preference_keeps_flexibility() {
        let result = classify(&SchedulerConfig::new());
        assert_eq!(result.procedures, sample_procedures());
        assert_eq!(result.counts.same_week, 1);
        assert_eq!(result.counts.same_day, 1);
        assert_eq!(result.counts.emergency, 1);
    }

    #[test]
    fn test_no_crossovers_forces_fixed() {
        let config = SchedulerConfig::new().with_crossover(CrossoverMode::NoCrossovers);
        let result = classify(&config);
        assert!(result.procedures.iter().all(|p| !p.is_flexible()));
    }

    #[test]
    fn test_all_flex_forces_either() {
        let config = SchedulerConfig::new().with_crossover(CrossoverMode::AllFlex);
        let result = classify(&config);
        assert!(result.procedures.iter().all(Procedure::is_flexible));
    }

    #[test]
    fn test_same_day_only() {
        let config = SchedulerConfig::new().with_same_day_only(true);
        let result = classify(&config);

        assert_eq!(result.procedures[0].horizon, Horizon::SameDay);
        assert_eq!(result.procedures[0].day, 0);
        assert_eq!(result.procedures[2].horizon, Horizon::Emergency);
        assert_eq!(result.counts.same_week, 0);
        assert_eq!(result.counts.same_day, 2);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = sample_procedures();
        let config = SchedulerConfig::new()
            .with_crossover(CrossoverMode::AllFlex)
            .with_random_post_recovery(200.0, 30.0);
        let _ = Classifier::new(&config).unwrap().classify(&input);
        assert_eq!(input, sample_procedures());
    }

    #[test]
    fn test_random_post_recovery_deterministic() {
        let config = SchedulerConfig::new()
            .with_random_post_recovery(180.0, 40.0)
            .with_seed(11);
        let first = classify(&config);
        let second = classify(&config);
        assert_eq!(first, second);

        let other_seed = classify(&config.clone().with_seed(12));
        assert_ne!(first.procedures, other_seed.procedures);
        assert!((first.procedures[2].pre_recovery_minutes - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_negative_draws_clamped() {
        let config = SchedulerConfig::new().with_random_post_recovery(-500.0, 1.0);
        let result = classify(&config);
        assert!(result
            .procedures
            .iter()
            .all(|p| p.post_recovery_minutes == 0.0));
    }

    #[test]
    fn test_zero_std_dev_is_constant() {
        let config = SchedulerConfig::new().with_random_post_recovery(90.0, 0.0);
        let result = classify(&config);
        assert!(result
            .procedures
            .iter()
            .all(|p| (p.post_recovery_minutes - 90.0).abs() < 1e-10));
    }

    #[test]
    fn test_normalize_durations() {
        let procs = vec![
            Procedure::new("A", 0, Facility::Cath, 100.0),
            Procedure::new("B", 0, Facility::Cath, 600.0),
            Procedure::new("C", 0, Facility::Cath, 620.0),
        ];
        let normalized = normalize_durations(&procs, 25.0, 634.8);
        assert!((normalized[0].duration_minutes - 125.0).abs() < 1e-10);
        assert!((normalized[1].duration_minutes - 625.0).abs() < 1e-10);
        // 620 + 25 exceeds the ceiling
        assert!((normalized[2].duration_minutes - 634.8).abs() < 1e-10);
        assert!((procs[2].duration_minutes - 620.0).abs() < 1e-10);
    }
}
