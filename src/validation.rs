//! Input validation for procedure lists.
//!
//! Checks record integrity before classification. Detects:
//! - Duplicate or empty IDs
//! - Non-finite or non-positive durations
//! - Durations above the room ceiling
//! - Non-finite or negative recovery times
//! - Days and weeks outside the horizon
//!
//! All problems are collected; each names the offending procedure.

use std::collections::HashSet;
use std::fmt;

use crate::config::SchedulerConfig;
use crate::models::Procedure;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending procedure.
    pub procedure_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two procedures share the same ID.
    DuplicateId,
    /// A procedure has an empty ID.
    EmptyId,
    /// Duration is missing (NaN), infinite, or not positive.
    InvalidDuration,
    /// Duration exceeds the per-room ceiling; it can never be placed.
    DurationExceedsCeiling,
    /// Pre- or post-recovery time is NaN, infinite, or negative.
    InvalidRecovery,
    /// Day index lies outside the horizon.
    DayOutOfHorizon,
    /// Week index lies outside the horizon.
    WeekOutOfHorizon,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        procedure_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            procedure_id: procedure_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "procedure '{}': {}", self.procedure_id, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates procedures against a configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_procedures(procedures: &[Procedure], config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let num_weeks = config.num_weeks();

    for p in procedures {
        if p.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "",
                "procedure ID is empty",
            ));
        } else if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &p.id,
                "duplicate procedure ID",
            ));
        }

        if !p.duration_minutes.is_finite() || p.duration_minutes <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                &p.id,
                format!("duration must be positive, got {}", p.duration_minutes),
            ));
        } else if p.duration_minutes > config.room_ceiling_minutes {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationExceedsCeiling,
                &p.id,
                format!(
                    "duration {} min exceeds the {} min room ceiling",
                    p.duration_minutes, config.room_ceiling_minutes
                ),
            ));
        }

        for (label, minutes) in [
            ("pre-recovery", p.pre_recovery_minutes),
            ("post-recovery", p.post_recovery_minutes),
        ] {
            if !minutes.is_finite() || minutes < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRecovery,
                    &p.id,
                    format!("{label} time must be non-negative, got {minutes}"),
                ));
            }
        }

        if p.day >= config.num_days {
            errors.push(ValidationError::new(
                ValidationErrorKind::DayOutOfHorizon,
                &p.id,
                format!("day {} outside horizon of {} days", p.day, config.num_days),
            ));
        }
        if p.week >= num_weeks {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekOutOfHorizon,
                &p.id,
                format!("week {} outside horizon of {} weeks", p.week, num_weeks),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Facility, Horizon};

    fn config() -> SchedulerConfig {
        SchedulerConfig::new().with_days(10).with_room_ceiling(600.0)
    }

    fn sample_procedures() -> Vec<Procedure> {
        vec![
            Procedure::new("P1", 0, Facility::Cath, 120.0).with_recovery(30.0, 60.0),
            Procedure::new("P2", 9, Facility::Ep, 600.0).with_horizon(Horizon::SameWeek),
            Procedure::new("P3", 4, Facility::Ep, 45.5).flexible(),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_procedures(&sample_procedures(), &config()).is_ok());
        assert!(validate_procedures(&[], &config()).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut procs = sample_procedures();
        procs.push(Procedure::new("P1", 1, Facility::Cath, 10.0));

        let errors = validate_procedures(&procs, &config()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].procedure_id, "P1");
    }

    #[test]
    fn test_empty_id() {
        let procs = vec![Procedure::new("", 1, Facility::Cath, 10.0)];
        let errors = validate_procedures(&procs, &config()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyId));
    }

    #[test]
    fn test_invalid_durations() {
        let procs = vec![
            Procedure::new("nan", 0, Facility::Cath, f64::NAN),
            Procedure::new("zero", 0, Facility::Cath, 0.0),
            Procedure::new("negative", 0, Facility::Cath, -5.0),
            Procedure::new("too_long", 0, Facility::Cath, 600.5),
        ];
        let errors = validate_procedures(&procs, &config()).unwrap_err();

        let invalid: Vec<&str> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::InvalidDuration)
            .map(|e| e.procedure_id.as_str())
            .collect();
        assert_eq!(invalid, vec!["nan", "zero", "negative"]);
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::DurationExceedsCeiling && e.procedure_id == "too_long"
        }));
    }

    #[test]
    fn test_invalid_recovery() {
        let procs = vec![
            Procedure::new("A", 0, Facility::Ep, 60.0).with_recovery(-1.0, 0.0),
            Procedure::new("B", 0, Facility::Ep, 60.0).with_recovery(0.0, f64::NAN),
        ];
        let errors = validate_procedures(&procs, &config()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidRecovery));
    }

    #[test]
    fn test_out_of_horizon() {
        let procs = vec![
            Procedure::new("late_day", 10, Facility::Cath, 60.0),
            Procedure::new("late_week", 3, Facility::Cath, 60.0).with_week(2),
        ];
        let errors = validate_procedures(&procs, &config()).unwrap_err();

        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::DayOutOfHorizon && e.procedure_id == "late_day"
        }));
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::WeekOutOfHorizon && e.procedure_id == "late_week"
        }));
    }

    #[test]
    fn test_multiple_errors() {
        let procs = vec![
            Procedure::new("X", 0, Facility::Cath, 0.0),
            Procedure::new("X", 99, Facility::Ep, 60.0),
        ];
        let errors = validate_procedures(&procs, &config()).unwrap_err();
        assert!(errors.len() >= 3);
        assert!(errors[0].to_string().starts_with("procedure 'X'"));
    }
}
