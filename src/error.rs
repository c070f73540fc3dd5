//! Error types.
//!
//! Fatal conditions abort a run before any `TimePeriod` is returned.
//! Capacity exhaustion is not an error: it ends in an overflow list and
//! is counted in `OutcomeStats`.

use thiserror::Error;

use crate::models::{Facility, Horizon};
use crate::validation::ValidationError;

/// Fatal scheduling failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// One or more input records are invalid.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A derived holding-bay span falls outside the grid.
    #[error(
        "holding-bay span [{span_start_minute:.1}, {span_end_minute:.1}) min of procedure \
         '{procedure_id}' on day {day} falls outside the grid [0, {closing_minute}) min"
    )]
    HoldingBayOverrun {
        /// Offending procedure.
        procedure_id: String,
        /// Day of the booking.
        day: usize,
        /// Span start, minutes after midnight.
        span_start_minute: f64,
        /// Span end, minutes after midnight.
        span_end_minute: f64,
        /// Grid closing time, minutes after midnight.
        closing_minute: u32,
    },
}

/// Configuration inconsistency detected before any procedure is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A horizon quota asks for more rooms than the facility has.
    #[error("{horizon} quota allows {restricted} {facility} rooms but only {total} exist")]
    RestrictedRoomsExceedTotal {
        /// Restricted horizon class.
        horizon: Horizon,
        /// Facility whose quota is too large.
        facility: Facility,
        /// Configured quota.
        restricted: usize,
        /// Rooms available.
        total: usize,
    },

    /// A scalar parameter is out of range.
    #[error("parameter `{parameter}` {reason}")]
    InvalidParameter {
        /// Parameter path.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
