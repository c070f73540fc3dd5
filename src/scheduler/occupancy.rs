//! Holding-bay occupancy derivation.
//!
//! Converts a committed booking into the pre- and post-procedure slot
//! spans it occupies on the holding-bay grid.
//!
//! # Algorithm
//! With `start` the booking's start minute and `d` its duration:
//! - pre span `[start - pre, start)`
//! - post span `[start + d, start + d + post)`
//!
//! Span starts round down and span ends round up to the grid resolution.
//! A span reaching before midnight or past the grid's closing time is an
//! error, never truncated.

use crate::error::SchedulingError;
use crate::models::{HoldingBayGrid, Procedure, SlotSpan};

// Float tolerance at slot boundaries.
const SLOT_EPSILON: f64 = 1e-9;

/// Pre- and post-procedure slot spans of one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryIntervals {
    /// Slots occupied before the procedure.
    pub pre: SlotSpan,
    /// Slots occupied after the procedure.
    pub post: SlotSpan,
}

impl RecoveryIntervals {
    /// Derives the spans of `procedure` starting at `start_minute` on `day`.
    ///
    /// Fails with [`SchedulingError::HoldingBayOverrun`] if a non-empty
    /// span does not fit in `[0, closing)`.
    pub fn derive(
        procedure: &Procedure,
        day: usize,
        start_minute: f64,
        grid: &HoldingBayGrid,
    ) -> Result<Self, SchedulingError> {
        let end_minute = start_minute + procedure.duration_minutes;
        let pre = slot_span(
            procedure,
            day,
            start_minute - procedure.pre_recovery_minutes,
            start_minute,
            grid,
        )?;
        let post = slot_span(
            procedure,
            day,
            end_minute,
            end_minute + procedure.post_recovery_minutes,
            grid,
        )?;
        Ok(Self { pre, post })
    }

    /// Increments every slot of both spans.
    pub(crate) fn apply(&self, grid: &mut HoldingBayGrid, day: usize) {
        grid.occupy(day, self.pre);
        grid.occupy(day, self.post);
    }
}

fn slot_span(
    procedure: &Procedure,
    day: usize,
    from_minute: f64,
    to_minute: f64,
    grid: &HoldingBayGrid,
) -> Result<SlotSpan, SchedulingError> {
    if to_minute - from_minute <= 0.0 {
        return Ok(SlotSpan::default());
    }

    let resolution = grid.resolution_minutes() as f64;
    let first = (from_minute / resolution + SLOT_EPSILON).floor();
    let last = (to_minute / resolution - SLOT_EPSILON).ceil();

    if first < 0.0 || last > grid.slots_per_day() as f64 {
        return Err(SchedulingError::HoldingBayOverrun {
            procedure_id: procedure.id.clone(),
            day,
            span_start_minute: from_minute,
            span_end_minute: to_minute,
            closing_minute: grid.closing_minute(),
        });
    }

    Ok(SlotSpan::new(first as usize, last as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Facility;

    fn grid() -> HoldingBayGrid {
        HoldingBayGrid::new(2, 15, 1800)
    }

    #[test]
    fn test_spans_at_lab_open() {
        let p = Procedure::new("P", 0, Facility::Cath, 120.0).with_recovery(30.0, 45.0);
        let spans = RecoveryIntervals::derive(&p, 0, 480.0, &grid()).unwrap();

        // [7:30, 8:00) and [10:00, 10:45)
        assert_eq!(spans.pre, SlotSpan::new(30, 32));
        assert_eq!(spans.post, SlotSpan::new(40, 43));
    }

    #[test]
    fn test_rounding_outward() {
        let p = Procedure::new("P", 0, Facility::Cath, 50.0).with_recovery(10.0, 20.0);
        let spans = RecoveryIntervals::derive(&p, 0, 500.0, &grid()).unwrap();

        // pre [490, 500) -> [480, 510); post [550, 570) -> [540, 570)
        assert_eq!(spans.pre, SlotSpan::new(32, 34));
        assert_eq!(spans.post, SlotSpan::new(36, 38));
    }

    #[test]
    fn test_zero_length_spans_occupy_nothing() {
        let p = Procedure::new("P", 0, Facility::Ep, 60.0);
        let spans = RecoveryIntervals::derive(&p, 0, 1790.0, &grid()).unwrap();
        assert!(spans.pre.is_empty());
        assert!(spans.post.is_empty());
    }

    #[test]
    fn test_overrun_past_closing() {
        let p = Procedure::new("late", 1, Facility::Ep, 600.0).with_recovery(0.0, 900.0);
        let err = RecoveryIntervals::derive(&p, 1, 480.0, &grid()).unwrap_err();
        match err {
            SchedulingError::HoldingBayOverrun {
                procedure_id,
                day,
                span_start_minute,
                span_end_minute,
                closing_minute,
            } => {
                assert_eq!(procedure_id, "late");
                assert_eq!(day, 1);
                assert!((span_start_minute - 1080.0).abs() < 1e-10);
                assert!((span_end_minute - 1980.0).abs() < 1e-10);
                assert_eq!(closing_minute, 1800);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overrun_before_midnight() {
        let p = Procedure::new("early", 0, Facility::Cath, 60.0).with_recovery(120.0, 0.0);
        assert!(RecoveryIntervals::derive(&p, 0, 60.0, &grid()).is_err());
    }

    #[test]
    fn test_span_ending_at_closing_fits() {
        let p = Procedure::new("P", 0, Facility::Cath, 60.0).with_recovery(0.0, 60.0);
        let spans = RecoveryIntervals::derive(&p, 0, 1680.0, &grid()).unwrap();
        assert_eq!(spans.post, SlotSpan::new(116, 120));
    }

    #[test]
    fn test_apply_increments_grid() {
        let mut grid = grid();
        let p = Procedure::new("P", 1, Facility::Cath, 120.0).with_recovery(30.0, 45.0);
        let spans = RecoveryIntervals::derive(&p, 1, 480.0, &grid).unwrap();
        spans.apply(&mut grid, 1);
        spans.apply(&mut grid, 1);

        assert_eq!(grid.count(1, 30), Some(2));
        assert_eq!(grid.count(1, 42), Some(2));
        assert_eq!(grid.count(1, 43), Some(0));
        assert_eq!(grid.count(0, 30), Some(0));
        assert_eq!(grid.total_occupancy(), 2 * (2 + 3));
    }
}
