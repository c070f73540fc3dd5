//! Holding-bay occupancy grid.
//!
//! Patients occupy a holding bay before and after their procedure. The
//! grid discretizes each day from midnight to a closing time into
//! fixed-width slots and counts how many patients occupy each slot.
//!
//! # Time Model
//! Slot `i` covers minutes `[i * resolution, (i + 1) * resolution)`
//! after midnight. Spans are half-open, like the room bookings they
//! are derived from.

use serde::{Deserialize, Serialize};

/// A half-open range of slot indices `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpan {
    /// First slot (inclusive).
    pub start: usize,
    /// Past-the-end slot (exclusive).
    pub end: usize,
}

impl SlotSpan {
    /// Creates a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a slot lies within the span.
    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        slot >= self.start && slot < self.end
    }
}

/// Per-day, per-slot holding-bay occupancy counters.
///
/// Counters only ever increase during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingBayGrid {
    resolution_minutes: u32,
    slots_per_day: usize,
    counts: Vec<u32>,
}

impl HoldingBayGrid {
    /// Creates an all-zero grid.
    ///
    /// `closing_minute` is expected to be a multiple of
    /// `resolution_minutes` (checked by `SchedulerConfig::validate`);
    /// a trailing partial slot is dropped.
    pub fn new(num_days: usize, resolution_minutes: u32, closing_minute: u32) -> Self {
        let slots_per_day = if resolution_minutes == 0 {
            0
        } else {
            (closing_minute / resolution_minutes) as usize
        };
        Self {
            resolution_minutes,
            slots_per_day,
            counts: vec![0; num_days * slots_per_day],
        }
    }

    /// Number of days covered.
    pub fn num_days(&self) -> usize {
        if self.slots_per_day == 0 {
            0
        } else {
            self.counts.len() / self.slots_per_day
        }
    }

    /// Slots per day.
    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    /// Slot width in minutes.
    #[inline]
    pub fn resolution_minutes(&self) -> u32 {
        self.resolution_minutes
    }

    /// Closing time in minutes after midnight (end of the last slot).
    pub fn closing_minute(&self) -> u32 {
        self.slots_per_day as u32 * self.resolution_minutes
    }

    /// Start of a slot in minutes after midnight.
    #[inline]
    pub fn slot_start_minute(&self, slot: usize) -> u32 {
        slot as u32 * self.resolution_minutes
    }

    /// Occupancy of one slot, or `None` if out of range.
    pub fn count(&self, day: usize, slot: usize) -> Option<u32> {
        if slot >= self.slots_per_day {
            return None;
        }
        self.counts.get(day * self.slots_per_day + slot).copied()
    }

    /// Occupancy of the slot containing `minute`, or `None` if out of range.
    pub fn count_at_minute(&self, day: usize, minute: u32) -> Option<u32> {
        if self.resolution_minutes == 0 {
            return None;
        }
        self.count(day, (minute / self.resolution_minutes) as usize)
    }

    /// All slot counters of one day (empty if the day is out of range).
    pub fn day(&self, day: usize) -> &[u32] {
        let start = day * self.slots_per_day;
        self.counts
            .get(start..start + self.slots_per_day)
            .unwrap_or(&[])
    }

    /// Highest occupancy on a day.
    pub fn peak(&self, day: usize) -> u32 {
        self.day(day).iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counters (patient-slots).
    pub fn total_occupancy(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Increments every slot of `span` on `day`.
    ///
    /// Callers validate the span against [`slots_per_day`](Self::slots_per_day)
    /// first; out-of-range slots are never silently dropped there.
    pub(crate) fn occupy(&mut self, day: usize, span: SlotSpan) {
        debug_assert!(span.end <= self.slots_per_day);
        let base = day * self.slots_per_day;
        for counter in &mut self.counts[base + span.start..base + span.end] {
            *counter += 1;
        }
    }
}
