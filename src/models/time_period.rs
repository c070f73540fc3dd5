//! Time period (solution) model.
//!
//! A time period owns every room of the horizon, the per-unit overflow
//! lists, the holding-bay grid, and the outcome statistics of one
//! scheduling run.
//!
//! # Invariants
//! - Every scheduled procedure is booked in exactly one room or listed in
//!   exactly one overflow list.
//! - No room's booked minutes exceed the configured ceiling.
//! - Holding-bay counters never decrease.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{
    Facility, HoldingBayGrid, OutcomeStats, Procedure, Room, RoomKey, DAYS_PER_WEEK,
};
use crate::config::RoomCounts;

/// Where a procedure ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Booked in a room.
    Room(RoomKey),
    /// Listed in the overflow of the unit starting on `unit_first_day`.
    Overflow {
        /// Overflow list key.
        unit_first_day: usize,
    },
}

impl Placement {
    /// The booked room, if placed.
    pub fn room(&self) -> Option<RoomKey> {
        match self {
            Placement::Room(key) => Some(*key),
            Placement::Overflow { .. } => None,
        }
    }

    /// Whether the procedure overflowed.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Placement::Overflow { .. })
    }
}

/// All rooms, overflow lists, and holding bays of a scheduling horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePeriod {
    num_days: usize,
    room_counts: RoomCounts,
    /// Day-major; within a day, Cath rooms then EP rooms.
    rooms: Vec<Room>,
    overflow: BTreeMap<usize, Vec<Procedure>>,
    placements: HashMap<String, Placement>,
    holding_bays: HoldingBayGrid,
    stats: OutcomeStats,
}

impl TimePeriod {
    /// Creates an empty time period with one room per (day, facility, index).
    pub fn new(num_days: usize, room_counts: RoomCounts, holding_bays: HoldingBayGrid) -> Self {
        let mut rooms = Vec::with_capacity(num_days * room_counts.total());
        for day in 0..num_days {
            for facility in Facility::ALL {
                for room in 0..room_counts.get(facility) {
                    rooms.push(Room::new(RoomKey::new(day, facility, room)));
                }
            }
        }
        Self {
            num_days,
            room_counts,
            rooms,
            overflow: BTreeMap::new(),
            placements: HashMap::new(),
            holding_bays,
            stats: OutcomeStats::default(),
        }
    }

    /// Days in the horizon.
    #[inline]
    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// Weeks in the horizon (a trailing partial week counts).
    pub fn num_weeks(&self) -> usize {
        self.num_days.div_ceil(DAYS_PER_WEEK)
    }

    /// Rooms per facility per day.
    #[inline]
    pub fn room_counts(&self) -> RoomCounts {
        self.room_counts
    }

    fn index_of(&self, key: RoomKey) -> Option<usize> {
        if key.day >= self.num_days || key.room >= self.room_counts.get(key.facility) {
            return None;
        }
        let offset = match key.facility {
            Facility::Cath => 0,
            Facility::Ep => self.room_counts.cath,
        };
        Some(key.day * self.room_counts.total() + offset + key.room)
    }

    /// Looks up a room.
    pub fn room(&self, key: RoomKey) -> Option<&Room> {
        self.index_of(key).map(|i| &self.rooms[i])
    }

    /// All rooms, day-major.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Rooms of one facility on one day, by room index.
    pub fn rooms_on(&self, day: usize, facility: Facility) -> &[Room] {
        let count = self.room_counts.get(facility);
        match self.index_of(RoomKey::new(day, facility, 0)) {
            Some(start) => &self.rooms[start..start + count],
            None => &[],
        }
    }

    /// Booked minutes of one facility on one day.
    pub fn facility_minutes(&self, day: usize, facility: Facility) -> f64 {
        self.rooms_on(day, facility)
            .iter()
            .map(Room::booked_minutes)
            .sum()
    }

    /// Overflow list of the unit starting on `unit_first_day`.
    pub fn overflow(&self, unit_first_day: usize) -> &[Procedure] {
        self.overflow
            .get(&unit_first_day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All non-empty overflow lists, by unit first day.
    pub fn overflow_lists(&self) -> impl Iterator<Item = (usize, &[Procedure])> {
        self.overflow
            .iter()
            .map(|(day, procs)| (*day, procs.as_slice()))
    }

    /// Total overflowed procedures across all lists.
    pub fn overflow_count(&self) -> usize {
        self.overflow.values().map(Vec::len).sum()
    }

    /// Where a procedure ended up.
    pub fn placement(&self, procedure_id: &str) -> Option<Placement> {
        self.placements.get(procedure_id).copied()
    }

    /// Booked procedures in room order.
    pub fn placed_procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.rooms.iter().flat_map(Room::procedures)
    }

    /// Holding-bay occupancy.
    pub fn holding_bays(&self) -> &HoldingBayGrid {
        &self.holding_bays
    }

    /// Outcome statistics.
    pub fn stats(&self) -> &OutcomeStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut OutcomeStats {
        &mut self.stats
    }

    pub(crate) fn holding_bays_mut(&mut self) -> &mut HoldingBayGrid {
        &mut self.holding_bays
    }

    /// Books `procedure` into room `key` and records the placement.
    ///
    /// Hands the procedure back untouched when the key is outside the
    /// horizon; nothing is recorded in that case.
    pub(crate) fn book(
        &mut self,
        key: RoomKey,
        procedure: Procedure,
        start_minute: f64,
    ) -> Result<(), Procedure> {
        let Some(room) = self.index_of(key).and_then(|i| self.rooms.get_mut(i)) else {
            return Err(procedure);
        };
        self.stats.record_placement(&procedure, key.facility);
        self.placements.insert(procedure.id.clone(), Placement::Room(key));
        room.book(procedure, start_minute);
        Ok(())
    }

    pub(crate) fn push_overflow(&mut self, unit_first_day: usize, procedure: Procedure) {
        self.placements.insert(
            procedure.id.clone(),
            Placement::Overflow { unit_first_day },
        );
        self.overflow
            .entry(unit_first_day)
            .or_default()
            .push(procedure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_period() -> TimePeriod {
        TimePeriod::new(
            7,
            RoomCounts::new(2, 1),
            HoldingBayGrid::new(7, 15, 1440),
        )
    }

    #[test]
    fn test_rooms_created_per_day() {
        let period = sample_period();
        assert_eq!(period.rooms().len(), 21);
        assert_eq!(period.num_weeks(), 2);
        assert_eq!(period.rooms_on(3, Facility::Cath).len(), 2);
        assert_eq!(period.rooms_on(3, Facility::Ep).len(), 1);
        assert!(period.rooms_on(7, Facility::Ep).is_empty());

        let key = RoomKey::new(4, Facility::Ep, 0);
        assert_eq!(period.room(key).map(Room::key), Some(key));
        assert!(period.room(RoomKey::new(4, Facility::Ep, 1)).is_none());
    }

    #[test]
    fn test_room_lookup_matches_layout() {
        let period = sample_period();
        for room in period.rooms() {
            assert_eq!(period.room(room.key()).map(Room::key), Some(room.key()));
        }
    }

    #[test]
    fn test_overflow_and_placement_index() {
        let mut period = sample_period();
        let key = RoomKey::new(0, Facility::Cath, 1);
        assert!(period
            .book(key, Procedure::new("A", 0, Facility::Cath, 100.0), 480.0)
            .is_ok());
        period.push_overflow(5, Procedure::new("B", 6, Facility::Ep, 50.0));

        assert_eq!(period.placement("A"), Some(Placement::Room(key)));
        assert_eq!(
            period.placement("B"),
            Some(Placement::Overflow { unit_first_day: 5 })
        );
        assert!(period.placement("C").is_none());
        assert_eq!(period.overflow(5).len(), 1);
        assert!(period.overflow(6).is_empty());
        assert_eq!(period.overflow_count(), 1);
        assert!((period.facility_minutes(0, Facility::Cath) - 100.0).abs() < 1e-10);
        assert_eq!(period.room(key).map(Room::booking_count), Some(1));
        assert_eq!(period.placed_procedures().count(), 1);
        assert_eq!(period.stats().placed, 1);
    }

    #[test]
    fn test_book_counts_crossover() {
        let mut period = sample_period();
        let key = RoomKey::new(2, Facility::Ep, 0);
        assert!(period
            .book(key, Procedure::new("A", 2, Facility::Cath, 90.0), 480.0)
            .is_ok());
        assert_eq!(period.stats().placed, 1);
        assert_eq!(period.stats().cath_to_ep, 1);
        assert!((period.facility_minutes(2, Facility::Ep) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_book_unknown_room_leaves_period_untouched() {
        let mut period = sample_period();
        let procedures = [
            (RoomKey::new(7, Facility::Cath, 0), "late"),
            (RoomKey::new(0, Facility::Ep, 1), "extra"),
        ];
        for (key, id) in procedures {
            let rejected = period
                .book(key, Procedure::new(id, 0, Facility::Cath, 60.0), 480.0)
                .unwrap_err();
            assert_eq!(rejected.id, id);
        }

        assert_eq!(period.stats(), &OutcomeStats::default());
        assert!(period.placement("late").is_none());
        assert!(period.placement("extra").is_none());
        assert_eq!(period.placed_procedures().count(), 0);
        assert!(period.rooms().iter().all(Room::is_empty));
    }
}
