//! Room model.
//!
//! A room is one lab room on one day. It accumulates bookings back to
//! back from the lab's opening time; its load is the sum of booked
//! durations.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Facility, Procedure};

/// Identifies a room on a given day.
///
/// Field order is significant: the derived `Ord` (day, facility, room)
/// is the deterministic tie-break between equally loaded candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomKey {
    /// Day index (0-based).
    pub day: usize,
    /// Facility the room belongs to.
    pub facility: Facility,
    /// Room index within the facility (0-based).
    pub room: usize,
}

impl RoomKey {
    /// Creates a room key.
    pub fn new(day: usize, facility: Facility, room: usize) -> Self {
        Self {
            day,
            facility,
            room,
        }
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {} room {}", self.day, self.facility, self.room)
    }
}

/// A procedure committed to a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The committed (classified) procedure.
    pub procedure: Procedure,
    /// Start time, minutes after midnight.
    pub start_minute: f64,
}

impl Booking {
    /// End time, minutes after midnight.
    #[inline]
    pub fn end_minute(&self) -> f64 {
        self.start_minute + self.procedure.duration_minutes
    }
}

/// A lab room on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    key: RoomKey,
    bookings: Vec<Booking>,
    booked_minutes: f64,
}

impl Room {
    /// Creates an empty room.
    pub fn new(key: RoomKey) -> Self {
        Self {
            key,
            bookings: Vec::new(),
            booked_minutes: 0.0,
        }
    }

    /// Room identity.
    #[inline]
    pub fn key(&self) -> RoomKey {
        self.key
    }

    /// Bookings in commit order (which is also start-time order).
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Booked procedures in commit order.
    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.bookings.iter().map(|b| &b.procedure)
    }

    /// Cumulative booked minutes.
    #[inline]
    pub fn booked_minutes(&self) -> f64 {
        self.booked_minutes
    }

    /// Number of bookings.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Whether nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Appends a booking and updates the load.
    pub(crate) fn book(&mut self, procedure: Procedure, start_minute: f64) {
        self.booked_minutes += procedure.duration_minutes;
        self.bookings.push(Booking {
            procedure,
            start_minute,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_booking_accumulates() {
        let key = RoomKey::new(2, Facility::Cath, 1);
        let mut room = Room::new(key);
        assert!(room.is_empty());

        room.book(Procedure::new("P1", 2, Facility::Cath, 120.0), 480.0);
        room.book(Procedure::new("P2", 2, Facility::Cath, 45.0), 600.0);

        assert_eq!(room.key(), key);
        assert_eq!(room.booking_count(), 2);
        assert!((room.booked_minutes() - 165.0).abs() < 1e-10);
        assert!((room.bookings()[1].end_minute() - 645.0).abs() < 1e-10);
        let ids: Vec<&str> = room.procedures().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn test_room_key_ordering() {
        let a = RoomKey::new(0, Facility::Ep, 0);
        let b = RoomKey::new(1, Facility::Cath, 0);
        let c = RoomKey::new(0, Facility::Cath, 3);
        let mut keys = vec![a, b, c];
        keys.sort();
        assert_eq!(keys, vec![c, a, b]);
    }
}
