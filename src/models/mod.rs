//! Room-packing domain models.
//!
//! Provides the data types for the problem (procedures) and for the
//! solution (rooms, overflow lists, holding-bay occupancy, outcome
//! counters), all owned by a single [`TimePeriod`].
//!
//! # Domain Mappings
//!
//! | u-roompack | Generic scheduling | Lab operations |
//! |------------|--------------------|----------------|
//! | Procedure | Task | Patient case |
//! | Room | Resource × day | Cath/EP room-day |
//! | SchedulingUnit | Planning bucket | Day, day pair, week, week pair |
//! | HoldingBayGrid | Secondary resource | Pre/post recovery bays |
//! | TimePeriod | Schedule | Lab calendar |

mod holding_bay;
mod outcome;
mod procedure;
mod room;
mod time_period;
mod unit;

pub use holding_bay::{HoldingBayGrid, SlotSpan};
pub use outcome::{HorizonCounts, OutcomeStats};
pub use procedure::{Facility, Horizon, Procedure, RoomFlexibility, DAYS_PER_WEEK};
pub use room::{Booking, Room, RoomKey};
pub use time_period::{Placement, TimePeriod};
pub use unit::{SchedulingUnit, UnitKind};
