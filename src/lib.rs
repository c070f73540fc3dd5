//! Greedy room bin-packing for procedure labs.
//!
//! Assigns procedures to lab rooms over a multi-week horizon. Each room
//! has a daily time budget; procedures carry an urgency horizon, a home
//! facility and an optional flexibility to run in the other facility.
//! Whatever cannot be placed ends in an overflow list. Every booking also
//! occupies holding bays before and after the procedure; that occupancy
//! is derived on a fixed-resolution grid.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Procedure`, `Room`, `SchedulingUnit`,
//!   `HoldingBayGrid`, `OutcomeStats`, `TimePeriod`
//! - **`config`**: `SchedulerConfig` and its policy enums
//! - **`validation`**: Input integrity checks (durations, recovery, horizon, IDs)
//! - **`dispatching`**: Placement-order rules and rule engine
//! - **`scheduler`**: Classification, units, domains, selection, the
//!   `RoomPackingScheduler`, and KPIs
//! - **`error`**: `SchedulingError` and `ConfigError`
//!
//! # Example
//!
//! ```
//! use u_roompack::{Facility, Procedure, RoomPackingScheduler, SchedulerConfig};
//!
//! let config = SchedulerConfig::new().with_days(5);
//! let procedures = vec![
//!     Procedure::new("P1", 0, Facility::Cath, 180.0).with_recovery(30.0, 120.0),
//!     Procedure::new("P2", 0, Facility::Ep, 240.0).flexible(),
//! ];
//!
//! let period = RoomPackingScheduler::new(config)?.schedule(&procedures)?;
//! assert_eq!(period.stats().placed, 2);
//! # Ok::<(), u_roompack::SchedulingError>(())
//! ```
//!
//! # References
//!
//! - Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin Packing: A Survey"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{ConfigError, SchedulingError};
pub use models::{Facility, Horizon, Procedure, TimePeriod};
pub use scheduler::{RoomPackingScheduler, ScheduleKpi};
