//! Greedy room packing and KPI evaluation.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Classification | [`Classifier`] |
//! | Unit building | [`UnitBuilder`] |
//! | Domain construction | [`DomainConstructor`], [`CapacityFilter`] |
//! | Selection | [`CandidateSelector`] |
//! | Holding-bay derivation | [`RecoveryIntervals`] |
//! | Orchestration | [`RoomPackingScheduler`] |
//!
//! # KPI
//!
//! [`ScheduleKpi`] computes room utilization per room-day, day, week and
//! horizon, minute volumes by horizon and flexibility, and holding-bay peaks.
//!
//! # References
//!
//! - Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin Packing: A Survey"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod classify;
mod domain;
mod engine;
mod kpi;
mod occupancy;
mod placement;
mod units;

pub use classify::{normalize_durations, Classification, Classifier};
pub use domain::{Candidate, CapacityFilter, DomainConstructor};
pub use engine::RoomPackingScheduler;
pub use kpi::{FacilityUtilization, FlexMinutes, MinuteBreakdown, RoomUtilization, ScheduleKpi};
pub use occupancy::RecoveryIntervals;
pub use placement::{selector_for, CandidateSelector, LeastLoaded, UniformRandom};
pub use units::{UnitBuilder, PROCESSING_ORDER};
