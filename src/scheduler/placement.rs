//! Candidate selection.
//!
//! Chooses one room among the candidates that survived the capacity
//! filter. One selector serves the whole run, so a policy applies to
//! every unit alike.

use std::cmp::Ordering;
use std::fmt::Debug;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::domain::Candidate;
use crate::config::SelectionPolicy;

/// Strategy picking one candidate room.
pub trait CandidateSelector: Send + Debug {
    /// Selector name.
    fn name(&self) -> &'static str;

    /// Index of the chosen candidate, or `None` if there are none.
    fn select(&mut self, candidates: &[Candidate]) -> Option<usize>;
}

/// Least booked minutes first; ties go to the smallest `RoomKey`.
///
/// Spreads load evenly across rooms and days of a unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoaded;

impl CandidateSelector for LeastLoaded {
    fn name(&self) -> &'static str {
        "least-loaded"
    }

    fn select(&mut self, candidates: &[Candidate]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| compare_load(a, b))
            .map(|(index, _)| index)
    }
}

fn compare_load(a: &Candidate, b: &Candidate) -> Ordering {
    a.booked_minutes
        .total_cmp(&b.booked_minutes)
        .then_with(|| a.key.cmp(&b.key))
}

/// Uniformly random candidate from a seeded generator.
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: SmallRng,
}

impl UniformRandom {
    /// Creates a selector seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl CandidateSelector for UniformRandom {
    fn name(&self) -> &'static str {
        "uniform-random"
    }

    fn select(&mut self, candidates: &[Candidate]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng.random_range(0..candidates.len()))
    }
}

/// Builds the selector of a policy.
pub fn selector_for(policy: SelectionPolicy, seed: u64) -> Box<dyn CandidateSelector> {
    match policy {
        SelectionPolicy::LeastLoaded => Box::new(LeastLoaded),
        SelectionPolicy::UniformRandom => Box::new(UniformRandom::new(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Facility, RoomKey};

    fn candidate(day: usize, facility: Facility, room: usize, booked: f64) -> Candidate {
        Candidate {
            key: RoomKey::new(day, facility, room),
            booked_minutes: booked,
        }
    }

    #[test]
    fn test_least_loaded() {
        let candidates = vec![
            candidate(0, Facility::Cath, 0, 300.0),
            candidate(0, Facility::Cath, 1, 120.0),
            candidate(1, Facility::Cath, 0, 240.0),
        ];
        assert_eq!(LeastLoaded.select(&candidates), Some(1));
        assert_eq!(LeastLoaded.select(&[]), None);
    }

    #[test]
    fn test_least_loaded_tie_break_by_key() {
        let candidates = vec![
            candidate(1, Facility::Cath, 0, 0.0),
            candidate(0, Facility::Ep, 0, 0.0),
            candidate(0, Facility::Cath, 2, 0.0),
        ];
        // (0, Cath, 2) < (0, Ep, 0) < (1, Cath, 0)
        assert_eq!(LeastLoaded.select(&candidates), Some(2));
    }

    #[test]
    fn test_uniform_random_deterministic() {
        let candidates: Vec<Candidate> = (0..8)
            .map(|room| candidate(0, Facility::Cath, room, 0.0))
            .collect();

        let picks = |seed| {
            let mut selector = UniformRandom::new(seed);
            (0..20)
                .map(|_| selector.select(&candidates))
                .collect::<Vec<_>>()
        };
        let first = picks(5);
        assert_eq!(first, picks(5));
        assert!(first.iter().all(|p| matches!(p, Some(i) if *i < 8)));
        assert_eq!(UniformRandom::new(5).select(&[]), None);
    }

    #[test]
    fn test_selector_for_policy() {
        assert_eq!(selector_for(SelectionPolicy::LeastLoaded, 0).name(), "least-loaded");
        assert_eq!(
            selector_for(SelectionPolicy::UniformRandom, 0).name(),
            "uniform-random"
        );
    }
}
