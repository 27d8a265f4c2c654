//! Question order planning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The order in which record indices are presented.
///
/// Always a permutation of `0..len`: no duplicates, nothing out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    order: Vec<usize>,
}

impl QuizPlan {
    /// Identity order when `shuffle` is false; otherwise a uniformly random
    /// permutation, reproducible when a seed is given.
    pub fn new(record_count: usize, shuffle: bool, seed: Option<u64>) -> Self {
        match (shuffle, seed) {
            (false, _) => Self::identity(record_count),
            (true, Some(seed)) => Self::shuffled(record_count, &mut StdRng::seed_from_u64(seed)),
            (true, None) => Self::shuffled(record_count, &mut rand::rng()),
        }
    }

    pub fn identity(record_count: usize) -> Self {
        Self {
            order: (0..record_count).collect(),
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(record_count: usize, rng: &mut R) -> Self {
        let mut plan = Self::identity(record_count);
        plan.order.shuffle(rng);
        plan
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}
