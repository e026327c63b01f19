//! Randomness seam for every randomized operation.

use rand::Rng;
use std::collections::VecDeque;

/// A source of uniform random integers.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` can be passed
/// anywhere a source is expected. [`ScriptedRolls`] replays fixed values
/// for tests that need to pin exact outcomes.
pub trait RandomSource {
    /// Uniform integer in `0..upper`. `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize;

    /// Roll a die with `sides` faces, giving a value in `1..=sides`.
    fn roll(&mut self, sides: usize) -> usize {
        self.below(sides) + 1
    }

    /// Uniform choice from a slice. `None` when the slice is empty.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Replays a fixed sequence of `below` results.
///
/// Each call consumes the next value, clamped into `0..upper`. Once the
/// script runs out every call returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    values: VecDeque<usize>,
}

impl ScriptedRolls {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn below(&mut self, upper: usize) -> usize {
        let value = self.values.pop_front().unwrap_or(0);
        value.min(upper.saturating_sub(1))
    }
}
