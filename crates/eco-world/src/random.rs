//! Randomness used by actor behavior and maintenance.

use eco_core::Position;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A stream of uniform integers.
///
/// The engine draws every random decision through this trait so tests can
/// substitute a scripted sequence for the seeded generator.
pub trait RandomSource {
    /// Uniform integer in `low..=high`
    fn between(&mut self, low: i32, high: i32) -> i32;

    /// Movement offset in `-range..=range`
    fn offset(&mut self, range: i32) -> i32 {
        self.between(-range, range)
    }

    /// Uniform cell of a `size` x `size` grid, row drawn first
    fn position(&mut self, size: i32) -> Position {
        let row = self.between(0, size - 1);
        let col = self.between(0, size - 1);
        Position::at(row, col)
    }
}

impl RandomSource for ChaCha8Rng {
    fn between(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}
