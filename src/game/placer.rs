//! Apple placement
//!
//! The engine never touches a random source directly. It asks an
//! [`ApplePlacer`] for a cell, so tests can seed or script placement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::state::Position;

/// Source of apple positions
pub trait ApplePlacer {
    /// Pick a cell with `0 <= x < cols` and `0 <= y < rows`.
    ///
    /// Callers guarantee both bounds are at least 1.
    fn place(&mut self, cols: i32, rows: i32) -> Position;
}

/// Uniform placement over any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomPlacer<R> {
    rng: R,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlacer<StdRng> {
    /// Placer seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl RandomPlacer<ChaCha8Rng> {
    /// Reproducible placer: the same seed yields the same apples
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ApplePlacer for RandomPlacer<R> {
    fn place(&mut self, cols: i32, rows: i32) -> Position {
        Position::new(self.rng.gen_range(0..cols), self.rng.gen_range(0..rows))
    }
}

impl<P: ApplePlacer + ?Sized> ApplePlacer for Box<P> {
    fn place(&mut self, cols: i32, rows: i32) -> Position {
        (**self).place(cols, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomPlacer::seeded(7);
        let mut b = RandomPlacer::seeded(7);

        for _ in 0..50 {
            assert_eq!(a.place(19, 13), b.place(19, 13));
        }
    }

    #[test]
    fn test_placement_in_range() {
        let mut placer = RandomPlacer::seeded(42);

        for _ in 0..500 {
            let pos = placer.place(19, 13);
            assert!((0..19).contains(&pos.x));
            assert!((0..13).contains(&pos.y));
        }
    }

    #[test]
    fn test_single_cell_range() {
        let mut placer = RandomPlacer::from_entropy();
        assert_eq!(placer.place(1, 1), Position::new(0, 0));
    }

    #[test]
    fn test_boxed_placer() {
        let mut boxed: Box<dyn ApplePlacer> = Box::new(RandomPlacer::seeded(3));
        let pos = boxed.place(5, 5);
        assert!((0..5).contains(&pos.x) && (0..5).contains(&pos.y));
    }
}
