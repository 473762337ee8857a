//! RNG module - injectable randomness for board generation
//!
//! Every random decision in the engine (Random-mode permutations, Chaotic draws,
//! the shuffle assist) goes through the [`TileRng`] trait, so a game can be
//! replayed from a seed and tests can script exact sequences.
//!
//! [`SimpleRng`] is the default source: a small LCG that is deterministic
//! for a given seed.

use crate::types::Tile;

/// Source of randomness for the engine
pub trait TileRng {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a tile uniformly from `1..=max`
    fn next_tile(&mut self, max: Tile) -> Tile {
        self.next_range(max) + 1
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG cycle with short periods.
        self.state >> 8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_tile_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let tile = rng.next_tile(9);
            assert!((1..=9).contains(&tile));
        }
    }

    #[test]
    fn test_next_tile_covers_range() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[(rng.next_tile(9) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(42);
        let mut values: Vec<u32> = (1..=19).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_through_reference() {
        let mut rng = SimpleRng::new(5);
        let mut expected = SimpleRng::new(5);

        let mut a = [1, 2, 3, 4, 5];
        let mut b = a;
        (&mut rng).shuffle(&mut a);
        expected.shuffle(&mut b);
        assert_eq!(a, b);
    }
}
