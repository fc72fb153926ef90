//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm: each bag contains one of
//! each piece kind, Fisher-Yates shuffled, and is refilled when it empties.
//!
//! The LCG also drives garbage hole placement and item rolls, which keeps a
//! whole session deterministic for a given seed.

use crate::types::PieceKind;

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate a uniform f32 in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Take the top 24 bits so the value fits an f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Bernoulli trial with the given probability
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Current bag of pieces
    bag: Vec<PieceKind>,
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a new piece bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: Vec::with_capacity(7),
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill();
        queue
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend_from_slice(&PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.bag.get(self.bag_index).copied()
    }

    /// Draw the next piece, refilling the bag when it runs out
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Get current bag for testing/debugging
    #[cfg(test)]
    pub fn current_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
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

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_f32_in_unit_range() {
        let mut rng = SimpleRng::new(777);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_piece_bag_initial() {
        let bag = PieceBag::new(1);

        assert!(bag.peek().is_some());
        assert_eq!(bag.current_bag().len(), 7);
    }

    #[test]
    fn test_piece_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.draw());
        }

        // Should have exactly one of each piece
        assert_eq!(drawn.len(), 7);
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_piece_bag_auto_refill() {
        let mut bag = PieceBag::new(1);

        for _ in 0..7 {
            bag.draw();
        }
        // Eighth draw comes from a fresh bag without panicking
        bag.draw();
        assert!(bag.current_bag().len() <= 7);
    }

    #[test]
    fn test_piece_bag_peek_matches_draw() {
        let mut bag = PieceBag::new(1);

        let peeked = bag.peek().unwrap();
        let drawn = bag.draw();

        assert_eq!(peeked, drawn);
    }
}
