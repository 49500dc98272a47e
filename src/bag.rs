//! 7-bag randomizer for piece generation
//!
//! Tetris uses a "7-bag" system where all 7 pieces are shuffled,
//! then dealt out before reshuffling. This prevents long droughts.
//! The shuffle is driven by a seeded ChaCha RNG so a given seed always
//! deals the same sequence.

use crate::tetromino::PieceType;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct RandomBag {
    /// Current permutation, dealt left to right
    bag: [PieceType; 7],
    /// Index of the next piece to deal from `bag`
    index: usize,
    rng: ChaCha8Rng,
}

impl RandomBag {
    /// Create a new bag randomizer from a seed
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            bag: PieceType::ALL,
            index: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        bag.refill();
        bag
    }

    /// Get the next piece, reshuffling when the current bag runs out
    pub fn next(&mut self) -> PieceType {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let piece = self.bag[self.index];
        self.index += 1;
        piece
    }

    /// Replace the bag with a fresh shuffled permutation
    fn refill(&mut self) {
        self.bag = PieceType::ALL;
        self.bag.shuffle(&mut self.rng);
        self.index = 0;
    }
}

impl Iterator for RandomBag {
    type Item = PieceType;

    fn next(&mut self) -> Option<PieceType> {
        Some(RandomBag::next(self))
    }
}
