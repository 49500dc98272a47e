//! Fixed-length next-piece preview fed by the bag

use crate::bag::RandomBag;
use crate::tetromino::PieceType;
use std::collections::VecDeque;

/// Lookahead queue that always holds exactly `len` pieces, oldest first
#[derive(Debug, Clone)]
pub struct NextQueue {
    pieces: VecDeque<PieceType>,
    bag: RandomBag,
}

impl NextQueue {
    /// Create a queue of `len` pieces drawn from `bag`
    pub fn new(len: usize, mut bag: RandomBag) -> Self {
        let pieces = (0..len).map(|_| bag.next()).collect();
        Self { pieces, bag }
    }

    /// Take the front piece and top the queue back up from the bag
    pub fn pop(&mut self) -> PieceType {
        let fresh = self.bag.next();
        self.pieces.push_back(fresh);
        // Length is at least one after the push, so the front always exists
        self.pieces.pop_front().unwrap_or(fresh)
    }

    /// Preview the piece `index` places from the front
    pub fn peek(&self, index: usize) -> Option<PieceType> {
        self.pieces.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = PieceType> + '_ {
        self.pieces.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
