//! Next-piece preview queue and the hold slot

use crate::bag::TetrominoBag;
use crate::tetromino::TetrominoKind;
use std::collections::VecDeque;

/// Number of upcoming pieces shown to the player
pub const NEXT_COUNT: usize = 5;

/// FIFO of upcoming pieces, kept topped up from the bag so its size is
/// always `NEXT_COUNT`.
#[derive(Debug, Clone)]
pub struct TetrominoManager {
    bag: TetrominoBag,
    queue: VecDeque<TetrominoKind>,
}

impl TetrominoManager {
    pub fn new() -> Self {
        Self::from_bag(TetrominoBag::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_bag(TetrominoBag::with_seed(seed))
    }

    fn from_bag(mut bag: TetrominoBag) -> Self {
        let queue = (0..NEXT_COUNT).map(|_| bag.take()).collect();
        Self { bag, queue }
    }

    /// Pop the next piece and refill the preview from the bag
    pub fn take(&mut self) -> TetrominoKind {
        let kind = self
            .queue
            .pop_front()
            .unwrap_or_else(|| self.bag.take());
        self.queue.push_back(self.bag.take());
        kind
    }

    /// Upcoming pieces, soonest first
    pub fn previews(&self) -> impl Iterator<Item = TetrominoKind> + '_ {
        self.queue.iter().copied()
    }
}

impl Default for TetrominoManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot hold with a per-piece lock: after a swap the slot stays locked
/// until the current piece is inserted into the field.
#[derive(Debug, Clone, Default)]
pub struct HoldManager {
    held: Option<TetrominoKind>,
    locked: bool,
}

impl HoldManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<TetrominoKind> {
        self.held
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Store `kind` and return whatever was held before. Locks the slot.
    pub fn swap(&mut self, kind: TetrominoKind) -> Option<TetrominoKind> {
        let previous = self.held.replace(kind);
        self.locked = true;
        previous
    }

    /// Called once the current piece has locked into the field
    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
