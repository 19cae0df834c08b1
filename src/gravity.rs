//! Per-piece gravity timing: fall rate, lock delay, and insertion delay
//!
//! All waiting is polled duration state decremented by the frame delta; the
//! scenario asks which timer has elapsed rather than blocking anywhere.

use std::time::Duration;

/// How fast the active piece is being pushed down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropMode {
    #[default]
    Normal,
    Soft,
    Hard,
}

/// Delay before a grounded piece locks in place
const LOCK_DELAY: Duration = Duration::from_millis(500);
/// Delay between a lock and the next spawn
const INSERTION_DELAY: Duration = Duration::from_millis(500);
/// Longer post-lock delay when the lock cleared lines
const ERASING_INSERTION_DELAY: Duration = Duration::from_millis(750);
/// Row interval while soft-dropping
const SOFT_DROP_INTERVAL: Duration = Duration::from_millis(50);
/// Fall speed never goes below this, whatever the level says
const MIN_WAITING: Duration = Duration::from_millis(10);

/// Timing state machine for the falling piece
#[derive(Debug, Clone)]
pub struct GravityClock {
    /// Time per row at the current gravity level
    waiting: Duration,
    /// Time left before the next automatic drop
    remaining: Duration,
    /// Lock-delay time left once the piece is grounded
    freezing: Duration,
    /// Post-lock delay before the next piece may spawn
    inserting: Duration,
    mode: DropMode,
}

impl GravityClock {
    pub fn new() -> Self {
        let mut clock = Self {
            waiting: Duration::ZERO,
            remaining: Duration::ZERO,
            freezing: Duration::ZERO,
            inserting: Duration::ZERO,
            mode: DropMode::Normal,
        };
        clock.set_gravity_level(1);
        clock.rearm();
        clock
    }

    /// Map a gravity level to seconds-per-row via the Tetris Worlds curve:
    /// `(0.8 - (level - 1) * 0.007) ^ (level - 1)`
    pub fn set_gravity_level(&mut self, level: u32) {
        let level = level.clamp(1, 60) as f64;
        let seconds = (0.8 - (level - 1.0) * 0.007).powf(level - 1.0);
        self.waiting = Duration::from_secs_f64(seconds).max(MIN_WAITING);
    }

    pub fn mode(&self) -> DropMode {
        self.mode
    }

    /// Switch drop mode, clamping the pending wait down so the change feels
    /// immediate
    pub fn set_mode(&mut self, mode: DropMode) {
        self.mode = mode;
        match mode {
            DropMode::Normal => {}
            DropMode::Soft => self.remaining = self.remaining.min(SOFT_DROP_INTERVAL),
            DropMode::Hard => self.remaining = Duration::ZERO,
        }
    }

    /// Fresh piece: restart the fall timer at the full interval
    pub fn rearm(&mut self) {
        self.remaining = self.waiting;
    }

    pub fn update_waiting(&mut self, delta: Duration) {
        self.remaining = self.remaining.saturating_sub(delta);
    }

    /// False once a drop is due; always false in Hard mode
    pub fn is_waiting(&self) -> bool {
        self.mode != DropMode::Hard && !self.remaining.is_zero()
    }

    /// Replenish the fall timer after a drop
    pub fn register_drop(&mut self) {
        match self.mode {
            DropMode::Normal => self.remaining += self.waiting,
            DropMode::Soft => {
                self.remaining = (self.remaining + SOFT_DROP_INTERVAL).min(self.waiting);
            }
            DropMode::Hard => self.remaining = Duration::ZERO,
        }
    }

    /// Arm the lock delay once the piece cannot fall further
    pub fn freeze(&mut self) {
        self.freezing = LOCK_DELAY;
    }

    pub fn update_freezing(&mut self, delta: Duration) {
        self.freezing = self.freezing.saturating_sub(delta);
    }

    pub fn freeze_expired(&self) -> bool {
        self.freezing.is_zero()
    }

    /// Arm the post-lock delay
    pub fn insertion(&mut self) {
        self.inserting = INSERTION_DELAY;
    }

    /// Arm the longer post-lock delay used when lines were cleared
    pub fn erasing_insertion(&mut self) {
        self.inserting = ERASING_INSERTION_DELAY;
    }

    pub fn update_inserting(&mut self, delta: Duration) {
        self.inserting = self.inserting.saturating_sub(delta);
    }

    pub fn insertion_expired(&self) -> bool {
        self.inserting.is_zero()
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new()
    }
}
