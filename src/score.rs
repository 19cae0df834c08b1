//! Scoring: clear table, back-to-back bonus, drop points, level bookkeeping
//!
//! Awarded points do not appear instantly: they sit in a pending pool and the
//! displayed total ticks toward the true total, faster the more is pending.

use std::time::Duration;

/// Lines needed per level-up
const LINES_PER_LEVEL: u64 = 10;
/// Minimum tally animation speed in points per second
const MIN_TALLY_RATE: f64 = 250.0;

/// Type of line clear for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearType {
    /// Plain clear of 1-4 lines
    Regular(u8),
    /// Full T-spin with 0-3 lines
    TSpin(u8),
    /// Mini T-spin with 0-2 lines
    MiniTSpin(u8),
}

impl ClearType {
    pub fn lines(&self) -> u8 {
        match *self {
            ClearType::Regular(n) | ClearType::TSpin(n) | ClearType::MiniTSpin(n) => n,
        }
    }
}

/// Points, lines, and level bookkeeping
#[derive(Debug, Clone)]
pub struct Score {
    points: u64,
    /// Portion of `points` already shown; the rest animates in
    displayed: u64,
    tally_carry: f64,
    lines: u64,
    level: u32,
    back_to_back: bool,
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            displayed: 0,
            tally_carry: 0.0,
            lines: 0,
            level: 1,
            back_to_back: false,
        }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    /// Animated total shown to the player
    pub fn displayed_points(&self) -> u64 {
        self.displayed
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    /// Score a line clear or spin, updating lines, level, and the
    /// back-to-back flag. Returns the display label for the action.
    pub fn add_clear(&mut self, clear: ClearType) -> String {
        let (base, difficult, name) = match clear {
            ClearType::Regular(1) => (100, false, "Single"),
            ClearType::Regular(2) => (300, false, "Double"),
            ClearType::Regular(3) => (500, false, "Triple"),
            ClearType::Regular(4) => (800, true, "Tetris"),
            ClearType::TSpin(0) => (400, false, "T-Spin"),
            ClearType::TSpin(1) => (400, true, "T-Spin Single"),
            ClearType::TSpin(2) => (1200, true, "T-Spin Double"),
            ClearType::TSpin(3) => (1600, true, "T-Spin Triple"),
            ClearType::MiniTSpin(0) => (100, false, "Mini T-Spin"),
            ClearType::MiniTSpin(1) => (200, true, "Mini T-Spin Single"),
            ClearType::MiniTSpin(2) => (400, true, "Mini T-Spin Double"),
            _ => (0, false, ""),
        };

        let lines = clear.lines() as u64;
        self.lines += lines;
        self.level = (self.lines / LINES_PER_LEVEL) as u32 + 1;

        let mut award = base * self.level as u64;
        let mut bonus_applied = false;
        if difficult && self.back_to_back {
            award = award * 3 / 2;
            bonus_applied = true;
        }

        // Zero-line spins leave the streak untouched; any real clear
        // re-evaluates it
        if lines > 0 || matches!(clear, ClearType::Regular(4)) {
            self.back_to_back = difficult;
        }

        self.points += award;

        if bonus_applied {
            format!("B2B {name}")
        } else {
            name.to_string()
        }
    }

    /// 1 point per cell descended under soft drop
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64;
    }

    /// 2 points per cell descended under hard drop
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }

    /// Advance the tally animation. The rate is proportional to the pending
    /// amount with a floor of 250 points per second, so large awards roll in
    /// quickly and the display always catches up.
    pub fn update(&mut self, delta: Duration) {
        let pending = self.points - self.displayed;
        if pending == 0 {
            self.tally_carry = 0.0;
            return;
        }
        let rate = (pending as f64).max(MIN_TALLY_RATE);
        let step = rate * delta.as_secs_f64() + self.tally_carry;
        let whole = step as u64;
        self.tally_carry = step - whole as f64;
        self.displayed += whole.min(pending);
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}
