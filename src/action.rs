//! Player actions, input events, and held-key auto-repeat
//!
//! The host maps real keyboard input to symbolic `InputEvent`s; the scenario
//! turns those into queued `Action`s. Held Left/Right repeat on a DAS/ARR
//! schedule stepped by the frame delta, so repeats freeze whenever the
//! scenario stops updating (pause, game over).

use std::collections::VecDeque;
use std::time::Duration;

/// Initial delay before a held direction starts repeating
const INITIAL_REPEAT_DELAY: Duration = Duration::from_millis(170);
/// Interval between repeats once started
const REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Symbolic game keys delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Left,
    Right,
    RotateLeft,
    RotateRight,
    SoftDrop,
    HardDrop,
    Hold,
    Pause,
}

/// Discrete input events consumed by the scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(GameKey),
    KeyUp(GameKey),
}

/// Actions applied to the game state, drained in FIFO order each update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    SoftDrop,
    HardDrop,
    NormalDrop,
    Hold,
}

/// Auto-repeat timers for held horizontal movement
#[derive(Debug, Clone, Default)]
pub struct ActionRepeatManager {
    left: Option<Duration>,
    right: Option<Duration>,
}

impl ActionRepeatManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the left repeat timer; pressing one direction cancels the other
    pub fn press_left(&mut self) {
        self.left = Some(INITIAL_REPEAT_DELAY);
        self.right = None;
    }

    pub fn press_right(&mut self) {
        self.right = Some(INITIAL_REPEAT_DELAY);
        self.left = None;
    }

    pub fn release_left(&mut self) {
        self.left = None;
    }

    pub fn release_right(&mut self) {
        self.right = None;
    }

    /// Cancel all repeats (used when the piece cycle resets hard)
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Step the timers and enqueue any repeat actions that came due
    pub fn update(&mut self, delta: Duration, actions: &mut VecDeque<Action>) {
        Self::tick(&mut self.left, delta, Action::MoveLeft, actions);
        Self::tick(&mut self.right, delta, Action::MoveRight, actions);
    }

    fn tick(
        slot: &mut Option<Duration>,
        delta: Duration,
        action: Action,
        actions: &mut VecDeque<Action>,
    ) {
        if let Some(timer) = slot {
            match timer.checked_sub(delta) {
                Some(rest) if !rest.is_zero() => *timer = rest,
                _ => {
                    actions.push_back(action);
                    *timer = REPEAT_INTERVAL;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(actions: &mut VecDeque<Action>) -> Vec<Action> {
        actions.drain(..).collect()
    }

    #[test]
    fn test_no_repeat_before_initial_delay() {
        let mut repeat = ActionRepeatManager::new();
        let mut actions = VecDeque::new();

        repeat.press_left();
        repeat.update(Duration::from_millis(100), &mut actions);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_repeat_fires_after_initial_delay() {
        let mut repeat = ActionRepeatManager::new();
        let mut actions = VecDeque::new();

        repeat.press_left();
        repeat.update(Duration::from_millis(170), &mut actions);
        assert_eq!(drain(&mut actions), vec![Action::MoveLeft]);

        // Subsequent repeats at the faster interval
        repeat.update(Duration::from_millis(50), &mut actions);
        assert_eq!(drain(&mut actions), vec![Action::MoveLeft]);
        repeat.update(Duration::from_millis(25), &mut actions);
        assert!(actions.is_empty());
        repeat.update(Duration::from_millis(25), &mut actions);
        assert_eq!(drain(&mut actions), vec![Action::MoveLeft]);
    }

    #[test]
    fn test_release_cancels_repeat() {
        let mut repeat = ActionRepeatManager::new();
        let mut actions = VecDeque::new();

        repeat.press_right();
        repeat.release_right();
        repeat.update(Duration::from_secs(1), &mut actions);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_opposite_press_cancels() {
        let mut repeat = ActionRepeatManager::new();
        let mut actions = VecDeque::new();

        repeat.press_left();
        repeat.press_right();
        repeat.update(Duration::from_millis(170), &mut actions);
        assert_eq!(drain(&mut actions), vec![Action::MoveRight]);
    }
}
