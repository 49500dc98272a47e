//! Input handling with DAS (Delayed Auto Shift) and ARR (Auto Repeat Rate)
//!
//! The driver reports the held state of every button once per tick; the
//! tracker remembers the previous tick to turn those levels into discrete
//! actions.

use std::time::Duration;

/// Held state of every button, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hold: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub move_right: bool,
    pub move_left: bool,
}

/// Discrete actions derived from one tick of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hold: bool,
    pub hard_drop: bool,
    /// Soft drop is level-triggered, not an edge
    pub soft_drop: bool,
    /// Horizontal steps to take this tick, negative is left
    pub shift: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Auto-repeat state of the horizontal key currently in charge
#[derive(Debug, Clone, Copy)]
struct KeyPressState {
    side: Side,
    held: Duration,
    das_triggered: bool,
    since_repeat: Duration,
}

/// Edge detector with DAS/ARR support
#[derive(Debug, Clone)]
pub struct InputTracker {
    previous: Input,
    shift_state: Option<KeyPressState>,
    das: Duration,
    arr: Duration,
}

impl InputTracker {
    pub fn new(das: Duration, arr: Duration) -> Self {
        Self {
            previous: Input::default(),
            shift_state: None,
            das,
            arr,
        }
    }

    /// Fold in this tick's levels and the time since the last tick
    ///
    /// Rotations, hold and hard drop fire on the press edge only. Both
    /// rotations pressed together cancel out, and so do both move keys held
    /// together.
    pub fn update(&mut self, input: Input, elapsed: Duration) -> Actions {
        let prev = self.previous;
        self.previous = input;

        let mut actions = Actions {
            rotate_cw: input.rotate_cw && !prev.rotate_cw,
            rotate_ccw: input.rotate_ccw && !prev.rotate_ccw,
            hold: input.hold && !prev.hold,
            hard_drop: input.hard_drop && !prev.hard_drop,
            soft_drop: input.soft_drop,
            shift: 0,
        };

        if actions.rotate_cw && actions.rotate_ccw {
            actions.rotate_cw = false;
            actions.rotate_ccw = false;
        }

        let side = match (input.move_left, input.move_right) {
            (true, false) => Some(Side::Left),
            (false, true) => Some(Side::Right),
            _ => None,
        };

        let steps = match side {
            None => {
                self.shift_state = None;
                0
            }
            Some(side) => match &mut self.shift_state {
                Some(state) if state.side == side => {
                    process_das_arr(state, elapsed, self.das, self.arr)
                }
                slot => {
                    // New press - immediate action
                    *slot = Some(KeyPressState {
                        side,
                        held: Duration::ZERO,
                        das_triggered: false,
                        since_repeat: Duration::ZERO,
                    });
                    1
                }
            },
        };

        actions.shift = match side {
            Some(Side::Left) => -(steps as i32),
            Some(Side::Right) => steps as i32,
            None => 0,
        };
        actions
    }
}

/// Most steps a single tick can ask for; far wider than any field
const MAX_REPEAT_STEPS: u32 = u16::MAX as u32;

/// Advance DAS/ARR for a held key, returns how many repeat steps fire
fn process_das_arr(
    state: &mut KeyPressState,
    elapsed: Duration,
    das: Duration,
    arr: Duration,
) -> u32 {
    state.held = state.held.saturating_add(elapsed);

    if state.held < das {
        return 0;
    }

    if !state.das_triggered {
        // First trigger after DAS
        state.das_triggered = true;
        state.since_repeat = state.held - das;
        return 1;
    }

    state.since_repeat = state.since_repeat.saturating_add(elapsed);
    if arr.is_zero() {
        // Instant repeat: slide as far as the field allows
        return MAX_REPEAT_STEPS;
    }

    let steps = state.since_repeat.as_nanos() / arr.as_nanos();
    if steps >= MAX_REPEAT_STEPS as u128 {
        state.since_repeat = Duration::ZERO;
        return MAX_REPEAT_STEPS;
    }
    let steps = steps as u32;
    state.since_repeat -= arr * steps;
    steps
}
