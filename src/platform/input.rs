//! Logical buttons and per-tick input snapshots

use serde::{Deserialize, Serialize};

/// The eight logical buttons, numbered like a fantasy console pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Bomb,
    Fire,
    Laser,
    Shield,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Bomb,
        Button::Fire,
        Button::Laser,
        Button::Shield,
    ];

    /// Map a raw button id (0..=7); anything else is not a button
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self.id()
    }
}

/// Read-only view of the controls for one tick
pub trait InputPort {
    /// Button is currently down (continuous)
    fn is_held(&self, button: Button) -> bool;

    /// Button went down this tick (true for exactly one tick per press)
    fn is_just_pressed(&self, button: Button) -> bool;

    /// Raw-id form of `is_held`; unknown ids read as not held
    fn btn(&self, id: u8) -> bool {
        Button::from_id(id).is_some_and(|b| self.is_held(b))
    }

    /// Raw-id form of `is_just_pressed`; unknown ids read as not pressed
    fn btnp(&self, id: u8) -> bool {
        Button::from_id(id).is_some_and(|b| self.is_just_pressed(b))
    }
}

/// Button state captured for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    held: u8,
    pressed: u8,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `button` as held for this tick
    pub fn hold(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self
    }

    /// Mark `button` as pressed this tick (a press also counts as held)
    pub fn press(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self.pressed |= button.bit();
        self
    }

    /// Same held buttons with the one-shot presses cleared
    pub fn without_presses(self) -> Self {
        Self {
            held: self.held,
            pressed: 0,
        }
    }

    /// Add the presses recorded in `earlier` that have not been delivered yet
    pub fn with_presses_of(self, earlier: InputSnapshot) -> Self {
        Self {
            held: self.held | earlier.pressed,
            pressed: self.pressed | earlier.pressed,
        }
    }
}

impl InputPort for InputSnapshot {
    fn is_held(&self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    fn is_just_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }
}

/// Turns successive held states into snapshots with press edges
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: u8,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for a tick where exactly `held` buttons are down
    pub fn next<I>(&mut self, held: I) -> InputSnapshot
    where
        I: IntoIterator<Item = Button>,
    {
        let held = held.into_iter().fold(0u8, |bits, b| bits | b.bit());
        let pressed = held & !self.previous;
        self.previous = held;
        InputSnapshot { held, pressed }
    }

    /// Forget previous state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.previous = 0;
    }
}
