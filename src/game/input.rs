use serde::{Deserialize, Serialize};

/// Discrete input events delivered by the host's input layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveNone,
    JumpRequested,
    SwingRequested,
}

/// Horizontal movement request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

impl Movement {
    /// -1.0 for left, 1.0 for right, 0.0 when idle
    pub fn sign(self) -> f32 {
        match self {
            Movement::Left => -1.0,
            Movement::Right => 1.0,
            Movement::None => 0.0,
        }
    }

    pub fn toward(from: f32, to: f32) -> Self {
        if from < to {
            Movement::Right
        } else {
            Movement::Left
        }
    }
}

/// Per-tick intent for one actor
///
/// The human's intent is sampled once per tick from input events; the
/// opponent's is produced by the decision engine. `throttle` scales the
/// actor's base speed and `friction` is the idle decay factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub movement: Movement,
    pub jump: bool,
    pub swing: bool,
    pub throttle: f32,
    pub friction: f32,
}

pub const IDLE_FRICTION: f32 = 0.8;

impl Default for Intent {
    fn default() -> Self {
        Self {
            movement: Movement::None,
            jump: false,
            swing: false,
            throttle: 1.0,
            friction: IDLE_FRICTION,
        }
    }
}

impl Intent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: Movement) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    pub fn with_throttle(mut self, throttle: f32) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_swing(mut self) -> Self {
        self.swing = true;
        self
    }

    /// Keep only what a human can request: direction, jump and swing
    ///
    /// Throttle and friction fall back to their defaults so the human always
    /// moves at full speed and decays at `IDLE_FRICTION`.
    pub fn discrete(&self) -> Self {
        Self {
            movement: self.movement,
            jump: self.jump,
            swing: self.swing,
            ..Self::default()
        }
    }

    /// Fold a batch of input events into one stable intent.
    /// Later movement events override earlier ones within the same tick.
    pub fn from_actions(actions: &[InputAction]) -> Self {
        let mut intent = Self::default();
        for action in actions {
            match action {
                InputAction::MoveLeft => intent.movement = Movement::Left,
                InputAction::MoveRight => intent.movement = Movement::Right,
                InputAction::MoveNone => intent.movement = Movement::None,
                InputAction::JumpRequested => intent.jump = true,
                InputAction::SwingRequested => intent.swing = true,
            }
        }
        intent
    }
}
