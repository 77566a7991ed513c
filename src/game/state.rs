use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::kinematics::Vec2;
use crate::ai::OpponentProfile;
use crate::config::PhysicsConfig;

// Court geometry in simulation units (one unit per pixel of the classic 800×600 court)
pub const COURT_WIDTH: f32 = 800.0;
pub const COURT_CENTER_X: f32 = COURT_WIDTH / 2.0;

// Ball contact heights
pub const FLOOR_Y: f32 = 580.0;
pub const CEILING_Y: f32 = 0.0;

// Actor geometry; `y` is the top of the actor, feet rest at GROUND_Y + ACTOR_HEIGHT
pub const GROUND_Y: f32 = 450.0;
pub const ACTOR_WIDTH: f32 = 40.0;
pub const ACTOR_HEIGHT: f32 = 80.0;

// Horizontal travel allowed on each half; the gap around the net belongs to nobody
pub const PLAYER_MIN_X: f32 = 0.0;
pub const PLAYER_MAX_X: f32 = 380.0;
pub const AI_MIN_X: f32 = 420.0;
pub const AI_MAX_X: f32 = 760.0;

pub const PLAYER_START_X: f32 = 150.0;
pub const AI_START_X: f32 = 650.0;

pub const BALL_START: Vec2 = Vec2::new(COURT_CENTER_X, 300.0);
pub const SERVE_HEIGHT: f32 = 200.0;

pub const PLAYER_HIT_RADIUS: f32 = 50.0;
pub const AI_HIT_RADIUS: f32 = 60.0;

/// Swing animation length; the swing resolves when the timer reaches this
pub const SWING_TICKS: u32 = 20;

pub const TRAIL_LENGTH: usize = 10;

/// Axis-aligned net rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetBounds {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl NetBounds {
    pub const fn standard() -> Self {
        Self {
            x: COURT_CENTER_X,
            top: 400.0,
            width: 4.0,
            height: 150.0,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl Default for NetBounds {
    fn default() -> Self {
        Self::standard()
    }
}

/// One side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub bounce: f32,
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(physics: &PhysicsConfig) -> Self {
        Self {
            pos: BALL_START,
            vel: Vec2::ZERO,
            radius: physics.ball_radius,
            gravity: physics.ball_gravity,
            bounce: physics.ball_bounce,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Place the ball for a serve, center court and high, with a given velocity
    pub fn serve(&mut self, vel: Vec2) {
        self.pos = Vec2::new(COURT_CENTER_X, SERVE_HEIGHT);
        self.vel = vel;
        self.trail.clear();
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A stick figure on one half of the court
///
/// Both actors share this type. Only the AI carries an `OpponentProfile`,
/// its accumulated experience for the match.
#[derive(Debug, Clone)]
pub struct Actor {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub swinging: bool,
    pub swing_timer: u32,
    pub arm_angle: f32,
    pub speed: f32,
    pub jump_power: f32,
    pub hit_radius: f32,
    pub gravity: f32,
    pub profile: Option<OpponentProfile>,
}

impl Actor {
    pub fn player(physics: &PhysicsConfig) -> Self {
        Self {
            side: Side::Player,
            pos: Vec2::new(PLAYER_START_X, GROUND_Y),
            vel: Vec2::ZERO,
            width: ACTOR_WIDTH,
            height: ACTOR_HEIGHT,
            on_ground: true,
            swinging: false,
            swing_timer: 0,
            arm_angle: 0.0,
            speed: 5.0,
            jump_power: -12.0,
            hit_radius: PLAYER_HIT_RADIUS,
            gravity: physics.actor_gravity,
            profile: None,
        }
    }

    pub fn opponent(physics: &PhysicsConfig) -> Self {
        Self {
            side: Side::Ai,
            pos: Vec2::new(AI_START_X, GROUND_Y),
            vel: Vec2::ZERO,
            width: ACTOR_WIDTH,
            height: ACTOR_HEIGHT,
            on_ground: true,
            swinging: false,
            swing_timer: 0,
            arm_angle: 0.0,
            speed: 3.0,
            jump_power: -10.0,
            hit_radius: AI_HIT_RADIUS,
            gravity: physics.actor_gravity,
            profile: Some(OpponentProfile::new()),
        }
    }

    /// Return to the starting stance. The opponent profile is kept.
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(self.start_x(), GROUND_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = true;
        self.swinging = false;
        self.swing_timer = 0;
        self.arm_angle = 0.0;
    }

    pub fn start_x(&self) -> f32 {
        match self.side {
            Side::Player => PLAYER_START_X,
            Side::Ai => AI_START_X,
        }
    }

    /// Horizontal travel limits for this actor's half
    pub fn x_bounds(&self) -> (f32, f32) {
        match self.side {
            Side::Player => (PLAYER_MIN_X, PLAYER_MAX_X),
            Side::Ai => (AI_MIN_X, AI_MAX_X),
        }
    }

    /// The point swings are measured from
    pub fn torso(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.torso().distance(point)
    }
}
