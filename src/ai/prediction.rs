// Trajectory prediction for the opponent

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::game::kinematics::Vec2;
use crate::game::state::{Ball, COURT_CENTER_X, COURT_WIDTH, FLOOR_Y};

/// Ticks simulated ahead before giving up on a landing
pub const PREDICTION_HORIZON: u32 = 60;
/// Horizontal speed kept per simulated tick
pub const AIR_DRAG: f32 = 0.998;
/// Landing noise span at zero accuracy
pub const NOISE_SPAN: f32 = 40.0;

/// Where and when the opponent expects to meet the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub x: f32,
    pub y: f32,
    pub ticks_to_reach: u32,
    /// Smallest y reached on the way (screen y grows downward)
    pub max_height: f32,
    pub confidence: f32,
}

/// Forward-simulate the ball without noise
///
/// Stops when the ball passes the floor, or when it is descending inside
/// the opponent's half, whichever happens first within the horizon.
///
/// # Arguments
/// * `pos`, `vel` - Current ball state
/// * `gravity` - Same per-tick gravity the real ball uses
pub fn simulate_trajectory(pos: Vec2, vel: Vec2, gravity: f32) -> Prediction {
    let mut p = pos;
    let mut v = vel;
    let mut ticks = 0;
    let mut max_height = pos.y;

    for _ in 0..PREDICTION_HORIZON {
        v.y += gravity;
        p += v;
        v.x *= AIR_DRAG;
        ticks += 1;

        if p.y < max_height {
            max_height = p.y;
        }

        if p.y > FLOOR_Y {
            break;
        }
        if p.x > COURT_CENTER_X && p.x < COURT_WIDTH && v.y > 0.0 {
            break;
        }
    }

    Prediction {
        x: p.x,
        y: p.y,
        ticks_to_reach: ticks,
        max_height,
        confidence: 1.0,
    }
}

/// Predict the landing point with human-like error
///
/// The landing x is shifted by uniform noise spanning `40 × (1 − accuracy)`
/// units; the returned confidence is the accuracy itself.
pub fn predict_landing<R: Rng>(ball: &Ball, accuracy: f32, rng: &mut R) -> Prediction {
    let mut prediction = simulate_trajectory(ball.pos, ball.vel, ball.gravity);

    let span = NOISE_SPAN * (1.0 - accuracy);
    if span > 0.0 {
        prediction.x += Uniform::new_inclusive(-0.5f32, 0.5).sample(rng) * span;
    }
    prediction.confidence = accuracy;
    prediction
}
