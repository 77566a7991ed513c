// Opponent movement and shot selection

use std::f32::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::prediction::Prediction;
use super::profile::Tendency;
use super::tactics::Tactic;
use crate::game::input::{Intent, Movement};
use crate::game::kinematics::Vec2;
use crate::game::state::{Actor, Ball, AI_MAX_X, AI_MIN_X, COURT_CENTER_X, COURT_WIDTH};

/// Close enough to the target x to stop steering
const ARRIVAL_TOLERANCE: f32 = 8.0;
const CHASE_FRICTION: f32 = 0.85;
const WAIT_FRICTION: f32 = 0.9;
const WAIT_THROTTLE: f32 = 0.7;

// Waiting positions keep clear of the net and the back wall
const WAIT_MIN_X: f32 = 430.0;
const WAIT_MAX_X: f32 = 750.0;

const JUMP_REACH: f32 = 90.0;
const CLOSE_SWING: f32 = 45.0;
const SWEET_SPOT: f32 = 50.0;
const TIMING_THRESHOLD: f32 = 0.7;

/// Milliseconds represented by one tick at 60 Hz, for the waiting sway
const TICK_MS: f32 = 1000.0 / 60.0;

/// Symmetric noise in `[-spread / 2, spread / 2]`
pub fn jitter<R: Rng>(rng: &mut R, spread: f32) -> f32 {
    Uniform::new_inclusive(-0.5f32, 0.5).sample(rng) * spread
}

/// The ball is on the opponent's half, or crossing toward it
pub fn ball_threatens_ai(ball: &Ball) -> bool {
    ball.pos.x > COURT_CENTER_X || (ball.vel.x > 0.0 && ball.pos.x > 300.0)
}

/// Ball velocity points at the opponent's torso
pub fn ball_approaching(ball: &Ball, me: &Actor) -> bool {
    let to_me = me.torso() - ball.pos;
    ball.vel.dot(to_me) > 0.0
}

/// How good a swing would be right now, in [0, 1]
pub fn timing_score(distance: f32, ball_speed: f32, prediction_confidence: f32) -> f32 {
    let distance_score = (1.0 - (distance - SWEET_SPOT).abs() / 30.0).max(0.0);
    let velocity_factor = (ball_speed / 10.0).min(1.0);
    distance_score * velocity_factor * prediction_confidence
}

/// Swing range per tactic
pub fn swing_range(tactic: Tactic) -> f32 {
    match tactic {
        Tactic::Aggressive => 75.0,
        _ => 65.0,
    }
}

/// Where to stand for the incoming ball
pub fn chase_target(prediction: &Prediction, tactic: Tactic, tendency: Option<Tendency>) -> f32 {
    let target = match tactic {
        Tactic::Aggressive => prediction.x - 15.0,
        Tactic::Defensive => prediction.x + 10.0,
        Tactic::Adaptive => prediction.x - 5.0,
        Tactic::Counter => match tendency {
            Some(t) => COURT_WIDTH - t.favorite_position,
            None => prediction.x,
        },
    };
    target.clamp(AI_MIN_X, AI_MAX_X)
}

/// Plan for a ball on or heading to the opponent's half
///
/// Returns the intent for this tick; `intent.swing` set means a swing was
/// committed and the caller starts the reaction countdown.
pub fn chase_plan(
    ball: &Ball,
    me: &Actor,
    prediction: &Prediction,
    tactic: Tactic,
    tendency: Option<Tendency>,
    speed_multiplier: f32,
) -> Intent {
    let target_x = chase_target(prediction, tactic, tendency);

    let mut intent = if (me.pos.x - target_x).abs() > ARRIVAL_TOLERANCE {
        let urgency = (prediction.ticks_to_reach as f32 / 30.0).min(1.0);
        Intent::moving(Movement::toward(me.pos.x, target_x))
            .with_throttle(speed_multiplier * (0.7 + urgency * 0.5))
    } else {
        Intent::idle().with_friction(CHASE_FRICTION)
    };

    let distance = me.distance_to(ball.pos);

    let should_jump = ball.pos.y < me.pos.y + 30.0
        && distance < JUMP_REACH
        && me.on_ground
        && ball.vel.y > -3.0
        && prediction.max_height < me.pos.y;
    if should_jump {
        intent.jump = true;
    }

    if distance < swing_range(tactic) && !me.swinging {
        let timing = timing_score(distance, ball.speed(), prediction.confidence);
        if (ball_approaching(ball, me) && timing > TIMING_THRESHOLD) || distance < CLOSE_SWING {
            intent.swing = true;
        }
    }

    intent
}

/// Baseline the opponent sways around while the human has the ball
pub fn waiting_position(tactic: Tactic, tendency: Option<Tendency>, clock: u64) -> f32 {
    let t = clock as f32 * TICK_MS;
    let mut x = match tactic {
        Tactic::Aggressive => 480.0 + (t * 0.002).sin() * 40.0,
        Tactic::Defensive => 520.0 + (t * 0.001).sin() * 20.0,
        _ => 500.0 + (t * 0.0015).sin() * 30.0,
    };

    // Lean away from the human's favourite spot
    if let Some(t) = tendency {
        if t.favorite_position < 200.0 {
            x += 30.0;
        } else if t.favorite_position > 300.0 {
            x -= 30.0;
        }
    }

    x.clamp(WAIT_MIN_X, WAIT_MAX_X)
}

/// Plan for a ball on the human's half
pub fn waiting_plan(
    me: &Actor,
    tactic: Tactic,
    tendency: Option<Tendency>,
    clock: u64,
    speed_multiplier: f32,
) -> Intent {
    let target_x = waiting_position(tactic, tendency, clock);
    if (me.pos.x - target_x).abs() > ARRIVAL_TOLERANCE {
        Intent::moving(Movement::toward(me.pos.x, target_x))
            .with_throttle(speed_multiplier * WAIT_THROTTLE)
    } else {
        Intent::idle().with_friction(WAIT_FRICTION)
    }
}

/// Outgoing shot chosen by the opponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitStrategy {
    pub tactic: Tactic,
    pub angle: f32,
    pub power: f32,
    /// Rough landing estimate, for diagnostics
    pub target: Vec2,
}

impl HitStrategy {
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle, self.power)
    }
}

/// Inputs for choosing a shot
#[derive(Debug, Clone, Copy)]
pub struct ShotContext {
    pub tactic: Tactic,
    pub tendency: Option<Tendency>,
    /// Human torso x
    pub player_x: f32,
    pub ball_x: f32,
    pub ai_pos: Vec2,
    pub accuracy: f32,
}

// Shots travel left, toward the human. Flat angles go deep, steep ones drop short.
const DEEP: f32 = -PI * 7.0 / 8.0;
const DEEPISH: f32 = -PI * 5.0 / 6.0;
const SHORTISH: f32 = -PI * 2.0 / 3.0;
const SHORT: f32 = -PI * 5.0 / 8.0;
const HIGH_ARC: f32 = -PI * 0.65;

/// Aim at the corner the human is farthest from
fn aggressive_angle(player_x: f32) -> f32 {
    if player_x < 150.0 {
        SHORT
    } else if player_x > 250.0 {
        DEEP
    } else if player_x < 200.0 {
        SHORTISH
    } else {
        DEEPISH
    }
}

/// High, safe, near-vertical return
fn defensive_angle<R: Rng>(rng: &mut R) -> f32 {
    HIGH_ARC + jitter(rng, 0.4)
}

/// Go to the side opposite the human's favourite spot
fn counter_angle<R: Rng>(side_x: f32, rng: &mut R) -> f32 {
    let base = if side_x < 200.0 { SHORT } else { -PI * 3.0 / 4.0 };
    base + jitter(rng, 0.3)
}

/// Angle it away when the human is out of position, otherwise go high
fn adaptive_angle<R: Rng>(player_x: f32, ball_x: f32, rng: &mut R) -> f32 {
    if (player_x - ball_x).abs() > 100.0 {
        if player_x < 200.0 {
            SHORTISH
        } else {
            DEEPISH
        }
    } else {
        HIGH_ARC + jitter(rng, 0.6)
    }
}

/// Choose angle and power for an opponent hit
pub fn hit_strategy<R: Rng>(ctx: &ShotContext, rng: &mut R) -> HitStrategy {
    let (mut angle, base_power) = match ctx.tactic {
        Tactic::Aggressive => (aggressive_angle(ctx.player_x), 7.0 + rng.gen::<f32>() * 2.0),
        Tactic::Defensive => (defensive_angle(rng), 5.0 + rng.gen::<f32>() * 1.5),
        Tactic::Counter => {
            let side_x = ctx.tendency.map_or(ctx.player_x, |t| t.favorite_position);
            (counter_angle(side_x, rng), 6.5 + rng.gen::<f32>() * 1.8)
        }
        Tactic::Adaptive => (
            adaptive_angle(ctx.player_x, ctx.ball_x, rng),
            6.0 + rng.gen::<f32>() * 2.0,
        ),
    };

    // Unpredictable players get more variety, steady ones a straighter shot
    if let Some(tendency) = ctx.tendency {
        let spread = if tendency.is_aggressive { 0.4 } else { 0.2 };
        angle += jitter(rng, spread);
    }

    angle += jitter(rng, (1.0 - ctx.accuracy) * 0.8);
    let power = base_power * (0.9 + rng.gen::<f32>() * 0.2 * ctx.accuracy);

    let reach = power * 15.0;
    let target = ctx.ai_pos + Vec2::from_angle(angle, reach);

    HitStrategy {
        tactic: ctx.tactic,
        angle,
        power,
        target,
    }
}
