use std::f32::consts::PI;

use super::input::{Intent, Movement};
use super::kinematics::{apply_gravity, clamp_axis, integrate, Vec2};
use super::state::{Actor, Ball, Side, GROUND_Y, SWING_TICKS};

/// Human hits leave the racket along one of two fixed diagonals
pub const UPPER_LEFT: f32 = -PI * 3.0 / 4.0;
pub const UPPER_RIGHT: f32 = -PI / 4.0;

/// What an actor did during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ActorStep {
    pub swung: bool,
    pub jumped: bool,
    /// Torso position at swing time, set when the ball was inside the hit radius
    pub contact_from: Option<Vec2>,
}

/// Apply one tick of intent to an actor
///
/// Swing and jump requests are handled first against the current pose, then
/// horizontal steering, gravity, integration, half-court clamping and ground
/// contact, and finally the swing animation advances.
pub fn update(actor: &mut Actor, intent: &Intent, ball_pos: Vec2, dt: f32) -> ActorStep {
    let mut step = ActorStep::default();

    if intent.swing && !actor.swinging {
        actor.swinging = true;
        actor.swing_timer = 0;
        step.swung = true;
        if actor.distance_to(ball_pos) < actor.hit_radius {
            step.contact_from = Some(actor.torso());
        }
    }

    if intent.jump && actor.on_ground {
        actor.vel.y = actor.jump_power;
        actor.on_ground = false;
        step.jumped = true;
    }

    steer(actor, intent);

    if !actor.on_ground {
        apply_gravity(&mut actor.vel, actor.gravity, dt);
    }
    integrate(&mut actor.pos, actor.vel, dt);

    let (min_x, max_x) = actor.x_bounds();
    clamp_axis(&mut actor.pos.x, min_x, max_x);

    if actor.pos.y >= GROUND_Y {
        actor.pos.y = GROUND_Y;
        actor.vel.y = 0.0;
        actor.on_ground = true;
    }

    advance_swing(actor);
    step
}

/// Set horizontal velocity from the movement request, or decay it when idle
fn steer(actor: &mut Actor, intent: &Intent) {
    match intent.movement {
        Movement::None => actor.vel.x *= intent.friction,
        movement => actor.vel.x = movement.sign() * actor.speed * intent.throttle,
    }
}

fn advance_swing(actor: &mut Actor) {
    if !actor.swinging {
        return;
    }

    actor.swing_timer += 1;
    let facing = match actor.side {
        Side::Player => 1.0,
        Side::Ai => -1.0,
    };
    actor.arm_angle = (actor.swing_timer as f32 * 0.5).sin() * 90.0 * facing;

    if actor.swing_timer >= SWING_TICKS {
        actor.swinging = false;
        actor.swing_timer = 0;
        actor.arm_angle = 0.0;
    }
}

/// Outgoing angle for a human hit
///
/// Follows the held direction; with no direction held the ball goes back
/// the way it sits relative to the torso.
pub fn player_hit_angle(movement: Movement, ball_x: f32, torso_x: f32) -> f32 {
    match movement {
        Movement::Left => UPPER_LEFT,
        Movement::Right => UPPER_RIGHT,
        Movement::None => {
            if ball_x < torso_x {
                UPPER_LEFT
            } else {
                UPPER_RIGHT
            }
        }
    }
}

/// Overwrite the ball's velocity for a human hit
pub fn resolve_player_hit(ball: &mut Ball, torso: Vec2, movement: Movement, power: f32) {
    let angle = player_hit_angle(movement, ball.pos.x, torso.x);
    ball.vel = Vec2::from_angle(angle, power);
}
