use super::kinematics::{apply_gravity, integrate, reflect, Vec2};
use super::state::{Ball, NetBounds, CEILING_Y, FLOOR_Y, TRAIL_LENGTH};

/// Horizontal speed kept after the ball skids along the floor
pub const FLOOR_FRICTION: f32 = 0.9;

/// Horizontal restitution when the ball hits the net
pub const NET_RESTITUTION: f32 = 0.8;

/// Ball state at the moment it reached the floor, before the bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorContact {
    pub x: f32,
    pub descending: bool,
}

/// Collisions detected during one ball update
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsEvents {
    pub floor_contact: Option<FloorContact>,
    pub ceiling_contact: bool,
    pub net_hit: bool,
}

/// Full ball update for one tick: integrate, then resolve court and net
pub fn update(ball: &mut Ball, net: &NetBounds, dt: f32) -> PhysicsEvents {
    step(ball, dt);
    let mut events = resolve_court_bounds(ball);
    events.net_hit = resolve_net(ball, net);
    events
}

/// Record the trail, then integrate gravity into velocity and velocity into position
pub fn step(ball: &mut Ball, dt: f32) {
    ball.trail.push_back(ball.pos);
    while ball.trail.len() > TRAIL_LENGTH {
        ball.trail.pop_front();
    }

    apply_gravity(&mut ball.vel, ball.gravity, dt);
    integrate(&mut ball.pos, ball.vel, dt);
}

/// Reflect off the floor and the ceiling
///
/// Floor contact loses vertical speed to the bounce coefficient and skids
/// 10% of the horizontal speed away. The ceiling only reflects vertically.
pub fn resolve_court_bounds(ball: &mut Ball) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    if ball.pos.y > FLOOR_Y {
        events.floor_contact = Some(FloorContact {
            x: ball.pos.x,
            descending: ball.vel.y > 0.0,
        });
        ball.pos.y = FLOOR_Y;
        ball.vel.y = reflect(ball.vel.y, ball.bounce);
        ball.vel.x *= FLOOR_FRICTION;
    }

    if ball.pos.y < CEILING_Y {
        ball.pos.y = CEILING_Y;
        ball.vel.y = reflect(ball.vel.y, ball.bounce);
        events.ceiling_contact = true;
    }

    events
}

/// Bounce the ball off the net if it overlaps the net's bounding box
///
/// The ball is pushed back out on the side it came from, judged by the sign
/// of its horizontal velocity, and loses 20% of its horizontal speed.
pub fn resolve_net(ball: &mut Ball, net: &NetBounds) -> bool {
    let r = ball.radius;
    if !touches_net(ball.pos, r, net) {
        return false;
    }

    ball.pos.x = if ball.vel.x > 0.0 {
        net.left() - r
    } else {
        net.right() + r
    };
    ball.vel.x = reflect(ball.vel.x, NET_RESTITUTION);
    true
}

/// Whether a ball of `radius` at `pos` overlaps the net rectangle
pub fn touches_net(pos: Vec2, radius: f32, net: &NetBounds) -> bool {
    pos.x > net.left() - radius && pos.x < net.right() + radius && pos.y > net.top - radius
}
