// Shared motion primitives for the ball and both actors
// Screen coordinates: x grows to the right, y grows downward

use serde::Serialize;
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians scaled by `length`
    pub fn from_angle(angle: f32, length: f32) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Explicit Euler step: position advances by velocity over `dt` ticks
pub fn integrate(pos: &mut Vec2, vel: Vec2, dt: f32) {
    *pos += vel * dt;
}

/// Add a constant downward acceleration to a velocity
pub fn apply_gravity(vel: &mut Vec2, gravity: f32, dt: f32) {
    vel.y += gravity * dt;
}

/// Reflect one velocity component with restitution
///
/// `restitution` of 1.0 is a perfect mirror, 0.0 stops the component.
pub fn reflect(component: f32, restitution: f32) -> f32 {
    -component * restitution
}

/// Clamp a coordinate to `[min, max]`, reporting whether it was moved
pub fn clamp_axis(value: &mut f32, min: f32, max: f32) -> bool {
    if *value < min {
        *value = min;
        true
    } else if *value > max {
        *value = max;
        true
    } else {
        false
    }
}
