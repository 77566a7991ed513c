// Autopilot bot - plays the human side for headless matches

use super::bot::{Bot, CourtView};
use super::prediction::simulate_trajectory;
use crate::game::{Intent, Movement, COURT_CENTER_X, PLAYER_MAX_X, PLAYER_MIN_X};

/// A simple tracker for the human half
///
/// - Chases the predicted landing point while the ball is on or heading to
///   its half, standing a little behind it so hits go over the net
/// - Walks back to its start position otherwise
/// - Swings as soon as the ball is comfortably inside the hit radius
pub struct AutopilotBot {
    name: String,
    movement_threshold: f32, // Dead zone to avoid jitter
    stand_behind: f32,       // Keep the torso left of the ball by this much
    reach_margin: f32,       // Swing only this far inside the hit radius
}

impl AutopilotBot {
    pub fn new() -> Self {
        Self {
            name: "Autopilot".to_string(),
            movement_threshold: 6.0,
            stand_behind: 12.0,
            reach_margin: 5.0,
        }
    }

    fn target_torso_x(&self, view: &CourtView<'_>) -> f32 {
        let ball = view.ball;
        let me = view.me;
        let half_width = me.width / 2.0;

        let incoming = ball.pos.x < COURT_CENTER_X || ball.vel.x < 0.0;
        if !incoming {
            return me.start_x() + half_width;
        }

        let aim_x = if me.distance_to(ball.pos) < 120.0 {
            ball.pos.x
        } else {
            simulate_trajectory(ball.pos, ball.vel, ball.gravity).x
        };

        (aim_x - self.stand_behind).clamp(PLAYER_MIN_X + half_width, PLAYER_MAX_X + half_width)
    }
}

impl Default for AutopilotBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for AutopilotBot {
    fn decide(&mut self, view: &CourtView<'_>) -> Intent {
        let me = view.me;
        let ball = view.ball;
        let torso = me.torso();

        let target_x = self.target_torso_x(view);
        let diff = target_x - torso.x;
        let mut intent = if diff.abs() < self.movement_threshold {
            Intent::idle()
        } else {
            Intent::moving(Movement::toward(torso.x, target_x))
        };

        let over_head = ball.pos.y < me.pos.y && (ball.pos.x - torso.x).abs() < 40.0;
        if over_head && me.on_ground && ball.vel.y > 0.0 {
            intent.jump = true;
        }

        let in_reach = me.distance_to(ball.pos) < me.hit_radius - self.reach_margin;
        if in_reach && !me.swinging && ball.pos.x < COURT_CENTER_X {
            // Holding right sends the ball up and over the net
            intent.swing = true;
            intent.movement = Movement::Right;
        }

        intent
    }

    fn reset(&mut self) {
        // Stateless tracker
    }

    fn name(&self) -> &str {
        &self.name
    }
}
