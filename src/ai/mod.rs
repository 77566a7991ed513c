// Opponent decision engine and scripted bots

mod autopilot;
mod bot;
mod idle;
pub mod mood;
pub mod opponent;
pub mod prediction;
pub mod profile;
pub mod strategy;
pub mod tactics;

use std::str::FromStr;

pub use autopilot::AutopilotBot;
pub use bot::{Bot, CourtView};
pub use idle::IdleBot;
pub use mood::{AiParams, Mood};
pub use opponent::{OpponentBrain, ScoreView};
pub use prediction::Prediction;
pub use profile::{OpponentProfile, RallyOutcome, Tendency};
pub use strategy::HitStrategy;
pub use tactics::Tactic;

/// Bot type selection for the human side of a headless match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotType {
    /// Tracks and returns the ball
    #[default]
    Autopilot,
    /// Stands still; the opponent wins every rally it serves into
    Idle,
}

impl BotType {
    pub fn display_name(&self) -> &str {
        match self {
            BotType::Autopilot => "Autopilot",
            BotType::Idle => "Idle",
        }
    }

    pub fn all() -> Vec<BotType> {
        vec![BotType::Autopilot, BotType::Idle]
    }
}

impl FromStr for BotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "autopilot" => Ok(BotType::Autopilot),
            "idle" => Ok(BotType::Idle),
            other => Err(format!("unknown bot '{}'", other)),
        }
    }
}

/// Create a bot instance from a bot type
pub fn create_bot(bot_type: BotType) -> Box<dyn Bot> {
    match bot_type {
        BotType::Autopilot => Box::new(AutopilotBot::new()),
        BotType::Idle => Box::new(IdleBot::new()),
    }
}
