// Stickminton configuration types
// Every section defaults to the classic court values, so a partial file works

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Seed for the simulation RNG (serve direction, AI jitter, tactic rolls)
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default, rename = "match")]
    pub rules: MatchConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

fn default_seed() -> u64 {
    0x5EED_BADB
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            rules: MatchConfig::default(),
            ai: AIConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl Config {
    /// Reject configurations that cannot produce a finite match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.target_points == 0 {
            return Err(ConfigError::InvalidTargetPoints(self.rules.target_points));
        }
        if self.rules.sets_to_win == 0 {
            return Err(ConfigError::InvalidSetsToWin(self.rules.sets_to_win));
        }
        self.physics.validate()
    }

    /// Convenience for hosts that only pick a difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.ai.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchConfig {
    // Points needed to take a set (no deuce)
    pub target_points: u32,

    // Sets needed to take the match (2 = best of three)
    pub sets_to_win: u32,

    // Frozen ticks after a point before the next serve
    pub point_pause_ticks: u32,

    // Frozen ticks between sets
    pub set_transition_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_points: 11,
            sets_to_win: 2,
            point_pause_ticks: 120,    // 2 seconds at 60 Hz
            set_transition_ticks: 180, // 3 seconds at 60 Hz
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn display_name(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AIConfig {
    // AI difficulty: "easy", "medium", "hard"
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Downward acceleration applied to the ball each tick
    pub ball_gravity: f32,

    // Fraction of vertical speed kept on floor/ceiling contact
    pub ball_bounce: f32,

    pub ball_radius: f32,

    // Downward acceleration applied to airborne actors each tick
    pub actor_gravity: f32,

    // Fixed outgoing speed of a human hit
    pub player_hit_power: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_gravity: 0.3,
            ball_bounce: 0.8,
            ball_radius: 8.0,
            actor_gravity: 0.5,
            player_hit_power: 8.0,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("ball_gravity", self.ball_gravity),
            ("ball_radius", self.ball_radius),
            ("actor_gravity", self.actor_gravity),
            ("player_hit_power", self.player_hit_power),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidPhysics { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.ball_bounce) {
            return Err(ConfigError::InvalidPhysics {
                field: "ball_bounce",
                value: self.ball_bounce,
            });
        }
        Ok(())
    }
}
