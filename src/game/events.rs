use serde::Serialize;

use super::state::Side;

/// Final tally handed to whoever awards points for a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub winner: Side,
    pub player_sets: u32,
    pub ai_sets: u32,
}

/// Where the ball touched a court boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Floor,
    Ceiling,
}

/// Discrete things that happened during one tick, for sound, particles and modals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BallBounced { surface: Surface, x: f32, y: f32 },
    NetHit { x: f32, y: f32 },
    Swung { by: Side },
    Jumped { by: Side },
    BallHit { by: Side },
    PointScored { side: Side },
    SetWon { side: Side },
    MatchOver { result: MatchResult },
}
