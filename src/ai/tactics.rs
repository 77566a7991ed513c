// Tactic selection for the opponent

use rand::Rng;
use serde::Serialize;

use super::profile::{TacticStats, Tendency};

/// Opponent behaviour modes, governing positioning and shot choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tactic {
    Aggressive,
    Defensive,
    Adaptive,
    Counter,
}

impl Tactic {
    pub const ALL: [Tactic; 4] = [
        Tactic::Aggressive,
        Tactic::Defensive,
        Tactic::Adaptive,
        Tactic::Counter,
    ];

    pub fn index(self) -> usize {
        match self {
            Tactic::Aggressive => 0,
            Tactic::Defensive => 1,
            Tactic::Adaptive => 2,
            Tactic::Counter => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tactic::Aggressive => "aggressive",
            Tactic::Defensive => "defensive",
            Tactic::Adaptive => "adaptive",
            Tactic::Counter => "counter",
        }
    }
}

// Below this level the opponent just flips between attack and defence
const STRATEGIC_FLOOR: f32 = 0.4;
const MIN_ATTEMPTS: u32 = 3;
const PREFERENCE_THRESHOLD: f32 = 0.6;
const PREFERENCE_ODDS: f64 = 0.7;
const LEAD_MARGIN: i32 = 2;
const LATE_LEAD_PHASE: f32 = 0.7;

/// Inputs to one tactic decision
#[derive(Debug, Clone, Copy)]
pub struct TacticContext {
    pub strategic_thinking: f32,
    /// Opponent points minus human points in the current set
    pub score_diff: i32,
    /// Points played this set over the points a full set could take
    pub match_phase: f32,
    pub tendency: Option<Tendency>,
    pub learned: Option<Tactic>,
}

impl TacticContext {
    pub fn phase(ai_points: u32, player_points: u32, target_points: u32) -> f32 {
        let expected = (target_points as f32 * 2.0).max(1.0);
        (ai_points as f32 + player_points as f32) / expected
    }
}

/// Best tactic by recent success rate, if any is convincing
///
/// Only tactics with at least three attempts are considered, and the best
/// rate must beat 0.6.
pub fn learned_preference(stats: Option<[(Tactic, TacticStats); 4]>) -> Option<Tactic> {
    let stats = stats?;

    let mut best: Option<(Tactic, f32)> = None;
    for (tactic, entry) in stats {
        if entry.attempts < MIN_ATTEMPTS {
            continue;
        }
        let rate = entry.success_rate();
        if best.map_or(true, |(_, best_rate)| rate > best_rate) {
            best = Some((tactic, rate));
        }
    }

    best.filter(|&(_, rate)| rate > PREFERENCE_THRESHOLD)
        .map(|(tactic, _)| tactic)
}

/// Priority chain from simple coin flips up to score- and habit-aware choices
pub fn select_tactic<R: Rng>(ctx: &TacticContext, rng: &mut R) -> Tactic {
    if ctx.strategic_thinking < STRATEGIC_FLOOR {
        return if rng.gen::<f32>() > 0.6 {
            Tactic::Aggressive
        } else {
            Tactic::Defensive
        };
    }

    if ctx.score_diff > LEAD_MARGIN && ctx.match_phase > LATE_LEAD_PHASE {
        return Tactic::Defensive;
    }

    if ctx.score_diff < -LEAD_MARGIN {
        // Never sit back while behind
        return match ctx.learned {
            Some(Tactic::Defensive) => Tactic::Aggressive,
            Some(tactic) => tactic,
            None => contextual_tactic(ctx.score_diff, ctx.match_phase, rng),
        };
    }

    if ctx.tendency.map_or(false, |t| t.is_aggressive) {
        return Tactic::Counter;
    }

    if let Some(tactic) = ctx.learned {
        if rng.gen_bool(PREFERENCE_ODDS) {
            return tactic;
        }
    }

    contextual_tactic(ctx.score_diff, ctx.match_phase, rng)
}

/// Fallback choice from how far into the set we are and who leads
pub fn contextual_tactic<R: Rng>(score_diff: i32, match_phase: f32, rng: &mut R) -> Tactic {
    if match_phase < 0.3 {
        if rng.gen_bool(0.5) {
            Tactic::Aggressive
        } else {
            Tactic::Adaptive
        }
    } else if match_phase > 0.8 {
        if score_diff >= 0 {
            Tactic::Defensive
        } else {
            Tactic::Aggressive
        }
    } else if score_diff.abs() <= 1 {
        Tactic::Adaptive
    } else if score_diff > 0 {
        Tactic::Defensive
    } else {
        Tactic::Counter
    }
}
