// Match state machine: points become sets, sets become a match

use serde::Serialize;

use super::events::MatchResult;
use super::state::{Side, COURT_CENTER_X};
use crate::ai::ScoreView;
use crate::config::MatchConfig;

/// Which subsystems may move the ball and actors on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SimulationPhase {
    /// Waiting for the host to start the match
    Ready,
    /// The ball has just been served; becomes `Rallying` after one tick
    Serving,
    Rallying,
    /// Frozen after a point, counting down to the next serve
    PointPause { remaining: u32 },
    /// Frozen between sets, counting down to the next serve
    SetTransition { remaining: u32 },
    MatchOver,
}

impl SimulationPhase {
    /// Advance a timed pause by one tick
    ///
    /// Returns `None` once the countdown has elapsed and the next serve is due.
    pub fn count_down(self) -> Option<SimulationPhase> {
        match self {
            SimulationPhase::PointPause { remaining } if remaining > 1 => {
                Some(SimulationPhase::PointPause {
                    remaining: remaining - 1,
                })
            }
            SimulationPhase::SetTransition { remaining } if remaining > 1 => {
                Some(SimulationPhase::SetTransition {
                    remaining: remaining - 1,
                })
            }
            SimulationPhase::PointPause { .. } | SimulationPhase::SetTransition { .. } => None,
            other => Some(other),
        }
    }
}

/// What a single point did to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// The set goes on
    Point,
    /// The set was won and the next one starts at 0-0
    SetWon(Side),
    /// The final set was won
    MatchOver(MatchResult),
    /// The match had already ended; nothing changed
    Ignored,
}

/// The side that wins a rally whose ball touched the floor at `landing_x`
///
/// A ball landing on a half loses the point for that half's owner.
pub fn point_winner(landing_x: f32) -> Side {
    if landing_x > COURT_CENTER_X {
        Side::Player
    } else {
        Side::Ai
    }
}

/// Score, sets and totals for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub player_points: u32,
    pub ai_points: u32,
    pub player_sets: u32,
    pub ai_sets: u32,
    /// 1-based index of the set being played
    pub current_set: u32,
    /// Points won over the whole match, never reset between sets
    pub player_points_won: u32,
    pub ai_points_won: u32,
    pub target_points: u32,
    pub sets_to_win: u32,
    pub result: Option<MatchResult>,
}

impl MatchState {
    pub fn new(rules: &MatchConfig) -> Self {
        Self {
            player_points: 0,
            ai_points: 0,
            player_sets: 0,
            ai_sets: 0,
            current_set: 1,
            player_points_won: 0,
            ai_points_won: 0,
            target_points: rules.target_points,
            sets_to_win: rules.sets_to_win,
            result: None,
        }
    }

    pub fn sets(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_sets,
            Side::Ai => self.ai_sets,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Credit a point and apply set and match transitions
    pub fn award_point(&mut self, side: Side) -> PointOutcome {
        if self.is_over() {
            return PointOutcome::Ignored;
        }

        let points = match side {
            Side::Player => {
                self.player_points_won += 1;
                &mut self.player_points
            }
            Side::Ai => {
                self.ai_points_won += 1;
                &mut self.ai_points
            }
        };
        *points += 1;
        if *points < self.target_points {
            return PointOutcome::Point;
        }

        let sets = match side {
            Side::Player => &mut self.player_sets,
            Side::Ai => &mut self.ai_sets,
        };
        *sets += 1;
        let sets_won = *sets;

        self.player_points = 0;
        self.ai_points = 0;

        if sets_won >= self.sets_to_win {
            let result = MatchResult {
                winner: side,
                player_sets: self.player_sets,
                ai_sets: self.ai_sets,
            };
            self.result = Some(result);
            PointOutcome::MatchOver(result)
        } else {
            self.current_set += 1;
            PointOutcome::SetWon(side)
        }
    }

    /// Phase that follows a point with the given outcome
    pub fn phase_after(outcome: PointOutcome, rules: &MatchConfig) -> SimulationPhase {
        match outcome {
            PointOutcome::Point => SimulationPhase::PointPause {
                remaining: rules.point_pause_ticks,
            },
            PointOutcome::SetWon(_) => SimulationPhase::SetTransition {
                remaining: rules.set_transition_ticks,
            },
            PointOutcome::MatchOver(_) | PointOutcome::Ignored => SimulationPhase::MatchOver,
        }
    }

    /// The score as the opponent reasons about it
    pub fn score_view(&self) -> ScoreView {
        ScoreView {
            ai_points: self.ai_points,
            player_points: self.player_points,
            target_points: self.target_points,
            ai_points_won: self.ai_points_won,
            player_points_won: self.player_points_won,
        }
    }
}
