// Opponent experience accumulated over one match

use std::collections::VecDeque;

use serde::Serialize;

use super::mood::Mood;
use super::tactics::Tactic;
use crate::game::kinematics::Vec2;

/// Human swings remembered for tendency analysis
pub const HIT_SAMPLE_WINDOW: usize = 20;
/// Samples needed before a tendency is derived, also the averaging window
pub const TENDENCY_MIN_SAMPLES: usize = 5;
/// Human swinging at a ball farther than this is playing aggressively
pub const AGGRESSIVE_REACH: f32 = 100.0;

pub const TACTIC_HISTORY_WINDOW: usize = 50;
/// Only the newest records count toward tactic success rates
pub const TACTIC_EVAL_WINDOW: usize = 10;
/// Records needed before any success rate is trusted
pub const TACTIC_MIN_HISTORY: usize = 5;

pub const OUTCOME_WINDOW: usize = 10;

/// Where the human stood and where the ball was when they started a swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSample {
    pub player_x: f32,
    pub ball_x: f32,
}

/// Summary of the human's recent swings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tendency {
    pub favorite_position: f32,
    pub is_aggressive: bool,
}

impl Tendency {
    /// Derive a tendency from the newest samples; `None` until enough exist
    pub fn from_samples(samples: &VecDeque<HitSample>) -> Option<Self> {
        if samples.len() < TENDENCY_MIN_SAMPLES {
            return None;
        }

        let recent = samples.iter().skip(samples.len() - TENDENCY_MIN_SAMPLES);
        let mut sum = 0.0;
        let mut is_aggressive = false;
        for sample in recent {
            sum += sample.player_x;
            is_aggressive |= (sample.ball_x - sample.player_x).abs() > AGGRESSIVE_REACH;
        }

        Some(Self {
            favorite_position: sum / TENDENCY_MIN_SAMPLES as f32,
            is_aggressive,
        })
    }
}

/// Match context captured when a tactic was used for a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticRecord {
    pub tactic: Tactic,
    pub angle: f32,
    pub power: f32,
    pub target: Vec2,
    pub ai_points_won: u32,
    pub player_points_won: u32,
    pub player_x: f32,
    pub ball: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TacticStats {
    pub successes: u32,
    pub attempts: u32,
}

impl TacticStats {
    pub fn success_rate(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f32 / self.attempts as f32
        }
    }
}

/// Rally result from the opponent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RallyOutcome {
    Win,
    Loss,
}

/// Everything the opponent has learned this match
///
/// Lives on the opponent actor and survives serves and sets; only a full
/// session reset discards it.
#[derive(Debug, Clone, Default)]
pub struct OpponentProfile {
    hit_samples: VecDeque<HitSample>,
    tendency: Option<Tendency>,
    tactic_history: VecDeque<TacticRecord>,
    outcomes: VecDeque<RallyOutcome>,

    pub mood: Mood,
    /// Ticks left before the opponent thinks again
    pub reaction_countdown: u32,
    /// Tactic chosen on the latest decision tick
    pub active_tactic: Option<Tactic>,
    /// Tactic latched when the latest swing was committed
    pub swing_tactic: Option<Tactic>,
    /// Decision ticks elapsed, drives the waiting sway
    pub clock: u64,
}

impl OpponentProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember where the human stood and where the ball was as a swing started
    pub fn record_hit_sample(&mut self, sample: HitSample) {
        self.hit_samples.push_back(sample);
        while self.hit_samples.len() > HIT_SAMPLE_WINDOW {
            self.hit_samples.pop_front();
        }
        if let Some(tendency) = Tendency::from_samples(&self.hit_samples) {
            self.tendency = Some(tendency);
        }
    }

    pub fn tendency(&self) -> Option<Tendency> {
        self.tendency
    }

    pub fn hit_samples(&self) -> impl Iterator<Item = &HitSample> {
        self.hit_samples.iter()
    }

    pub fn record_tactic(&mut self, record: TacticRecord) {
        self.tactic_history.push_back(record);
        while self.tactic_history.len() > TACTIC_HISTORY_WINDOW {
            self.tactic_history.pop_front();
        }
    }

    pub fn tactic_history(&self) -> impl Iterator<Item = &TacticRecord> {
        self.tactic_history.iter()
    }

    /// Success counters over the newest records
    ///
    /// A record succeeded if the opponent has won more points since it was
    /// taken. Returns nothing until enough history exists.
    pub fn tactic_stats(&self, ai_points_won: u32) -> Option<[(Tactic, TacticStats); 4]> {
        if self.tactic_history.len() < TACTIC_MIN_HISTORY {
            return None;
        }

        let mut stats = Tactic::ALL.map(|tactic| (tactic, TacticStats::default()));
        let skip = self.tactic_history.len().saturating_sub(TACTIC_EVAL_WINDOW);
        for record in self.tactic_history.iter().skip(skip) {
            let entry = &mut stats[record.tactic.index()].1;
            entry.attempts += 1;
            if ai_points_won > record.ai_points_won {
                entry.successes += 1;
            }
        }
        Some(stats)
    }

    pub fn record_outcome(&mut self, outcome: RallyOutcome) {
        self.outcomes.push_back(outcome);
        while self.outcomes.len() > OUTCOME_WINDOW {
            self.outcomes.pop_front();
        }
    }

    pub fn outcomes(&self) -> &VecDeque<RallyOutcome> {
        &self.outcomes
    }

    /// Refresh the mood from the stored outcomes and the live score gap
    pub fn update_mood(&mut self, score_diff: i32) {
        self.mood.update(&self.outcomes, score_diff);
    }

    /// Forget per-rally timing state at a serve; learning is kept
    pub fn reset_rally(&mut self) {
        self.reaction_countdown = 0;
        self.swing_tactic = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tactic: Tactic, ai_points_won: u32) -> TacticRecord {
        TacticRecord {
            tactic,
            angle: -2.0,
            power: 7.0,
            target: Vec2::ZERO,
            ai_points_won,
            player_points_won: 0,
            player_x: 150.0,
            ball: Vec2::new(600.0, 400.0),
        }
    }

    #[test]
    fn test_close_swings_are_not_aggressive() {
        let mut profile = OpponentProfile::new();
        for _ in 0..5 {
            profile.record_hit_sample(HitSample {
                player_x: 300.0,
                ball_x: 320.0,
            });
        }
        let tendency = profile.tendency().unwrap();
        assert!(!tendency.is_aggressive);
        assert!((tendency.favorite_position - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_tendency_needs_five_samples() {
        let mut profile = OpponentProfile::new();
        for _ in 0..4 {
            profile.record_hit_sample(HitSample {
                player_x: 100.0,
                ball_x: 100.0,
            });
        }
        assert!(profile.tendency().is_none());
    }

    #[test]
    fn test_one_far_swing_marks_aggressive() {
        let mut profile = OpponentProfile::new();
        for i in 0..5 {
            let ball_x = if i == 2 { 260.0 } else { 110.0 };
            profile.record_hit_sample(HitSample {
                player_x: 100.0,
                ball_x,
            });
        }
        assert!(profile.tendency().unwrap().is_aggressive);
    }

    #[test]
    fn test_tendency_averages_newest_five() {
        let mut profile = OpponentProfile::new();
        for x in [0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0, 100.0] {
            profile.record_hit_sample(HitSample {
                player_x: x,
                ball_x: x,
            });
        }
        assert!((profile.tendency().unwrap().favorite_position - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_mood_reads_stored_outcomes() {
        let mut profile = OpponentProfile::new();
        for _ in 0..3 {
            profile.record_outcome(RallyOutcome::Win);
        }
        profile.update_mood(0);
        assert_eq!(profile.mood.momentum, 3);
        assert!((profile.mood.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_windows_are_bounded() {
        let mut profile = OpponentProfile::new();
        for i in 0..30 {
            profile.record_hit_sample(HitSample {
                player_x: i as f32,
                ball_x: 0.0,
            });
        }
        for i in 0..60 {
            profile.record_tactic(record(Tactic::Adaptive, i));
        }
        for _ in 0..15 {
            profile.record_outcome(RallyOutcome::Win);
        }
        assert_eq!(profile.hit_samples().count(), HIT_SAMPLE_WINDOW);
        assert_eq!(profile.tactic_history().count(), TACTIC_HISTORY_WINDOW);
        assert_eq!(profile.outcomes().len(), OUTCOME_WINDOW);
    }

    #[test]
    fn test_tactic_success_is_retrospective() {
        let mut profile = OpponentProfile::new();
        assert!(profile.tactic_stats(0).is_none());

        for _ in 0..4 {
            profile.record_tactic(record(Tactic::Aggressive, 2));
        }
        profile.record_tactic(record(Tactic::Defensive, 5));

        let stats = profile.tactic_stats(5).unwrap();
        let aggressive = stats[Tactic::Aggressive.index()].1;
        let defensive = stats[Tactic::Defensive.index()].1;
        assert_eq!(aggressive, TacticStats { successes: 4, attempts: 4 });
        assert_eq!(defensive, TacticStats { successes: 0, attempts: 1 });
    }

    #[test]
    fn test_only_newest_ten_records_are_scored() {
        let mut profile = OpponentProfile::new();
        for _ in 0..10 {
            profile.record_tactic(record(Tactic::Counter, 0));
        }
        for _ in 0..10 {
            profile.record_tactic(record(Tactic::Adaptive, 0));
        }
        let stats = profile.tactic_stats(1).unwrap();
        assert_eq!(stats[Tactic::Counter.index()].1.attempts, 0);
        assert_eq!(stats[Tactic::Adaptive.index()].1.attempts, 10);
    }
}
