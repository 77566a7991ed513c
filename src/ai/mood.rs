// Mood model and difficulty-derived decision parameters

use std::collections::VecDeque;

use serde::Serialize;

use super::profile::RallyOutcome;
use crate::config::Difficulty;

pub const CONFIDENCE_MIN: f32 = 0.1;
pub const CONFIDENCE_MAX: f32 = 0.9;
pub const MOMENTUM_LIMIT: i32 = 5;

/// Outcomes needed before the mood reacts to results
const MIN_OUTCOMES: usize = 3;
/// Momentum and win rate look at this many newest outcomes
const MOOD_WINDOW: usize = 5;
/// Score gap that nudges confidence up or down
const SCORE_GAP: i32 = 2;
const SCORE_NUDGE: f32 = 0.1;

/// Opponent confidence and momentum
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mood {
    pub confidence: f32,
    pub momentum: i32,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            confidence: 0.5,
            momentum: 0,
        }
    }
}

impl Mood {
    /// Recompute from recent rally outcomes and the live score gap
    ///
    /// `score_diff` is opponent points minus human points in the current set.
    pub fn update(&mut self, outcomes: &VecDeque<RallyOutcome>, score_diff: i32) {
        if outcomes.len() >= MIN_OUTCOMES {
            let window = outcomes.len().min(MOOD_WINDOW);
            let recent = outcomes.iter().skip(outcomes.len() - window);
            let (wins, losses) = recent.fold((0, 0), |(w, l), outcome| match outcome {
                RallyOutcome::Win => (w + 1, l),
                RallyOutcome::Loss => (w, l + 1),
            });

            self.momentum = (wins - losses).clamp(-MOMENTUM_LIMIT, MOMENTUM_LIMIT);

            let win_rate = wins as f32 / window as f32;
            self.confidence = (win_rate * 0.8 + 0.2).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
        }

        if score_diff > SCORE_GAP {
            self.confidence = (self.confidence + SCORE_NUDGE).min(CONFIDENCE_MAX);
        } else if score_diff < -SCORE_GAP {
            self.confidence = (self.confidence - SCORE_NUDGE).max(CONFIDENCE_MIN);
        }
    }
}

/// Decision parameters for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParams {
    /// Base reaction delay in ticks
    pub reaction_delay: u32,
    /// Prediction accuracy in [0.5, 0.98]
    pub prediction_accuracy: f32,
    /// Multiplier on the opponent's base movement speed
    pub speed_multiplier: f32,
    /// Weight of tactical reasoning in [0, 1]
    pub strategic_thinking: f32,
}

impl AiParams {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                reaction_delay: 15,
                prediction_accuracy: 0.7,
                speed_multiplier: 0.8,
                strategic_thinking: 0.3,
            },
            Difficulty::Medium => Self {
                reaction_delay: 8,
                prediction_accuracy: 0.85,
                speed_multiplier: 0.9,
                strategic_thinking: 0.6,
            },
            Difficulty::Hard => Self {
                reaction_delay: 3,
                prediction_accuracy: 0.95,
                speed_multiplier: 1.1,
                strategic_thinking: 0.9,
            },
        }
    }

    /// Confidence moves reaction and accuracy; momentum moves speed and tactics
    pub fn with_mood(mut self, mood: &Mood) -> Self {
        if mood.confidence > 0.7 {
            self.reaction_delay = self.reaction_delay.saturating_sub(2).max(1);
            self.prediction_accuracy = (self.prediction_accuracy + 0.05).min(0.98);
        } else if mood.confidence < 0.3 {
            self.reaction_delay += 3;
            self.prediction_accuracy = (self.prediction_accuracy - 0.1).max(0.5);
        }

        if mood.momentum > 2 {
            self.speed_multiplier *= 1.1;
            self.strategic_thinking = (self.strategic_thinking + 0.1).min(1.0);
        } else if mood.momentum < -2 {
            self.speed_multiplier *= 0.9;
            self.strategic_thinking = (self.strategic_thinking - 0.1).max(0.0);
        }

        self
    }

    /// Ticks to wait after committing to a swing; sure reads wait less
    pub fn swing_cooldown(&self, prediction_confidence: f32) -> u32 {
        let delay = self.reaction_delay as f32 - prediction_confidence * 5.0;
        delay.round().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(list: &[RallyOutcome]) -> VecDeque<RallyOutcome> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_mood_waits_for_three_outcomes() {
        let mut mood = Mood::default();
        mood.update(&outcomes(&[RallyOutcome::Win, RallyOutcome::Win]), 0);
        assert_eq!(mood, Mood::default());
    }

    #[test]
    fn test_winning_streak_raises_mood() {
        use RallyOutcome::*;
        let mut mood = Mood::default();
        mood.update(&outcomes(&[Loss, Win, Win, Win, Win, Win]), 0);
        assert_eq!(mood.momentum, 5);
        assert!((mood.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_losing_streak_lowers_mood() {
        use RallyOutcome::*;
        let mut mood = Mood::default();
        mood.update(&outcomes(&[Loss, Loss, Loss]), 0);
        assert_eq!(mood.momentum, -3);
        assert!((mood.confidence - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_score_gap_nudges_confidence() {
        let mut mood = Mood::default();
        mood.update(&VecDeque::new(), 3);
        assert!((mood.confidence - 0.6).abs() < 1e-6);

        mood.update(&VecDeque::new(), -3);
        mood.update(&VecDeque::new(), -3);
        assert!((mood.confidence - 0.4).abs() < 1e-6);

        mood.update(&VecDeque::new(), 2);
        assert!((mood.confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_table() {
        let easy = AiParams::for_difficulty(Difficulty::Easy);
        let hard = AiParams::for_difficulty(Difficulty::Hard);
        assert!(easy.reaction_delay > hard.reaction_delay);
        assert!(easy.prediction_accuracy < hard.prediction_accuracy);
        assert!(easy.strategic_thinking < 0.4);
        assert!(hard.strategic_thinking > 0.4);
    }

    #[test]
    fn test_confident_opponent_reacts_faster() {
        let base = AiParams::for_difficulty(Difficulty::Medium);
        let confident = base.with_mood(&Mood {
            confidence: 0.9,
            momentum: 4,
        });
        assert_eq!(confident.reaction_delay, 6);
        assert!((confident.prediction_accuracy - 0.9).abs() < 1e-6);
        assert!(confident.speed_multiplier > base.speed_multiplier);
        assert!((confident.strategic_thinking - 0.7).abs() < 1e-6);

        let shaken = base.with_mood(&Mood {
            confidence: 0.1,
            momentum: -4,
        });
        assert_eq!(shaken.reaction_delay, 11);
        assert!((shaken.prediction_accuracy - 0.75).abs() < 1e-6);
        assert!(shaken.speed_multiplier < base.speed_multiplier);
    }

    #[test]
    fn test_accuracy_stays_in_range() {
        let hard = AiParams::for_difficulty(Difficulty::Hard).with_mood(&Mood {
            confidence: 0.9,
            momentum: 0,
        });
        assert!(hard.prediction_accuracy <= 0.98);
        assert_eq!(hard.reaction_delay, 1);
    }

    #[test]
    fn test_swing_cooldown_has_floor() {
        let hard = AiParams::for_difficulty(Difficulty::Hard);
        assert_eq!(hard.swing_cooldown(0.95), 1);

        let easy = AiParams::for_difficulty(Difficulty::Easy);
        assert_eq!(easy.swing_cooldown(0.7), 12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mood_stays_in_bounds(
                wins in proptest::collection::vec(any::<bool>(), 0..40),
                diffs in proptest::collection::vec(-11i32..=11, 1..40)
            ) {
                let mut mood = Mood::default();
                let mut history = VecDeque::new();
                for (i, diff) in diffs.iter().enumerate() {
                    if let Some(&win) = wins.get(i) {
                        history.push_back(if win { RallyOutcome::Win } else { RallyOutcome::Loss });
                        if history.len() > 10 {
                            history.pop_front();
                        }
                    }
                    mood.update(&history, *diff);
                    prop_assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&mood.confidence));
                    prop_assert!((-MOMENTUM_LIMIT..=MOMENTUM_LIMIT).contains(&mood.momentum));
                }
            }
        }
    }
}
