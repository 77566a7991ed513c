// Per-tick decision pipeline for the computer-controlled actor

use rand::Rng;
use tracing::{debug, trace};

use super::mood::AiParams;
use super::prediction::predict_landing;
use super::profile::{OpponentProfile, TacticRecord};
use super::strategy::{self, HitStrategy, ShotContext};
use super::tactics::{learned_preference, select_tactic, Tactic, TacticContext};
use crate::config::Difficulty;
use crate::game::input::Intent;
use crate::game::state::{Actor, Ball};

/// Score as the opponent sees it on a decision tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreView {
    pub ai_points: u32,
    pub player_points: u32,
    pub target_points: u32,
    /// Points won by the opponent over the whole match
    pub ai_points_won: u32,
    pub player_points_won: u32,
}

impl ScoreView {
    pub fn diff(&self) -> i32 {
        self.ai_points as i32 - self.player_points as i32
    }
}

/// Drives the opponent actor from its attached profile
#[derive(Debug, Clone)]
pub struct OpponentBrain {
    difficulty: Difficulty,
}

impl OpponentBrain {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Difficulty baseline adjusted by the current mood
    pub fn params(&self, profile: &OpponentProfile) -> AiParams {
        AiParams::for_difficulty(self.difficulty).with_mood(&profile.mood)
    }

    /// Decide this tick's intent for the opponent
    ///
    /// The mood is refreshed every tick. While a reaction countdown is
    /// pending the opponent only counts down and coasts; otherwise it
    /// predicts, picks a tactic and plans a move.
    pub fn decide<R: Rng>(
        &self,
        me: &mut Actor,
        ball: &Ball,
        score: ScoreView,
        rng: &mut R,
    ) -> Intent {
        let Some(mut profile) = me.profile.take() else {
            return Intent::idle();
        };

        let intent = self.think(&mut profile, me, ball, score, rng);
        me.profile = Some(profile);
        intent
    }

    fn think<R: Rng>(
        &self,
        profile: &mut OpponentProfile,
        me: &Actor,
        ball: &Ball,
        score: ScoreView,
        rng: &mut R,
    ) -> Intent {
        profile.update_mood(score.diff());

        let params = self.params(profile);

        if profile.reaction_countdown > 0 {
            profile.reaction_countdown -= 1;
            return Intent::idle().with_friction(1.0);
        }

        profile.clock += 1;

        let prediction = predict_landing(ball, params.prediction_accuracy, rng);
        trace!(
            x = prediction.x,
            ticks = prediction.ticks_to_reach,
            "opponent prediction"
        );

        let tendency = profile.tendency();
        let context = TacticContext {
            strategic_thinking: params.strategic_thinking,
            score_diff: score.diff(),
            match_phase: TacticContext::phase(
                score.ai_points,
                score.player_points,
                score.target_points,
            ),
            tendency,
            learned: learned_preference(profile.tactic_stats(score.ai_points_won)),
        };
        let tactic = select_tactic(&context, rng);
        if profile.active_tactic != Some(tactic) {
            debug!(tactic = tactic.name(), "opponent switched tactic");
            profile.active_tactic = Some(tactic);
        }

        if strategy::ball_threatens_ai(ball) {
            let intent = strategy::chase_plan(
                ball,
                me,
                &prediction,
                tactic,
                tendency,
                params.speed_multiplier,
            );
            if intent.swing {
                profile.reaction_countdown = params.swing_cooldown(prediction.confidence);
                profile.swing_tactic = Some(tactic);
                debug!(
                    tactic = tactic.name(),
                    cooldown = profile.reaction_countdown,
                    "opponent committed to a swing"
                );
            }
            intent
        } else {
            strategy::waiting_plan(
                me,
                tactic,
                tendency,
                profile.clock,
                params.speed_multiplier,
            )
        }
    }

    /// Pick the shot for a swing that connected and remember it for learning
    pub fn resolve_hit<R: Rng>(
        &self,
        me: &mut Actor,
        player: &Actor,
        ball: &mut Ball,
        score: ScoreView,
        rng: &mut R,
    ) -> Option<HitStrategy> {
        let ai_pos = me.pos;
        let profile = me.profile.as_mut()?;
        let params = AiParams::for_difficulty(self.difficulty).with_mood(&profile.mood);

        let ctx = ShotContext {
            tactic: profile.swing_tactic.unwrap_or(Tactic::Adaptive),
            tendency: profile.tendency(),
            player_x: player.torso().x,
            ball_x: ball.pos.x,
            ai_pos,
            accuracy: params.prediction_accuracy,
        };
        let shot = strategy::hit_strategy(&ctx, rng);

        ball.vel = shot.velocity();
        profile.record_tactic(TacticRecord {
            tactic: shot.tactic,
            angle: shot.angle,
            power: shot.power,
            target: shot.target,
            ai_points_won: score.ai_points_won,
            player_points_won: score.player_points_won,
            player_x: player.pos.x,
            ball: ball.pos,
        });

        debug!(
            tactic = shot.tactic.name(),
            angle = shot.angle,
            power = shot.power,
            "opponent hit"
        );
        Some(shot)
    }
}
