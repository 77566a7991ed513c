// The steppable match: owns every piece of mutable state and advances it one tick at a time

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use super::actor::{self, ActorStep};
use super::events::{GameEvent, MatchResult, Surface};
use super::input::Intent;
use super::kinematics::Vec2;
use super::physics;
use super::rules::{point_winner, MatchState, PointOutcome, SimulationPhase};
use super::state::{Actor, Ball, NetBounds, Side};
use crate::ai::profile::HitSample;
use crate::ai::{CourtView, Mood, OpponentBrain, RallyOutcome, Tactic};
use crate::config::Config;
use crate::error::ConfigError;

/// Simulation time advanced by one `step()`; all speeds are per tick
pub const TICK_DT: f32 = 1.0;

/// Read-only view of the ball for presentation
#[derive(Debug, Clone, Serialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub trail: Vec<Vec2>,
}

/// Read-only view of one actor for presentation
#[derive(Debug, Clone, Serialize)]
pub struct ActorSnapshot {
    pub pos: Vec2,
    pub on_ground: bool,
    pub swinging: bool,
    /// Degrees, 0 when not swinging
    pub arm_angle: f32,
}

impl ActorSnapshot {
    fn of(actor: &Actor) -> Self {
        Self {
            pos: actor.pos,
            on_ground: actor.on_ground,
            swinging: actor.swinging,
            arm_angle: actor.arm_angle,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tally {
    pub player: u32,
    pub ai: u32,
}

/// Everything a renderer or sound layer needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: SimulationPhase,
    pub paused: bool,
    pub ball: BallSnapshot,
    pub player: ActorSnapshot,
    pub ai: ActorSnapshot,
    pub score: Tally,
    pub sets: Tally,
    pub current_set: u32,
    pub ai_tactic: Option<Tactic>,
    pub ai_mood: Mood,
    pub events: Vec<GameEvent>,
}

/// One match between the human and the opponent
///
/// The host calls `step()` once per tick with the human's sampled intent.
/// Timed pauses are phases that count down inside `step()`.
pub struct Simulation {
    config: Config,
    rng: StdRng,
    brain: OpponentBrain,
    net: NetBounds,
    ball: Ball,
    player: Actor,
    ai: Actor,
    match_state: MatchState,
    phase: SimulationPhase,
    paused: bool,
    tick: u64,
    events: Vec<GameEvent>,
}

impl Simulation {
    /// Build a match in the `Ready` phase, rejecting invalid configuration
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            brain: OpponentBrain::new(config.ai.difficulty),
            net: NetBounds::standard(),
            ball: Ball::new(&config.physics),
            player: Actor::player(&config.physics),
            ai: Actor::opponent(&config.physics),
            match_state: MatchState::new(&config.rules),
            phase: SimulationPhase::Ready,
            paused: false,
            tick: 0,
            events: Vec::new(),
            config,
        })
    }

    /// Serve the first ball; after a finished match this starts a fresh one
    pub fn start(&mut self) {
        match self.phase {
            SimulationPhase::Ready => {}
            SimulationPhase::MatchOver => self.reset(),
            _ => return,
        }

        info!(
            difficulty = self.config.ai.difficulty.display_name(),
            seed = self.config.seed,
            "match started"
        );
        self.serve();
    }

    /// Discard the match, the opponent's experience and all positions
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.ball = Ball::new(&self.config.physics);
        self.player = Actor::player(&self.config.physics);
        self.ai = Actor::opponent(&self.config.physics);
        self.match_state = MatchState::new(&self.config.rules);
        self.phase = SimulationPhase::Ready;
        self.paused = false;
        self.tick = 0;
        self.events.clear();
        debug!("simulation reset");
    }

    /// Swap in a new configuration; the session is reset on success
    pub fn reconfigure(&mut self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        self.brain = OpponentBrain::new(config.ai.difficulty);
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one tick
    pub fn step(&mut self, intent: &Intent) {
        if self.paused {
            return;
        }

        self.events.clear();
        self.tick += 1;

        match self.phase {
            SimulationPhase::Ready | SimulationPhase::MatchOver => {}
            SimulationPhase::PointPause { .. } | SimulationPhase::SetTransition { .. } => {
                match self.phase.count_down() {
                    Some(next) => self.phase = next,
                    None => self.serve(),
                }
            }
            SimulationPhase::Serving | SimulationPhase::Rallying => {
                self.play_tick(intent);
                if self.phase == SimulationPhase::Serving {
                    self.phase = SimulationPhase::Rallying;
                }
            }
        }
    }

    fn play_tick(&mut self, intent: &Intent) {
        let intent = intent.discrete();
        let score = self.match_state.score_view();

        let ai_intent = self
            .brain
            .decide(&mut self.ai, &self.ball, score, &mut self.rng);

        let swing_sample = HitSample {
            player_x: self.player.pos.x,
            ball_x: self.ball.pos.x,
        };
        let player_step = actor::update(&mut self.player, &intent, self.ball.pos, TICK_DT);
        self.record_actor_step(Side::Player, &player_step);
        if player_step.swung {
            if let Some(profile) = self.ai.profile.as_mut() {
                profile.record_hit_sample(swing_sample);
            }
        }
        let ai_step = actor::update(&mut self.ai, &ai_intent, self.ball.pos, TICK_DT);
        self.record_actor_step(Side::Ai, &ai_step);

        if let Some(torso) = player_step.contact_from {
            actor::resolve_player_hit(
                &mut self.ball,
                torso,
                intent.movement,
                self.config.physics.player_hit_power,
            );
            self.events.push(GameEvent::BallHit { by: Side::Player });
            debug!(vx = self.ball.vel.x, vy = self.ball.vel.y, "player hit");
        }

        if ai_step.contact_from.is_some() {
            let hit = self.brain.resolve_hit(
                &mut self.ai,
                &self.player,
                &mut self.ball,
                score,
                &mut self.rng,
            );
            if hit.is_some() {
                self.events.push(GameEvent::BallHit { by: Side::Ai });
            }
        }

        let contacts = physics::update(&mut self.ball, &self.net, TICK_DT);
        if contacts.net_hit {
            self.events.push(GameEvent::NetHit {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
            });
        }
        if contacts.ceiling_contact {
            self.events.push(GameEvent::BallBounced {
                surface: Surface::Ceiling,
                x: self.ball.pos.x,
                y: self.ball.pos.y,
            });
        }
        if let Some(contact) = contacts.floor_contact {
            self.events.push(GameEvent::BallBounced {
                surface: Surface::Floor,
                x: contact.x,
                y: self.ball.pos.y,
            });
            if contact.descending {
                self.score_point(point_winner(contact.x));
            }
        }
    }

    fn record_actor_step(&mut self, side: Side, step: &ActorStep) {
        if step.swung {
            self.events.push(GameEvent::Swung { by: side });
        }
        if step.jumped {
            self.events.push(GameEvent::Jumped { by: side });
        }
    }

    fn score_point(&mut self, side: Side) {
        let outcome = self.match_state.award_point(side);
        if outcome == PointOutcome::Ignored {
            return;
        }

        if let Some(profile) = self.ai.profile.as_mut() {
            profile.record_outcome(match side {
                Side::Ai => RallyOutcome::Win,
                Side::Player => RallyOutcome::Loss,
            });
        }

        self.events.push(GameEvent::PointScored { side });
        info!(
            ?side,
            player = self.match_state.player_points,
            ai = self.match_state.ai_points,
            "point scored"
        );

        match outcome {
            PointOutcome::SetWon(winner) => {
                self.events.push(GameEvent::SetWon { side: winner });
                info!(
                    ?winner,
                    player_sets = self.match_state.player_sets,
                    ai_sets = self.match_state.ai_sets,
                    "set won"
                );
            }
            PointOutcome::MatchOver(result) => {
                self.events.push(GameEvent::SetWon { side: result.winner });
                self.events.push(GameEvent::MatchOver { result });
                info!(
                    winner = ?result.winner,
                    player_sets = result.player_sets,
                    ai_sets = result.ai_sets,
                    "match over"
                );
            }
            PointOutcome::Point | PointOutcome::Ignored => {}
        }

        self.phase = MatchState::phase_after(outcome, &self.config.rules);
    }

    /// Reset ball and actors and put a new ball in play
    fn serve(&mut self) {
        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let vx = direction * (2.0 + self.rng.gen::<f32>() * 3.0);
        let vy = 2.0 + self.rng.gen::<f32>() * 2.0;

        self.ball.serve(Vec2::new(vx, vy));
        self.player.reset_position();
        self.ai.reset_position();
        if let Some(profile) = self.ai.profile.as_mut() {
            profile.reset_rally();
        }

        self.phase = SimulationPhase::Serving;
        debug!(vx, vy, set = self.match_state.current_set, "serve");
    }

    pub fn snapshot(&self) -> Snapshot {
        let profile = self.ai.profile.as_ref();
        Snapshot {
            tick: self.tick,
            phase: self.phase,
            paused: self.paused,
            ball: BallSnapshot {
                pos: self.ball.pos,
                vel: self.ball.vel,
                trail: self.ball.trail.iter().copied().collect(),
            },
            player: ActorSnapshot::of(&self.player),
            ai: ActorSnapshot::of(&self.ai),
            score: Tally {
                player: self.match_state.player_points,
                ai: self.match_state.ai_points,
            },
            sets: Tally {
                player: self.match_state.player_sets,
                ai: self.match_state.ai_sets,
            },
            current_set: self.match_state.current_set,
            ai_tactic: profile.and_then(|p| p.active_tactic),
            ai_mood: profile.map(|p| p.mood).unwrap_or_default(),
            events: self.events.clone(),
        }
    }

    /// What a bot standing in for the human sees
    pub fn player_view(&self) -> CourtView<'_> {
        CourtView {
            ball: &self.ball,
            me: &self.player,
        }
    }

    /// Events produced by the latest tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.match_state.result
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn opponent(&self) -> &Actor {
        &self.ai
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::game::actor::UPPER_LEFT;
    use crate::game::input::{InputAction, Movement, IDLE_FRICTION};

    fn sim() -> Simulation {
        Simulation::new(Config::default().with_seed(42)).unwrap()
    }

    fn positions(sim: &Simulation) -> (Vec2, Vec2, Vec2) {
        (sim.ball.pos, sim.player.pos, sim.ai.pos)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.rules.target_points = 0;
        assert_eq!(
            Simulation::new(config).err(),
            Some(ConfigError::InvalidTargetPoints(0))
        );

        let mut config = Config::default();
        config.rules.sets_to_win = 0;
        assert!(Simulation::new(config).is_err());

        let mut sim = sim();
        let mut bad = Config::default();
        bad.physics.ball_bounce = 1.5;
        assert!(sim.reconfigure(bad).is_err());
        assert_eq!(sim.config().seed, 42);
    }

    #[test]
    fn test_ready_phase_is_frozen() {
        let mut sim = sim();
        let before = positions(&sim);
        for _ in 0..30 {
            sim.step(&Intent::moving(Movement::Right));
        }
        assert_eq!(positions(&sim), before);
        assert_eq!(sim.phase(), SimulationPhase::Ready);
    }

    #[test]
    fn test_serve_then_rally() {
        let mut sim = sim();
        sim.start();
        assert_eq!(sim.phase(), SimulationPhase::Serving);
        assert_eq!(sim.ball.pos, Vec2::new(400.0, 200.0));
        let vx = sim.ball.vel.x.abs();
        assert!((2.0..5.0).contains(&vx));
        assert!((2.0..4.0).contains(&sim.ball.vel.y));

        sim.step(&Intent::idle());
        assert_eq!(sim.phase(), SimulationPhase::Rallying);
        assert_ne!(sim.ball.pos, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_floor_landing_scores_for_the_other_side() {
        let mut sim = sim();
        sim.start();
        sim.ball.pos = Vec2::new(600.0, 575.0);
        sim.ball.vel = Vec2::new(0.0, 5.0);

        sim.step(&Intent::idle());
        assert!(sim.events().contains(&GameEvent::PointScored { side: Side::Player }));
        assert_eq!(sim.match_state().player_points, 1);
        assert_eq!(
            sim.phase(),
            SimulationPhase::PointPause {
                remaining: MatchConfig::default().point_pause_ticks
            }
        );
    }

    #[test]
    fn test_point_pause_freezes_then_serves() {
        let mut sim = sim();
        sim.start();
        sim.ball.pos = Vec2::new(100.0, 575.0);
        sim.ball.vel = Vec2::new(0.0, 5.0);
        sim.step(&Intent::idle());
        assert_eq!(sim.match_state().ai_points, 1);

        let frozen = positions(&sim);
        for _ in 0..119 {
            sim.step(&Intent::moving(Movement::Left).with_jump());
            assert_eq!(positions(&sim), frozen);
        }
        sim.step(&Intent::idle());
        assert_eq!(sim.phase(), SimulationPhase::Serving);
        assert_eq!(sim.ball.pos, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_opponent_learns_from_points() {
        let mut sim = sim();
        sim.start();
        sim.score_point(Side::Ai);
        sim.score_point(Side::Player);
        let profile = sim.ai.profile.as_ref().unwrap();
        let outcomes: Vec<_> = profile.outcomes().iter().copied().collect();
        assert_eq!(outcomes, vec![RallyOutcome::Win, RallyOutcome::Loss]);
    }

    #[test]
    fn test_two_shutout_sets_end_the_match() {
        let mut sim = sim();
        sim.start();

        for _ in 0..11 {
            sim.events.clear();
            sim.score_point(Side::Ai);
        }
        assert!(sim.events().contains(&GameEvent::SetWon { side: Side::Ai }));
        assert_eq!(sim.match_state().current_set, 2);
        assert!(matches!(sim.phase(), SimulationPhase::SetTransition { .. }));

        for _ in 0..11 {
            sim.events.clear();
            sim.score_point(Side::Ai);
        }
        let expected = MatchResult {
            winner: Side::Ai,
            player_sets: 0,
            ai_sets: 2,
        };
        assert!(sim.events().contains(&GameEvent::MatchOver { result: expected }));
        assert_eq!(sim.phase(), SimulationPhase::MatchOver);
        assert_eq!(sim.result(), Some(expected));

        // Nothing moves or scores once the match is over
        let frozen = positions(&sim);
        sim.step(&Intent::idle());
        assert_eq!(positions(&sim), frozen);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_player_swing_returns_ball() {
        let mut sim = sim();
        sim.start();
        sim.ball.pos = sim.player.torso() + Vec2::new(10.0, -10.0);
        sim.ball.vel = Vec2::ZERO;

        sim.step(&Intent::moving(Movement::Right).with_swing());
        let events = sim.events();
        assert!(events.contains(&GameEvent::Swung { by: Side::Player }));
        assert!(events.contains(&GameEvent::BallHit { by: Side::Player }));
        assert!(sim.ball.vel.x > 5.0);
        assert!(sim.ball.vel.y < -5.0);
    }

    #[test]
    fn test_idle_swing_sends_ball_up_left() {
        let mut sim = sim();
        sim.start();
        sim.ball.pos = sim.player.torso() + Vec2::new(-10.0, -10.0);
        sim.ball.vel = Vec2::ZERO;

        sim.step(&Intent::from_actions(&[InputAction::SwingRequested]));
        assert!(sim.events().contains(&GameEvent::BallHit { by: Side::Player }));

        // Gravity has already acted once on the outgoing velocity
        let launch = Vec2::new(sim.ball.vel.x, sim.ball.vel.y - sim.ball.gravity);
        assert!((launch.angle() - UPPER_LEFT).abs() < 1e-4);
        assert!((launch.length() - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_host_cannot_boost_human_speed() {
        let mut sim = sim();
        sim.start();
        let x = sim.player.pos.x;
        sim.step(&Intent::moving(Movement::Right).with_throttle(4.0));
        assert!((sim.player.pos.x - x - 5.0).abs() < 1e-4);

        sim.step(&Intent::moving(Movement::Right).with_throttle(f32::NAN));
        assert!(sim.player.pos.x.is_finite());

        let vx = sim.player.vel.x;
        sim.step(&Intent::idle().with_friction(1.0));
        assert!((sim.player.vel.x - vx * IDLE_FRICTION).abs() < 1e-4);
    }

    #[test]
    fn test_human_swing_sampled_before_the_hit() {
        let mut sim = sim();
        sim.start();
        let start_x = sim.player.pos.x;
        let ball_x = sim.player.torso().x + 10.0;
        sim.ball.pos = Vec2::new(ball_x, sim.player.torso().y - 10.0);
        sim.ball.vel = Vec2::ZERO;

        sim.step(&Intent::moving(Movement::Right).with_swing());
        let profile = sim.ai.profile.as_ref().unwrap();
        let samples: Vec<_> = profile.hit_samples().copied().collect();
        assert_eq!(
            samples,
            vec![HitSample {
                player_x: start_x,
                ball_x,
            }]
        );

        // Holding the swing does not add samples
        sim.step(&Intent::idle().with_swing());
        assert_eq!(sim.ai.profile.as_ref().unwrap().hit_samples().count(), 1);
    }

    #[test]
    fn test_swing_on_scoring_tick_is_still_sampled() {
        let mut sim = sim();
        sim.start();
        sim.ball.pos = Vec2::new(600.0, 575.0);
        sim.ball.vel = Vec2::new(0.0, 5.0);

        sim.step(&Intent::idle().with_swing());
        assert!(sim.events().contains(&GameEvent::PointScored { side: Side::Player }));
        assert_eq!(sim.ai.profile.as_ref().unwrap().hit_samples().count(), 1);
    }

    #[test]
    fn test_huge_target_points_does_not_panic() {
        let mut config = Config::default();
        config.rules.target_points = u32::MAX;
        let mut sim = Simulation::new(config).unwrap();
        sim.start();
        for _ in 0..120 {
            sim.step(&Intent::idle());
        }
        assert_eq!(sim.result(), None);
    }

    #[test]
    fn test_pause_makes_step_a_no_op() {
        let mut sim = sim();
        sim.start();
        sim.step(&Intent::idle());

        assert!(sim.toggle_pause());
        let frozen = positions(&sim);
        let tick = sim.tick();
        for _ in 0..50 {
            sim.step(&Intent::moving(Movement::Left));
        }
        assert_eq!(positions(&sim), frozen);
        assert_eq!(sim.tick(), tick);

        assert!(!sim.toggle_pause());
        sim.step(&Intent::idle());
        assert_ne!(positions(&sim).0, frozen.0);
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut sim = sim();
        let run = |sim: &mut Simulation| {
            sim.start();
            for _ in 0..600 {
                sim.step(&Intent::idle());
            }
            serde_json::to_string(&sim.snapshot()).unwrap()
        };

        let first = run(&mut sim);
        sim.reset();
        assert_eq!(sim.phase(), SimulationPhase::Ready);
        let second = run(&mut sim);
        assert_eq!(first, second);
    }

    #[test]
    fn test_idle_human_match_runs_to_completion() {
        let config = Config::default().with_seed(7);
        let mut sim = Simulation::new(config).unwrap();
        sim.start();

        let mut ticks = 0;
        while sim.result().is_none() && ticks < 200_000 {
            sim.step(&Intent::idle());
            ticks += 1;
        }

        let result = sim.result().expect("match should finish");
        assert_eq!(sim.match_state().sets(result.winner), 2);
        assert!(sim.match_state().sets(result.winner.opponent()) < 2);
        assert_eq!(sim.phase(), SimulationPhase::MatchOver);
        assert!(sim.match_state().ai_points_won > 0);
    }

    #[test]
    fn test_start_after_match_over_begins_fresh() {
        let rules = MatchConfig {
            target_points: 1,
            sets_to_win: 1,
            ..MatchConfig::default()
        };
        let mut sim = Simulation::new(Config {
            rules,
            ..Config::default()
        })
        .unwrap();
        sim.start();
        sim.score_point(Side::Player);
        assert_eq!(sim.phase(), SimulationPhase::MatchOver);

        sim.start();
        assert_eq!(sim.phase(), SimulationPhase::Serving);
        assert_eq!(sim.result(), None);
        assert!(sim.ai.profile.as_ref().unwrap().outcomes().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = sim();
        sim.start();
        sim.step(&Intent::idle());
        let json = serde_json::to_value(sim.snapshot()).unwrap();
        assert_eq!(json["phase"]["phase"], "rallying");
        assert_eq!(json["ball"]["trail"].as_array().unwrap().len(), 1);
    }
}
