use std::io::{self, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::ai::{self, BotType};
use crate::config::{Config, Difficulty};
use crate::game::{MatchResult, Simulation};

/// Settings for one unattended match
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub bot_type: BotType,
    /// Give up after this many ticks
    pub max_ticks: u64,
    /// Write one JSON snapshot per tick that produced events
    pub trace: bool,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            bot_type: BotType::Autopilot,
            max_ticks: 1_000_000,
            trace: false,
        }
    }
}

/// Summary printed when a headless match ends
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub bot: String,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub ticks: u64,
    /// `None` when the tick limit ran out first
    pub result: Option<MatchResult>,
    pub player_points_won: u32,
    pub ai_points_won: u32,
}

/// Play one match with a bot on the human side
///
/// Snapshots go to `trace_out` when tracing is on; the report is returned
/// for the caller to print.
pub fn run_headless<W: Write>(
    config: &Config,
    options: &HeadlessOptions,
    trace_out: &mut W,
) -> io::Result<HeadlessReport> {
    let mut sim = Simulation::new(config.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut bot = ai::create_bot(options.bot_type);
    bot.reset();

    info!(bot = bot.name(), max_ticks = options.max_ticks, "headless match");
    sim.start();

    while sim.result().is_none() && sim.tick() < options.max_ticks {
        let intent = bot.decide(&sim.player_view());
        sim.step(&intent);

        if options.trace && !sim.events().is_empty() {
            serde_json::to_writer(&mut *trace_out, &sim.snapshot())?;
            writeln!(trace_out)?;
        }
    }

    if sim.result().is_none() {
        warn!(ticks = sim.tick(), "tick limit reached before the match ended");
    }

    let state = sim.match_state();
    Ok(HeadlessReport {
        bot: bot.name().to_string(),
        difficulty: config.ai.difficulty,
        seed: config.seed,
        ticks: sim.tick(),
        result: sim.result(),
        player_points_won: state.player_points_won,
        ai_points_won: state.ai_points_won,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    fn short_match() -> Config {
        Config {
            rules: MatchConfig {
                target_points: 3,
                sets_to_win: 1,
                point_pause_ticks: 5,
                set_transition_ticks: 5,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_short_match_finishes_with_report() {
        let options = HeadlessOptions {
            bot_type: BotType::Idle,
            ..HeadlessOptions::default()
        };
        let mut sink = Vec::new();
        let report = run_headless(&short_match(), &options, &mut sink).unwrap();

        let result = report.result.unwrap();
        assert_eq!(result.player_sets + result.ai_sets, 1);
        assert_eq!(report.player_points_won.max(report.ai_points_won), 3);
        assert_eq!(report.bot, "Idle");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_trace_writes_one_json_line_per_eventful_tick() {
        let options = HeadlessOptions {
            bot_type: BotType::Autopilot,
            trace: true,
            ..HeadlessOptions::default()
        };
        let mut sink = Vec::new();
        run_headless(&short_match(), &options, &mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(!lines.is_empty());
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(!value["events"].as_array().unwrap().is_empty());
        }
        assert!(text.contains("\"MatchOver\""));
    }

    #[test]
    fn test_tick_limit_stops_unfinished_match() {
        let options = HeadlessOptions {
            max_ticks: 10,
            ..HeadlessOptions::default()
        };
        let report = run_headless(&Config::default(), &options, &mut io::sink()).unwrap();
        assert_eq!(report.ticks, 10);
        assert!(report.result.is_none());
    }

    #[test]
    fn test_invalid_config_is_an_input_error() {
        let mut config = Config::default();
        config.rules.sets_to_win = 0;
        let err = run_headless(&config, &HeadlessOptions::default(), &mut io::sink()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
