use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::info;

use stickminton::ai::BotType;
use stickminton::config::{self, Difficulty};
use stickminton::debug;
use stickminton::game_modes::{run_headless, HeadlessOptions};

/// Command line settings layered over the config file
#[derive(Debug, Default)]
struct Args {
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    max_ticks: Option<u64>,
    bot: BotType,
    trace: bool,
    debug: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args)? else {
        return Ok(());
    };

    debug::init(args.debug).context("failed to initialise logging")?;

    let mut config = config::load_config().context("failed to load configuration")?;
    if let Some(difficulty) = args.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut options = HeadlessOptions {
        bot_type: args.bot,
        trace: args.trace,
        ..HeadlessOptions::default()
    };
    if let Some(max_ticks) = args.max_ticks {
        options.max_ticks = max_ticks;
    }

    info!(
        difficulty = config.ai.difficulty.display_name(),
        seed = config.seed,
        bot = args.bot.display_name(),
        "starting headless match"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run_headless(&config, &options, &mut out)?;
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;

    Ok(())
}

/// Parse command line arguments; `None` means usage was printed
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let program = args.first().map(String::as_str).unwrap_or("stickminton");
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--difficulty" | "-d" => {
                let value = iter.next().context("--difficulty requires a value")?;
                parsed.difficulty = Some(value.parse()?);
            }
            "--seed" | "-s" => {
                let value = iter.next().context("--seed requires a value")?;
                parsed.seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--max-ticks" => {
                let value = iter.next().context("--max-ticks requires a value")?;
                parsed.max_ticks =
                    Some(value.parse().context("--max-ticks must be an integer")?);
            }
            "--bot" | "-b" => {
                let value = iter.next().context("--bot requires a value")?;
                parsed.bot = value.parse().map_err(anyhow::Error::msg)?;
            }
            "--trace" => parsed.trace = true,
            "--debug" => parsed.debug = true,
            "--help" | "-h" => {
                print_usage(program);
                return Ok(None);
            }
            other => {
                print_usage(program);
                bail!("unknown argument: {}", other);
            }
        }
    }

    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    println!("Stickminton - headless match runner");
    println!();
    println!("Usage:");
    println!(
        "  {} [--difficulty easy|medium|hard] [--seed N] [--max-ticks N]",
        program
    );
    println!("     [--bot autopilot|idle] [--trace] [--debug]");
    println!();
    println!("Options:");
    println!("  --difficulty  Opponent difficulty (overrides the config file)");
    println!("  --seed        RNG seed; the same seed replays the same match");
    println!("  --max-ticks   Stop after this many ticks");
    println!("  --bot         Who plays the human side");
    println!("  --trace       Print a JSON snapshot for every tick with events");
    println!("  --debug       Write debug logs to {}", debug::LOG_FILE_PATH);
    println!();
    println!("Config file: {}", config::get_config_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("stickminton")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let parsed = parse_args(&args(&[
            "--difficulty",
            "hard",
            "--seed",
            "9",
            "--bot",
            "idle",
            "--max-ticks",
            "500",
            "--trace",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.difficulty, Some(Difficulty::Hard));
        assert_eq!(parsed.seed, Some(9));
        assert_eq!(parsed.bot, BotType::Idle);
        assert_eq!(parsed.max_ticks, Some(500));
        assert!(parsed.trace);
        assert!(!parsed.debug);
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        assert!(parse_args(&args(&["--difficulty", "nightmare"])).is_err());
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
