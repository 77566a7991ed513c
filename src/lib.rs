//! Stickminton: a two-actor badminton-style simulation core.
//!
//! [`game::Simulation`] owns the ball, both stick figures and the match
//! state, and is advanced one tick at a time with the human's [`game::Intent`].
//! The opponent is driven by the adaptive decision engine in [`ai`].

pub mod ai;
pub mod config;
pub mod debug;
pub mod error;
pub mod game;
pub mod game_modes;

pub use config::{Config, Difficulty};
pub use error::{ConfigError, ConfigLoadError};
pub use game::{GameEvent, Intent, MatchResult, Simulation, SimulationPhase, Snapshot};
