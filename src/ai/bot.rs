// Bot trait for scripted human-side players

use crate::game::{Actor, Ball, Intent};

/// What a bot can see on one tick
#[derive(Debug, Clone, Copy)]
pub struct CourtView<'a> {
    pub ball: &'a Ball,
    /// The actor the bot controls
    pub me: &'a Actor,
}

/// Trait for bots that stand in for the human player
///
/// Used by the headless runner so matches can be played without input.
/// Bots may keep internal state between ticks.
pub trait Bot {
    /// Decide the intent for this tick
    fn decide(&mut self, view: &CourtView<'_>) -> Intent;

    /// Reset internal state (called when a new match starts)
    fn reset(&mut self);

    /// Bot name for logs and output
    fn name(&self) -> &str;
}
