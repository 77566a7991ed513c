// Idle bot - never moves, useful for soak runs

use super::bot::{Bot, CourtView};
use crate::game::Intent;

/// A bot that stands still and never swings
#[derive(Debug, Default)]
pub struct IdleBot;

impl IdleBot {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for IdleBot {
    fn decide(&mut self, _view: &CourtView<'_>) -> Intent {
        Intent::idle()
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Idle"
    }
}
