pub mod actor;
pub mod events;
pub mod input;
pub mod kinematics;
pub mod physics;
pub mod rules;
pub mod simulation;
pub mod state;

pub use events::{GameEvent, MatchResult, Surface};
pub use input::{InputAction, Intent, Movement};
pub use kinematics::Vec2;
pub use rules::{MatchState, SimulationPhase};
pub use simulation::{Simulation, Snapshot};
pub use state::{
    Actor, Ball, NetBounds, Side, COURT_CENTER_X, COURT_WIDTH, PLAYER_MAX_X, PLAYER_MIN_X,
};
