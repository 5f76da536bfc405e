//! World simulation engine.
//!
//! This module implements the toroidal grid where food, prey and predators
//! live, eat, breed and starve.

pub mod actor;
pub mod behavior;
pub mod grid;
pub mod maintenance;
pub mod random;
pub mod simulation;
pub mod stats;

pub use actor::{Actor, ActorState};
pub use grid::Grid;
pub use maintenance::FloorOutcome;
pub use random::RandomSource;
pub use simulation::{Simulation, SEPARATOR};
pub use stats::{Census, TickStats};
