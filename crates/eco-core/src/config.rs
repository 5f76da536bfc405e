//! Configuration types for the simulation.
//!
//! The binary always runs with the `Default` values below; the structs exist
//! so that tests can build small, deterministic worlds.

use crate::error::{Error, Result};
use crate::types::Hunger;
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square, toroidal grid
    pub size: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { size: 10 }
    }
}

/// Initial seeding and per-tick population maintenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Food placed at random cells before the first tick
    pub initial_food: usize,
    /// Prey placed at random cells before the first tick
    pub initial_prey: usize,
    /// Predators placed at random cells before the first tick
    pub initial_predators: usize,
    /// Random cell picks made by food replenishment each tick
    pub food_per_tick: usize,
    /// Prey floor enforced after every tick
    pub min_prey: usize,
    /// Predator floor enforced after every tick
    pub min_predators: usize,
    /// Random cell picks the prey floor may spend in one tick
    pub floor_attempt_limit: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_food: 15,
            initial_prey: 10,
            initial_predators: 5,
            food_per_tick: 5,
            min_prey: 5,
            min_predators: 5,
            floor_attempt_limit: 1000,
        }
    }
}

/// Lifespans, hunger economy and movement rules of the actors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetabolismConfig {
    /// Acts a food item survives
    pub food_lifespan: u32,
    pub prey_initial_hunger: Hunger,
    pub predator_initial_hunger: Hunger,
    /// Hunger lost by prey and predators on every act
    pub hunger_decay: Hunger,
    /// Hunger gained by a prey eating food
    pub prey_food_gain: Hunger,
    /// Hunger gained by a predator eating prey
    pub predator_prey_gain: Hunger,
    /// Below this hunger a predator uses its sprint range
    pub predator_sprint_threshold: Hunger,
    pub predator_walk_range: i32,
    pub predator_sprint_range: i32,
    /// Random destinations a predator tries per act
    pub predator_move_attempts: usize,
    /// A predator reproduces once its prey count exceeds this value
    pub predator_reproduction_threshold: u32,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            food_lifespan: 5,
            prey_initial_hunger: Hunger::from_tenths(10),
            predator_initial_hunger: Hunger::from_tenths(20),
            hunger_decay: Hunger::from_tenths(2),
            prey_food_gain: Hunger::from_tenths(2),
            predator_prey_gain: Hunger::from_tenths(4),
            predator_sprint_threshold: Hunger::from_tenths(5),
            predator_walk_range: 1,
            predator_sprint_range: 2,
            predator_move_attempts: 5,
            predator_reproduction_threshold: 2,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible runs; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Wall-clock pause between rendered ticks
    pub tick_interval_ms: u64,
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub metabolism: MetabolismConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: 2000,
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            metabolism: MetabolismConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.world.size < 1 {
            return Err(Error::InvalidConfig(format!(
                "grid size must be at least 1, got {}",
                self.world.size
            )));
        }

        let m = &self.metabolism;
        if m.food_lifespan == 0 {
            return Err(Error::InvalidConfig("food lifespan must be positive".into()));
        }
        if m.prey_initial_hunger.is_exhausted() || m.predator_initial_hunger.is_exhausted() {
            return Err(Error::InvalidConfig(
                "initial hunger must be above zero".into(),
            ));
        }
        if m.hunger_decay.tenths() < 0 || m.prey_food_gain.tenths() < 0 || m.predator_prey_gain.tenths() < 0 {
            return Err(Error::InvalidConfig(
                "hunger decay and gains cannot be negative".into(),
            ));
        }
        if m.predator_walk_range < 1 || m.predator_sprint_range < 1 {
            return Err(Error::InvalidConfig(
                "predator movement ranges must be at least 1".into(),
            ));
        }
        if m.predator_move_attempts == 0 {
            return Err(Error::InvalidConfig(
                "predators need at least one move attempt".into(),
            ));
        }

        Ok(())
    }
}
