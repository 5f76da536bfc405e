//! Population counts and per-tick event tallies.

use eco_core::Species;

/// Number of occupied cells per species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub food: usize,
    pub prey: usize,
    pub predators: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.food + self.prey + self.predators
    }

    pub(crate) fn record(&mut self, species: Species) {
        match species {
            Species::Food => self.food += 1,
            Species::Prey => self.prey += 1,
            Species::Predator => self.predators += 1,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Tick number, starting at 1
    pub tick: u64,
    pub food_expired: u32,
    pub food_eaten: u32,
    pub prey_starved: u32,
    pub prey_eaten: u32,
    pub predators_starved: u32,
    pub offspring_born: u32,
    pub food_spawned: u32,
    pub prey_spawned: u32,
    pub predators_spawned: u32,
    /// Population after maintenance
    pub census: Census,
}

impl TickStats {
    pub fn deaths(&self) -> u32 {
        self.food_expired + self.prey_starved + self.predators_starved
    }
}
