//! Actor state and constructors.

use eco_core::{Hunger, MetabolismConfig, Position, Species};

/// Per-kind state carried by an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Food {
        lifespan: u32,
    },
    Prey {
        hunger: Hunger,
    },
    Predator {
        hunger: Hunger,
        prey_eaten: u32,
        has_reproduced: bool,
    },
}

/// An occupant of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Always equal to the cell holding this actor
    pub position: Position,
    pub state: ActorState,
}

impl Actor {
    pub fn food(position: Position, rules: &MetabolismConfig) -> Self {
        Self {
            position,
            state: ActorState::Food {
                lifespan: rules.food_lifespan,
            },
        }
    }

    pub fn prey(position: Position, rules: &MetabolismConfig) -> Self {
        Self {
            position,
            state: ActorState::Prey {
                hunger: rules.prey_initial_hunger,
            },
        }
    }

    pub fn predator(position: Position, rules: &MetabolismConfig) -> Self {
        Self {
            position,
            state: ActorState::Predator {
                hunger: rules.predator_initial_hunger,
                prey_eaten: 0,
                has_reproduced: false,
            },
        }
    }

    /// Build a fresh actor of the given species
    pub fn spawn(species: Species, position: Position, rules: &MetabolismConfig) -> Self {
        match species {
            Species::Food => Self::food(position, rules),
            Species::Prey => Self::prey(position, rules),
            Species::Predator => Self::predator(position, rules),
        }
    }

    pub fn species(&self) -> Species {
        match self.state {
            ActorState::Food { .. } => Species::Food,
            ActorState::Prey { .. } => Species::Prey,
            ActorState::Predator { .. } => Species::Predator,
        }
    }

    /// Hunger of a mobile actor; food has none
    pub fn hunger(&self) -> Option<Hunger> {
        match self.state {
            ActorState::Food { .. } => None,
            ActorState::Prey { hunger } | ActorState::Predator { hunger, .. } => Some(hunger),
        }
    }
}
