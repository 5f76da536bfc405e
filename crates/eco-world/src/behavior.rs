//! Per-tick behavior of food, prey and predators.
//!
//! Each behavior reads the acting actor from its cell, decides, and writes
//! the result back. The actor stays in its origin cell while it looks for a
//! destination, so a destination that wraps back onto the origin is seen as
//! occupied by the actor itself.

use crate::actor::{Actor, ActorState};
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::stats::TickStats;
use eco_core::{Hunger, MetabolismConfig, Position, Species};
use tracing::trace;

/// Run the behavior of whatever occupies `pos`, if anything
pub fn act<R: RandomSource>(
    grid: &mut Grid,
    pos: Position,
    rng: &mut R,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) {
    let Some(actor) = grid.get(pos).copied() else {
        return;
    };

    match actor.state {
        ActorState::Food { lifespan } => act_food(grid, actor.position, lifespan, stats),
        ActorState::Prey { hunger } => act_prey(grid, actor.position, hunger, rng, rules, stats),
        ActorState::Predator {
            hunger,
            prey_eaten,
            has_reproduced,
        } => act_predator(
            grid,
            actor.position,
            PredatorState {
                hunger,
                prey_eaten,
                has_reproduced,
            },
            rng,
            rules,
            stats,
        ),
    }
}

fn act_food(grid: &mut Grid, origin: Position, lifespan: u32, stats: &mut TickStats) {
    let remaining = lifespan.saturating_sub(1);
    if remaining == 0 {
        grid.clear(origin);
        stats.food_expired += 1;
        trace!(position = %origin, "Food expired");
        return;
    }

    if let Some(food) = grid.get_mut(origin) {
        food.state = ActorState::Food { lifespan: remaining };
    }
}

fn act_prey<R: RandomSource>(
    grid: &mut Grid,
    origin: Position,
    mut hunger: Hunger,
    rng: &mut R,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) {
    if hunger.is_exhausted() {
        grid.clear(origin);
        stats.prey_starved += 1;
        trace!(position = %origin, "Prey starved");
        return;
    }

    let dx = rng.offset(1);
    let dy = rng.offset(1);
    let destination = grid.wrap(origin.add(dx, dy));

    let mut position = origin;
    let occupant = grid.species_at(destination);
    match occupant {
        None | Some(Species::Food) => {
            if occupant == Some(Species::Food) {
                hunger += rules.prey_food_gain;
                stats.food_eaten += 1;
                trace!(position = %destination, "Prey ate food");
            }
            grid.clear(origin);
            position = destination;
        }
        Some(Species::Prey | Species::Predator) => {}
    }

    hunger -= rules.hunger_decay;
    grid.set(
        position,
        Actor {
            position,
            state: ActorState::Prey { hunger },
        },
    );
}

struct PredatorState {
    hunger: Hunger,
    prey_eaten: u32,
    has_reproduced: bool,
}

fn act_predator<R: RandomSource>(
    grid: &mut Grid,
    origin: Position,
    mut state: PredatorState,
    rng: &mut R,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) {
    if state.hunger.is_exhausted() {
        grid.clear(origin);
        stats.predators_starved += 1;
        trace!(position = %origin, "Predator starved");
        return;
    }

    let range = if state.hunger < rules.predator_sprint_threshold {
        rules.predator_sprint_range
    } else {
        rules.predator_walk_range
    };

    let mut position = origin;
    for _ in 0..rules.predator_move_attempts {
        let dx = rng.offset(range);
        let dy = rng.offset(range);
        if dx == 0 && dy == 0 {
            continue;
        }

        let destination = grid.wrap(origin.add(dx, dy));
        let occupant = grid.species_at(destination);
        if matches!(occupant, Some(Species::Food | Species::Predator)) {
            continue;
        }

        let mut breeds = false;
        if occupant == Some(Species::Prey) {
            state.hunger += rules.predator_prey_gain;
            state.prey_eaten += 1;
            stats.prey_eaten += 1;
            trace!(position = %destination, prey_eaten = state.prey_eaten, "Predator ate prey");

            if state.prey_eaten > rules.predator_reproduction_threshold && !state.has_reproduced {
                state.has_reproduced = true;
                breeds = true;
            }
        }

        // Offspring takes the origin first, then the parent moves out.
        if breeds {
            grid.set(origin, Actor::predator(origin, rules));
            stats.offspring_born += 1;
            trace!(position = %origin, "Predator offspring born");
        } else {
            grid.clear(origin);
        }
        position = destination;
        break;
    }

    state.hunger -= rules.hunger_decay;
    grid.set(
        position,
        Actor {
            position,
            state: ActorState::Predator {
                hunger: state.hunger,
                prey_eaten: state.prey_eaten,
                has_reproduced: state.has_reproduced,
            },
        },
    );
}
