//! Initial seeding and the population maintenance run after every act pass.

use crate::actor::Actor;
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::stats::TickStats;
use eco_core::{MetabolismConfig, PopulationConfig, Position, Species};
use tracing::{trace, warn};

/// How a population floor pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorOutcome {
    Met,
    /// No cell the floor may use is empty
    NoRoom,
    /// Empty cells remain but the random pick budget ran out
    OutOfAttempts,
}

/// Scatter the starting population: food, then prey, then predators.
///
/// Cells are drawn independently, so a later placement can overwrite an
/// earlier one and the effective counts may fall short of the configuration.
pub fn seed_population<R: RandomSource>(
    grid: &mut Grid,
    rng: &mut R,
    population: &PopulationConfig,
    rules: &MetabolismConfig,
) {
    let waves = [
        (Species::Food, population.initial_food),
        (Species::Prey, population.initial_prey),
        (Species::Predator, population.initial_predators),
    ];

    for (species, count) in waves {
        for _ in 0..count {
            let pos = rng.position(grid.size());
            grid.set(pos, Actor::spawn(species, pos, rules));
        }
    }
}

/// Drop new food on randomly picked cells that happen to be empty
pub fn replenish_food<R: RandomSource>(
    grid: &mut Grid,
    rng: &mut R,
    population: &PopulationConfig,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) {
    for _ in 0..population.food_per_tick {
        let pos = rng.position(grid.size());
        if grid.is_empty(pos) {
            grid.set(pos, Actor::food(pos, rules));
            stats.food_spawned += 1;
        }
    }
}

/// Top prey up to the floor at random empty cells.
///
/// Gives up once the grid has no empty cell or the attempt budget is spent.
pub fn enforce_prey_floor<R: RandomSource>(
    grid: &mut Grid,
    rng: &mut R,
    population: &PopulationConfig,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) -> FloorOutcome {
    let mut count = grid.count(Species::Prey);
    let mut empty = grid.empty_count();
    let mut attempts = 0;

    while count < population.min_prey {
        if empty == 0 {
            warn!(
                prey = count,
                floor = population.min_prey,
                "Prey floor not met, grid is full"
            );
            return FloorOutcome::NoRoom;
        }
        if attempts >= population.floor_attempt_limit {
            warn!(
                prey = count,
                floor = population.min_prey,
                empty,
                attempts,
                "Prey floor not met, attempt limit reached"
            );
            return FloorOutcome::OutOfAttempts;
        }
        attempts += 1;

        let pos = rng.position(grid.size());
        if grid.is_empty(pos) {
            grid.set(pos, Actor::prey(pos, rules));
            count += 1;
            empty -= 1;
            stats.prey_spawned += 1;
            trace!(position = %pos, "Prey spawned by floor");
        }
    }

    FloorOutcome::Met
}

/// Top predators up to the floor along the left and right edges.
///
/// Rows are scanned top to bottom, checking column 0 before the last
/// column of each row.
pub fn enforce_predator_floor(
    grid: &mut Grid,
    population: &PopulationConfig,
    rules: &MetabolismConfig,
    stats: &mut TickStats,
) -> FloorOutcome {
    let mut count = grid.count(Species::Predator);
    if count >= population.min_predators {
        return FloorOutcome::Met;
    }

    let last = grid.size() - 1;
    let edge_cells: Vec<Position> = (0..grid.size())
        .flat_map(|row| [Position::at(row, 0), Position::at(row, last)])
        .collect();

    for pos in edge_cells {
        if count >= population.min_predators {
            break;
        }
        if grid.is_empty(pos) {
            grid.set(pos, Actor::predator(pos, rules));
            count += 1;
            stats.predators_spawned += 1;
            trace!(position = %pos, "Predator spawned by floor");
        }
    }

    if count < population.min_predators {
        warn!(
            predators = count,
            floor = population.min_predators,
            "Predator floor not met, every edge cell is occupied"
        );
        return FloorOutcome::NoRoom;
    }

    FloorOutcome::Met
}
