//! Simulation engine: the tick driver over the grid.

use crate::actor::Actor;
use crate::behavior;
use crate::grid::Grid;
use crate::maintenance::{self, FloorOutcome};
use crate::random::RandomSource;
use crate::stats::{Census, TickStats};
use eco_core::{Position, Result, SimulationConfig, Species};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::mem;
use tracing::{debug, info, instrument};

/// Line printed under every rendered grid
pub const SEPARATOR: &str = "=========================";

pub struct Simulation<R = ChaCha8Rng> {
    grid: Grid,
    config: SimulationConfig,
    rng: R,
    tick: u64,
    // Events since the last completed tick
    pending: TickStats,
}

impl Simulation<ChaCha8Rng> {
    /// Build a simulation and scatter its starting population.
    ///
    /// Seeds the generator from `config.seed` when set, otherwise from OS
    /// entropy.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut sim = Self::with_rng(config, rng)?;
        sim.seed_population();

        info!(
            size = sim.grid.size(),
            seeded = sim.config.seed.is_some(),
            food = sim.census().food,
            prey = sim.census().prey,
            predators = sim.census().predators,
            "Simulation initialized"
        );

        Ok(sim)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Build a simulation with an empty grid and the given random source
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grid: Grid::new(config.world.size),
            config,
            rng,
            tick: 0,
            pending: TickStats::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }

    /// Place a fresh actor, replacing whatever held the cell
    pub fn place(&mut self, species: Species, pos: Position) {
        let actor = Actor::spawn(species, pos, &self.config.metabolism);
        self.grid.set(pos, actor);
    }

    pub fn seed_population(&mut self) {
        maintenance::seed_population(
            &mut self.grid,
            &mut self.rng,
            &self.config.population,
            &self.config.metabolism,
        );
    }

    /// Run the behavior of the actor at `pos`, if any
    pub fn act_at(&mut self, pos: Position) {
        behavior::act(
            &mut self.grid,
            pos,
            &mut self.rng,
            &self.config.metabolism,
            &mut self.pending,
        );
    }

    /// One row-major pass over every cell.
    ///
    /// Each cell acts on what occupies it at visit time, so an actor that
    /// moved forward into a cell not yet visited acts again in this pass.
    pub fn act_pass(&mut self) {
        for index in 0..self.cell_count() {
            let pos = self.grid.index_to_pos(index);
            self.act_at(pos);
        }
    }

    pub fn replenish_food(&mut self) {
        maintenance::replenish_food(
            &mut self.grid,
            &mut self.rng,
            &self.config.population,
            &self.config.metabolism,
            &mut self.pending,
        );
    }

    pub fn enforce_prey_floor(&mut self) -> FloorOutcome {
        maintenance::enforce_prey_floor(
            &mut self.grid,
            &mut self.rng,
            &self.config.population,
            &self.config.metabolism,
            &mut self.pending,
        )
    }

    pub fn enforce_predator_floor(&mut self) -> FloorOutcome {
        maintenance::enforce_predator_floor(
            &mut self.grid,
            &self.config.population,
            &self.config.metabolism,
            &mut self.pending,
        )
    }

    /// Act, then run food replenishment and both population floors
    pub fn tick(&mut self) -> TickStats {
        self.act_pass();
        self.replenish_food();
        self.enforce_prey_floor();
        self.enforce_predator_floor();

        self.tick += 1;
        let mut stats = mem::take(&mut self.pending);
        stats.tick = self.tick;
        stats.census = self.grid.census();

        debug!(
            tick = stats.tick,
            food = stats.census.food,
            prey = stats.census.prey,
            predators = stats.census.predators,
            food_eaten = stats.food_eaten,
            prey_eaten = stats.prey_eaten,
            deaths = stats.deaths(),
            offspring = stats.offspring_born,
            "Tick complete"
        );

        stats
    }

    /// Run `ticks` ticks without rendering or pacing
    #[instrument(skip(self))]
    pub fn run_ticks(&mut self, ticks: u64) -> Vec<TickStats> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Text snapshot: the grid followed by the separator line
    pub fn render(&self) -> String {
        format!("{}{}\n", self.grid, SEPARATOR)
    }

    pub fn render_to<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self.grid)?;
        writeln!(out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn cell_count(&self) -> usize {
        let size = self.grid.size() as usize;
        size * size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::scripted::ScriptedSource;
    use crate::actor::ActorState;
    use eco_core::{Hunger, WorldConfig};
    use proptest::prelude::*;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn scripted(values: Vec<i32>) -> Simulation<ScriptedSource> {
        Simulation::with_rng(SimulationConfig::default(), ScriptedSource::repeating(values))
            .unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(seeded(42)).unwrap();
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.grid().size(), 10);
        assert!(sim.census().total() > 0);
        assert!(sim.grid().is_consistent());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            world: WorldConfig { size: 0 },
            ..Default::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_lone_food_gone_after_five_passes() {
        let mut sim = scripted(vec![0]);
        sim.place(Species::Food, Position::at(0, 0));

        for _ in 0..4 {
            sim.act_pass();
            assert_eq!(sim.grid().species_at(Position::at(0, 0)), Some(Species::Food));
        }
        sim.act_pass();
        assert!(sim.grid().is_empty(Position::at(0, 0)));
    }

    #[test]
    fn test_prey_eats_adjacent_food() {
        let mut sim = scripted(vec![1, 0]);
        sim.place(Species::Prey, Position::at(2, 2));
        sim.place(Species::Food, Position::at(2, 3));
        sim.act_at(Position::at(2, 2));

        let prey = sim.grid().get(Position::at(2, 3)).unwrap();
        assert_eq!(prey.species(), Species::Prey);
        assert_eq!(prey.hunger(), Some(Hunger::from_tenths(10)));
        assert_eq!(sim.census().food, 0);
    }

    #[test]
    fn test_forward_move_acts_again_in_same_pass() {
        // A prey walking right is revisited in every column until it wraps
        let mut sim = scripted(vec![1, 0]);
        sim.place(Species::Prey, Position::at(0, 5));
        sim.act_pass();

        let prey = sim.grid().get(Position::at(0, 0)).unwrap();
        assert_eq!(prey.hunger(), Some(Hunger::ZERO));
        assert_eq!(sim.census().prey, 1);
    }

    #[test]
    fn test_offspring_does_not_act_in_same_pass() {
        let mut sim = scripted(vec![1, 0]);
        let origin = Position::at(5, 5);
        sim.grid_mut().set(
            origin,
            Actor {
                position: origin,
                state: ActorState::Predator {
                    hunger: Hunger::from_tenths(20),
                    prey_eaten: 2,
                    has_reproduced: false,
                },
            },
        );
        sim.place(Species::Prey, Position::at(5, 6));
        sim.act_pass();

        // The offspring sits on an already visited cell and stays untouched
        let offspring = sim.grid().get(origin).unwrap();
        assert_eq!(
            offspring.state,
            ActorState::Predator {
                hunger: Hunger::from_tenths(20),
                prey_eaten: 0,
                has_reproduced: false,
            }
        );

        // The parent keeps walking right through unvisited cells and wraps
        let parent = sim.grid().get(Position::at(5, 0)).unwrap();
        assert_eq!(
            parent.state,
            ActorState::Predator {
                hunger: Hunger::from_tenths(14),
                prey_eaten: 3,
                has_reproduced: true,
            }
        );
        assert_eq!(sim.census().predators, 2);
        assert!(sim.grid().is_consistent());
    }

    #[test]
    fn test_backward_move_acts_once() {
        let mut sim = scripted(vec![-1, 0]);
        sim.place(Species::Prey, Position::at(0, 5));
        sim.act_pass();

        let prey = sim.grid().get(Position::at(0, 4)).unwrap();
        assert_eq!(prey.hunger(), Some(Hunger::from_tenths(8)));
    }

    #[test]
    fn test_tick_enforces_floors() {
        let mut sim = Simulation::with_rng(seeded(9), ChaCha8Rng::seed_from_u64(9)).unwrap();
        let stats = sim.tick();

        assert_eq!(stats.tick, 1);
        assert_eq!(stats.census.prey, 5);
        assert_eq!(stats.census.predators, 5);
        assert_eq!(stats.prey_spawned, 5);
        assert_eq!(stats.predators_spawned, 5);
        assert!(stats.food_spawned >= 1 && stats.food_spawned <= 5);
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn test_run_ticks_is_deterministic_for_a_seed() {
        let mut a = Simulation::new(seeded(1234)).unwrap();
        let mut b = Simulation::new(seeded(1234)).unwrap();

        let stats_a = a.run_ticks(20);
        let stats_b = b.run_ticks(20);

        assert_eq!(stats_a, stats_b);
        assert_eq!(a.render(), b.render());
        assert_eq!(a.tick_count(), 20);
    }

    #[test]
    fn test_render_format() {
        let config = SimulationConfig {
            world: WorldConfig { size: 2 },
            ..Default::default()
        };
        let mut sim = Simulation::with_rng(config, ScriptedSource::repeating(vec![0])).unwrap();
        sim.place(Species::Predator, Position::at(0, 1));
        sim.place(Species::Prey, Position::at(1, 0));

        let expected = format!(". W\nR .\n{}\n", SEPARATOR);
        assert_eq!(sim.render(), expected);

        let mut out = Vec::new();
        sim.render_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_render_default_grid_shape() {
        let sim = Simulation::new(seeded(5)).unwrap();
        let text = sim.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        for line in &lines[..10] {
            let tokens: Vec<&str> = line.split(' ').collect();
            assert_eq!(tokens.len(), 10);
            assert!(tokens.iter().all(|t| matches!(*t, "C" | "R" | "W" | ".")));
        }
        assert_eq!(lines[10], SEPARATOR);
    }

    proptest! {
        #[test]
        fn prop_grid_stays_consistent(seed in any::<u64>(), ticks in 1u64..25) {
            let mut sim = Simulation::new(seeded(seed)).unwrap();
            for _ in 0..ticks {
                let stats = sim.tick();
                prop_assert!(sim.grid().is_consistent());
                prop_assert_eq!(stats.census, sim.census());
                prop_assert!(stats.census.total() <= 100);
            }
        }

        #[test]
        fn prop_floors_hold_after_each_tick(seed in any::<u64>(), ticks in 1u64..25) {
            let mut sim = Simulation::new(seeded(seed)).unwrap();
            for _ in 0..ticks {
                let stats = sim.tick();
                let edges_full = (0..10).all(|row| {
                    !sim.grid().is_empty(Position::at(row, 0))
                        && !sim.grid().is_empty(Position::at(row, 9))
                });
                prop_assert!(stats.census.prey >= 5 || sim.grid().empty_count() == 0);
                prop_assert!(stats.census.predators >= 5 || edges_full);
            }
        }
    }
}
