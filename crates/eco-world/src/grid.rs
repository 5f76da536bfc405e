//! 2D grid for the world.

use crate::actor::Actor;
use crate::stats::Census;
use eco_core::{Position, Species, EMPTY_SYMBOL};
use std::fmt::{self, Write as _};

/// A square toroidal grid of optional actors
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cells: Vec<Option<Actor>>,
}

impl Grid {
    /// `size` must be positive; callers validate it through the config.
    pub(crate) fn new(size: i32) -> Self {
        debug_assert!(size > 0, "grid size must be positive, got {size}");
        let cells = (size * size) as usize;
        Self {
            size,
            cells: vec![None; cells],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Wrap a position into grid bounds
    pub fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.size)
    }

    /// Get the actor at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Option<&Actor> {
        self.cells[self.pos_to_index(pos)].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Actor> {
        let index = self.pos_to_index(pos);
        self.cells[index].as_mut()
    }

    /// Store an actor at position, replacing any occupant.
    ///
    /// The actor's own position is rewritten to the wrapped cell.
    pub fn set(&mut self, pos: Position, mut actor: Actor) -> Option<Actor> {
        actor.position = self.wrap(pos);
        let index = self.pos_to_index(pos);
        self.cells[index].replace(actor)
    }

    /// Empty the cell, returning its former occupant
    pub fn clear(&mut self, pos: Position) -> Option<Actor> {
        let index = self.pos_to_index(pos);
        self.cells[index].take()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn species_at(&self, pos: Position) -> Option<Species> {
        self.get(pos).map(Actor::species)
    }

    pub fn count(&self, species: Species) -> usize {
        self.actors().filter(|a| a.species() == species).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for actor in self.actors() {
            census.record(actor.species());
        }
        census
    }

    /// Whether every actor's stored position matches the cell holding it
    pub fn is_consistent(&self) -> bool {
        self.iter()
            .all(|(pos, cell)| cell.map_or(true, |actor| actor.position == pos))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = self.wrap(pos);
        (wrapped.y * self.size + wrapped.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.size;
        let y = (index as i32) / self.size;
        Position::new(x, y)
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&Actor>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell.as_ref()))
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.cells.iter().flatten()
    }
}

/// One line per row, cells separated by single spaces
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    f.write_char(' ')?;
                }
                let symbol = self
                    .species_at(Position::at(row, col))
                    .map_or(EMPTY_SYMBOL, |s| s.symbol());
                f.write_char(symbol)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::MetabolismConfig;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.cells.len(), 100);
        assert_eq!(grid.empty_count(), 100);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "grid size must be positive")]
    fn test_zero_size_grid_is_rejected() {
        Grid::new(0);
    }

    #[test]
    fn test_toroidal_wrapping() {
        let rules = MetabolismConfig::default();
        let mut grid = Grid::new(10);

        grid.set(Position::new(-1, -1), Actor::food(Position::new(0, 0), &rules));
        let food = grid.get(Position::new(9, 9)).unwrap();
        assert_eq!(food.position, Position::new(9, 9));

        // Same cell reached from the other side
        assert!(grid.get(Position::new(19, -1)).is_some());
    }

    #[test]
    fn test_set_replaces_and_clear_empties() {
        let rules = MetabolismConfig::default();
        let mut grid = Grid::new(5);
        let pos = Position::at(2, 3);

        assert!(grid.set(pos, Actor::food(pos, &rules)).is_none());
        let old = grid.set(pos, Actor::prey(pos, &rules));
        assert_eq!(old.map(|a| a.species()), Some(Species::Food));
        assert_eq!(grid.species_at(pos), Some(Species::Prey));

        let removed = grid.clear(pos);
        assert_eq!(removed.map(|a| a.species()), Some(Species::Prey));
        assert!(grid.is_empty(pos));
    }

    #[test]
    fn test_positions_are_row_major() {
        let grid = Grid::new(3);
        let positions: Vec<Position> = grid.positions().collect();
        assert_eq!(positions[0], Position::at(0, 0));
        assert_eq!(positions[1], Position::at(0, 1));
        assert_eq!(positions[3], Position::at(1, 0));
        assert_eq!(positions[8], Position::at(2, 2));
    }

    #[test]
    fn test_census_and_consistency() {
        let rules = MetabolismConfig::default();
        let mut grid = Grid::new(4);
        grid.set(Position::at(0, 0), Actor::food(Position::at(0, 0), &rules));
        grid.set(Position::at(1, 1), Actor::prey(Position::at(1, 1), &rules));
        grid.set(Position::at(2, 2), Actor::predator(Position::at(2, 2), &rules));
        grid.set(Position::at(3, 3), Actor::predator(Position::at(3, 3), &rules));

        let census = grid.census();
        assert_eq!(census, Census { food: 1, prey: 1, predators: 2 });
        assert_eq!(grid.count(Species::Predator), 2);
        assert!(grid.is_consistent());

        grid.get_mut(Position::at(1, 1)).unwrap().position = Position::at(0, 1);
        assert!(!grid.is_consistent());
    }

    #[test]
    fn test_display() {
        let rules = MetabolismConfig::default();
        let mut grid = Grid::new(3);
        grid.set(Position::at(0, 0), Actor::food(Position::at(0, 0), &rules));
        grid.set(Position::at(1, 1), Actor::prey(Position::at(1, 1), &rules));
        grid.set(Position::at(2, 2), Actor::predator(Position::at(2, 2), &rules));

        assert_eq!(grid.to_string(), "C . .\n. R .\n. . W\n");
    }
}
