//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// 2D position in the world. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a position from `(row, col)` coordinates.
    pub fn at(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    pub fn row(&self) -> i32 {
        self.y
    }

    pub fn col(&self) -> i32 {
        self.x
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for a square world of the given size
    pub fn wrap(&self, size: i32) -> Self {
        Self {
            x: ((self.x % size) + size) % size,
            y: ((self.y % size) + size) % size,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// Satiety of a mobile actor, in exact tenths.
///
/// Higher is better fed. Every change the simulation applies is a multiple
/// of 0.1, so the value is kept as a fixed-point integer: a Prey starting at
/// 1.0 reaches exactly 0.0 after five 0.2 decrements instead of drifting to a
/// tiny positive float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Hunger(i32);

impl Hunger {
    pub const ZERO: Hunger = Hunger(0);

    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    pub fn tenths(self) -> i32 {
        self.0
    }

    /// Whether an actor with this hunger starves on its next act.
    pub fn is_exhausted(self) -> bool {
        self.0 <= 0
    }
}

impl Add for Hunger {
    type Output = Hunger;

    fn add(self, rhs: Hunger) -> Hunger {
        Hunger(self.0 + rhs.0)
    }
}

impl Sub for Hunger {
    type Output = Hunger;

    fn sub(self, rhs: Hunger) -> Hunger {
        Hunger(self.0 - rhs.0)
    }
}

impl AddAssign for Hunger {
    fn add_assign(&mut self, rhs: Hunger) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Hunger {
    fn sub_assign(&mut self, rhs: Hunger) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Hunger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{}", sign, self.0.abs() / 10, self.0.abs() % 10)
    }
}

/// The three kinds of actor that can occupy a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Food,
    Prey,
    Predator,
}

/// Symbol rendered for a cell with no occupant
pub const EMPTY_SYMBOL: char = '.';

impl Species {
    /// Single-character symbol used by the text renderer
    pub fn symbol(&self) -> char {
        match self {
            Species::Food => 'C',
            Species::Prey => 'R',
            Species::Predator => 'W',
        }
    }

    pub fn all() -> [Species; 3] {
        [Species::Food, Species::Prey, Species::Predator]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Species::Food => "food",
            Species::Prey => "prey",
            Species::Predator => "predator",
        };
        f.write_str(name)
    }
}
