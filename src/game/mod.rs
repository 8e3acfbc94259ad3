//! # Game Module
//!
//! Core simulation state, world representation, and agent systems.
//!
//! This module contains the fundamental building blocks of the overworld:
//! - Modular geometry for the toroidal coordinate space
//! - World grid and tile representation
//! - Agents, camps, and the monster decision function
//! - The tick-driven world state aggregate

pub mod ai;
pub mod camps;
pub mod entities;
pub mod state;
pub mod world;

pub use ai::*;
pub use camps::*;
pub use entities::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Arena key for agents (player and monsters).
    pub struct AgentId;

    /// Arena key for monster camps.
    pub struct CampId;
}

/// Reduces any integer into `[0, m)` on a wrapping axis.
///
/// # Examples
///
/// ```
/// use overworld::game::wrap;
///
/// assert_eq!(wrap(-1, 100), 99);
/// assert_eq!(wrap(100, 100), 0);
/// assert_eq!(wrap(42, 100), 42);
/// ```
pub fn wrap(value: i32, m: u32) -> u32 {
    debug_assert!(m > 0, "modulus must be positive");
    value.rem_euclid(m as i32) as u32
}

/// Shortest-route distance between two coordinates on a wrapping axis.
///
/// # Examples
///
/// ```
/// use overworld::game::mod_distance;
///
/// assert_eq!(mod_distance(0, 99, 100), 1);
/// assert_eq!(mod_distance(10, 30, 100), 20);
/// ```
pub fn mod_distance(a: u32, b: u32, m: u32) -> u32 {
    debug_assert!(m > 0, "modulus must be positive");
    let m = m as u64;
    let a = a as u64 % m;
    let b = b as u64 % m;
    let forward = (a + m - b) % m;
    forward.min(m - forward) as u32
}

/// Congruence of two coordinates on a wrapping axis.
pub fn mod_eq(a: u32, b: u32, m: u32) -> bool {
    debug_assert!(m > 0, "modulus must be positive");
    a % m == b % m
}

/// Whether the shortest route from `b` to `a` runs in the increasing
/// direction and has positive length.
///
/// When both routes are equally long (antipodal points on an even modulus)
/// the linear order of the reduced coordinates decides, so that for every
/// pair exactly one of `mod_eq(a, b)`, `mod_greater(a, b)` and
/// `mod_greater(b, a)` holds.
///
/// # Examples
///
/// ```
/// use overworld::game::mod_greater;
///
/// assert!(mod_greater(1, 0, 100));
/// assert!(mod_greater(0, 99, 100)); // wraps: 0 is one step "above" 99
/// assert!(!mod_greater(0, 1, 100));
/// ```
pub fn mod_greater(a: u32, b: u32, m: u32) -> bool {
    debug_assert!(m > 0, "modulus must be positive");
    let m = m as u64;
    let a = a as u64 % m;
    let b = b as u64 % m;
    let forward = (a + m - b) % m;
    match forward.cmp(&(m - forward)) {
        std::cmp::Ordering::Less => forward > 0,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => a > b,
    }
}

/// Whether the shortest route from `b` to `a` runs in the decreasing
/// direction: true iff neither `mod_eq` nor `mod_greater` holds.
pub fn mod_less(a: u32, b: u32, m: u32) -> bool {
    !mod_eq(a, b, m) && !mod_greater(a, b, m)
}

/// A wrapped coordinate in the world, always inside
/// `[0, width) x [0, height)`.
///
/// # Examples
///
/// ```
/// use overworld::Coord;
///
/// let pos = Coord::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    /// Creates a new coordinate. Callers are expected to pass values
    /// already inside the world bounds; the grid wraps on its own.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A per-tick movement delta. The zero offset means "hold position".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// The zero offset.
    pub const HOLD: Offset = Offset { dx: 0, dy: 0 };

    /// The four orthogonal steps, in the order the threat scan visits
    /// neighbors: west, east, north, south.
    pub const CARDINALS: [Offset; 4] = [
        Offset { dx: -1, dy: 0 },
        Offset { dx: 1, dy: 0 },
        Offset { dx: 0, dy: -1 },
        Offset { dx: 0, dy: 1 },
    ];

    /// Creates a new offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Whether this offset moves at all.
    pub fn is_hold(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Cardinal movement directions, as issued by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a movement offset. North points toward
    /// decreasing y (screen-style axes).
    ///
    /// # Examples
    ///
    /// ```
    /// use overworld::{Direction, Offset};
    ///
    /// assert_eq!(Direction::North.offset(), Offset::new(0, -1));
    /// assert_eq!(Direction::East.offset(), Offset::new(1, 0));
    /// ```
    pub fn offset(self) -> Offset {
        match self {
            Direction::North => Offset::new(0, -1),
            Direction::South => Offset::new(0, 1),
            Direction::East => Offset::new(1, 0),
            Direction::West => Offset::new(-1, 0),
        }
    }

    /// All four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}
