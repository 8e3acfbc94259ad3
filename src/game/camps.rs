//! # Camps
//!
//! A camp is a forest site that breeds monsters of one species up to a
//! population cap. The world keeps a fixed number of camps alive: disbanding
//! one immediately founds a replacement elsewhere.

use crate::game::{CampId, Coord, Species};
use serde::{Deserialize, Serialize};

/// A monster camp rooted on a single tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camp {
    /// Arena key; assigned on insertion
    pub id: CampId,
    /// The camp tile; spawns happen here
    pub pos: Coord,
    /// The species this camp breeds
    pub species: Species,
    /// Living monsters belonging to the camp
    pub population: u32,
    /// Ticks left until the next spawn attempt; only runs down while the
    /// camp is below capacity
    pub countdown: i32,
}

impl Camp {
    /// Creates a camp with a fresh countdown and no population.
    pub fn new(pos: Coord, species: Species, countdown: i32) -> Self {
        Self {
            id: CampId::default(),
            pos,
            species,
            population: 0,
            countdown,
        }
    }

    /// Whether the camp is at its population cap.
    pub fn is_full(&self, capacity: u32) -> bool {
        self.population >= capacity
    }

    /// Whether the countdown has run out and a spawn should be attempted.
    pub fn ready_to_spawn(&self) -> bool {
        self.countdown <= 0
    }
}
