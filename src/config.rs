//! # World Configuration
//!
//! Every tunable the simulation and the terrain generator consume, gathered
//! into one serializable struct. The values mirror the shipped game balance;
//! `for_testing` shrinks the world so suites run fast.

use serde::{Deserialize, Serialize};

/// Configuration for world generation and simulation balance.
///
/// Owns the RNG seed, so two worlds built from equal configs evolve
/// identically on the same platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducible generation and simulation
    pub seed: u64,
    /// World width in tiles (x wraps at this modulus)
    pub world_width: u32,
    /// World height in tiles (y wraps at this modulus)
    pub world_height: u32,
    /// Normalized forest-noise threshold; cells below it become forest
    pub forest_threshold: f64,
    /// Normalized water-noise threshold; cells below it become water
    pub water_threshold: f64,
    /// Number of roads carved, each anchored at a castle; the sector walk
    /// covers the map evenly when this is a multiple of 8
    pub castles: u32,
    /// Nominal road length in steps; each road varies by up to 5 either way
    pub road_length: u32,
    /// Probability a road step follows its primary axis
    pub road_bias: f64,
    /// Number of chapels scattered on open ground
    pub chapels: u32,
    /// Number of inns scattered on open ground
    pub inns: u32,
    /// Gold cost of a full heal at an inn
    pub inn_cost: u32,
    /// Number of monster camps kept alive in the world
    pub camps: u32,
    /// Maximum living monsters per camp
    pub camp_capacity: u32,
    /// Ticks between spawn attempts at a camp
    pub camp_countdown: i32,
    /// Probability an idle monster wanders one step in a tick
    pub monster_friskiness: f64,
    /// Half-width of the square neighborhood a monster scans for prey
    pub monster_radius: u32,
    /// Taxicab distance beyond which a monster abandons its quarry
    pub monster_giveup: u32,
    /// Taxicab distance from home beyond which a monster turns back
    pub monster_tired: u32,
    /// Probability a melee swing connects
    pub hit_chance: f64,
    /// Attempt budget for every rejection-sampled placement
    pub max_placement_attempts: u32,
}

impl WorldConfig {
    /// Creates the standard full-size configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use overworld::WorldConfig;
    ///
    /// let config = WorldConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.world_width >= 2 * config.monster_radius + 1);
    /// assert_eq!(config.castles % 2, 0);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            world_width: 100,
            world_height: 100,
            forest_threshold: 0.5,
            water_threshold: 0.35,
            castles: 16,
            road_length: 25,
            road_bias: 0.85,
            chapels: 3,
            inns: 6,
            inn_cost: 20,
            camps: 10,
            camp_capacity: 3,
            camp_countdown: 6,
            monster_friskiness: 0.2,
            monster_radius: 3,
            monster_giveup: 5,
            monster_tired: 15,
            hit_chance: 0.4,
            max_placement_attempts: 10_000,
        }
    }

    /// Creates a small configuration for fast test worlds.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            world_width: 24,
            world_height: 24,
            forest_threshold: 0.55,
            water_threshold: 0.2,
            castles: 4,
            road_length: 8,
            road_bias: 0.85,
            chapels: 1,
            inns: 1,
            inn_cost: 20,
            camps: 2,
            camp_capacity: 2,
            camp_countdown: 3,
            monster_friskiness: 0.2,
            monster_radius: 3,
            monster_giveup: 5,
            monster_tired: 10,
            hit_chance: 0.4,
            max_placement_attempts: 2_000,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(42)
    }
}
