//! # Generation Module
//!
//! Procedural world generation: terrain layering, road networks, and the
//! placement helpers the simulation reuses at runtime.
//!
//! Terrain synthesis lives in [`terrain`]; this module keeps the shared
//! pieces: the seeded RNG constructor, rejection-sampled placement of agents
//! and camps, and terrain validation. Camp placement is exported because
//! disbanding a camp founds a replacement mid-run through the same code
//! path.

pub mod terrain;

pub use terrain::*;

use crate::config::WorldConfig;
use crate::game::{CampId, Coord, Species, TerrainKind, WorldGrid, WorldState};
use crate::{OverworldError, OverworldResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates the seeded random number generator the whole run draws from.
pub fn create_rng(config: &WorldConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

/// Picks a random passable, vacant tile, giving up after the configured
/// number of attempts.
///
/// # Examples
///
/// ```
/// use overworld::{WorldConfig, WorldGrid, TerrainKind};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = WorldConfig::new(7);
/// let grid = WorldGrid::new(config.world_width, config.world_height, TerrainKind::Ground);
/// let mut rng = StdRng::seed_from_u64(7);
/// let pos = overworld::generation::random_open_tile(&grid, &config, &mut rng).unwrap();
/// assert!(grid.tile(pos).is_passable());
/// ```
pub fn random_open_tile(
    grid: &WorldGrid,
    config: &WorldConfig,
    rng: &mut StdRng,
) -> OverworldResult<Coord> {
    for _ in 0..config.max_placement_attempts {
        let pos = Coord::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        let tile = grid.tile(pos);
        if tile.is_passable() && tile.occupant.is_none() {
            return Ok(pos);
        }
    }
    Err(OverworldError::GenerationFailed(
        "no open tile found for placement".to_string(),
    ))
}

/// Founds one camp of a random monster species on a forest pocket.
///
/// The site must be vacant and sit inside a full 3x3 patch of forest, so
/// camps always spawn with cover around them. Used both during worldgen and
/// when a disbanded camp is replaced.
pub fn place_camp(state: &mut WorldState) -> OverworldResult<CampId> {
    let options = Species::monsters();
    let species = options[state.rng.gen_range(0..options.len())];
    for _ in 0..state.config.max_placement_attempts {
        let x = state.rng.gen_range(0..state.grid.width) as i32;
        let y = state.rng.gen_range(0..state.grid.height) as i32;
        let pos = state.grid.wrap_point(x, y);
        if state.grid.occupant(pos).is_some() {
            continue;
        }
        if !forest_pocket(&state.grid, x, y) {
            continue;
        }
        return Ok(state.insert_camp(pos, species));
    }
    Err(OverworldError::GenerationFailed(format!(
        "no forest pocket left for a {} camp",
        species.name()
    )))
}

/// True when the tile and all eight neighbors are forest.
fn forest_pocket(grid: &WorldGrid, x: i32, y: i32) -> bool {
    for dy in -1..=1 {
        for dx in -1..=1 {
            if grid.tile_at(x + dx, y + dy).terrain != TerrainKind::Forest {
                return false;
            }
        }
    }
    true
}

/// Validates that a generated map can actually be walked on.
pub fn validate_terrain(grid: &WorldGrid) -> OverworldResult<()> {
    let mut passable = 0usize;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.tile(Coord::new(x, y)).is_passable() {
                passable += 1;
            }
        }
    }
    if passable == 0 {
        return Err(OverworldError::GenerationFailed(
            "the map has no passable tiles".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_is_deterministic() {
        let config = WorldConfig::new(12345);
        let mut a = create_rng(&config);
        let mut b = create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_random_open_tile_finds_the_single_gap() {
        let config = WorldConfig::new(1);
        let mut grid = WorldGrid::new(8, 8, TerrainKind::Water);
        grid.tile_mut(Coord::new(3, 3)).terrain = TerrainKind::Ground;
        let mut rng = create_rng(&config);
        let pos = random_open_tile(&grid, &config, &mut rng).unwrap();
        assert_eq!(pos, Coord::new(3, 3));
    }

    #[test]
    fn test_random_open_tile_gives_up_on_a_flooded_map() {
        let config = WorldConfig::for_testing(2);
        let grid = WorldGrid::new(8, 8, TerrainKind::Water);
        let mut rng = create_rng(&config);
        assert!(random_open_tile(&grid, &config, &mut rng).is_err());
    }

    #[test]
    fn test_place_camp_lands_on_forest() {
        let config = WorldConfig::for_testing(3);
        let grid = WorldGrid::new(config.world_width, config.world_height, TerrainKind::Forest);
        let rng = create_rng(&config);
        let mut state = WorldState::from_grid(config, grid, Coord::new(5, 5), rng).unwrap();

        let camp_id = place_camp(&mut state).unwrap();
        let camp = &state.camps[camp_id];
        assert_eq!(camp.population, 0);
        assert_eq!(camp.countdown, state.config.camp_countdown);
        assert_eq!(state.grid.tile(camp.pos).terrain, TerrainKind::Camp);
        assert_eq!(state.grid.tile(camp.pos).camp, Some(camp_id));
        assert_ne!(camp.pos, Coord::new(5, 5));
    }

    #[test]
    fn test_place_camp_fails_without_forest() {
        let config = WorldConfig::for_testing(4);
        let grid = WorldGrid::new(config.world_width, config.world_height, TerrainKind::Ground);
        let rng = create_rng(&config);
        let mut state = WorldState::from_grid(config, grid, Coord::new(5, 5), rng).unwrap();
        assert!(place_camp(&mut state).is_err());
    }

    #[test]
    fn test_validate_terrain_rejects_a_sealed_map() {
        let grid = WorldGrid::new(6, 6, TerrainKind::Mountains);
        assert!(validate_terrain(&grid).is_err());
        let grid = WorldGrid::new(6, 6, TerrainKind::Ground);
        assert!(validate_terrain(&grid).is_ok());
    }
}
