//! Terrain synthesis for the overworld.
//!
//! Terrain is painted in layers over a bare ground map: forests from
//! fractal simplex noise, mountain ranges from a ridged field masked by an
//! inverted billow field, lakes from a second fractal field, then the road
//! network with its castles, and finally chapels and inns scattered onto
//! whatever ground is left.

use crate::config::WorldConfig;
use crate::game::{Coord, TerrainKind, WorldGrid};
use crate::{OverworldError, OverworldResult};
use log::debug;
use noise::{Billow, Clamp, Fbm, MultiFractal, Multiply, Negate, NoiseFn, RidgedMulti, ScaleBias, Simplex};
use rand::rngs::StdRng;
use rand::Rng;

/// Generates the full terrain grid for a config.
///
/// Layer order matters: later layers paint over earlier ones, so lakes cut
/// through forest, roads bridge lakes, and castles anchor road ends.
///
/// # Examples
///
/// ```
/// use overworld::WorldConfig;
/// use overworld::generation::{create_rng, generate_terrain};
///
/// let config = WorldConfig::new(3);
/// let mut rng = create_rng(&config);
/// let grid = generate_terrain(&config, &mut rng).unwrap();
/// assert_eq!(grid.width, config.world_width);
/// assert_eq!(grid.height, config.world_height);
/// ```
pub fn generate_terrain(config: &WorldConfig, rng: &mut StdRng) -> OverworldResult<WorldGrid> {
    let mut grid = WorldGrid::new(config.world_width, config.world_height, TerrainKind::Ground);
    paint_forests(&mut grid, config, rng);
    paint_mountains(&mut grid, rng);
    paint_water(&mut grid, config, rng);
    carve_roads(&mut grid, config, rng);
    scatter_sites(&mut grid, TerrainKind::Chapel, config.chapels, config, rng)?;
    scatter_sites(&mut grid, TerrainKind::Inn, config.inns, config, rng)?;
    super::validate_terrain(&grid)?;
    debug!("terrain generated for a {}x{} world", grid.width, grid.height);
    Ok(grid)
}

/// Forest covers every tile whose fractal noise falls below the threshold.
fn paint_forests(grid: &mut WorldGrid, config: &WorldConfig, rng: &mut StdRng) {
    let source = Fbm::<Simplex>::new(rng.gen())
        .set_octaves(5)
        .set_persistence(0.6)
        .set_frequency(0.04);
    for y in 0..grid.height {
        for x in 0..grid.width {
            let value = (source.get([f64::from(x), f64::from(y)]) + 1.0) / 2.0;
            if value < config.forest_threshold {
                grid.tile_mut(Coord::new(x, y)).terrain = TerrainKind::Forest;
            }
        }
    }
}

/// Mountain ranges: a ridged field biased down so only the sharpest crests
/// survive, multiplied by an inverted billow mask that confines the ranges
/// to broad patches instead of scattering them everywhere.
fn paint_mountains(grid: &mut WorldGrid, rng: &mut StdRng) {
    let crests = Clamp::new(
        ScaleBias::new(
            RidgedMulti::<Simplex>::new(rng.gen())
                .set_octaves(6)
                .set_persistence(0.2)
                .set_frequency(0.035),
        )
        .set_bias(-0.6),
    )
    .set_bounds(0.0, 10.0);
    let mask = Clamp::new(Negate::new(
        ScaleBias::new(
            Billow::<Simplex>::new(rng.gen())
                .set_octaves(7)
                .set_persistence(0.0)
                .set_frequency(0.03),
        )
        .set_bias(0.2),
    ))
    .set_bounds(0.0, 10.0);
    let ranges = Multiply::new(crests, mask);
    for y in 0..grid.height {
        for x in 0..grid.width {
            if ranges.get([f64::from(x), f64::from(y)]) > 0.0 {
                grid.tile_mut(Coord::new(x, y)).terrain = TerrainKind::Mountains;
            }
        }
    }
}

/// Lakes fill the low end of a second fractal field.
fn paint_water(grid: &mut WorldGrid, config: &WorldConfig, rng: &mut StdRng) {
    let source = Fbm::<Simplex>::new(rng.gen())
        .set_octaves(6)
        .set_persistence(0.05)
        .set_frequency(0.05);
    for y in 0..grid.height {
        for x in 0..grid.width {
            let value = (source.get([f64::from(x), f64::from(y)]) + 1.0) / 2.0;
            if value < config.water_threshold {
                grid.tile_mut(Coord::new(x, y)).terrain = TerrainKind::Water;
            }
        }
    }
}

/// Lays one road per configured castle, marching a sector offset across the
/// map so the castles spread out instead of clustering.
fn carve_roads(grid: &mut WorldGrid, config: &WorldConfig, rng: &mut StdRng) {
    let quarter = (grid.width / 4).max(1);
    let half = (grid.height / 2).max(1);
    let mut xoffset = 0u32;
    let mut yoffset = 0u32;
    for _ in 0..config.castles {
        let length =
            rng.gen_range(config.road_length.saturating_sub(5)..=config.road_length + 5);
        let start_x = (xoffset + rng.gen_range(0..=quarter)) as i32;
        let start_y = (yoffset + rng.gen_range(0..=half)) as i32;
        xoffset = (xoffset + quarter) % grid.width;
        yoffset = (yoffset + half) % grid.height;
        carve_one_road(grid, config, rng, start_x, start_y, length);
    }
}

/// Walks one road from a castle, mostly along its primary axis with the
/// occasional sideways drift. Running into an existing road merges there;
/// otherwise the far end gets its own castle.
fn carve_one_road(
    grid: &mut WorldGrid,
    config: &WorldConfig,
    rng: &mut StdRng,
    start_x: i32,
    start_y: i32,
    length: u32,
) {
    let start = grid.wrap_point(start_x, start_y);
    grid.tile_mut(start).terrain = TerrainKind::Castle;
    let heads_east = rng.gen_bool(0.5);
    let (mut x, mut y) = (start_x, start_y);
    for _ in 0..length {
        if rng.gen_bool(config.road_bias) {
            if heads_east {
                x += 1;
            } else {
                y += 1;
            }
        } else if heads_east {
            y += 1;
        } else {
            x += 1;
        }
        let pos = grid.wrap_point(x, y);
        if grid.tile(pos).terrain == TerrainKind::Road {
            return; // merged into an existing road
        }
        grid.tile_mut(pos).terrain = TerrainKind::Road;
    }
    let end = grid.wrap_point(x, y);
    grid.tile_mut(end).terrain = TerrainKind::Castle;
}

/// Drops `count` sites of one kind onto random bare ground.
fn scatter_sites(
    grid: &mut WorldGrid,
    terrain: TerrainKind,
    count: u32,
    config: &WorldConfig,
    rng: &mut StdRng,
) -> OverworldResult<()> {
    for _ in 0..count {
        let mut placed = false;
        for _ in 0..config.max_placement_attempts {
            let pos = Coord::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
            if grid.tile(pos).terrain == TerrainKind::Ground {
                grid.tile_mut(pos).terrain = terrain;
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(OverworldError::GenerationFailed(format!(
                "no bare ground left for a {:?}",
                terrain
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::create_rng;

    fn count_terrain(grid: &WorldGrid, kind: TerrainKind) -> usize {
        let mut total = 0;
        for y in 0..grid.height {
            for x in 0..grid.width {
                if grid.tile(Coord::new(x, y)).terrain == kind {
                    total += 1;
                }
            }
        }
        total
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = WorldConfig::new(12345);
        let mut rng_a = create_rng(&config);
        let mut rng_b = create_rng(&config);
        let a = generate_terrain(&config, &mut rng_a).unwrap();
        let b = generate_terrain(&config, &mut rng_b).unwrap();
        for y in 0..a.height {
            for x in 0..a.width {
                let pos = Coord::new(x, y);
                assert_eq!(a.tile(pos).terrain, b.tile(pos).terrain);
            }
        }
    }

    #[test]
    fn test_roads_and_castles_are_bounded() {
        let config = WorldConfig::new(99);
        let mut rng = create_rng(&config);
        let grid = generate_terrain(&config, &mut rng).unwrap();

        let castles = count_terrain(&grid, TerrainKind::Castle);
        let roads = count_terrain(&grid, TerrainKind::Road);
        // Every road starts at a castle and ends at a castle unless it
        // merged into another road.
        assert!(castles >= 1);
        assert!(castles <= 2 * config.castles as usize);
        assert!(roads > 0);
    }

    #[test]
    fn test_sites_land_in_exact_numbers() {
        let config = WorldConfig::new(7);
        let mut rng = create_rng(&config);
        let grid = generate_terrain(&config, &mut rng).unwrap();

        assert_eq!(
            count_terrain(&grid, TerrainKind::Chapel),
            config.chapels as usize
        );
        assert_eq!(count_terrain(&grid, TerrainKind::Inn), config.inns as usize);
    }

    #[test]
    fn test_fresh_grid_starts_empty_of_agents() {
        let config = WorldConfig::new(11);
        let mut rng = create_rng(&config);
        let grid = generate_terrain(&config, &mut rng).unwrap();
        for y in 0..grid.height {
            for x in 0..grid.width {
                let tile = grid.tile(Coord::new(x, y));
                assert!(tile.occupant.is_none());
                assert!(tile.camp.is_none());
                assert_eq!(tile.gold, 0);
            }
        }
    }
}
