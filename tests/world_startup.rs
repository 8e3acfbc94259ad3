//! Integration test to ensure a full-size world generates with its wiring
//! intact.

use std::collections::HashMap;

use overworld::{Coord, OverworldResult, Species, TerrainKind, WorldConfig, WorldState};

#[test]
fn test_fresh_world_has_consistent_wiring() -> OverworldResult<()> {
    let state = WorldState::generate(WorldConfig::new(20260821))?;

    // Grid dimensions follow the config
    assert_eq!(state.grid.width, state.config.world_width);
    assert_eq!(state.grid.height, state.config.world_height);

    // The player is the only agent so far, standing on a passable tile
    assert_eq!(state.agents.len(), 1);
    assert!(state.roster.is_empty());
    let player = state.player();
    assert_eq!(player.species, Species::Player);
    assert!(state.grid.tile(player.pos).is_passable());
    assert_eq!(state.grid.occupant(player.pos), Some(state.player_id));
    assert_eq!(state.turn, 0);

    Ok(())
}

#[test]
fn test_camps_sit_in_forest_pockets() -> OverworldResult<()> {
    let state = WorldState::generate(WorldConfig::new(31337))?;

    assert_eq!(state.camps.len(), state.config.camps as usize);
    for (id, camp) in &state.camps {
        let tile = state.grid.tile(camp.pos);
        assert_eq!(tile.terrain, TerrainKind::Camp);
        assert_eq!(tile.camp, Some(id));
        assert_eq!(camp.population, 0);
        assert_eq!(camp.countdown, state.config.camp_countdown);

        // Founding required a 3x3 forest pocket, and nothing since has
        // touched the ring around the camp tile
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let neighbor = state
                    .grid
                    .tile_at(camp.pos.x as i32 + dx, camp.pos.y as i32 + dy);
                assert_eq!(neighbor.terrain, TerrainKind::Forest);
            }
        }
    }

    Ok(())
}

#[test]
fn test_site_counts_match_the_config() -> OverworldResult<()> {
    let state = WorldState::generate(WorldConfig::new(777))?;

    let mut counts: HashMap<TerrainKind, u32> = HashMap::new();
    for y in 0..state.grid.height {
        for x in 0..state.grid.width {
            let terrain = state.grid.tile(Coord::new(x, y)).terrain;
            *counts.entry(terrain).or_insert(0) += 1;
        }
    }

    // Rejection-sampled sites land exactly as many times as configured
    assert_eq!(counts.get(&TerrainKind::Chapel), Some(&state.config.chapels));
    assert_eq!(counts.get(&TerrainKind::Inn), Some(&state.config.inns));
    assert_eq!(counts.get(&TerrainKind::Camp), Some(&state.config.camps));

    // Every road starts at a castle; merges can only drop end castles
    let castles = counts.get(&TerrainKind::Castle).copied().unwrap_or(0);
    assert!(castles >= 1);
    assert!(castles <= 2 * state.config.castles);
    assert!(counts.get(&TerrainKind::Road).copied().unwrap_or(0) > 0);
    assert!(counts.get(&TerrainKind::Forest).copied().unwrap_or(0) > 0);

    Ok(())
}

#[test]
fn test_equal_seeds_build_equal_worlds() -> OverworldResult<()> {
    let a = WorldState::generate(WorldConfig::new(4242))?;
    let b = WorldState::generate(WorldConfig::new(4242))?;

    assert_eq!(a.player().pos, b.player().pos);
    for y in 0..a.grid.height {
        for x in 0..a.grid.width {
            let pos = Coord::new(x, y);
            assert_eq!(a.grid.tile(pos).terrain, b.grid.tile(pos).terrain);
        }
    }

    let camps_a: Vec<_> = a.camps.values().map(|camp| (camp.pos, camp.species)).collect();
    let camps_b: Vec<_> = b.camps.values().map(|camp| (camp.pos, camp.species)).collect();
    assert_eq!(camps_a, camps_b);

    Ok(())
}
