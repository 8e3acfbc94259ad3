//! Long-run integration checks over many simulated turns.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use overworld::{
    CampId, Coord, Direction, HudSnapshot, MapWindow, OverworldResult, PlayerAction, RunStatus,
    Species, WorldConfig, WorldState,
};

/// One uniformly random step or wait, like a player mashing movement keys.
fn random_action(rng: &mut StdRng) -> PlayerAction {
    match rng.gen_range(0..5) {
        0 => PlayerAction::Move(Direction::North),
        1 => PlayerAction::Move(Direction::South),
        2 => PlayerAction::Move(Direction::East),
        3 => PlayerAction::Move(Direction::West),
        _ => PlayerAction::Wait,
    }
}

/// Checks every occupancy and bookkeeping invariant that must hold between
/// turns.
fn assert_world_consistent(state: &WorldState) {
    // Tile -> agent and tile -> camp references resolve and point back,
    // and the occupied-tile count rules out orphaned occupants
    let mut occupied = 0usize;
    for y in 0..state.grid.height {
        for x in 0..state.grid.width {
            let pos = Coord::new(x, y);
            let tile = state.grid.tile(pos);
            if let Some(id) = tile.occupant {
                occupied += 1;
                let agent = state
                    .agents
                    .get(id)
                    .unwrap_or_else(|| panic!("stale occupant at ({}, {})", x, y));
                assert_eq!(agent.pos, pos);
            }
            if let Some(camp_id) = tile.camp {
                let camp = state
                    .camps
                    .get(camp_id)
                    .unwrap_or_else(|| panic!("stale camp at ({}, {})", x, y));
                assert_eq!(camp.pos, pos);
            }
        }
    }
    assert_eq!(occupied, state.agents.len());

    // Agent -> tile direction of the bijection
    for (id, agent) in &state.agents {
        assert_eq!(state.grid.occupant(agent.pos), Some(id));
    }

    // Camp books: disbanded camps are replaced immediately, populations
    // never exceed capacity, and each count matches the living members
    let mut members: HashMap<CampId, u32> = HashMap::new();
    for agent in state.agents.values() {
        if let Some(camp_id) = agent.camp {
            *members.entry(camp_id).or_insert(0) += 1;
        }
    }
    assert_eq!(state.camps.len(), state.config.camps as usize);
    for (id, camp) in &state.camps {
        assert!(camp.population <= state.config.camp_capacity);
        assert_eq!(camp.population, members.get(&id).copied().unwrap_or(0));
    }

    // Roster holds every living monster exactly once and never the player
    let unique: HashSet<_> = state.roster.iter().copied().collect();
    assert_eq!(unique.len(), state.roster.len());
    assert_eq!(state.roster.len(), state.agents.len() - 1);
    for &id in &state.roster {
        let monster = state.agents.get(id).unwrap_or_else(|| panic!("dead id in roster"));
        assert_ne!(monster.species, Species::Player);
    }
}

#[test]
fn test_long_random_walk_keeps_the_books_straight() -> OverworldResult<()> {
    let mut state = WorldState::generate(WorldConfig::new(987_654_321))?;
    let mut keys = StdRng::seed_from_u64(5);

    assert_world_consistent(&state);

    let mut last_turn = 0;
    for _ in 0..80 {
        let report = state.tick(random_action(&mut keys))?;
        assert_world_consistent(&state);

        // The turn counter moves while playing and freezes after death
        assert!(report.turn >= last_turn);
        if report.status == RunStatus::Playing {
            assert_eq!(report.turn, last_turn + 1);
        }
        last_turn = report.turn;
    }

    Ok(())
}

#[test]
fn test_equal_seeds_stay_in_lockstep() -> OverworldResult<()> {
    let mut a = WorldState::generate(WorldConfig::new(24680))?;
    let mut b = WorldState::generate(WorldConfig::new(24680))?;
    let mut keys = StdRng::seed_from_u64(13);

    for _ in 0..40 {
        let action = random_action(&mut keys);
        let report_a = a.tick(action)?;
        let report_b = b.tick(action)?;
        assert_eq!(report_a.turn, report_b.turn);
        assert_eq!(report_a.messages, report_b.messages);
        assert_eq!(report_a.status, report_b.status);
        assert_eq!(MapWindow::around_player(&a), MapWindow::around_player(&b));
    }

    assert_eq!(HudSnapshot::capture(&a), HudSnapshot::capture(&b));
    Ok(())
}

#[test]
fn test_camps_field_their_first_monsters_on_schedule() -> OverworldResult<()> {
    let mut state = WorldState::generate(WorldConfig::new(1111))?;
    let countdown = state.config.camp_countdown;

    // No monsters exist until the first countdown expires
    for _ in 0..countdown - 1 {
        state.tick(PlayerAction::Wait)?;
        assert!(state.roster.is_empty());
    }
    state.tick(PlayerAction::Wait)?;

    // Every camp spawned onto its own tile in the same turn
    assert_eq!(state.roster.len(), state.config.camps as usize);
    for &id in &state.roster {
        let monster = state.agent(id)?;
        let camp = &state.camps[monster.camp.unwrap()];
        assert_ne!(monster.species, Species::Player);
        assert_eq!(monster.pos, camp.pos);
        assert_eq!(monster.home, Some(camp.pos));
        assert_eq!(camp.population, 1);
        assert_eq!(camp.countdown, countdown);
    }

    Ok(())
}
