//! # Monster AI
//!
//! One decision function, run for every monster every tick. Layers, in
//! priority order: attack an adjacent enemy, maintain or acquire a quarry,
//! tether home when too far out, then steer one step along the shortest
//! wrapped route. Monsters with nothing to do occasionally wander.
//!
//! The function only decides; the move step executes the offset and
//! resolves collisions, so a blocked decision is a quiet no-op.

use crate::game::{mod_greater, mod_less, AgentId, Coord, Offset, Pursuit, WorldGrid, WorldState};
use log::debug;
use rand::Rng;

/// Picks this tick's movement offset for one monster and updates its
/// pursuit in place. Returns hold if the agent is gone.
pub fn plan_monster_move(state: &mut WorldState, id: AgentId) -> Offset {
    let Some(agent) = state.agents.get(id) else {
        return Offset::HOLD;
    };
    let pos = agent.pos;
    let species = agent.species;
    let home = agent.home;
    let mut pursuit = agent.pursuit;

    // An adjacent enemy preempts everything else; the move step resolves
    // the attack. Pursuit is left exactly as it was.
    for offset in Offset::CARDINALS {
        let neighbor = state.grid.step(pos, offset);
        if let Some(occupant) = state.grid.occupant(neighbor) {
            if state
                .agents
                .get(occupant)
                .map_or(false, |other| other.species != species)
            {
                return offset;
            }
        }
    }

    // Forget a quarry that no longer exists or slipped out of range.
    if let Some(Pursuit::Agent(quarry)) = pursuit {
        match state.agents.get(quarry) {
            None => pursuit = None,
            Some(other) if state.grid.taxicab(pos, other.pos) > state.config.monster_giveup => {
                pursuit = None;
            }
            Some(_) => {}
        }
    }

    // Acquisition: the first enemy in the scan wins, nearest or not.
    if pursuit.is_none() {
        let radius = state.config.monster_radius as i32;
        'scan: for dx in -radius..=radius {
            for dy in -radius..=radius {
                let probe = state.grid.wrap_point(pos.x as i32 + dx, pos.y as i32 + dy);
                if let Some(occupant) = state.grid.occupant(probe) {
                    if state
                        .agents
                        .get(occupant)
                        .map_or(false, |other| other.species != species)
                    {
                        debug!(
                            "{} at ({}, {}) starts hunting",
                            species.name(),
                            pos.x,
                            pos.y
                        );
                        pursuit = Some(Pursuit::Agent(occupant));
                        break 'scan;
                    }
                }
            }
        }
    }

    // Too far from home: turn back, whatever else was planned.
    if let Some(home) = home {
        if state.grid.taxicab(pos, home) > state.config.monster_tired {
            if pursuit != Some(Pursuit::Point(home)) {
                debug!("{} at ({}, {}) turns home", species.name(), pos.x, pos.y);
            }
            pursuit = Some(Pursuit::Point(home));
        }
    }

    let goal = match pursuit {
        Some(Pursuit::Agent(quarry)) => state.agents.get(quarry).map(|other| other.pos),
        Some(Pursuit::Point(point)) => Some(point),
        None => None,
    };
    let decision = match goal {
        Some(goal) => steer(state, &mut pursuit, pos, goal),
        None => wander(state),
    };

    state.agents[id].pursuit = pursuit;
    decision
}

/// One step along the shortest wrapped route toward `goal`, dodging
/// perpendicular when the direct step is blocked. Clears the pursuit on
/// arrival.
fn steer(state: &mut WorldState, pursuit: &mut Option<Pursuit>, pos: Coord, goal: Coord) -> Offset {
    let xdiff: i32 = if mod_greater(pos.x, goal.x, state.grid.width) {
        -1
    } else if mod_less(pos.x, goal.x, state.grid.width) {
        1
    } else {
        0
    };
    let ydiff: i32 = if mod_greater(pos.y, goal.y, state.grid.height) {
        -1
    } else if mod_less(pos.y, goal.y, state.grid.height) {
        1
    } else {
        0
    };

    if xdiff == 0 && ydiff == 0 {
        *pursuit = None;
        return Offset::HOLD;
    }

    let open =
        |grid: &WorldGrid, offset: Offset| grid.tile(grid.step(pos, offset)).is_open_for_ai();

    if xdiff == 0 {
        let ahead = Offset::new(0, ydiff);
        if open(&state.grid, ahead) {
            return ahead;
        }
        // Dodge sideways: try one flank, fall back to the other unchecked.
        let (first, second) = if state.rng.gen_bool(0.5) {
            (Offset::new(-1, 0), Offset::new(1, 0))
        } else {
            (Offset::new(1, 0), Offset::new(-1, 0))
        };
        return if open(&state.grid, first) { first } else { second };
    }

    if ydiff == 0 {
        let ahead = Offset::new(xdiff, 0);
        if open(&state.grid, ahead) {
            return ahead;
        }
        let (first, second) = if state.rng.gen_bool(0.5) {
            (Offset::new(0, -1), Offset::new(0, 1))
        } else {
            (Offset::new(0, 1), Offset::new(0, -1))
        };
        return if open(&state.grid, first) { first } else { second };
    }

    // Both axes live: a coin picks which to try first.
    let (first, second) = if state.rng.gen_bool(0.5) {
        (Offset::new(xdiff, 0), Offset::new(0, ydiff))
    } else {
        (Offset::new(0, ydiff), Offset::new(xdiff, 0))
    };
    if open(&state.grid, first) {
        first
    } else if open(&state.grid, second) {
        second
    } else {
        Offset::HOLD
    }
}

/// Idle behavior: a single random cardinal step, sometimes.
fn wander(state: &mut WorldState) -> Offset {
    if state.rng.gen_bool(state.config.monster_friskiness) {
        Offset::CARDINALS[state.rng.gen_range(0..Offset::CARDINALS.len())]
    } else {
        Offset::HOLD
    }
}
