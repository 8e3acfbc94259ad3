//! # World State Module
//!
//! Central simulation state and the turn loop.
//!
//! [`WorldState`] owns the grid, the agent and camp arenas, the monster
//! roster, the RNG and the experience ladder. Everything that mutates the
//! world funnels through [`WorldState::move_agent`], which keeps the
//! tile-occupancy bijection intact, and [`WorldState::tick`], which runs one
//! full turn: player first, then every monster, then camp spawns.

use crate::config::WorldConfig;
use crate::game::{
    plan_monster_move, Agent, AgentId, Camp, CampId, Coord, Direction, Offset, Species,
    TerrainKind, WorldGrid, XpCurve,
};
use crate::{generation, OverworldError, OverworldResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// What the player does with their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step (or attack) one tile in a direction
    Move(Direction),
    /// Stand still and let the world act
    Wait,
}

/// Whether the run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The player is alive and ticks are accepted
    Playing,
    /// The player is dead; further ticks are no-ops
    PlayerDied,
}

/// What one tick produced: the new turn count, the messages the player
/// should see, and the run status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub turn: u64,
    pub messages: Vec<String>,
    pub status: RunStatus,
}

/// Central simulation state owning every mutable piece of the world.
///
/// There are no global registries: tiles refer to agents and camps by arena
/// key, and the arenas live here.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Balance and generation parameters
    pub config: WorldConfig,
    /// The toroidal tile grid
    pub grid: WorldGrid,
    /// Agent arena; the player stays here even after death
    pub agents: SlotMap<AgentId, Agent>,
    /// Camp arena; disband and replacement keep its size constant
    pub camps: SlotMap<CampId, Camp>,
    /// Monster ids in spawn order, compacted after every tick's scan
    pub roster: Vec<AgentId>,
    /// The player's arena key
    pub player_id: AgentId,
    /// Memoized experience ladder
    pub xp: XpCurve,
    /// The simulation's random stream
    pub rng: StdRng,
    /// Completed tick count
    pub turn: u64,
    /// Current run status
    pub status: RunStatus,
    /// Messages produced by the tick in progress
    pub messages: Vec<String>,
}

impl WorldState {
    /// Generates a full world from a config: terrain, player spawn, camps.
    ///
    /// # Examples
    ///
    /// ```
    /// use overworld::{WorldConfig, WorldState};
    ///
    /// let state = WorldState::generate(WorldConfig::new(12345)).unwrap();
    /// assert_eq!(state.camps.len() as u32, state.config.camps);
    /// assert_eq!(state.turn, 0);
    /// ```
    pub fn generate(config: WorldConfig) -> OverworldResult<Self> {
        let mut rng = generation::create_rng(&config);
        let grid = generation::generate_terrain(&config, &mut rng)?;
        let player_pos = generation::random_open_tile(&grid, &config, &mut rng)?;
        let mut state = Self::from_grid(config, grid, player_pos, rng)?;
        for _ in 0..state.config.camps {
            generation::place_camp(&mut state)?;
        }
        info!(
            "world ready: {}x{} tiles, {} camps, player at ({}, {})",
            state.grid.width,
            state.grid.height,
            state.camps.len(),
            player_pos.x,
            player_pos.y
        );
        Ok(state)
    }

    /// Builds a state around an existing grid and places the player.
    ///
    /// The grid must match the config's dimensions and the spawn tile must
    /// be passable and vacant. The world starts with no monsters and no
    /// camps; camps spawn their population over time.
    pub fn from_grid(
        config: WorldConfig,
        grid: WorldGrid,
        player_pos: Coord,
        rng: StdRng,
    ) -> OverworldResult<Self> {
        if grid.width != config.world_width || grid.height != config.world_height {
            return Err(OverworldError::InvalidState(format!(
                "grid is {}x{} but the config says {}x{}",
                grid.width, grid.height, config.world_width, config.world_height
            )));
        }
        let mut state = Self {
            config,
            grid,
            agents: SlotMap::with_key(),
            camps: SlotMap::with_key(),
            roster: Vec::new(),
            player_id: AgentId::default(),
            xp: XpCurve::new(),
            rng,
            turn: 0,
            status: RunStatus::Playing,
            messages: Vec::new(),
        };
        if !state.grid.tile(player_pos).is_passable() || state.grid.occupant(player_pos).is_some() {
            return Err(OverworldError::InvalidState(
                "player spawn tile is blocked".to_string(),
            ));
        }
        let player_id = state.agents.insert(Agent::player(player_pos));
        state.agents[player_id].id = player_id;
        state.grid.tile_mut(player_pos).occupant = Some(player_id);
        state.player_id = player_id;
        Ok(state)
    }

    /// The player agent.
    pub fn player(&self) -> &Agent {
        &self.agents[self.player_id]
    }

    /// Looks up any agent, erroring on a stale id.
    pub fn agent(&self, id: AgentId) -> OverworldResult<&Agent> {
        self.agents
            .get(id)
            .ok_or_else(|| OverworldError::InvalidState(format!("no agent for {:?}", id)))
    }

    /// Adds a monster to the arena, the roster, and its tile. If a camp id
    /// is given, that camp's population grows by one.
    pub fn insert_monster(
        &mut self,
        species: Species,
        pos: Coord,
        camp: Option<CampId>,
        home: Option<Coord>,
    ) -> OverworldResult<AgentId> {
        if !self.grid.tile(pos).is_open_for_ai() {
            return Err(OverworldError::InvalidState(format!(
                "cannot spawn a {} on blocked tile ({}, {})",
                species.name(),
                pos.x,
                pos.y
            )));
        }
        let id = self.agents.insert(Agent::monster(species, pos, camp, home));
        self.agents[id].id = id;
        self.grid.tile_mut(pos).occupant = Some(id);
        self.roster.push(id);
        if let Some(camp_id) = camp {
            if let Some(camp) = self.camps.get_mut(camp_id) {
                camp.population += 1;
            }
        }
        Ok(id)
    }

    /// Registers a camp on a tile, converting the terrain.
    pub fn insert_camp(&mut self, pos: Coord, species: Species) -> CampId {
        let countdown = self.config.camp_countdown;
        let id = self.camps.insert(Camp::new(pos, species, countdown));
        self.camps[id].id = id;
        let tile = self.grid.tile_mut(pos);
        tile.terrain = TerrainKind::Camp;
        tile.camp = Some(id);
        id
    }

    /// Advances the world by one turn.
    ///
    /// The player acts first, then every monster already on the roster,
    /// then camps count down and spawn. Monsters killed mid-scan are out of
    /// the arena instantly and are skipped when their roster slot comes up;
    /// the roster itself is compacted once the scan is over.
    pub fn tick(&mut self, action: PlayerAction) -> OverworldResult<TickReport> {
        if self.status != RunStatus::Playing {
            return Ok(TickReport {
                turn: self.turn,
                messages: Vec::new(),
                status: self.status,
            });
        }
        self.messages.clear();

        match action {
            PlayerAction::Move(direction) => self.move_agent(self.player_id, direction.offset())?,
            PlayerAction::Wait => {}
        }

        for i in 0..self.roster.len() {
            let id = self.roster[i];
            if !self.agents.contains_key(id) {
                continue;
            }
            let offset = plan_monster_move(self, id);
            self.move_agent(id, offset)?;
        }
        self.roster.retain(|&id| self.agents.contains_key(id));

        self.run_camp_spawns()?;

        if self.player().hp <= 0 {
            self.status = RunStatus::PlayerDied;
        }
        self.turn += 1;
        Ok(TickReport {
            turn: self.turn,
            messages: std::mem::take(&mut self.messages),
            status: self.status,
        })
    }

    /// Executes one movement offset for one agent.
    ///
    /// Impassable terrain and same-species occupants are silent no-ops; a
    /// vacant tile relocates the agent and triggers what it finds there; an
    /// enemy occupant resolves a melee swing instead of moving.
    pub fn move_agent(&mut self, id: AgentId, offset: Offset) -> OverworldResult<()> {
        if offset.is_hold() {
            return Ok(());
        }
        let Some(agent) = self.agents.get(id) else {
            return Ok(());
        };
        let from = agent.pos;
        let species = agent.species;
        let dest = self.grid.step(from, offset);
        let tile = self.grid.tile(dest);
        if !tile.is_passable() {
            return Ok(());
        }
        let occupant = tile.occupant;
        match occupant {
            None => self.relocate(id, from, dest),
            Some(defender) if self.agents[defender].species != species => {
                self.melee(id, defender)
            }
            Some(_) => Ok(()),
        }
    }

    /// Moves an agent onto a vacant tile and handles the arrival: gold
    /// pickup, foreign-camp disbanding, inn healing.
    fn relocate(&mut self, id: AgentId, from: Coord, dest: Coord) -> OverworldResult<()> {
        self.grid.tile_mut(from).occupant = None;
        self.grid.tile_mut(dest).occupant = Some(id);
        self.agents[id].pos = dest;

        let loot = self.grid.tile(dest).gold;
        if loot > 0 {
            self.grid.tile_mut(dest).gold = 0;
            let agent = &mut self.agents[id];
            agent.gold += loot;
            if agent.is_player() {
                self.messages.push(format!("You picked up {} GP.", loot));
            }
        }

        if let Some(camp_id) = self.grid.tile(dest).camp {
            let matches_mover = self
                .camps
                .get(camp_id)
                .map_or(true, |camp| camp.species == self.agents[id].species);
            if !matches_mover {
                self.disband_camp(camp_id, id)?;
            }
        }

        let agent = &self.agents[id];
        if agent.is_player()
            && self.grid.tile(dest).terrain == TerrainKind::Inn
            && agent.hp < agent.max_hp
        {
            let cost = self.config.inn_cost;
            if agent.gold >= cost {
                let agent = &mut self.agents[id];
                agent.gold -= cost;
                agent.hp = agent.max_hp;
                self.messages.push("You heal at the inn.".to_string());
            } else {
                self.messages
                    .push(format!("Come back when you have {} gold.", cost));
            }
        }
        Ok(())
    }

    /// Removes a camp the mover just stepped on, pays the bounty, scars the
    /// tile, and founds the replacement camp elsewhere.
    fn disband_camp(&mut self, camp_id: CampId, by: AgentId) -> OverworldResult<()> {
        let Some(camp) = self.camps.remove(camp_id) else {
            return Ok(());
        };
        let bonus = camp.species.base_gold() * 5;
        let mover = &mut self.agents[by];
        mover.gold += bonus;
        if mover.is_player() {
            self.messages
                .push(format!("{} camp disbanded.", camp.species.name()));
        }
        let tile = self.grid.tile_mut(camp.pos);
        tile.camp = None;
        tile.terrain = TerrainKind::CampDestroyed;
        info!(
            "{} camp at ({}, {}) disbanded",
            camp.species.name(),
            camp.pos.x,
            camp.pos.y
        );
        generation::place_camp(self)?;
        Ok(())
    }

    /// One melee swing from attacker to defender. Messages are emitted only
    /// when the player is on one end of it.
    fn melee(&mut self, attacker_id: AgentId, defender_id: AgentId) -> OverworldResult<()> {
        let attacker = &self.agents[attacker_id];
        let attacker_is_player = attacker.is_player();
        let attacker_name = attacker.species.name();
        let damage = attacker.damage();
        let defender = &self.agents[defender_id];
        let defender_is_player = defender.is_player();
        let defender_name = defender.species.name();

        if self.rng.gen_bool(self.config.hit_chance) {
            if attacker_is_player {
                self.messages
                    .push(format!("You hit the {} for {} HP", defender_name, damage));
            } else if defender_is_player {
                self.messages
                    .push(format!("The {} hit you for {} HP", attacker_name, damage));
            }
            let defender = &mut self.agents[defender_id];
            defender.hp -= damage;
            if defender.hp <= 0 {
                self.resolve_kill(attacker_id, defender_id)?;
            }
        } else if attacker_is_player {
            self.messages
                .push(format!("You missed the {}", defender_name));
        } else if defender_is_player {
            self.messages
                .push(format!("The {} missed you", attacker_name));
        }
        Ok(())
    }

    /// Settles a death: experience and a single level check for the killer,
    /// the corpse's gold onto the tile, camp population bookkeeping, and
    /// arena removal for monsters. A dead player keeps the tile.
    fn resolve_kill(&mut self, attacker_id: AgentId, victim_id: AgentId) -> OverworldResult<()> {
        let victim = &self.agents[victim_id];
        let victim_level = victim.level as u64;
        let victim_gold = victim.gold;
        let victim_pos = victim.pos;
        let victim_camp = victim.camp;
        let victim_is_player = victim.is_player();
        let victim_name = victim.species.name();
        let attacker_is_player = self.agents[attacker_id].is_player();

        if attacker_is_player {
            self.messages.push(format!(
                "You killed the {}, gaining {} XP",
                victim_name, victim_level
            ));
        }
        if victim_is_player {
            let attacker_name = self.agents[attacker_id].species.name();
            self.messages
                .push(format!("You have been killed by the {}", attacker_name));
        }

        let needed = self.xp.requirement(self.agents[attacker_id].level);
        let attacker = &mut self.agents[attacker_id];
        attacker.exp += victim_level;
        if attacker.exp >= needed {
            attacker.level_up();
            if attacker_is_player {
                self.messages.push("You have leveled up.".to_string());
            }
        }

        let tile = self.grid.tile_mut(victim_pos);
        tile.gold = victim_gold;
        if !victim_is_player {
            tile.occupant = None;
        }
        if let Some(camp_id) = victim_camp {
            if let Some(camp) = self.camps.get_mut(camp_id) {
                camp.population = camp.population.saturating_sub(1);
            }
        }
        if victim_is_player {
            self.status = RunStatus::PlayerDied;
            info!("player killed at ({}, {})", victim_pos.x, victim_pos.y);
        } else {
            self.agents.remove(victim_id);
            debug!("{} killed at ({}, {})", victim_name, victim_pos.x, victim_pos.y);
        }
        Ok(())
    }

    /// Camp phase: countdowns run while below capacity, and an expired
    /// countdown spawns one monster on the camp tile if it is vacant. A
    /// blocked camp keeps its expired countdown until the spawn lands.
    fn run_camp_spawns(&mut self) -> OverworldResult<()> {
        let camp_ids: Vec<CampId> = self.camps.keys().collect();
        for camp_id in camp_ids {
            let Some(camp) = self.camps.get(camp_id) else {
                continue;
            };
            let pos = camp.pos;
            let species = camp.species;
            if !camp.is_full(self.config.camp_capacity) {
                self.camps[camp_id].countdown -= 1;
            }
            if self.camps[camp_id].ready_to_spawn()
                && self.grid.tile(pos).occupant.is_none()
            {
                self.insert_monster(species, pos, Some(camp_id), Some(pos))?;
                self.camps[camp_id].countdown = self.config.camp_countdown;
                debug!(
                    "camp at ({}, {}) spawned a {}",
                    pos.x,
                    pos.y,
                    species.name()
                );
            }
        }
        Ok(())
    }
}
