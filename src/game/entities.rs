//! # Agents
//!
//! The player and the monsters share one agent type; species carries the
//! stat table and a monster's behavior hangs off its camp link and current
//! pursuit. Experience requirements live in a memoized ladder.

use crate::game::{AgentId, CampId, Coord};
use serde::{Deserialize, Serialize};

/// The kinds of creature that can occupy a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Player,
    Swine,
    Orc,
}

impl Species {
    /// Gold a freshly spawned creature carries (and drops when killed).
    pub fn base_gold(self) -> u32 {
        match self {
            Species::Player => 0,
            Species::Swine => 3,
            Species::Orc => 5,
        }
    }

    /// Starting and per-spawn hit points.
    pub fn base_hp(self) -> i32 {
        match self {
            Species::Player => 10,
            Species::Swine => 3,
            Species::Orc => 4,
        }
    }

    /// Flat attack power before the level bonus.
    pub fn base_attack(self) -> i32 {
        match self {
            Species::Player => 1,
            Species::Swine => 2,
            Species::Orc => 2,
        }
    }

    /// Lowercase display name, as used in combat messages.
    pub fn name(self) -> &'static str {
        match self {
            Species::Player => "player",
            Species::Swine => "swine",
            Species::Orc => "orc",
        }
    }

    /// The species camps can spawn.
    pub fn monsters() -> [Species; 2] {
        [Species::Swine, Species::Orc]
    }
}

/// What a monster is currently steering toward.
///
/// Either a live quarry looked up in the agent arena each tick, or a fixed
/// point (the home camp site a tired monster walks back to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pursuit {
    /// Chase a living agent by id
    Agent(AgentId),
    /// Walk to a fixed coordinate, then stop
    Point(Coord),
}

/// A creature on the grid: the player or a camp-spawned monster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Arena key; assigned on insertion
    pub id: AgentId,
    pub species: Species,
    /// Current tile; kept consistent with the tile's occupant field
    pub pos: Coord,
    /// May go negative on the killing blow
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub gold: u32,
    pub level: u32,
    pub exp: u64,
    /// Owning camp, for population bookkeeping; player has none
    pub camp: Option<CampId>,
    /// The camp site this monster tethers to, kept even after the camp
    /// itself is disbanded
    pub home: Option<Coord>,
    pub pursuit: Option<Pursuit>,
}

impl Agent {
    /// Creates the player at a position.
    pub fn player(pos: Coord) -> Self {
        Self::with_species(Species::Player, pos, None, None)
    }

    /// Creates a monster, optionally tied to a camp and a home site.
    pub fn monster(
        species: Species,
        pos: Coord,
        camp: Option<CampId>,
        home: Option<Coord>,
    ) -> Self {
        Self::with_species(species, pos, camp, home)
    }

    fn with_species(
        species: Species,
        pos: Coord,
        camp: Option<CampId>,
        home: Option<Coord>,
    ) -> Self {
        Self {
            id: AgentId::default(),
            species,
            pos,
            hp: species.base_hp(),
            max_hp: species.base_hp(),
            attack: species.base_attack(),
            gold: species.base_gold(),
            level: 1,
            exp: 0,
            camp,
            home,
            pursuit: None,
        }
    }

    pub fn is_player(&self) -> bool {
        self.species == Species::Player
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Damage dealt per connecting swing.
    pub fn damage(&self) -> i32 {
        self.attack + self.level as i32
    }

    /// Advances one level: +2 max hp, +2 current hp.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += 2;
        self.hp += 2;
    }
}

/// The experience ladder: `requirement(0) = 0`, and each level adds
/// `floor(5 * 1.3^n)` on top of the previous requirement.
///
/// The ladder is extended lazily and memoized; [`XpCurve::total_for`] is the
/// same sum computed fresh, for read-only callers.
///
/// # Examples
///
/// ```
/// use overworld::XpCurve;
///
/// let mut curve = XpCurve::new();
/// assert_eq!(curve.requirement(0), 0);
/// assert_eq!(curve.requirement(1), 6);
/// assert_eq!(curve.requirement(2), 14);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpCurve {
    ladder: Vec<u64>,
}

impl XpCurve {
    pub fn new() -> Self {
        Self { ladder: vec![0] }
    }

    fn rung(level: u32) -> u64 {
        (5.0 * 1.3f64.powi(level as i32)).floor() as u64
    }

    /// Total experience needed to advance past `level`, memoized.
    pub fn requirement(&mut self, level: u32) -> u64 {
        while self.ladder.len() <= level as usize {
            let next = self.ladder.len() as u32;
            let prev = self.ladder[next as usize - 1];
            self.ladder.push(prev + Self::rung(next));
        }
        self.ladder[level as usize]
    }

    /// The same requirement computed without touching a ladder.
    pub fn total_for(level: u32) -> u64 {
        (1..=level).map(Self::rung).sum()
    }
}

impl Default for XpCurve {
    fn default() -> Self {
        Self::new()
    }
}
