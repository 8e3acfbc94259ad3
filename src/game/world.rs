//! # World Representation
//!
//! The toroidal tile grid. Tiles are created once by generation and mutated
//! in place forever after; terrain, dropped gold, the occupying agent, and
//! the owning camp all live on the tile.

use crate::game::{mod_distance, wrap, AgentId, CampId, Coord, Offset};
use serde::{Deserialize, Serialize};

/// The kinds of terrain a tile can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Plain open ground
    Ground,
    /// Forest; camps are founded only deep inside it
    Forest,
    /// Impassable peaks
    Mountains,
    /// Impassable lakes
    Water,
    /// A road segment between castles
    Road,
    /// A castle at a road terminus
    Castle,
    /// A chapel on open ground
    Chapel,
    /// An inn; heals the player for gold
    Inn,
    /// An active monster camp
    Camp,
    /// The scar left where a camp was disbanded
    CampDestroyed,
}

impl TerrainKind {
    /// Whether agents can stand on this terrain at all.
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Mountains | TerrainKind::Water)
    }
}

/// One cell of the world grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// What the cell is made of
    pub terrain: TerrainKind,
    /// Gold lying on the cell, collected by whoever steps on it
    pub gold: u32,
    /// The agent standing here, if any (at most one)
    pub occupant: Option<AgentId>,
    /// The camp rooted here; set only while `terrain` is [`TerrainKind::Camp`]
    pub camp: Option<CampId>,
}

impl Tile {
    /// Creates an empty tile of the given terrain.
    pub fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            gold: 0,
            occupant: None,
            camp: None,
        }
    }

    /// Whether an agent could ever stand here.
    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    /// Whether a monster may step here right now: passable and vacant.
    pub fn is_open_for_ai(&self) -> bool {
        self.is_passable() && self.occupant.is_none()
    }
}

/// The world: a fixed `width x height` grid on a torus.
///
/// Every addressing method wraps, so any `(i32, i32)` pair resolves to a
/// valid cell and callers never bounds-check.
///
/// # Examples
///
/// ```
/// use overworld::{TerrainKind, WorldGrid};
///
/// let grid = WorldGrid::new(10, 10, TerrainKind::Ground);
/// assert_eq!(grid.tile_at(-1, -1).terrain, TerrainKind::Ground);
/// assert_eq!(grid.wrap_point(-1, 12), overworld::Coord::new(9, 2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGrid {
    /// Width in tiles; the x modulus
    pub width: u32,
    /// Height in tiles; the y modulus
    pub height: u32,
    tiles: Vec<Tile>,
}

impl WorldGrid {
    /// Creates a grid filled with one terrain kind.
    pub fn new(width: u32, height: u32, fill: TerrainKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(fill); (width * height) as usize],
        }
    }

    fn index(&self, pos: Coord) -> usize {
        let x = pos.x % self.width;
        let y = pos.y % self.height;
        (y * self.width + x) as usize
    }

    /// Reduces raw integer coordinates onto the torus.
    pub fn wrap_point(&self, x: i32, y: i32) -> Coord {
        Coord::new(wrap(x, self.width), wrap(y, self.height))
    }

    /// The cell one offset away from `pos`, wrapping at the seams.
    pub fn step(&self, pos: Coord, offset: Offset) -> Coord {
        self.wrap_point(pos.x as i32 + offset.dx, pos.y as i32 + offset.dy)
    }

    /// Modular taxicab distance: the per-axis shortest routes, summed.
    pub fn taxicab(&self, a: Coord, b: Coord) -> u32 {
        mod_distance(a.x, b.x, self.width) + mod_distance(a.y, b.y, self.height)
    }

    /// Read access to the cell at a wrapped coordinate.
    pub fn tile(&self, pos: Coord) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    /// Write access to the cell at a wrapped coordinate.
    pub fn tile_mut(&mut self, pos: Coord) -> &mut Tile {
        let idx = self.index(pos);
        &mut self.tiles[idx]
    }

    /// Read access by raw integers; wraps.
    pub fn tile_at(&self, x: i32, y: i32) -> &Tile {
        let pos = self.wrap_point(x, y);
        self.tile(pos)
    }

    /// Write access by raw integers; wraps.
    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> &mut Tile {
        let pos = self.wrap_point(x, y);
        self.tile_mut(pos)
    }

    /// The agent standing at `pos`, if any.
    pub fn occupant(&self, pos: Coord) -> Option<AgentId> {
        self.tile(pos).occupant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_passability() {
        assert!(TerrainKind::Ground.is_passable());
        assert!(TerrainKind::Forest.is_passable());
        assert!(TerrainKind::Road.is_passable());
        assert!(TerrainKind::Camp.is_passable());
        assert!(TerrainKind::CampDestroyed.is_passable());
        assert!(TerrainKind::Inn.is_passable());
        assert!(!TerrainKind::Mountains.is_passable());
        assert!(!TerrainKind::Water.is_passable());
    }

    #[test]
    fn test_open_for_ai_requires_vacancy() {
        let mut grid = WorldGrid::new(4, 4, TerrainKind::Ground);
        let pos = Coord::new(1, 1);
        assert!(grid.tile(pos).is_open_for_ai());

        grid.tile_mut(pos).occupant = Some(AgentId::default());
        assert!(grid.tile(pos).is_passable());
        assert!(!grid.tile(pos).is_open_for_ai());
    }

    #[test]
    fn test_addressing_wraps() {
        let mut grid = WorldGrid::new(10, 8, TerrainKind::Ground);
        grid.tile_at_mut(9, 7).terrain = TerrainKind::Castle;

        assert_eq!(grid.tile_at(-1, -1).terrain, TerrainKind::Castle);
        assert_eq!(grid.tile_at(19, 15).terrain, TerrainKind::Castle);
        assert_eq!(grid.wrap_point(-1, -1), Coord::new(9, 7));
    }

    #[test]
    fn test_step_crosses_the_seam() {
        let grid = WorldGrid::new(10, 8, TerrainKind::Ground);
        let origin = Coord::new(0, 0);
        assert_eq!(grid.step(origin, Offset::new(-1, 0)), Coord::new(9, 0));
        assert_eq!(grid.step(origin, Offset::new(0, -1)), Coord::new(0, 7));
        assert_eq!(grid.step(Coord::new(9, 7), Offset::new(1, 1)), origin);
    }

    #[test]
    fn test_taxicab_takes_the_short_way_round() {
        let grid = WorldGrid::new(10, 10, TerrainKind::Ground);
        assert_eq!(grid.taxicab(Coord::new(0, 0), Coord::new(9, 9)), 2);
        assert_eq!(grid.taxicab(Coord::new(2, 3), Coord::new(2, 3)), 0);
        assert_eq!(grid.taxicab(Coord::new(0, 0), Coord::new(5, 5)), 10);
    }
}
