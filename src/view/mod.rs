//! # View Module
//!
//! Read-only projections of the world for frontends and tooling.
//!
//! The simulation never draws anything itself; it hands out snapshots. A
//! [`MapWindow`] is the classic viewport centered on the player,
//! [`HudSnapshot`] is the status line, and [`WorldSnapshot`] bundles both
//! with the tick's messages into one serializable record for recording and
//! debugging.

pub mod hud;

pub use hud::*;

use crate::game::{Coord, RunStatus, Species, TerrainKind, WorldState};
use crate::{OverworldError, OverworldResult};
use serde::{Deserialize, Serialize};

/// Width of the viewport, in tiles.
pub const VIEW_TILES_X: u32 = 13;
/// Height of the viewport, in tiles.
pub const VIEW_TILES_Y: u32 = 21;

/// What one tile looks like from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub terrain: TerrainKind,
    pub gold: u32,
    pub occupant: Option<Species>,
}

/// A viewport centered on the player, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapWindow {
    pub width: u32,
    pub height: u32,
    /// World coordinates of the window's top-left tile
    pub origin: Coord,
    tiles: Vec<TileView>,
}

impl MapWindow {
    /// Captures the viewport around the player, wrapping across the world
    /// seams as needed.
    pub fn around_player(state: &WorldState) -> Self {
        let center = state.player().pos;
        let half_x = (VIEW_TILES_X / 2) as i32;
        let half_y = (VIEW_TILES_Y / 2) as i32;
        let origin = state
            .grid
            .wrap_point(center.x as i32 - half_x, center.y as i32 - half_y);
        let mut tiles = Vec::with_capacity((VIEW_TILES_X * VIEW_TILES_Y) as usize);
        for y in 0..VIEW_TILES_Y as i32 {
            for x in 0..VIEW_TILES_X as i32 {
                let pos = state.grid.wrap_point(
                    center.x as i32 - half_x + x,
                    center.y as i32 - half_y + y,
                );
                let tile = state.grid.tile(pos);
                let occupant = tile
                    .occupant
                    .and_then(|id| state.agents.get(id))
                    .map(|agent| agent.species);
                tiles.push(TileView {
                    terrain: tile.terrain,
                    gold: tile.gold,
                    occupant,
                });
            }
        }
        Self {
            width: VIEW_TILES_X,
            height: VIEW_TILES_Y,
            origin,
            tiles,
        }
    }

    /// Tile at window coordinates.
    pub fn tile(&self, x: u32, y: u32) -> &TileView {
        &self.tiles[(y * self.width + x) as usize]
    }

    /// Window coordinates of the player, always the center tile.
    pub fn center() -> (u32, u32) {
        (VIEW_TILES_X / 2, VIEW_TILES_Y / 2)
    }
}

/// Serializable record of one moment in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub turn: u64,
    pub status: RunStatus,
    pub hud: HudSnapshot,
    pub window: MapWindow,
    pub messages: Vec<String>,
}

impl WorldSnapshot {
    /// Captures the current world plus the messages the last tick produced.
    pub fn capture(state: &WorldState, messages: &[String]) -> Self {
        Self {
            turn: state.turn,
            status: state.status,
            hud: HudSnapshot::capture(state),
            window: MapWindow::around_player(state),
            messages: messages.to_vec(),
        }
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> OverworldResult<String> {
        serde_json::to_string_pretty(self).map_err(OverworldError::from)
    }
}
