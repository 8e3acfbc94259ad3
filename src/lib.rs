//! # Overworld
//!
//! A single-player overworld simulation on a toroidal tile grid: procedural
//! terrain, monster camps, autonomous pursuit AI, and tile-occupancy combat.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a handful of core concepts:
//!
//! - **World State**: one aggregate owning the grid, agent and camp arenas,
//!   the RNG, and the turn loop
//! - **Modular Geometry**: wraparound coordinates with shortest-route
//!   distance and ordering predicates
//! - **Agent AI**: layered targeting (threat, acquisition, give-up, tether)
//!   feeding a modular steering rule
//! - **Generation System**: layered coherent-noise terrain plus site and
//!   camp placement with bounded rejection sampling
//! - **Contracts**: read-only snapshot types (map window, HUD, full world)
//!   and a device-free command enum for front ends
//!
//! Rendering, input polling, and audio live in collaborating crates; this
//! crate only simulates and exposes serializable views.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod view;

pub use config::WorldConfig;
pub use game::{
    // From the module root
    AgentId,
    CampId,
    Coord,
    Direction,
    Offset,
    // From entities
    Agent,
    Pursuit,
    Species,
    XpCurve,
    // From camps
    Camp,
    // From state
    PlayerAction,
    RunStatus,
    TickReport,
    WorldState,
    // From world
    TerrainKind,
    Tile,
    WorldGrid,
};
pub use input::Command;
pub use view::{HudSnapshot, MapWindow, TileView, WorldSnapshot};

/// Core error type for the overworld engine.
#[derive(thiserror::Error, Debug)]
pub enum OverworldError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Simulation state is invalid
    #[error("Invalid world state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the overworld codebase.
pub type OverworldResult<T> = Result<T, OverworldError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
