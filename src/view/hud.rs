//! Status line projection: position on top, vitals along the bottom.

use crate::game::{WorldState, XpCurve};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The player's readout for one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub x: u32,
    pub y: u32,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub gold: u32,
    pub exp: u64,
    /// Total experience the next level requires
    pub exp_next: u64,
    /// The player has drawn blood at least once
    pub bloodied: bool,
    pub alive: bool,
}

impl HudSnapshot {
    /// Reads the player's vitals out of the world.
    pub fn capture(state: &WorldState) -> Self {
        let player = state.player();
        Self {
            x: player.pos.x,
            y: player.pos.y,
            level: player.level,
            hp: player.hp,
            max_hp: player.max_hp,
            gold: player.gold,
            exp: player.exp,
            exp_next: XpCurve::total_for(player.level),
            bloodied: player.exp > 0,
            alive: player.is_alive(),
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {} Y: {} LV: {} HP: {}/{} GP: {} XP: {}/{}",
            self.x, self.y, self.level, self.hp, self.max_hp, self.gold, self.exp, self.exp_next
        )
    }
}
