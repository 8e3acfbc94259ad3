//! # Input Module
//!
//! Command parsing for driving the simulation.
//!
//! The engine is frontend-agnostic: anything that can produce a [`Command`]
//! can drive a run. The parser understands the usual roguelike key set so
//! scripted runs and interactive frontends share one vocabulary.

use crate::game::{Direction, PlayerAction};
use serde::{Deserialize, Serialize};

/// One keypress worth of player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step, or attack, one tile in a direction
    Move(Direction),
    /// Pass the turn
    Wait,
    /// Leave the game
    Quit,
    /// Toggle per-tick snapshot recording
    ToggleRecord,
}

impl Command {
    /// Maps a key to a command using the usual roguelike bindings.
    ///
    /// Vi keys (`hjkl`) and WASD move, `.` or space waits, `q` quits, `r`
    /// toggles recording. Anything else maps to nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use overworld::{Command, Direction};
    ///
    /// assert_eq!(Command::from_key('h'), Some(Command::Move(Direction::West)));
    /// assert_eq!(Command::from_key('.'), Some(Command::Wait));
    /// assert_eq!(Command::from_key('x'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'h' | 'a' => Some(Command::Move(Direction::West)),
            'l' | 'd' => Some(Command::Move(Direction::East)),
            'k' | 'w' => Some(Command::Move(Direction::North)),
            'j' | 's' => Some(Command::Move(Direction::South)),
            '.' | ' ' => Some(Command::Wait),
            'q' => Some(Command::Quit),
            'r' => Some(Command::ToggleRecord),
            _ => None,
        }
    }

    /// The world action this command drives, if any. Quitting and the
    /// recording toggle are frontend concerns and produce no tick.
    pub fn action(self) -> Option<PlayerAction> {
        match self {
            Command::Move(direction) => Some(PlayerAction::Move(direction)),
            Command::Wait => Some(PlayerAction::Wait),
            Command::Quit | Command::ToggleRecord => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vi_keys_map_to_moves() {
        assert_eq!(Command::from_key('h'), Some(Command::Move(Direction::West)));
        assert_eq!(Command::from_key('j'), Some(Command::Move(Direction::South)));
        assert_eq!(Command::from_key('k'), Some(Command::Move(Direction::North)));
        assert_eq!(Command::from_key('l'), Some(Command::Move(Direction::East)));
    }

    #[test]
    fn test_wasd_matches_vi() {
        assert_eq!(Command::from_key('w'), Command::from_key('k'));
        assert_eq!(Command::from_key('a'), Command::from_key('h'));
        assert_eq!(Command::from_key('s'), Command::from_key('j'));
        assert_eq!(Command::from_key('d'), Command::from_key('l'));
    }

    #[test]
    fn test_uppercase_keys_still_parse() {
        assert_eq!(Command::from_key('Q'), Some(Command::Quit));
        assert_eq!(Command::from_key('H'), Some(Command::Move(Direction::West)));
    }

    #[test]
    fn test_unknown_keys_parse_to_nothing() {
        assert_eq!(Command::from_key('x'), None);
        assert_eq!(Command::from_key('1'), None);
    }

    #[test]
    fn test_only_world_commands_become_actions() {
        assert_eq!(
            Command::Move(Direction::East).action(),
            Some(PlayerAction::Move(Direction::East))
        );
        assert_eq!(Command::Wait.action(), Some(PlayerAction::Wait));
        assert_eq!(Command::Quit.action(), None);
        assert_eq!(Command::ToggleRecord.action(), None);
    }
}
