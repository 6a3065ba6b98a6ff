//! Scripted player input for headless runs, written in roguelike vi-keys.

use anyhow::{Result, bail};
use bilebio_core::Direction;

/// One scripted turn: a step in a direction, or `None` to wait in place.
pub type ScriptedTurn = Option<Direction>;

/// Parses `hjklyubn` as steps and `.` as a wait. Whitespace is ignored.
pub fn parse_walk(script: &str) -> Result<Vec<ScriptedTurn>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(index, key)| {
            Ok(match key {
                'h' => Some(Direction::West),
                'j' => Some(Direction::South),
                'k' => Some(Direction::North),
                'l' => Some(Direction::East),
                'y' => Some(Direction::NorthWest),
                'u' => Some(Direction::NorthEast),
                'b' => Some(Direction::SouthWest),
                'n' => Some(Direction::SouthEast),
                '.' => None,
                other => bail!("unknown walk key '{other}' at position {index}"),
            })
        })
        .collect()
}
