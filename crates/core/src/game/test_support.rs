//! Shared fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating hand-built arenas across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::plant::{Plant, PlantKind};

/// Rock border around an all-floor interior.
pub(super) fn open_floor(width: usize, height: usize) -> Region {
    let tiles = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let edge = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
                if edge { TileKind::Rock } else { TileKind::Floor }
            })
        })
        .collect();
    Region::from_tiles(width, height, tiles)
}

/// Player always hits; plants never fight back.
pub(super) fn sure_hit_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.player_attributes.chance_to_hit = 1.0;
    config.vitals.root.damage = 0;
    config
}

/// A game on a 9x9 open arena with the player at `player_at` and no plants.
pub(super) fn arena_game(config: SimConfig, player_at: Pos) -> Game {
    let mut game = Game::new(7, config).expect("fixture config is valid");
    game.region = open_floor(9, 9);
    game.index.clear();
    game.entities.clear();
    game.log.clear();
    let player = Entity::player(game.config.vitals.player, game.config.player_attributes);
    game.player_id = game.entities.insert(player);
    game.index.add(game.player_id, player_at).expect("fixture tile is free");
    game
}

pub(super) fn add_vine(game: &mut Game, pos: Pos, parent: Option<EntityId>) -> EntityId {
    let plant = Plant { kind: PlantKind::Vine, target: Some(game.player_id), parent };
    let id = game.entities.insert(Entity::plant(game.config.vitals.vine, plant));
    game.index.add(id, pos).expect("fixture tile is free");
    id
}
